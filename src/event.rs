use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone)]
pub enum Event {
    /// Sent once when the event loop starts
    Init,
    Tick,
    Render,
    Resize(u16, u16),
    Key(KeyEvent),
}

impl Event {
    /// Ctrl+C always exits, whatever screen is active.
    pub fn is_quit(&self) -> bool {
        matches!(
            self,
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            })
        )
    }
}
