use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::action::Action;
use crate::browser::{BrowserEvent, BrowserState, Command};
use crate::error::AppError;
use crate::event::Event;
use crate::search::{RepoSource, SearchQuery};
use crate::selection::SelectionTable;
use crate::types::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Screen {
    #[default]
    Explore, // Most-starred repositories
    Triage, // Local issue table
}

pub struct App {
    pub screen: Screen,
    pub browser: BrowserState,
    pub table: SelectionTable,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub should_quit: bool,
    source: Arc<dyn RepoSource>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        source: Arc<dyn RepoSource>,
        records: Vec<Record>,
        min_stars: u64,
        screen: Screen,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            screen,
            browser: BrowserState::new(min_stars),
            table: SelectionTable::new(records),
            error: None,
            notice: None,
            should_quit: false,
            source,
            action_tx,
        }
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::LoadFirstPage,
            Event::Key(key) => self.handle_key(key),
            _ => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Tab | KeyCode::BackTab => Action::SwitchScreen,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('g') | KeyCode::Home => Action::GoToTop,
            KeyCode::Char('G') | KeyCode::End => Action::GoToBottom,
            KeyCode::Enter => Action::Select,
            _ => match self.screen {
                Screen::Explore => match key.code {
                    KeyCode::Char('h') | KeyCode::Left => Action::PrevPage,
                    KeyCode::Char('l') | KeyCode::Right => Action::NextPage,
                    KeyCode::Char('H') => Action::JumpToPage(1),
                    KeyCode::Char('L') => Action::JumpToPage(self.browser.total_pages()),
                    KeyCode::Char('r') => Action::Retry,
                    KeyCode::Char('o') => Action::OpenInBrowser,
                    KeyCode::Char('y') => Action::YankUrl,
                    _ => Action::None,
                },
                Screen::Triage => match key.code {
                    KeyCode::Char(' ') => Action::Select,
                    KeyCode::Char('a') => Action::ToggleAll,
                    _ => Action::None,
                },
            },
        }
    }

    pub fn update(&mut self, action: Action) {
        if !matches!(
            action,
            Action::PageLoaded { .. } | Action::PageFailed { .. } | Action::None
        ) {
            self.error = None;
            self.notice = None;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::SwitchScreen => {
                self.screen = match self.screen {
                    Screen::Explore => Screen::Triage,
                    Screen::Triage => Screen::Explore,
                };
            }
            Action::ScrollUp => match self.screen {
                Screen::Explore => self.browser.scroll_up(),
                Screen::Triage => self.table.previous(),
            },
            Action::ScrollDown => match self.screen {
                Screen::Explore => self.browser.scroll_down(),
                Screen::Triage => self.table.next(),
            },
            Action::GoToTop => match self.screen {
                Screen::Explore => self.browser.go_to_top(),
                Screen::Triage => self.table.first(),
            },
            Action::GoToBottom => match self.screen {
                Screen::Explore => self.browser.go_to_bottom(),
                Screen::Triage => self.table.last(),
            },
            Action::Select => match self.screen {
                Screen::Explore => self.open_selected(),
                Screen::Triage => self.table.toggle_cursor(),
            },

            // Explore
            Action::LoadFirstPage => self.dispatch(BrowserEvent::Start),
            Action::PrevPage => self.dispatch(BrowserEvent::PrevPage),
            Action::NextPage => self.dispatch(BrowserEvent::NextPage),
            Action::JumpToPage(page) => {
                if !self.browser.is_loading() {
                    self.dispatch(BrowserEvent::PageChanged(page));
                }
            }
            Action::Retry => self.dispatch(BrowserEvent::Retry),
            Action::PageLoaded { page, result } => {
                debug!(page, items = result.items.len(), total = result.total_count, "page loaded");
                self.dispatch(BrowserEvent::Fetched(result));
            }
            Action::PageFailed { page, message } => {
                warn!(page, %message, "failed to load page");
                self.dispatch(BrowserEvent::Failed(message));
            }
            Action::OpenInBrowser => self.open_selected(),
            Action::YankUrl => self.yank_selected(),

            // Triage
            Action::ToggleAll => self.table.toggle_header(),

            Action::Notice(msg) => {
                self.notice = Some(msg);
            }
            Action::Error(msg) => {
                self.error = Some(msg);
            }
            Action::None => {}
        }
    }

    fn dispatch(&mut self, event: BrowserEvent) {
        if let Some(Command::Fetch(query)) = self.browser.apply(event) {
            self.spawn_fetch(query);
        }
    }

    fn spawn_fetch(&self, query: SearchQuery) {
        let tx = self.action_tx.clone();
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            match source.search(&query).await {
                Ok(result) => {
                    tx.send(Action::PageLoaded {
                        page: query.page,
                        result,
                    })
                    .ok();
                }
                Err(e) => {
                    tx.send(Action::PageFailed {
                        page: query.page,
                        message: e.to_string(),
                    })
                    .ok();
                }
            }
        });
    }

    fn open_selected(&mut self) {
        let Some(url) = self.browser.selected_item().map(|i| i.url.clone()) else {
            return;
        };
        if let Err(e) = open::that(&url) {
            warn!(%url, error = %e, "failed to open browser");
            self.update(AppError::Io(e).into());
        }
    }

    fn yank_selected(&mut self) {
        let Some(url) = self.browser.selected_item().map(|i| i.url.clone()) else {
            return;
        };
        let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(&url));
        match result {
            Ok(()) => self.update(Action::Notice(format!("Copied {}", url))),
            Err(e) => {
                warn!(error = %e, "clipboard unavailable");
                self.update(AppError::Clipboard(e.to_string()).into());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::FetchState;
    use crate::error::Result;
    use crate::types::{Item, Owner, PageResult, Status};
    use async_trait::async_trait;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct FakeSource {
        fail: AtomicBool,
        requests: Mutex<Vec<SearchQuery>>,
    }

    #[async_trait]
    impl RepoSource for FakeSource {
        async fn search(&self, query: &SearchQuery) -> Result<PageResult> {
            self.requests.lock().unwrap().push(*query);
            if self.fail.load(Ordering::SeqCst) {
                return Err(AppError::Fetch("error sending request".to_string()));
            }
            Ok(PageResult {
                items: vec![Item {
                    id: 1,
                    name: "linux".to_string(),
                    full_name: "torvalds/linux".to_string(),
                    owner: Owner {
                        login: "torvalds".to_string(),
                        avatar_url: String::new(),
                    },
                    star_count: 182_345,
                    description: None,
                    url: "https://github.com/torvalds/linux".to_string(),
                    primary_language: Some("C".to_string()),
                }],
                total_count: 100_000,
            })
        }
    }

    fn records() -> Vec<Record> {
        [Status::Open, Status::Resolved, Status::Open]
            .into_iter()
            .enumerate()
            .map(|(i, status)| Record {
                id: i.to_string(),
                name: format!("Error{i}"),
                message: "boom".to_string(),
                status,
                event_count: 0,
                user_count: 0,
                value: 0.0,
            })
            .collect()
    }

    fn setup(fail: bool) -> (App, Arc<FakeSource>, mpsc::UnboundedReceiver<Action>) {
        let source = Arc::new(FakeSource::default());
        source.fail.store(fail, Ordering::SeqCst);
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(source.clone(), records(), 5000, Screen::Explore, tx);
        (app, source, rx)
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| crate::ui::render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn failed_initial_load_offers_retry_of_same_request() {
        let (mut app, source, mut rx) = setup(true);

        let action = app.handle_event(Event::Init);
        app.update(action);
        let reply = rx.recv().await.unwrap();
        app.update(reply);

        assert_eq!(
            app.browser.fetch,
            FetchState::Failure("error sending request".to_string())
        );
        let text = screen_text(&app);
        assert!(text.contains("error sending request"));
        assert!(text.contains("Try again"));

        let action = app.handle_event(key(KeyCode::Char('r')));
        app.update(action);
        assert!(app.browser.is_loading());
        let reply = rx.recv().await.unwrap();
        app.update(reply);

        let requests = source.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
        assert_eq!(requests[0], SearchQuery::new(5000, 1));
    }

    #[tokio::test]
    async fn retry_after_recovery_shows_results() {
        let (mut app, source, mut rx) = setup(true);
        app.update(Action::LoadFirstPage);
        let reply = rx.recv().await.unwrap();
        app.update(reply);

        source.fail.store(false, Ordering::SeqCst);
        app.update(Action::Retry);
        let reply = rx.recv().await.unwrap();
        app.update(reply);

        let text = screen_text(&app);
        assert!(text.contains("linux"));
        assert!(text.contains("182.3k"));
        assert!(text.contains("No description available"));
        assert!(text.contains("Page 1 of 34"));
    }

    #[tokio::test]
    async fn next_page_fetches_page_two() {
        let (mut app, source, mut rx) = setup(false);
        app.update(Action::LoadFirstPage);
        let reply = rx.recv().await.unwrap();
        app.update(reply);

        let action = app.handle_event(key(KeyCode::Char('l')));
        app.update(action);
        let text = screen_text(&app);
        assert!(text.contains("Loading"));
        assert!(!text.contains("Page "));
        assert!(!text.contains("Previous"));
        assert!(!text.contains("linux"));
        let reply = rx.recv().await.unwrap();
        app.update(reply);

        assert_eq!(app.browser.page, 2);
        let requests = source.requests.lock().unwrap().clone();
        assert_eq!(requests.last(), Some(&SearchQuery::new(5000, 2)));

        app.update(app.handle_event(key(KeyCode::Char('L'))));
        let reply = rx.recv().await.unwrap();
        app.update(reply);
        assert_eq!(app.browser.page, 34);
        assert!(!app.browser.can_next());
    }

    #[tokio::test]
    async fn triage_keys_drive_selection() {
        let (mut app, _source, _rx) = setup(false);
        app.update(app.handle_event(key(KeyCode::Tab)));
        assert_eq!(app.screen, Screen::Triage);
        assert!(screen_text(&app).contains("None selected"));

        app.update(app.handle_event(key(KeyCode::Char(' '))));
        assert!(screen_text(&app).contains("[-] Selected 1"));

        app.update(app.handle_event(key(KeyCode::Char('a'))));
        assert_eq!(app.table.selected_count(), 2);
        assert!(screen_text(&app).contains("[x] Selected 2"));

        // resolved row stays unselected
        app.update(app.handle_event(key(KeyCode::Down)));
        app.update(app.handle_event(key(KeyCode::Enter)));
        assert!(!app.table.is_checked(1));
    }

    #[test]
    fn quit_keys() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let app = App::new(
            Arc::new(FakeSource::default()),
            Vec::new(),
            5000,
            Screen::Explore,
            tx,
        );
        assert!(matches!(app.handle_event(key(KeyCode::Char('q'))), Action::Quit));
        assert!(matches!(app.handle_event(key(KeyCode::Esc)), Action::Quit));
    }
}
