use crate::error::AppError;
use crate::types::PageResult;

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    SwitchScreen,
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,
    Select,

    // Explore
    LoadFirstPage,
    PrevPage,
    NextPage,
    JumpToPage(u32),
    Retry,
    PageLoaded { page: u32, result: PageResult },
    PageFailed { page: u32, message: String },
    OpenInBrowser,
    YankUrl,

    // Triage
    ToggleAll,

    Notice(String),
    Error(String),
    None,
}

impl From<AppError> for Action {
    fn from(err: AppError) -> Self {
        Action::Error(err.to_string())
    }
}
