//! State machine behind the Explore screen.

use tracing::debug;

use crate::search::{SearchQuery, PER_PAGE};
use crate::types::{Item, PageResult};

/// The search API never serves more than 1000 results, i.e. 34 pages of 30.
pub const MAX_PAGES: u32 = 34;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success {
        items: Vec<Item>,
        total_count: u64,
    },
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    Start,
    PageChanged(u32),
    NextPage,
    PrevPage,
    Fetched(PageResult),
    Failed(String),
    Retry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fetch(SearchQuery),
}

#[derive(Debug, Clone)]
pub struct BrowserState {
    pub page: u32,
    pub fetch: FetchState,
    pub cursor: usize,
    min_stars: u64,
    last_total: u64,
}

impl BrowserState {
    pub fn new(min_stars: u64) -> Self {
        Self {
            page: 1,
            fetch: FetchState::Idle,
            cursor: 0,
            min_stars,
            last_total: 0,
        }
    }

    pub fn min_stars(&self) -> u64 {
        self.min_stars
    }

    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(self.min_stars, self.page)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.fetch, FetchState::Loading)
    }

    pub fn items(&self) -> &[Item] {
        match &self.fetch {
            FetchState::Success { items, .. } => items,
            _ => &[],
        }
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.items().get(self.cursor)
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.last_total)
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Responses are not tagged with the page they were issued for, so a late
    /// response overwrites whatever is on screen when it lands.
    pub fn apply(&mut self, event: BrowserEvent) -> Option<Command> {
        match event {
            BrowserEvent::Start => Some(self.begin_fetch()),
            BrowserEvent::PageChanged(page) => self.change_page(page),
            BrowserEvent::NextPage => {
                if self.showing_results() && self.can_next() {
                    self.change_page(self.page + 1)
                } else {
                    None
                }
            }
            BrowserEvent::PrevPage => {
                if self.showing_results() && self.can_prev() {
                    self.change_page(self.page - 1)
                } else {
                    None
                }
            }
            BrowserEvent::Fetched(result) => {
                self.last_total = result.total_count;
                self.cursor = 0;
                self.fetch = FetchState::Success {
                    items: result.items,
                    total_count: result.total_count,
                };
                None
            }
            BrowserEvent::Failed(message) => {
                self.fetch = FetchState::Failure(message);
                None
            }
            BrowserEvent::Retry => match self.fetch {
                FetchState::Failure(_) => Some(self.begin_fetch()),
                _ => None,
            },
        }
    }

    pub fn scroll_down(&mut self) {
        let len = self.items().len();
        if len > 0 && self.cursor < len - 1 {
            self.cursor += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn go_to_top(&mut self) {
        self.cursor = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.cursor = self.items().len().saturating_sub(1);
    }

    fn showing_results(&self) -> bool {
        matches!(self.fetch, FetchState::Success { .. })
    }

    fn change_page(&mut self, page: u32) -> Option<Command> {
        if page == self.page || page < 1 || page > self.total_pages() {
            return None;
        }
        debug!(from = self.page, to = page, "page changed");
        self.page = page;
        Some(self.begin_fetch())
    }

    fn begin_fetch(&mut self) -> Command {
        self.fetch = FetchState::Loading;
        Command::Fetch(self.query())
    }
}

pub fn total_pages(total_count: u64) -> u32 {
    let pages = total_count.div_ceil(PER_PAGE as u64);
    pages.min(MAX_PAGES as u64) as u32
}

/// Compact star label: `12345` becomes `12.3k`, values under 1000 are printed as-is.
pub fn format_stars(count: u64) -> String {
    if count < 1000 {
        return count.to_string();
    }
    // tenths of a thousand, rounded half-up
    let tenths = count / 100 + u64::from(count % 100 >= 50);
    format!("{}.{}k", tenths / 10, tenths % 10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Owner;
    use proptest::prelude::*;

    fn item(id: u64) -> Item {
        Item {
            id,
            name: format!("repo-{id}"),
            full_name: format!("owner/repo-{id}"),
            owner: Owner {
                login: "owner".to_string(),
                avatar_url: String::new(),
            },
            star_count: 10_000,
            description: None,
            url: format!("https://github.com/owner/repo-{id}"),
            primary_language: None,
        }
    }

    fn loaded(total_count: u64) -> BrowserState {
        let mut state = BrowserState::new(5000);
        state.apply(BrowserEvent::Start);
        state.apply(BrowserEvent::Fetched(PageResult {
            items: vec![item(1), item(2)],
            total_count,
        }));
        state
    }

    #[test]
    fn star_labels() {
        assert_eq!(format_stars(0), "0");
        assert_eq!(format_stars(999), "999");
        assert_eq!(format_stars(1000), "1.0k");
        assert_eq!(format_stars(12345), "12.3k");
        assert_eq!(format_stars(1250), "1.3k");
        assert_eq!(format_stars(401_234), "401.2k");
        assert_eq!(format_stars(u64::MAX), "18446744073709551.6k");
    }

    #[test]
    fn huge_totals_are_capped() {
        assert_eq!(total_pages(100_000), 34);
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(30), 1);
        assert_eq!(total_pages(31), 2);
    }

    #[test]
    fn start_issues_first_page() {
        let mut state = BrowserState::new(5000);
        let cmd = state.apply(BrowserEvent::Start);
        assert_eq!(cmd, Some(Command::Fetch(SearchQuery::new(5000, 1))));
        assert!(state.is_loading());
    }

    #[test]
    fn next_then_prev_fetches_each_page_once() {
        let mut state = loaded(100_000);
        assert!(!state.can_prev());
        let cmd = state.apply(BrowserEvent::NextPage);
        assert_eq!(cmd, Some(Command::Fetch(SearchQuery::new(5000, 2))));
        assert_eq!(state.fetch, FetchState::Loading);

        // paging is ignored while loading
        assert_eq!(state.apply(BrowserEvent::NextPage), None);

        state.apply(BrowserEvent::Fetched(PageResult {
            items: vec![item(3)],
            total_count: 100_000,
        }));
        let cmd = state.apply(BrowserEvent::PrevPage);
        assert_eq!(cmd, Some(Command::Fetch(SearchQuery::new(5000, 1))));
    }

    #[test]
    fn next_disabled_on_last_page() {
        let mut state = loaded(100_000);
        assert!(state.apply(BrowserEvent::PageChanged(34)).is_some());
        state.apply(BrowserEvent::Fetched(PageResult {
            items: vec![item(9)],
            total_count: 100_000,
        }));
        assert!(!state.can_next());
        assert_eq!(state.apply(BrowserEvent::NextPage), None);
        assert_eq!(state.apply(BrowserEvent::PageChanged(35)), None);
    }

    #[test]
    fn empty_result_disables_next() {
        let state = loaded(0);
        assert!(!state.can_next());
        assert!(!state.can_prev());
    }

    #[test]
    fn failure_then_retry_repeats_the_request() {
        let mut state = loaded(100_000);
        let first = state.apply(BrowserEvent::NextPage);
        state.apply(BrowserEvent::Failed("boom".to_string()));
        assert_eq!(state.fetch, FetchState::Failure("boom".to_string()));
        assert!(state.items().is_empty());

        let retry = state.apply(BrowserEvent::Retry);
        assert_eq!(retry, first);
        assert!(state.is_loading());
    }

    #[test]
    fn retry_outside_failure_is_ignored() {
        let mut state = loaded(60);
        assert_eq!(state.apply(BrowserEvent::Retry), None);
    }

    #[test]
    fn fetched_result_replaces_items() {
        let mut state = loaded(60);
        state.scroll_down();
        assert_eq!(state.cursor, 1);
        state.apply(BrowserEvent::NextPage);
        state.apply(BrowserEvent::Fetched(PageResult {
            items: vec![item(7)],
            total_count: 60,
        }));
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.selected_item().map(|i| i.id), Some(7));
    }

    proptest! {
        #[test]
        fn star_label_matches_rounded_thousands(count in 1000u64..10_000_000) {
            let expected = format!("{:.1}k", ((count * 10 + 500) / 1000) as f64 / 10.0);
            prop_assert_eq!(format_stars(count), expected);
        }

        #[test]
        fn small_star_counts_are_plain(count in 0u64..1000) {
            prop_assert_eq!(format_stars(count), count.to_string());
        }

        #[test]
        fn page_bounds(total in 0u64..2_000_000, page in 1u32..=34) {
            let pages = total_pages(total);
            prop_assert_eq!(pages as u64, ((total + 29) / 30).min(34));

            let mut state = BrowserState::new(5000);
            state.last_total = total;
            state.page = page.min(pages.max(1));
            prop_assert_eq!(!state.can_prev(), state.page == 1);
            if state.page <= pages {
                prop_assert_eq!(!state.can_next(), state.page == pages);
            }
        }
    }
}
