use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::types::PageResult;

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/search/repositories";
pub const DEFAULT_MIN_STARS: u64 = 5000;
pub const PER_PAGE: u32 = 30;

/// Parameters of a single search request. Two queries compare equal iff they
/// would produce the same request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchQuery {
    pub min_stars: u64,
    pub page: u32,
    pub per_page: u32,
}

impl SearchQuery {
    pub fn new(min_stars: u64, page: u32) -> Self {
        Self {
            min_stars,
            page,
            per_page: PER_PAGE,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", format!("stars:>{}", self.min_stars)),
            ("sort", "stars".to_string()),
            ("order", "desc".to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
        ]
    }

    pub fn to_url(&self, endpoint: &str) -> String {
        let query = self
            .params()
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", endpoint, query)
    }
}

#[async_trait]
pub trait RepoSource: Send + Sync + std::fmt::Debug {
    async fn search(&self, query: &SearchQuery) -> Result<PageResult>;
}

pub struct GitHubSearch {
    client: Client,
    endpoint: String,
}

impl std::fmt::Debug for GitHubSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubSearch")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl GitHubSearch {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("starboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Fetch(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl RepoSource for GitHubSearch {
    async fn search(&self, query: &SearchQuery) -> Result<PageResult> {
        let url = query.to_url(&self.endpoint);
        debug!(%url, "searching repositories");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(%status, page = query.page, "search request rejected");
            return Err(AppError::Fetch(format!(
                "Failed to fetch repositories ({})",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))
    }
}
