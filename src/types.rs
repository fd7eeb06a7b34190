use serde::{Deserialize, Deserializer};
use std::fmt;

/// Owner of a repository returned by the search API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Owner {
    pub login: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub avatar_url: String,
}

/// A repository from one page of search results
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Item {
    #[allow(dead_code)]
    pub id: u64,
    pub name: String,
    #[allow(dead_code)]
    pub full_name: String,
    pub owner: Owner,
    #[serde(rename = "stargazers_count")]
    pub star_count: u64,
    pub description: Option<String>,
    #[serde(rename = "html_url")]
    pub url: String,
    #[serde(rename = "language")]
    pub primary_language: Option<String>,
}

/// One page of search results. Never merged with earlier pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageResult {
    pub items: Vec<Item>,
    pub total_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Open,
    #[default]
    #[serde(other)]
    Resolved,
}

impl Status {
    pub fn is_open(&self) -> bool {
        matches!(self, Status::Open)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Open => write!(f, "Open"),
            Status::Resolved => write!(f, "Resolved"),
        }
    }
}

/// Issue record shown in the triage table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[allow(dead_code)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Status,
    #[serde(default, rename = "numEvents", deserialize_with = "null_as_default")]
    #[allow(dead_code)]
    pub event_count: u64,
    #[serde(default, rename = "numUsers", deserialize_with = "null_as_default")]
    #[allow(dead_code)]
    pub user_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    #[allow(dead_code)]
    pub value: f64,
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
