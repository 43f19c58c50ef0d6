use serde::{Deserialize, Serialize};

/// A mock directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub avatar: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub nationality: String,
    pub hobbies: Vec<String>,
}

/// Query string accepted by `GET /api/users`.
///
/// `hobbies` is a comma-separated list; a user matches when any of its
/// hobbies is in the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersResponse {
    pub data: Vec<User>,
    pub pagination: PaginationInfo,
}

/// One entry of the filter facets; exactly one of `hobby` or `nationality`
/// is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hobby: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    pub count: usize,
}

impl FilterItem {
    pub fn hobby(name: impl Into<String>, count: usize) -> Self {
        Self {
            hobby: Some(name.into()),
            nationality: None,
            count,
        }
    }

    pub fn nationality(name: impl Into<String>, count: usize) -> Self {
        Self {
            hobby: None,
            nationality: Some(name.into()),
            count,
        }
    }

    pub fn label(&self) -> &str {
        self.hobby
            .as_deref()
            .or(self.nationality.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersResponse {
    pub top_hobbies: Vec<FilterItem>,
    pub top_nationalities: Vec<FilterItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 timestamp.
    pub timestamp: String,
}
