use serde::{Deserialize, Serialize};

/// Opaque identifier handed out when a worker request is submitted.
///
/// The server renders ids as `req_<unix-millis>_<counter>`; clients must
/// treat them as opaque strings.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(raw: impl Into<String>) -> Self {
        RequestId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for RequestId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RequestId {
    fn from(raw: String) -> Self {
        RequestId(raw)
    }
}

impl From<&str> for RequestId {
    fn from(raw: &str) -> Self {
        RequestId(raw.to_string())
    }
}
