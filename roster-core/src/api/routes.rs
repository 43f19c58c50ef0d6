//! Path constants shared by the server router and the client.

macro_rules! api_path {
    ($path:literal) => {
        concat!("/api", $path)
    };
}

/// Route definitions shared by the Roster server and client.
pub mod api {
    /// Prefix shared by every HTTP route.
    pub const ROOT: &str = "/api";
    /// Liveness probe.
    pub const HEALTH: &str = api_path!("/health");

    /// Worker queue endpoints.
    pub mod worker {
        /// Queue one simulated job.
        pub const SUBMIT: &str = api_path!("/worker/submit");
        /// One request by id.
        pub const STATUS: &str = api_path!("/worker/status/{request_id}");
        /// Every request with status counts.
        pub const REQUESTS: &str = api_path!("/worker/requests");
        /// Drop every request.
        pub const CLEAR: &str = api_path!("/worker/clear");

        /// Concrete status path for `request_id`.
        pub fn status_path(request_id: &str) -> String {
            STATUS.replace("{request_id}", request_id)
        }
    }

    /// Mock directory endpoints.
    pub mod directory {
        /// Paginated, filterable user listing.
        pub const USERS: &str = api_path!("/users");
        /// Top hobby and nationality facets.
        pub const FILTERS: &str = api_path!("/filters");
    }

    /// Character streaming endpoints.
    pub mod streaming {
        /// Stream at the configured delay.
        pub const TEXT: &str = api_path!("/stream-text");
        /// Stream with `{speed}` milliseconds between characters.
        pub const TEXT_WITH_SPEED: &str = api_path!("/stream-text/{speed}");

        /// Concrete streaming path for `speed_ms`.
        pub fn text_with_speed_path(speed_ms: u64) -> String {
            TEXT_WITH_SPEED.replace("{speed}", &speed_ms.to_string())
        }
    }

    /// Notification channel endpoints. `SOCKET` is an alias kept for
    /// clients that expect a socket-style path.
    pub mod channel {
        /// Primary channel path.
        pub const WS: &str = "/ws";
        /// Alias of [`WS`].
        pub const SOCKET: &str = "/socket";
    }
}

#[cfg(test)]
mod tests {
    use super::api;

    #[test]
    fn status_path_substitutes_the_id() {
        assert_eq!(
            api::worker::status_path("req_1_2"),
            "/api/worker/status/req_1_2"
        );
    }

    #[test]
    fn speed_path_substitutes_the_speed() {
        assert_eq!(
            api::streaming::text_with_speed_path(10),
            "/api/stream-text/10"
        );
    }
}
