//! Mock user directory generated at startup.

pub mod generator;
pub mod query;

use roster_model::{FiltersResponse, User, UserQuery, UsersResponse};

pub use generator::generate_users;
pub use query::{query_users, top_filters};

/// Users generated when no count is configured.
pub const DEFAULT_USER_COUNT: usize = 1000;

/// Immutable user set plus its precomputed facet counts.
#[derive(Debug, Clone)]
pub struct Directory {
    users: Vec<User>,
    filters: FiltersResponse,
}

impl Directory {
    /// Wraps `users` and computes their facets.
    pub fn new(users: Vec<User>) -> Self {
        let filters = top_filters(&users);
        Self { users, filters }
    }

    /// Generates `count` users, deterministically when `seed` is set.
    pub fn generate(count: usize, seed: Option<u64>) -> Self {
        let directory = Self::new(generate_users(count, seed));
        tracing::info!(
            users = directory.len(),
            seeded = seed.is_some(),
            "generated mock directory"
        );
        directory
    }

    /// One filtered page of users.
    pub fn query(&self, query: &UserQuery) -> UsersResponse {
        query_users(&self.users, query)
    }

    /// Facet counts computed at construction.
    pub fn filters(&self) -> &FiltersResponse {
        &self.filters
    }

    /// Every user, in id order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Number of users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// True when the directory holds no users.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::generate(DEFAULT_USER_COUNT, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_directory_exposes_filters_over_all_users() {
        let directory = Directory::generate(300, Some(11));
        let filters = directory.filters();

        assert!(filters.top_hobbies.len() <= query::TOP_FILTERS);
        assert_eq!(filters.top_nationalities.len(), query::TOP_FILTERS);
        let nationality_total: usize =
            filters.top_nationalities.iter().map(|f| f.count).sum();
        assert!(nationality_total <= directory.len());
        assert!(
            filters
                .top_hobbies
                .windows(2)
                .all(|pair| pair[0].count >= pair[1].count)
        );
    }
}
