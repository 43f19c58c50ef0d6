//! Filtering, pagination and facet counts over the directory.

use std::collections::HashMap;

use roster_model::{
    FilterItem, FiltersResponse, PaginationInfo, User, UserQuery,
    UsersResponse,
};

/// Page used when none is given.
pub const DEFAULT_PAGE: usize = 1;
/// Page size used when none is given.
pub const DEFAULT_LIMIT: usize = 20;
/// Largest accepted page size.
pub const MAX_LIMIT: usize = 1000;
/// Entries per facet in [`top_filters`].
pub const TOP_FILTERS: usize = 20;

/// Criteria parsed out of a [`UserQuery`], lowercased once.
#[derive(Debug, Default)]
struct Criteria {
    search: Option<String>,
    nationality: Option<String>,
    hobbies: Vec<String>,
}

impl Criteria {
    fn from_query(query: &UserQuery) -> Self {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_lowercase)
        };

        Self {
            search: non_empty(&query.search),
            nationality: non_empty(&query.nationality),
            hobbies: query
                .hobbies
                .as_deref()
                .map(|raw| {
                    raw.split(',')
                        .map(|h| h.trim().to_lowercase())
                        .filter(|h| !h.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    fn matches(&self, user: &User) -> bool {
        if let Some(search) = &self.search {
            let hit = user.first_name.to_lowercase().contains(search)
                || user.last_name.to_lowercase().contains(search);
            if !hit {
                return false;
            }
        }
        if let Some(nationality) = &self.nationality
            && user.nationality.to_lowercase() != *nationality
        {
            return false;
        }
        if !self.hobbies.is_empty()
            && !user
                .hobbies
                .iter()
                .any(|h| self.hobbies.contains(&h.to_lowercase()))
        {
            return false;
        }
        true
    }
}

/// Filters `users` by the query and returns the requested page.
///
/// `page` and `limit` below 1 are treated as 1; `limit` is capped at
/// [`MAX_LIMIT`]. A page past the end yields empty `data` with the real
/// totals.
pub fn query_users(users: &[User], query: &UserQuery) -> UsersResponse {
    let page = query.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let criteria = Criteria::from_query(query);

    let matching: Vec<&User> =
        users.iter().filter(|u| criteria.matches(u)).collect();
    let total_items = matching.len();
    let total_pages = total_items.div_ceil(limit);

    let data = matching
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .cloned()
        .collect();

    UsersResponse {
        data,
        pagination: PaginationInfo {
            current_page: page,
            total_pages,
            total_items,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        },
    }
}

/// Most common hobbies and nationalities, count descending then name
/// ascending.
pub fn top_filters(users: &[User]) -> FiltersResponse {
    let mut hobbies: HashMap<&str, usize> = HashMap::new();
    let mut nationalities: HashMap<&str, usize> = HashMap::new();
    for user in users {
        for hobby in &user.hobbies {
            *hobbies.entry(hobby.as_str()).or_default() += 1;
        }
        *nationalities.entry(user.nationality.as_str()).or_default() += 1;
    }

    FiltersResponse {
        top_hobbies: ranked(hobbies)
            .map(|(name, count)| FilterItem::hobby(name, count))
            .collect(),
        top_nationalities: ranked(nationalities)
            .map(|(name, count)| FilterItem::nationality(name, count))
            .collect(),
    }
}

fn ranked(
    counts: HashMap<&str, usize>,
) -> impl Iterator<Item = (&str, usize)> {
    let mut entries: Vec<_> = counts.into_iter().collect();
    entries.sort_by(|(a_name, a), (b_name, b)| {
        b.cmp(a).then_with(|| a_name.cmp(b_name))
    });
    entries.into_iter().take(TOP_FILTERS)
}
