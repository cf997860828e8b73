//! Paged listing of users.

use super::User;
use serde::{Deserialize, Serialize};

/// One page of users together with the paging metadata the API reported.
///
/// Read-only once built, like [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPage {
    users: Vec<User>,
    total: u64,
    per_page: u64,
    page: u64,
    total_pages: u64,
}

impl UserPage {
    pub fn new(users: Vec<User>, total: u64, per_page: u64, page: u64, total_pages: u64) -> Self {
        Self {
            users,
            total,
            per_page,
            page,
            total_pages,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Whether the API reports pages after this one.
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}
