//! Users command handler
//!
//! Runs the `get`, `list` and `create` subcommands against a [`UserService`]
//! and renders each result as JSON.

use serde_json::{Value, json};

use crate::error::ClientResult;
use crate::services::UserService;

/// Handler for the user subcommands
pub struct UsersCommandHandler {
    service: UserService,
}

impl UsersCommandHandler {
    pub fn new(service: UserService) -> Self {
        Self { service }
    }

    /// `get <ID>`: prints `{id, name, job}`
    pub async fn get(&self, id: i64) -> ClientResult<Value> {
        let user = self.service.get_user_by_id(id).await?;
        Ok(user.to_representation())
    }

    /// `list [--page N]`: prints the page bundle
    pub async fn list(&self, page: i64) -> ClientResult<Value> {
        let page = self.service.get_paginated_users(page).await?;
        Ok(json!({
            "users": page.users().iter().map(|u| u.to_representation()).collect::<Vec<_>>(),
            "total": page.total(),
            "per_page": page.per_page(),
            "page": page.page(),
            "total_pages": page.total_pages(),
        }))
    }

    /// `create --name N --job J`: prints `{id}`
    pub async fn create(&self, name: &str, job: &str) -> ClientResult<Value> {
        let id = self.service.create_user(name, job).await?;
        Ok(json!({ "id": id }))
    }
}
