//! User service for the remote users API.
//!
//! Validates caller input, delegates to the injected transport, checks the
//! response shape and maps it onto domain types. Every failure past input
//! validation comes back as an [`ApiError`] carrying the operation's inputs
//! as context and the original fault as its source.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{ApiError, BoxError, ClientResult};
use crate::external::{HttpTransport, RequestOptions};
use crate::models::{User, UserPage, deserialize_id};
use crate::utils::{validate_non_empty_string, validate_positive_integer, validate_response_keys};

const PAGE_KEYS: &[&str] = &["data", "total", "per_page", "page", "total_pages"];

/// Paging metadata that accompanies a `data` list.
#[derive(Debug, Deserialize)]
struct PageMeta {
    total: u64,
    per_page: u64,
    page: u64,
    total_pages: u64,
}

/// Service for reading and creating users through an [`HttpTransport`].
///
/// Holds only a shared handle to the transport, so cloning is cheap and a
/// single instance can be used from many tasks at once.
#[derive(Clone)]
pub struct UserService {
    transport: Arc<dyn HttpTransport>,
}

impl UserService {
    /// Creates a new UserService on top of the given transport.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Gets a user by their ID.
    ///
    /// # Errors
    /// `InvalidArgument` when `id < 1`, before any request is made.
    /// `Api` ("Failed to fetch user", context `{id}`) for anything else.
    pub async fn get_user_by_id(&self, id: i64) -> ClientResult<User> {
        validate_positive_integer(id, "id")?;
        tracing::debug!(id, "fetching user");

        let user = self
            .fetch_user(id)
            .await
            .map_err(|source| wrap_failure("Failed to fetch user", source).with_context("id", id))?;

        tracing::debug!(id = user.id(), "fetched user");
        Ok(user)
    }

    /// Gets one page of users.
    ///
    /// # Errors
    /// `InvalidArgument` when `page < 1`, before any request is made.
    /// `Api` ("Failed to fetch paginated users", context `{page}`) for
    /// anything else.
    pub async fn get_paginated_users(&self, page: i64) -> ClientResult<UserPage> {
        validate_positive_integer(page, "page")?;
        tracing::debug!(page, "fetching users page");

        let result = self.fetch_page(page).await.map_err(|source| {
            wrap_failure("Failed to fetch paginated users", source).with_context("page", page)
        })?;

        tracing::debug!(
            page = result.page(),
            count = result.users().len(),
            total = result.total(),
            "fetched users page"
        );
        Ok(result)
    }

    /// Gets the first page of users.
    pub async fn get_first_page(&self) -> ClientResult<UserPage> {
        self.get_paginated_users(1).await
    }

    /// Creates a user and returns the identifier assigned by the API.
    ///
    /// # Errors
    /// `InvalidArgument` when `name` (checked first) or `job` is blank.
    /// `Api` ("Failed to create user", context `{name, job}`) for anything
    /// else, including a response without an `id`.
    pub async fn create_user(&self, name: &str, job: &str) -> ClientResult<u64> {
        validate_non_empty_string(name, "name")?;
        validate_non_empty_string(job, "job")?;
        tracing::debug!(name, job, "creating user");

        let id = self.post_user(name, job).await.map_err(|source| {
            wrap_failure("Failed to create user", source)
                .with_context("name", name)
                .with_context("job", job)
        })?;

        tracing::debug!(id, "created user");
        Ok(id)
    }

    async fn fetch_user(&self, id: i64) -> Result<User, BoxError> {
        let response = self
            .transport
            .get(&format!("users/{}", id), RequestOptions::new())
            .await?;

        validate_response_keys(&response, &["data"])?;
        Ok(User::from_raw(&response["data"])?)
    }

    async fn fetch_page(&self, page: i64) -> Result<UserPage, BoxError> {
        let response = self
            .transport
            .get("users", RequestOptions::new().query("page", page))
            .await?;

        validate_response_keys(&response, PAGE_KEYS)?;

        let users = response["data"]
            .as_array()
            .ok_or_else(|| ApiError::for_invalid_response("data is not a list"))?
            .iter()
            .map(User::from_raw)
            .collect::<Result<Vec<_>, _>>()?;

        let meta = PageMeta::deserialize(&response)
            .map_err(|e| ApiError::for_invalid_response(format!("malformed paging: {}", e)))?;

        Ok(UserPage::new(
            users,
            meta.total,
            meta.per_page,
            meta.page,
            meta.total_pages,
        ))
    }

    async fn post_user(&self, name: &str, job: &str) -> Result<u64, BoxError> {
        let response = self
            .transport
            .post(
                "users",
                RequestOptions::new().json(json!({"name": name, "job": job})),
            )
            .await?;

        let id = match response.get("id") {
            Some(id) => id,
            None => return Err(ApiError::for_invalid_response(response_body(&response)).into()),
        };

        deserialize_id(id)
            .map_err(|e| ApiError::for_invalid_response(format!("malformed id: {}", e)).into())
    }
}

/// Re-raises a lower-level fault as an unclassified operation error.
fn wrap_failure(message: &str, source: BoxError) -> ApiError {
    tracing::warn!(error = %source, "{}", message);
    ApiError::new(message, 0).with_source(source)
}

fn response_body(response: &Value) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| response.to_string())
}
