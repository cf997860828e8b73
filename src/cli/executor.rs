//! Command executor for dispatching CLI commands
//!
//! Wires the default transport from settings and dispatches the parsed
//! subcommand to its handler.

use std::sync::Arc;

use serde_json::Value;

use super::handlers::UsersCommandHandler;
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::ClientResult;
use crate::external::ReqwestTransport;
use crate::services::UserService;

/// Build the user service on top of the reqwest transport described by `settings`
///
/// # Errors
/// Returns the reqwest error if the HTTP client cannot be constructed
pub fn build_service(settings: &Settings) -> Result<UserService, reqwest::Error> {
    let transport = ReqwestTransport::from_config(&settings.client)?;
    tracing::debug!(base_url = transport.base_url(), "transport ready");
    Ok(UserService::new(Arc::new(transport)))
}

/// Execute a CLI command and return its JSON output
///
/// # Errors
/// Returns the service error unchanged so callers can tell invalid input
/// apart from remote failures
pub async fn execute_command(cli: &Cli, service: UserService) -> ClientResult<Value> {
    let handler = UsersCommandHandler::new(service);

    match &cli.command {
        Commands::Get { id } => handler.get(*id).await,
        Commands::List { page } => handler.list(*page).await,
        Commands::Create { name, job } => handler.create(name, job).await,
    }
}
