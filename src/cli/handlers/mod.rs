//! Command handlers for CLI operations
//!
//! Separates command execution from parsing and configuration.

pub mod users;

pub use users::UsersCommandHandler;
