//! Usuarios API - user management over HTTP.
//!
//! Create, list, fetch, update and delete user records stored in a
//! relational table, exposed as a JSON REST API under `/usuarios`.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: Command-line interface (`serve`, `migrate`)
//! - **config**: Application configuration and constants
//! - **domain**: User entity, request/response shapes, password hashing
//! - **services**: Business rules (email uniqueness)
//! - **infra**: Database, migrations and the user repository
//! - **api**: HTTP handlers, extractors and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User, UserRequest, UserResponse};
pub use errors::{AppError, AppResult};
