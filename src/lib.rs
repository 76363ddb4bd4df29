//! usermgmt - user registration and token authentication
//!
//! Custom user accounts keyed by email, with a validated registration
//! endpoint, credential login issuing JWT bearer tokens, and an
//! administrator bootstrap command.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: User entity, user types and password hashing
//! - **services**: User factories and the authentication backend
//! - **serializers**: Request/response payloads and their validation
//! - **infra**: Database, migrations and the user repository
//! - **api**: HTTP handlers, middleware, and routes
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
//!
//! # Bootstrap an administrator
//! SUPERUSER_PASSWORD=... cargo run -- createsuperuser --username admin --email admin@example.com
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod serializers;
pub mod services;

pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User, UserType};
pub use errors::{AppError, AppResult};
