//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and the user repository. They are
//! exposed as traits so handlers can be exercised against test doubles.

mod auth_service;
mod user_service;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use user_service::{CompleteUser, UserManager, UserService};
