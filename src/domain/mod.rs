//! Domain layer - Core business entities and logic
//!
//! The user entity, its account type, and the password value object.
//! Nothing here touches the database or HTTP.

pub mod password;
pub mod user;

pub use password::Password;
pub use user::{normalize_email, validate_username, NewUser, User, UserType};
