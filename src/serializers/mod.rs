//! Serializers - translation between request/response payloads and users.

mod user_serializer;

pub use user_serializer::{
    LoginRequest, LoginResponse, RegisterRequest, RegisteredUser, UserDetail,
};
