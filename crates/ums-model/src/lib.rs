//! Wire types shared by the mock user API and its client.
//!
//! Field names follow the upstream JSON contract (`first_name`, `createdAt`,
//! ...), so both sides of the workspace serialize through the same structs.

pub mod auth;
pub mod user;

pub use auth::{Credentials, ErrorBody, LoginResponse, RegisterResponse};
pub use user::{
    CreatedUser, DEFAULT_AVATAR, NewUser, PER_PAGE, UpdatedUser, User, UserEnvelope, UserId,
    UserPage, UserPatch,
};
