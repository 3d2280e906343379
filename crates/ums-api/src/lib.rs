pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod state;
pub mod tracing;
pub mod user;

pub use config::ApiConfig;
pub use state::ApiState;
