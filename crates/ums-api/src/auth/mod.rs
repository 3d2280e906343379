pub mod routes;
pub mod service;
pub mod validation;

pub use routes::routes;
