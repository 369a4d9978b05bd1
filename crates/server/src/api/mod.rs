//! Request handlers.

pub mod analyze;
pub mod auth;
pub mod health;

pub use analyze::analyze;
pub use auth::login;
pub use health::health_routes;
