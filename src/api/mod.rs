//! HTTP adapter over the skin resolver.

pub mod error;
pub mod routes;
pub mod skin;

pub use error::{ApiError, ErrorResponse};
pub use routes::{create_router, SKIN_PATH};
