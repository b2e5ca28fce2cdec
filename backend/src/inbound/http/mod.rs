//! HTTP adapter: Actix handlers, request/response bodies, and the mapping
//! from domain errors to transport responses.

pub mod courses;
pub mod error;
pub mod health;
pub mod pagination;
pub mod replies;
pub mod state;
pub mod topics;
pub mod users;

pub use error::ApiResult;
