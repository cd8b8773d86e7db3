//! Web API module for corkboard.
//!
//! REST surface of the board: authentication, posts, comments, uploads,
//! plus static serving of stored uploads.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::{create_health_router, create_router};
pub use server::WebServer;
