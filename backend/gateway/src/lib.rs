//! NutriLens Gateway HTTP API Server
//!
//! Accepts nutrition-label photos over HTTP and answers with the extracted
//! nutrition facts as JSON.

pub mod cors;
pub mod error;
pub mod health_api;
pub mod process_image;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, start_server, GatewayState};
