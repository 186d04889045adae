//! # Web Library
//!
//! HTTP handlers, middleware, services, and server startup for the chat gateway.

pub mod handlers;
pub mod middleware;
pub mod services;
pub mod server;

pub use server::{build_store, create_router, start_server, AppState, ServerConfig};
