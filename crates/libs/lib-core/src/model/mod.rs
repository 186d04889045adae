//! # Model Layer
//!
//! Cache storage and the per-user history built on top of it.

pub mod history;
pub mod store;
