//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures exchanged with the browser and with
//! the AI service.

pub mod chat;
pub mod generate;

pub use chat::*;
pub use generate::*;
