//! # User Identifiers
//!
//! Generation of anonymous chat user ids (`user_<hex>`).
//!
//! Ids come from a random v4 UUID rendered as 32 lowercase hex characters. They are
//! not meant to be secret and uniqueness is probabilistic only: two browsers that
//! end up with the same id share one history.

use uuid::Uuid;

/// Prefix carried by every generated user id.
pub const USER_ID_PREFIX: &str = "user_";

/// Source of user ids for requests that arrive without one.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Default generator backed by random UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        format!("{}{}", USER_ID_PREFIX, Uuid::new_v4().simple())
    }
}

// endregion: --- Tests
