//! citelens-common — shared data models and error types.

pub mod error;
pub mod models;

pub use error::{CitelensError, Result};
