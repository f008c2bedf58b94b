//! Common utilities shared by every pipeline stage

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};
