pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod manifest;
pub mod orchestration;

pub use error::{Error, ErrorKind, Result};
