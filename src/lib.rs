pub mod access;
pub mod config;
pub mod error;
pub mod guess;
pub mod llm;
pub mod server;

pub use error::{Error, Result};
