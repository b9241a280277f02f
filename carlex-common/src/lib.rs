//! # Carlex Common Library
//!
//! Shared code for the carlex text-processing crates:
//! - Error types
//! - TOML bootstrap configuration and path resolution
//! - Reference dictionary of car brands and models

pub mod config;
pub mod dictionary;
pub mod error;

pub use dictionary::ReferenceDictionary;
pub use error::{Error, Result};
