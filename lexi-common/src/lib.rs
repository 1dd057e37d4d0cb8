//! # Lexi Common Library
//!
//! Shared code for the Lexi dictionary service including:
//! - Database schema and initialization
//! - Entity models and field validation
//! - Bootstrap configuration loading
//! - Common error types

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod text;
pub mod time;

pub use error::{Error, Result, ValidationError};
