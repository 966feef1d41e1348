//! # BizLens Common Library
//!
//! Shared code for the BizLens binaries including:
//! - Database connection and schema bootstrap
//! - Configuration resolution (CLI / env / TOML / defaults)
//! - Popularity and success score calculation
//! - Common error types

pub mod config;
pub mod db;
pub mod error;
pub mod scoring;

pub use error::{Error, Result};
