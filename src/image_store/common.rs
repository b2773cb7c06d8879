//! Common utilities module
//!
//! This module contains shared utilities used across the image store.

pub mod error;

pub use error::{Result, StoreError};
