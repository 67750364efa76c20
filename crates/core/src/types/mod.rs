//! Core types for the customer management service.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod password;

pub use id::*;
pub use password::{Password, PasswordError};
