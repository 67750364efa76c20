//! Customer Management Core - Shared types library.
//!
//! This crate provides common types used across the customer management components:
//! - `server` - HTTP API for customer records
//! - `cli` - Command-line tools for migrations and inspection
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and passwords

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
