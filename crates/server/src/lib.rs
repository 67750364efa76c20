//! Customer management HTTP service.
//!
//! This crate provides the server as a library so the router can be driven
//! from tests and the CLI can reuse the database layer.
//!
//! Request pipeline: [`routes`] -> [`services`] -> [`db`] -> `PostgreSQL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_support;
