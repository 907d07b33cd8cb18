//! Shortener - a console URL shortener with per-link lifetimes and click budgets
//!
//! This library provides the core short-link lifecycle engine: collision-free
//! code generation, dual-indexed in-memory storage (by code and by owner),
//! lazy expiry detection, and ownership-gated mutation.
//!
//! # Architecture
//! - `storage`: link records and the two indices (code map + owner index)
//! - `services`: lifecycle policy and the link service orchestrating it all
//! - `config`: configuration management
//! - `errors`: error taxonomy shared across the crate
//! - `utils`: random code generation and URL helpers

pub mod config;
pub mod errors;
pub mod services;
pub mod storage;
pub mod utils;
