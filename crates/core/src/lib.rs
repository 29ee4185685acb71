//! SAMS Core - Shared types library.
//!
//! This crate provides common types used across all SAMS assistant components:
//! - `assistant` - Natural-language asset query service
//! - `cli` - Command-line tools for operators
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps it
//! lightweight and allows it to be used anywhere, including in tests that must
//! never touch the network.
//!
//! # Modules
//!
//! - [`types`] - Tool invocations, asset categories and statuses, Rupiah amounts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
