//! SAMS asset-query assistant library.
//!
//! Answers natural-language questions about the organisation's fixed assets
//! with a three-stage pipeline:
//!
//! 1. [`intent`] classifies the question into exactly one inventory tool call
//! 2. [`inventory`] makes that call against the inventory-data service
//! 3. [`services::composer`] turns the result into prose, through Gemini when
//!    a key is configured and a deterministic template otherwise
//!
//! The binary serves the pipeline over HTTP; the library is also used by the
//! `sams` CLI and the integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod gemini;
pub mod intent;
pub mod inventory;
pub mod routes;
pub mod services;
pub mod state;
