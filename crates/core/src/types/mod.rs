//! Core types for SAMS.
//!
//! This module provides type-safe wrappers for the inventory domain and the
//! tool vocabulary shared by the classifier and the dispatcher.

pub mod category;
pub mod price;
pub mod status;
pub mod tool;

pub use category::AssetCategory;
pub use price::Rupiah;
pub use status::AssetStatus;
pub use tool::{ParamValue, ToolInvocation, ToolName, ToolParams};
