//! Data models for the plugin
//!
//! Each sub-module represents a feature area: token metadata shapes and the
//! collection/mint records exchanged with the wallet capability.

mod collection;
mod metadata;

// Re-export all models for convenient imports
pub use collection::*;
pub use metadata::*;
