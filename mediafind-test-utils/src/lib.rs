//! Test utilities for mediafind
//!
//! This crate provides signature fixtures and a temporary directory tree
//! builder for testing discovery and classification.

pub mod fixtures;
pub mod tree;

// Re-export commonly used types
pub use tree::TestTree;
