//! mediafind CLI library
//!
//! Configuration, error reporting, and output formatting shared by the
//! `mediafind` binary and its tests.

pub mod config;
pub mod error;
pub mod output;
pub mod terminal;
