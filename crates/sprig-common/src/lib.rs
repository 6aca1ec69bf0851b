//! Common utilities for the sprig markup parser.
//!
//! This crate provides shared infrastructure used by the parser crates:
//! - **Warning System** - deduplicated, colored diagnostics on stderr

pub mod warning;
