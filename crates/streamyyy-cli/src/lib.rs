//! # streamyyy-cli
//!
//! Library half of the `streamyyy-grid` command: the on-disk configuration
//! (`config`) and the text/JSON rendering of a computed layout (`report`).
//! The binary in `main.rs` only parses arguments and wires these together.

pub mod config;
pub mod report;
