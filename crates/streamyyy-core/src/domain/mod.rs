//! Layout rules for the multi-stream grid.
//!
//! Everything in this module is a pure function of its inputs.  Nothing here
//! reads the screen, the clock, or any global state: callers pass the viewport
//! and options in explicitly and get a fresh value back.  That keeps the rules
//! easy to unit-test on any platform and safe to call from any thread.

pub mod device;
pub mod error;
pub mod grid;
pub mod options;
pub mod spacing;
pub mod suggestions;
