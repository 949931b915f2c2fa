//! Parsing Strategy Module
//!
//! - Event loop: one document, single-threaded, with the memory guard
//! - Parallel: independent documents across the rayon pool

pub mod event_loop;
pub mod parallel;

pub use event_loop::{run, ParseContext};
pub use parallel::parse_batch;
