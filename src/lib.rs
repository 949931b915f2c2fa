//! RustyFeed - Feed tree building on a namespace-resolving XML reader
//!
//! Turns RSS/Atom/RDF documents into a tree of nodes keyed by
//! (namespace, local name), carrying inherited `xml:base` and `xml:lang`.
//!
//! Layers:
//! - core: encoding, namespace normalization, name splitting, escaping
//! - reader: event types and the quick-xml backed reader
//! - dom: context stack, tree builder, literal markup, node arena
//! - strategy: event loop with memory guard, parallel batches
//!
//! ```
//! let doc = rustyfeed::parse(b"<rss><channel><title>Hi</title></channel></rss>").unwrap();
//! let title = doc
//!     .root()
//!     .child("", "rss")
//!     .and_then(|rss| rss.child("", "channel"))
//!     .and_then(|channel| channel.child("", "title"))
//!     .unwrap();
//! assert_eq!(title.text(), "Hi");
//! ```

pub mod config;
pub mod core;
pub mod dom;
pub mod error;
pub mod memory;
pub mod parser;
pub mod reader;
pub mod resolve;
pub mod strategy;

pub use config::ParserConfig;
pub use dom::{FeedDocument, FeedNode, NodeId, NodeRef};
pub use error::{ErrorRecord, ParseError};
pub use memory::{memory_stats, reset_memory_stats, AllocatorProbe, MemoryProbe};
pub use parser::FeedParser;
pub use reader::{EventSource, FeedReader, IterSource, RawAttribute, XmlEvent};
pub use resolve::{UrlJoin, UrlResolver};
pub use strategy::parse_batch;

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "memory_tracking")]
pub(crate) mod tracking {
    use std::alloc::{GlobalAlloc, Layout};
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub static ALLOCATED: AtomicUsize = AtomicUsize::new(0);
    pub static PEAK_ALLOCATED: AtomicUsize = AtomicUsize::new(0);

    /// Counts live and peak heap bytes for the memory guard
    pub struct TrackingAllocator;

    #[cfg(feature = "mimalloc")]
    static UNDERLYING: mimalloc::MiMalloc = mimalloc::MiMalloc;

    #[cfg(not(feature = "mimalloc"))]
    static UNDERLYING: std::alloc::System = std::alloc::System;

    unsafe impl GlobalAlloc for TrackingAllocator {
        unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
            let ptr = UNDERLYING.alloc(layout);
            if !ptr.is_null() {
                record_growth(layout.size());
            }
            ptr
        }

        unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
            ALLOCATED.fetch_sub(layout.size(), Ordering::Relaxed);
            UNDERLYING.dealloc(ptr, layout)
        }

        unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
            let new_ptr = UNDERLYING.realloc(ptr, layout, new_size);
            if !new_ptr.is_null() {
                if new_size >= layout.size() {
                    record_growth(new_size - layout.size());
                } else {
                    ALLOCATED.fetch_sub(layout.size() - new_size, Ordering::Relaxed);
                }
            }
            new_ptr
        }
    }

    fn record_growth(bytes: usize) {
        let current = ALLOCATED.fetch_add(bytes, Ordering::Relaxed) + bytes;
        let mut peak = PEAK_ALLOCATED.load(Ordering::Relaxed);
        while current > peak {
            match PEAK_ALLOCATED.compare_exchange_weak(
                peak,
                current,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(p) => peak = p,
            }
        }
    }
}

#[cfg(feature = "memory_tracking")]
#[global_allocator]
static GLOBAL: tracking::TrackingAllocator = tracking::TrackingAllocator;

#[cfg(all(feature = "mimalloc", not(feature = "memory_tracking")))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// Convenience
// ============================================================================

/// Parse a document with the default configuration
pub fn parse(input: &[u8]) -> Result<FeedDocument, ParseError> {
    FeedParser::default().parse(input)
}
