//! XML Reader Module
//!
//! Event sources feeding the tree builder:
//! - Events: flat open/close/text event types and the `EventSource` trait
//! - Feed: namespace-resolving reader over UTF-8 text

pub mod events;
pub mod feed;

pub use events::{EventSource, IterSource, RawAttribute, XmlEvent};
pub use feed::FeedReader;
