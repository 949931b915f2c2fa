//! DOM Module - Arena-based feed tree
//!
//! Builds the output tree from parse events:
//! - Arena allocation for nodes, addressed by `NodeId` (u32)
//! - Context stack of inherited namespace/element/base/lang frames
//! - Tree builder tracking the active node by index
//! - Literal-markup reconstruction for embedded XHTML

pub mod builder;
pub mod context;
pub mod document;
pub mod literal;
pub mod node;

pub use builder::TreeBuilder;
pub use context::{ContextFrame, ContextStack};
pub use document::{FeedDocument, NodeRef};
pub use node::{Attribute, AttributeMap, ChildMap, FeedNode, NodeId};
