//! Core feed parsing primitives
//!
//! This module contains the building blocks shared by the reader and the
//! tree builder:
//! - Chars: XML character classes
//! - Encoding: BOM detection and UTF-16/UTF-32 conversion to UTF-8
//! - Namespace: well-known feed namespaces and alias normalization
//! - QName: combined-token splitting with a per-parse LRU cache
//! - Escape: markup escaping for literal reconstruction

pub mod chars;
pub mod encoding;
pub mod escape;
pub mod namespace;
pub mod qname;
