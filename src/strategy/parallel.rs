//! Parallel Batch Parsing
//!
//! Uses Rayon to parse several independent documents at once. Each input
//! gets its own parse context; only the parser's configuration, resolver
//! and memory probe are shared.

use crate::dom::FeedDocument;
use crate::error::ParseError;
use crate::parser::FeedParser;
use rayon::prelude::*;

/// Parse every input in parallel, returning results in input order.
///
/// The default memory probe reads process-wide counters, so concurrent
/// parses see each other's allocations when the guard samples.
pub fn parse_batch(parser: &FeedParser, inputs: &[&[u8]]) -> Vec<Result<FeedDocument, ParseError>> {
    inputs.par_iter().map(|input| parser.parse(input)).collect()
}
