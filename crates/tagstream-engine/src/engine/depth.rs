//! Per-tag nesting depth.
//!
//! Depth here is not tree depth: it is the number of currently open
//! elements that share a tag name. Two sibling `<ol>` elements both sit at
//! `ol` depth 1 while open, which is why jobs are scoped by a minimum depth
//! rather than by element identity.

use std::collections::HashMap;

/// Mapping from tag name to its current open count.
#[derive(Clone, Debug, Default)]
pub struct DepthTracker {
    depths: HashMap<String, u32>,
}

impl DepthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current open count for `tag`. Zero if never seen.
    #[inline]
    pub fn depth_of(&self, tag: &str) -> u32 {
        self.depths.get(tag).copied().unwrap_or(0)
    }

    /// Record an element start, returning the new depth.
    pub fn on_open(&mut self, tag: &str) -> u32 {
        let depth = self.depths.entry(tag.to_owned()).or_insert(0);
        *depth += 1;
        *depth
    }

    /// Record an element end, returning the new depth.
    ///
    /// A close with no matching open leaves the count at zero and returns
    /// `None`. The input is malformed at that point; callers report it but
    /// do not treat it as an error.
    pub fn on_close(&mut self, tag: &str) -> Option<u32> {
        let depth = self.depths.entry(tag.to_owned()).or_insert(0);
        *depth = depth.checked_sub(1)?;
        Some(*depth)
    }

    /// True when every tag seen so far has been closed.
    pub fn is_balanced(&self) -> bool {
        self.depths.values().all(|&d| d == 0)
    }

    /// Tags with a non-zero open count, in no particular order.
    pub fn open_tags(&self) -> impl Iterator<Item = (&str, u32)> {
        self.depths
            .iter()
            .filter(|&(_, &d)| d > 0)
            .map(|(tag, &d)| (tag.as_str(), d))
    }
}
