//! OSC 8 hyperlink interning.
//!
//! Cells never own URLs. The screen interns each `Hyperlink` once and hands
//! out a small `HyperlinkId` that cells carry in their extra block; the
//! store outlives every referencing cell because both live in the screen.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

/// Opaque handle into a screen's hyperlink table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HyperlinkId(u32);

/// An OSC 8 hyperlink: optional grouping id plus target URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hyperlink {
    /// Optional link id; links sharing an id highlight together.
    pub id: Option<String>,
    /// The URI target.
    pub uri: String,
}

impl fmt::Display for Hyperlink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// Interning table mapping hyperlinks to stable ids.
#[derive(Debug, Default)]
pub struct HyperlinkStore {
    links: Vec<Hyperlink>,
    ids: HashMap<Hyperlink, HyperlinkId>,
}

impl HyperlinkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a hyperlink, returning its id. The same link (id + uri)
    /// always yields the same `HyperlinkId`.
    pub fn intern(&mut self, link: Hyperlink) -> HyperlinkId {
        if let Some(&id) = self.ids.get(&link) {
            return id;
        }
        let id = HyperlinkId(self.links.len() as u32 + 1);
        trace!(uri = %link.uri, id = id.0, "interned hyperlink");
        self.links.push(link.clone());
        self.ids.insert(link, id);
        id
    }

    /// Resolve an id back to its hyperlink.
    pub fn get(&self, id: HyperlinkId) -> Option<&Hyperlink> {
        self.links.get((id.0 as usize).checked_sub(1)?)
    }

    /// Number of distinct interned hyperlinks.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the store holds no hyperlinks.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
