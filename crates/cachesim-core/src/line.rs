//! Cache line representation shared by L1 and L2.
//!
//! `tag: None` is the `EMPTY` sentinel of spec.md §3 — it distinguishes an
//! unpopulated slot from any valid tag, including tag `0`. Every line is
//! an independent value; none alias each other (spec.md §9 REDESIGN FLAG
//! against the source's `[[None, False]] * n` pointer-list bug).

/// One cache line: an optional tag plus a dirty bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheLine {
    tag: Option<u64>,
    dirty: bool,
}

impl CacheLine {
    pub const EMPTY: CacheLine = CacheLine {
        tag: None,
        dirty: false,
    };

    pub fn tag(&self) -> Option<u64> {
        self.tag
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_empty(&self) -> bool {
        self.tag.is_none()
    }

    pub fn matches(&self, tag: u64) -> bool {
        self.tag == Some(tag)
    }

    /// Install `tag` into this line, overwriting whatever was here.
    /// Eviction handling must run before this is called.
    pub fn install(&mut self, tag: u64, dirty: bool) {
        self.tag = Some(tag);
        self.dirty = dirty;
    }

    pub fn set_dirty(&mut self) {
        debug_assert!(self.tag.is_some(), "dirty ⇒ tag ≠ EMPTY");
        self.dirty = true;
    }
}
