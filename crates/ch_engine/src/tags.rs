//! Resolution of the opaque tag references carried by arcs.
use rustc_hash::FxHashMap;

use crate::constants::{TagsRef, NO_TAGS};

pub trait TagResolver {
    /// Key/value pairs behind `tags`. [`NO_TAGS`] resolves to nothing.
    fn resolve_tags(&self, tags: TagsRef) -> Vec<(String, String)>;
}

/// In memory tag table handing out consecutive references starting at 1.
#[derive(Debug, Clone, Default)]
pub struct TagTable {
    tags: FxHashMap<TagsRef, Vec<(String, String)>>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tags: Vec<(String, String)>) -> TagsRef {
        let tags_ref = self.tags.len() as TagsRef + 1;
        self.tags.insert(tags_ref, tags);
        tags_ref
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl TagResolver for TagTable {
    fn resolve_tags(&self, tags: TagsRef) -> Vec<(String, String)> {
        if tags == NO_TAGS {
            return Vec::new();
        }
        self.tags.get(&tags).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_resolve() {
        let mut table = TagTable::new();
        let residential = table.insert(vec![("highway".into(), "residential".into())]);
        let primary = table.insert(vec![
            ("highway".into(), "primary".into()),
            ("maxspeed".into(), "50".into()),
        ]);

        assert_eq!(residential, 1);
        assert_eq!(primary, 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve_tags(primary).len(), 2);
        assert!(table.resolve_tags(NO_TAGS).is_empty());
        assert!(table.resolve_tags(42).is_empty());
    }
}
