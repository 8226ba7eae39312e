use indexmap::IndexMap;

use crate::array::NodeArray;
use crate::store::NodeId;

/// Per-section scratch index of parsed nodes, grouped by class name.
///
/// Entries are recorded in the order constructors finish (depth-first
/// post-order). The memo lives for one section parse; ids refer to the
/// store of the response that produced it.
#[derive(Debug, Clone, Default)]
pub struct Memo {
    /// Insertion log, preserving the global order across class names.
    entries: Vec<(String, NodeId)>,
    by_tag: IndexMap<String, Vec<NodeId>>,
}

impl Memo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tag: impl Into<String>, id: NodeId) {
        let tag = tag.into();
        self.by_tag.entry(tag.clone()).or_default().push(id);
        self.entries.push((tag, id));
    }

    /// Nodes recorded under exactly this class name, in insertion order.
    pub fn get(&self, tag: &str) -> Option<&[NodeId]> {
        self.by_tag.get(tag).map(Vec::as_slice)
    }

    /// Observed array of every node whose tag is in `tags`.
    ///
    /// With multiple tags the result is the union in true insertion order,
    /// not one tag group after another.
    pub fn get_type(&self, tags: &[&str]) -> NodeArray {
        self.entries
            .iter()
            .filter(|(tag, _)| tags.contains(&tag.as_str()))
            .map(|(_, id)| *id)
            .collect()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.by_tag.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_insertion_order() {
        let mut memo = Memo::new();
        memo.add("Video", NodeId(0));
        memo.add("Shelf", NodeId(1));
        memo.add("Video", NodeId(2));

        assert_eq!(memo.get("Video"), Some(&[NodeId(0), NodeId(2)][..]));
        assert_eq!(memo.get("Shelf"), Some(&[NodeId(1)][..]));
        assert_eq!(memo.get("Alert"), None);
    }

    #[test]
    fn test_get_type_union_preserves_global_order() {
        let mut memo = Memo::new();
        memo.add("Video", NodeId(0));
        memo.add("Shelf", NodeId(1));
        memo.add("Video", NodeId(2));
        memo.add("Alert", NodeId(3));

        let union = memo.get_type(&["Alert", "Video"]);
        assert_eq!(union.to_vec(), vec![NodeId(0), NodeId(2), NodeId(3)]);
    }

    #[test]
    fn test_empty_tag_set_matches_nothing() {
        let mut memo = Memo::new();
        memo.add("Video", NodeId(0));
        assert!(memo.get_type(&[]).is_empty());
    }
}
