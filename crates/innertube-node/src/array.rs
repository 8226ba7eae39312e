use crate::node::FieldValue;
use crate::store::{NodeId, NodeStore};

/// An ordered sequence of parsed nodes, mirroring the source array order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeArray(Vec<NodeId>);

impl NodeArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: NodeId) {
        self.0.push(id);
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.0.get(index).copied()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.0.first().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<NodeId> {
        self.0.clone()
    }

    pub fn from_vec(vec: Vec<NodeId>) -> Self {
        Self(vec)
    }

    /// Sub-sequence of nodes whose tag is in `tags`, in source order.
    pub fn filter_type(&self, store: &NodeStore, tags: &[&str]) -> NodeArray {
        NodeArray(
            self.0
                .iter()
                .copied()
                .filter(|id| store.node(*id).is(tags))
                .collect(),
        )
    }

    /// First node whose tag is in `tags`.
    pub fn first_of_type(&self, store: &NodeStore, tags: &[&str]) -> Option<NodeId> {
        self.0.iter().copied().find(|id| store.node(*id).is(tags))
    }

    /// Membership check by a node's `target_id` field.
    pub fn contains_target_id(&self, store: &NodeStore, target_id: &str) -> bool {
        self.0.iter().any(|id| {
            matches!(
                store.node(*id).get("target_id"),
                Some(FieldValue::Str(s)) if s == target_id
            )
        })
    }
}

impl FromIterator<NodeId> for NodeArray {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a NodeArray {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}
