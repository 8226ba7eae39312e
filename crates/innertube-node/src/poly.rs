use crate::array::NodeArray;
use crate::store::{NodeId, NodeStore};

/// Result of a poly parse: a single node or an observed array, depending on
/// the shape of the input. Callers branch on the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolyResult {
    Item(NodeId),
    Array(NodeArray),
}

impl PolyResult {
    pub fn as_item(&self) -> Option<NodeId> {
        match self {
            PolyResult::Item(id) => Some(*id),
            PolyResult::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&NodeArray> {
        match self {
            PolyResult::Array(array) => Some(array),
            PolyResult::Item(_) => None,
        }
    }

    /// The single node, or the first element of the array view.
    pub fn first(&self) -> Option<NodeId> {
        match self {
            PolyResult::Item(id) => Some(*id),
            PolyResult::Array(array) => array.first(),
        }
    }

    /// Uniform array view: a single node becomes a one-element array.
    pub fn to_array(&self) -> NodeArray {
        match self {
            PolyResult::Item(id) => NodeArray::from_vec(vec![*id]),
            PolyResult::Array(array) => array.clone(),
        }
    }

    /// First node of the given type in either view.
    pub fn first_of_type(&self, store: &NodeStore, tags: &[&str]) -> Option<NodeId> {
        match self {
            PolyResult::Item(id) if store.node(*id).is(tags) => Some(*id),
            PolyResult::Item(_) => None,
            PolyResult::Array(array) => array.first_of_type(store, tags),
        }
    }
}
