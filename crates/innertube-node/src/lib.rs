//! Data model for parsed InnerTube responses.
//!
//! A parsed response is a tree of typed nodes held in a [`NodeStore`] arena
//! and addressed by [`NodeId`] handles. Nodes never hold back-edges to their
//! parents; ownership stays with the store.

/// Typed node and its field values.
pub mod node;

/// Node arena and id handles.
pub mod store;

/// Ordered node sequence with tag-based filtering helpers.
pub mod array;

/// Per-section multimap of class name to parsed nodes.
pub mod memo;

/// Single-or-many parse result.
pub mod poly;

/// Upstream text shapes (`simpleText`, `runs`, bare strings).
pub mod text;

/// Thumbnail lists.
pub mod thumbnail;

pub use ahash::AHashMap as Map;

pub use array::NodeArray;
pub use memo::Memo;
pub use node::{CastError, FieldValue, KeyError, Node};
pub use poly::PolyResult;
pub use store::{NodeId, NodeStore};
pub use text::{Text, TextRun};
pub use thumbnail::{Thumbnail, Thumbnails};
