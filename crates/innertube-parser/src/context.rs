use innertube_node::{Memo, NodeId, NodeStore};
use serde_json::Value;

use crate::registry;
use crate::report::{self, ParserEvent};

/// State threaded through one in-flight parse: the node arena and the
/// active per-section memo.
///
/// Exactly one memo is active at a time. The response parser scopes a fresh
/// memo around every section; nested item parses observe the enclosing
/// section's memo. Nested response parses get a whole fresh context, so an
/// inner document can never corrupt the outer memo.
#[derive(Debug, Default)]
pub struct ParseContext {
    store: NodeStore,
    memo: Option<Memo>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoError {
    #[error("no active memo; begin a section before reading it")]
    NotActive,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("expected an array of wrappers, got a single wrapper")]
    ExpectedArray,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut NodeStore {
        &mut self.store
    }

    pub fn into_store(self) -> NodeStore {
        self.store
    }

    /// Open a fresh section memo, discarding any previous one.
    pub fn begin_memo(&mut self) {
        self.memo = Some(Memo::new());
    }

    /// Close the section and hand its memo to the caller.
    pub fn take_memo(&mut self) -> Result<Memo, MemoError> {
        self.memo.take().ok_or(MemoError::NotActive)
    }

    /// Read the active memo without closing the section.
    pub fn memo(&self) -> Result<&Memo, MemoError> {
        self.memo.as_ref().ok_or(MemoError::NotActive)
    }

    pub(crate) fn memo_add(&mut self, tag: String, id: NodeId) {
        self.memo
            .as_mut()
            .expect("no active memo; call begin_memo before parsing items")
            .add(tag, id);
    }

    /// Construct a node of a known class directly, bypassing wrapper-key
    /// dispatch. Unknown classes are skipped silently (no stub synthesis);
    /// constructor failures become a `parse` event. The produced node is
    /// not recorded in the memo; only the item parser records.
    pub(crate) fn construct_class(&mut self, classname: &str, body: &Value) -> Option<NodeId> {
        let constructor = registry::get(classname)?;
        match constructor(self, body) {
            Ok(node) => Some(self.store.insert(node)),
            Err(err) => {
                report::report(ParserEvent::Parse {
                    classname: classname.to_string(),
                    error: err.to_string(),
                    raw: body.clone(),
                });
                None
            }
        }
    }
}
