//! Command, endpoint and action dispatch.
//!
//! Command-bearing containers multiplex many sibling keys; only the first
//! key with a dispatchable suffix carries the payload, and unknown sibling
//! keys must not provoke errors.

use innertube_node::{NodeArray, NodeId};
use serde_json::Value;

use crate::context::ParseContext;
use crate::items::IGNORED_CLASSES;
use crate::sanitize::{is_command_key, sanitize_class_name};

impl ParseContext {
    /// Dispatch the first key ending in `Command`, `Endpoint` or `Action`.
    ///
    /// Ignored and unknown classes yield `None` silently; no stub
    /// synthesis on this path. Constructor failures become a `parse`
    /// event.
    pub fn parse_command(&mut self, raw: &Value) -> Option<NodeId> {
        let map = raw.as_object()?;
        for (key, body) in map {
            if !is_command_key(key) {
                continue;
            }
            let classname = sanitize_class_name(key);
            if IGNORED_CLASSES.contains(&classname.as_str()) {
                return None;
            }
            return self.construct_class(&classname, body);
        }
        None
    }

    /// Batch [`parse_command`](Self::parse_command) over a list, dropping
    /// empty results.
    pub fn parse_commands(&mut self, raw: Option<&Value>) -> NodeArray {
        let mut out = NodeArray::new();
        let Some(list) = raw.and_then(Value::as_array) else {
            return out;
        };
        for entry in list {
            if let Some(id) = self.parse_command(entry) {
                out.push(id);
            }
        }
        out
    }
}
