//! Continuation container dispatch.

use innertube_node::{NodeArray, NodeId};
use serde_json::Value;

use crate::context::ParseContext;

/// Closed map of continuation container keys to their node classes.
const CONTINUATION_BRANCHES: &[(&str, &str)] = &[
    ("timedContinuationData", "TimedContinuation"),
    ("itemSectionContinuation", "ItemSectionContinuation"),
    ("sectionListContinuation", "SectionListContinuation"),
    ("liveChatContinuation", "LiveChatContinuation"),
    ("musicPlaylistShelfContinuation", "MusicPlaylistShelfContinuation"),
    ("musicShelfContinuation", "MusicShelfContinuation"),
    ("gridContinuation", "GridContinuation"),
    ("playlistPanelContinuation", "PlaylistPanelContinuation"),
    ("continuationCommand", "ContinuationCommand"),
];

/// Closed map of response-received entry keys to their node classes.
const RESPONSE_RECEIVED_BRANCHES: &[(&str, &str)] = &[
    ("navigateAction", "NavigateAction"),
    ("showMiniplayerCommand", "ShowMiniplayerCommand"),
    ("reloadContinuationItemsCommand", "ReloadContinuationItemsCommand"),
    ("appendContinuationItemsAction", "AppendContinuationItemsAction"),
    ("openPopupAction", "OpenPopupAction"),
];

impl ParseContext {
    /// Map a continuation container to the matching continuation node.
    /// Exactly one branch fires; unknown keys yield `None`.
    pub fn parse_continuation(&mut self, raw: &Value) -> Option<NodeId> {
        let map = raw.as_object()?;
        for (key, classname) in CONTINUATION_BRANCHES {
            if let Some(body) = map.get(*key) {
                return self.construct_class(classname, body);
            }
        }
        None
    }

    /// Parse a list of response-received entries, filtering out entries
    /// that match none of the known keys.
    pub fn parse_response_received(&mut self, raw: Option<&Value>) -> NodeArray {
        let mut out = NodeArray::new();
        let Some(list) = raw.and_then(Value::as_array) else {
            return out;
        };
        for entry in list {
            let Some(map) = entry.as_object() else {
                continue;
            };
            for (key, classname) in RESPONSE_RECEIVED_BRANCHES {
                if let Some(body) = map.get(*key) {
                    if let Some(id) = self.construct_class(classname, body) {
                        out.push(id);
                    }
                    break;
                }
            }
        }
        out
    }
}
