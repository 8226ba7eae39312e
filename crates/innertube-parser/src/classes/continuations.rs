//! Continuation node classes, one per continuation container shape.

use innertube_node::{FieldValue, Node};
use serde_json::Value;

use crate::classes::{int_field, raw_field, str_field};
use crate::context::ParseContext;
use crate::registry::ClassError;

/// Continuation token, either inline or inside the legacy
/// `continuations[].nextContinuationData` / `reloadContinuationData` shape.
fn continuation_token(body: &Value) -> Option<FieldValue> {
    if let Some(token) = body.get("continuation").and_then(Value::as_str) {
        return Some(FieldValue::Str(token.to_string()));
    }
    body.get("continuations")?
        .as_array()?
        .iter()
        .find_map(|entry| {
            ["nextContinuationData", "reloadContinuationData"]
                .iter()
                .find_map(|key| entry.get(key))
                .and_then(|data| data.get("continuation"))
                .and_then(Value::as_str)
        })
        .map(|token| FieldValue::Str(token.to_string()))
}

fn with_contents(
    classname: &'static str,
    contents_key: &str,
    ctx: &mut ParseContext,
    body: &Value,
) -> Result<Node, ClassError> {
    let mut node = Node::new(classname);
    let contents = ctx.parse_array(body.get(contents_key), None)?;
    node.set("contents", FieldValue::Nodes(contents));
    node.set_opt("continuation", continuation_token(body));
    Ok(node)
}

pub(crate) fn section_list(ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    with_contents("SectionListContinuation", "contents", ctx, body)
}

pub(crate) fn item_section(ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    with_contents("ItemSectionContinuation", "contents", ctx, body)
}

pub(crate) fn music_shelf(ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    with_contents("MusicShelfContinuation", "contents", ctx, body)
}

pub(crate) fn music_playlist_shelf(
    ctx: &mut ParseContext,
    body: &Value,
) -> Result<Node, ClassError> {
    with_contents("MusicPlaylistShelfContinuation", "contents", ctx, body)
}

pub(crate) fn playlist_panel(ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    with_contents("PlaylistPanelContinuation", "contents", ctx, body)
}

pub(crate) fn grid(ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    with_contents("GridContinuation", "items", ctx, body)
}

pub(crate) fn live_chat(_ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let mut node = Node::new("LiveChatContinuation");
    node.set_opt("actions", raw_field(body, "actions"));
    node.set_opt("continuation", continuation_token(body));
    Ok(node)
}

pub(crate) fn timed(_ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let mut node = Node::new("TimedContinuation");
    node.set_opt("continuation", continuation_token(body));
    node.set_opt("timeout_ms", int_field(body, "timeoutMs"));
    Ok(node)
}

pub(crate) fn continuation_command(
    _ctx: &mut ParseContext,
    body: &Value,
) -> Result<Node, ClassError> {
    let mut node = Node::new("ContinuationCommand");
    node.set_opt("token", str_field(body, "token"));
    node.set_opt("request", str_field(body, "request"));
    Ok(node)
}
