//! Response-received action and command classes.

use innertube_node::{FieldValue, Node};
use serde_json::Value;

use crate::classes::{raw_field, str_field};
use crate::context::ParseContext;
use crate::registry::ClassError;

pub(crate) fn append_continuation_items(
    ctx: &mut ParseContext,
    body: &Value,
) -> Result<Node, ClassError> {
    let mut node = Node::new("AppendContinuationItemsAction");
    let contents = ctx.parse_array(body.get("continuationItems"), None)?;
    node.set("contents", FieldValue::Nodes(contents));
    node.set_opt("target_id", str_field(body, "targetId"));
    Ok(node)
}

pub(crate) fn reload_continuation_items(
    ctx: &mut ParseContext,
    body: &Value,
) -> Result<Node, ClassError> {
    let mut node = Node::new("ReloadContinuationItemsCommand");
    let contents = ctx.parse_array(body.get("continuationItems"), None)?;
    node.set("contents", FieldValue::Nodes(contents));
    node.set_opt("target_id", str_field(body, "targetId"));
    node.set_opt("slot", str_field(body, "slot"));
    Ok(node)
}

pub(crate) fn navigate(ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let mut node = Node::new("NavigateAction");
    if let Some(endpoint) = body.get("endpoint") {
        node.set_opt(
            "endpoint",
            ctx.construct_class("NavigationEndpoint", endpoint)
                .map(FieldValue::Node),
        );
    }
    Ok(node)
}

pub(crate) fn show_miniplayer(_ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let mut node = Node::new("ShowMiniplayerCommand");
    node.set_opt("miniplayer_command", raw_field(body, "miniplayerCommand"));
    Ok(node)
}

pub(crate) fn open_popup(ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let mut node = Node::new("OpenPopupAction");
    node.set_opt(
        "popup",
        ctx.parse_item(body.get("popup"), None).map(FieldValue::Node),
    );
    node.set_opt("popup_type", str_field(body, "popupType"));
    Ok(node)
}
