//! Classes whose state is completed by entity-batch mutations after the
//! structural parse.

use innertube_node::{FieldValue, Node};
use serde_json::Value;

use crate::classes::{raw_field, str_field, text_field};
use crate::context::ParseContext;
use crate::registry::ClassError;

/// Menu item whose `selected` flag lives in a `musicFormBooleanChoice`
/// mutation payload rather than in the renderer body.
pub(crate) fn music_multi_select_menu_item(
    _ctx: &mut ParseContext,
    body: &Value,
) -> Result<Node, ClassError> {
    let key = body
        .get("formItemEntityKey")
        .and_then(Value::as_str)
        .ok_or(ClassError::MissingKey("formItemEntityKey"))?;

    let mut node = Node::new("MusicMultiSelectMenuItem");
    node.set("form_item_entity_key", FieldValue::Str(key.to_string()));
    node.set_opt("title", text_field(body, "title"));
    node.set_opt("selected_icon", raw_field(body, "selectedIcon"));
    // `selected` is filled in by the mutation pass.
    Ok(node)
}

/// Heat-map entity. Unlike the other classes this one is constructed from a
/// mutation payload, never from a wrapper inside `contents`.
pub(crate) fn macro_markers_list_entity(
    _ctx: &mut ParseContext,
    body: &Value,
) -> Result<Node, ClassError> {
    let mut node = Node::new("MacroMarkersListEntity");
    node.set_opt("key", str_field(body, "key"));
    node.set_opt("video_id", str_field(body, "externalVideoId"));
    if let Some(markers_list) = body.get("markersList") {
        node.set_opt("marker_type", str_field(markers_list, "markerType"));
        if let Some(markers) = markers_list.get("markers").and_then(Value::as_array) {
            node.set(
                "markers",
                FieldValue::List(markers.iter().map(|m| FieldValue::Raw(m.clone())).collect()),
            );
        }
    }
    Ok(node)
}

/// Comment view. The renderer body only carries entity keys; the actual
/// comment data arrives through four correlated mutation payloads.
pub(crate) fn comment_view(_ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let mut node = Node::new("CommentView");
    node.set_opt("comment_id", str_field(body, "commentId"));
    node.set_opt("comment_key", str_field(body, "commentKey"));
    node.set_opt("comment_surface_key", str_field(body, "commentSurfaceKey"));
    node.set_opt("toolbar_state_key", str_field(body, "toolbarStateKey"));
    node.set_opt("toolbar_surface_key", str_field(body, "toolbarSurfaceKey"));
    Ok(node)
}

/// Patch a comment view from its four correlated payloads. Any payload may
/// be absent; present ones overwrite the matching fields in place.
pub(crate) fn comment_view_apply_mutations(
    node: &mut Node,
    comment: Option<&Value>,
    toolbar_state: Option<&Value>,
    toolbar_surface: Option<&Value>,
    comment_surface: Option<&Value>,
) {
    if let Some(payload) = comment {
        let properties = payload.get("properties");
        node.set_opt(
            "content",
            properties
                .and_then(|p| p.get("content"))
                .and_then(|c| c.get("content"))
                .and_then(Value::as_str)
                .map(|s| FieldValue::Str(s.to_string())),
        );
        node.set_opt(
            "published_time",
            properties
                .and_then(|p| p.get("publishedTime"))
                .and_then(Value::as_str)
                .map(|s| FieldValue::Str(s.to_string())),
        );
        if let Some(author) = payload.get("author") {
            node.set_opt("author_name", str_field(author, "displayName"));
            node.set_opt("author_id", str_field(author, "channelId"));
            node.set_opt(
                "author_is_creator",
                author
                    .get("isCreator")
                    .and_then(Value::as_bool)
                    .map(FieldValue::Bool),
            );
        }
        if let Some(toolbar) = payload.get("toolbar") {
            node.set_opt("like_count", str_field(toolbar, "likeCountNotliked"));
            node.set_opt("reply_count", str_field(toolbar, "replyCount"));
        }
    }
    if let Some(payload) = toolbar_state {
        node.set_opt("like_state", str_field(payload, "likeState"));
        node.set_opt("heart_state", str_field(payload, "heartState"));
    }
    if let Some(payload) = toolbar_surface {
        node.set("toolbar_surface", FieldValue::Raw(payload.clone()));
    }
    if let Some(payload) = comment_surface {
        node.set("comment_surface", FieldValue::Raw(payload.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_multi_select_requires_entity_key() {
        let mut ctx = ParseContext::new();
        let err = music_multi_select_menu_item(&mut ctx, &json!({"title": "T"})).unwrap_err();
        assert_eq!(err, ClassError::MissingKey("formItemEntityKey"));
    }

    #[test]
    fn test_comment_view_apply_mutations() {
        let mut ctx = ParseContext::new();
        let mut node = comment_view(&mut ctx, &json!({"commentKey": "ck"})).unwrap();
        comment_view_apply_mutations(
            &mut node,
            Some(&json!({
                "properties": {"content": {"content": "nice video"}, "publishedTime": "2 days ago"},
                "author": {"displayName": "someone", "channelId": "UC123"},
                "toolbar": {"likeCountNotliked": "12", "replyCount": "3"},
            })),
            Some(&json!({"likeState": "TOOLBAR_LIKE_STATE_INDIFFERENT"})),
            None,
            None,
        );
        assert_eq!(node.key("content").unwrap().as_str(), Some("nice video"));
        assert_eq!(node.key("author_name").unwrap().as_str(), Some("someone"));
        assert_eq!(
            node.key("like_state").unwrap().as_str(),
            Some("TOOLBAR_LIKE_STATE_INDIFFERENT")
        );
        assert!(!node.has_key("toolbar_surface"));
    }
}
