//! Core media classes.

use innertube_node::{FieldValue, Node};
use serde_json::Value;

use crate::classes::{bool_field, int_field, raw_field, str_field, text_field, thumbnails_field};
use crate::context::ParseContext;
use crate::registry::ClassError;

pub(crate) fn video(ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let video_id = body
        .get("videoId")
        .and_then(Value::as_str)
        .ok_or(ClassError::MissingKey("videoId"))?;

    let mut node = Node::new("Video");
    node.set("video_id", FieldValue::Str(video_id.to_string()));
    node.set_opt("title", text_field(body, "title"));
    node.set_opt("description_snippet", text_field(body, "descriptionSnippet"));
    node.set_opt("length_text", text_field(body, "lengthText"));
    node.set_opt("view_count_text", text_field(body, "viewCountText"));
    node.set_opt("published_time_text", text_field(body, "publishedTimeText"));
    node.set_opt("author", text_field(body, "ownerText"));
    node.set_opt("thumbnails", thumbnails_field(body, "thumbnail"));
    if let Some(endpoint) = body.get("navigationEndpoint") {
        node.set_opt(
            "endpoint",
            ctx.construct_class("NavigationEndpoint", endpoint)
                .map(FieldValue::Node),
        );
    }
    Ok(node)
}

pub(crate) fn video_details(_ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let video_id = body
        .get("videoId")
        .and_then(Value::as_str)
        .ok_or(ClassError::MissingKey("videoId"))?;

    let mut node = Node::new("VideoDetails");
    node.set("video_id", FieldValue::Str(video_id.to_string()));
    node.set_opt("title", str_field(body, "title"));
    node.set_opt("author", str_field(body, "author"));
    node.set_opt("channel_id", str_field(body, "channelId"));
    node.set_opt("short_description", str_field(body, "shortDescription"));
    // lengthSeconds and viewCount arrive as numeric strings.
    node.set_opt("length_seconds", int_field(body, "lengthSeconds"));
    node.set_opt("view_count", int_field(body, "viewCount"));
    node.set_opt("is_live_content", bool_field(body, "isLiveContent"));
    node.set_opt("is_owner_viewing", bool_field(body, "isOwnerViewing"));
    node.set_opt("is_private", bool_field(body, "isPrivate"));
    node.set_opt("allow_ratings", bool_field(body, "allowRatings"));
    node.set_opt("keywords", keywords(body));
    node.set_opt("thumbnails", thumbnails_field(body, "thumbnail"));
    Ok(node)
}

fn keywords(body: &Value) -> Option<FieldValue> {
    let list = body.get("keywords")?.as_array()?;
    Some(FieldValue::List(
        list.iter()
            .filter_map(Value::as_str)
            .map(|s| FieldValue::Str(s.to_string()))
            .collect(),
    ))
}

pub(crate) fn navigation_endpoint(
    _ctx: &mut ParseContext,
    body: &Value,
) -> Result<Node, ClassError> {
    let mut node = Node::new("NavigationEndpoint");
    if let Some(watch) = body.get("watchEndpoint") {
        node.set_opt("video_id", str_field(watch, "videoId"));
        node.set_opt("playlist_id", str_field(watch, "playlistId"));
        node.set_opt("params", str_field(watch, "params"));
        node.set_opt("index", int_field(watch, "index"));
    }
    if let Some(browse) = body.get("browseEndpoint") {
        node.set_opt("browse_id", str_field(browse, "browseId"));
        node.set_opt("params", str_field(browse, "params"));
        node.set_opt("canonical_base_url", str_field(browse, "canonicalBaseUrl"));
    }
    node.set_opt("metadata", raw_field(body, "commandMetadata"));
    Ok(node)
}

pub(crate) fn player_overlay(_ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let mut node = Node::new("PlayerOverlay");
    node.set_opt("end_screen", raw_field(body, "endScreen"));
    node.set_opt("autoplay", raw_field(body, "autoplay"));
    node.set_opt("share_button", raw_field(body, "shareButton"));
    node.set_opt("add_to_menu", raw_field(body, "addToMenu"));
    node.set_opt("autonav_toggle", raw_field(body, "autonavToggle"));
    Ok(node)
}
