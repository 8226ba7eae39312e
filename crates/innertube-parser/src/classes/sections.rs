//! Section and shelf classes, plus the type-filter targets of the
//! response parser's fixed sections.

use innertube_node::{FieldValue, Node};
use serde_json::Value;

use crate::classes::{int_field, raw_field, str_field, text_field, thumbnails_field};
use crate::context::ParseContext;
use crate::registry::ClassError;

pub(crate) fn section_list(ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let mut node = Node::new("SectionList");
    let contents = ctx.parse_array(body.get("contents"), None)?;
    node.set("contents", FieldValue::Nodes(contents));
    node.set_opt("target_id", str_field(body, "targetId"));
    node.set_opt("continuations", raw_field(body, "continuations"));
    Ok(node)
}

pub(crate) fn item_section(ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let mut node = Node::new("ItemSection");
    let contents = ctx.parse_array(body.get("contents"), None)?;
    node.set("contents", FieldValue::Nodes(contents));
    node.set_opt(
        "header",
        ctx.parse_item(body.get("header"), None).map(FieldValue::Node),
    );
    node.set_opt("target_id", str_field(body, "targetId"));
    node.set_opt("section_identifier", str_field(body, "sectionIdentifier"));
    Ok(node)
}

pub(crate) fn music_mix_shelf(ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let mut node = Node::new("MusicMixShelf");
    node.set_opt("title", text_field(body, "title"));
    node.set_opt("thumbnails", thumbnails_field(body, "thumbnail"));
    if let Some(contents) = body.get("contents") {
        let contents = ctx.parse_array(Some(contents), None)?;
        node.set("contents", FieldValue::Nodes(contents));
    }
    Ok(node)
}

pub(crate) fn alert(_ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let mut node = Node::new("Alert");
    node.set_opt("alert_type", str_field(body, "type"));
    node.set_opt("text", text_field(body, "text"));
    Ok(node)
}

pub(crate) fn alert_with_button(_ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let mut node = Node::new("AlertWithButton");
    node.set_opt("alert_type", str_field(body, "type"));
    node.set_opt("text", text_field(body, "text"));
    node.set_opt("dismiss_button", raw_field(body, "dismissButton"));
    Ok(node)
}

pub(crate) fn player_annotations_expanded(
    _ctx: &mut ParseContext,
    body: &Value,
) -> Result<Node, ClassError> {
    let mut node = Node::new("PlayerAnnotationsExpanded");
    node.set_opt("featured_channel", raw_field(body, "featuredChannel"));
    node.set_opt("allow_swipe_dismiss", raw_field(body, "allowSwipeDismiss"));
    Ok(node)
}

pub(crate) fn engagement_panel_section_list(
    ctx: &mut ParseContext,
    body: &Value,
) -> Result<Node, ClassError> {
    let mut node = Node::new("EngagementPanelSectionList");
    node.set_opt("panel_identifier", str_field(body, "panelIdentifier"));
    node.set_opt("target_id", str_field(body, "targetId"));
    node.set_opt("visibility", str_field(body, "visibility"));
    node.set_opt(
        "header",
        ctx.parse_item(body.get("header"), None).map(FieldValue::Node),
    );
    node.set_opt(
        "content",
        ctx.parse_item(body.get("content"), None).map(FieldValue::Node),
    );
    Ok(node)
}

pub(crate) fn player_captions_tracklist(
    _ctx: &mut ParseContext,
    body: &Value,
) -> Result<Node, ClassError> {
    let mut node = Node::new("PlayerCaptionsTracklist");
    node.set_opt("caption_tracks", raw_field(body, "captionTracks"));
    node.set_opt("audio_tracks", raw_field(body, "audioTracks"));
    node.set_opt("translation_languages", raw_field(body, "translationLanguages"));
    node.set_opt("default_audio_track_index", int_field(body, "defaultAudioTrackIndex"));
    Ok(node)
}

pub(crate) fn endscreen(ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let mut node = Node::new("Endscreen");
    let elements = ctx.parse_array(body.get("elements"), None)?;
    node.set("elements", FieldValue::Nodes(elements));
    node.set_opt("start_ms", int_field(body, "startMs"));
    Ok(node)
}

pub(crate) fn player_storyboard_spec(
    _ctx: &mut ParseContext,
    body: &Value,
) -> Result<Node, ClassError> {
    let spec = body
        .get("spec")
        .and_then(Value::as_str)
        .ok_or(ClassError::MissingKey("spec"))?;
    let mut node = Node::new("PlayerStoryboardSpec");
    node.set("spec", FieldValue::Str(spec.to_string()));
    node.set_opt("recommended_level", int_field(body, "recommendedLevel"));
    Ok(node)
}

pub(crate) fn player_live_storyboard_spec(
    _ctx: &mut ParseContext,
    body: &Value,
) -> Result<Node, ClassError> {
    let spec = body
        .get("spec")
        .and_then(Value::as_str)
        .ok_or(ClassError::MissingKey("spec"))?;
    let mut node = Node::new("PlayerLiveStoryboardSpec");
    node.set("spec", FieldValue::Str(spec.to_string()));
    Ok(node)
}

pub(crate) fn card_collection(ctx: &mut ParseContext, body: &Value) -> Result<Node, ClassError> {
    let mut node = Node::new("CardCollection");
    let cards = ctx.parse_array(body.get("cards"), None)?;
    node.set("cards", FieldValue::Nodes(cards));
    node.set_opt("header", raw_field(body, "headerText"));
    node.set_opt("allow_teaser_dismiss", raw_field(body, "allowTeaserDismiss"));
    Ok(node)
}
