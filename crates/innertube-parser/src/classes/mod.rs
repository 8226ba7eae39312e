//! Statically known node classes.
//!
//! Each class is a constructor projecting typed fields from its raw body,
//! recursing through the context for nested wrappers. The full upstream
//! catalogue runs to hundreds of classes; this set covers the classes the
//! parser's own machinery depends on plus the common content shapes.

mod actions;
mod continuations;
mod entities;
mod media;
mod sections;

use std::sync::Arc;

use innertube_node::{FieldValue, Node, Text, Thumbnails};
use serde_json::Value;

use crate::context::ParseContext;
use crate::registry::{ClassError, Constructor};

pub(crate) use entities::comment_view_apply_mutations;

/// The static registration table the registry seeds from.
pub(crate) fn builtin() -> Vec<(&'static str, Constructor)> {
    fn entry(
        name: &'static str,
        f: fn(&mut ParseContext, &Value) -> Result<Node, ClassError>,
    ) -> (&'static str, Constructor) {
        (name, Arc::new(f))
    }

    vec![
        // Content
        entry("Video", media::video),
        entry("VideoDetails", media::video_details),
        entry("NavigationEndpoint", media::navigation_endpoint),
        entry("PlayerOverlay", media::player_overlay),
        entry("SectionList", sections::section_list),
        entry("ItemSection", sections::item_section),
        entry("MusicMixShelf", sections::music_mix_shelf),
        entry("Alert", sections::alert),
        entry("AlertWithButton", sections::alert_with_button),
        entry("PlayerAnnotationsExpanded", sections::player_annotations_expanded),
        entry("EngagementPanelSectionList", sections::engagement_panel_section_list),
        entry("PlayerCaptionsTracklist", sections::player_captions_tracklist),
        entry("Endscreen", sections::endscreen),
        entry("PlayerStoryboardSpec", sections::player_storyboard_spec),
        entry("PlayerLiveStoryboardSpec", sections::player_live_storyboard_spec),
        entry("CardCollection", sections::card_collection),
        // Continuations
        entry("TimedContinuation", continuations::timed),
        entry("ItemSectionContinuation", continuations::item_section),
        entry("SectionListContinuation", continuations::section_list),
        entry("LiveChatContinuation", continuations::live_chat),
        entry("MusicPlaylistShelfContinuation", continuations::music_playlist_shelf),
        entry("MusicShelfContinuation", continuations::music_shelf),
        entry("GridContinuation", continuations::grid),
        entry("PlaylistPanelContinuation", continuations::playlist_panel),
        entry("ContinuationCommand", continuations::continuation_command),
        // Response-received actions
        entry("NavigateAction", actions::navigate),
        entry("ShowMiniplayerCommand", actions::show_miniplayer),
        entry("ReloadContinuationItemsCommand", actions::reload_continuation_items),
        entry("AppendContinuationItemsAction", actions::append_continuation_items),
        entry("OpenPopupAction", actions::open_popup),
        // Entity-backed classes
        entry("MusicMultiSelectMenuItem", entities::music_multi_select_menu_item),
        entry("MacroMarkersListEntity", entities::macro_markers_list_entity),
        entry("CommentView", entities::comment_view),
    ]
}

// ============================================================================
// Field projection helpers
// ============================================================================

pub(crate) fn str_field(body: &Value, key: &str) -> Option<FieldValue> {
    body.get(key)
        .and_then(Value::as_str)
        .map(|s| FieldValue::Str(s.to_string()))
}

pub(crate) fn bool_field(body: &Value, key: &str) -> Option<FieldValue> {
    body.get(key).and_then(Value::as_bool).map(FieldValue::Bool)
}

/// Integer field accepting both numbers and base-10 numeric strings, the
/// way the backend serializes counts and durations.
pub(crate) fn int_field(body: &Value, key: &str) -> Option<FieldValue> {
    body.get(key).and_then(int_like).map(FieldValue::Int)
}

pub(crate) fn int_like(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub(crate) fn text_field(body: &Value, key: &str) -> Option<FieldValue> {
    body.get(key).and_then(Text::from_value).map(FieldValue::Text)
}

pub(crate) fn thumbnails_field(body: &Value, key: &str) -> Option<FieldValue> {
    body.get(key)
        .and_then(Thumbnails::from_value)
        .map(FieldValue::Thumbnails)
}

pub(crate) fn raw_field(body: &Value, key: &str) -> Option<FieldValue> {
    body.get(key).map(|v| FieldValue::Raw(v.clone()))
}
