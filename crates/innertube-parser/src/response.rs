//! Response orchestration.
//!
//! Walks every known top-level section of a response document, scoping a
//! fresh memo per section, then runs the mutation passes. Nested
//! `playerResponse` / `watchNextResponse` documents re-enter the parser
//! with a fresh context, so their memos and node store are fully separate
//! from the outer document's.

use innertube_node::{Memo, NodeArray, NodeId, NodeStore, PolyResult};
use serde_json::Value;

use crate::classes::int_like;
use crate::context::{MemoError, ParseContext, ShapeError};
use crate::mutation;
use crate::shapes::{BgChallenge, CpnInfo, PlayabilityStatus, PlaybackTracking, PlayerConfig};
use crate::streaming::StreamingData;

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Memo(#[from] MemoError),
}

/// A fully parsed response document. Fields mirror the known top-level
/// sections; each is present iff the section was present in the input.
/// Node ids resolve against [`ParsedResponse::store`].
#[derive(Debug, Default)]
pub struct ParsedResponse {
    pub store: NodeStore,

    pub contents: Option<PolyResult>,
    pub contents_memo: Option<Memo>,
    pub on_response_received_actions: Option<NodeArray>,
    pub on_response_received_actions_memo: Option<Memo>,
    pub on_response_received_endpoints: Option<NodeArray>,
    pub on_response_received_endpoints_memo: Option<Memo>,
    pub on_response_received_commands: Option<NodeArray>,
    pub on_response_received_commands_memo: Option<Memo>,
    pub continuation_contents: Option<NodeId>,
    pub continuation_contents_memo: Option<Memo>,
    pub actions: Option<PolyResult>,
    pub actions_memo: Option<Memo>,
    pub live_chat_item_context_menu_supported_renderers: Option<NodeId>,
    pub live_chat_item_context_menu_supported_renderers_memo: Option<Memo>,
    pub header: Option<PolyResult>,
    pub header_memo: Option<Memo>,
    pub items: Option<PolyResult>,
    pub items_memo: Option<Memo>,

    pub metadata: Option<PolyResult>,
    pub player_overlays: Option<PolyResult>,
    pub sidebar: Option<NodeId>,
    pub microformat: Option<NodeId>,
    pub overlay: Option<NodeId>,
    pub captions: Option<NodeId>,
    pub storyboards: Option<NodeId>,
    pub endscreen: Option<NodeId>,
    pub cards: Option<NodeId>,
    pub background: Option<NodeId>,
    pub alerts: Option<NodeArray>,
    pub annotations: Option<NodeArray>,
    pub engagement_panels: Option<NodeArray>,
    pub continuation: Option<NodeId>,
    pub continuation_endpoint: Option<NodeId>,

    pub refinements: Option<Vec<String>>,
    pub estimated_results: Option<i64>,
    pub target_id: Option<String>,
    pub challenge: Option<String>,

    pub playback_tracking: Option<PlaybackTracking>,
    pub playability_status: Option<PlayabilityStatus>,
    pub player_config: Option<PlayerConfig>,
    pub bg_challenge: Option<BgChallenge>,
    pub cpn_info: Option<CpnInfo>,
    pub streaming_data: Option<StreamingData>,

    pub video_details: Option<NodeId>,
    pub current_video_endpoint: Option<NodeId>,
    pub endpoint: Option<NodeId>,
    pub entries: Option<NodeArray>,

    pub player_response: Option<Box<ParsedResponse>>,
    pub watch_next_response: Option<Box<ParsedResponse>>,
}

/// Parse a raw response document into a [`ParsedResponse`].
///
/// Structural problems inside items degrade into reporter events and empty
/// slots; only shape-contract violations (a single wrapper where an array
/// is required) surface as errors.
pub fn parse_response(raw: &Value) -> Result<ParsedResponse, ResponseError> {
    let mut ctx = ParseContext::new();
    let mut out = ParsedResponse::default();

    if let Some(value) = raw.get("contents") {
        ctx.begin_memo();
        out.contents = ctx.parse(Some(value), false, None)?;
        out.contents_memo = Some(ctx.take_memo()?);
    }

    if let Some(value) = raw.get("onResponseReceivedActions") {
        ctx.begin_memo();
        out.on_response_received_actions = Some(ctx.parse_response_received(Some(value)));
        out.on_response_received_actions_memo = Some(ctx.take_memo()?);
    }
    if let Some(value) = raw.get("onResponseReceivedEndpoints") {
        ctx.begin_memo();
        out.on_response_received_endpoints = Some(ctx.parse_response_received(Some(value)));
        out.on_response_received_endpoints_memo = Some(ctx.take_memo()?);
    }
    if let Some(value) = raw.get("onResponseReceivedCommands") {
        ctx.begin_memo();
        out.on_response_received_commands = Some(ctx.parse_response_received(Some(value)));
        out.on_response_received_commands_memo = Some(ctx.take_memo()?);
    }

    if let Some(value) = raw.get("continuationContents") {
        ctx.begin_memo();
        out.continuation_contents = ctx.parse_continuation(value);
        out.continuation_contents_memo = Some(ctx.take_memo()?);
    }

    if let Some(value) = raw.get("actions") {
        ctx.begin_memo();
        out.actions = match value.as_array() {
            // Tracking params are stripped from a local clone; the input
            // document is borrowed immutably and never modified.
            Some(entries) => {
                let cleaned: Vec<Value> = entries
                    .iter()
                    .cloned()
                    .map(|mut entry| {
                        if let Some(map) = entry.as_object_mut() {
                            map.remove("clickTrackingParams");
                        }
                        entry
                    })
                    .collect();
                ctx.parse(Some(&Value::Array(cleaned)), false, None)?
            }
            None => ctx.parse(Some(value), false, None)?,
        };
        out.actions_memo = Some(ctx.take_memo()?);
    }

    if let Some(value) = raw.get("liveChatItemContextMenuSupportedRenderers") {
        ctx.begin_memo();
        out.live_chat_item_context_menu_supported_renderers = ctx.parse_item(Some(value), None);
        out.live_chat_item_context_menu_supported_renderers_memo = Some(ctx.take_memo()?);
    }

    if let Some(value) = raw.get("header") {
        ctx.begin_memo();
        out.header = ctx.parse(Some(value), false, None)?;
        out.header_memo = Some(ctx.take_memo()?);
    }
    if let Some(value) = raw.get("items") {
        ctx.begin_memo();
        out.items = ctx.parse(Some(value), false, None)?;
        out.items_memo = Some(ctx.take_memo()?);
    }

    // Sections below run under a scratch memo: constructors still need an
    // active memo for their nested item parses, but nothing keeps it.
    out.metadata = scratch(&mut ctx, |ctx| ctx.parse(raw.get("metadata"), false, None))??;
    out.player_overlays = scratch(&mut ctx, |ctx| ctx.parse(raw.get("playerOverlays"), false, None))??;

    out.sidebar = scratch(&mut ctx, |ctx| ctx.parse_item(raw.get("sidebar"), None))?;
    out.microformat = scratch(&mut ctx, |ctx| ctx.parse_item(raw.get("microformat"), None))?;
    out.overlay = scratch(&mut ctx, |ctx| ctx.parse_item(raw.get("overlay"), None))?;
    out.background = scratch(&mut ctx, |ctx| ctx.parse_item(raw.get("background"), None))?;
    out.captions = scratch(&mut ctx, |ctx| {
        ctx.parse_item(raw.get("captions"), Some(&["PlayerCaptionsTracklist"]))
    })?;
    out.storyboards = scratch(&mut ctx, |ctx| {
        ctx.parse_item(
            raw.get("storyboards"),
            Some(&["PlayerStoryboardSpec", "PlayerLiveStoryboardSpec"]),
        )
    })?;
    out.endscreen = scratch(&mut ctx, |ctx| {
        ctx.parse_item(raw.get("endscreen"), Some(&["Endscreen"]))
    })?;
    out.cards = scratch(&mut ctx, |ctx| {
        ctx.parse_item(raw.get("cards"), Some(&["CardCollection"]))
    })?;

    if let Some(value) = raw.get("alerts") {
        out.alerts = Some(scratch(&mut ctx, |ctx| {
            ctx.parse_array(Some(value), Some(&["Alert", "AlertWithButton"]))
        })??);
    }
    if let Some(value) = raw.get("annotations") {
        out.annotations = Some(scratch(&mut ctx, |ctx| {
            ctx.parse_array(Some(value), Some(&["PlayerAnnotationsExpanded"]))
        })??);
    }
    if let Some(value) = raw.get("engagementPanels") {
        out.engagement_panels = Some(scratch(&mut ctx, |ctx| {
            ctx.parse_array(Some(value), Some(&["EngagementPanelSectionList"]))
        })??);
    }

    if let Some(value) = raw.get("continuation") {
        out.continuation = scratch(&mut ctx, |ctx| ctx.parse_continuation(value))?;
    }
    if let Some(value) = raw.get("continuationEndpoint") {
        out.continuation_endpoint = scratch(&mut ctx, |ctx| ctx.parse_continuation(value))?;
    }

    out.refinements = raw.get("refinements").and_then(Value::as_array).map(|list| {
        list.iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    });
    out.estimated_results = raw.get("estimatedResults").and_then(int_like);
    out.target_id = raw
        .get("targetId")
        .and_then(Value::as_str)
        .map(str::to_string);
    out.challenge = raw
        .get("challenge")
        .and_then(Value::as_str)
        .map(str::to_string);

    out.playback_tracking = raw.get("playbackTracking").map(PlaybackTracking::from_value);
    out.playability_status = raw
        .get("playabilityStatus")
        .map(|value| scratch(&mut ctx, |ctx| PlayabilityStatus::from_value(ctx, value)))
        .transpose()?;
    out.player_config = raw.get("playerConfig").map(PlayerConfig::from_value);
    out.bg_challenge = raw.get("bgChallenge").map(BgChallenge::from_value);
    out.cpn_info = raw.get("cpnInfo").map(CpnInfo::from_value);
    out.streaming_data = raw.get("streamingData").map(StreamingData::from_value);

    if let Some(value) = raw.get("videoDetails") {
        out.video_details = ctx.construct_class("VideoDetails", value);
    }
    if let Some(value) = raw.get("currentVideoEndpoint") {
        out.current_video_endpoint = ctx.construct_class("NavigationEndpoint", value);
    }
    if let Some(value) = raw.get("endpoint") {
        out.endpoint = ctx.construct_class("NavigationEndpoint", value);
    }
    if let Some(entries) = raw.get("entries").and_then(Value::as_array) {
        let mut parsed = NodeArray::new();
        for entry in entries {
            if let Some(id) = ctx.construct_class("NavigationEndpoint", entry) {
                parsed.push(id);
            }
        }
        out.entries = Some(parsed);
    }

    if let Some(value) = raw.get("playerResponse") {
        out.player_response = Some(Box::new(parse_response(value)?));
    }
    if let Some(value) = raw.get("watchNextResponse") {
        out.watch_next_response = Some(Box::new(parse_response(value)?));
    }

    let mutations = raw
        .get("frameworkUpdates")
        .and_then(|updates| updates.get("entityBatchUpdate"))
        .and_then(|batch| batch.get("mutations"))
        .and_then(Value::as_array)
        .map(Vec::as_slice);
    if let Some(memo) = out.contents_memo.as_mut() {
        mutation::apply(&mut ctx, memo, mutations);
    }
    if let Some(memo) = out.on_response_received_endpoints_memo.as_mut() {
        mutation::apply(&mut ctx, memo, mutations);
    }

    out.store = ctx.into_store();
    Ok(out)
}

/// Run one section under a throwaway memo.
fn scratch<T>(
    ctx: &mut ParseContext,
    f: impl FnOnce(&mut ParseContext) -> T,
) -> Result<T, MemoError> {
    ctx.begin_memo();
    let result = f(ctx);
    ctx.take_memo()?;
    Ok(result)
}
