//! Structurally projected response sections.
//!
//! These sections are plain typed shapes, not registry classes: their keys
//! are stable and they never recurse into wrapper dispatch (apart from the
//! playability error screen).

use innertube_node::NodeId;
use serde_json::Value;

use crate::context::ParseContext;

fn str_at<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    let mut cursor = value;
    for key in keys {
        cursor = cursor.get(key)?;
    }
    cursor.as_str()
}

/// `playbackTracking`: the stats/QoE ping URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackTracking {
    pub videostats_playback_url: Option<String>,
    pub videostats_delayplay_url: Option<String>,
    pub videostats_watchtime_url: Option<String>,
    pub pt_tracking_url: Option<String>,
    pub qoe_url: Option<String>,
    pub atr_url: Option<String>,
}

impl PlaybackTracking {
    pub fn from_value(value: &Value) -> Self {
        let base = |key: &str| str_at(value, &[key, "baseUrl"]).map(str::to_string);
        Self {
            videostats_playback_url: base("videostatsPlaybackUrl"),
            videostats_delayplay_url: base("videostatsDelayplayUrl"),
            videostats_watchtime_url: base("videostatsWatchtimeUrl"),
            pt_tracking_url: base("ptrackingUrl"),
            qoe_url: base("qoeUrl"),
            atr_url: base("atrUrl"),
        }
    }
}

/// `playabilityStatus`: whether the media can play and why not.
#[derive(Debug, Clone, Default)]
pub struct PlayabilityStatus {
    pub status: String,
    pub reason: Option<String>,
    pub embeddable: bool,
    pub error_screen: Option<NodeId>,
}

impl PlayabilityStatus {
    pub fn from_value(ctx: &mut ParseContext, value: &Value) -> Self {
        Self {
            status: str_at(value, &["status"]).unwrap_or_default().to_string(),
            reason: str_at(value, &["reason"]).map(str::to_string),
            embeddable: value
                .get("playableInEmbed")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            error_screen: ctx.parse_item(value.get("errorScreen"), None),
        }
    }
}

/// `playerConfig.audioConfig`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioConfig {
    pub loudness_db: Option<f64>,
    pub perceptual_loudness_db: Option<f64>,
    pub enable_per_format_loudness: Option<bool>,
}

/// `playerConfig.streamSelectionConfig`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSelectionConfig {
    pub max_bitrate: Option<i64>,
}

/// `playerConfig`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerConfig {
    pub audio_config: Option<AudioConfig>,
    pub stream_selection_config: Option<StreamSelectionConfig>,
}

impl PlayerConfig {
    pub fn from_value(value: &Value) -> Self {
        let audio_config = value.get("audioConfig").map(|audio| AudioConfig {
            loudness_db: audio.get("loudnessDb").and_then(Value::as_f64),
            perceptual_loudness_db: audio.get("perceptualLoudnessDb").and_then(Value::as_f64),
            enable_per_format_loudness: audio
                .get("enablePerFormatLoudness")
                .and_then(Value::as_bool),
        });
        let stream_selection_config =
            value
                .get("streamSelectionConfig")
                .map(|selection| StreamSelectionConfig {
                    max_bitrate: selection
                        .get("maxBitrate")
                        .and_then(crate::classes::int_like),
                });
        Self {
            audio_config,
            stream_selection_config,
        }
    }
}

/// `bgChallenge`: the botguard attestation challenge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BgChallenge {
    pub interpreter_url: Option<String>,
    pub interpreter_hash: Option<String>,
    pub program: Option<String>,
    pub global_name: Option<String>,
    pub challenge: Option<String>,
}

impl BgChallenge {
    pub fn from_value(value: &Value) -> Self {
        Self {
            interpreter_url: str_at(
                value,
                &[
                    "interpreterUrl",
                    "privateDoNotAccessOrElseTrustedResourceUrlWrappedValue",
                ],
            )
            .map(str::to_string),
            interpreter_hash: str_at(value, &["interpreterHash"]).map(str::to_string),
            program: str_at(value, &["program"]).map(str::to_string),
            global_name: str_at(value, &["globalName"]).map(str::to_string),
            challenge: str_at(value, &["challenge"]).map(str::to_string),
        }
    }
}

/// `cpnInfo`: client playback nonce handed back by the player endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpnInfo {
    pub cpn: Option<String>,
    pub cpn_source: Option<String>,
}

impl CpnInfo {
    pub fn from_value(value: &Value) -> Self {
        Self {
            cpn: str_at(value, &["cpn"]).map(str::to_string),
            cpn_source: str_at(value, &["cpnSource"]).map(str::to_string),
        }
    }
}
