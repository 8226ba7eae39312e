//! Streaming data projection.
//!
//! `expiresInSeconds` is turned into an absolute expiry instant, and both
//! format lists share one per-response cipher cache so identical ciphers
//! are deciphered once downstream.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use innertube_node::Map;
use serde_json::Value;

use crate::classes::int_like;

/// Per-response cache interning cipher strings. Formats sharing a cipher
/// hold the same `Arc<str>`, so the deciphering layer can key its work on
/// pointer-stable entries.
#[derive(Debug, Default)]
pub struct CipherCache {
    entries: Map<String, Arc<str>>,
}

impl CipherCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, cipher: &str) -> Arc<str> {
        if let Some(existing) = self.entries.get(cipher) {
            return Arc::clone(existing);
        }
        let interned: Arc<str> = Arc::from(cipher);
        self.entries.insert(cipher.to_string(), Arc::clone(&interned));
        interned
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One muxed or adaptive media format.
#[derive(Debug, Clone)]
pub struct Format {
    pub itag: i64,
    pub mime_type: String,
    pub bitrate: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub fps: Option<i64>,
    pub quality: Option<String>,
    pub quality_label: Option<String>,
    pub audio_sample_rate: Option<i64>,
    pub audio_channels: Option<i64>,
    /// Numeric string upstream.
    pub content_length: Option<i64>,
    /// Numeric string upstream.
    pub approx_duration_ms: Option<i64>,
    pub url: Option<String>,
    pub signature_cipher: Option<Arc<str>>,
}

impl Format {
    fn from_value(value: &Value, ciphers: &mut CipherCache) -> Option<Format> {
        let itag = value.get("itag")?.as_i64()?;
        let mime_type = value.get("mimeType")?.as_str()?.to_string();
        let str_of = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        let int_of = |key: &str| value.get(key).and_then(int_like);

        let signature_cipher = value
            .get("signatureCipher")
            .or_else(|| value.get("cipher"))
            .and_then(Value::as_str)
            .map(|cipher| ciphers.intern(cipher));

        Some(Format {
            itag,
            mime_type,
            bitrate: int_of("bitrate"),
            width: int_of("width"),
            height: int_of("height"),
            fps: int_of("fps"),
            quality: str_of("quality"),
            quality_label: str_of("qualityLabel"),
            audio_sample_rate: int_of("audioSampleRate"),
            audio_channels: int_of("audioChannels"),
            content_length: int_of("contentLength"),
            approx_duration_ms: int_of("approxDurationMs"),
            url: str_of("url"),
            signature_cipher,
        })
    }
}

/// `streamingData`: the typed stream descriptor.
#[derive(Debug, Clone)]
pub struct StreamingData {
    /// Absolute expiry: parse time plus `expiresInSeconds`.
    pub expires: SystemTime,
    pub formats: Vec<Format>,
    pub adaptive_formats: Vec<Format>,
    pub dash_manifest_url: Option<String>,
    pub hls_manifest_url: Option<String>,
    pub server_abr_streaming_url: Option<String>,
}

impl StreamingData {
    pub fn from_value(value: &Value) -> Self {
        let expires_in = value
            .get("expiresInSeconds")
            .and_then(int_like)
            .unwrap_or(0)
            .max(0);
        let mut ciphers = CipherCache::new();
        let parse_formats = |key: &str, ciphers: &mut CipherCache| -> Vec<Format> {
            value
                .get(key)
                .and_then(Value::as_array)
                .map(|list| {
                    list.iter()
                        .filter_map(|f| Format::from_value(f, ciphers))
                        .collect()
                })
                .unwrap_or_default()
        };
        let formats = parse_formats("formats", &mut ciphers);
        let adaptive_formats = parse_formats("adaptiveFormats", &mut ciphers);
        let str_of = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            expires: SystemTime::now() + Duration::from_secs(expires_in as u64),
            formats,
            adaptive_formats,
            dash_manifest_url: str_of("dashManifestUrl"),
            hls_manifest_url: str_of("hlsManifestUrl"),
            server_abr_streaming_url: str_of("serverAbrStreamingUrl"),
        }
    }
}
