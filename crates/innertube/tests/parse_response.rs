//! End-to-end response parsing scenarios.

use std::sync::{Arc, Mutex};

use innertube::{ParserEvent, parse, reset_reporter, set_reporter};
use serde_json::json;

/// Serializes tests that swap the process-wide reporter.
static GUARD: Mutex<()> = Mutex::new(());

fn capture_events(f: impl FnOnce()) -> Vec<ParserEvent> {
    let _guard = GUARD.lock().unwrap_or_else(|e| e.into_inner());
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    set_reporter(move |event| sink.lock().unwrap().push(event.clone()));
    f();
    reset_reporter();
    Arc::try_unwrap(events).unwrap().into_inner().unwrap()
}

#[test]
fn contents_with_ignored_ad_slot() {
    let events = capture_events(|| {
        let response = parse(&json!({
            "contents": [
                {"videoRenderer": {"videoId": "a"}},
                {"adSlotRenderer": {}},
            ]
        }))
        .unwrap();

        let contents = response.contents.unwrap();
        assert_eq!(contents.as_array().unwrap().len(), 1);

        let memo = response.contents_memo.unwrap();
        let videos = memo.get_type(&["Video"]);
        assert_eq!(videos.len(), 1);
        let video = response.store.node(videos.get(0).unwrap());
        assert_eq!(video.tag(), "Video");
        assert_eq!(video.key("video_id").unwrap().as_str(), Some("a"));
    });
    assert!(events.is_empty());
}

#[test]
fn radio_shelf_aliases_to_mix() {
    let response = parse(&json!({
        "contents": [{"musicRadioShelfRenderer": {"title": "x"}}]
    }))
    .unwrap();

    let memo = response.contents_memo.unwrap();
    let shelves = memo.get_type(&["MusicMixShelf"]);
    assert_eq!(shelves.len(), 1);
    let shelf = response.store.node(shelves.get(0).unwrap());
    assert_eq!(shelf.key("title").unwrap().as_str(), Some("x"));
}

#[test]
fn continuation_contents_dispatch() {
    let response = parse(&json!({
        "continuationContents": {
            "sectionListContinuation": {
                "continuation": "tok",
                "contents": [{"videoRenderer": {"videoId": "a"}}],
            }
        }
    }))
    .unwrap();

    let id = response.continuation_contents.unwrap();
    let node = response.store.node(id);
    assert_eq!(node.tag(), "SectionListContinuation");
    assert_eq!(node.key("continuation").unwrap().as_str(), Some("tok"));

    // Children parsed through the item parser land in the section memo.
    let memo = response.continuation_contents_memo.unwrap();
    assert_eq!(memo.get_type(&["Video"]).len(), 1);
}

#[test]
fn response_received_actions_filter_unknown_entries() {
    let response = parse(&json!({
        "onResponseReceivedActions": [
            {"appendContinuationItemsAction": {}},
            {"unknownAction": {}},
        ]
    }))
    .unwrap();

    let actions = response.on_response_received_actions.unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(
        response.store.node(actions.get(0).unwrap()).tag(),
        "AppendContinuationItemsAction"
    );
}

#[test]
fn multi_select_without_framework_updates_reports_missing() {
    let events = capture_events(|| {
        let response = parse(&json!({
            "contents": [{
                "musicMultiSelectMenuItemRenderer": {
                    "formItemEntityKey": "K",
                    "title": {"runs": [{"text": "T"}]},
                }
            }]
        }))
        .unwrap();
        assert!(response.contents_memo.is_some());
    });

    assert_eq!(events.len(), 1);
    match &events[0] {
        ParserEvent::MutationDataMissing { classname } => {
            assert_eq!(classname, "MusicMultiSelectMenuItem");
        }
        other => panic!("expected mutation_data_missing, got {other:?}"),
    }
}

#[test]
fn multi_select_mutations_are_applied() {
    let events = capture_events(|| {
        let response = parse(&json!({
            "contents": [
                {"musicMultiSelectMenuItemRenderer": {
                    "formItemEntityKey": "K1",
                    "title": {"runs": [{"text": "First"}]},
                }},
                {"musicMultiSelectMenuItemRenderer": {
                    "formItemEntityKey": "K2",
                    "title": {"runs": [{"text": "Second"}]},
                }},
            ],
            "frameworkUpdates": {"entityBatchUpdate": {"mutations": [
                {"entityKey": "K1", "payload": {"musicFormBooleanChoice": {
                    "id": "K1", "selected": true, "opaqueToken": "tok",
                }}},
            ]}}
        }))
        .unwrap();

        let memo = response.contents_memo.unwrap();
        let items = memo.get_type(&["MusicMultiSelectMenuItem"]);
        assert_eq!(items.len(), 2);
        let first = response.store.node(items.get(0).unwrap());
        assert_eq!(first.key("selected").unwrap().as_bool(), Some(true));
        let second = response.store.node(items.get(1).unwrap());
        assert!(!second.has_key("selected"));
    });

    let invalid: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ParserEvent::MutationDataInvalid { titles, .. } => Some(titles.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(invalid, vec![vec!["Second".to_string()]]);
}

#[test]
fn heatmap_entity_joins_contents_memo() {
    let response = parse(&json!({
        "contents": [{"videoRenderer": {"videoId": "v"}}],
        "frameworkUpdates": {"entityBatchUpdate": {"mutations": [
            {"entityKey": "hm", "payload": {"macroMarkersListEntity": {
                "key": "hm",
                "externalVideoId": "v",
                "markersList": {
                    "markerType": "MARKER_TYPE_HEATMAP",
                    "markers": [{"startMillis": "0", "intensityScoreNormalized": 0.5}],
                },
            }}},
        ]}}
    }))
    .unwrap();

    let memo = response.contents_memo.unwrap();
    let entities = memo.get_type(&["MacroMarkersListEntity"]);
    assert_eq!(entities.len(), 1);
    let entity = response.store.node(entities.get(0).unwrap());
    assert_eq!(
        entity.key("marker_type").unwrap().as_str(),
        Some("MARKER_TYPE_HEATMAP")
    );
}

#[test]
fn nested_player_response_gets_its_own_memos() {
    let response = parse(&json!({
        "playerResponse": {
            "contents": [{"videoRenderer": {"videoId": "v"}}],
        }
    }))
    .unwrap();

    // The outer document had no contents section of its own.
    assert!(response.contents.is_none());
    assert!(response.contents_memo.is_none());

    let inner = response.player_response.unwrap();
    let memo = inner.contents_memo.as_ref().unwrap();
    let videos = memo.get_type(&["Video"]);
    assert_eq!(videos.len(), 1);
    // Inner ids resolve against the inner store.
    assert_eq!(inner.store.node(videos.get(0).unwrap()).tag(), "Video");
}

#[test]
fn watch_next_response_re_enters_the_parser() {
    let response = parse(&json!({
        "contents": [{"videoRenderer": {"videoId": "outer"}}],
        "watchNextResponse": {
            "contents": [
                {"videoRenderer": {"videoId": "inner-1"}},
                {"videoRenderer": {"videoId": "inner-2"}},
            ],
        }
    }))
    .unwrap();

    let outer_memo = response.contents_memo.unwrap();
    assert_eq!(outer_memo.get_type(&["Video"]).len(), 1);

    let inner = response.watch_next_response.unwrap();
    let inner_memo = inner.contents_memo.as_ref().unwrap();
    assert_eq!(inner_memo.get_type(&["Video"]).len(), 2);
}

#[test]
fn streaming_data_section() {
    let response = parse(&json!({
        "streamingData": {
            "expiresInSeconds": "21540",
            "formats": [{"itag": 18, "mimeType": "video/mp4", "url": "https://example.test/18"}],
            "adaptiveFormats": [{"itag": 140, "mimeType": "audio/mp4", "contentLength": "123"}],
            "dashManifestUrl": "https://example.test/dash",
        }
    }))
    .unwrap();

    let streaming = response.streaming_data.unwrap();
    assert_eq!(streaming.formats.len(), 1);
    assert_eq!(streaming.adaptive_formats.len(), 1);
    assert_eq!(streaming.adaptive_formats[0].content_length, Some(123));
    assert_eq!(streaming.dash_manifest_url.as_deref(), Some("https://example.test/dash"));
}
