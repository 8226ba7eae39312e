//! Entity-batch mutation passes.
//!
//! Driven by `frameworkUpdates.entityBatchUpdate.mutations`: a list of
//! records carrying an `entityKey` and a typed payload, applied onto nodes
//! already captured in a section memo. The heat-map pass is the only place
//! where mutation application adds new nodes to the memo.

use innertube_node::{FieldValue, Memo, NodeId, NodeStore};
use serde_json::Value;

use crate::classes::comment_view_apply_mutations;
use crate::context::ParseContext;
use crate::report::{self, ParserEvent};

const MULTI_SELECT: &str = "MusicMultiSelectMenuItem";
const HEATMAP: &str = "MacroMarkersListEntity";
const COMMENT_VIEW: &str = "CommentView";

/// Run every mutation pass against one section memo.
pub fn apply(ctx: &mut ParseContext, memo: &mut Memo, mutations: Option<&[Value]>) {
    apply_multi_select(ctx.store_mut(), memo, mutations);
    apply_heatmap(ctx, memo, mutations);
    apply_comment_views(ctx.store_mut(), memo, mutations);
}

fn apply_multi_select(store: &mut NodeStore, memo: &Memo, mutations: Option<&[Value]>) {
    let nodes = memo.get_type(&[MULTI_SELECT]);
    if nodes.is_empty() {
        return;
    }
    let Some(mutations) = mutations else {
        report::report(ParserEvent::MutationDataMissing {
            classname: MULTI_SELECT.to_string(),
        });
        return;
    };

    let total = nodes.len();
    let mut failed_titles = Vec::new();
    for id in nodes.iter() {
        let entity_key = store
            .node(id)
            .get("form_item_entity_key")
            .and_then(FieldValue::as_str)
            .map(str::to_string);
        let choice = entity_key.as_deref().and_then(|key| {
            mutations.iter().find_map(|mutation| {
                let choice = mutation.get("payload")?.get("musicFormBooleanChoice")?;
                (choice.get("id")?.as_str()? == key).then_some(choice)
            })
        });

        let selected = choice.and_then(|choice| {
            let selected = choice.get("selected")?.as_bool()?;
            choice.get("opaqueToken")?;
            Some(selected)
        });
        match selected {
            Some(selected) => {
                store.node_mut(id).set("selected", FieldValue::Bool(selected));
            }
            None => failed_titles.push(title_of(store, id)),
        }
    }

    if !failed_titles.is_empty() {
        report::report(ParserEvent::MutationDataInvalid {
            classname: MULTI_SELECT.to_string(),
            total,
            failed: failed_titles.len(),
            titles: failed_titles,
        });
    }
}

fn title_of(store: &NodeStore, id: NodeId) -> String {
    store
        .node(id)
        .get("title")
        .and_then(FieldValue::as_str)
        .unwrap_or_default()
        .to_string()
}

fn apply_heatmap(ctx: &mut ParseContext, memo: &mut Memo, mutations: Option<&[Value]>) {
    let Some(mutations) = mutations else {
        return;
    };
    for mutation in mutations {
        let Some(entity) = mutation
            .get("payload")
            .and_then(|payload| payload.get("macroMarkersListEntity"))
        else {
            continue;
        };
        let marker_type = entity
            .get("markersList")
            .and_then(|list| list.get("markerType"))
            .and_then(Value::as_str);
        if marker_type != Some("MARKER_TYPE_HEATMAP") {
            continue;
        }
        if let Some(id) = ctx.construct_class(HEATMAP, entity) {
            memo.add(HEATMAP, id);
        }
    }
}

fn apply_comment_views(store: &mut NodeStore, memo: &Memo, mutations: Option<&[Value]>) {
    let nodes = memo.get_type(&[COMMENT_VIEW]);
    if nodes.is_empty() {
        // Runs with nothing to do and stays silent.
        return;
    }
    let Some(mutations) = mutations else {
        report::report(ParserEvent::MutationDataMissing {
            classname: COMMENT_VIEW.to_string(),
        });
        return;
    };

    for id in nodes.iter() {
        let keys = {
            let node = store.node(id);
            let get = |key: &str| {
                node.get(key)
                    .and_then(FieldValue::as_str)
                    .map(str::to_string)
            };
            (
                get("comment_key"),
                get("toolbar_state_key"),
                get("toolbar_surface_key"),
                get("comment_surface_key"),
            )
        };

        let comment = keys.0.as_deref().and_then(|key| {
            find_payload(mutations, "commentEntityPayload", key)
        });
        let toolbar_state = keys.1.as_deref().and_then(|key| {
            find_payload(mutations, "engagementToolbarStateEntityPayload", key)
        });
        let toolbar_surface = keys.2.as_deref().and_then(|key| {
            mutations
                .iter()
                .find(|m| m.get("entityKey").and_then(Value::as_str) == Some(key))
                .and_then(|m| m.get("payload"))
        });
        let comment_surface = keys.3.as_deref().and_then(|key| {
            find_payload(mutations, "commentSurfaceEntityPayload", key)
        });

        comment_view_apply_mutations(
            store.node_mut(id),
            comment,
            toolbar_state,
            toolbar_surface,
            comment_surface,
        );
    }
}

/// Payload of the mutation whose `payload.<kind>.key` equals `key`.
fn find_payload<'a>(mutations: &'a [Value], kind: &str, key: &str) -> Option<&'a Value> {
    mutations.iter().find_map(|mutation| {
        let payload = mutation.get("payload")?.get(kind)?;
        (payload.get("key")?.as_str()? == key).then_some(payload)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_events;
    use serde_json::json;

    fn menu_item(key: &str, title: &str) -> Value {
        json!({
            "musicMultiSelectMenuItemRenderer": {
                "formItemEntityKey": key,
                "title": {"runs": [{"text": title}]},
            }
        })
    }

    #[test]
    fn test_multi_select_patches_matches_and_reports_the_rest() {
        let events = capture_events(|| {
            let mut ctx = ParseContext::new();
            ctx.begin_memo();
            let first = ctx.parse_item(Some(&menu_item("K1", "First")), None).unwrap();
            let second = ctx.parse_item(Some(&menu_item("K2", "Second")), None).unwrap();
            let mut memo = ctx.take_memo().unwrap();

            let mutations = vec![json!({
                "entityKey": "K1",
                "payload": {
                    "musicFormBooleanChoice": {
                        "id": "K1",
                        "selected": true,
                        "opaqueToken": "tok",
                    }
                }
            })];
            apply(&mut ctx, &mut memo, Some(&mutations));

            assert_eq!(
                ctx.store().node(first).key("selected").unwrap().as_bool(),
                Some(true)
            );
            assert!(!ctx.store().node(second).has_key("selected"));
        });

        assert_eq!(events.len(), 1);
        match &events[0] {
            ParserEvent::MutationDataInvalid {
                classname,
                total,
                failed,
                titles,
            } => {
                assert_eq!(classname, MULTI_SELECT);
                assert_eq!(*total, 2);
                assert_eq!(*failed, 1);
                assert_eq!(titles, &["Second"]);
            }
            other => panic!("expected mutation_data_invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_multi_select_without_mutations_reports_missing() {
        let events = capture_events(|| {
            let mut ctx = ParseContext::new();
            ctx.begin_memo();
            ctx.parse_item(Some(&menu_item("K", "T")), None).unwrap();
            let mut memo = ctx.take_memo().unwrap();
            apply(&mut ctx, &mut memo, None);
        });
        assert_eq!(
            events,
            vec![ParserEvent::MutationDataMissing {
                classname: MULTI_SELECT.to_string()
            }]
        );
    }

    #[test]
    fn test_heatmap_entities_join_the_memo() {
        let mut ctx = ParseContext::new();
        ctx.begin_memo();
        let mut memo = ctx.take_memo().unwrap();

        let mutations = vec![json!({
            "entityKey": "hm",
            "payload": {
                "macroMarkersListEntity": {
                    "key": "hm",
                    "externalVideoId": "v",
                    "markersList": {
                        "markerType": "MARKER_TYPE_HEATMAP",
                        "markers": [{"startMillis": "0", "intensityScoreNormalized": 0.4}],
                    }
                }
            }
        })];
        apply(&mut ctx, &mut memo, Some(&mutations));

        let entities = memo.get_type(&[HEATMAP]);
        assert_eq!(entities.len(), 1);
        let node = ctx.store().node(entities.get(0).unwrap());
        assert_eq!(node.key("marker_type").unwrap().as_str(), Some("MARKER_TYPE_HEATMAP"));
        assert_eq!(node.key("video_id").unwrap().as_str(), Some("v"));
    }

    #[test]
    fn test_non_heatmap_markers_are_skipped() {
        let mut ctx = ParseContext::new();
        ctx.begin_memo();
        let mut memo = ctx.take_memo().unwrap();
        let mutations = vec![json!({
            "payload": {
                "macroMarkersListEntity": {
                    "key": "ch",
                    "markersList": {"markerType": "MARKER_TYPE_CHAPTERS"},
                }
            }
        })];
        apply(&mut ctx, &mut memo, Some(&mutations));
        assert!(memo.get_type(&[HEATMAP]).is_empty());
    }

    #[test]
    fn test_comment_views_get_their_payloads() {
        let events = capture_events(|| {
            let mut ctx = ParseContext::new();
            ctx.begin_memo();
            let id = ctx
                .parse_item(
                    Some(&json!({
                        "commentViewModel": {
                            "commentKey": "ck",
                            "toolbarStateKey": "tsk",
                            "toolbarSurfaceKey": "tfk",
                            "commentSurfaceKey": "csk",
                        }
                    })),
                    None,
                )
                .unwrap();
            let mut memo = ctx.take_memo().unwrap();

            let mutations = vec![
                json!({
                    "entityKey": "ck",
                    "payload": {"commentEntityPayload": {
                        "key": "ck",
                        "properties": {"content": {"content": "hello"}},
                    }}
                }),
                json!({
                    "entityKey": "tsk",
                    "payload": {"engagementToolbarStateEntityPayload": {
                        "key": "tsk",
                        "likeState": "TOOLBAR_LIKE_STATE_LIKED",
                    }}
                }),
            ];
            apply(&mut ctx, &mut memo, Some(&mutations));

            let node = ctx.store().node(id);
            assert_eq!(node.key("content").unwrap().as_str(), Some("hello"));
            assert_eq!(
                node.key("like_state").unwrap().as_str(),
                Some("TOOLBAR_LIKE_STATE_LIKED")
            );
        });
        assert!(events.is_empty());
    }

    #[test]
    fn test_comment_pass_is_silent_on_empty_memo() {
        let events = capture_events(|| {
            let mut ctx = ParseContext::new();
            ctx.begin_memo();
            let mut memo = ctx.take_memo().unwrap();
            apply(&mut ctx, &mut memo, None);
        });
        assert!(events.is_empty());
    }
}
