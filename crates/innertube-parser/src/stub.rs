//! Runtime class synthesis.
//!
//! The upstream schema churns continuously; an unknown wrapper key must
//! degrade into a usable node plus a structured diagnostic instead of
//! sinking the response. The first sighting of a class introspects its key
//! shape, registers a constructor interpreting that shape, and emits a
//! `class_not_found` event with a code-like sketch. Later sightings diff
//! the live shape against the recorded one and emit `class_changed`.

use std::fmt;
use std::sync::{Arc, RwLock};

use innertube_node::{FieldValue, Node, Text, Thumbnails};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::ParseContext;
use crate::registry::{self, Constructor};
use crate::report::{self, ParserEvent};
use crate::sanitize::snake_case;

/// Structural kind of one key, inferred from its value shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyKind {
    String,
    Number,
    Boolean,
    Unknown,
    Array,
    /// A single-key mapping whose value is that class's body.
    Wrapper,
    Object,
    /// Known misc shape: `simpleText`/`runs` text.
    Text,
    /// Known misc shape: a thumbnail list.
    Thumbnails,
}

/// Introspected shape of one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo {
    /// Raw camelCase key.
    pub key: String,
    pub kind: KeyKind,
}

/// One entry of a shape diff between two sightings of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChange {
    pub key: String,
    pub previous: KeyKind,
    pub current: KeyKind,
}

/// Infer the key shape of a sample class body. Non-object bodies have no
/// keys and introspect to an empty shape.
pub fn introspect(body: &Value) -> Vec<KeyInfo> {
    let Some(map) = body.as_object() else {
        return Vec::new();
    };
    map.iter()
        .map(|(key, value)| KeyInfo {
            key: key.clone(),
            kind: classify(value),
        })
        .collect()
}

fn classify(value: &Value) -> KeyKind {
    match value {
        Value::String(_) => KeyKind::String,
        Value::Number(_) => KeyKind::Number,
        Value::Bool(_) => KeyKind::Boolean,
        Value::Null => KeyKind::Unknown,
        Value::Array(_) => KeyKind::Array,
        Value::Object(_) => {
            if Text::is_text_shape(value) {
                KeyKind::Text
            } else if Thumbnails::is_thumbnail_shape(value) {
                KeyKind::Thumbnails
            } else if is_wrapper_shape(value) {
                KeyKind::Wrapper
            } else {
                KeyKind::Object
            }
        }
    }
}

/// A wrapper is a single-key mapping whose value is itself a mapping.
fn is_wrapper_shape(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.len() == 1 && map.values().next().is_some_and(Value::is_object))
}

/// Kind changes for keys present in both shapes.
pub(crate) fn diff_shapes(previous: &[KeyInfo], current: &[KeyInfo]) -> Vec<KeyChange> {
    current
        .iter()
        .filter_map(|info| {
            let prior = previous.iter().find(|p| p.key == info.key)?;
            (prior.kind != info.kind).then(|| KeyChange {
                key: info.key.clone(),
                previous: prior.kind,
                current: info.kind,
            })
        })
        .collect()
}

/// Synthesize and register a constructor for an unknown class, reporting
/// `class_not_found` with the introspected shape. Returns the constructor
/// so the caller can dispatch the triggering item immediately.
pub(crate) fn synthesize(classname: &str, sample: &Value) -> Constructor {
    let shape = Arc::new(RwLock::new(introspect(sample)));
    let recorded = shape.read().expect("shape lock poisoned").clone();
    let sketch = ClassSketch {
        name: classname,
        keys: &recorded,
    }
    .to_string();

    let name = classname.to_string();
    let ctor_shape = Arc::clone(&shape);
    let constructor: Constructor = Arc::new(move |ctx: &mut ParseContext, body: &Value| {
        let current = introspect(body);
        {
            let mut recorded = ctor_shape.write().expect("shape lock poisoned");
            let changes = diff_shapes(&recorded, &current);
            if !changes.is_empty() {
                report::report(ParserEvent::ClassChanged {
                    classname: name.clone(),
                    changes,
                });
                // Track the latest sample so an unchanged follow-up does
                // not re-report the same drift.
                *recorded = current.clone();
            }
        }
        Ok(construct_from_shape(&name, &current, ctx, body))
    });

    registry::add_runtime(classname, Arc::clone(&constructor), shape);
    report::report(ParserEvent::ClassNotFound {
        classname: classname.to_string(),
        key_info: recorded,
        sketch,
    });
    constructor
}

/// The interpreter behind every synthesized constructor: project each key
/// to its snake_case field, recursing into the item parser for nested
/// wrappers and wrapper arrays.
fn construct_from_shape(
    classname: &str,
    shape: &[KeyInfo],
    ctx: &mut ParseContext,
    body: &Value,
) -> Node {
    let mut node = Node::new(classname);
    for info in shape {
        let Some(value) = body.get(&info.key) else {
            continue;
        };
        let field = match info.kind {
            KeyKind::String => FieldValue::Str(value.as_str().unwrap_or_default().to_string()),
            KeyKind::Number => match value.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => FieldValue::Float(value.as_f64().unwrap_or_default()),
            },
            KeyKind::Boolean => FieldValue::Bool(value.as_bool().unwrap_or_default()),
            KeyKind::Unknown => FieldValue::Null,
            KeyKind::Text => match Text::from_value(value) {
                Some(text) => FieldValue::Text(text),
                None => FieldValue::Raw(value.clone()),
            },
            KeyKind::Thumbnails => match Thumbnails::from_value(value) {
                Some(thumbnails) => FieldValue::Thumbnails(thumbnails),
                None => FieldValue::Raw(value.clone()),
            },
            KeyKind::Wrapper => match ctx.parse_item(Some(value), None) {
                Some(id) => FieldValue::Node(id),
                None => FieldValue::Raw(value.clone()),
            },
            KeyKind::Array => project_array(ctx, value),
            KeyKind::Object => FieldValue::Raw(value.clone()),
        };
        node.set(snake_case(&info.key), field);
    }
    node
}

fn project_array(ctx: &mut ParseContext, value: &Value) -> FieldValue {
    let items = value.as_array().expect("classified as array");
    if !items.is_empty() && items.iter().all(is_wrapper_shape) {
        let parsed = ctx
            .parse_array(Some(value), None)
            .expect("array input cannot be a shape mismatch");
        FieldValue::Nodes(parsed)
    } else {
        FieldValue::List(items.iter().map(|item| FieldValue::Raw(item.clone())).collect())
    }
}

// ============================================================================
// Class sketch rendering
// ============================================================================

/// Code-like sketch of a synthesized class, for diagnostics only.
pub struct ClassSketch<'a> {
    pub name: &'a str,
    pub keys: &'a [KeyInfo],
}

impl fmt::Display for ClassSketch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "struct {} {{", self.name)?;
        for info in self.keys {
            writeln!(f, "    {}: {},", snake_case(&info.key), info.kind)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyKind::String => "String",
            KeyKind::Number => "f64",
            KeyKind::Boolean => "bool",
            KeyKind::Unknown => "Value",
            KeyKind::Array => "Vec<Value>",
            KeyKind::Wrapper => "NodeId",
            KeyKind::Object => "Value",
            KeyKind::Text => "Text",
            KeyKind::Thumbnails => "Thumbnails",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_misc_shapes() {
        assert_eq!(classify(&json!({"simpleText": "x"})), KeyKind::Text);
        assert_eq!(classify(&json!({"runs": [{"text": "x"}]})), KeyKind::Text);
        assert_eq!(classify(&json!({"thumbnails": []})), KeyKind::Thumbnails);
        assert_eq!(classify(&json!({"videoRenderer": {}})), KeyKind::Wrapper);
        assert_eq!(classify(&json!({"a": 1, "b": 2})), KeyKind::Object);
        assert_eq!(classify(&json!("x")), KeyKind::String);
        assert_eq!(classify(&json!(null)), KeyKind::Unknown);
    }

    #[test]
    fn test_introspect_preserves_key_order() {
        let shape = introspect(&json!({"videoId": "a", "viewCount": 3, "isLive": true}));
        let keys: Vec<_> = shape.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["videoId", "viewCount", "isLive"]);
    }

    #[test]
    fn test_diff_reports_only_changed_kinds() {
        let previous = introspect(&json!({"a": "x", "b": 1, "c": true}));
        let current = introspect(&json!({"a": "y", "b": "now a string", "d": false}));
        let changes = diff_shapes(&previous, &current);
        assert_eq!(
            changes,
            vec![KeyChange {
                key: "b".to_string(),
                previous: KeyKind::Number,
                current: KeyKind::String,
            }]
        );
    }

    #[test]
    fn test_first_sight_registers_and_constructs() {
        use crate::test_support::capture_events;

        let events = capture_events(|| {
            let mut ctx = ParseContext::new();
            ctx.begin_memo();
            let id = ctx
                .parse_item(
                    Some(&json!({
                        "zorgleCardRenderer": {
                            "videoId": "a",
                            "title": {"simpleText": "T"},
                            "badges": [{"metadataBadgeRenderer": {"style": "NEW"}}],
                        }
                    })),
                    None,
                )
                .expect("stub constructor should produce a node");

            let node = ctx.store().node(id);
            assert_eq!(node.tag(), "ZorgleCard");
            assert_eq!(node.key("video_id").unwrap().as_str(), Some("a"));
            assert_eq!(node.key("title").unwrap().as_text().unwrap().as_str(), "T");
            assert_eq!(node.key("badges").unwrap().as_nodes().unwrap().len(), 1);
        });

        let not_found: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, ParserEvent::ClassNotFound { classname, .. } if classname == "ZorgleCard"))
            .collect();
        assert_eq!(not_found.len(), 1);
        if let ParserEvent::ClassNotFound { key_info, sketch, .. } = not_found[0] {
            let kinds: Vec<_> = key_info.iter().map(|i| (i.key.as_str(), i.kind)).collect();
            assert_eq!(
                kinds,
                vec![
                    ("videoId", KeyKind::String),
                    ("title", KeyKind::Text),
                    ("badges", KeyKind::Array),
                ]
            );
            assert!(sketch.starts_with("struct ZorgleCard {"));
        }

        assert!(crate::registry::contains("ZorgleCard"));
        assert!(
            crate::registry::runtime_entries()
                .iter()
                .any(|(name, _)| name == "ZorgleCard")
        );
    }

    #[test]
    fn test_shape_drift_emits_class_changed() {
        use crate::test_support::capture_events;

        let events = capture_events(|| {
            let mut ctx = ParseContext::new();
            ctx.begin_memo();
            ctx.parse_item(Some(&json!({"driftyThingRenderer": {"count": 1}})), None)
                .unwrap();
            ctx.parse_item(Some(&json!({"driftyThingRenderer": {"count": "many"}})), None)
                .unwrap();
            // Unchanged follow-up: the recorded shape advanced, no re-report.
            ctx.parse_item(Some(&json!({"driftyThingRenderer": {"count": "several"}})), None)
                .unwrap();
        });

        let changed: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                ParserEvent::ClassChanged { classname, changes } if classname == "DriftyThing" => {
                    Some(changes)
                }
                _ => None,
            })
            .collect();
        assert_eq!(changed.len(), 1);
        assert_eq!(
            changed[0].as_slice(),
            &[KeyChange {
                key: "count".to_string(),
                previous: KeyKind::Number,
                current: KeyKind::String,
            }]
        );
    }

    #[test]
    fn test_sketch_rendering() {
        let keys = introspect(&json!({"videoId": "a", "title": {"simpleText": "t"}}));
        let sketch = ClassSketch {
            name: "MiniGameCard",
            keys: &keys,
        }
        .to_string();
        assert_eq!(
            sketch,
            "struct MiniGameCard {\n    video_id: String,\n    title: Text,\n}"
        );
    }
}
