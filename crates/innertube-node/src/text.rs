use std::fmt;

use serde_json::Value;

/// Flattened upstream text.
///
/// The backend emits text in three encodings: a bare string, a
/// `{"simpleText": "..."}` wrapper, or a `{"runs": [{"text": "..."}, ...]}`
/// run list. All three flatten to one string; run structure is kept when it
/// was present so callers can inspect per-run attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    text: String,
    runs: Option<Vec<TextRun>>,
}

/// One segment of a run list.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            runs: None,
        }
    }

    /// Project any of the three upstream encodings. Returns `None` when the
    /// value has none of them.
    pub fn from_value(value: &Value) -> Option<Text> {
        match value {
            Value::String(s) => Some(Text::new(s.clone())),
            Value::Object(map) => {
                if let Some(simple) = map.get("simpleText").and_then(Value::as_str) {
                    return Some(Text::new(simple));
                }
                let runs: Vec<TextRun> = map
                    .get("runs")?
                    .as_array()?
                    .iter()
                    .filter_map(|run| {
                        Some(TextRun {
                            text: run.get("text")?.as_str()?.to_string(),
                            bold: run.get("bold").and_then(Value::as_bool).unwrap_or(false),
                        })
                    })
                    .collect();
                let text = runs.iter().map(|r| r.text.as_str()).collect::<String>();
                Some(Text {
                    text,
                    runs: Some(runs),
                })
            }
            _ => None,
        }
    }

    /// Whether a raw value looks like one of the wrapper text encodings.
    /// Bare strings are not considered: only `simpleText`/`runs` objects.
    pub fn is_text_shape(value: &Value) -> bool {
        value
            .as_object()
            .is_some_and(|map| map.contains_key("simpleText") || map.contains_key("runs"))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn runs(&self) -> Option<&[TextRun]> {
        self.runs.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_string() {
        let text = Text::from_value(&json!("hello")).unwrap();
        assert_eq!(text.as_str(), "hello");
        assert!(text.runs().is_none());
    }

    #[test]
    fn test_simple_text() {
        let text = Text::from_value(&json!({"simpleText": "3:32"})).unwrap();
        assert_eq!(text.as_str(), "3:32");
        assert!(text.runs().is_none());
    }

    #[test]
    fn test_runs_flatten_in_order() {
        let text = Text::from_value(&json!({
            "runs": [
                {"text": "1.2M"},
                {"text": " views", "bold": false},
            ]
        }))
        .unwrap();
        assert_eq!(text.as_str(), "1.2M views");
        assert_eq!(text.runs().unwrap().len(), 2);
    }

    #[test]
    fn test_non_text_shapes() {
        assert!(Text::from_value(&json!(42)).is_none());
        assert!(Text::from_value(&json!({"thumbnails": []})).is_none());
        assert!(!Text::is_text_shape(&json!("bare")));
        assert!(Text::is_text_shape(&json!({"runs": []})));
    }
}
