use serde_json::Value;

/// A single thumbnail variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// An ordered thumbnail list, largest-first as the backend sends it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Thumbnails(Vec<Thumbnail>);

impl Thumbnails {
    /// Project a `{"thumbnails": [...]}` wrapper or a bare thumbnail list.
    pub fn from_value(value: &Value) -> Option<Thumbnails> {
        let list = match value {
            Value::Object(map) => map.get("thumbnails")?.as_array()?,
            Value::Array(list) => list,
            _ => return None,
        };
        let thumbnails = list
            .iter()
            .filter_map(|entry| {
                Some(Thumbnail {
                    url: entry.get("url")?.as_str()?.to_string(),
                    width: entry.get("width").and_then(Value::as_u64).unwrap_or(0) as u32,
                    height: entry.get("height").and_then(Value::as_u64).unwrap_or(0) as u32,
                })
            })
            .collect();
        Some(Thumbnails(thumbnails))
    }

    /// Whether a raw value looks like a thumbnail wrapper.
    pub fn is_thumbnail_shape(value: &Value) -> bool {
        value
            .as_object()
            .is_some_and(|map| map.get("thumbnails").is_some_and(Value::is_array))
    }

    pub fn best(&self) -> Option<&Thumbnail> {
        self.0.iter().max_by_key(|t| t.width)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Thumbnail> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrapper_shape() {
        let thumbs = Thumbnails::from_value(&json!({
            "thumbnails": [
                {"url": "https://i.ytimg.com/vi/a/default.jpg", "width": 120, "height": 90},
                {"url": "https://i.ytimg.com/vi/a/hq720.jpg", "width": 720, "height": 404},
            ]
        }))
        .unwrap();
        assert_eq!(thumbs.len(), 2);
        assert_eq!(thumbs.best().unwrap().width, 720);
    }

    #[test]
    fn test_entries_without_url_are_dropped() {
        let thumbs = Thumbnails::from_value(&json!({
            "thumbnails": [{"width": 120}, {"url": "u", "width": 1, "height": 1}]
        }))
        .unwrap();
        assert_eq!(thumbs.len(), 1);
    }

    #[test]
    fn test_shape_detection() {
        assert!(Thumbnails::is_thumbnail_shape(&json!({"thumbnails": []})));
        assert!(!Thumbnails::is_thumbnail_shape(&json!({"runs": []})));
        assert!(!Thumbnails::is_thumbnail_shape(&json!([1, 2])));
    }
}
