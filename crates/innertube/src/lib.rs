#![doc = include_str!("../README.md")]

pub use innertube_node as node;
pub use innertube_parser as parser;

pub use innertube_node::{
    FieldValue, Memo, Node, NodeArray, NodeId, NodeStore, PolyResult, Text, TextRun, Thumbnail,
    Thumbnails,
};
pub use innertube_parser::{
    ParseContext, ParsedResponse, ParserEvent, ResponseError, parse_response, reset_reporter,
    sanitize_class_name, set_reporter,
};

/// Error for the string-level convenience entry point.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Response(#[from] ResponseError),
}

/// Parse an already-deserialized response document.
pub fn parse(raw: &serde_json::Value) -> Result<ParsedResponse, ResponseError> {
    parse_response(raw)
}

/// Deserialize a response body and parse it.
pub fn parse_str(body: &str) -> Result<ParsedResponse, Error> {
    let raw: serde_json::Value = serde_json::from_str(body)?;
    Ok(parse_response(&raw)?)
}
