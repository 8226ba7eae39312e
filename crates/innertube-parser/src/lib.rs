//! Tolerant parser for InnerTube response documents.
//!
//! The input is a polymorphic tree: every interior object is a single-key
//! wrapper whose key names a renderer/command/endpoint/action class. The
//! parser dispatches each wrapper through a registry of typed constructors,
//! records parsed nodes into per-section memos, patches them from
//! entity-batch mutations, and synthesizes stub constructors at runtime so
//! a new upstream schema never sinks a response. Problems degrade into
//! categorized reporter events; a response with three typed children and
//! seven empty slots beats a thrown error.

/// Class-name sanitization and key conventions.
pub mod sanitize;

/// Class name to constructor registry.
pub mod registry;

/// Categorized diagnostics and the process-wide reporter.
pub mod report;

/// Parse state: node arena plus the active section memo.
pub mod context;

/// Item, array and poly parsing.
pub mod items;

/// Command/endpoint/action dispatch.
pub mod commands;

/// Continuation container dispatch.
pub mod continuation;

/// Response orchestration.
pub mod response;

/// Structurally projected sections.
pub mod shapes;

/// Streaming data projection.
pub mod streaming;

/// Entity-batch mutation passes.
pub mod mutation;

/// Runtime class synthesis.
pub mod stub;

mod classes;

#[cfg(test)]
mod test_support;

pub use context::{MemoError, ParseContext, ShapeError};
pub use items::IGNORED_CLASSES;
pub use registry::{ClassError, Constructor, RegistryError};
pub use report::{ParserEvent, reset_reporter, set_reporter};
pub use response::{ParsedResponse, ResponseError, parse_response};
pub use sanitize::sanitize_class_name;
pub use stub::{KeyChange, KeyInfo, KeyKind};
