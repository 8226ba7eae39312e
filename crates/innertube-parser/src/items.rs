//! Item, array and poly parsing: the dispatch core.

use innertube_node::{NodeArray, NodeId, PolyResult};
use serde_json::Value;

use crate::context::{ParseContext, ShapeError};
use crate::registry;
use crate::report::{self, ParserEvent};
use crate::sanitize::sanitize_class_name;
use crate::stub;

/// Classes dropped silently: no node, no memo entry, no error event.
/// Membership is tested against the sanitized name.
pub const IGNORED_CLASSES: &[&str] = &[
    "AdSlot",
    "DisplayAd",
    "SearchPyv",
    "MealbarPromo",
    "PrimetimePromo",
    "PromotedSparklesWeb",
    "CompactPromotedVideo",
    "BrandVideoShelf",
    "BrandVideoSingleton",
    "StatementBanner",
    "GuideSigninPromo",
    "AdsEngagementPanelContent",
    "MiniGameCardView",
];

impl ParseContext {
    /// Parse one wrapper into a typed node.
    ///
    /// Takes the wrapper's first key, sanitizes it, and dispatches to the
    /// registered constructor, synthesizing a stub when the class is
    /// unknown. The type filter, when given, runs after dispatch so the
    /// `typecheck` event can name the actual tag. Successful nodes are
    /// recorded into the active memo under their class name.
    ///
    /// Never throws: absent input, ignored classes, filtered tags and
    /// constructor failures all yield `None`. Requires an active memo.
    pub fn parse_item(
        &mut self,
        raw: Option<&Value>,
        allowed_types: Option<&[&str]>,
    ) -> Option<NodeId> {
        let map = raw?.as_object()?;
        let (key, body) = map.iter().next()?;
        let classname = sanitize_class_name(key);
        if IGNORED_CLASSES.contains(&classname.as_str()) {
            return None;
        }

        let constructor = match registry::get(&classname) {
            Some(constructor) => constructor,
            None => stub::synthesize(&classname, body),
        };

        if let Some(allowed) = allowed_types
            && !allowed.contains(&classname.as_str())
        {
            report::report(ParserEvent::TypeCheck {
                classname,
                expected: allowed.iter().map(|t| (*t).to_string()).collect(),
            });
            return None;
        }

        match constructor(self, body) {
            Ok(node) => {
                let tag = node.tag().to_string();
                let id = self.store_mut().insert(node);
                self.memo_add(tag, id);
                Some(id)
            }
            Err(err) => {
                report::report(ParserEvent::Parse {
                    classname,
                    error: err.to_string(),
                    raw: body.clone(),
                });
                None
            }
        }
    }

    /// Parse an ordered list of wrappers into an observed array.
    ///
    /// Absent input yields an empty array. A single wrapper instead of a
    /// list is the hard `ExpectedArray` condition. Failed items leave no
    /// hole: survivors keep their source order.
    pub fn parse_array(
        &mut self,
        raw: Option<&Value>,
        allowed_types: Option<&[&str]>,
    ) -> Result<NodeArray, ShapeError> {
        match raw {
            None | Some(Value::Null) => Ok(NodeArray::new()),
            Some(Value::Array(items)) => {
                let mut out = NodeArray::new();
                for item in items {
                    if let Some(id) = self.parse_item(Some(item), allowed_types) {
                        out.push(id);
                    }
                }
                Ok(out)
            }
            Some(_) => Err(ShapeError::ExpectedArray),
        }
    }

    /// Unified entry point: with `require_array` the result is an observed
    /// array (or empty); without, the variant mirrors the input shape.
    pub fn parse(
        &mut self,
        raw: Option<&Value>,
        require_array: bool,
        allowed_types: Option<&[&str]>,
    ) -> Result<Option<PolyResult>, ShapeError> {
        if require_array {
            return match raw {
                None | Some(Value::Null) => Ok(None),
                _ => Ok(Some(PolyResult::Array(
                    self.parse_array(raw, allowed_types)?,
                ))),
            };
        }
        match raw {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(_)) => Ok(Some(PolyResult::Array(
                self.parse_array(raw, allowed_types)?,
            ))),
            Some(value @ Value::Object(_)) => {
                Ok(self.parse_item(Some(value), allowed_types).map(PolyResult::Item))
            }
            Some(_) => Ok(None),
        }
    }
}
