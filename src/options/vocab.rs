//! Static option vocabulary.
//!
//! Every option name a plot call may carry is listed here exactly once, together with its scope
//! and value kind. Classification never guesses: a name missing from the table is rejected.

use crate::foundation::error::{PlotError, PlotResult};
use serde_json::Value;

/// Which universe an option belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionScope {
    /// Applies to the whole plot (axes, titles, mode).
    Plot,
    /// Applies to one curve.
    Curve,
}

/// Accepted value shape for an option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// JSON boolean.
    Bool,
    /// Non-negative integer.
    Count,
    /// Integer >= 1.
    PositiveCount,
    /// JSON string.
    Text,
    /// String, or a non-empty list of strings.
    TextOrList,
    /// Two-element list `[lo, hi]`; each bound is a number or `null`.
    Range,
}

/// One vocabulary entry.
#[derive(Debug)]
pub struct OptionSpec {
    /// Canonical option name.
    pub name: &'static str,
    /// Scope of the option.
    pub scope: OptionScope,
    /// Accepted value shape.
    pub kind: ValueKind,
}

macro_rules! opt {
    ($name:literal, $scope:ident, $kind:ident) => {
        OptionSpec {
            name: $name,
            scope: OptionScope::$scope,
            kind: ValueKind::$kind,
        }
    };
}

pub(crate) static VOCABULARY: &[OptionSpec] = &[
    opt!("title", Plot, Text),
    opt!("xlabel", Plot, Text),
    opt!("ylabel", Plot, Text),
    opt!("zlabel", Plot, Text),
    opt!("y2label", Plot, Text),
    opt!("cblabel", Plot, Text),
    opt!("xrange", Plot, Range),
    opt!("yrange", Plot, Range),
    opt!("zrange", Plot, Range),
    opt!("y2range", Plot, Range),
    opt!("cbrange", Plot, Range),
    opt!("3d", Plot, Bool),
    opt!("grid", Plot, Bool),
    opt!("square", Plot, Bool),
    opt!("logscale", Plot, Text),
    opt!("maxcurves", Plot, Count),
    opt!("extracmds", Plot, TextOrList),
    opt!("legend", Curve, TextOrList),
    opt!("with", Curve, Text),
    opt!("tuplesize", Curve, PositiveCount),
    opt!("extracols", Curve, Count),
    opt!("y2", Curve, Bool),
];

/// Look up a vocabulary entry by exact name.
pub fn lookup(name: &str) -> Option<&'static OptionSpec> {
    VOCABULARY.iter().find(|s| s.name == name)
}

/// Iterate every vocabulary entry of `scope`, in table order.
pub fn names_in_scope(scope: OptionScope) -> impl Iterator<Item = &'static str> {
    VOCABULARY
        .iter()
        .filter(move |s| s.scope == scope)
        .map(|s| s.name)
}

impl OptionSpec {
    /// Check that `value` has the shape this option accepts.
    pub fn check(&self, value: &Value) -> PlotResult<()> {
        let ok = match self.kind {
            ValueKind::Bool => value.is_boolean(),
            ValueKind::Count => value.as_u64().is_some(),
            ValueKind::PositiveCount => value.as_u64().is_some_and(|n| n >= 1),
            ValueKind::Text => value.is_string(),
            ValueKind::TextOrList => match value {
                Value::String(_) => true,
                Value::Array(items) => !items.is_empty() && items.iter().all(Value::is_string),
                _ => false,
            },
            ValueKind::Range => match value.as_array() {
                Some(bounds) => {
                    bounds.len() == 2 && bounds.iter().all(|b| b.is_null() || b.is_number())
                }
                None => false,
            },
        };
        if ok {
            Ok(())
        } else {
            Err(PlotError::invalid_value(
                self.name,
                format!("expected {}, got {value}", self.kind.describe()),
            ))
        }
    }
}

impl ValueKind {
    fn describe(self) -> &'static str {
        match self {
            Self::Bool => "a boolean",
            Self::Count => "a non-negative integer",
            Self::PositiveCount => "an integer >= 1",
            Self::Text => "a string",
            Self::TextOrList => "a string or a non-empty list of strings",
            Self::Range => "[lo, hi] with numeric or null bounds",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/options/vocab.rs"]
mod tests;
