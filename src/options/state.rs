use crate::foundation::error::{PlotError, PlotResult};
use crate::options::vocab::{OptionScope, OptionSpec, lookup};
use serde_json::Value;
use std::collections::BTreeMap;

/// Name of the curve option that never propagates between curves.
pub(crate) const LEGEND: &str = "legend";

/// One parsed option fragment: validated `(entry, value)` pairs in argument order.
#[derive(Clone, Debug, Default)]
pub(crate) struct OptionFragment {
    pub(crate) entries: Vec<(&'static OptionSpec, Value)>,
    /// `true` for mapping literals, `false` for inline `key, value` runs.
    pub(crate) is_map: bool,
}

impl OptionFragment {
    pub(crate) fn scopes(&self) -> (bool, bool) {
        let plot = self.entries.iter().any(|(s, _)| s.scope == OptionScope::Plot);
        let curve = self.entries.iter().any(|(s, _)| s.scope == OptionScope::Curve);
        (plot, curve)
    }

    /// Split into (plot-scope, curve-scope) fragments, preserving order within each.
    pub(crate) fn split_by_scope(self) -> (OptionFragment, OptionFragment) {
        let is_map = self.is_map;
        let (plot, curve): (Vec<_>, Vec<_>) = self
            .entries
            .into_iter()
            .partition(|(s, _)| s.scope == OptionScope::Plot);
        (
            OptionFragment {
                entries: plot,
                is_map,
            },
            OptionFragment {
                entries: curve,
                is_map,
            },
        )
    }
}

/// Mapping from recognized option name to value.
///
/// Used for both plot-scope and curve-scope options. Curve snapshots taken from the cumulative
/// state are independent copies; mutating one never affects another.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptionState {
    values: BTreeMap<&'static str, Value>,
}

impl OptionState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object into a state restricted to `scope`.
    pub fn from_json_map(
        map: &serde_json::Map<String, Value>,
        scope: OptionScope,
    ) -> PlotResult<Self> {
        let mut out = Self::new();
        let mut unknown = Vec::new();
        for (k, v) in map {
            match lookup(k) {
                Some(spec) if spec.scope == scope => {
                    spec.check(v)?;
                    out.values.insert(spec.name, v.clone());
                }
                Some(spec) => {
                    return Err(PlotError::misplaced(
                        spec.name,
                        format!("expected a {} option", scope_name(scope)),
                    ));
                }
                None => unknown.push(k.clone()),
            }
        }
        if !unknown.is_empty() {
            return Err(PlotError::UnknownOption { names: unknown });
        }
        Ok(out)
    }

    /// Raw value for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Return `true` if `name` is set.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Remove and return the value for `name`.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Number of options set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return `true` when no option is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Remove every option.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub(crate) fn set(&mut self, spec: &'static OptionSpec, value: Value) {
        self.values.insert(spec.name, value);
    }

    /// Merge a fragment; later entries override earlier ones.
    pub(crate) fn merge(&mut self, frag: &OptionFragment) {
        for (spec, v) in &frag.entries {
            self.set(*spec, v.clone());
        }
    }

    /// Merge every option of `other`, overriding on conflict.
    pub fn extend_from(&mut self, other: &OptionState) {
        for (k, v) in &other.values {
            self.values.insert(*k, v.clone());
        }
    }

    /// Copy of this state with `legend` removed.
    pub fn without_legend(&self) -> Self {
        let mut out = self.clone();
        out.values.remove(LEGEND);
        out
    }

    /// String value for `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Integer value for `name`.
    pub fn count(&self, name: &str) -> Option<usize> {
        self.get(name)
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
    }

    /// Boolean value for `name`; absent options are `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Single legend text (a one-element list counts as text).
    pub fn legend(&self) -> Option<&str> {
        match self.get(LEGEND)? {
            Value::String(s) => Some(s.as_str()),
            Value::Array(items) if items.len() == 1 => items[0].as_str(),
            _ => None,
        }
    }

    /// Legend list when `legend` was given as a list.
    pub(crate) fn legend_list(&self) -> Option<&[Value]> {
        self.get(LEGEND)
            .and_then(Value::as_array)
            .map(|v| v.as_slice())
    }

    /// Curve style clause (`with`).
    pub fn style(&self) -> Option<&str> {
        self.text("with")
    }

    /// Explicit tuple size (`tuplesize`).
    pub fn tuple_size(&self) -> Option<usize> {
        self.count("tuplesize")
    }

    /// Extra numeric channels per point (`extracols`).
    pub fn extra_cols(&self) -> usize {
        self.count("extracols").unwrap_or(0)
    }

    /// Return `true` when the curve is routed to the secondary vertical axis.
    pub fn uses_y2(&self) -> bool {
        self.flag("y2")
    }
}

pub(crate) fn scope_name(scope: OptionScope) -> &'static str {
    match scope {
        OptionScope::Plot => "plot",
        OptionScope::Curve => "curve",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/options/state.rs"]
mod tests;
