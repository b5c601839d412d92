use crate::foundation::core::PlotArray;
use crate::foundation::error::{PlotError, PlotResult};
use crate::options::state::OptionFragment;
use crate::options::vocab::lookup;
use ndarray::{Array, Dimension, IxDyn};
use serde_json::Value;

/// One element of a plot call.
#[derive(Clone, Debug, PartialEq)]
pub enum RawArgument {
    /// Numeric array; axis 0 is the point axis.
    Array(PlotArray),
    /// Mapping literal of options, merged wholesale.
    Options(serde_json::Map<String, Value>),
    /// Bare token of an inline `key, value, key, value` run.
    Token(Value),
}

impl RawArgument {
    /// Return `true` for array data.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }
}

impl<D: Dimension> From<Array<f64, D>> for RawArgument {
    fn from(a: Array<f64, D>) -> Self {
        Self::Array(a.into_dyn())
    }
}

impl From<serde_json::Map<String, Value>> for RawArgument {
    fn from(m: serde_json::Map<String, Value>) -> Self {
        Self::Options(m)
    }
}

impl From<Value> for RawArgument {
    fn from(v: Value) -> Self {
        match v {
            Value::Object(m) => Self::Options(m),
            other => Self::Token(other),
        }
    }
}

impl From<&str> for RawArgument {
    fn from(s: &str) -> Self {
        Self::Token(Value::String(s.to_string()))
    }
}

impl From<String> for RawArgument {
    fn from(s: String) -> Self {
        Self::Token(Value::String(s))
    }
}

/// Alternating runs of a classified call.
#[derive(Clone, Debug)]
pub(crate) enum Segment {
    Options(Vec<OptionFragment>),
    Data(Vec<PlotArray>),
}

/// Partition raw arguments into alternating option and data runs, preserving order.
pub(crate) fn classify(args: Vec<RawArgument>) -> PlotResult<Vec<Segment>> {
    let mut segments = Vec::<Segment>::new();
    let mut iter = args.into_iter().peekable();

    while let Some(arg) = iter.next() {
        match arg {
            RawArgument::Array(a) => {
                let a = promote_scalar(a)?;
                match segments.last_mut() {
                    Some(Segment::Data(run)) => run.push(a),
                    _ => segments.push(Segment::Data(vec![a])),
                }
            }
            RawArgument::Options(map) => {
                push_fragment(&mut segments, parse_map(&map)?);
            }
            RawArgument::Token(first) => {
                let mut pairs = Vec::new();
                let mut key = first;
                loop {
                    let key_name = match key {
                        Value::String(s) => s,
                        other => {
                            return Err(PlotError::UnknownOption {
                                names: vec![other.to_string()],
                            });
                        }
                    };
                    let value = match iter.next_if(|a| !a.is_array()) {
                        Some(RawArgument::Token(v)) => v,
                        Some(RawArgument::Options(m)) => Value::Object(m),
                        Some(RawArgument::Array(_)) | None => {
                            return Err(PlotError::DanglingOptionKey { key: key_name });
                        }
                    };
                    pairs.push((key_name, value));

                    // The run continues only through further bare tokens.
                    match iter.next_if(|a| matches!(a, RawArgument::Token(_))) {
                        Some(RawArgument::Token(next)) => key = next,
                        _ => break,
                    }
                }
                push_fragment(&mut segments, parse_pairs(pairs, false)?);
            }
        }
    }

    Ok(segments)
}

/// Parse a mapping literal into a validated fragment.
pub(crate) fn parse_map(map: &serde_json::Map<String, Value>) -> PlotResult<OptionFragment> {
    parse_pairs(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(), true)
}

fn parse_pairs(pairs: Vec<(String, Value)>, is_map: bool) -> PlotResult<OptionFragment> {
    let mut entries = Vec::with_capacity(pairs.len());
    let mut unknown = Vec::new();
    for (k, v) in pairs {
        match lookup(&k) {
            Some(spec) => entries.push((spec, v)),
            None => unknown.push(k),
        }
    }
    if !unknown.is_empty() {
        return Err(PlotError::UnknownOption { names: unknown });
    }
    for (spec, v) in &entries {
        spec.check(v)?;
    }
    Ok(OptionFragment { entries, is_map })
}

fn push_fragment(segments: &mut Vec<Segment>, frag: OptionFragment) {
    match segments.last_mut() {
        Some(Segment::Options(run)) => run.push(frag),
        _ => segments.push(Segment::Options(vec![frag])),
    }
}

/// A 0-dimensional array is a single point.
fn promote_scalar(a: PlotArray) -> PlotResult<PlotArray> {
    if a.ndim() > 0 {
        return Ok(a);
    }
    let values: Vec<f64> = a.iter().copied().collect();
    PlotArray::from_shape_vec(IxDyn(&[values.len()]), values)
        .map_err(|e| PlotError::Other(anyhow::Error::new(e)))
}

#[cfg(test)]
#[path = "../../tests/unit/args/classify.rs"]
mod tests;
