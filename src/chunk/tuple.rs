use crate::foundation::core::PlotMode;
use crate::foundation::error::{PlotError, PlotResult};
use crate::options::state::OptionState;

/// Channel increment contributed by a style name, per mode. `None` means not representable.
struct StyleChannels {
    name: &'static str,
    two_d: Option<usize>,
    three_d: Option<usize>,
}

const STYLE_CHANNELS: &[StyleChannels] = &[
    StyleChannels {
        name: "circles",
        two_d: Some(1),
        three_d: None,
    },
    StyleChannels {
        name: "xerrorbars",
        two_d: Some(1),
        three_d: None,
    },
    StyleChannels {
        name: "yerrorbars",
        two_d: Some(1),
        three_d: None,
    },
    StyleChannels {
        name: "xerrorlines",
        two_d: Some(1),
        three_d: None,
    },
    StyleChannels {
        name: "yerrorlines",
        two_d: Some(1),
        three_d: None,
    },
    StyleChannels {
        name: "errorbars",
        two_d: Some(1),
        three_d: None,
    },
    StyleChannels {
        name: "errorlines",
        two_d: Some(1),
        three_d: None,
    },
    StyleChannels {
        name: "xyerrorbars",
        two_d: Some(2),
        three_d: None,
    },
    StyleChannels {
        name: "xyerrorlines",
        two_d: Some(2),
        three_d: None,
    },
    StyleChannels {
        name: "boxxyerror",
        two_d: Some(2),
        three_d: None,
    },
    StyleChannels {
        name: "ellipses",
        two_d: Some(2),
        three_d: None,
    },
    StyleChannels {
        name: "vectors",
        two_d: Some(2),
        three_d: Some(3),
    },
];

/// Property keywords that read a per-point value when followed by `variable`.
const VARIABLE_PROPS: &[&str] = &[
    "pointsize",
    "ps",
    "linecolor",
    "lc",
    "textcolor",
    "tc",
    "fillcolor",
    "fc",
];

/// Resolve the single tuple size shared by every curve snapshot of one chunk.
pub(crate) fn resolve_tuple_size(options: &[OptionState], mode: PlotMode) -> PlotResult<usize> {
    let sizes = options
        .iter()
        .map(|o| tuple_size_for(o, mode))
        .collect::<PlotResult<Vec<_>>>()?;

    let Some(&first) = sizes.first() else {
        return Ok(mode.base_tuple_size());
    };
    if sizes.iter().any(|&s| s != first) {
        return Err(PlotError::TupleSizeConflict { sizes });
    }
    Ok(first)
}

/// Tuple size demanded by one curve snapshot.
pub(crate) fn tuple_size_for(opts: &OptionState, mode: PlotMode) -> PlotResult<usize> {
    let base = mode.base_tuple_size();
    // Checked first so an explicit tuplesize cannot smuggle a 2-D-only style into 3-D.
    let style_extra = match opts.style() {
        Some(style) => style_channels(style, mode)?,
        None => 0,
    };

    if let Some(explicit) = opts.tuple_size() {
        if explicit < base {
            return Err(PlotError::invalid_value(
                "tuplesize",
                format!("must be at least {base} in this plot mode, got {explicit}"),
            ));
        }
        return Ok(explicit);
    }

    Ok(base + style_extra + opts.extra_cols())
}

/// Extra channels requested by a `with` clause.
pub(crate) fn style_channels(style: &str, mode: PlotMode) -> PlotResult<usize> {
    let words: Vec<String> = style
        .split_whitespace()
        .map(|w| w.to_ascii_lowercase())
        .collect();
    let Some(name) = words.first() else {
        return Ok(0);
    };

    let mut extra = 0;
    if let Some(entry) = STYLE_CHANNELS.iter().find(|e| e.name == name.as_str()) {
        let per_mode = if mode.is_3d() {
            entry.three_d
        } else {
            entry.two_d
        };
        extra += per_mode.ok_or_else(|| PlotError::UnsupportedStyle {
            style: entry.name.to_string(),
        })?;
    }

    for (i, w) in words.iter().enumerate().skip(1) {
        let next = words.get(i + 1).map(String::as_str);
        if VARIABLE_PROPS.contains(&w.as_str()) {
            // `lc rgb variable` reads a packed colour per point too.
            let value = match next {
                Some("rgb" | "rgbcolor") => words.get(i + 2).map(String::as_str),
                other => other,
            };
            if value == Some("variable") {
                extra += 1;
            }
        }
        if w == "palette" && !matches!(next, Some("z" | "cb" | "frac")) {
            extra += 1;
        }
    }

    Ok(extra)
}

#[cfg(test)]
#[path = "../../tests/unit/chunk/tuple.rs"]
mod tests;
