use crate::chunk::builder::Chunk;
use crate::foundation::core::PlotMode;
use crate::foundation::error::{PlotError, PlotResult};
use crate::options::state::OptionState;
use serde_json::Value;

const LABELS: &[&str] = &["xlabel", "ylabel", "zlabel", "y2label", "cblabel"];
const RANGES: &[&str] = &["xrange", "yrange", "zrange", "y2range", "cbrange"];

/// Render the full engine instruction for one call.
///
/// Pure: the output depends only on the plot options, the mode and the resolved chunks.
pub(crate) fn render_command(
    plot: &OptionState,
    mode: PlotMode,
    chunks: &[Chunk],
) -> PlotResult<String> {
    let mut lines = Vec::<String>::new();

    let uses_y2 = chunks
        .iter()
        .flat_map(|c| c.options())
        .any(OptionState::uses_y2);
    if uses_y2 {
        if mode.is_3d() {
            return Err(PlotError::UnsupportedStyle {
                style: "y2".to_string(),
            });
        }
        lines.push("set ytics nomirror".to_string());
        lines.push("set y2tics".to_string());
    }

    render_plot_directives(plot, &mut lines);

    let clauses: Vec<String> = chunks
        .iter()
        .flat_map(|c| c.options().iter().map(move |o| render_clause(o, c.tuple_size())))
        .collect();
    lines.push(format!("{} {}", mode.verb(), clauses.join(", ")));

    Ok(lines.join("\n"))
}

fn render_plot_directives(plot: &OptionState, lines: &mut Vec<String>) {
    if let Some(title) = plot.text("title") {
        lines.push(format!("set title {}", quote(title)));
    }
    for &name in LABELS {
        if let Some(label) = plot.text(name) {
            lines.push(format!("set {name} {}", quote(label)));
        }
    }
    for &name in RANGES {
        if let Some(bounds) = plot.get(name).and_then(Value::as_array) {
            lines.push(format!(
                "set {name} [{}:{}]",
                range_bound(bounds.first()),
                range_bound(bounds.get(1))
            ));
        }
    }
    if let Some(axes) = plot.text("logscale") {
        lines.push(format!("set logscale {axes}"));
    }
    if plot.flag("grid") {
        lines.push("set grid".to_string());
    }
    if plot.flag("square") {
        lines.push("set size square".to_string());
    }
    match plot.get("extracmds") {
        Some(Value::String(cmd)) => lines.push(cmd.clone()),
        Some(Value::Array(cmds)) => {
            lines.extend(cmds.iter().filter_map(Value::as_str).map(str::to_string));
        }
        _ => {}
    }
}

/// One comma-separated curve clause.
pub(crate) fn render_clause(opts: &OptionState, tuple_size: usize) -> String {
    let using = (1..=tuple_size)
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(":");
    let mut clause = format!("'-' using {using}");

    match opts.legend() {
        Some(legend) => {
            clause.push_str(" title ");
            clause.push_str(&quote(legend));
        }
        None => clause.push_str(" notitle"),
    }
    if let Some(style) = opts.style() {
        clause.push_str(" with ");
        clause.push_str(style.trim());
    }
    if opts.uses_y2() {
        clause.push_str(" axes x1y2");
    }
    clause
}

fn range_bound(v: Option<&Value>) -> String {
    match v.and_then(Value::as_f64) {
        Some(x) => x.to_string(),
        None => "*".to_string(),
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            // A raw line break would end the command inside the string.
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
#[path = "../../tests/unit/emit/command.rs"]
mod tests;
