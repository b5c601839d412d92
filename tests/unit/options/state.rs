use super::*;
use serde_json::json;

fn frag(pairs: &[(&str, serde_json::Value)]) -> OptionFragment {
    OptionFragment {
        entries: pairs
            .iter()
            .map(|(k, v)| (lookup(k).unwrap(), v.clone()))
            .collect(),
        is_map: true,
    }
}

#[test]
fn merge_is_cumulative_and_later_wins() {
    let mut s = OptionState::new();
    s.merge(&frag(&[("with", json!("lines")), ("y2", json!(true))]));
    s.merge(&frag(&[("with", json!("points"))]));
    assert_eq!(s.style(), Some("points"));
    assert!(s.uses_y2());
    assert_eq!(s.len(), 2);
}

#[test]
fn snapshots_are_independent_copies() {
    let mut s = OptionState::new();
    s.merge(&frag(&[("legend", json!("a"))]));
    let snap = s.clone();
    s.remove(LEGEND);
    assert_eq!(snap.legend(), Some("a"));
    assert_eq!(s.legend(), None);
}

#[test]
fn without_legend_keeps_everything_else() {
    let mut s = OptionState::new();
    s.merge(&frag(&[("legend", json!("a")), ("with", json!("lines"))]));
    let stripped = s.without_legend();
    assert!(!stripped.contains(LEGEND));
    assert_eq!(stripped.style(), Some("lines"));
}

#[test]
fn legend_accessors() {
    let mut s = OptionState::new();
    s.merge(&frag(&[("legend", json!(["only"]))]));
    assert_eq!(s.legend(), Some("only"));
    s.merge(&frag(&[("legend", json!(["a", "b"]))]));
    assert_eq!(s.legend(), None);
    assert_eq!(s.legend_list().map(<[_]>::len), Some(2));
}

#[test]
fn typed_getters_default_sensibly() {
    let s = OptionState::new();
    assert_eq!(s.tuple_size(), None);
    assert_eq!(s.extra_cols(), 0);
    assert!(!s.uses_y2());
    assert!(s.is_empty());
}

#[test]
fn from_json_map_enforces_scope() {
    let m = json!({ "title": "t", "xrange": [0, 1] });
    let s = OptionState::from_json_map(m.as_object().unwrap(), OptionScope::Plot).unwrap();
    assert_eq!(s.text("title"), Some("t"));

    let m = json!({ "with": "lines" });
    let err = OptionState::from_json_map(m.as_object().unwrap(), OptionScope::Plot).unwrap_err();
    assert!(matches!(err, PlotError::MisplacedOption { .. }));

    let m = json!({ "colour": "red", "title": "t" });
    let err = OptionState::from_json_map(m.as_object().unwrap(), OptionScope::Plot).unwrap_err();
    assert!(matches!(err, PlotError::UnknownOption { names } if names == vec!["colour"]));
}

#[test]
fn split_by_scope_partitions_entries() {
    let f = OptionFragment {
        entries: vec![
            (lookup("title").unwrap(), json!("t")),
            (lookup("with").unwrap(), json!("lines")),
        ],
        is_map: false,
    };
    assert_eq!(f.scopes(), (true, true));
    let (plot, curve) = f.split_by_scope();
    assert_eq!(plot.entries.len(), 1);
    assert_eq!(plot.entries[0].0.name, "title");
    assert_eq!(curve.entries[0].0.name, "with");
}
