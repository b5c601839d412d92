use super::*;
use ndarray::{Array0, array};
use serde_json::json;

fn data_lens(segs: &[Segment]) -> Vec<String> {
    segs.iter()
        .map(|s| match s {
            Segment::Options(f) => format!("o{}", f.len()),
            Segment::Data(d) => format!("d{}", d.len()),
        })
        .collect()
}

#[test]
fn partitions_into_alternating_runs() {
    let args: Vec<RawArgument> = vec![
        json!({ "with": "lines" }).into(),
        array![1.0, 2.0].into(),
        array![3.0, 4.0].into(),
        json!({ "legend": "b" }).into(),
        "y2".into(),
        json!(true).into(),
        array![5.0, 6.0].into(),
    ];
    let segs = classify(args).unwrap();
    assert_eq!(data_lens(&segs), vec!["o1", "d2", "o2", "d1"]);
}

#[test]
fn inline_run_consumes_pairs_until_data() {
    let args: Vec<RawArgument> = vec![
        "with".into(),
        "points".into(),
        "legend".into(),
        "x".into(),
        array![1.0].into(),
    ];
    let segs = classify(args).unwrap();
    let Segment::Options(frags) = &segs[0] else {
        panic!("expected options first");
    };
    assert_eq!(frags.len(), 1);
    assert!(!frags[0].is_map);
    let names: Vec<_> = frags[0].entries.iter().map(|(s, _)| s.name).collect();
    assert_eq!(names, vec!["with", "legend"]);
}

#[test]
fn trailing_key_is_dangling() {
    let args: Vec<RawArgument> = vec![array![1.0].into(), "with".into()];
    let err = classify(args).unwrap_err();
    assert!(matches!(err, PlotError::DanglingOptionKey { ref key } if key == "with"));
}

#[test]
fn key_followed_by_array_is_dangling() {
    let args: Vec<RawArgument> = vec!["legend".into(), array![1.0].into()];
    let err = classify(args).unwrap_err();
    assert!(err.to_string().starts_with("dangling option key: 'legend'"));
}

#[test]
fn unknown_names_are_all_reported() {
    let args: Vec<RawArgument> = vec![
        json!({ "colour": "red", "with": "lines", "lw": 2 }).into(),
        array![1.0].into(),
    ];
    let err = classify(args).unwrap_err();
    match err {
        PlotError::UnknownOption { names } => assert_eq!(names, vec!["colour", "lw"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_string_key_is_rejected() {
    let args: Vec<RawArgument> = vec![json!(5).into(), "x".into(), array![1.0].into()];
    let err = classify(args).unwrap_err();
    assert!(matches!(err, PlotError::UnknownOption { .. }));
}

#[test]
fn values_are_type_checked() {
    let args: Vec<RawArgument> = vec!["tuplesize".into(), "three".into(), array![1.0].into()];
    let err = classify(args).unwrap_err();
    assert!(matches!(err, PlotError::InvalidOptionValue { ref name, .. } if name == "tuplesize"));
}

#[test]
fn mapping_can_be_an_inline_value() {
    // Ranges arrive as JSON lists; objects are accepted positionally but fail the type check.
    let args: Vec<RawArgument> = vec![
        "xrange".into(),
        json!([0, 1]).into(),
        array![1.0].into(),
    ];
    assert!(classify(args).is_ok());

    let args: Vec<RawArgument> = vec!["legend".into(), json!({ "a": 1 }).into(), array![1.0].into()];
    assert!(matches!(
        classify(args).unwrap_err(),
        PlotError::InvalidOptionValue { .. }
    ));
}

#[test]
fn scalar_arrays_become_single_points() {
    let args: Vec<RawArgument> = vec![Array0::from_elem((), 7.0).into()];
    let segs = classify(args).unwrap();
    let Segment::Data(d) = &segs[0] else {
        panic!("expected data");
    };
    assert_eq!(d[0].shape(), &[1]);
    assert_eq!(d[0].as_slice(), Some(&[7.0][..]));
}
