use super::*;
use crate::args::classify::{RawArgument, classify};
use ndarray::{Array2, array};
use serde_json::json;

fn build(args: Vec<RawArgument>, state: &mut OptionState) -> PlotResult<Vec<Chunk>> {
    let (_, segments) = split_plot_options(classify(args)?)?;
    build_chunks(segments, state, PlotMode::TwoD, usize::MAX)
}

fn xs() -> RawArgument {
    array![0.0, 1.0, 2.0].into()
}

#[test]
fn legend_does_not_propagate_but_style_does() {
    let mut state = OptionState::new();
    let chunks = build(
        vec![
            json!({ "with": "a" }).into(),
            xs(),
            json!({ "legend": "x" }).into(),
            xs(),
        ],
        &mut state,
    )
    .unwrap();

    assert_eq!(chunks.len(), 2);
    let c1 = &chunks[0].options()[0];
    assert_eq!(c1.style(), Some("a"));
    assert_eq!(c1.legend(), None);
    let c2 = &chunks[1].options()[0];
    assert_eq!(c2.style(), Some("a"));
    assert_eq!(c2.legend(), Some("x"));
}

#[test]
fn legend_is_cleared_for_the_next_chunk() {
    let mut state = OptionState::new();
    let chunks = build(
        vec![json!({ "legend": "first" }).into(), xs(), json!({ "with": "lines" }).into(), xs()],
        &mut state,
    )
    .unwrap();
    assert_eq!(chunks[0].options()[0].legend(), Some("first"));
    assert_eq!(chunks[1].options()[0].legend(), None);
}

#[test]
fn each_fragment_yields_a_layered_snapshot() {
    let mut state = OptionState::new();
    let y = Array2::<f64>::zeros((3, 2));
    let chunks = build(
        vec![
            json!({ "with": "lines", "legend": "a" }).into(),
            json!({ "y2": true }).into(),
            y.into(),
        ],
        &mut state,
    )
    .unwrap();

    assert_eq!(chunks.len(), 1);
    let opts = chunks[0].options();
    assert_eq!(opts.len(), 2);
    assert_eq!(opts[0].style(), Some("lines"));
    assert_eq!(opts[0].legend(), Some("a"));
    assert!(!opts[0].uses_y2());
    assert_eq!(opts[1].style(), Some("lines"));
    assert_eq!(opts[1].legend(), None);
    assert!(opts[1].uses_y2());
}

#[test]
fn no_options_reuses_cumulative_state() {
    let mut state = OptionState::new();
    let steps = json!({ "with": "steps" });
    state.merge(&crate::args::classify::parse_map(steps.as_object().unwrap()).unwrap());
    let chunks = build(vec![xs()], &mut state).unwrap();
    assert_eq!(chunks[0].options()[0].style(), Some("steps"));
}

#[test]
fn surplus_arrays_start_inherited_chunks() {
    let mut state = OptionState::new();
    let chunks = build(
        vec![json!({ "with": "points", "legend": "L" }).into(), xs(), xs(), xs()],
        &mut state,
    )
    .unwrap();

    // [x, y] then [y] with an implicit domain.
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].data().len(), 2);
    assert_eq!(chunks[1].data().len(), 2);
    assert_eq!(chunks[1].options()[0].style(), Some("points"));
    assert_eq!(chunks[1].options()[0].legend(), None);
}

#[test]
fn surplus_that_cannot_fill_a_tuple_is_an_arity_mismatch() {
    let mut state = OptionState::new();
    let err = build(
        vec![json!({ "tuplesize": 4 }).into(), xs(), xs(), xs(), xs(), xs()],
        &mut state,
    )
    .unwrap_err();
    assert!(matches!(err, PlotError::ArityMismatch { expected: 4, got: 1 }));
}

#[test]
fn single_array_gets_index_domain() {
    let mut state = OptionState::new();
    let chunks = build(vec![array![5.0, 6.0, 7.0, 8.0].into()], &mut state).unwrap();
    let c = &chunks[0];
    assert_eq!(c.tuple_size(), 2);
    assert_eq!(c.curve_count(), 1);
    assert_eq!(c.data()[0], array![0.0, 1.0, 2.0, 3.0].into_dyn());
}

#[test]
fn leading_plot_options_are_split_off() {
    let segs = classify(vec![
        json!({ "title": "T", "3d": false }).into(),
        "xlabel".into(),
        "x".into(),
        "with".into(),
        "lines".into(),
        xs(),
    ])
    .unwrap();
    let (plot, rest) = split_plot_options(segs).unwrap();
    assert_eq!(plot.text("title"), Some("T"));
    assert_eq!(plot.text("xlabel"), Some("x"));

    let mut state = OptionState::new();
    let chunks = build_chunks(rest, &mut state, PlotMode::TwoD, usize::MAX).unwrap();
    assert_eq!(chunks[0].options()[0].style(), Some("lines"));
    assert!(!chunks[0].options()[0].contains("xlabel"));
}

#[test]
fn mixed_mapping_is_rejected() {
    let segs = classify(vec![json!({ "title": "T", "with": "lines" }).into(), xs()]).unwrap();
    let err = split_plot_options(segs).unwrap_err();
    assert!(matches!(err, PlotError::MisplacedOption { ref name, .. } if name == "title"));
}

#[test]
fn plot_option_after_data_is_rejected() {
    let mut state = OptionState::new();
    let err = build(vec![xs(), json!({ "title": "late" }).into(), xs()], &mut state).unwrap_err();
    assert!(err.to_string().starts_with("misplaced option: title"));
}

#[test]
fn trailing_curve_options_are_carried_into_state() {
    let mut state = OptionState::new();
    build(vec![xs(), json!({ "with": "impulses" }).into()], &mut state).unwrap();
    assert_eq!(state.style(), Some("impulses"));
}

#[test]
fn options_without_data_fail() {
    let mut state = OptionState::new();
    assert!(matches!(
        build(vec![json!({ "with": "lines" }).into()], &mut state).unwrap_err(),
        PlotError::NoData
    ));
    assert!(matches!(build(vec![], &mut state).unwrap_err(), PlotError::NoData));
}

#[test]
fn option_snapshots_match_curve_count_after_padding() {
    let mut state = OptionState::new();
    let y = Array2::<f64>::zeros((3, 4));
    let chunks = build(vec![xs(), y.into()], &mut state).unwrap();
    let c = &chunks[0];
    let product: usize = c.curve_dims().iter().product();
    assert_eq!(c.curve_count(), 4);
    assert_eq!(product, c.options().len());
}

#[test]
fn curve_ceiling_applies_across_chunks() {
    let (_, segments) = split_plot_options(
        classify(vec![xs(), Array2::<f64>::zeros((3, 2)).into(), xs(), xs()]).unwrap(),
    )
    .unwrap();
    let mut state = OptionState::new();
    let err = build_chunks(segments, &mut state, PlotMode::TwoD, 2).unwrap_err();
    assert!(matches!(err, PlotError::MaxCurvesExceeded { requested: 3, max: 2 }));
}

#[test]
fn disjoint_broadcast_axes_hit_the_ceiling_before_padding() {
    let args: Vec<RawArgument> = vec![
        PlotArray::zeros(ndarray::IxDyn(&[1, 100_000])).into(),
        PlotArray::zeros(ndarray::IxDyn(&[1, 1, 100_000])).into(),
    ];
    let (_, segments) = split_plot_options(classify(args).unwrap()).unwrap();
    let mut state = OptionState::new();
    let err = build_chunks(segments, &mut state, PlotMode::TwoD, 100).unwrap_err();
    assert!(matches!(
        err,
        PlotError::MaxCurvesExceeded {
            requested: 10_000_000_000,
            max: 100
        }
    ));
}

#[test]
fn rgb_variable_colours_stay_in_the_same_chunk() {
    let mut state = OptionState::new();
    let chunks = build(
        vec![
            json!({ "with": "points lc rgb variable" }).into(),
            xs(),
            xs(),
            array![255.0, 65280.0, 16711680.0].into(),
        ],
        &mut state,
    )
    .unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].tuple_size(), 3);
    assert_eq!(chunks[0].curve_count(), 1);
}
