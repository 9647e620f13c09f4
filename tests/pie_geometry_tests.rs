use std::f64::consts::{FRAC_PI_2, PI, TAU};

use approx::assert_abs_diff_eq;
use chart3d::ChartError;
use chart3d::core::pie::{
    LabelOrientation, SortPolicy, WedgeSpec, build_wedge, explode_offset, label_anchor,
    layout_slices,
};
use chart3d::core::types::ChartItem;
use nalgebra::Point3;

fn items(values: &[(&str, f64)]) -> Vec<ChartItem> {
    values
        .iter()
        .map(|(label, value)| ChartItem::new(*label, *value))
        .collect()
}

#[test]
fn slices_are_contiguous_and_cover_the_circle() {
    let slices = layout_slices(&items(&[("a", 1.0), ("b", 2.0), ("c", 1.0)])).expect("layout");

    assert_abs_diff_eq!(slices[0].start_angle, 0.0);
    assert_abs_diff_eq!(slices[0].sweep_angle, FRAC_PI_2, epsilon = 1e-12);
    assert_abs_diff_eq!(slices[1].start_angle, FRAC_PI_2, epsilon = 1e-12);
    assert_abs_diff_eq!(slices[1].sweep_angle, PI, epsilon = 1e-12);
    assert_abs_diff_eq!(slices[2].end_angle(), TAU, epsilon = 1e-12);
    assert_abs_diff_eq!(slices[1].percentage, 0.5, epsilon = 1e-12);
}

#[test]
fn zero_total_is_an_aggregate_error() {
    let err = layout_slices(&items(&[("a", 0.0), ("b", 0.0)])).expect_err("zero total");
    assert!(matches!(err, ChartError::ZeroTotal));
    assert!(err.is_aggregate_error());
}

#[test]
fn empty_items_have_nothing_to_render() {
    let err = layout_slices(&[]).expect_err("no rows");
    assert!(matches!(err, ChartError::NoValidRows));
}

#[test]
fn wedge_vertex_and_face_counts() {
    let slices = layout_slices(&items(&[("a", 1.0), ("b", 3.0)])).expect("layout");
    let n = 8;
    let mesh = build_wedge(WedgeSpec::for_slice(&slices[0], 2.0, 0.5, n)).expect("wedge");

    assert_eq!(mesh.vertices.len(), 2 + 2 * (n + 1));
    let quads = mesh.faces.iter().filter(|face| face.len() == 4).count();
    // n side quads plus two radial caps
    assert_eq!(quads, n + 2);
    assert_eq!(mesh.faces.len(), n + 4);
    mesh.validate().expect("valid mesh");
}

#[test]
fn single_item_is_a_seamless_full_circle() {
    let slices = layout_slices(&items(&[("only", 5.0)])).expect("layout");
    assert!(slices[0].is_full_circle());

    let n = 16;
    let mesh = build_wedge(WedgeSpec::for_slice(&slices[0], 1.0, 1.0, n)).expect("wedge");
    assert_eq!(mesh.faces.len(), n + 2);
    assert_eq!(mesh.vertices.len(), 2 + 2 * (n + 1));
}

#[test]
fn base_fan_winds_opposite_to_top_fan() {
    let slices = layout_slices(&items(&[("a", 1.0), ("b", 1.0)])).expect("layout");
    let mesh = build_wedge(WedgeSpec::for_slice(&slices[0], 1.0, 1.0, 4)).expect("wedge");

    let base = &mesh.faces[0];
    let top = &mesh.faces[1];
    assert_eq!(base[0], 0);
    assert_eq!(top[0], 1);
    // base walks the rim backwards, top forwards
    assert!(base[1] > base[2]);
    assert!(top[1] < top[2]);
    assert!(base.iter().skip(1).all(|&v| mesh.vertices[v].z == 0.0));
    assert!(top.iter().skip(1).all(|&v| mesh.vertices[v].z == 1.0));
}

#[test]
fn zero_subdivisions_are_rejected() {
    let slices = layout_slices(&items(&[("a", 1.0)])).expect("layout");
    assert!(build_wedge(WedgeSpec::for_slice(&slices[0], 1.0, 1.0, 0)).is_err());
}

#[test]
fn explode_offsets_along_the_mid_angle() {
    let slices = layout_slices(&items(&[("a", 1.0), ("b", 1.0)])).expect("layout");
    // first slice spans [0, pi], mid-angle pi/2
    let offset = explode_offset(&slices[0], 2.0, 0.5);
    assert_abs_diff_eq!(offset, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);

    let none = explode_offset(&slices[1], 2.0, 0.0);
    assert_abs_diff_eq!(none, Point3::origin(), epsilon = 1e-12);
}

#[test]
fn label_anchor_orientation() {
    let slices = layout_slices(&items(&[("a", 1.0), ("b", 1.0)])).expect("layout");

    let (location, radial) = label_anchor(&slices[1], 2.0, 0.5, 0.5, LabelOrientation::Radial);
    // second slice mid-angle is 3pi/2
    assert_abs_diff_eq!(location, Point3::new(0.0, -2.5, 0.25), epsilon = 1e-12);
    assert_abs_diff_eq!(radial.x, FRAC_PI_2);
    assert_abs_diff_eq!(radial.z, 1.5 * PI + FRAC_PI_2, epsilon = 1e-12);

    let (_, horizontal) =
        label_anchor(&slices[1], 2.0, 0.5, 0.5, LabelOrientation::Horizontal);
    assert_abs_diff_eq!(horizontal.z, 0.0);
}

#[test]
fn sorting_changes_order_not_the_algorithm() {
    let mut sorted = items(&[("b", 1.0), ("c", 5.0), ("a", 2.0)]);
    SortPolicy::ValueDescending.apply(&mut sorted);
    let slices = layout_slices(&sorted).expect("layout");
    assert_eq!(slices[0].label, "c");
    assert_abs_diff_eq!(slices[0].start_angle, 0.0);
    assert_abs_diff_eq!(
        slices[1].start_angle,
        slices[0].sweep_angle,
        epsilon = 1e-12
    );

    let mut by_label = items(&[("b", 1.0), ("c", 5.0), ("a", 2.0)]);
    SortPolicy::LabelAscending.apply(&mut by_label);
    let labels: Vec<_> = by_label.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, ["a", "b", "c"]);
}
