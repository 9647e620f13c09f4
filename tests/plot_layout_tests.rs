use approx::assert_abs_diff_eq;
use chart3d::ChartError;
use chart3d::api::{PlotOptions, PlotPreset};
use chart3d::core::color::{Color, ColorGradient};
use chart3d::core::geometry::PrimitiveKind;
use chart3d::core::loader::CsvTable;
use chart3d::core::plot::{AxisSpec, MIN_PRIMITIVE_SCALE, build_plot};
use chart3d::core::types::RowIssue;
use nalgebra::{Point3, Vector3};

fn table(csv: &str) -> CsvTable {
    CsvTable::from_reader(csv.as_bytes()).expect("csv table")
}

#[test]
fn bar_chart_places_cubes_on_category_slots() {
    let table = table("fruit,count\napple,4\npear,2\napple,6\n");
    let layout = build_plot(&table, &PlotOptions::bar_chart(0, 1).plot_spec()).expect("layout");

    assert_eq!(layout.primitives.len(), 3);
    let apple = &layout.primitives[0];
    assert_eq!(apple.kind, PrimitiveKind::Cube);
    assert_eq!(apple.name, "CSV_CUBE_1");
    assert_abs_diff_eq!(
        apple.transform.location,
        Point3::new(0.0, 0.0, 2.0),
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        apple.transform.scale,
        Vector3::new(1.0, 1.0, 4.0),
        epsilon = 1e-12
    );
    // second distinct category lands one spacing further
    assert_abs_diff_eq!(layout.primitives[1].transform.location.x, 2.0);
    assert_abs_diff_eq!(layout.primitives[2].transform.location.x, 0.0);

    assert_eq!(layout.categories.x.len(), 2);
    let texts: Vec<_> = layout.labels.iter().map(|label| label.text.as_str()).collect();
    assert_eq!(texts, ["apple", "pear"]);
    assert_abs_diff_eq!(
        layout.labels[1].location,
        Point3::new(2.0, -0.5, -0.5),
        epsilon = 1e-12
    );

    let axis = layout.axis_line.expect("axis line");
    assert_eq!(axis.mesh.edges, vec![[0, 1]]);
    assert_abs_diff_eq!(axis.mesh.vertices[0].x, -0.5);
    assert_abs_diff_eq!(axis.mesh.vertices[1].x, 2.5);
}

#[test]
fn bar_chart_alternates_colors_by_emitted_index() {
    let table = table("k,v\na,1\nb,oops\nc,2\nd,3\n");
    let layout = build_plot(&table, &PlotOptions::bar_chart(0, 1).plot_spec()).expect("layout");

    let colors: Vec<_> = layout
        .primitives
        .iter()
        .map(|primitive| primitive.color.expect("color"))
        .collect();
    let a = Color::rgb(0.2, 0.4, 0.8);
    let b = Color::rgb(0.8, 0.2, 0.4);
    assert_eq!(colors, [a, b, a]);
    assert_eq!(layout.warnings.len(), 1);
    assert_eq!(layout.warnings[0].line, 3);
}

#[test]
fn non_positive_scale_is_clamped_not_zeroed() {
    let table = table("k,v\na,0\nb,-3\n");
    let layout = build_plot(&table, &PlotOptions::bar_chart(0, 1).plot_spec()).expect("layout");
    for primitive in &layout.primitives {
        assert_abs_diff_eq!(primitive.transform.scale.z, MIN_PRIMITIVE_SCALE);
    }
}

#[test]
fn scatter_uses_numeric_axes_and_skips_bad_rows() {
    let table = table("x,y,z\n1,2,3\n4,five,6\n-1,0.5,2\n");
    let layout =
        build_plot(&table, &PlotOptions::scatter_3d(0, 1, 2).plot_spec()).expect("layout");

    assert_eq!(layout.primitives.len(), 2);
    let first = &layout.primitives[0];
    assert_eq!(first.kind, PrimitiveKind::Sphere);
    assert_abs_diff_eq!(
        first.transform.location,
        Point3::new(1.0, 2.0, 3.0),
        epsilon = 1e-12
    );
    assert_eq!(first.color, None);
    assert!(layout.labels.is_empty());
    assert!(layout.axis_line.is_none());
    assert!(matches!(
        layout.warnings[0].issue,
        RowIssue::NonNumeric { ref column, .. } if column == "y"
    ));
}

#[test]
fn skipped_rows_do_not_consume_category_slots() {
    let table = table("label,size\nbad,x\ngood,1\n");
    let layout = build_plot(&table, &PlotOptions::bar_chart(0, 1).plot_spec()).expect("layout");
    assert_eq!(layout.categories.x.get("bad"), None);
    assert_eq!(layout.categories.x.get("good"), Some(0));
}

#[test]
fn color_column_maps_through_the_gradient() {
    let table = table("x,heat\n0,10\n1,20\n2,15\n");
    let options = PlotOptions::new(
        AxisSpec::Numeric { column: 0 },
        AxisSpec::Constant { value: 0.0 },
        AxisSpec::Constant { value: 0.0 },
    )
    .with_color_column(Some(1));
    let layout = build_plot(&table, &options.plot_spec()).expect("layout");

    let range = layout.color_range.expect("range");
    assert_abs_diff_eq!(range.min, 10.0);
    assert_abs_diff_eq!(range.max, 20.0);

    let gradient = ColorGradient::default();
    assert_eq!(layout.primitives[0].color, Some(gradient.low));
    assert_eq!(layout.primitives[1].color, Some(gradient.high));
    let middle = layout.primitives[2].color.expect("middle");
    assert_abs_diff_eq!(middle.red, 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(middle.blue, 0.5, epsilon = 1e-12);
}

#[test]
fn zero_range_color_column_downgrades_to_alternating() {
    let table = table("label,value,heat\na,1,7\nb,2,7\n");
    let black = Color::rgb(0.0, 0.0, 0.0);
    let options = PlotOptions::bar_chart(0, 1).with_alternating_colors(Color::WHITE, black);
    let options = PlotOptions {
        color_column: Some(2),
        preset: PlotPreset::Custom,
        ..options
    };
    let layout = build_plot(&table, &options.plot_spec()).expect("layout");

    assert!(layout.color_range.is_none());
    assert_eq!(layout.primitives.len(), 2);
    assert_eq!(layout.primitives[0].color, Some(Color::WHITE));
    assert_eq!(layout.primitives[1].color, Some(black));
}

#[test]
fn missing_color_samples_disable_mapping_without_skipping_rows() {
    let table = table("x,heat\n0,n/a\n1,\n");
    let options = PlotOptions::new(
        AxisSpec::Numeric { column: 0 },
        AxisSpec::Constant { value: 0.0 },
        AxisSpec::Constant { value: 0.0 },
    )
    .with_color_column(Some(1));
    let layout = build_plot(&table, &options.plot_spec()).expect("layout");
    assert_eq!(layout.primitives.len(), 2);
    assert!(layout.color_range.is_none());
    assert!(layout.warnings.is_empty());
}

#[test]
fn all_rows_invalid_is_an_aggregate_error() {
    let table = table("x,y,z\na,b,c\n");
    let err = build_plot(&table, &PlotOptions::scatter_3d(0, 1, 2).plot_spec())
        .expect_err("no valid rows");
    assert!(matches!(err, ChartError::NoValidRows));
}

#[test]
fn out_of_range_column_index_is_a_schema_error() {
    let table = table("x,y\n1,2\n");
    let err = build_plot(&table, &PlotOptions::scatter_3d(0, 1, 2).plot_spec())
        .expect_err("schema");
    assert!(matches!(
        err,
        ChartError::ColumnIndexOutOfRange { role: "Z", index: 2, .. }
    ));
}

#[test]
fn y_offset_shifts_primitives_labels_and_axis() {
    let table = table("k,v\na,1\n");
    let options = PlotOptions::bar_chart(0, 1).with_y_offset(3.0);
    let spec = PlotOptions {
        preset: PlotPreset::Custom,
        ..options
    }
    .plot_spec();
    let layout = build_plot(&table, &spec).expect("layout");

    assert_abs_diff_eq!(layout.primitives[0].transform.location.y, 3.0);
    assert_abs_diff_eq!(layout.labels[0].location.y, 2.5);
    assert_abs_diff_eq!(layout.axis_line.expect("axis").location.y, 3.0);
}
