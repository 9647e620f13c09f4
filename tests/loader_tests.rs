use chart3d::ChartError;
use chart3d::core::loader::{
    ColumnRef, ColumnRequirement, CsvTable, load, load_label_value, load_records,
};
use chart3d::core::types::RowIssue;

fn table(csv: &str) -> CsvTable {
    CsvTable::from_reader(csv.as_bytes()).expect("csv table")
}

#[test]
fn label_value_rows_keep_input_order_and_skip_bad_rows() {
    let table = table(
        "Category,Sales\n\
         Rent,1200\n\
         Food,abc\n\
         Travel,-5\n\
         Fun,\n\
         Books,300\n",
    );

    let report = load_label_value(&table, "Category", "Sales").expect("load");
    let labels: Vec<_> = report.items.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, ["Rent", "Books"]);
    assert!((report.items[0].value - 1200.0).abs() <= 1e-9);

    let lines: Vec<_> = report.warnings.iter().map(|warning| warning.line).collect();
    assert_eq!(lines, [3, 4, 5]);
    assert!(matches!(report.warnings[0].issue, RowIssue::NonNumeric { .. }));
    assert!(matches!(report.warnings[1].issue, RowIssue::NegativeValue { .. }));
    assert!(matches!(report.warnings[2].issue, RowIssue::MissingCell { .. }));
}

#[test]
fn short_row_is_a_row_level_issue() {
    let table = table("name,value\na,1\nb\n");
    let report = load_label_value(&table, "name", "value").expect("load");
    assert_eq!(report.items.len(), 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].to_string(), "row 3: missing cell for column `value`");
}

#[test]
fn missing_named_column_is_a_schema_error() {
    let table = table("name,value\na,1\n");
    let err = load_label_value(&table, "name", "amount").expect_err("missing column");
    assert!(err.is_schema_error());
    match err {
        ChartError::MissingColumn { name, available } => {
            assert_eq!(name, "amount");
            assert_eq!(available, ["name", "value"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn index_requirements_are_checked_before_any_row() {
    let table = table("a,b\n1,2\n");
    let err = load_records(&table, &[ColumnRequirement::numeric(ColumnRef::Index(5))])
        .expect_err("out of range");
    assert!(matches!(
        err,
        ChartError::ColumnIndexOutOfRange {
            index: 5,
            column_count: 2,
            ..
        }
    ));
}

#[test]
fn numeric_requirements_never_substitute_defaults() {
    let table = table("x,y,label\n1,2,a\nnope,3,b\n4, 5 ,c\n");
    let report = load_records(
        &table,
        &[
            ColumnRequirement::numeric(ColumnRef::Index(0)),
            ColumnRequirement::numeric(ColumnRef::Name("y".to_owned())),
            ColumnRequirement::text(ColumnRef::Name("label".to_owned())),
        ],
    )
    .expect("load");

    assert_eq!(report.items.len(), 2);
    assert_eq!(report.items[1]["y"], "5");
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].line, 3);
}

#[test]
fn load_reports_io_error_with_path() {
    let err = load("/definitely/not/here.csv", &[]).expect_err("io error");
    assert!(err.is_schema_error());
    assert!(err.to_string().contains("/definitely/not/here.csv"));
}

#[test]
fn load_reads_from_disk() {
    let path = std::env::temp_dir().join(format!("chart3d_loader_{}.csv", std::process::id()));
    std::fs::write(&path, "label,value\nx,1\ny,2\n").expect("write csv");

    let report = load(
        &path,
        &[ColumnRequirement::numeric(ColumnRef::Name("value".to_owned()))],
    )
    .expect("load");
    std::fs::remove_file(&path).expect("cleanup");

    assert_eq!(report.items.len(), 2);
    assert_eq!(report.items[0]["label"], "x");
}

#[test]
fn preview_returns_first_rows_and_total() {
    let table = table("a\n1\n2\n3\n4\n5\n6\n7\n");
    let preview = table.preview(5);
    assert_eq!(preview.header, ["a"]);
    assert_eq!(preview.rows.len(), 5);
    assert_eq!(preview.rows[4], ["5"]);
    assert_eq!(preview.total_rows, 7);
}
