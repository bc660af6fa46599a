//! Tests for the benchmark harness

use rstest::rstest;

use treelab::bench::{compare, render_table, sweep, SweepSpec, VARIANTS};
use treelab::builder::{Shape, TreeBuilder};
use treelab::errors::TreeError;
use treelab::traversal::{Mode, Order};

fn spec(min_nodes: usize, max_nodes: usize, step: usize, repeats: usize) -> SweepSpec {
    SweepSpec {
        min_nodes,
        max_nodes,
        step,
        repeats,
        shape: Shape::Complete,
    }
}

// ============================================================
// Compare Tests
// ============================================================

#[test]
fn given_one_size_when_comparing_then_all_eight_variants_report() {
    let builder = TreeBuilder::new();
    let rows = compare(&builder, 500, Shape::Complete, 2).unwrap();

    assert_eq!(rows.len(), 8);
    for (row, &(order, mode)) in rows.iter().zip(VARIANTS.iter()) {
        assert_eq!(row.n, 500);
        assert_eq!(row.order, order);
        assert_eq!(row.mode, mode);
        assert!(row.min_ms <= row.mean_ms && row.mean_ms <= row.max_ms);
    }
}

#[test]
fn given_comparison_rows_when_inspected_then_aux_structures_match_variant() {
    let builder = TreeBuilder::new();
    let rows = compare(&builder, 500, Shape::Complete, 1).unwrap();

    for row in &rows {
        match (row.order, row.mode) {
            (Order::Level, Mode::Iterative) => {
                assert!(row.max_queue_len > 0);
                assert_eq!(row.max_stack_depth, 0);
            }
            _ => assert_eq!(row.max_queue_len, 0),
        }
    }
}

#[rstest]
#[case(0, 1)]
#[case(1, 0)]
fn given_degenerate_compare_inputs_then_rejected(#[case] n: usize, #[case] repeats: usize) {
    let builder = TreeBuilder::new();
    let err = compare(&builder, n, Shape::Complete, repeats).unwrap_err();
    assert!(matches!(err, TreeError::InvalidSweep(_)));
}

// ============================================================
// Sweep Validation Tests
// ============================================================

#[rstest]
#[case(spec(0, 100, 10, 1))]
#[case(spec(100, 0, 10, 1))]
#[case(spec(100, 200, 0, 1))]
#[case(spec(100, 200, 10, 0))]
#[case(spec(300, 200, 10, 1))]
#[case(spec(100, 200, 150, 1))]
fn given_invalid_spec_when_validated_then_rejected(#[case] spec: SweepSpec) {
    assert!(matches!(spec.validate(), Err(TreeError::InvalidSweep(_))));
}

#[test]
fn given_single_size_spec_when_validated_then_any_step_is_fine() {
    assert!(spec(100, 100, 500, 1).validate().is_ok());
}

// ============================================================
// Sweep Tests
// ============================================================

#[test]
fn given_three_sizes_when_swept_then_twenty_four_rows_in_order() {
    let builder = TreeBuilder::new();
    let report = sweep(&builder, &spec(100, 300, 100, 2)).unwrap();

    assert_eq!(report.rows.len(), 3 * 8);
    let sizes: Vec<usize> = report.rows.iter().map(|r| r.n).collect();
    let mut sorted = sizes.clone();
    sorted.sort();
    assert_eq!(sizes, sorted, "rows are grouped by ascending size");
    assert_eq!(report.shape, Shape::Complete);
}

#[test]
fn given_report_when_rendered_as_csv_then_header_plus_row_lines() {
    let builder = TreeBuilder::new();
    let report = sweep(&builder, &spec(100, 300, 100, 1)).unwrap();

    let csv = report.to_csv();
    let lines: Vec<&str> = csv.trim_end().lines().collect();
    assert_eq!(lines.len(), 1 + 24);
    assert!(lines[0].starts_with("n,order,mode,mean_ms"));
    assert!(lines[1].starts_with("100,preorder,recursive,"));
}

#[test]
fn given_rows_when_rendered_as_table_then_columns_are_labelled() {
    let builder = TreeBuilder::new();
    let rows = compare(&builder, 100, Shape::Complete, 1).unwrap();

    let table = render_table(&rows);
    let header = table.lines().next().unwrap();
    for label in ["n", "order", "mode", "mean ms", "stack", "queue"] {
        assert!(header.contains(label), "missing column {}", label);
    }
    assert_eq!(table.trim_end().lines().count(), 1 + 8);
}
