//! Benchmark harness: single-size comparison and size sweeps across all
//! eight traversal variants. Rows are the feed a chart renderer consumes.

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use itertools::{Itertools, MinMaxResult};
use serde::Serialize;
use tracing::{info, instrument};

use crate::arena::BinaryTree;
use crate::builder::{Shape, TreeBuilder};
use crate::errors::{TreeError, TreeResult};
use crate::traversal::{traverse, Mode, Order};

/// The eight algorithm variants, in report order.
pub const VARIANTS: [(Order, Mode); 8] = [
    (Order::Pre, Mode::Recursive),
    (Order::Pre, Mode::Iterative),
    (Order::In, Mode::Recursive),
    (Order::In, Mode::Iterative),
    (Order::Post, Mode::Recursive),
    (Order::Post, Mode::Iterative),
    (Order::Level, Mode::Recursive),
    (Order::Level, Mode::Iterative),
];

/// A size range to benchmark. `validate` rejects degenerate ranges before
/// any tree is built.
#[derive(Debug, Clone, Serialize)]
pub struct SweepSpec {
    pub min_nodes: usize,
    pub max_nodes: usize,
    pub step: usize,
    pub repeats: usize,
    pub shape: Shape,
}

impl SweepSpec {
    pub fn validate(&self) -> TreeResult<()> {
        if self.min_nodes == 0 || self.max_nodes == 0 {
            return Err(TreeError::InvalidSweep(
                "node counts must be positive".to_string(),
            ));
        }
        if self.step == 0 {
            return Err(TreeError::InvalidSweep("step must be positive".to_string()));
        }
        if self.repeats == 0 {
            return Err(TreeError::InvalidSweep(
                "repeats must be positive".to_string(),
            ));
        }
        if self.min_nodes > self.max_nodes {
            return Err(TreeError::InvalidSweep(format!(
                "min_nodes {} exceeds max_nodes {}",
                self.min_nodes, self.max_nodes
            )));
        }
        if self.min_nodes < self.max_nodes && self.step > self.max_nodes - self.min_nodes {
            return Err(TreeError::InvalidSweep(format!(
                "step {} is larger than the sweep range {}",
                self.step,
                self.max_nodes - self.min_nodes
            )));
        }
        Ok(())
    }

    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        (self.min_nodes..=self.max_nodes).step_by(self.step)
    }
}

/// Aggregated measurements for one variant at one size.
#[derive(Debug, Clone, Serialize)]
pub struct BenchRow {
    pub n: usize,
    pub order: Order,
    pub mode: Mode,
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub max_stack_depth: usize,
    pub max_queue_len: usize,
}

#[derive(Debug)]
pub struct BenchReport {
    pub created: DateTime<Local>,
    pub shape: Shape,
    pub rows: Vec<BenchRow>,
}

impl BenchReport {
    pub fn to_csv(&self) -> String {
        render_csv(&self.rows)
    }

    pub fn to_table(&self) -> String {
        render_table(&self.rows)
    }
}

/// Runs all eight variants against one tree of `n` nodes, `repeats` runs
/// each, and returns a row per variant.
#[instrument(level = "debug", skip(builder))]
pub fn compare(
    builder: &TreeBuilder,
    n: usize,
    shape: Shape,
    repeats: usize,
) -> TreeResult<Vec<BenchRow>> {
    if n == 0 {
        return Err(TreeError::InvalidSweep(
            "node count must be positive".to_string(),
        ));
    }
    if repeats == 0 {
        return Err(TreeError::InvalidSweep(
            "repeats must be positive".to_string(),
        ));
    }

    let tree = builder.build(shape, n)?;
    VARIANTS
        .iter()
        .map(|&(order, mode)| measure(&tree, n, order, mode, repeats))
        .collect()
}

/// Benchmarks every size in the sweep; one tree per size, shared by all
/// variants at that size.
///
/// Recursive variants inherit the engine's recursion limit, so a skewed
/// sweep deeper than that limit fails rather than overflowing.
#[instrument(level = "info", skip(builder))]
pub fn sweep(builder: &TreeBuilder, spec: &SweepSpec) -> TreeResult<BenchReport> {
    spec.validate()?;

    let mut rows = Vec::new();
    for n in spec.sizes() {
        info!(n, "benchmarking");
        let tree = builder.build(spec.shape, n)?;
        for &(order, mode) in VARIANTS.iter() {
            rows.push(measure(&tree, n, order, mode, spec.repeats)?);
        }
    }

    Ok(BenchReport {
        created: Local::now(),
        shape: spec.shape,
        rows,
    })
}

fn measure<V>(
    tree: &BinaryTree<V>,
    n: usize,
    order: Order,
    mode: Mode,
    repeats: usize,
) -> TreeResult<BenchRow> {
    let mut times = Vec::with_capacity(repeats);
    let mut max_stack = 0;
    let mut max_queue = 0;

    for _ in 0..repeats {
        let run = traverse(tree, order, mode)?;
        times.push(run.stats.elapsed_ms());
        max_stack = max_stack.max(run.stats.max_stack_depth);
        max_queue = max_queue.max(run.stats.max_queue_len);
    }

    let mean_ms = times.iter().sum::<f64>() / times.len() as f64;
    let (min_ms, max_ms) = match times.iter().copied().minmax() {
        MinMaxResult::NoElements => (0.0, 0.0),
        MinMaxResult::OneElement(t) => (t, t),
        MinMaxResult::MinMax(lo, hi) => (lo, hi),
    };

    Ok(BenchRow {
        n,
        order,
        mode,
        mean_ms,
        min_ms,
        max_ms,
        max_stack_depth: max_stack,
        max_queue_len: max_queue,
    })
}

pub fn render_csv(rows: &[BenchRow]) -> String {
    let mut out =
        String::from("n,order,mode,mean_ms,min_ms,max_ms,max_stack_depth,max_queue_len\n");
    for row in rows {
        let _ = writeln!(
            out,
            "{},{},{},{:.6},{:.6},{:.6},{},{}",
            row.n,
            row.order,
            row.mode,
            row.mean_ms,
            row.min_ms,
            row.max_ms,
            row.max_stack_depth,
            row.max_queue_len
        );
    }
    out
}

pub fn render_table(rows: &[BenchRow]) -> String {
    let mut out = format!(
        "{:>10}  {:<11} {:<9} {:>10} {:>10} {:>10} {:>9} {:>9}\n",
        "n", "order", "mode", "mean ms", "min ms", "max ms", "stack", "queue"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>10}  {:<11} {:<9} {:>10.3} {:>10.3} {:>10.3} {:>9} {:>9}",
            row.n,
            row.order.to_string(),
            row.mode.to_string(),
            row.mean_ms,
            row.min_ms,
            row.max_ms,
            row.max_stack_depth,
            row.max_queue_len
        );
    }
    out
}
