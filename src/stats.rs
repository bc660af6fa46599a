//! Run instrumentation: visit counts and auxiliary-structure peaks.

use std::fmt;
use std::mem;
use std::time::Duration;

use generational_arena::Index;
use serde::Serialize;

/// Measurements captured while one traversal runs.
///
/// Peaks are sampled during the run, not derived from the tree shape:
/// `max_stack_depth` covers both the explicit stack of the iterative DFS
/// forms and the call depth of the recursive forms, `max_queue_len` the
/// level-order queue. `aux_bytes` is a lower-bound estimate of auxiliary
/// memory (recursive call frames are larger than one index per level).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TraversalStats {
    pub elapsed: Duration,
    pub nodes_visited: usize,
    pub max_stack_depth: usize,
    pub max_queue_len: usize,
    pub aux_bytes: usize,
}

impl TraversalStats {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1e3
    }
}

impl fmt::Display for TraversalStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes in {:.3} ms | peak stack {} | peak queue {} | ~{} aux bytes",
            self.nodes_visited,
            self.elapsed_ms(),
            self.max_stack_depth,
            self.max_queue_len,
            self.aux_bytes
        )
    }
}

/// Accumulates measurements during a traversal, sealed by [`Recorder::finish`].
#[derive(Debug, Default)]
pub struct Recorder {
    nodes_visited: usize,
    max_stack_depth: usize,
    max_queue_len: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visit(&mut self) {
        self.nodes_visited += 1;
    }

    pub fn stack_depth(&mut self, depth: usize) {
        if depth > self.max_stack_depth {
            self.max_stack_depth = depth;
        }
    }

    pub fn queue_len(&mut self, len: usize) {
        if len > self.max_queue_len {
            self.max_queue_len = len;
        }
    }

    pub fn finish(self, elapsed: Duration) -> TraversalStats {
        let peak = self.max_stack_depth.max(self.max_queue_len);
        TraversalStats {
            elapsed,
            nodes_visited: self.nodes_visited,
            max_stack_depth: self.max_stack_depth,
            max_queue_len: self.max_queue_len,
            aux_bytes: peak * mem::size_of::<Index>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_peaks_not_last_values() {
        let mut rec = Recorder::new();
        rec.stack_depth(2);
        rec.stack_depth(5);
        rec.stack_depth(1);
        rec.queue_len(3);
        rec.queue_len(2);
        rec.visit();
        rec.visit();

        let stats = rec.finish(Duration::from_millis(1));
        assert_eq!(stats.max_stack_depth, 5);
        assert_eq!(stats.max_queue_len, 3);
        assert_eq!(stats.nodes_visited, 2);
        assert_eq!(stats.aux_bytes, 5 * mem::size_of::<Index>());
    }

    #[test]
    fn empty_recorder_seals_to_zeroes() {
        let stats = Recorder::new().finish(Duration::ZERO);
        assert_eq!(stats, TraversalStats::default());
    }
}
