//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};
use clap_complete::Shell;

use crate::builder::Shape;
use crate::traversal::{Mode, Order};

/// Binary tree traversal workbench: eight algorithm variants, instrumented and benchmarked
#[derive(Parser, Debug)]
#[command(name = "treelab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-d: info, -dd: debug, -ddd: trace)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Emit shell completions and exit
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,

    /// Print author and version information
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a tree and print it with its shape facts
    Show {
        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Run one traversal variant: visit sequence plus stats
    Run {
        /// Traversal order
        #[arg(value_enum)]
        order: Order,

        /// Recursive or iterative form
        #[arg(short, long, value_enum, default_value_t = Mode::Iterative)]
        mode: Mode,

        /// Suppress the visit sequence, print stats only
        #[arg(short, long)]
        quiet: bool,

        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Time all eight variants once at a single size
    Compare {
        /// Node count
        #[arg(short, long, default_value_t = 100_000)]
        nodes: usize,

        /// Tree shape (default from config)
        #[arg(short, long, value_enum)]
        shape: Option<Shape>,

        /// Runs to average per variant
        #[arg(short, long, default_value_t = 3)]
        repeats: usize,
    },

    /// Benchmark all variants across a size range (chart feed)
    Sweep {
        /// Smallest node count
        #[arg(long)]
        min_nodes: Option<usize>,

        /// Largest node count
        #[arg(long)]
        max_nodes: Option<usize>,

        /// Size increment between runs
        #[arg(long)]
        step: Option<usize>,

        /// Runs to average per variant and size
        #[arg(short, long)]
        repeats: Option<usize>,

        /// Tree shape (default from config)
        #[arg(short, long, value_enum)]
        shape: Option<Shape>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Tree source shared by `show` and `run`: generated by shape and size, or
/// parsed from a preorder token string.
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Node count for generated trees
    #[arg(short, long, default_value_t = 15)]
    pub nodes: usize,

    /// Tree shape (default from config)
    #[arg(short, long, value_enum)]
    pub shape: Option<Shape>,

    /// Preorder token string, '#' marks an absent child (e.g. "1 2 # # 3")
    #[arg(short, long, conflicts_with_all = ["nodes", "shape"])]
    pub tokens: Option<String>,

    /// Seed for random shapes (default from config)
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Text,
    Csv,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
