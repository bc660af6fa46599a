use std::fs;
use std::path::PathBuf;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::arena::BinaryTree;
use crate::bench::{self, SweepSpec};
use crate::builder::{Shape, TreeBuilder};
use crate::cli::args::{Cli, Commands, ConfigCommands, Format, TreeArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings, LOCAL_CONFIG};
use crate::errors::TreeError;
use crate::parser::parse_preorder;
use crate::traversal::{traverse, Mode, Order};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load()?;

    match &cli.command {
        Some(Commands::Show { tree }) => _show(tree, &settings),
        Some(Commands::Run {
            order,
            mode,
            quiet,
            tree,
        }) => _run(*order, *mode, *quiet, tree, &settings),
        Some(Commands::Compare {
            nodes,
            shape,
            repeats,
        }) => _compare(*nodes, *shape, *repeats, &settings),
        Some(Commands::Sweep {
            min_nodes,
            max_nodes,
            step,
            repeats,
            shape,
            format,
            output,
        }) => _sweep(
            SweepSpec {
                min_nodes: min_nodes.unwrap_or(settings.sweep.min_nodes),
                max_nodes: max_nodes.unwrap_or(settings.sweep.max_nodes),
                step: step.unwrap_or(settings.sweep.step),
                repeats: repeats.unwrap_or(settings.sweep.repeats),
                shape: shape.unwrap_or(settings.shape),
            },
            *format,
            output.as_deref(),
            &settings,
        ),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => _config_show(),
            ConfigCommands::Init { global } => _config_init(*global),
            ConfigCommands::Path => _config_path(),
        },
        // Completion is handled in main via --generate as well
        Some(Commands::Completion { shell }) => {
            crate::cli::print_completions(*shell);
            Ok(())
        }
        None => Ok(()),
    }
}

/// Builds the tree a command operates on: parsed from tokens when given,
/// generated otherwise.
fn build_tree(args: &TreeArgs, settings: &Settings) -> CliResult<BinaryTree<i64>> {
    if let Some(tokens) = &args.tokens {
        return Ok(parse_preorder(tokens)?);
    }
    let shape = args.shape.unwrap_or(settings.shape);
    let builder = TreeBuilder::with_seed(args.seed.unwrap_or(settings.seed));
    Ok(builder.build(shape, args.nodes)?)
}

/// Rendering is for eyeballing small trees; anything larger gets facts only.
const MAX_RENDER_NODES: usize = 1 << 10;

#[instrument(skip(settings))]
fn _show(args: &TreeArgs, settings: &Settings) -> CliResult<()> {
    let tree = build_tree(args, settings)?;
    if tree.len() > MAX_RENDER_NODES {
        output::detail(&format!(
            "(rendering skipped above {} nodes)",
            MAX_RENDER_NODES
        ));
    } else {
        match tree.to_termtree() {
            Some(rendered) => output::info(&rendered),
            None => output::detail("(empty tree)"),
        }
    }
    output::detail(&format!(
        "{} nodes, height {}, {} leaves",
        tree.len(),
        tree.height(),
        tree.leaf_values().len()
    ));
    Ok(())
}

#[instrument(skip(settings))]
fn _run(
    order: Order,
    mode: Mode,
    quiet: bool,
    args: &TreeArgs,
    settings: &Settings,
) -> CliResult<()> {
    let tree = build_tree(args, settings)?;
    debug!("{} nodes, height {}", tree.len(), tree.height());

    let run = traverse(&tree, order, mode)?;
    output::header(&format!("{} {}", run.order, run.mode));
    if !quiet {
        output::info(&run.values(&tree).iter().join(" "));
    }
    output::detail(&run.stats);
    Ok(())
}

#[instrument(skip(settings))]
fn _compare(
    nodes: usize,
    shape: Option<Shape>,
    repeats: usize,
    settings: &Settings,
) -> CliResult<()> {
    let shape = shape.unwrap_or(settings.shape);
    let builder = TreeBuilder::with_seed(settings.seed);
    let rows = bench::compare(&builder, nodes, shape, repeats)?;

    output::header(&format!(
        "{} nodes, {} shape, {} repeats",
        nodes, shape, repeats
    ));
    output::info(&bench::render_table(&rows));
    Ok(())
}

#[instrument(skip(settings))]
fn _sweep(
    spec: SweepSpec,
    format: Format,
    output_path: Option<&std::path::Path>,
    settings: &Settings,
) -> CliResult<()> {
    let builder = TreeBuilder::with_seed(settings.seed);
    let report = bench::sweep(&builder, &spec)?;

    let rendered = match format {
        Format::Text => format!(
            "sweep {}..={} step {} | {} shape | {} repeats | {}\n{}",
            spec.min_nodes,
            spec.max_nodes,
            spec.step,
            report.shape,
            spec.repeats,
            report.created.format("%Y-%m-%d %H:%M:%S"),
            report.to_table()
        ),
        Format::Csv => report.to_csv(),
    };

    match output_path {
        Some(path) => {
            fs::write(path, rendered)?;
            output::success(&format!("report written to {}", path.display()));
        }
        None => output::info(&rendered),
    }
    Ok(())
}

fn _config_show() -> CliResult<()> {
    let settings = Settings::load()?;
    let rendered = toml::to_string_pretty(&settings).map_err(TreeError::Render)?;
    output::info(&rendered);
    Ok(())
}

fn _config_init(global: bool) -> CliResult<()> {
    let path = if global {
        let Some(path) = global_config_path() else {
            return Err(CliError::InvalidArgs(
                "cannot determine global config directory".to_string(),
            ));
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        path
    } else {
        PathBuf::from(LOCAL_CONFIG)
    };

    if path.exists() {
        return Err(CliError::InvalidArgs(format!(
            "{} already exists",
            path.display()
        )));
    }
    fs::write(&path, Settings::template()?)?;
    output::success(&format!("wrote {}", path.display()));
    Ok(())
}

fn _config_path() -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::detail(&format!(
            "global: {}{}",
            path.display(),
            if path.exists() { "" } else { " (absent)" }
        )),
        None => output::detail("global: unavailable"),
    }
    let local = PathBuf::from(LOCAL_CONFIG);
    output::detail(&format!(
        "local:  {}{}",
        local.display(),
        if local.exists() { "" } else { " (absent)" }
    ));
    Ok(())
}
