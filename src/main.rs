//! scopegen - Main Entry Point
//!
//! Loads a tree description, collects the signal nodes below a chosen node,
//! and writes a dwscope `.dat` file showing all of them.
//!
//! Usage: `scopegen --tree magnetics.json --root .probes --output probes`

use anyhow::Context;
use clap::Parser;
use scopegen::{
    discover, emit_tree_scope, DiscoverOptions, MemoryTree, ScopeConfig, ScopeOptions, SignalTree,
    TreeNode,
};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "scopegen", version)]
#[command(about = "Generate a dwscope layout for every signal node below a tree node")]
struct Args {
    /// Tree description file (JSON, or TOML with a .toml extension)
    #[arg(long)]
    tree: PathBuf,

    /// Node to search below (absolute, or relative to the default node)
    #[arg(long)]
    root: Option<String>,

    /// Output base name; ".dat" is appended
    #[arg(short, long, default_value = "all_sigs")]
    output: PathBuf,

    /// Default node written into the scope (defaults to the tree's default node)
    #[arg(long)]
    default_node: Option<String>,

    /// Include signal nodes named "raw"
    #[arg(long)]
    include_raw: bool,

    /// Include signal nodes that are turned off
    #[arg(long)]
    include_off: bool,

    /// Maximum rows per column
    #[arg(long)]
    max_rows: Option<usize>,

    /// Scope window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Scope window height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Plot signals without smoothing
    #[arg(long)]
    no_smooth: bool,

    /// Smoothing window in samples
    #[arg(long)]
    smooth_window: Option<u32>,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the discovered signals instead of writing a scope
    #[arg(long)]
    list: bool,
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,scopegen=debug")),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Layer command line flags over the loaded config.
fn apply_overrides(args: &Args, discover: &mut DiscoverOptions, options: &mut ScopeOptions) {
    discover.include_raw |= args.include_raw;
    discover.include_off |= args.include_off;

    if let Some(max_rows) = args.max_rows {
        options.max_rows = max_rows;
    }
    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(height) = args.height {
        options.height = height;
    }
    // Window only; --no-smooth and the config decide whether smoothing is on
    if let Some(window) = args.smooth_window {
        options.smoothing.window = window;
    }
    if args.no_smooth {
        options.smoothing.enabled = false;
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = init_logging(args.log_file.as_deref())?;

    let config = match &args.config {
        Some(path) => ScopeConfig::load(path)?,
        None => ScopeConfig::load_or_default(None),
    };

    let mut discover_options = config.discover_options();
    let mut options = config.scope_options();
    apply_overrides(&args, &mut discover_options, &mut options);

    let tree = MemoryTree::load(&args.tree)?;

    let root = match &args.root {
        Some(path) => tree
            .find(path)
            .with_context(|| format!("Node not found in {}: {}", tree.name(), path))?,
        None => tree.top(),
    };
    let default_node = match &args.default_node {
        Some(path) => Some(
            tree.find(path)
                .with_context(|| format!("Default node not found in {}: {}", tree.name(), path))?,
        ),
        None => None,
    };

    let signals = discover(&root, discover_options);
    tracing::info!("Found {} signal(s) below {}", signals.len(), root.full_path());

    if args.list {
        for signal in &signals {
            println!("{}", signal.full_path());
        }
        return Ok(());
    }

    let summary = emit_tree_scope(&tree, &args.output, &signals, default_node, &options)?;
    println!("{} complete!", summary.path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopegen::Smoothing;

    fn parse(flags: &[&str]) -> Args {
        let mut argv = vec!["scopegen", "--tree", "mag.json"];
        argv.extend_from_slice(flags);
        Args::parse_from(argv)
    }

    #[test]
    fn test_smooth_window_keeps_config_disabled() {
        let mut discover = DiscoverOptions::default();
        let mut options = ScopeOptions::default().with_smoothing(Smoothing::disabled());

        apply_overrides(&parse(&["--smooth-window", "25"]), &mut discover, &mut options);
        assert!(!options.smoothing.enabled);
        assert_eq!(options.smoothing.window, 25);
    }

    #[test]
    fn test_smooth_window_on_enabled_config() {
        let mut discover = DiscoverOptions::default();
        let mut options = ScopeOptions::default();

        apply_overrides(&parse(&["--smooth-window", "25"]), &mut discover, &mut options);
        assert_eq!(options.smoothing, Smoothing::window(25));

        apply_overrides(&parse(&["--no-smooth"]), &mut discover, &mut options);
        assert!(!options.smoothing.enabled);
    }

    #[test]
    fn test_flag_overrides() {
        let mut discover = DiscoverOptions::default();
        let mut options = ScopeOptions::default();

        apply_overrides(
            &parse(&["--include-raw", "--max-rows", "4", "--width", "1600"]),
            &mut discover,
            &mut options,
        );
        assert!(discover.include_raw);
        assert!(!discover.include_off);
        assert_eq!(options.max_rows, 4);
        assert_eq!(options.width, 1600);
        assert_eq!(options.height, scopegen::scope::DEFAULT_HEIGHT);
    }
}
