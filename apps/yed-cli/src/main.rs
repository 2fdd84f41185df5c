use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use yed_graph::Graph;
use yed_graphml::{GraphFile, SaveOptions};

mod error;

use error::{AppError, AppResult};

#[derive(Parser)]
#[command(name = "yed")]
#[command(about = "yEd GraphML builder - build, inspect and normalize .graphml files", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a GraphML file from a YAML or JSON description
    Build {
        /// Path to the description file
        description: PathBuf,
        /// Output GraphML file (`.graphml` is appended when missing)
        #[arg(short, long)]
        output: PathBuf,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
        /// Replace an existing output file
        #[arg(long)]
        overwrite: bool,
    },
    /// Print node, group and edge counts of a GraphML file
    Stats {
        /// Path to the GraphML file
        file: PathBuf,
    },
    /// Rewrite a GraphML file indented
    Pretty {
        /// Path to the GraphML file
        file: PathBuf,
        /// Output file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Replace an existing output file
        #[arg(long)]
        overwrite: bool,
    },
    /// Parse, validate and round-trip a GraphML file
    Check {
        /// Path to the GraphML file
        file: PathBuf,
    },
    /// Export a GraphML file as a description
    Export {
        /// Path to the GraphML file
        file: PathBuf,
        /// Output description (`.json` for JSON, YAML otherwise)
        #[arg(short, long)]
        output: PathBuf,
        /// Replace an existing output file
        #[arg(long)]
        overwrite: bool,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            description,
            output,
            pretty,
            overwrite,
        } => cmd_build(&description, &output, SaveOptions { pretty, overwrite }),
        Commands::Stats { file } => cmd_stats(&file),
        Commands::Pretty {
            file,
            output,
            overwrite,
        } => cmd_pretty(&file, output.as_deref(), overwrite),
        Commands::Check { file } => cmd_check(&file),
        Commands::Export {
            file,
            output,
            overwrite,
        } => cmd_export(&file, &output, overwrite),
    }
}

fn load(path: &Path) -> AppResult<Graph> {
    Ok(yed_graphml::load(&GraphFile::existing(path))?)
}

fn cmd_build(description: &Path, output: &Path, options: SaveOptions) -> AppResult<()> {
    let def = yed_project::load_def(description)?;
    let file = GraphFile::new(Some(output));
    let graph = yed_project::write_graphml(&def, &file, options)?;
    println!(
        "✓ Wrote {} ({} nodes, {} edges)",
        file.path().display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(())
}

fn cmd_stats(path: &Path) -> AppResult<()> {
    let graph = load(path)?;
    let stats = graph.stats();
    println!("{}", path.display());
    println!("  Nodes: {}", stats.all_nodes.len());
    println!("  Groups: {}", stats.all_groups.len());
    println!("  Edges: {}", stats.all_edges.len());
    println!("  Max depth: {}", stats.max_depth);
    println!("  Custom properties: {}", graph.custom_properties().len());
    Ok(())
}

fn cmd_pretty(path: &Path, output: Option<&Path>, overwrite: bool) -> AppResult<()> {
    let graph = load(path)?;
    match output {
        Some(output) => {
            let file = GraphFile::new(Some(output));
            let options = SaveOptions {
                pretty: true,
                overwrite,
            };
            yed_graphml::save(&graph, &file, options)?;
            info!(path = %file.path().display(), "wrote pretty GraphML");
        }
        None => {
            let text = yed_graphml::to_graphml_pretty(&graph)?;
            io::stdout().write_all(text.as_bytes())?;
        }
    }
    Ok(())
}

fn cmd_check(path: &Path) -> AppResult<()> {
    let graph = load(path)?;
    graph.validate()?;
    let text = yed_graphml::to_graphml(&graph)?;
    let again = yed_graphml::from_graphml(&text)?;

    let before = graph.stats();
    let after = again.stats();
    for (what, before, after) in [
        ("nodes", before.all_nodes.len(), after.all_nodes.len()),
        ("groups", before.all_groups.len(), after.all_groups.len()),
        ("edges", before.all_edges.len(), after.all_edges.len()),
    ] {
        if before != after {
            return Err(AppError::Check {
                what,
                before,
                after,
            });
        }
    }
    println!("✓ {} is valid ({})", path.display(), before.summary());
    Ok(())
}

fn cmd_export(path: &Path, output: &Path, overwrite: bool) -> AppResult<()> {
    if output.exists() && !overwrite {
        return Err(AppError::OutputExists {
            path: output.to_path_buf(),
        });
    }
    let def = yed_project::describe_graphml(&GraphFile::existing(path))?;
    yed_project::save_def(output, &def)?;
    println!("✓ Exported {} to {}", path.display(), output.display());
    Ok(())
}
