//! Command-line interface for the mmd-outline utility
//!
//! Derives outlines from single diagram files, builds the combined report
//! for a manifest and dumps extracted graphs for inspection.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use mmd_outline::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use mmd_outline::outline::{extract_graph, DiagramGraph, TreeBuilder};
use mmd_outline::session::{
    Catalog, FsSourceProvider, OutlineSession, NO_AGGREGATE_OUTLINE, NO_OUTLINE,
};
use mmd_outline::{outline_with_style, OutlineNode, OutlineStyle};

/// mmd-outline - Derive text outlines from Mermaid diagram sources
#[derive(Parser)]
#[command(name = "mmd-outline")]
#[command(about = "Derive structured text outlines from Mermaid diagram sources")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Derive the outline of one diagram source
    Outline {
        /// Input file containing the diagram source (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the outline (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Format as a sitemap: single root, direct children as stat blocks
        #[arg(long)]
        sitemap: bool,
    },

    /// Build the combined outline report for every diagram in a manifest
    Aggregate {
        /// JSON manifest listing the diagrams
        #[arg(short, long)]
        manifest: PathBuf,

        /// Directory that diagram file paths are relative to
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Output file for the report (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the extracted graph and forest of a diagram source
    Graph {
        /// Input file containing the diagram source (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List diagrams in aggregation order
    List {
        /// JSON manifest listing the diagrams
        #[arg(short, long)]
        manifest: PathBuf,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Main CLI application
#[derive(Debug, Default)]
pub struct OutlineApp;

impl OutlineApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags
        let log_level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());
        let log_format = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level), Some(&log_format)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("mmd-outline v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Outline {
                input,
                output,
                sitemap,
            } => self.outline_command(input, output, sitemap, cli.verbose),
            Commands::Aggregate {
                manifest,
                root,
                output,
            } => self.aggregate_command(manifest, root, output, cli.verbose),
            Commands::Graph { input, json } => self.graph_command(input, json, cli.verbose),
            Commands::List { manifest, json } => self.list_command(manifest, json),
        }
    }

    /// Handle the outline command
    fn outline_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        sitemap: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let style = if sitemap {
            OutlineStyle::Sitemap
        } else {
            OutlineStyle::Generic
        };
        let outline = outline_with_style(&content, style)?;

        if outline.is_empty() {
            eprintln!("{}", NO_OUTLINE);
            return Ok(());
        }
        self.write_output(output, &outline)
    }

    /// Handle the aggregate command
    fn aggregate_command(
        &self,
        manifest: PathBuf,
        root: PathBuf,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let catalog = Catalog::load(&manifest)
            .map_err(|e| anyhow!("Failed to load manifest '{}': {}", manifest.display(), e))?;

        if verbose {
            eprintln!("Aggregating {} diagrams", catalog.len());
        }

        let session = OutlineSession::new(catalog, Arc::new(FsSourceProvider::new(root)));
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let report = runtime.block_on(session.aggregate_outline())?;

        if report.is_empty() {
            eprintln!("{}", NO_AGGREGATE_OUTLINE);
            return Ok(());
        }
        self.write_output(output, &report)
    }

    /// Handle the graph command
    fn graph_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;
        let graph = extract_graph(&content)?;
        let forest = TreeBuilder::new().build(&graph);

        if verbose {
            eprintln!(
                "Extracted {} nodes and {} edges",
                graph.node_count(),
                graph.edge_count()
            );
        }

        if json {
            let dump = serde_json::json!({
                "graph": graph.to_json(),
                "forest": forest,
            });
            println!("{}", serde_json::to_string_pretty(&dump)?);
        } else {
            print!("{}", describe_graph(&graph, &forest));
        }

        Ok(())
    }

    /// Handle the list command
    fn list_command(&self, manifest: PathBuf, json: bool) -> Result<()> {
        let catalog = Catalog::load(&manifest)
            .map_err(|e| anyhow!("Failed to load manifest '{}': {}", manifest.display(), e))?;

        if json {
            println!("{}", serde_json::to_string_pretty(catalog.diagrams())?);
        } else {
            for (index, diagram) in catalog.diagrams().iter().enumerate() {
                println!(
                    "{:>3}. {} ({}) [{}]",
                    index + 1,
                    diagram.name,
                    diagram.id,
                    diagram.category_or_default()
                );
            }
            println!();
            println!("Total: {} diagrams", catalog.len());
        }

        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout();
                if content.is_empty() || content.ends_with('\n') {
                    write!(stdout, "{}", content)?;
                } else {
                    writeln!(stdout, "{}", content)?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

/// Human-readable dump of the graph maps followed by the forest
fn describe_graph(graph: &DiagramGraph, forest: &[OutlineNode]) -> String {
    let mut lines = vec![format!(
        "Nodes: {}  Edges: {}",
        graph.node_count(),
        graph.edge_count()
    )];

    for id in graph.node_ids() {
        let children = graph.children(id);
        let mut line = format!(
            "  {} [{}] indegree={}",
            id,
            graph.label(id).unwrap_or(id),
            graph.indegree(id)
        );
        if !children.is_empty() {
            line.push_str(&format!(" -> {}", children.join(", ")));
        }
        lines.push(line);
    }

    lines.push(format!("Roots: {}", graph.roots().join(", ")));
    lines.push("Forest:".to_string());
    let mut stack: Vec<(&OutlineNode, usize)> = forest.iter().rev().map(|node| (node, 1)).collect();
    while let Some((node, depth)) = stack.pop() {
        lines.push(format!("{}{}", "  ".repeat(depth), node.label));
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
