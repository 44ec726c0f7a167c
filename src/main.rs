use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use miette::{Context, IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

use truckstat_core::{ContributionDocument, OutputFormat, TruckConfig, TruckError};
use truckstat_report::ReportRenderer;

const CONFIG_FILE: &str = ".truckstat.toml";

#[derive(Parser)]
#[command(
    name = "truckstat",
    version,
    about = "Contribution analytics for annotated source trees",
    long_about = "truckstat turns a contribution export (a JSON source tree annotated with\n\
                   authorship, size, and commit metadata) into a Markdown or JSON report:\n\
                   project statistics, per-author rollups, collaboration pairs, and\n\
                   architecture findings.\n\n\
                   Examples:\n  \
                     truckstat report contributions.json            Write contributions_summary.md\n  \
                     truckstat report data.json -o out.md --print   Write out.md and print it\n  \
                     truckstat --format json report data.json       Write data_summary.json\n  \
                     truckstat init                                 Create a default .truckstat.toml"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (default: .truckstat.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for the report.\n\n\
                       Formats:\n  \
                         text  Markdown summary (default)\n  \
                         json  Machine-readable JSON with camelCase keys"
    )]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a contribution export and write a summary report
    #[command(long_about = "Analyze a contribution export and write a summary report.\n\n\
        The input is a JSON document with a top-level `simplifiedTree`. The report is\n\
        written next to the input as <stem>_summary.md (or _summary.json with\n\
        --format json) unless --output is given. Nothing is written if the input\n\
        cannot be loaded.\n\n\
        Examples:\n  truckstat report contributions.json\n  truckstat report contributions.json --structure --print")]
    Report {
        /// Contribution export to analyze
        input: PathBuf,

        /// Output file (default: <input stem>_summary.md)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Also print the report to stdout
        #[arg(long)]
        print: bool,

        /// Append the project-structure tree to the text report
        #[arg(long)]
        structure: bool,
    },
    /// Create a default .truckstat.toml configuration file
    Init,
    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

const DEFAULT_CONFIG: &str = r#"# truckstat configuration

[analysis]
# Files changed after this Unix timestamp count as recent activity
# recent_threshold = 1700000000

[report]
# Entries in the biggest / most changed file highlights
# top_files = 5
# Directories in the structure summary
# top_directories = 8
# File types in the technology section
# top_file_types = 10
# Collaboration pairs listed
# top_pairs = 5
# Shared files highlighted per collaboration pair
# shared_files_per_pair = 3
# Entries in each per-author list
# author_top_entries = 5
# Work areas listed per author
# author_top_directories = 8
# Append the project-structure tree to text reports
# include_structure = false
"#;

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    human_panic::setup_panic!();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Report {
            ref input,
            ref output,
            print,
            structure,
        } => {
            let doc = load_document(input)?;
            tracing::info!(input = %input.display(), "document loaded");

            let report = truckstat_pulse::analyze(&doc, &config.analysis);
            let rendered = match cli.format {
                OutputFormat::Text => {
                    let tree = if structure || config.report.include_structure {
                        doc.simplified_tree.as_ref()
                    } else {
                        None
                    };
                    ReportRenderer::new(&report, &config.report)
                        .with_structure(tree)
                        .render()
                }
                OutputFormat::Json => truckstat_report::render_json(&report).into_diagnostic()?,
            };

            let output_path = output
                .clone()
                .unwrap_or_else(|| default_output_path(input, cli.format));
            std::fs::write(&output_path, &rendered)
                .into_diagnostic()
                .wrap_err_with(|| format!("failed to write {}", output_path.display()))?;
            tracing::info!(
                output = %output_path.display(),
                bytes = rendered.len(),
                "report written"
            );

            eprintln!("Summary written to {}", output_path.display());
            if print {
                print!("{rendered}");
            }
        }
        Command::Init => {
            let path = Path::new(CONFIG_FILE);
            if path.exists() {
                miette::bail!("{CONFIG_FILE} already exists");
            }
            std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
            println!("Created {CONFIG_FILE} with default configuration");
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "truckstat", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<TruckConfig> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let default_path = Path::new(CONFIG_FILE);
            if !default_path.exists() {
                return Ok(TruckConfig::default());
            }
            default_path
        }
    };
    tracing::debug!(path = %path.display(), "loading configuration");
    TruckConfig::from_file(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to load configuration from {}", path.display()))
}

fn load_document(path: &Path) -> Result<ContributionDocument> {
    ContributionDocument::from_file(path).map_err(|err| match &err {
        TruckError::FileNotFound(_) => miette::miette!(
            help = "Pass the path of a contribution export, \
                    e.g. truckstat report contributions.json",
            "{err}"
        ),
        TruckError::Malformed { .. } => miette::miette!(
            help = "The input must be a JSON object with a `simplifiedTree` key",
            "{err}"
        ),
        other => miette::miette!("{other}"),
    })
}

/// `<input without extension><suffix>`, next to the input.
fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let mut name = input.with_extension("").into_os_string();
    name.push(format.default_suffix());
    PathBuf::from(name)
}
