//! # mesh_cli
//!
//! Command line front end of `mesh_core`: imports a legacy input file,
//! renumbers it and writes it again, or reports what it contains.
//!
//! ## Commands
//!
//! - `mesh_cli renumber <INPUT> -o <OUTPUT>` - Import and re-export a file
//! - `mesh_cli summary <INPUT> [--json]` - Print item counts and sections
//!
//! Log output goes to stderr; set `RUST_LOG` or pass `-v` for more detail.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use mesh_core::{InputFile, MeshError, MeshResult, MeshSettings, MeshSummary};

/// Renumber and inspect beam input files
#[derive(Parser)]
#[command(name = "mesh_cli")]
#[command(about = "Renumber and inspect beam input files", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON settings file (section width, import mode, maintainer, ...)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import an input file, renumber all items and write it again
    Renumber {
        /// The input file to read
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Where to write the renumbered file
        #[arg(short, long)]
        output: PathBuf,

        /// Do not write the generated header block
        #[arg(long)]
        no_header: bool,
    },

    /// Print the item counts and generic sections of an input file
    Summary {
        /// The input file to read
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Output of the `summary` command
#[derive(Debug, Serialize)]
struct SummaryReport {
    file: String,
    #[serde(flatten)]
    counts: MeshSummary,
    sections: Vec<String>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn load_settings(path: Option<&Path>) -> MeshResult<MeshSettings> {
    match path {
        Some(path) => MeshSettings::load(path),
        None => Ok(MeshSettings::default()),
    }
}

fn read_input(path: &Path, settings: MeshSettings) -> MeshResult<InputFile> {
    let mut input = InputFile::new(settings);
    input.read_dat(path)?;
    Ok(input)
}

fn renumber(input: &Path, output: &Path, header: bool, settings: MeshSettings) -> MeshResult<()> {
    let file = read_input(input, settings)?;
    file.write(output, header)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn summary(input: &Path, json: bool, settings: MeshSettings) -> MeshResult<()> {
    let file = read_input(input, settings)?;
    let report = SummaryReport {
        file: input.display().to_string(),
        counts: file.mesh().summary(),
        sections: file.sections().iter().map(|s| s.name().to_string()).collect(),
    };

    if json {
        let text = serde_json::to_string_pretty(&report).map_err(MeshError::from)?;
        println!("{}", text);
        return Ok(());
    }

    let counts = &report.counts;
    println!("{}", report.file);
    println!("  nodes:               {}", counts.nodes);
    println!("  elements:            {}", counts.elements);
    println!("  materials:           {}", counts.materials);
    println!("  functions:           {}", counts.functions);
    println!("  couplings:           {}", counts.couplings);
    println!("  geometry sets:       {}", counts.geometry_sets);
    println!("  boundary conditions: {}", counts.boundary_conditions);
    if !report.sections.is_empty() {
        println!("  sections:");
        for name in &report.sections {
            println!("    {}", name);
        }
    }
    Ok(())
}

fn run(cli: Cli) -> MeshResult<()> {
    let settings = load_settings(cli.settings.as_deref())?;
    match cli.command {
        Commands::Renumber {
            input,
            output,
            no_header,
        } => renumber(&input, &output, !no_header, settings),
        Commands::Summary { input, json } => summary(&input, json, settings),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error [{}]: {}", e.error_code(), e);
            ExitCode::FAILURE
        }
    }
}
