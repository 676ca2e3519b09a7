//! outliner CLI - document outline extraction and persona ranking

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use outliner::{OutlineConfig, Outliner, PersonaContext, RankConfig};

#[derive(Parser)]
#[command(name = "outliner")]
#[command(version)]
#[command(about = "Extract document outlines and persona-ranked sections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract outlines from documents (.pdf or .json fragment files)
    Outline {
        /// Input file or directory
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory (stdout for a single input if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Rank a document collection's sections for a persona
    Rank {
        /// Collection description JSON (documents, persona, job_to_be_done)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Directory holding the collection's document files
        #[arg(long, value_name = "DIR")]
        pdf_dir: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show version information
    Version,
}

/// Collection description consumed by `rank`.
#[derive(Deserialize)]
struct CollectionSpec {
    documents: Vec<DocumentRef>,
    persona: PersonaSpec,
    job_to_be_done: JobSpec,
}

#[derive(Deserialize)]
struct DocumentRef {
    filename: String,
}

#[derive(Deserialize)]
struct PersonaSpec {
    role: String,
}

#[derive(Deserialize)]
struct JobSpec {
    task: String,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            compact,
            sequential,
        } => cmd_outline(&input, output.as_deref(), compact, sequential),
        Commands::Rank {
            input,
            pdf_dir,
            output,
            compact,
            sequential,
        } => cmd_rank(
            &input,
            pdf_dir.as_deref(),
            output.as_deref(),
            compact,
            sequential,
        ),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_outliner(sequential: bool) -> Outliner {
    let mut config = OutlineConfig::default();
    if sequential {
        config = config.sequential();
    }
    Outliner::new()
        .with_outline_config(config)
        .with_rank_config(RankConfig::default())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let outliner = build_outliner(sequential);
    let inputs = collect_inputs(input)?;

    if inputs.is_empty() {
        return Err(format!("no .pdf or .json inputs under '{}'", input.display()).into());
    }

    // Single file without -o goes to stdout.
    if inputs.len() == 1 && output.is_none() {
        let outline = outliner.outline_file(&inputs[0])?;
        println!("{}", to_json(&outline, compact)?);
        return Ok(());
    }

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("outlines"));
    fs::create_dir_all(&output_dir)?;

    let pb = progress_bar(inputs.len() as u64);
    let mut failures = 0usize;

    for path in &inputs {
        let name = file_name(path);
        pb.set_message(name.clone());
        match outliner.outline_file(path) {
            Ok(outline) => {
                let stem = path.file_stem().unwrap_or_default().to_string_lossy();
                let out_path = output_dir.join(format!("{}.json", stem));
                fs::write(&out_path, to_json(&outline, compact)?)?;
            }
            Err(e) => {
                failures += 1;
                log::warn!("{}: {}", name, e);
                pb.println(format!("{} {}: {}", "Failed".red(), name, e));
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    let processed = inputs.len() - failures;
    println!(
        "\n{} {} outlines written to {}",
        "Done!".green().bold(),
        processed,
        output_dir.display()
    );
    if failures > 0 {
        println!("{} {} inputs failed", "Warning:".yellow().bold(), failures);
    }

    Ok(())
}

fn cmd_rank(
    input: &Path,
    pdf_dir: Option<&Path>,
    output: Option<&Path>,
    compact: bool,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let spec: CollectionSpec = serde_json::from_slice(&fs::read(input)?)?;
    let base_dir = pdf_dir
        .map(|p| p.to_path_buf())
        .or_else(|| input.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    let persona = PersonaContext::build(spec.persona.role, spec.job_to_be_done.task);
    let outliner = build_outliner(sequential);

    let pb = progress_bar(spec.documents.len() as u64);
    pb.set_message("Loading documents...");
    let mut paths = Vec::with_capacity(spec.documents.len());
    for doc in &spec.documents {
        let path = base_dir.join(&doc.filename);
        if !path.exists() {
            return Err(format!("document '{}' not found", path.display()).into());
        }
        paths.push(path);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let path_refs: Vec<&Path> = paths.iter().map(|p| p.as_path()).collect();
    let result = outliner.rank_files(&path_refs, &persona)?;
    let json = to_json(&result, compact)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    println!(
        "{} {} sections ranked across {} documents",
        "Done!".green().bold(),
        result.extracted_sections.len(),
        result.metadata.input_documents.len()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "outliner".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document outline extraction and persona ranking");
}

/// Gather .pdf/.json inputs: a single file as-is, a directory's matching
/// entries sorted by name.
fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(format!("'{}' is not a file or directory", input.display()).into());
    }

    let mut inputs = Vec::new();
    for entry in fs::read_dir(input)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        if matches!(ext.as_deref(), Some("pdf") | Some("json")) {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}
