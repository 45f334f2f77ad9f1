//! Korvax CLI - Command-line tool for No Man's Sky property markup conversion.
//!
//! This is the main entry point for the Korvax command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use korvax::prelude::*;

/// Korvax - No Man's Sky property markup converter
#[derive(Parser)]
#[command(name = "korvax")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert property markup to JSON
    Json {
        /// Input .mxml/.exml file, or a directory to convert recursively
        #[arg(short, long)]
        input: PathBuf,

        /// Output file or directory (defaults to "<template>.json" beside the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,

        #[command(flatten)]
        opts: ParseOpts,
    },

    /// Re-save property markup, or convert a JSON dump back to markup
    Mxml {
        /// Input markup or JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output markup file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        opts: ParseOpts,
    },

    /// Print every leaf value of a document as one delimited line
    Flatten {
        /// Input markup file
        #[arg(short, long)]
        input: PathBuf,

        /// Top-level separator
        #[arg(long, default_value = ";")]
        sep1: String,

        /// Nested separator
        #[arg(long, default_value = ",")]
        sep2: String,

        #[command(flatten)]
        opts: ParseOpts,
    },
}

/// Parse options shared by every subcommand.
#[derive(Args, Clone, Copy)]
struct ParseOpts {
    /// Cast values to typed scalars instead of keeping strings
    #[arg(long)]
    cast: bool,

    /// Key _id-bearing sections by their id
    #[arg(long)]
    use_id: bool,

    /// Markup dialect (defaults by input extension)
    #[arg(long, value_enum)]
    dialect: Option<DialectArg>,

    /// Maximum nesting depth
    #[arg(long, default_value_t = 128)]
    max_depth: usize,
}

#[derive(Copy, Clone, ValueEnum)]
enum DialectArg {
    Exml,
    Mxml,
}

impl ParseOpts {
    fn options_for(&self, input: &Path) -> DictOptions {
        let dialect = match self.dialect {
            Some(DialectArg::Exml) => Dialect::EXML,
            Some(DialectArg::Mxml) => Dialect::MXML,
            None => match input.extension().and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("exml") => Dialect::EXML,
                _ => Dialect::MXML,
            },
        };

        DictOptions::new()
            .with_dialect(dialect)
            .with_casting(self.cast)
            .with_use_id(self.use_id)
            .with_max_depth(self.max_depth)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Json { input, output, pretty, opts } => {
            if input.is_dir() {
                cmd_json_dir(&input, output.as_deref(), pretty, opts)?;
            } else {
                cmd_json_file(&input, output.as_deref(), pretty, opts)?;
            }
        }
        Commands::Mxml { input, output, opts } => {
            cmd_mxml(&input, &output, opts)?;
        }
        Commands::Flatten { input, sep1, sep2, opts } => {
            cmd_flatten(&input, &sep1, &sep2, opts)?;
        }
    }

    Ok(())
}

fn is_markup_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("mxml") || ext.eq_ignore_ascii_case("exml")
    )
}

fn cmd_json_file(input: &Path, output: Option<&Path>, pretty: bool, opts: ParseOpts) -> Result<()> {
    let dict = PropertyDict::from_file(input, opts.options_for(input))
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    if dict.is_empty() {
        eprintln!("Warning: {} has no data, nothing written", input.display());
        return Ok(());
    }

    // Default output name comes from the document's template
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let stem = dict
                .template()
                .map(str::to_string)
                .unwrap_or_else(|| input.file_stem().unwrap_or_default().to_string_lossy().into_owned());
            input.with_file_name(format!("{stem}.json"))
        }
    };

    let json = if pretty {
        dict.to_json_string_pretty()?
    } else {
        dict.to_json_string()?
    };
    fs::write(&output, json).with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Converted: {} -> {}", input.display(), output.display());

    Ok(())
}

fn cmd_json_dir(input: &Path, output: Option<&Path>, pretty: bool, opts: ParseOpts) -> Result<()> {
    let output = output.unwrap_or(input);

    let files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_markup_file(e.path()))
        .map(|e| e.into_path())
        .collect();

    println!("Converting {} documents to {}...", files.len(), output.display());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut converted = 0;
    let mut errors = 0;

    for path in &files {
        let rel = path.strip_prefix(input).unwrap_or(path);
        let target = output.join(rel).with_extension("json");

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        match convert_to_json(path, &target, pretty, opts) {
            Ok(()) => converted += 1,
            Err(e) => {
                eprintln!("Error converting {}: {}", path.display(), e);
                errors += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!(
        "Converted {} documents in {:?} ({} errors)",
        converted,
        start.elapsed(),
        errors
    );

    Ok(())
}

fn convert_to_json(input: &Path, target: &Path, pretty: bool, opts: ParseOpts) -> Result<()> {
    let dict = PropertyDict::from_file(input, opts.options_for(input))?;
    let json = if pretty {
        dict.to_json_string_pretty()?
    } else {
        dict.to_json_string()?
    };
    fs::write(target, json)?;
    Ok(())
}

fn cmd_mxml(input: &Path, output: &Path, opts: ParseOpts) -> Result<()> {
    println!("Converting: {} -> {}", input.display(), output.display());

    let from_json = matches!(
        input.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("json")
    );

    let dict = if from_json {
        let text = fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        let value: serde_json::Value =
            serde_json::from_str(&text).context("Failed to parse input as JSON")?;
        let object = value.as_object().context("JSON root must be an object")?;

        let mut dict = PropertyDict::new(opts.options_for(output));
        dict.merge(object).context("Failed to import JSON")?;
        dict
    } else {
        PropertyDict::from_file(input, opts.options_for(input))
            .with_context(|| format!("Failed to parse {}", input.display()))?
    };

    match dict.write_mxml(output) {
        Err(korvax::dict::Error::EmptyDict) => {
            eprintln!("Warning: {} has no data, nothing written", input.display());
        }
        other => other.with_context(|| format!("Failed to write {}", output.display()))?,
    }

    println!("Conversion complete");

    Ok(())
}

fn cmd_flatten(input: &Path, sep1: &str, sep2: &str, opts: ParseOpts) -> Result<()> {
    let dict = PropertyDict::from_file(input, opts.options_for(input))
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    match dict.one_liner_with(sep1, sep2) {
        Some(line) => println!("{line}"),
        None => println!("(empty document)"),
    }

    Ok(())
}
