//! Violation Normalizer CLI
//!
//! Command-line interface for normalizing constraint violation lists.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use violation_normalizer::{
    load_config, load_violations, ConstraintViolationList, ConstraintViolationListNormalizer,
    NameConverterError, NameConverterKind, NormalizerConfig, FORMAT,
};

#[derive(Parser)]
#[command(name = "violation-normalizer")]
#[command(about = "Normalize constraint violation lists into error records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a JSON array of violations
    Normalize {
        /// Violations file (JSON array)
        violations: PathBuf,

        /// Normalizer config file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Payload field to expose (repeatable; default: all fields)
        #[arg(long = "payload-field", conflicts_with = "no_payload")]
        payload_fields: Vec<String>,

        /// Never expose constraint payloads
        #[arg(long)]
        no_payload: bool,

        /// Name converter for property paths (snake_case)
        #[arg(long)]
        name_converter: Option<String>,

        /// Output format
        #[arg(long, default_value = FORMAT)]
        format: String,

        /// Wrap records in a problem-details envelope
        #[arg(long)]
        report: bool,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

struct NormalizeArgs {
    violations: PathBuf,
    config: Option<PathBuf>,
    payload_fields: Vec<String>,
    no_payload: bool,
    name_converter: Option<String>,
    format: String,
    report: bool,
    output: Option<PathBuf>,
    pretty: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Normalize {
            violations,
            config,
            payload_fields,
            no_payload,
            name_converter,
            format,
            report,
            output,
            pretty,
        } => run_normalize(NormalizeArgs {
            violations,
            config,
            payload_fields,
            no_payload,
            name_converter,
            format,
            report,
            output,
            pretty,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run_normalize(args: NormalizeArgs) -> Result<(), u8> {
    let mut config = match &args.config {
        Some(path) => load_config(path).map_err(|e| {
            eprintln!("Error loading config: {}", e);
            e.exit_code() as u8
        })?,
        None => NormalizerConfig::default(),
    };

    // Flags override the config file
    if args.no_payload {
        config.payload_fields = Some(Vec::new());
    } else if !args.payload_fields.is_empty() {
        config.payload_fields = Some(args.payload_fields);
    }

    if let Some(name) = &args.name_converter {
        let kind = NameConverterKind::parse(name).ok_or_else(|| {
            eprintln!(
                "Error: unknown name converter \"{}\": expected snake_case",
                name
            );
            2u8
        })?;
        config.name_converter = Some(kind);
    }

    let list = load_violations(&args.violations).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let normalizer = config.build();
    if !normalizer.supports(&list, Some(args.format.as_str())) {
        eprintln!(
            "Error: unsupported format \"{}\": expected {}",
            args.format, FORMAT
        );
        return Err(2);
    }

    tracing::info!(violations = list.len(), report = args.report, "normalizing");

    let output = render(&normalizer, &list, args.report, args.pretty)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}

fn render(
    normalizer: &ConstraintViolationListNormalizer,
    list: &ConstraintViolationList,
    report: bool,
    pretty: bool,
) -> Result<String, u8> {
    let normalize_failed = |e: NameConverterError| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    };
    let serialize_failed = |e: serde_json::Error| {
        eprintln!("Error serializing output: {}", e);
        2u8
    };

    let value = if report {
        serde_json::to_value(normalizer.normalize_report(list).map_err(normalize_failed)?)
    } else {
        serde_json::to_value(normalizer.normalize(list).map_err(normalize_failed)?)
    }
    .map_err(serialize_failed)?;

    if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .map_err(serialize_failed)
}
