// crates/settings-gen-cli/src/main.rs
// ============================================================================
// Module: Settings Generator CLI Entry Point
// Description: Command dispatcher for schema validation and code generation.
// Purpose: Provide the thin entry point and file I/O around the generator
//          core.
// Dependencies: clap, settings-gen-core, thiserror
// ============================================================================

//! ## Overview
//! The CLI validates a schema table (`check`) or renders all four generated
//! artifacts into an output directory (`generate`). All fatal schema errors
//! terminate the run with a non-zero status before any artifact is written;
//! warnings go to stderr and generation continues.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use settings_gen_core::Preambles;
use settings_gen_core::SchemaError;
use settings_gen_core::SettingsGenerator;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Output file name for the legacy registration/conversion source.
const LEGACY_SOURCE_FILE: &str = "legacy-settings.cc";

/// Output file name for the structured-model source.
const MODEL_SOURCE_FILE: &str = "settings-model.rs";

/// Output file name for the legacy-style documentation.
const LEGACY_DOCS_FILE: &str = "settings-legacy.rst";

/// Output file name for the structured-style documentation.
const STRUCTURED_DOCS_FILE: &str = "settings-structured.rst";

// ============================================================================
// SECTION: Command Definitions
// ============================================================================

/// Schema-driven settings code generator.
#[derive(Parser, Debug)]
#[command(name = "settings-gen", version, about = "Schema-driven settings code generator")]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a schema table without generating artifacts.
    Check(CheckCommand),
    /// Generate all artifacts from a schema table.
    Generate(GenerateCommand),
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Path to the schema table (JSON).
    #[arg(long)]
    schema: PathBuf,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
struct GenerateCommand {
    /// Path to the schema table (JSON).
    #[arg(long)]
    schema: PathBuf,
    /// Directory the generated artifacts are written into.
    #[arg(long)]
    out_dir: PathBuf,
    /// Preamble file included at the top of the structured-model source.
    #[arg(long)]
    model_preamble: Option<PathBuf>,
    /// Preamble file included inside the structured-model bridge module.
    #[arg(long)]
    bridge_preamble: Option<PathBuf>,
    /// Preamble file included at the top of the legacy-style docs.
    #[arg(long)]
    legacy_docs_preamble: Option<PathBuf>,
    /// Preamble file included at the top of the structured-style docs.
    #[arg(long)]
    structured_docs_preamble: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Message emitted to stderr before the failure exit.
    message: String,
}

impl CliError {
    /// Creates an error from a user-facing message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<SchemaError> for CliError {
    fn from(err: SchemaError) -> Self {
        Self::new(err.to_string())
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Check(command) => command_check(&command),
        Commands::Generate(command) => command_generate(&command),
    }
}

// ============================================================================
// SECTION: Check Command
// ============================================================================

/// Executes the `check` command.
fn command_check(command: &CheckCommand) -> CliResult<ExitCode> {
    let generator = SettingsGenerator::load(&command.schema)?;
    emit_warnings(&generator)?;
    let count = generator.schema().settings().len();
    write_stdout_line(&format!("schema ok: {count} settings"))
        .map_err(|err| CliError::new(format!("failed to write to stdout: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Generate Command
// ============================================================================

/// Executes the `generate` command.
fn command_generate(command: &GenerateCommand) -> CliResult<ExitCode> {
    let schema = settings_gen_core::ValidatedSchema::load(&command.schema)?;
    let preambles = Preambles {
        model: read_preamble(command.model_preamble.as_deref())?,
        bridge: read_preamble(command.bridge_preamble.as_deref())?,
        legacy_docs: read_preamble(command.legacy_docs_preamble.as_deref())?,
        structured_docs: read_preamble(command.structured_docs_preamble.as_deref())?,
    };
    let generator = SettingsGenerator::new(schema, preambles);
    emit_warnings(&generator)?;

    fs::create_dir_all(&command.out_dir)
        .map_err(|err| CliError::new(format!("failed to create output directory: {err}")))?;
    write_artifact(&command.out_dir, LEGACY_SOURCE_FILE, &generator.generate_legacy())?;
    write_artifact(&command.out_dir, MODEL_SOURCE_FILE, &generator.generate_model())?;
    write_artifact(&command.out_dir, LEGACY_DOCS_FILE, &generator.generate_legacy_docs())?;
    write_artifact(
        &command.out_dir,
        STRUCTURED_DOCS_FILE,
        &generator.generate_structured_docs(),
    )?;
    Ok(ExitCode::SUCCESS)
}

/// Reads an optional preamble file, defaulting to an empty block.
fn read_preamble(path: Option<&Path>) -> CliResult<String> {
    let Some(path) = path else {
        return Ok(String::new());
    };
    fs::read_to_string(path).map_err(|err| {
        CliError::new(format!("failed to read preamble {}: {err}", path.display()))
    })
}

/// Writes one generated artifact into the output directory.
fn write_artifact(out_dir: &Path, file_name: &str, content: &str) -> CliResult<()> {
    let path = out_dir.join(file_name);
    fs::write(&path, content)
        .map_err(|err| CliError::new(format!("failed to write {}: {err}", path.display())))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Emits validation warnings to stderr without stopping the run.
fn emit_warnings(generator: &SettingsGenerator) -> CliResult<()> {
    for warning in generator.schema().warnings() {
        write_stderr_line(&format!("warning: {warning}"))
            .map_err(|err| CliError::new(format!("failed to write to stderr: {err}")))?;
    }
    Ok(())
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
