//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use wordhtml_ast::Warnings;
use wordhtml_core::{ConversionOptions, Settings};

#[derive(Parser)]
#[command(name = "wordhtml")]
#[command(author, version, about = "Convert Word documents to semantic HTML", long_about = None)]
struct Cli {
    /// Log progress to stderr (RUST_LOG overrides the level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a DOCX file to an HTML fragment
    Convert(ConvertArgs),

    /// Print the document tree read from a DOCX file as JSON
    Tree {
        /// Input DOCX file
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract the raw text of a DOCX file
    Text {
        /// Input DOCX file
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Arguments of the convert command
#[derive(Debug, Clone, Default, Args)]
pub struct ConvertArgs {
    /// Input DOCX file
    pub input: PathBuf,

    /// Output HTML file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML file with conversion settings and style map rules
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Prefix for generated note, comment and bookmark ids
    #[arg(long)]
    pub id_prefix: Option<String>,

    /// Keep paragraphs with no content as empty <p> elements
    #[arg(long)]
    pub preserve_empty_paragraphs: bool,

    /// Use only the rules from --config, without the built-in style map
    #[arg(long)]
    pub no_default_style_map: bool,
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert(args) => convert_command(&args),
        Commands::Tree { input, output } => tree_command(&input, output.as_deref()),
        Commands::Text { input, output } => text_command(&input, output.as_deref()),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    // A subscriber may already be installed when running inside tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .try_init();
}

/// Execute the convert command
pub fn convert_command(args: &ConvertArgs) -> Result<()> {
    ensure_exists(&args.input)?;
    let options = build_options(args)?;

    let result = wordhtml_core::convert_docx(&args.input, &options)
        .with_context(|| format!("Failed to convert: {}", args.input.display()))?;
    report_warnings(&result.warnings);
    info!(
        input = %args.input.display(),
        warnings = result.warnings.len(),
        "conversion complete"
    );

    write_output(args.output.as_deref(), &result.value)
}

/// Execute the tree command
pub fn tree_command(input: &Path, output: Option<&Path>) -> Result<()> {
    ensure_exists(input)?;
    let read = wordhtml_ooxml::read_docx_file(input)
        .with_context(|| format!("Failed to read DOCX file: {}", input.display()))?;

    let warnings: Vec<&str> = read.warnings.iter().collect();
    let tree = serde_json::json!({
        "document": read.value,
        "warnings": warnings,
    });
    let json = serde_json::to_string_pretty(&tree).context("Failed to serialize document tree")?;

    write_output(output, &json)
}

/// Execute the text command
pub fn text_command(input: &Path, output: Option<&Path>) -> Result<()> {
    ensure_exists(input)?;
    let result = wordhtml_core::extract_docx_raw_text(input)
        .with_context(|| format!("Failed to extract text: {}", input.display()))?;
    report_warnings(&result.warnings);

    write_output(output, &result.value)
}

fn build_options(args: &ConvertArgs) -> Result<ConversionOptions> {
    let mut options = match &args.config {
        Some(path) => Settings::load(path)
            .and_then(|settings| settings.to_options())
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ConversionOptions::default(),
    };

    if let Some(prefix) = &args.id_prefix {
        options = options.id_prefix(prefix.clone());
    }
    if args.preserve_empty_paragraphs {
        options = options.preserve_empty_paragraphs(true);
    }
    if args.no_default_style_map {
        options = options.without_default_style_map();
    }

    Ok(options)
}

fn ensure_exists(input: &Path) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    Ok(())
}

fn report_warnings(warnings: &Warnings) {
    for warning in warnings.iter() {
        eprintln!("warning: {}", warning);
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|_| stdout.write_all(b"\n"))
                .context("Failed to write to stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert_flags() {
        let cli = Cli::try_parse_from([
            "wordhtml",
            "--verbose",
            "convert",
            "in.docx",
            "-o",
            "out.html",
            "--id-prefix",
            "doc-",
            "--no-default-style-map",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert command");
        };
        assert_eq!(args.input, PathBuf::from("in.docx"));
        assert_eq!(args.output, Some(PathBuf::from("out.html")));
        assert_eq!(args.id_prefix.as_deref(), Some("doc-"));
        assert!(args.no_default_style_map);
        assert!(!args.preserve_empty_paragraphs);
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("wordhtml.toml");
        fs::write(&config, "id_prefix = \"cfg-\"\n").unwrap();

        let args = ConvertArgs {
            config: Some(config.clone()),
            ..ConvertArgs::default()
        };
        assert_eq!(build_options(&args).unwrap().id_prefix, "cfg-");

        let args = ConvertArgs {
            config: Some(config),
            id_prefix: Some("cli-".to_string()),
            preserve_empty_paragraphs: true,
            ..ConvertArgs::default()
        };
        let options = build_options(&args).unwrap();
        assert_eq!(options.id_prefix, "cli-");
        assert!(options.preserve_empty_paragraphs);
    }

    #[test]
    fn test_missing_input_is_reported() {
        let err = convert_command(&ConvertArgs {
            input: PathBuf::from("does-not-exist.docx"),
            ..ConvertArgs::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("Input file not found"));
    }
}
