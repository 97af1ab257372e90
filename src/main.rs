//! Docsumma CLI - PDF summarisation
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use docsumma::pipeline::{self, Document};
use docsumma::{logging, pdf, Config, DocumentInfo, Mode, SummaryOptions};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "docsumma")]
#[command(author, version, about = "Summarise PDF documents into key points", long_about = None)]
struct Cli {
    /// Path to a docsumma.toml (defaults to ./docsumma.toml or ~/.config/docsumma/)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a PDF file
    Summarise {
        /// PDF to summarise
        file: PathBuf,
        /// Show raw extracted text instead of summary
        #[arg(long)]
        raw: bool,
        #[command(flatten)]
        options: SummaryArgs,
    },
    /// Summarise plain text from a file or stdin
    Text {
        /// Text file to read (stdin when omitted)
        file: Option<PathBuf>,
        #[command(flatten)]
        options: SummaryArgs,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Args)]
struct SummaryArgs {
    /// Summarisation strategy
    #[arg(long, value_enum)]
    mode: Option<Mode>,
    /// Heuristic summary length in characters
    #[arg(long)]
    max_length: Option<usize>,
    /// Remote summary length in words
    #[arg(long)]
    max_words: Option<usize>,
    /// Number of key points
    #[arg(long)]
    points: Option<usize>,
}

impl SummaryArgs {
    fn resolve(&self, config: &Config) -> (Mode, SummaryOptions) {
        let defaults = config.summary_options();
        let options = SummaryOptions {
            max_length: self.max_length.unwrap_or(defaults.max_length),
            max_words: self.max_words.unwrap_or(defaults.max_words),
            num_points: self.points.unwrap_or(defaults.num_points),
        };
        (self.mode.unwrap_or(config.summarizer.mode), options)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Summarise { file, raw, options } => {
            let config = load_config(cli.config.as_deref())?;
            eprintln!("Reading: {}", file.display());

            let parsed = pdf::parse_pdf(&file, config.input.max_file_size)?;

            if raw {
                println!("{}", parsed.text);
                eprintln!("\n--- Extracted {} characters ---", parsed.text.chars().count());
                return Ok(());
            }

            let document = Document {
                file_name: file_name(&file),
                text: parsed.text,
                info: parsed.info,
            };
            run(&config, &options, &document).await?;
        }
        Commands::Text { file, options } => {
            let config = load_config(cli.config.as_deref())?;
            let (file_name, text) = match file {
                Some(path) => (file_name(&path), std::fs::read_to_string(&path)?),
                None => ("stdin".to_string(), std::io::read_to_string(std::io::stdin())?),
            };

            let document = Document {
                file_name,
                text,
                info: DocumentInfo::default(),
            };
            run(&config, &options, &document).await?;
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Summarise and print, substituting the fallback text for request failures
async fn run(config: &Config, args: &SummaryArgs, document: &Document) -> anyhow::Result<()> {
    let (mode, options) = args.resolve(config);
    let summarizer = pipeline::summarizer_for(mode, config)?;

    eprintln!(
        "Summarising {} characters ({:?})...\n",
        document.text.chars().count(),
        mode
    );

    match pipeline::summarize(summarizer.as_ref(), document, &options).await {
        Ok(markdown) => {
            println!("{}", markdown);
            Ok(())
        }
        Err(e) => match pipeline::fallback_message(&e) {
            Some(message) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                println!("{}", message);
                std::process::exit(1);
            }
            None => Err(e.into()),
        },
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    Ok(match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
