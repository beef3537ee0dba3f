use clap::{Parser, Subcommand};
use cli::{render, OutputFormat};
use color_eyre::eyre::Result;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};
use transcripts::{
    LanguagesRequest, SearchRequest, SummaryRequest, TranscriptCommand, TranscriptConfig,
    TranscriptRequest, TranscriptService,
};

#[derive(Parser)]
#[command(author, version, about = "Fetch, search and summarize YouTube transcripts", long_about = None)]
struct Cli {
    /// Path to a .toml or .json configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a video's transcript
    Transcript {
        /// Video ID or YouTube URL
        video: String,
        /// Language code (e.g. en, es)
        #[arg(short, long)]
        language: Option<String>,
        /// Only keep entries overlapping this start time, in seconds
        #[arg(long)]
        start: Option<f64>,
        /// Only keep entries overlapping this end time, in seconds
        #[arg(long)]
        end: Option<f64>,
        /// Omit the [MM:SS] prefix on each line of plain text
        #[arg(long)]
        no_timestamps: bool,
    },
    /// Search a transcript for literal text
    Search {
        /// Video ID or YouTube URL
        video: String,
        query: String,
        #[arg(short, long)]
        language: Option<String>,
        #[arg(long)]
        case_sensitive: bool,
        /// Seconds of context around each match
        #[arg(long, default_value = "30")]
        context_window: i64,
    },
    /// List the transcript languages a video offers
    Languages {
        /// Video ID or YouTube URL
        video: String,
    },
    /// Statistics and excerpts of a transcript
    Summary {
        /// Video ID or YouTube URL
        video: String,
        #[arg(short, long)]
        language: Option<String>,
        /// Maximum length of the sample text, in characters
        #[arg(long, default_value = "500")]
        max_length: i64,
    },
    /// Print the JSON schema of every command
    Commands,
}

impl Commands {
    fn into_command(self) -> Option<TranscriptCommand> {
        let command = match self {
            Commands::Transcript { video, language, start, end, no_timestamps } => {
                TranscriptCommand::GetTranscript(TranscriptRequest {
                    video_id: video,
                    language_code: language,
                    preserve_formatting: !no_timestamps,
                    start_time: start.map(Into::into),
                    end_time: end.map(Into::into),
                })
            }
            Commands::Search { video, query, language, case_sensitive, context_window } => {
                TranscriptCommand::SearchTranscript(SearchRequest {
                    video_id: video,
                    query,
                    language_code: language,
                    case_sensitive,
                    context_window,
                })
            }
            Commands::Languages { video } => {
                TranscriptCommand::GetAvailableLanguages(LanguagesRequest { video_id: video })
            }
            Commands::Summary { video, language, max_length } => {
                TranscriptCommand::GetTranscriptSummary(SummaryRequest {
                    video_id: video,
                    language_code: language,
                    max_length,
                })
            }
            Commands::Commands => return None,
        };
        Some(command)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command.into_command() else {
        print_commands()?;
        return Ok(());
    };

    let config = TranscriptConfig::load(cli.config.as_deref())?;
    let service = TranscriptService::from_config(&config);

    info!("Running {} for {} ({})", command.name(), command.video_id(), command.description());
    let output = service.execute(&command).await?;
    println!("{}", render(&output, cli.format)?);

    Ok(())
}

fn print_commands() -> Result<()> {
    for name in TranscriptCommand::command_names() {
        println!("- {}", name);
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&TranscriptCommand::schema())?);
    Ok(())
}
