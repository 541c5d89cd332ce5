//! Science Guide CLI.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use science_guide::config::{self, AppConfig};
use science_guide::core::catalog::Subject;
use science_guide::core::export::{ExportSink, ExportStatus, FileSink, StdoutSink};
use science_guide::core::generation::{
    build_prompt, Difficulty, GenerationFailed, GenerationMode, GenerationSession, Language,
};
use science_guide::core::llm::{GoogleClient, RetryPolicy, RetryingClient};
use science_guide::core::logging;
use science_guide::core::selection::{SelectionAction, SelectionState};

#[derive(Parser)]
#[command(
    name = "science-guide",
    version,
    about = "Generate Class 10 science study material",
    long_about = "Generate MCQs, subjective question sets, study guides and concept maps\n\
                  for Physics, Chemistry and Biology, and export them as plain text."
)]
struct Cli {
    /// Subject (Physics, Chemistry, Biology).
    #[arg(long)]
    subject: Option<Subject>,

    /// Content to generate (mcq, subjective, study-guide, concept-map).
    #[arg(long, default_value = "mcq")]
    mode: GenerationMode,

    /// Difficulty (easy, medium, hard, hybrid).
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Chapter name, or "All Chapters".
    #[arg(long)]
    chapter: Option<String>,

    /// Output language (english, odia).
    #[arg(long, default_value = "english")]
    language: Language,

    /// Number of MCQs to request (1-20).
    #[arg(long, default_value_t = 1)]
    count: u8,

    /// Write the export to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the instruction text and exit without calling the service.
    #[arg(long)]
    print_prompt: bool,

    /// List the chapters of every subject (or of --subject) and exit.
    #[arg(long)]
    list_chapters: bool,
}

impl Cli {
    fn selection(&self) -> SelectionState {
        let mut actions = vec![
            SelectionAction::SetMode(self.mode),
            SelectionAction::SetLanguage(self.language),
            SelectionAction::SetQuestionCount(self.count),
        ];
        if let Some(subject) = self.subject {
            actions.push(SelectionAction::SetSubject(subject));
        }
        if let Some(chapter) = &self.chapter {
            actions.push(SelectionAction::SetChapter(chapter.clone()));
        }
        if let Some(difficulty) = self.difficulty {
            actions.push(SelectionAction::SetDifficulty(difficulty));
        }
        SelectionState::default().apply_all(actions)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(error) => (AppConfig::default(), Some(error)),
    };
    let _log_guard = if cli.print_prompt {
        logging::init_quiet(&config.logging, &config.log_dir())
    } else {
        logging::init(&config.logging, &config.log_dir())
    };
    tracing::info!("{} v{} starting", science_guide::NAME, science_guide::VERSION);
    match config_error {
        Some(error) => tracing::warn!(error = %error, "Using default configuration"),
        None => tracing::debug!(path = %AppConfig::config_path().display(), "Configuration loaded"),
    }

    match run(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %error, "Run failed");
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    if cli.list_chapters {
        list_chapters(cli.subject);
        return Ok(());
    }

    let selection = cli.selection();

    if cli.print_prompt {
        let valid = selection
            .validate()
            .map_err(|e| GenerationFailed::new(selection.mode, e))?;
        println!("{}", build_prompt(&valid));
        return Ok(());
    }

    let google = GoogleClient::from_config(&config.generation, config::api_key_from_env())
        .context("Failed to build the generation client")?;
    let client = RetryingClient::new(google, RetryPolicy::from(&config.generation));
    let session = GenerationSession::with_selection(Arc::new(client), selection);

    session.generate().await?;

    let sink: Box<dyn ExportSink> = match &cli.output {
        Some(path) => Box::new(FileSink::new(path)),
        None => Box::new(StdoutSink),
    };
    let status = session
        .export_to(sink.as_ref())
        .await
        .context("Nothing to export")?;
    match &status {
        ExportStatus::Copied => {
            if let Some(path) = &cli.output {
                eprintln!("{} ({})", status.label(), path.display());
            }
            Ok(())
        }
        ExportStatus::Failed(reason) => anyhow::bail!("{}: {reason}", status.label()),
    }
}

fn list_chapters(subject: Option<Subject>) {
    let subjects = match subject {
        Some(subject) => vec![subject],
        None => Subject::ALL.to_vec(),
    };
    for subject in subjects {
        println!("{subject}");
        for chapter in subject.chapters() {
            println!("  {chapter}");
        }
    }
}
