use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::*;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use itbot_cli::{Command, display_banner, print_help, print_stats, read_input};
use itbot_core::{EmbeddingProvider, LLMProvider};
use itbot_openai::OpenAiClient;
use itbot_rag::{ChatBot, ChatBotConfig};
use itbot_watsonx::WatsonxClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Provider {
    Watsonx,
    Openai,
}

#[derive(Parser)]
#[command(name = "itbot")]
#[command(about = "Retrieval-augmented IT support chatbot", long_about = None)]
struct Cli {
    /// Service used for embeddings and chat
    #[arg(long, value_enum, default_value_t = Provider::Watsonx)]
    provider: Provider,

    /// Corpus file to index
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Number of chunks retrieved per question
    #[arg(long)]
    top_k: Option<usize>,

    /// Chat model identifier
    #[arg(long)]
    chat_model: Option<String>,

    /// Embedding model identifier
    #[arg(long)]
    embedding_model: Option<String>,

    /// Answer a single question and exit
    #[arg(short, long)]
    question: Option<String>,
}

impl Cli {
    fn apply(&self, config: &mut ChatBotConfig) {
        if self.provider == Provider::Openai {
            let defaults = ChatBotConfig::default();
            if config.chat_model == defaults.chat_model {
                config.chat_model = itbot_openai::DEFAULT_CHAT_MODEL.to_string();
            }
            if config.embedding_model == defaults.embedding_model {
                config.embedding_model = itbot_openai::DEFAULT_EMBEDDING_MODEL.to_string();
            }
        }
        if let Some(path) = &self.corpus {
            config.corpus_path = path.clone();
        }
        if let Some(top_k) = self.top_k {
            config.top_k = top_k;
        }
        if let Some(model) = &self.chat_model {
            config.chat_model = model.clone();
        }
        if let Some(model) = &self.embedding_model {
            config.embedding_model = model.clone();
        }
    }
}

/// Default filter when `RUST_LOG` is unset. One-shot mode stays quiet apart
/// from the assembled prompt, which goes to stderr next to the answer on stdout.
fn default_filter(one_shot: bool) -> &'static str {
    if one_shot {
        "warn,itbot::prompt=info"
    } else {
        "info"
    }
}

fn init_logging(one_shot: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(one_shot)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.question.is_some());

    let mut config = ChatBotConfig::from_env()?;
    cli.apply(&mut config);
    config.validate()?;

    match cli.provider {
        Provider::Watsonx => {
            let mut client = WatsonxClient::from_env()?
                .with_model(&config.chat_model)
                .with_embedding_model(&config.embedding_model);
            client.connect().await?;
            let embedder = client.clone();
            run(&cli, &config, embedder, client).await
        }
        Provider::Openai => {
            let mut client = OpenAiClient::from_env()?
                .with_model(&config.chat_model)
                .with_embedding_model(&config.embedding_model);
            client.connect().await?;
            let embedder = client.clone();
            run(&cli, &config, embedder, client).await
        }
    }
}

async fn run<E, L>(cli: &Cli, config: &ChatBotConfig, embedder: E, llm: L) -> Result<()>
where
    E: EmbeddingProvider,
    L: LLMProvider,
{
    info!(
        corpus = %config.corpus_path.display(),
        chat_model = %config.chat_model,
        embedding_model = %config.embedding_model,
        "starting ingestion"
    );
    let bot = ChatBot::ingest(config, embedder, llm).await?;

    // Handle a single question
    if let Some(question) = &cli.question {
        let answer = bot.ask(question).await?;
        println!("{}", answer);
        return Ok(());
    }

    // Interactive mode
    display_banner(bot.stats().chunks_indexed);

    let mut history = Vec::new();

    loop {
        let Some(input) = read_input(&mut history)? else {
            println!("{}", "👋 Goodbye!".green());
            break;
        };

        match Command::parse(&input) {
            Command::Empty => continue,
            Command::Help => print_help(),
            Command::Stats => print_stats(bot.stats()),
            Command::Exit => {
                println!("{}", "👋 Goodbye!".green());
                break;
            }
            Command::Ask(question) => {
                println!("{} Thinking...", "🤖".blue());
                match bot.ask(&question).await {
                    Ok(answer) => println!("{} {}", "→".green(), answer),
                    Err(e) => {
                        debug!(error = ?e, "question failed");
                        println!("{} {}", "❌".red(), e.to_string().red());
                    }
                }
            }
        }
    }

    Ok(())
}
