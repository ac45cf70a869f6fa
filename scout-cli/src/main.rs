//! Scout CLI - Command-line interface for the Scout research assistant
//!
//! Drives the full pipeline: clarifying questions, the breadth/depth-bounded
//! research traversal, and final report synthesis.

use clap::{Parser, Subcommand};
use scout_core::{
    config_error, init_logging, ErrorContext, LoggingConfig, ModelStage, ScoutConfig, ScoutError,
    ScoutResult,
};
use scout_llm::ScoutLlmClient;
use scout_research::{
    combine_query, Budget, FeedbackGenerator, LlmFindingExtractor, LlmQueryPlanner,
    ReportSynthesizer, ResearchEngine,
};
use scout_search::TavilySearch;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "scout")]
#[command(about = "An automated deep-research assistant for open-ended topics")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Research a topic and write a Markdown report
    Research {
        /// Research topic (prompted interactively when omitted)
        topic: Option<String>,

        /// Number of search queries per recursion level
        #[arg(short, long)]
        breadth: Option<usize>,

        /// Number of recursion levels
        #[arg(short, long)]
        depth: Option<usize>,

        /// Output path for the final report
        #[arg(short, long, default_value = "output/report.md")]
        output: PathBuf,

        /// Skip the clarifying questions and research the topic as given
        #[arg(long)]
        skip_feedback: bool,

        /// Override the configured LLM provider
        #[arg(long)]
        provider: Option<String>,

        /// Override the configured model for every pipeline stage
        #[arg(long)]
        model: Option<String>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Initialize default configuration
        #[arg(long)]
        init: bool,

        /// Validate current configuration
        #[arg(long)]
        validate: bool,
    },
}

#[tokio::main]
async fn main() -> ScoutResult<()> {
    let cli = Cli::parse();

    let mut logging_config = LoggingConfig::default();
    if cli.verbose {
        logging_config.level = "debug".to_string();
    }

    init_logging(&logging_config).map_err(|e| ScoutError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli")
            .with_operation("init_logging")
            .with_suggestion("Check logging configuration"),
    })?;

    info!("Starting Scout CLI v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Research {
            topic,
            breadth,
            depth,
            output,
            skip_feedback,
            provider,
            model,
        } => {
            let mut config = config;
            if let Some(provider) = provider {
                config.llm.provider = provider;
            }
            if let Some(model) = model {
                config.llm.feedback_model = model.clone();
                config.llm.research_model = model.clone();
                config.llm.reporting_model = model;
            }
            handle_research(topic, breadth, depth, output, skip_feedback, &config).await?;
        }
        Commands::Config {
            show,
            init,
            validate,
        } => {
            handle_config(show, init, validate, &config)?;
        }
    }

    Ok(())
}

fn load_config(config_path: Option<&PathBuf>) -> ScoutResult<ScoutConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from {:?}", path);
        return ScoutConfig::from_file(path);
    }

    // Try to load from default locations
    let default_paths = [
        ScoutConfig::default_path(),
        dirs::home_dir().map(|d| d.join(".scout").join("config.toml")),
        Some(PathBuf::from("scout.toml")),
    ];

    for path in default_paths.iter().flatten() {
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            return ScoutConfig::from_file(path);
        }
    }

    info!("No configuration file found, using defaults");
    Ok(ScoutConfig::default())
}

async fn handle_research(
    topic: Option<String>,
    breadth: Option<usize>,
    depth: Option<usize>,
    output: PathBuf,
    skip_feedback: bool,
    config: &ScoutConfig,
) -> ScoutResult<()> {
    let topic = match topic {
        Some(topic) => topic,
        None => prompt_line("🔍 What would you like to research? ")?,
    };

    if topic.trim().is_empty() {
        return Err(config_error!("No research topic provided", "cli"));
    }

    let budget = Budget::new(
        breadth.unwrap_or(config.research.default_breadth),
        depth.unwrap_or(config.research.default_depth),
    );
    budget.validate()?;

    println!("🔬 Topic: {}", topic);
    println!(
        "📐 Budget: breadth {}, depth {}",
        budget.breadth, budget.depth
    );

    // One client per pipeline stage; the stages can use different models
    let feedback_llm = Arc::new(ScoutLlmClient::new(&config.llm, ModelStage::Feedback).await?);
    let research_llm = Arc::new(ScoutLlmClient::new(&config.llm, ModelStage::Research).await?);
    let reporting_llm = Arc::new(ScoutLlmClient::new(&config.llm, ModelStage::Reporting).await?);

    let goal = if skip_feedback {
        topic.clone()
    } else {
        let generator = FeedbackGenerator::new(feedback_llm);
        let questions = generator
            .generate_feedback(&topic, config.research.max_feedback_questions)
            .await?;

        let mut answers = Vec::new();
        if !questions.is_empty() {
            println!("\n💬 A few questions to sharpen the research direction:");
            for question in &questions {
                let answer = prompt_line(&format!("❓ {}\n   Your answer: ", question))?;
                answers.push(answer);
            }
        }

        combine_query(&topic, &questions, &answers)
    };

    println!("\n🚀 Researching, this can take a few minutes...");

    let search = TavilySearch::new(&config.search)?;
    let engine = ResearchEngine::new(
        Arc::new(LlmQueryPlanner::new(research_llm.clone())),
        Arc::new(LlmFindingExtractor::new(
            research_llm,
            config.research.content_limit,
        )),
        Arc::new(search),
        config.research.clone(),
    );

    let result = engine.deep_research(&goal, budget).await?;

    println!(
        "✅ Research complete: {} learnings from {} sources",
        result.learnings.len(),
        result.visited_urls.len()
    );

    if result.learnings.is_empty() {
        println!("⚠️  No learnings were gathered; the report will be thin.");
    }

    println!("📝 Writing final report...");
    let synthesizer = ReportSynthesizer::new(reporting_llm);
    let report = synthesizer
        .write_final_report(&goal, &result.learnings, &result.visited_urls)
        .await?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(&output, &report).await?;

    println!("🎉 Report written to {:?}", output);

    Ok(())
}

fn handle_config(show: bool, init: bool, validate: bool, config: &ScoutConfig) -> ScoutResult<()> {
    if init {
        let path = ScoutConfig::default_path()
            .ok_or_else(|| config_error!("Could not determine config directory", "cli"))?;

        if path.exists() {
            println!("⚠️  Configuration already exists at {:?}", path);
        } else {
            ScoutConfig::default().save_to_file(&path)?;
            println!("✅ Default configuration written to {:?}", path);
        }
        return Ok(());
    }

    if validate {
        config.validate()?;
        println!("✅ Configuration is valid");
        return Ok(());
    }

    if show {
        let rendered = toml::to_string_pretty(config).map_err(|e| ScoutError::Config {
            message: format!("Failed to render config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("cli").with_operation("config_show"),
        })?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("Use --show, --init or --validate. See 'scout config --help'.");
    Ok(())
}

/// Prompt on stdout and read one trimmed line from stdin
fn prompt_line(label: &str) -> ScoutResult<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
