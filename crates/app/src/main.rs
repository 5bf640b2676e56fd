use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock, ProgressService, StudySessionService};
use storage::Storage;
use study_core::ScoreDenominator;
use study_core::model::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeneratorSettingsDraft};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

/// Desktop study sessions: pick a topic, read concepts, practice, review.
#[derive(Debug, Parser)]
#[command(name = "study-session", version, about)]
struct Args {
    /// API key for the chat-completions endpoint. Without one, sessions use
    /// offline template content.
    #[arg(long, env = "STUDY_AI_API_KEY", hide_env_values = true)]
    ai_api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API.
    #[arg(long, env = "STUDY_AI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    ai_base_url: String,

    /// Chat model used to generate study content.
    #[arg(long, env = "STUDY_AI_MODEL", default_value = DEFAULT_MODEL)]
    ai_model: String,

    /// What scores are divided by: `all` questions or only `scored` ones.
    #[arg(long, env = "STUDY_SCORE_DENOMINATOR", default_value = "all")]
    score_denominator: ScoreDenominator,

    /// Log filter directive, e.g. `info` or `services=debug`.
    #[arg(long = "log", env = "RUST_LOG", default_value = "info")]
    log_filter: String,
}

struct DesktopApp {
    study: Arc<StudySessionService>,
    progress: Arc<ProgressService>,
}

impl UiApp for DesktopApp {
    fn study(&self) -> Arc<StudySessionService> {
        Arc::clone(&self.study)
    }

    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}

fn init_tracing(filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter).context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing(&args.log_filter)?;

    let settings = GeneratorSettingsDraft {
        api_key: args.ai_api_key,
        base_url: Some(args.ai_base_url),
        model: Some(args.ai_model),
    }
    .validate()
    .context("invalid content generator settings")?;

    match &settings {
        Some(settings) => info!(?settings, "using chat content generator"),
        None => warn!("no API key configured; using offline template content"),
    }

    let storage = Storage::in_memory();
    let services = AppServices::new(
        &storage,
        Clock::system(),
        settings,
        args.score_denominator,
    );
    info!(
        denominator = %args.score_denominator,
        generator = services.study().generator_name(),
        "starting study session app"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        study: services.study(),
        progress: services.progress(),
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Study Session")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
