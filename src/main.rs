use anyhow::Context;
use data_source::MockDataSource;
use gui::{App, AppContext, SystemBrowser};
use iced::{Application, Settings};
use reputation_core::{AppConfig, Catalog};
use saved_searches::{FileStorage, SavedSearchStore};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "reputationfix=debug,gui=debug,reputation_core=info,data_source=info,saved_searches=info";

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting ReputationFix - Online Reputation Monitoring");

    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::debug!("Using configuration {:?}", config);

    let storage = FileStorage::new(config.storage.directory.clone());
    let saved = SavedSearchStore::open(Arc::new(storage));
    let source = MockDataSource::new(config.data_source.latency());

    let context = AppContext {
        config,
        catalog: Catalog::standard(),
        source: Arc::new(source),
        saved,
        opener: Arc::new(SystemBrowser),
    };

    let settings = Settings {
        window: iced::window::Settings {
            size: iced::Size::new(1200.0, 800.0),
            min_size: Some(iced::Size::new(800.0, 600.0)),
            ..Default::default()
        },
        ..Settings::with_flags(context)
    };

    ReputationFixApp::run(settings).map_err(|e| {
        tracing::error!("Application error: {}", e);
        anyhow::anyhow!("GUI error: {e}")
    })
}

struct ReputationFixApp {
    app: App,
}

impl Application for ReputationFixApp {
    type Message = gui::Message;
    type Theme = iced::Theme;
    type Executor = iced::executor::Default;
    type Flags = AppContext;

    fn new(flags: Self::Flags) -> (Self, iced::Command<Self::Message>) {
        tracing::info!("Initializing application");
        let (app, command) = App::new(flags);
        (Self { app }, command)
    }

    fn title(&self) -> String {
        "ReputationFix - Online Reputation Monitoring".to_string()
    }

    fn update(&mut self, message: Self::Message) -> iced::Command<Self::Message> {
        self.app.update(message)
    }

    fn view(&self) -> iced::Element<Self::Message> {
        self.app.view()
    }
}
