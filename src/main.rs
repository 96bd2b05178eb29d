//! logistics-desk - HTTP server for the delivery order desk.
//!
//! Reads `LOGISTICS_DESK__*` variables (see `config`), wires the chosen
//! storage backend and notifier behind bounded ports, seeds the actor
//! directory from the roster file when one is configured, and serves the
//! desk router.

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use logistics_desk::adapters::events::TracingEventPublisher;
use logistics_desk::adapters::http::{desk_router, DeskHandlers};
use logistics_desk::adapters::memory::{load_roster, InMemoryActorDirectory, InMemoryOrderRepository};
use logistics_desk::adapters::notify::{LoggingNotifier, WebhookConfig, WebhookNotifier};
use logistics_desk::adapters::postgres::{self, PostgresActorDirectory, PostgresOrderRepository};
use logistics_desk::application::handlers::RegisterActorHandler;
use logistics_desk::application::{
    BoundedActorDirectory, BoundedNotifier, BoundedOrderRepository, Orchestrator, SessionEngine,
};
use logistics_desk::config::{AppConfig, LogFormat, StorageBackend};
use logistics_desk::ports::{ActorDirectory, EventPublisher, Notifier, OrderRepository};

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let (directory, repository) = storage(&config).await?;
    let directory: Arc<dyn ActorDirectory> = Arc::new(BoundedActorDirectory::new(
        directory,
        config.timeouts.storage(),
    ));
    let repository: Arc<dyn OrderRepository> = Arc::new(BoundedOrderRepository::new(
        repository,
        config.timeouts.storage(),
    ));
    let notifier: Arc<dyn Notifier> = Arc::new(BoundedNotifier::new(
        notifier(&config)?,
        config.timeouts.notification(),
    ));
    let events: Arc<dyn EventPublisher> = Arc::new(TracingEventPublisher);

    if let Some(path) = &config.directory.roster_path {
        let roster = load_roster(path)?;
        let registered = RegisterActorHandler::new(directory.clone())
            .handle(roster.actors)
            .await?;
        tracing::info!(path = %path.display(), registered, "roster loaded");
    }

    let orchestrator = Arc::new(Orchestrator::new(
        directory.clone(),
        repository.clone(),
        notifier,
        events.clone(),
        Arc::new(SessionEngine::new()),
    ));
    let handlers = DeskHandlers::new(directory, repository, events, orchestrator);

    let app = desk_router(handlers)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        storage = ?config.storage.backend,
        "logistics-desk listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.log_level.clone().into());

    if config.server.log_format() == LogFormat::Json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn storage(
    config: &AppConfig,
) -> Result<(Arc<dyn ActorDirectory>, Arc<dyn OrderRepository>), BoxError> {
    match config.storage.backend {
        StorageBackend::Memory => Ok((
            Arc::new(InMemoryActorDirectory::new()),
            Arc::new(InMemoryOrderRepository::new()),
        )),
        StorageBackend::Postgres => {
            let pool = postgres::connect(&config.storage).await?;
            tracing::info!("Connected to database");
            Ok((
                Arc::new(PostgresActorDirectory::new(pool.clone())),
                Arc::new(PostgresOrderRepository::new(pool)),
            ))
        }
    }
}

fn notifier(config: &AppConfig) -> Result<Arc<dyn Notifier>, BoxError> {
    let Some(url) = &config.notifier.webhook_url else {
        return Ok(Arc::new(LoggingNotifier::new()));
    };

    let mut webhook = WebhookConfig::new(url.clone()).with_timeout(config.timeouts.notification());
    if let Some(token) = &config.notifier.token {
        webhook = webhook.with_token(token.clone());
    }
    Ok(Arc::new(WebhookNotifier::new(webhook)?))
}
