//! Süt Sihirbazı - natural-language assistant for a dairy-farm database.

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};

use sut_sihirbazi::api::{self, AppState};
use sut_sihirbazi::cli::Cli;
use sut_sihirbazi::config::Config;
use sut_sihirbazi::safety::StatementPolicy;
use sut_sihirbazi::workflow::Workflow;
use sut_sihirbazi::{error::WizardError, llm, logging, speech};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse_args();

    info!("Loading config from: {}", cli.config.display());
    let mut config = Config::load_from_file(&cli.config)?;
    config.apply_env_overrides();
    cli.apply_to(&mut config)?;
    config.connection.apply_env_defaults();

    let llm_client = llm::create_client(&config.llm)?;
    let transcriber = speech::create_transcriber(&config.speech)?;
    let policy = config
        .safety
        .policy
        .parse::<StatementPolicy>()
        .map_err(WizardError::config)?;

    info!(
        "LLM provider: {} ({}), statement policy: {}",
        config.llm.provider, config.llm.model, policy
    );

    let workflow = Arc::new(Workflow::new(llm_client, None, policy));

    // A failed connection is not fatal: the workflow answers every
    // question on the general branch until a database is available.
    if cli.no_db {
        warn!("Database disabled (--no-db); all questions take the general branch");
    } else if config.connection.is_configured() {
        if let Err(e) = workflow.connect_database(&config.connection).await {
            warn!("Database connection failed: {}", e);
            warn!("Continuing without a database; all questions take the general branch");
        }
    } else {
        warn!("No database configured; all questions take the general branch");
    }

    let state = web::Data::new(AppState {
        workflow,
        transcriber,
    });

    let bind_addr = config.bind_addr();
    let workers = config.server.workers;
    info!("Listening on http://{}", bind_addr);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(api::configure_routes)
    })
    .bind(&bind_addr)?;

    if workers > 0 {
        server = server.workers(workers);
    }

    server.run().await?;
    Ok(())
}
