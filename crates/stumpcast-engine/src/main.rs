//! Engine binary for the Stumpcast live score pipeline.
//!
//! This is the main entry point that wires together the event
//! generator, the ingestion pipeline, and the observer API. It loads
//! configuration, initializes all subsystems, and runs the pipeline
//! loop until the event bound is reached or Ctrl-C is received.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `stumpcast.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the pipeline (feed buffer, queue, scoreboard)
//! 4. Create the randomized event generator
//! 5. Start the Observer API server
//! 6. Install the Ctrl-C shutdown handler
//! 7. Run the pipeline loop
//! 8. Log the result

mod error;
mod generator;
mod publish;

use std::path::Path;
use std::sync::Arc;

use stumpcast_core::config::PipelineConfig;
use stumpcast_core::pipeline::Pipeline;
use stumpcast_core::runner::{self, RunnerConfig};
use stumpcast_observer::server::ServerConfig;
use stumpcast_observer::state::AppState;
use tokio::sync::Notify;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::generator::{GeneratorConfig, RandomEventSource};
use crate::publish::ObserverPublisher;

/// Path of the canonical configuration file, relative to the working
/// directory.
const CONFIG_PATH: &str = "stumpcast.yaml";

/// Application entry point for the engine.
///
/// Initializes all subsystems and runs the pipeline loop. Returns an
/// error code on failure.
///
/// # Errors
///
/// Returns an error if any initialization step fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging. The RUST_LOG environment
    //    variable overrides the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_target(true)
        .init();

    info!("stumpcast-engine starting");
    info!(
        feed_capacity = config.feed.capacity,
        producer_interval_ms = config.timing.producer_interval_ms,
        drain_interval_ms = config.timing.drain_interval_ms,
        max_pending = config.queue.max_pending,
        max_events = config.bounds.max_events,
        "Configuration loaded"
    );

    // 3. Build the pipeline.
    let mut pipeline = Pipeline::from_config(&config).map_err(EngineError::from)?;
    info!("Pipeline initialized");

    // 4. Create the event generator.
    let generator_config = load_generator_config()?;
    info!(
        seed = generator_config.seed,
        unknown_pct = generator_config.unknown_pct,
        "Generator configuration loaded"
    );
    let mut source = RandomEventSource::new(&generator_config);

    // 5. Start the Observer API server.
    let app_state = Arc::new(AppState::new());
    let server_config = ServerConfig {
        host: config.observer.host.clone(),
        port: config.observer.port,
    };
    let _observer_handle =
        stumpcast_observer::spawn_observer(server_config, Arc::clone(&app_state))
            .await
            .map_err(EngineError::from)?;
    info!(port = config.observer.port, "Observer API server started");

    // 6. Install the Ctrl-C shutdown handler.
    let shutdown = Arc::new(Notify::new());
    {
        let shutdown = Arc::clone(&shutdown);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl-C received, shutting down");
                shutdown.notify_one();
            } else {
                warn!("Failed to install Ctrl-C handler");
            }
        });
    }

    // 7. Run the pipeline loop.
    let runner_config = RunnerConfig {
        producer_interval_ms: config.timing.producer_interval_ms,
        drain_interval_ms: config.timing.drain_interval_ms,
        max_events: config.bounds.max_events,
    };
    let mut sink = ObserverPublisher::new(app_state);

    let result = runner::run_pipeline(
        &mut pipeline,
        &mut source,
        &mut sink,
        &shutdown,
        &runner_config,
    )
    .await;

    // 8. Log results.
    info!(
        end_reason = ?result.end_reason,
        events_ingested = result.events_ingested,
        batches_published = result.batches_published,
        final_score = %result.final_summary,
        "stumpcast-engine shutdown complete"
    );

    Ok(())
}

/// Load the pipeline configuration from `stumpcast.yaml`.
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> Result<PipelineConfig, EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        let config = PipelineConfig::from_file(config_path)?;
        Ok(config)
    } else {
        Ok(PipelineConfig::default())
    }
}

/// Load generator configuration from `stumpcast.yaml`.
///
/// Reads the `generator` section from the YAML config file. If the
/// file does not exist or lacks the `generator` key, defaults are used.
fn load_generator_config() -> Result<GeneratorConfig, EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        let contents =
            std::fs::read_to_string(config_path).map_err(|e| EngineError::Generator {
                message: format!("failed to read config file: {e}"),
            })?;

        // Parse the full YAML and extract just the "generator" section.
        let raw: serde_yml::Value =
            serde_yml::from_str(&contents).map_err(|e| EngineError::Generator {
                message: format!("failed to parse config YAML: {e}"),
            })?;

        if let Some(generator_value) = raw.get("generator") {
            let generator_config: GeneratorConfig =
                serde_yml::from_value(generator_value.clone()).map_err(|e| {
                    EngineError::Generator {
                        message: format!("failed to parse generator config: {e}"),
                    }
                })?;
            Ok(generator_config)
        } else {
            Ok(GeneratorConfig::default())
        }
    } else {
        Ok(GeneratorConfig::default())
    }
}
