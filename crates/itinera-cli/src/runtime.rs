//! Builds the application from config, environment and command-line flags.

use crate::GlobalOptions;
use crate::logging;
use anyhow::Result;
use async_trait::async_trait;
use itinera_application::AppContext;
use itinera_core::ai::{ModelRequest, TextGenerator};
use itinera_core::storage::KeyValueStore;
use itinera_core::{ItineraError, Result as ItineraResult};
use itinera_infrastructure::{ConfigService, EnvOverrides, FileStore, MemoryStore};
use itinera_interaction::GeminiApiAgent;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;

pub struct Runtime {
    pub app: AppContext,
    // Flushes the log file on drop.
    _log_guard: Option<WorkerGuard>,
}

impl Runtime {
    pub fn build(options: &GlobalOptions) -> Result<Self> {
        let service = ConfigService::new(options.config.as_deref())?;
        let mut config = service.load_with(&EnvOverrides::from_env())?;
        if let Some(store) = &options.store {
            config.storage.path = Some(store.clone());
        }

        let log_guard = logging::init(&config.logging)?;
        tracing::debug!(config = %service.path().display(), "Loaded configuration");

        let store: Arc<dyn KeyValueStore> = if options.ephemeral {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(FileStore::open(ConfigService::store_path(&config)?))
        };

        let generator: Arc<dyn TextGenerator> = match GeminiApiAgent::from_settings(&config.gemini) {
            Ok(agent) => Arc::new(agent),
            Err(e) => {
                tracing::debug!(error = %e, "Gemini is not configured");
                Arc::new(UnconfiguredGenerator {
                    reason: e.to_string(),
                })
            }
        };

        Ok(Self {
            app: AppContext::new(store, generator),
            _log_guard: log_guard,
        })
    }
}

/// Stands in for the model when no API key is set, so account and history
/// commands still work. Any AI flow fails with the configuration error.
struct UnconfiguredGenerator {
    reason: String,
}

#[async_trait]
impl TextGenerator for UnconfiguredGenerator {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn generate(&self, _request: ModelRequest) -> ItineraResult<Option<String>> {
        Err(ItineraError::config(self.reason.clone()))
    }
}
