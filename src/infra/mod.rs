pub mod constants;
pub mod http;
pub mod logging;

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use secrecy::SecretString;
use tracing::info;
use turbine_core::config::{ServiceConfig, ServiceKind};
use turbine_core::local::LocalTurbine;
use turbine_core::{RandomnessService, ServiceError};

use constants::API_KEY_ENV;
use http::HttpTurbine;

pub fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

/// Construct the service named by the config.
pub fn build_service(config: &ServiceConfig) -> Result<Arc<dyn RandomnessService>, ServiceError> {
    match config.kind {
        ServiceKind::Local => {
            info!(warmup_ms = config.warmup_ms, "using local turbine");
            Ok(Arc::new(LocalTurbine::new(config.warmup())))
        }
        ServiceKind::Http => {
            info!(endpoint = %config.endpoint, "using http turbine");
            let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()).map(SecretString::from);
            Ok(Arc::new(HttpTurbine::new(&config.endpoint, api_key)?))
        }
    }
}
