pub mod config;
pub mod error;
pub mod field;
pub mod gate;
pub mod lifecycle;
pub mod local;
pub mod params;
pub mod presentation;
pub mod service;
pub mod worker;

pub use config::Config;
pub use error::{ConfigError, ParamError, ServiceError};
pub use gate::Rejection;
pub use lifecycle::{LifecycleEvent, LifecycleEventKind, Phase, RequestId, Session, Ticket};
pub use params::{ParamKey, QueryParams};
pub use service::{QueryOutcome, RandomnessService};
