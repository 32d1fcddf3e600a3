//! Service configuration and the injected clock.

use chrono::{DateTime, Utc};
use featreg_model::{Source, DEFAULT_PROJECT_NAME};

/// Default Kafka brokers for feature sets applied without a source.
pub const DEFAULT_SOURCE_BROKERS: &str = "localhost:9092";
/// Default Kafka topic for feature sets applied without a source.
pub const DEFAULT_SOURCE_TOPIC: &str = "features";

/// Configuration for the spec service.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecServiceConfig {
    /// Project used when a request leaves the project empty.
    pub default_project: String,
    /// Source given to feature sets applied without one.
    pub default_source: Source,
}

impl Default for SpecServiceConfig {
    fn default() -> Self {
        Self {
            default_project: DEFAULT_PROJECT_NAME.to_string(),
            default_source: Source::kafka(DEFAULT_SOURCE_BROKERS, DEFAULT_SOURCE_TOPIC),
        }
    }
}

/// Source of creation timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
