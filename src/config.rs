//! Process-wide settings: how error ids are generated and where errors are reported.
//!
//! The configuration is read on every error instantiation and can be replaced at any time
//! with [`install`]; readers keep the snapshot they loaded.

use crate::{error::Level, report::Reporter, StaticStateMut};
use arc_swap::ArcSwap;
use std::{
    fmt::Debug,
    sync::{Arc, OnceLock},
};
use uuid::Uuid;

//===========================
// region:      --- IdGenerator

pub trait IdGenerator: Send + Sync + 'static {
    /// Returns a new opaque id, unique enough to correlate logs with responses.
    fn generate_id(&self) -> String;
}

/// `ERR` followed by an upper-case v4 UUID without dashes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultIdGenerator;

impl IdGenerator for DefaultIdGenerator {
    fn generate_id(&self) -> String {
        let uuid = Uuid::new_v4().simple().to_string();
        format!("ERR{}", uuid.to_ascii_uppercase())
    }
}

// endregion:   --- IdGenerator

//===========================
// region:      --- Config

pub struct Config {
    id_generator: Arc<dyn IdGenerator>,
    reporter: Option<Arc<dyn Reporter>>,
    report_threshold: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_generator: Arc::new(DefaultIdGenerator),
            reporter: None,
            report_threshold: Level::Error,
        }
    }
}

impl Config {
    pub fn with_id_generator(self, id_generator: impl IdGenerator) -> Self {
        Self {
            id_generator: Arc::new(id_generator),
            ..self
        }
    }

    pub fn with_reporter(self, reporter: impl Reporter) -> Self {
        Self {
            reporter: Some(Arc::new(reporter)),
            ..self
        }
    }

    pub fn without_reporter(self) -> Self {
        Self {
            reporter: None,
            ..self
        }
    }

    /// Errors whose class level is below `threshold` are not reported.
    pub fn with_report_threshold(self, threshold: Level) -> Self {
        Self {
            report_threshold: threshold,
            ..self
        }
    }

    pub fn id_generator(&self) -> &dyn IdGenerator {
        self.id_generator.as_ref()
    }

    pub fn reporter(&self) -> Option<&Arc<dyn Reporter>> {
        self.reporter.as_ref()
    }

    pub fn report_threshold(&self) -> Level {
        self.report_threshold
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("reporter", &self.reporter.is_some())
            .field("report_threshold", &self.report_threshold)
            .finish_non_exhaustive()
    }
}

// endregion:   --- Config

//===========================
// region:      --- Process-wide config

struct GlobalConfig;

impl StaticStateMut<Config> for GlobalConfig {
    fn get_static() -> &'static OnceLock<ArcSwap<Config>> {
        static CONFIG: OnceLock<ArcSwap<Config>> = OnceLock::new();
        &CONFIG
    }
}

/// Replaces the process-wide configuration.
pub fn install(config: Config) {
    log::debug!("installing error config {config:?}");
    GlobalConfig::update_state(config);
}

/// Snapshot of the process-wide configuration, initialized to [`Config::default`] on first use.
pub fn current() -> Arc<Config> {
    GlobalConfig::get_or_init_state(Config::default)
}

// endregion:   --- Process-wide config
