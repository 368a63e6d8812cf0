//! Forwarding of finalized errors to an external aggregation service.
//!
//! Reporting never affects the error being reported: a failed report is logged and dropped.
//! Inside a tokio runtime the call runs on the blocking pool; otherwise it runs inline.

use crate::{
    config::{self, Config},
    error::{error_recursive_msg, BoxError, Error, Errors, Level, Metadata},
};
use serde_json::Value;
use std::sync::Arc;
use tokio::{runtime::Handle, task::JoinHandle};

//===========================
// region:      --- Reporter

pub trait Reporter: Send + Sync + 'static {
    fn report(&self, message: &str, level: Level, context: &Metadata) -> Result<(), BoxError>;
}

/// Writes reports to the [`log`] facade under the `errclass::report` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, message: &str, level: Level, context: &Metadata) -> Result<(), BoxError> {
        let context = serde_json::to_string(context)?;
        log::log!(target: "errclass::report", level.as_log_level(), "{message} {context}");
        Ok(())
    }
}

// endregion:   --- Reporter

//===========================
// region:      --- Dispatch

/// What happened to a report request.
#[derive(Debug)]
pub enum Dispatch {
    /// No reporter is configured.
    NotConfigured,
    /// The error's level is below the configured threshold.
    BelowThreshold,
    /// The reporter was called on the current thread.
    Inline,
    /// The reporter call was handed to the tokio blocking pool.
    Background(JoinHandle<()>),
}

impl Dispatch {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Inline | Self::Background(_))
    }
}

fn deliver(reporter: &dyn Reporter, message: &str, level: Level, context: &Metadata) {
    if let Err(err) = reporter.report(message, level, context) {
        log::warn!("dropped error report \"{message}\": {}", error_recursive_msg(err.as_ref()));
    }
}

// endregion:   --- Dispatch

//===========================
// region:      --- Error reporting

impl Error {
    /// Reports this error with the process-wide configuration.
    pub fn report(&self) -> Dispatch {
        self.report_with(&config::current())
    }

    pub fn report_with(&self, config: &Config) -> Dispatch {
        let Some(reporter) = config.reporter() else {
            return Dispatch::NotConfigured;
        };
        let level = self.class().level();
        if level < config.report_threshold() {
            return Dispatch::BelowThreshold;
        }

        let message = self.report_message().to_owned();
        let context = self.report_context();

        match Handle::try_current() {
            Ok(handle) => {
                let reporter = Arc::clone(reporter);
                let join = handle.spawn_blocking(move || {
                    deliver(reporter.as_ref(), &message, level, &context);
                });
                Dispatch::Background(join)
            }
            Err(_) => {
                deliver(reporter.as_ref(), &message, level, &context);
                Dispatch::Inline
            }
        }
    }

    /// `internal_error` when present, else the public details.
    pub fn report_message(&self) -> &str {
        if self.internal_error().is_empty() {
            self.details()
        } else {
            self.internal_error()
        }
    }

    /// Public metadata overlaid with internal metadata, plus the error's id, class and status.
    pub fn report_context(&self) -> Metadata {
        let mut context = self.metadata().clone();
        context.extend(
            self.internal_metadata()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        context.insert("error_id".to_owned(), Value::from(self.id()));
        context.insert("error_class".to_owned(), Value::from(self.class().name()));
        context.insert("status".to_owned(), Value::from(self.status()));
        context
    }
}

impl Errors {
    pub fn report(&self) -> Vec<Dispatch> {
        self.report_with(&config::current())
    }

    pub fn report_with(&self, config: &Config) -> Vec<Dispatch> {
        self.iter().map(|err| err.report_with(config)).collect()
    }
}

// endregion:   --- Error reporting

#[cfg(test)]
mod test {
    use super::{Dispatch, LogReporter, Reporter};
    use crate::{
        config::Config,
        error::{BoxError, ErrorClass, Errors, Level, Metadata},
    };
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    static PAYMENT_DECLINED: ErrorClass =
        ErrorClass::new("test.PaymentDeclined", 402, "Payment Declined");

    static LEDGER_BROKEN: ErrorClass =
        ErrorClass::new("test.LedgerBroken", 500, "Internal Server Error");

    #[derive(Clone, Default)]
    struct Recording(Arc<Mutex<Vec<(String, Level, Metadata)>>>);

    impl Reporter for Recording {
        fn report(&self, message: &str, level: Level, context: &Metadata) -> Result<(), BoxError> {
            self.0
                .lock()
                .unwrap()
                .push((message.to_owned(), level, context.clone()));
            Ok(())
        }
    }

    struct Unreachable;

    impl Reporter for Unreachable {
        fn report(&self, _: &str, _: Level, _: &Metadata) -> Result<(), BoxError> {
            Err("aggregator unreachable".into())
        }
    }

    #[test]
    fn test_not_configured() {
        let err = LEDGER_BROKEN.new_error("");
        assert!(matches!(
            err.report_with(&Config::default()),
            Dispatch::NotConfigured
        ));
    }

    #[test]
    fn test_threshold() {
        let rec = Recording::default();
        let config = Config::default().with_reporter(rec.clone());

        let dispatch = PAYMENT_DECLINED.new_error("").report_with(&config);
        assert!(matches!(dispatch, Dispatch::BelowThreshold));
        assert!(rec.0.lock().unwrap().is_empty());

        let config = config.with_report_threshold(Level::Warning);
        let dispatch = PAYMENT_DECLINED.new_error("").report_with(&config);
        assert!(matches!(dispatch, Dispatch::Inline));
        assert_eq!(rec.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_inline_payload() {
        let rec = Recording::default();
        let config = Config::default().with_reporter(rec.clone());

        let err = LEDGER_BROKEN
            .new_error("could not settle")
            .with_internal("deadlock detected")
            .with_metadata_entry("account", "acc-1")
            .with_metadata_entry("shard", 1)
            .with_internal_metadata_entry("shard", 7);
        assert!(err.report_with(&config).is_sent());

        let reports = rec.0.lock().unwrap();
        let (message, level, context) = &reports[0];
        assert_eq!(message, "deadlock detected");
        assert_eq!(*level, Level::Error);
        assert_eq!(context["account"], json!("acc-1"));
        assert_eq!(context["shard"], json!(7));
        assert_eq!(context["error_id"], json!(err.id()));
        assert_eq!(context["error_class"], json!("test.LedgerBroken"));
        assert_eq!(context["status"], json!(500));
    }

    #[test]
    fn test_message_falls_back_to_details() {
        let err = LEDGER_BROKEN.new_error("could not settle");
        assert_eq!(err.report_message(), "could not settle");
    }

    #[test]
    fn test_failure_is_swallowed() {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = Config::default().with_reporter(Unreachable);
        let err = LEDGER_BROKEN.new_error("");
        assert!(matches!(err.report_with(&config), Dispatch::Inline));
        assert_eq!(err.status(), 500);
    }

    #[test]
    fn test_log_reporter() {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = Config::default().with_reporter(LogReporter);
        assert!(LEDGER_BROKEN.new_error("").report_with(&config).is_sent());
    }

    #[test]
    fn test_errors_report() {
        let rec = Recording::default();
        let config = Config::default().with_reporter(rec.clone());
        let errs: Errors = vec![
            LEDGER_BROKEN.new_error("a"),
            PAYMENT_DECLINED.new_error("b"),
            LEDGER_BROKEN.new_error("c"),
        ]
        .into();

        let sent = errs
            .report_with(&config)
            .iter()
            .filter(|d| d.is_sent())
            .count();
        assert_eq!(sent, 2);
        let messages = rec
            .0
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.0.clone())
            .collect::<Vec<_>>();
        assert_eq!(messages, ["a", "c"]);
    }

    #[tokio::test]
    async fn test_background() {
        let rec = Recording::default();
        let config = Config::default().with_reporter(rec.clone());

        let dispatch = LEDGER_BROKEN.new_error("").report_with(&config);
        match dispatch {
            Dispatch::Background(join) => join.await.unwrap(),
            other => panic!("expected a background dispatch, got {other:?}"),
        }
        assert_eq!(rec.0.lock().unwrap().len(), 1);
    }
}
