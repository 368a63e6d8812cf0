use errclass::{
    error::{
        registry, ErrorCause, ErrorClass, ErrorRecord, Errors, Metadata, Registry,
        RegistryBuilder, RegistryError, INTERNAL_ERROR, INTERNAL_SERVER_ERROR,
        JSON_SCHEMA_VALIDATION_FAILED, ROUTE_NOT_FOUND,
    },
    ErrorType,
};
use serde_json::{json, Value};
use std::sync::Once;
use thiserror::Error;

static DUPLICATE_ACCOUNT: ErrorClass =
    ErrorClass::new("bank.DuplicateAccount", 409, "Duplicate Account").with_code("duplicate_account");

static LEDGER_UNAVAILABLE: ErrorClass =
    ErrorClass::new("bank.LedgerUnavailable", 503, "Ledger Unavailable").with_stack_capture(true);

#[derive(Error, Debug)]
#[error("connection reset by peer")]
struct ConnReset;

fn installed_registry() -> &'static Registry {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let mut builder = RegistryBuilder::new();
        builder
            .register(&DUPLICATE_ACCOUNT)
            .register(&LEDGER_UNAVAILABLE);
        builder.install().expect("registry is installed only here");
    });
    registry::installed().expect("registry was installed")
}

#[test]
fn test_installed_classes() {
    let catalog = installed_registry();
    assert_eq!(catalog.len(), 6);

    for class in [
        &INTERNAL_SERVER_ERROR,
        &JSON_SCHEMA_VALIDATION_FAILED,
        &ROUTE_NOT_FOUND,
        &INTERNAL_ERROR,
        &DUPLICATE_ACCOUNT,
        &LEDGER_UNAVAILABLE,
    ] {
        let found = registry::lookup(class.name()).expect("class is registered");
        assert!(found.is(class));
    }
    assert!(registry::lookup("bank.Missing").is_none());

    let names = registry::error_classes()
        .iter()
        .map(|class| class.name())
        .collect::<Vec<_>>();
    let mut sorted = names.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(names, sorted);
}

#[test]
fn test_second_install_rejected() {
    installed_registry();
    assert_eq!(
        RegistryBuilder::empty().install().unwrap_err(),
        RegistryError::AlreadyInstalled
    );
}

#[test]
fn test_lookup_then_instantiate() {
    installed_registry();
    let class = registry::lookup("bank.DuplicateAccount").unwrap();
    let err = class.new_error("account 123 already exists");

    let resp = err.as_jsonapi_response();
    assert_eq!(resp.errors[0].code, "duplicate_account");
    assert_eq!(resp.errors[0].status, "409");
}

#[test]
fn test_request_flow() {
    installed_registry();

    let mut metadata = Metadata::new();
    metadata.insert("account_id".to_owned(), json!("acc-9"));

    let mut errs = Errors::new();
    errs.add_error(
        LEDGER_UNAVAILABLE
            .new_error("")
            .with_internal(ErrorCause(ConnReset))
            .with_metadata(metadata),
    );
    errs.add_error(DUPLICATE_ACCOUNT.new_error("account acc-9 already exists"));

    assert_eq!(errs.status(), 503);

    let public = serde_json::to_value(errs.as_jsonapi_response()).unwrap();
    assert_eq!(public["errors"].as_array().unwrap().len(), 2);
    assert_eq!(public["errors"][0]["title"], "Ledger Unavailable");
    assert_eq!(public["errors"][0]["detail"], "Ledger Unavailable");
    assert_eq!(public["errors"][1]["code"], "duplicate_account");
    assert!(!public.to_string().contains("connection reset"));

    let debug: Vec<ErrorRecord> = serde_json::from_str(&errs.as_json().unwrap()).unwrap();
    assert_eq!(debug[0].internal_error, "connection reset by peer");
    assert_eq!(debug[0].internal_details, json!("connection reset by peer"));
    assert!(debug[0].stack_trace.is_some());
    assert!(debug[1].stack_trace.is_none());
    assert_eq!(debug[1].internal_details, Value::Null);
}

#[test]
fn test_error_and_errors_share_surface() {
    fn respond(err: &dyn ErrorType) -> (u16, usize) {
        (err.status(), err.as_jsonapi_response().errors.len())
    }

    let err = ROUTE_NOT_FOUND.new_error("/v1/nope");
    assert_eq!(respond(&err), (404, 1));

    let errs: Errors = vec![err, INTERNAL_ERROR.new_error("")].into();
    assert_eq!(respond(&errs), (404, 2));
}
