//! [`ErrorClass`] instances that most services need. [`RegistryBuilder::new`](super::RegistryBuilder::new)
//! registers all of them.

use super::ErrorClass;

pub static INTERNAL_SERVER_ERROR: ErrorClass =
    ErrorClass::new("errclass.InternalServerError", 500, "Internal Server Error")
        .with_code("internal_server_error")
        .with_stack_capture(true);

pub static JSON_SCHEMA_VALIDATION_FAILED: ErrorClass = ErrorClass::new(
    "errclass.JSONSchemaValidationFailed",
    400,
    "JSON Schema Validation Failed",
)
.with_code("json_schema_validation_failed");

pub static ROUTE_NOT_FOUND: ErrorClass =
    ErrorClass::new("errclass.RouteNotFound", 404, "Route Not Found").with_code("route_not_found");

pub static INTERNAL_ERROR: ErrorClass =
    ErrorClass::new("errclass.InternalError", 500, "Internal Error")
        .with_code("internal_error")
        .with_stack_capture(true);

pub static BUILTIN_CLASSES: [&ErrorClass; 4] = [
    &INTERNAL_SERVER_ERROR,
    &JSON_SCHEMA_VALIDATION_FAILED,
    &ROUTE_NOT_FOUND,
    &INTERNAL_ERROR,
];
