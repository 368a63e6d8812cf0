use super::{Error, Level, StackTrace};
use serde::Serialize;

//===========================
// region:      --- ErrorClass

/// Named template for a category of failure. Classes are declared as `static` items and
/// registered at startup with a [`RegistryBuilder`](super::RegistryBuilder).
///
/// ```
/// use errclass::error::{ErrorClass, Level};
///
/// static USER_NOT_FOUND: ErrorClass =
///     ErrorClass::new("accounts.UserNotFound", 404, "User Not Found").with_code("user_not_found");
///
/// static LEDGER_CORRUPTED: ErrorClass =
///     ErrorClass::new("accounts.LedgerCorrupted", 500, "Internal Server Error")
///         .with_stack_capture(true)
///         .with_level(Level::Critical);
///
/// let err = USER_NOT_FOUND.new_error("no user with id 42");
/// assert_eq!(err.status(), 404);
/// assert!(err.stack_trace().is_none());
/// ```
#[derive(Debug)]
pub struct ErrorClass {
    name: &'static str,
    code: Option<&'static str>,
    status: u16,
    title: &'static str,
    capture_stack: bool,
    level: Option<Level>,
}

impl ErrorClass {
    pub const fn new(name: &'static str, status: u16, title: &'static str) -> Self {
        Self {
            name,
            code: None,
            status,
            title,
            capture_stack: false,
            level: None,
        }
    }

    /// Public code exposed in JSON. Defaults to the class name.
    pub const fn with_code(self, code: &'static str) -> Self {
        Self {
            code: Some(code),
            ..self
        }
    }

    pub const fn with_stack_capture(self, capture_stack: bool) -> Self {
        Self {
            capture_stack,
            ..self
        }
    }

    pub const fn with_level(self, level: Level) -> Self {
        Self {
            level: Some(level),
            ..self
        }
    }
}

// endregion:   --- ErrorClass

//===========================
// region:      --- Getter methods

impl ErrorClass {
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn code(&self) -> &'static str {
        match self.code {
            Some(code) => code,
            None => self.name,
        }
    }

    pub const fn status(&self) -> u16 {
        self.status
    }

    pub const fn title(&self) -> &'static str {
        self.title
    }

    pub const fn captures_stack(&self) -> bool {
        self.capture_stack
    }

    /// Explicit level, else `Error` for 5xx statuses and `Warning` for everything else.
    pub const fn level(&self) -> Level {
        match self.level {
            Some(level) => level,
            None if self.status >= 500 => Level::Error,
            None => Level::Warning,
        }
    }

    pub fn is(&self, other: &ErrorClass) -> bool {
        self.name == other.name
    }
}

// endregion:   --- Getter methods

//===========================
// region:      --- Error constructors

impl ErrorClass {
    /// New instance of this class. `details` falls back to the class title when empty, and a
    /// stack trace is captured only if the class asks for it.
    pub fn new_error(&'static self, details: impl Into<String>) -> Error {
        let stack_trace = if self.capture_stack {
            Some(StackTrace::capture(0))
        } else {
            None
        };
        Error::new(self, details.into(), stack_trace)
    }

    /// Like [`Self::new_error`] but always captures a stack trace, omitting `skip` frames
    /// nearest to the call site.
    pub fn new_error_with_stack(&'static self, details: impl Into<String>, skip: usize) -> Error {
        let stack_trace = StackTrace::capture(skip);
        Error::new(self, details.into(), Some(stack_trace))
    }
}

// endregion:   --- Error constructors

//===========================
// region:      --- Serialize

#[derive(Serialize)]
struct ErrorClassDoc {
    name: &'static str,
    code: &'static str,
    status: u16,
    title: &'static str,
    capture_stack: bool,
    level: Level,
}

impl Serialize for ErrorClass {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ErrorClassDoc {
            name: self.name,
            code: self.code(),
            status: self.status,
            title: self.title,
            capture_stack: self.capture_stack,
            level: self.level(),
        }
        .serialize(serializer)
    }
}

// endregion:   --- Serialize
