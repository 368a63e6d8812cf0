use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::BTreeMap, error::Error as StdError, fmt::Display, str::FromStr};
use thiserror::Error;

//===========================
// region:      --- Aliases

/// Public or internal key/value data attached to an [`Error`](super::Error).
pub type Metadata = BTreeMap<String, Value>;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

// endregion:   --- Aliases

//===========================
// region:      --- Level

/// Severity of an error class, used to decide what gets forwarded to a
/// [`Reporter`](crate::report::Reporter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }

    /// The closest [`log::Level`]. `Critical` has no counterpart and maps to `Error`.
    pub const fn as_log_level(&self) -> log::Level {
        match self {
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warning => log::Level::Warn,
            Self::Error | Self::Critical => log::Level::Error,
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown severity level \"{0}\"")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" | "fatal" => Ok(Self::Critical),
            _ => Err(ParseLevelError(s.to_owned())),
        }
    }
}

// endregion:   --- Level

//===========================
// region:      --- Crate failures

/// Failures while building or installing the class registry.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("error class \"{name}\" is already registered")]
    Duplicate { name: &'static str },

    #[error("the error class registry has already been installed")]
    AlreadyInstalled,
}

/// Failures while rendering an error as JSON.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("error {id} could not be encoded as JSON")]
    Encode {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

// endregion:   --- Crate failures

#[cfg(test)]
mod test {
    use super::{Level, ParseLevelError};

    #[test]
    fn test_level_order() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Error < Level::Critical);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("Warning".parse::<Level>(), Ok(Level::Warning));
        assert_eq!(" warn ".parse::<Level>(), Ok(Level::Warning));
        assert_eq!("critical".parse::<Level>(), Ok(Level::Critical));
        assert_eq!(
            "loud".parse::<Level>(),
            Err(ParseLevelError("loud".to_owned()))
        );

        for level in [Level::Debug, Level::Info, Level::Error] {
            assert_eq!(level.to_string().parse::<Level>(), Ok(level));
        }
    }

    #[test]
    fn test_level_serde() {
        let json = serde_json::to_string(&Level::Critical).unwrap();
        assert_eq!(json, r#""critical""#);
    }
}
