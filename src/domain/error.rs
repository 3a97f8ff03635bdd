use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

const NOT_FOUND_SUFFIX: &str = ".NotFound";
const VALIDATION_PREFIX: &str = "Validation.";
const NULL_VALUE_CODE: &str = "Error.NullValue";
const CONFLICT_CODE: &str = "Error.Conflict";
const UNAUTHORIZED_CODE: &str = "Error.Unauthorized";
const FORBIDDEN_CODE: &str = "Error.Forbidden";

/// Failure category of an [`Error`].
///
/// Closed set: anything the factories on [`Error`] do not produce is `Unexpected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    None,
    NullValue,
    NotFound,
    Validation,
    Conflict,
    Unauthorized,
    Forbidden,
    Unexpected,
}

impl ErrorKind {
    /// Best-effort category for a free-form code.
    fn classify(code: &str, message: &str) -> Self {
        match code {
            "" if message.is_empty() => ErrorKind::None,
            NULL_VALUE_CODE => ErrorKind::NullValue,
            CONFLICT_CODE => ErrorKind::Conflict,
            UNAUTHORIZED_CODE => ErrorKind::Unauthorized,
            FORBIDDEN_CODE => ErrorKind::Forbidden,
            code if code.ends_with(NOT_FOUND_SUFFIX) => ErrorKind::NotFound,
            code if code.starts_with(VALIDATION_PREFIX) => ErrorKind::Validation,
            _ => ErrorKind::Unexpected,
        }
    }
}

/// Immutable `(code, message)` pair identifying a domain failure.
///
/// The kind is fixed by the factory that built the error. Two errors are
/// equal when both code and message are equal.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[serde(from = "RawError")]
#[error("{code}: {message}")]
pub struct Error {
    code: Cow<'static, str>,
    message: Cow<'static, str>,
    #[serde(skip_serializing)]
    kind: ErrorKind,
}

#[derive(Deserialize)]
struct RawError {
    code: String,
    message: String,
}

impl From<RawError> for Error {
    fn from(raw: RawError) -> Self {
        Self::new(raw.code, raw.message)
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.message == other.message
    }
}

impl Eq for Error {}

impl Hash for Error {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
        self.message.hash(state);
    }
}

impl Error {
    /// The absence of an error. Carried by every successful outcome.
    pub const NONE: Error = Error {
        code: Cow::Borrowed(""),
        message: Cow::Borrowed(""),
        kind: ErrorKind::None,
    };

    pub const NULL_VALUE: Error = Error {
        code: Cow::Borrowed(NULL_VALUE_CODE),
        message: Cow::Borrowed("The specified result value is null."),
        kind: ErrorKind::NullValue,
    };

    /// Free-form error. The kind is inferred from the code.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        let code = code.into();
        let message = message.into();
        let kind = ErrorKind::classify(&code, &message);
        Self::with_kind(kind, code, message)
    }

    fn with_kind(
        kind: ErrorKind,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            kind,
        }
    }

    /// `{entity_name}.NotFound`, e.g. "Ticket with key '42' was not found."
    pub fn not_found(entity_name: &str, key: impl fmt::Display) -> Self {
        Self::with_kind(
            ErrorKind::NotFound,
            format!("{}{}", entity_name, NOT_FOUND_SUFFIX),
            format!("{} with key '{}' was not found.", entity_name, key),
        )
    }

    /// `Validation.{property_name}` with the message as given.
    pub fn validation(property_name: &str, message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_kind(
            ErrorKind::Validation,
            format!("{}{}", VALIDATION_PREFIX, property_name),
            message,
        )
    }

    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_kind(ErrorKind::Conflict, CONFLICT_CODE, message)
    }

    pub fn unauthorized() -> Self {
        Self::unauthorized_with("Unauthorized access")
    }

    pub fn unauthorized_with(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_kind(ErrorKind::Unauthorized, UNAUTHORIZED_CODE, message)
    }

    pub fn forbidden() -> Self {
        Self::forbidden_with("Access denied")
    }

    pub fn forbidden_with(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_kind(ErrorKind::Forbidden, FORBIDDEN_CODE, message)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_none(&self) -> bool {
        self == &Self::NONE
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Property name of a validation error, `None` for every other kind.
    pub fn property(&self) -> Option<&str> {
        match self.kind {
            ErrorKind::Validation => self.code().strip_prefix(VALIDATION_PREFIX),
            _ => None,
        }
    }
}
