pub const METHOD_NOT_ALLOWED_SUFFIX: &str = "not allowed. Only POST allowed.";
pub const BAD_PHOTO_COUNT_MESSAGE: &str = "Error: Could not determine number of photos uploaded.";
pub const MISSING_TITLE_MESSAGE: &str = "Error: Title not defined.";
pub const WRONG_PASSPHRASE_MESSAGE: &str = "Error: Passphrase incorrect.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Error: Internal server error.";

/// Result codes a pipeline run can end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeCode {
    Ok,
    BadRequest,
    Unauthorized,
    MethodNotAllowed,
    InternalError,
}

/// A terminal failure produced by one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub code: OutcomeCode,
    pub message: String,
    /// Verb the caller should use instead, set only for `MethodNotAllowed`.
    pub allow: Option<&'static str>,
}

impl Rejection {
    fn new(code: OutcomeCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            allow: None,
        }
    }

    pub fn method_not_allowed(method: &str, allow: &'static str) -> Self {
        Self {
            allow: Some(allow),
            ..Self::new(
                OutcomeCode::MethodNotAllowed,
                format!("Error: Method {method} {METHOD_NOT_ALLOWED_SUFFIX}"),
            )
        }
    }

    pub fn bad_photo_count() -> Self {
        Self::new(OutcomeCode::BadRequest, BAD_PHOTO_COUNT_MESSAGE)
    }

    pub fn missing_title() -> Self {
        Self::new(OutcomeCode::BadRequest, MISSING_TITLE_MESSAGE)
    }

    pub fn wrong_passphrase() -> Self {
        Self::new(OutcomeCode::Unauthorized, WRONG_PASSPHRASE_MESSAGE)
    }

    /// Generic failure; the underlying cause is never exposed to the caller.
    pub fn internal() -> Self {
        Self::new(OutcomeCode::InternalError, INTERNAL_ERROR_MESSAGE)
    }
}

/// Terminal result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every stage passed and the transport accepted `body`.
    Sent { body: String },
    Rejected(Rejection),
}

impl Outcome {
    pub fn code(&self) -> OutcomeCode {
        match self {
            Outcome::Sent { .. } => OutcomeCode::Ok,
            Outcome::Rejected(rejection) => rejection.code,
        }
    }

    /// Explanation of a rejection; empty on success.
    pub fn message(&self) -> &str {
        match self {
            Outcome::Sent { .. } => "",
            Outcome::Rejected(rejection) => &rejection.message,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Outcome::Sent { body } => Some(body),
            Outcome::Rejected(_) => None,
        }
    }

    pub fn allow(&self) -> Option<&'static str> {
        match self {
            Outcome::Sent { .. } => None,
            Outcome::Rejected(rejection) => rejection.allow,
        }
    }
}

impl From<Rejection> for Outcome {
    fn from(rejection: Rejection) -> Self {
        Outcome::Rejected(rejection)
    }
}
