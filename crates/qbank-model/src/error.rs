use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Question ID is empty or whitespace-only.
    #[error("invalid question id: {0:?}")]
    InvalidQuestionId(String),

    /// The `type` field does not name a supported question kind.
    #[error("unknown question kind: {0:?}")]
    UnknownKind(String),

    /// A wire record is missing one of the required fields.
    #[error("record is missing required field {0:?}")]
    MissingField(&'static str),

    /// A required wire field is present but not a string.
    #[error("record field {0:?} must be a string")]
    FieldNotString(&'static str),
}

pub type Result<T> = std::result::Result<T, ModelError>;
