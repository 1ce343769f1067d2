use thiserror::Error;

/// API misuse and configuration errors.
///
/// Runtime degradations (failed lookups, missing companions) are not errors;
/// they go through [`crate::diagnostics::Diagnostics`].
#[derive(Debug, Error)]
pub enum RigError {
    #[error("unknown writer '{0}'")]
    UnknownWriter(String),
    #[error("no writer or camera with id '{0}'")]
    UnknownComponent(String),
    #[error("unknown camera '{0}'")]
    UnknownCamera(String),
    #[error("unknown extension '{extension}' on camera '{camera}'")]
    UnknownExtension { camera: String, extension: String },
    #[error("component id '{0}' is already registered")]
    DuplicateId(String),
    #[error("no scene object named '{0}'")]
    UnknownObject(String),
    #[error("component '{id}' is not a {expected}")]
    WrongComponentType { id: String, expected: &'static str },
    #[error("rig config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RigError>;
