use thiserror::Error;

/// Errors raised while encoding, decoding or restoring a checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("checkpoint encoding failed: {0}")]
    SerializationFailed(String),

    #[error("checkpoint decoding failed: {0}")]
    DeserializationFailed(String),

    #[error("unsupported checkpoint version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The checkpoint does not fit the machine it is restored onto.
    #[error("checkpoint rejected: {0}")]
    ValidationFailed(String),
}
