use thiserror::Error;

use crate::validator::Field;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing param: {0}")]
    MissingParameter(&'static str),

    #[error("{0} must be less than January 19, 2038 03:14:08 GMT due to the limits of UNIX time")]
    OutOfRange(&'static str),

    #[error("expireTime must be after the current time")]
    Expired,

    #[error("startTime must be less than expireTime")]
    OrderingViolation,

    #[error("Invalid {field}: {reason}.")]
    Validation { field: Field, reason: String },

    #[error("An error occurred deserializing policy options: {0}")]
    Deserializing(#[source] serde_json::Error),

    #[error("An error occurred serializing policy: {0}")]
    Serializing(#[source] serde_json::Error),
}
