pub mod command;
pub mod query;

pub use self::command::ProductCommandHandler;
pub use self::query::ProductQueryHandler;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use shared::errors::ErrorBody;
use validator::Validate;

pub(crate) fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, ErrorBody> {
    serde_json::from_value(payload).map_err(|e| ErrorBody::new(format!("Invalid payload: {e}"), 400))
}

pub(crate) fn check<T: Validate>(req: &T) -> Result<(), ErrorBody> {
    req.validate()
        .map_err(|e| ErrorBody::new(format!("Validation failed: {e}"), 400))
}

pub(crate) fn encode<T: Serialize>(response: &T) -> Result<Value, ErrorBody> {
    serde_json::to_value(response)
        .map_err(|e| ErrorBody::new(format!("Failed to serialize response: {e}"), 500))
}
