//! Toilet Record Schema
//!
//! Record shapes for public toilets and validation of inbound JSON payloads.

mod error;
mod record;
mod validator;

pub use error::ValidationError;
pub use record::{StoredToilet, ToiletCreate, ToiletRecord, ToiletUpdate};
