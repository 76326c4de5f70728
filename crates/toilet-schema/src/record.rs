//! Toilet record shapes
//!
//! The create, update and stored forms all share [`ToiletRecord`] and only
//! differ in how the identifier is carried.

use crate::error::ValidationError;
use crate::validator::{as_object, required_bool, required_f64, required_i64, required_str};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Location and amenities of a public toilet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToiletRecord {
    pub name: String,
    pub address: String,
    /// Decimal degrees
    pub latitude: f64,
    /// Decimal degrees
    pub longitude: f64,
    pub toilet_avail: bool,
    pub handicap_avail: bool,
    pub bidet_avail: bool,
    pub baby_changing_avail: bool,
    pub rating: f64,
}

impl ToiletRecord {
    /// Required fields, in validation order
    pub const FIELDS: [&'static str; 9] = [
        "name",
        "address",
        "latitude",
        "longitude",
        "toilet_avail",
        "handicap_avail",
        "bidet_avail",
        "baby_changing_avail",
        "rating",
    ];

    fn from_object(obj: &Map<String, Value>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_str(obj, "name")?,
            address: required_str(obj, "address")?,
            latitude: required_f64(obj, "latitude")?,
            longitude: required_f64(obj, "longitude")?,
            toilet_avail: required_bool(obj, "toilet_avail")?,
            handicap_avail: required_bool(obj, "handicap_avail")?,
            bidet_avail: required_bool(obj, "bidet_avail")?,
            baby_changing_avail: required_bool(obj, "baby_changing_avail")?,
            rating: required_f64(obj, "rating")?,
        })
    }
}

/// Payload accepted when creating a toilet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToiletCreate {
    #[serde(flatten)]
    pub record: ToiletRecord,
}

impl ToiletCreate {
    /// Validate an untyped payload. Unknown fields are ignored.
    pub fn from_value(payload: &Value) -> Result<Self, ValidationError> {
        let obj = as_object(payload)?;
        Ok(Self {
            record: ToiletRecord::from_object(obj)?,
        })
    }
}

impl From<ToiletRecord> for ToiletCreate {
    fn from(record: ToiletRecord) -> Self {
        Self { record }
    }
}

/// Payload shape for replacing an existing toilet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToiletUpdate {
    pub toilet_id: i64,
    #[serde(flatten)]
    pub record: ToiletRecord,
}

impl ToiletUpdate {
    pub fn from_value(payload: &Value) -> Result<Self, ValidationError> {
        let obj = as_object(payload)?;
        Ok(Self {
            toilet_id: required_i64(obj, "toilet_id")?,
            record: ToiletRecord::from_object(obj)?,
        })
    }
}

/// A toilet row as persisted, with its store-assigned identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToilet {
    pub toilet_id: i64,
    #[serde(flatten)]
    pub record: ToiletRecord,
}
