//! Doctor registration and login.
//!
//! A registration is stored under the licence number; logging in looks the
//! licence up and compares the email on record.

use crate::store::{RecordStore, StoreError, doctor_key};
use crate::value::JsonValue;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub name: String,
    pub email: String,
    pub license: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("doctor not found, please check credentials")]
    NotFound,

    #[error("incorrect email, please try again")]
    EmailMismatch,

    #[error("record for licence {license} is not a doctor: {source}")]
    Malformed {
        license: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Doctor {
    fn to_record(&self) -> Result<JsonValue, serde_json::Error> {
        serde_json::to_value(self).map(JsonValue::from)
    }
}

/// Store the doctor under their licence number, replacing any earlier entry.
pub fn register<S: RecordStore>(
    store: &mut S,
    doctor: &Doctor,
) -> Result<(), AuthError> {
    let record = doctor.to_record().map_err(StoreError::from)?;
    store.put(&doctor_key(&doctor.license), record)?;
    info!(license = %doctor.license, "registered doctor");
    Ok(())
}

pub fn login<S: RecordStore>(
    store: &S,
    email: &str,
    license: &str,
) -> Result<Doctor, AuthError> {
    let record = store
        .get(&doctor_key(license))?
        .ok_or(AuthError::NotFound)?;
    let doctor: Doctor = serde_json::from_value(record.into()).map_err(
        |source| AuthError::Malformed {
            license: license.to_string(),
            source,
        },
    )?;

    if doctor.email != email {
        info!(%license, "login rejected");
        return Err(AuthError::EmailMismatch);
    }
    info!(%license, "login succeeded");
    Ok(doctor)
}
