//! Patient intake form.
//!
//! The form is an immutable value: each edit is a [`FormAction`] and
//! [`PatientForm::apply`] returns the updated form.

use crate::store::{RecordStore, StoreError, patient_key};
use crate::value::JsonValue;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    /// Date of birth, `YYYY-MM-DD`
    pub dob: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub gender: Option<Gender>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportInfo {
    /// Date the report was generated, `YYYY-MM-DD`
    pub report_date: Option<String>,
    pub practitioner_name: String,
    pub clinic_name: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicalHistory {
    pub medical_history: String,
    pub family_history: String,
    pub social_history: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientForm {
    pub personal_info: PersonalInfo,
    pub report_info: ReportInfo,
    pub medical_history: MedicalHistory,
}

/// A single edit to the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    FirstName(String),
    MiddleName(String),
    LastName(String),
    DateOfBirth(Option<String>),
    BloodGroup(Option<BloodGroup>),
    Gender(Option<Gender>),
    ReportDate(Option<String>),
    PractitionerName(String),
    ClinicName(String),
    Address(String),
    MedicalHistory(String),
    FamilyHistory(String),
    SocialHistory(String),
    Reset,
}

impl PatientForm {
    pub fn apply(self, action: FormAction) -> Self {
        let PatientForm {
            personal_info,
            report_info,
            medical_history,
        } = self;

        match action {
            FormAction::FirstName(first_name) => PatientForm {
                personal_info: PersonalInfo { first_name, ..personal_info },
                report_info,
                medical_history,
            },
            FormAction::MiddleName(middle_name) => PatientForm {
                personal_info: PersonalInfo { middle_name, ..personal_info },
                report_info,
                medical_history,
            },
            FormAction::LastName(last_name) => PatientForm {
                personal_info: PersonalInfo { last_name, ..personal_info },
                report_info,
                medical_history,
            },
            FormAction::DateOfBirth(dob) => PatientForm {
                personal_info: PersonalInfo { dob, ..personal_info },
                report_info,
                medical_history,
            },
            FormAction::BloodGroup(blood_group) => PatientForm {
                personal_info: PersonalInfo { blood_group, ..personal_info },
                report_info,
                medical_history,
            },
            FormAction::Gender(gender) => PatientForm {
                personal_info: PersonalInfo { gender, ..personal_info },
                report_info,
                medical_history,
            },
            FormAction::ReportDate(report_date) => PatientForm {
                personal_info,
                report_info: ReportInfo { report_date, ..report_info },
                medical_history,
            },
            FormAction::PractitionerName(practitioner_name) => PatientForm {
                personal_info,
                report_info: ReportInfo {
                    practitioner_name,
                    ..report_info
                },
                medical_history,
            },
            FormAction::ClinicName(clinic_name) => PatientForm {
                personal_info,
                report_info: ReportInfo { clinic_name, ..report_info },
                medical_history,
            },
            FormAction::Address(address) => PatientForm {
                personal_info,
                report_info: ReportInfo { address, ..report_info },
                medical_history,
            },
            FormAction::MedicalHistory(history) => PatientForm {
                personal_info,
                report_info,
                medical_history: MedicalHistory {
                    medical_history: history,
                    ..medical_history
                },
            },
            FormAction::FamilyHistory(family_history) => PatientForm {
                personal_info,
                report_info,
                medical_history: MedicalHistory {
                    family_history,
                    ..medical_history
                },
            },
            FormAction::SocialHistory(social_history) => PatientForm {
                personal_info,
                report_info,
                medical_history: MedicalHistory {
                    social_history,
                    ..medical_history
                },
            },
            FormAction::Reset => PatientForm::default(),
        }
    }

    pub fn from_actions(actions: impl IntoIterator<Item = FormAction>) -> Self {
        actions
            .into_iter()
            .fold(PatientForm::default(), PatientForm::apply)
    }
}

/// Form plus the report summary, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    #[serde(flatten)]
    pub form: PatientForm,
    pub additional_reports: Option<JsonValue>,
}

impl PatientRecord {
    pub fn new(form: PatientForm, additional_reports: Option<JsonValue>) -> Self {
        Self {
            form,
            additional_reports,
        }
    }
}

/// Store the record under a freshly generated id and return the id.
pub fn save_record<S: RecordStore>(
    store: &mut S,
    record: &PatientRecord,
) -> Result<Uuid, StoreError> {
    let id = Uuid::new_v4();
    let value = JsonValue::from(serde_json::to_value(record)?);
    store.put(&patient_key(&id), value)?;
    info!(%id, "saved patient record");
    Ok(id)
}
