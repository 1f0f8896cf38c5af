//! Save command implementation.
use arogya::JsonValue;
use arogya::config::Config;
use arogya::form::{PatientForm, PatientRecord, save_record};
use arogya::store::FileStore;
use std::path::Path;

pub fn run(
    config: &Config,
    form_path: &Path,
    reports_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    // YAML is a superset of JSON, so both form formats parse here
    let form: PatientForm =
        serde_yaml::from_str(&std::fs::read_to_string(form_path)?)?;
    let reports = match reports_path {
        Some(path) => Some(JsonValue::decode(&std::fs::read_to_string(path)?)?),
        None => None,
    };

    let mut store = FileStore::open(&config.store_path)?;
    let id = save_record(&mut store, &PatientRecord::new(form, reports))?;

    eprintln!("Record saved to: {}", store.path().display());
    println!("{}", id);
    Ok(())
}
