//! Register and login command implementations.
use arogya::auth::{self, Doctor};
use arogya::config::Config;
use arogya::store::FileStore;

pub fn register(
    config: &Config,
    name: String,
    email: String,
    license: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = FileStore::open(&config.store_path)?;
    let doctor = Doctor {
        name,
        email,
        license,
    };
    auth::register(&mut store, &doctor)?;

    println!("Doctor registered: {} ({})", doctor.name, doctor.license);
    Ok(())
}

pub fn login(
    config: &Config,
    email: &str,
    license: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open(&config.store_path)?;
    let doctor = auth::login(&store, email, license)?;

    println!("Login successful: {}", doctor.name);
    Ok(())
}
