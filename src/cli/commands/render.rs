//! Render command implementation.
use super::write_rendered;
use crate::cli::args::OutputArgs;
use arogya::JsonValue;
use std::io::Read;
use std::path::Path;

pub fn run(
    input: &Path,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };

    let value = JsonValue::decode(&text)?;
    write_rendered(&value, output)
}
