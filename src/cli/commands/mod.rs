pub mod doctor;
pub mod render;
pub mod save;
pub mod show;
pub mod summarize;

use crate::cli::args::{OutputArgs, RenderFormat};
use arogya::export::{render_node, render_report_page};
use arogya::JsonValue;
use arogya::render::render;

/// Render `value` in the requested format and write it out.
pub fn write_rendered(
    value: &JsonValue,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let node = render(value);
    let mut out = match output.format {
        RenderFormat::Outline => node.to_string(),
        RenderFormat::Html => render_node(&node).into_string(),
        RenderFormat::Page => render_report_page(&output.title, &node)?,
        RenderFormat::Json => serde_json::to_string_pretty(value)?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }

    if let Some(output_path) = &output.output {
        std::fs::write(output_path, &out)?;
        eprintln!("Output written to: {}", output_path.display());
    } else {
        print!("{}", out);
    }

    Ok(())
}
