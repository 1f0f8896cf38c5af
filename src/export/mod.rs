pub mod html;
pub mod template;

pub use html::{render_node, render_summary_table};
pub use template::render_report_page;
