/// Standalone report page using minijinja
use super::html::render_summary_table;
use crate::render::DisplayNode;
use minijinja::Environment;
use serde::Serialize;

const REPORT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.5;
            color: #1f2933;
            max-width: 960px;
            margin: 0 auto;
            padding: 2rem;
        }

        h1 {
            font-size: 1.5rem;
            margin-bottom: 1rem;
        }

        main {
            background: #f3f4f6;
            padding: 1rem;
            border-radius: 8px;
        }

        table {
            width: 100%;
            border-collapse: collapse;
        }

        th, td {
            text-align: left;
            vertical-align: top;
            padding: 0.4rem 0.6rem;
            border-bottom: 1px solid #e5e7eb;
        }

        td.key {
            font-weight: 600;
            white-space: nowrap;
        }

        ul.kv-list {
            list-style: disc inside;
        }
    </style>
</head>
<body>
    <h1>{{ title }}</h1>
    <main>
        {{ content | safe }}
    </main>
</body>
</html>
"#;

#[derive(Debug, Serialize)]
struct ReportPage<'a> {
    title: &'a str,
    content: String,
}

/// Renders a report summary as a complete HTML document
pub fn render_report_page(
    title: &str,
    node: &DisplayNode,
) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("report.html", REPORT_TEMPLATE)?;

    let context = ReportPage {
        title,
        content: render_summary_table(node).into_string(),
    };
    let template = env.get_template("report.html")?;
    template.render(context)
}
