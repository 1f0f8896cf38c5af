/// HTML presentation of display trees: nested tables for objects, lists for
/// arrays, spans for scalars.
use crate::render::DisplayNode;
use crate::value::grow_stack;
use maud::{Markup, html};

/// Recursively render a display node as markup
pub fn render_node(node: &DisplayNode) -> Markup {
    grow_stack(|| match node {
        DisplayNode::Leaf(text) => html! { span .leaf { (text) } },
        DisplayNode::KeyValueTable(rows) => html! {
            table .kv-table {
                tbody {
                    @for (key, child) in rows {
                        (render_row(key, child))
                    }
                }
            }
        },
        DisplayNode::List(items) => html! {
            ul .kv-list {
                @for item in items {
                    li { (render_node(item)) }
                }
            }
        },
    })
}

fn render_row(key: &str, child: &DisplayNode) -> Markup {
    html! {
        tr {
            td .key { (key) }
            td { (render_node(child)) }
        }
    }
}

/// Render the report summary.
///
/// The top-level table gets a `Category | Details` header. Any other root is
/// rendered as a plain node.
pub fn render_summary_table(node: &DisplayNode) -> Markup {
    let Some(rows) = node.rows() else {
        return render_node(node);
    };

    html! {
        table .summary-table {
            thead {
                tr {
                    th { "Category" }
                    th { "Details" }
                }
            }
            tbody {
                @for (key, child) in rows {
                    (render_row(key, child))
                }
            }
        }
    }
}
