//! Structured-value renderer: converts a [`JsonValue`] into a display tree.

use crate::value::{JsonValue, grow_stack};
use std::fmt::Display;

/// Display tree with the same shape as the value it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayNode {
    /// Text of a scalar.
    Leaf(String),
    /// One row per object key, in insertion order.
    KeyValueTable(Vec<(String, DisplayNode)>),
    /// One item per array element, in order.
    List(Vec<DisplayNode>),
}

impl DisplayNode {
    pub fn leaf(text: impl Into<String>) -> Self {
        DisplayNode::Leaf(text.into())
    }

    pub fn leaf_text(&self) -> Option<&str> {
        match self {
            DisplayNode::Leaf(text) => Some(text),
            _ => None,
        }
    }

    pub fn rows(&self) -> Option<&[(String, DisplayNode)]> {
        match self {
            DisplayNode::KeyValueTable(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&[DisplayNode]> {
        match self {
            DisplayNode::List(items) => Some(items),
            _ => None,
        }
    }
}

impl Drop for DisplayNode {
    fn drop(&mut self) {
        let mut pending = match self {
            DisplayNode::List(items) => std::mem::take(items),
            DisplayNode::KeyValueTable(rows) => {
                std::mem::take(rows).into_iter().map(|(_, node)| node).collect()
            }
            DisplayNode::Leaf(_) => return,
        };
        while let Some(mut node) = pending.pop() {
            match &mut node {
                DisplayNode::List(items) => pending.append(items),
                DisplayNode::KeyValueTable(rows) => pending
                    .extend(std::mem::take(rows).into_iter().map(|(_, node)| node)),
                DisplayNode::Leaf(_) => {}
            }
        }
    }
}

/// Text shown for a scalar.
///
/// Strings are shown as-is, without quotes. Containers have no scalar text.
pub fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => Some("null".to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Object(_) | JsonValue::Array(_) => None,
    }
}

/// A container whose children are still being rendered.
enum Frame<'a> {
    Table {
        pending: std::slice::Iter<'a, (String, JsonValue)>,
        /// Key of the child currently being rendered
        key: &'a str,
        rows: Vec<(String, DisplayNode)>,
    },
    List {
        pending: std::slice::Iter<'a, JsonValue>,
        items: Vec<DisplayNode>,
    },
}

impl<'a> Frame<'a> {
    fn next_child(&mut self) -> Option<&'a JsonValue> {
        match self {
            Frame::Table { pending, key, .. } => {
                let (k, v) = pending.next()?;
                *key = k.as_str();
                Some(v)
            }
            Frame::List { pending, .. } => pending.next(),
        }
    }

    fn accept(&mut self, node: DisplayNode) {
        match self {
            Frame::Table { key, rows, .. } => rows.push((key.to_string(), node)),
            Frame::List { items, .. } => items.push(node),
        }
    }

    fn finish(self) -> DisplayNode {
        match self {
            Frame::Table { rows, .. } => DisplayNode::KeyValueTable(rows),
            Frame::List { items, .. } => DisplayNode::List(items),
        }
    }
}

/// Push a frame for a container, or return the leaf for a scalar.
fn enter<'a>(
    value: &'a JsonValue,
    stack: &mut Vec<Frame<'a>>,
) -> Option<DisplayNode> {
    match value {
        JsonValue::Object(entries) => {
            stack.push(Frame::Table {
                pending: entries.iter(),
                key: "",
                rows: Vec::with_capacity(entries.len()),
            });
            None
        }
        JsonValue::Array(elements) => {
            stack.push(Frame::List {
                pending: elements.iter(),
                items: Vec::with_capacity(elements.len()),
            });
            None
        }
        JsonValue::Null
        | JsonValue::Bool(_)
        | JsonValue::Number(_)
        | JsonValue::String(_) => scalar_text(value).map(DisplayNode::Leaf),
    }
}

/// Render a value into a display tree.
///
/// Depth-first over an explicit stack, so nesting depth is bounded by heap
/// memory rather than the call stack.
///
/// The loop alternates between two steps:
/// 1. a finished node (leaf or popped container) is handed to the container
///    on top of the stack, or returned when the stack is empty
/// 2. the container on top of the stack yields its next child, which is
///    entered; an exhausted container is popped and becomes the finished node
pub fn render(value: &JsonValue) -> DisplayNode {
    let mut stack: Vec<Frame<'_>> = Vec::new();
    let mut finished = enter(value, &mut stack);

    loop {
        if let Some(node) = finished.take() {
            match stack.last_mut() {
                Some(frame) => frame.accept(node),
                None => return node,
            }
        }

        if let Some(frame) = stack.last_mut() {
            finished = match frame.next_child() {
                Some(child) => enter(child, &mut stack),
                None => stack.pop().map(Frame::finish),
            };
        }
    }
}

impl Display for DisplayNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_with_indent(f, 0, None)
    }
}

impl DisplayNode {
    /// One line per node: `table`, `list` or the leaf text, prefixed by the
    /// row key (`key: `) or item index (`[i] `).
    fn fmt_with_indent(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        indent: usize,
        label: Option<&str>,
    ) -> std::fmt::Result {
        grow_stack(|| {
            f.write_str(&" ".repeat(indent))?;
            if let Some(label) = label {
                f.write_str(label)?;
            }

            match self {
                DisplayNode::Leaf(text) => writeln!(f, "{}", text),
                DisplayNode::KeyValueTable(rows) => {
                    writeln!(f, "table")?;
                    for (key, child) in rows {
                        let label = format!("{}: ", key);
                        child.fmt_with_indent(f, indent + 2, Some(&label))?;
                    }
                    Ok(())
                }
                DisplayNode::List(items) => {
                    writeln!(f, "list")?;
                    for (idx, child) in items.iter().enumerate() {
                        let label = format!("[{}] ", idx);
                        child.fmt_with_indent(f, indent + 2, Some(&label))?;
                    }
                    Ok(())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use rstest::rstest;

    fn decode(text: &str) -> JsonValue {
        JsonValue::decode(text).unwrap()
    }

    fn table(rows: Vec<(&str, DisplayNode)>) -> DisplayNode {
        DisplayNode::KeyValueTable(
            rows.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        )
    }

    /// Walks value and node side by side and checks they have the same shape.
    fn same_shape(value: &JsonValue, node: &DisplayNode) -> bool {
        match (value, node) {
            (JsonValue::Object(entries), DisplayNode::KeyValueTable(rows)) => {
                entries.len() == rows.len()
                    && entries.iter().zip(rows).all(|((k, v), (label, n))| {
                        k == label && same_shape(v, n)
                    })
            }
            (JsonValue::Array(elements), DisplayNode::List(items)) => {
                elements.len() == items.len()
                    && elements.iter().zip(items).all(|(v, n)| same_shape(v, n))
            }
            (JsonValue::Object(_) | JsonValue::Array(_), _) => false,
            (_, DisplayNode::Leaf(_)) => true,
            _ => false,
        }
    }

    #[rstest]
    #[case("42", "42")]
    #[case("-7", "-7")]
    #[case("2.5", "2.5")]
    #[case(r#""hi""#, "hi")]
    #[case(r#""""#, "")]
    #[case(r#""line \"quoted\"""#, r#"line "quoted""#)]
    #[case("true", "true")]
    #[case("false", "false")]
    #[case("null", "null")]
    fn test_scalar_passthrough(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(render(&decode(input)), DisplayNode::leaf(expected));
    }

    #[test]
    fn test_object_rows_keep_insertion_order() {
        let node = render(&decode(r#"{"b": 1, "a": 2}"#));
        assert_eq!(
            node,
            table(vec![
                ("b", DisplayNode::leaf("1")),
                ("a", DisplayNode::leaf("2")),
            ])
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(render(&decode("{}")), DisplayNode::KeyValueTable(vec![]));
        assert_eq!(render(&decode("[]")), DisplayNode::List(vec![]));
    }

    #[test]
    fn test_mixed_depth() {
        let node = render(&decode(r#"{"a": [1, {"b": "x"}], "c": null}"#));
        assert_eq!(
            node,
            table(vec![
                (
                    "a",
                    DisplayNode::List(vec![
                        DisplayNode::leaf("1"),
                        table(vec![("b", DisplayNode::leaf("x"))]),
                    ])
                ),
                ("c", DisplayNode::leaf("null")),
            ])
        );
    }

    #[test]
    fn test_mixed_type_array() {
        let node = render(&decode(r#"[null, true, 3, "s", [], {}]"#));
        assert_eq!(
            node,
            DisplayNode::List(vec![
                DisplayNode::leaf("null"),
                DisplayNode::leaf("true"),
                DisplayNode::leaf("3"),
                DisplayNode::leaf("s"),
                DisplayNode::List(vec![]),
                DisplayNode::KeyValueTable(vec![]),
            ])
        );
    }

    #[test]
    fn test_shape_matches_input() {
        let value = decode(
            r#"{
                "patient": {"name": "Ravi", "age": 67, "allergies": []},
                "findings": [
                    {"test": "HbA1c", "value": 7.9, "flags": ["high"]},
                    {"test": "LDL", "value": null}
                ],
                "notes": [[1, 2], [], [[{}]]]
            }"#,
        );
        let node = render(&value);
        assert!(same_shape(&value, &node));
    }

    #[test]
    fn test_render_is_idempotent_and_pure() {
        let value = decode(r#"{"k": [1, {"n": null}], "z": "end"}"#);
        let before = value.clone();
        let first = render(&value);
        let second = render(&value);
        assert_eq!(first, second);
        assert_eq!(value, before);
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 1_000;
        let mut value = JsonValue::from("bottom");
        for idx in 0..depth {
            value = if idx % 2 == 0 {
                JsonValue::Array(vec![value])
            } else {
                JsonValue::Object(vec![("k".to_string(), value)])
            };
        }

        let node = render(&value);

        let mut current = &node;
        let mut levels = 0;
        loop {
            current = match current {
                DisplayNode::List(items) => &items[0],
                DisplayNode::KeyValueTable(rows) => &rows[0].1,
                DisplayNode::Leaf(text) => {
                    assert_eq!(text, "bottom");
                    break;
                }
            };
            levels += 1;
        }
        assert_eq!(levels, depth);
    }

    #[test]
    fn test_very_deep_tree_on_small_stack() {
        let depth = 200_000;
        let handle = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || {
                let mut value = JsonValue::from(true);
                for _ in 0..depth {
                    value = JsonValue::Array(vec![value]);
                }

                let node = render(&value);
                let mut current = &node;
                let mut levels = 0;
                while let Some(items) = current.items() {
                    current = &items[0];
                    levels += 1;
                }
                assert_eq!(current.leaf_text(), Some("true"));
                // Both trees are dropped here.
                levels
            })
            .unwrap();
        assert_eq!(handle.join().unwrap(), depth);
    }

    #[test]
    fn test_accessors() {
        let node = render(&decode(r#"{"a": ["x"]}"#));
        let rows = node.rows().unwrap();
        assert_eq!(rows[0].0, "a");
        let items = rows[0].1.items().unwrap();
        assert_eq!(items[0].leaf_text(), Some("x"));
        assert!(node.items().is_none());
        assert!(node.leaf_text().is_none());
    }

    #[test]
    fn test_outline() {
        let node = render(&decode(
            r#"{"a": [1, {"b": "x"}], "c": null, "d": {}, "e": []}"#,
        ));
        assert_snapshot!(node.to_string(), @r"
        table
          a: list
            [0] 1
            [1] table
              b: x
          c: null
          d: table
          e: list
        ");
    }
}
