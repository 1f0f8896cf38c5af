use arogya::export::{render_node, render_report_page};
use arogya::{JsonValue, render};
use scraper::{ElementRef, Html, Selector};

fn sample_summary() -> JsonValue {
    JsonValue::decode(
        r#"{
            "Patient Details": {"Name": "Suresh <Iyer>", "Age": 58},
            "Test Results": [
                {"Test": "Fasting glucose", "Value": "142 mg/dL", "Flag": "High"},
                {"Test": "Creatinine", "Value": 1.1, "Flag": null}
            ],
            "Recommendations": ["Repeat HbA1c in 3 months", "Reduce salt"],
            "Follow-up": {}
        }"#,
    )
    .unwrap()
}

fn select<'a>(element: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    let selector = Selector::parse(css).unwrap();
    element.select(&selector).collect()
}

fn child_elements(element: ElementRef) -> Vec<ElementRef> {
    element.children().filter_map(ElementRef::wrap).collect()
}

fn text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

#[test]
fn test_fragment_mirrors_value_shape() {
    let node = render(&sample_summary());
    let fragment = Html::parse_fragment(&render_node(&node).into_string());
    let root = fragment.root_element();

    // Root, "Patient Details", two results and the empty "Follow-up"
    assert_eq!(select(root, "table.kv-table").len(), 5);
    // "Test Results" and "Recommendations"
    assert_eq!(select(root, "ul.kv-list").len(), 2);

    let top = select(root, "table.kv-table")[0];
    let top_keys: Vec<String> = child_elements(top)
        .into_iter()
        .flat_map(child_elements)
        .filter_map(|row| child_elements(row).into_iter().next())
        .map(|cell| text(&cell))
        .collect();
    assert_eq!(
        top_keys,
        ["Patient Details", "Test Results", "Recommendations", "Follow-up"]
    );

    let leaves: Vec<String> = select(root, "span.leaf").iter().map(text).collect();
    assert_eq!(
        leaves,
        [
            "Suresh <Iyer>",
            "58",
            "Fasting glucose",
            "142 mg/dL",
            "High",
            "Creatinine",
            "1.1",
            "null",
            "Repeat HbA1c in 3 months",
            "Reduce salt",
        ]
    );
}

#[test]
fn test_page_has_header_and_escaped_text() {
    let node = render(&sample_summary());
    let page = render_report_page("Report Summary", &node).unwrap();
    assert!(page.contains("Suresh &lt;Iyer&gt;"));

    let document = Html::parse_document(&page);
    let root = document.root_element();

    let headers: Vec<String> =
        select(root, "table.summary-table > thead th").iter().map(text).collect();
    assert_eq!(headers, ["Category", "Details"]);

    let rows = select(root, "table.summary-table > tbody > tr");
    assert_eq!(rows.len(), 4);
    let follow_up = select(rows[3], "td");
    assert_eq!(text(&follow_up[0]), "Follow-up");
    assert_eq!(select(follow_up[1], "table.kv-table > tbody > tr").len(), 0);
}
