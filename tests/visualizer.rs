use pannypal_chat::interpret::chart::{ChartType, DEFAULT_PALETTE};
use pannypal_chat::interpret::visualizer::{chart_from_raw, month_name, visualize_response};
use serde_json::json;

fn palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_bar_from_categories_and_months() {
    let raw = json!({
        "categories": [
            { "category_name": "Makanan", "amount": 100.0 },
            { "category_name": "Sewa", "amount": 300.0 }
        ],
        "months": [ { "month": 3, "expense": 50.0 } ]
    });
    let chart = chart_from_raw("column", &raw, &palette()).unwrap();
    assert_eq!(chart.chart_type, ChartType::Bar);
    assert_eq!(chart.labels, vec!["Makanan", "Sewa", "Maret"]);
    assert_eq!(chart.values, vec![100.0, 300.0, 50.0]);
    assert_eq!(chart.config.unwrap().x_label.as_deref(), Some("Kategori/Bulan"));
}

#[test]
fn test_line_prefers_net_over_expense() {
    let raw = json!({ "months": [
        { "month": 1, "net": 50.0, "expense": 10.0 },
        { "month": 2, "expense": 70.0 },
        { "month": 13, "net": 5.0 }
    ] });
    let chart = chart_from_raw("line", &raw, &palette()).unwrap();
    assert_eq!(chart.labels, vec!["Januari", "Februari", "Unknown"]);
    assert_eq!(chart.values, vec![50.0, 70.0, 5.0]);
    assert_eq!(chart.config.unwrap().x_label.as_deref(), Some("Periode"));
}

#[test]
fn test_pie_gets_a_colour_per_slice() {
    let raw = json!({ "categories": [
        { "category_name": "A", "amount": 1.0 },
        { "category_name": "B", "amount": 2.0 },
        { "category_name": "C", "amount": 3.0 }
    ] });
    let chart = chart_from_raw("donut", &raw, &palette()).unwrap();
    assert_eq!(chart.chart_type, ChartType::Pie);
    assert_eq!(chart.colors.unwrap().len(), 3);
}

#[test]
fn test_table_and_sparse_data_give_no_chart() {
    let raw = json!({ "categories": [
        { "category_name": "A", "amount": 1.0 },
        { "category_name": "B", "amount": 2.0 }
    ] });
    assert!(chart_from_raw("table", &raw, &palette()).is_none());

    let single = json!({ "categories": [ { "category_name": "A", "amount": 1.0 } ] });
    assert!(chart_from_raw("bar", &single, &palette()).is_none());
    assert!(chart_from_raw("bar", &json!(42), &palette()).is_none());
}

#[test]
fn test_unknown_kind_defaults_to_bar_and_string_data_is_decoded() {
    let raw = json!("{\"categories\":[{\"category_name\":\"A\",\"amount\":1},{\"category_name\":\"B\",\"amount\":2}]}");
    let chart = chart_from_raw("scatter", &raw, &palette()).unwrap();
    assert_eq!(chart.chart_type, ChartType::Bar);
    assert_eq!(chart.labels, vec!["A", "B"]);
}

#[test]
fn test_month_name_bounds() {
    assert_eq!(month_name(1), "Januari");
    assert_eq!(month_name(12), "Desember");
    assert_eq!(month_name(0), "Unknown");
    assert_eq!(month_name(-4), "Unknown");
}

#[test]
fn test_visualize_whole_json_reply() {
    let reply = r#"{
        "needs_visualization": true,
        "visualization_type": "pie",
        "data": { "categories": [
            { "category_name": "Makanan", "amount": 700000 },
            { "category_name": "Transport", "amount": 300000 }
        ] }
    }"#;
    let chart = visualize_response(reply, &palette()).unwrap();
    assert_eq!(chart.chart_type, ChartType::Pie);
    assert_eq!(chart.values, vec![700000.0, 300000.0]);

    let not_needed = r#"{ "needs_visualization": false, "categories": [] }"#;
    assert!(visualize_response(not_needed, &palette()).is_none());
    assert!(visualize_response("bukan json", &palette()).is_none());
}
