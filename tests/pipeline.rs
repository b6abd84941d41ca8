use pannypal_chat::interpret::chart::ChartType;
use pannypal_chat::interpret::message::{decode_conversation, decode_message, RawMessage, Role};
use pannypal_chat::interpret::{interpret, interpret_with, InterpretOptions};
use serde_json::json;

#[test]
fn test_summary_with_categories_renders_pie() {
    let content = "Here's your summary.\n\n```json\n{\"answer\":\"You're on track.\",\"top_categories\":[{\"category\":\"Food\",\"amount\":500000},{\"category\":\"Transport\",\"amount\":200000}]}\n```";
    let view = interpret(&RawMessage::assistant(content));
    assert_eq!(view.intro, "Here's your summary.");
    assert_eq!(view.structured.as_ref().unwrap().answer, "You're on track.");
    let chart = view.chart.unwrap();
    assert_eq!(chart.chart_type, ChartType::Pie);
    assert_eq!(chart.labels, vec!["Food", "Transport"]);
    assert_eq!(chart.values, vec![500000.0, 200000.0]);
    assert_eq!(view.hint, None);
}

#[test]
fn test_malformed_block_still_scans_prose() {
    let content = "Belanja makanan (Rp 500.000) dan transport (Rp 200.000)\n```json\n{broken\n```";
    let view = interpret(&RawMessage::assistant(content));
    assert_eq!(view.intro, content);
    assert!(view.structured.is_none());
    let chart = view.chart.unwrap();
    assert_eq!(chart.chart_type, ChartType::Bar);
    assert_eq!(chart.labels, vec!["Belanja makanan", "dan transport"]);
    assert_eq!(chart.values, vec![500_000.0, 200_000.0]);
}

#[test]
fn test_same_amount_captured_twice_gives_no_chart() {
    let content = "**Makanan:** Rp 500.000. Total makanan (Rp 500.000)";
    let view = interpret(&RawMessage::assistant(content));
    assert_eq!(view.chart, None);
}

#[test]
fn test_declared_line_type_for_prose_points() {
    let content = "Ringkasan\n```json\n{\"answer\":\"Januari **Rp 1.000.000** lalu Februari **Rp 1.200.000**\",\"visualization_type\":\"line\"}\n```";
    let view = interpret(&RawMessage::assistant(content));
    let chart = view.chart.unwrap();
    assert_eq!(chart.chart_type, ChartType::Line);
    assert_eq!(chart.values, vec![1_000_000.0, 1_200_000.0]);
}

#[test]
fn test_hint_surfaces_when_nothing_to_chart() {
    let content = "```json\n{\"answer\":\"Belum ada data.\",\"needs_visualization\":true,\"visualization_hint\":\"Tren bulanan\"}\n```";
    let view = interpret(&RawMessage::assistant(content));
    assert_eq!(view.chart, None);
    assert_eq!(view.hint.as_deref(), Some("Tren bulanan"));
}

#[test]
fn test_backend_visualization_wins() {
    let message = RawMessage::assistant("Top categories (Rp 1.000) and more (Rp 2.000)").with_visualization(json!({
        "type": "pie",
        "data": { "labels": ["A", "B"], "values": [10.0, 20.0] }
    }));
    let view = interpret(&message);
    let chart = view.chart.unwrap();
    assert_eq!(chart.chart_type, ChartType::Pie);
    assert_eq!(chart.labels, vec!["A", "B"]);
}

#[test]
fn test_user_messages_are_not_interpreted() {
    let content = "Tolong cek\n```json\n{\"answer\":\"x\"}\n```";
    let view = interpret(&RawMessage::user(content));
    assert_eq!(view.role, Role::User);
    assert_eq!(view.intro, content);
    assert!(view.structured.is_none());
    assert!(view.chart.is_none());
}

#[test]
fn test_interpretation_is_repeatable() {
    let message = RawMessage::assistant("Makan di luar (Rp 250.000) dan **Kopi:** Rp 80.000");
    let options = InterpretOptions::default();
    assert_eq!(interpret_with(&message, &options), interpret_with(&message, &options));
}

#[test]
fn test_invalid_categories_never_chart() {
    let content = "Ringkasan\n```json\n{\"answer\":\"Belum lengkap.\",\"top_categories\":[{\"category\":\"A\",\"amount\":0},{\"category\":\"\",\"amount\":-5}]}\n```";
    let view = interpret(&RawMessage::assistant(content));
    assert_eq!(view.structured.as_ref().unwrap().top_categories.len(), 2);
    assert_eq!(view.chart, None);
}

#[test]
fn test_decode_backend_message() {
    let text = r#"{
        "session_id": "s-1",
        "role": "assistant",
        "content": "Hai",
        "metadata": { "visualization": { "type": "bar", "data": { "labels": ["a", "b"], "values": [1, 2] } } },
        "token_used": 42,
        "response_time": 900,
        "created_at": "2024-05-01T10:00:00+07:00"
    }"#;
    let message = decode_message(text).unwrap();
    assert_eq!(message.session_id.as_deref(), Some("s-1"));
    assert_eq!(message.created_at.to_rfc3339(), "2024-05-01T03:00:00+00:00");
    assert!(message.backend_visualization().is_some());
    assert_eq!(interpret(&message).chart.unwrap().values, vec![1.0, 2.0]);
}

#[test]
fn test_decode_conversation_oldest_first() {
    let text = r#"{ "messages": [
        { "role": "assistant", "content": "jawab", "metadata": null, "created_at": "2024-05-01T10:00:05Z" },
        { "role": "user", "content": "tanya", "created_at": "2024-05-01T10:00:00Z" }
    ] }"#;
    let messages = decode_conversation(text).unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[1].content, "jawab");
    assert!(messages[1].backend_visualization().is_none());

    assert!(decode_conversation("{\"foo\": 1}").is_err());
    assert!(decode_conversation("[{\"role\": \"robot\"}]").is_err());
}
