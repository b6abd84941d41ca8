use console::style;

use pannypal_chat::interpret::chart::ChartSpec;
use pannypal_chat::interpret::currency::{format_compact, format_value};
use pannypal_chat::interpret::message::Role;
use pannypal_chat::interpret::MessageView;
use pannypal_chat::utils::format::render_emphasis;

pub fn render_view(view: &MessageView) -> String {
    let who = match view.role {
        Role::User => style("You").cyan().bold(),
        Role::Assistant => style("Assistant").magenta().bold(),
    };
    let when = view.created_at.format("%Y-%m-%d %H:%M");
    let mut lines = vec![format!("{} {}", who, style(when).dim())];

    let Some(payload) = &view.structured else {
        lines.push(view.intro.clone());
        push_chart(&mut lines, view);
        return lines.join("\n");
    };

    if !view.intro.is_empty() {
        lines.push(view.intro.clone());
    }
    if !payload.answer.is_empty() {
        lines.push(format!("{} {}", style("*").magenta(), render_emphasis(&payload.answer)));
    }
    if !payload.insights.is_empty() {
        lines.push(style("INSIGHTS").yellow().bold().to_string());
        lines.extend(payload.insights.iter().map(|i| format!("  - {}", render_emphasis(i))));
    }
    if !payload.recommendations.is_empty() {
        lines.push(style("RECOMMENDATIONS").green().bold().to_string());
        lines.extend(
            payload
                .recommendations
                .iter()
                .enumerate()
                .map(|(idx, rec)| format!("  {}. {}", idx + 1, render_emphasis(rec))),
        );
    }
    push_chart(&mut lines, view);
    lines.join("\n")
}

fn push_chart(lines: &mut Vec<String>, view: &MessageView) {
    if let Some(chart) = &view.chart {
        lines.extend(chart_table(chart));
    } else if let Some(hint) = &view.hint {
        lines.push(format!("{} {}", style("Visualization available:").blue().bold(), hint));
    }
}

/// The chart as rows of label, formatted value and share of the total.
fn chart_table(chart: &ChartSpec) -> Vec<String> {
    let format = chart.config.as_ref().and_then(|c| c.format);
    let total: f64 = chart.values.iter().sum();
    let width = chart.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let peak = chart.values.iter().cloned().fold(0.0_f64, f64::max);

    let mut rows = vec![format!(
        "{} ({}, up to {})",
        style("CHART").blue().bold(),
        chart.chart_type.as_str(),
        format_compact(peak)
    )];
    for (label, value) in chart.labels.iter().zip(&chart.values) {
        let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
        rows.push(format!(
            "  {:<width$}  {:>18}  {:>3.0}%",
            label,
            format_value(*value, format),
            share,
            width = width
        ));
    }
    rows
}
