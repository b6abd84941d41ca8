use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use tracing::debug;

use pannypal_chat::config::settings::{InputKind, Settings};
use pannypal_chat::interpret::chart::ChartDecision;
use pannypal_chat::interpret::message::{decode_conversation, decode_message, RawMessage};
use pannypal_chat::interpret::visualizer::{chart_from_raw, visualize_response};
use pannypal_chat::interpret::interpret_with;
use pannypal_chat::utils::format::{success, warn};

use crate::cli::args::IoArgs;
use crate::cli::render::render_view;

fn load_messages(settings: &Settings, file: Option<&str>, io: &IoArgs) -> Result<Vec<RawMessage>> {
    let text = pannypal_chat::utils::io::read_input(file)?;
    let kind = io.input_kind.unwrap_or(settings.default_input_kind);
    debug!(?kind, bytes = text.len(), "decoding input");
    let messages = match kind {
        InputKind::Text => {
            if text.trim().is_empty() {
                return Err(anyhow!("Input is empty. Provide a reply via file or stdin."));
            }
            vec![RawMessage::assistant(text)]
        }
        InputKind::Message => vec![decode_message(&text)?],
        InputKind::Conversation => decode_conversation(&text)?,
    };
    Ok(messages)
}

fn emit(io: &IoArgs, content: &str) -> Result<()> {
    match &io.output_file {
        Some(out) => {
            pannypal_chat::utils::io::write_string(out, content)?;
            eprintln!("{}", success(&format!("Wrote {}", out)));
        }
        None => println!("{}", content),
    }
    Ok(())
}

pub fn handle_render(settings: &Settings, file: Option<&str>, io: &IoArgs) -> Result<()> {
    let options = settings.interpret_options();
    let rendered = load_messages(settings, file, io)?
        .iter()
        .map(|message| render_view(&interpret_with(message, &options)))
        .collect::<Vec<_>>()
        .join("\n\n");
    emit(io, &rendered)
}

pub fn handle_chart(settings: &Settings, file: Option<&str>, pretty: bool, io: &IoArgs) -> Result<()> {
    let options = settings.interpret_options();
    let decisions: Vec<ChartDecision> = load_messages(settings, file, io)?
        .iter()
        .map(|message| {
            let view = interpret_with(message, &options);
            ChartDecision { chart: view.chart, hint: view.hint }
        })
        .collect();

    let value = match decisions.as_slice() {
        [single] => serde_json::to_value(single)?,
        _ => serde_json::to_value(&decisions)?,
    };
    let json = if pretty { serde_json::to_string_pretty(&value)? } else { serde_json::to_string(&value)? };
    emit(io, &json)
}

pub fn handle_visualize(settings: &Settings, kind: Option<&str>, file: Option<&str>, io: &IoArgs) -> Result<()> {
    let text = pannypal_chat::utils::io::read_input(file)?;
    let chart = match kind {
        Some(kind) => {
            let raw: Value = serde_json::from_str(&text).context("Raw data is not valid JSON")?;
            chart_from_raw(kind, &raw, &settings.palette)
        }
        None => visualize_response(&text, &settings.palette),
    };
    if chart.is_none() {
        eprintln!("{}", warn("No chart could be built from this data"));
    }
    emit(io, &serde_json::to_string_pretty(&chart)?)
}

pub fn handle_config_init(force: bool, scope: Option<&str>) -> Result<()> {
    let path = match scope {
        Some("project") => {
            let root = std::env::current_dir().context("Cannot resolve current directory")?;
            Settings::init_scoped(force, Some(&root))?
        }
        _ => Settings::init_scoped(force, None)?,
    };
    println!("{}", success(&format!("Created config at {}", path.display())));
    Ok(())
}

pub fn handle_config_list(settings: &Settings) -> Result<()> {
    println!("label-max-chars: {}", settings.label_max_chars);
    println!("min-chart-points: {}", settings.min_chart_points);
    println!("palette: {}", settings.palette.join(","));
    println!("color: {}", settings.color);
    println!("input-kind: {:?}", settings.default_input_kind);
    Ok(())
}

pub fn handle_config_set(settings: &mut Settings, key: &str, value: &str, explicit: Option<&Path>) -> Result<()> {
    settings.set_key(key, value)?;
    settings.save_with(None, explicit)?;
    println!("{}", success(&format!("Set {} = {}", key, value)));
    Ok(())
}
