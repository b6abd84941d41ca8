use console::style;
use regex::Regex;

pub fn success(msg: &str) -> String { style(msg).green().to_string() }
pub fn warn(msg: &str) -> String { style(msg).yellow().to_string() }
pub fn error(msg: &str) -> String { style(msg).red().to_string() }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Strong(&'a str),
}

/// Split text on `**bold**` runs, keeping the order of the pieces.
pub fn emphasis_segments(text: &str) -> Vec<Segment<'_>> {
    let re = Regex::new(r"\*\*([^*]+)\*\*").expect("valid regex");
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else { continue };
        if whole.start() > last {
            segments.push(Segment::Plain(&text[last..whole.start()]));
        }
        segments.push(Segment::Strong(inner.as_str()));
        last = whole.end();
    }
    if last < text.len() {
        segments.push(Segment::Plain(&text[last..]));
    }
    segments
}

/// Text with its `**bold**` runs styled for the terminal and the markers removed.
pub fn render_emphasis(text: &str) -> String {
    emphasis_segments(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(s) => s.to_string(),
            Segment::Strong(s) => style(s).bold().to_string(),
        })
        .collect()
}
