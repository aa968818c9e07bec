//! Split companion replies into display segments.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Serialize;

// Bold spans never cross a line break
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*.*?\*\*").expect("valid regex"));
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s]+").expect("valid regex"));

/// A piece of reply text with its presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "camelCase")]
pub enum Segment {
    Text(String),
    Bold(String),
    Link(String),
}

/// Break `text` into plain, bold (`**...**`) and link segments.
///
/// Links are detected only outside bold spans.
pub fn format_response(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for bold in BOLD_RE.find_iter(text) {
        push_plain(&mut segments, &text[cursor..bold.start()]);
        let inner = &bold.as_str()[2..bold.as_str().len() - 2];
        segments.push(Segment::Bold(inner.to_string()));
        cursor = bold.end();
    }
    push_plain(&mut segments, &text[cursor..]);

    segments
}

fn push_plain(segments: &mut Vec<Segment>, text: &str) {
    let mut cursor = 0;
    for link in URL_RE.find_iter(text) {
        if link.start() > cursor {
            segments.push(Segment::Text(text[cursor..link.start()].to_string()));
        }
        segments.push(Segment::Link(link.as_str().to_string()));
        cursor = link.end();
    }
    if cursor < text.len() {
        segments.push(Segment::Text(text[cursor..].to_string()));
    }
}
