//! Markdown subset rendering
//!
//! Post bodies are written in a small markdown dialect: headings (levels 1-4),
//! paragraphs, unordered lists, fenced code blocks and blank-line breaks, with
//! bold, inline code and links inside paragraph and list text.
//!
//! The renderer works line by line and never backtracks. It produces typed
//! [`Block`] nodes; turning them into markup is left to the templates, which
//! escape every piece of text they emit.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Serialize;

lazy_static! {
    static ref BOLD_RE: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref CODE_RE: Regex = Regex::new(r"`([^`]+)`").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap();
}

const FENCE: &str = "```";
const MAX_HEADING_LEVEL: usize = 4;

/// A block-level node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Heading with level 1-4; text is kept verbatim
    Heading { level: u8, text: String },

    /// One line of prose
    Paragraph { spans: Vec<Inline> },

    /// Consecutive `- ` / `* ` lines
    List { items: Vec<ListItem> },

    /// Fenced code; the language hint does not affect rendering
    CodeBlock {
        language: Option<String>,
        code: String,
    },

    /// Blank line
    Break,
}

/// One entry of an unordered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub spans: Vec<Inline>,
}

/// An inline span inside paragraph or list-item text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String },
    Bold { text: String },
    Code { text: String },
    /// Inline code inside bold text
    BoldCode { text: String },
    Link { label: String, url: String },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Inline::Bold { text: text.into() }
    }

    pub fn code(text: impl Into<String>) -> Self {
        Inline::Code { text: text.into() }
    }

    pub fn bold_code(text: impl Into<String>) -> Self {
        Inline::BoldCode { text: text.into() }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Inline::Link {
            label: label.into(),
            url: url.into(),
        }
    }

    /// Visible text of the span
    pub fn visible_text(&self) -> &str {
        match self {
            Inline::Text { text }
            | Inline::Bold { text }
            | Inline::Code { text }
            | Inline::BoldCode { text } => text,
            Inline::Link { label, .. } => label,
        }
    }
}

/// Render a post body into block nodes
///
/// Rendering is pure: the same input always yields the same nodes.
pub fn render(content: &str) -> Vec<Block> {
    let mut state = RenderState::default();
    for line in content.split('\n') {
        state.push_line(line.strip_suffix('\r').unwrap_or(line));
    }
    state.finish()
}

/// Resolve bold, inline code and link spans in one line of text
///
/// Each pass only splits the plain-text spans left by the passes before it,
/// so the contents of bold and code spans are never read as link syntax.
/// Code inside bold text becomes [`Inline::BoldCode`]. Unbalanced markers
/// are left as plain text.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let spans = vec![Inline::text(text)];
    let spans = split_text_spans(spans, &BOLD_RE, |caps| Inline::bold(&caps[1]));
    let spans = split_bold_code(spans);
    let spans = split_text_spans(spans, &CODE_RE, |caps| Inline::code(&caps[1]));
    split_text_spans(spans, &LINK_RE, |caps| Inline::link(&caps[1], &caps[2]))
}

/// Concatenated visible text of a run of spans
pub fn plain_text(spans: &[Inline]) -> String {
    spans.iter().map(Inline::visible_text).collect()
}

/// Visible words of a rendered body, code included
pub fn word_count(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .map(|block| match block {
            Block::Heading { text, .. } => text.split_whitespace().count(),
            Block::Paragraph { spans } => plain_text(spans).split_whitespace().count(),
            Block::List { items } => items
                .iter()
                .map(|item| plain_text(&item.spans).split_whitespace().count())
                .sum(),
            Block::CodeBlock { code, .. } => code.split_whitespace().count(),
            Block::Break => 0,
        })
        .sum()
}

/// Plain text of the first paragraph, if there is one
pub fn first_paragraph(blocks: &[Block]) -> Option<String> {
    blocks.iter().find_map(|block| match block {
        Block::Paragraph { spans } => Some(plain_text(spans)),
        _ => None,
    })
}

fn split_text_spans<F>(spans: Vec<Inline>, pattern: &Regex, make: F) -> Vec<Inline>
where
    F: Fn(&Captures) -> Inline,
{
    let mut result = Vec::with_capacity(spans.len());

    for span in spans {
        let text = match span {
            Inline::Text { text } => text,
            other => {
                result.push(other);
                continue;
            }
        };

        let mut last = 0;
        for caps in pattern.captures_iter(&text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > last {
                result.push(Inline::text(&text[last..whole.start()]));
            }
            result.push(make(&caps));
            last = whole.end();
        }
        if last < text.len() {
            result.push(Inline::text(&text[last..]));
        }
    }

    result
}

/// Split bold spans around the inline code they contain
fn split_bold_code(spans: Vec<Inline>) -> Vec<Inline> {
    let mut result = Vec::with_capacity(spans.len());

    for span in spans {
        let text = match span {
            Inline::Bold { text } => text,
            other => {
                result.push(other);
                continue;
            }
        };

        let mut last = 0;
        for caps in CODE_RE.captures_iter(&text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > last {
                result.push(Inline::bold(&text[last..whole.start()]));
            }
            result.push(Inline::bold_code(&caps[1]));
            last = whole.end();
        }
        if last < text.len() || last == 0 {
            result.push(Inline::bold(&text[last..]));
        }
    }

    result
}

/// An open fenced code block
struct Fence {
    language: Option<String>,
    lines: Vec<String>,
}

impl Fence {
    fn open(hint: &str) -> Self {
        let hint = hint.trim();
        Self {
            language: (!hint.is_empty()).then(|| hint.to_string()),
            lines: Vec::new(),
        }
    }

    fn close(self) -> Block {
        Block::CodeBlock {
            language: self.language,
            code: self.lines.join("\n"),
        }
    }
}

#[derive(Default)]
struct RenderState {
    blocks: Vec<Block>,
    fence: Option<Fence>,
    list: Option<Vec<ListItem>>,
}

impl RenderState {
    fn push_line(&mut self, line: &str) {
        let trimmed = line.trim();

        if let Some(hint) = trimmed.strip_prefix(FENCE) {
            match self.fence.take() {
                Some(fence) => self.blocks.push(fence.close()),
                None => {
                    self.close_list();
                    self.fence = Some(Fence::open(hint));
                }
            }
            return;
        }

        if let Some(fence) = self.fence.as_mut() {
            fence.lines.push(line.to_string());
            return;
        }

        if trimmed.is_empty() {
            self.close_list();
            self.blocks.push(Block::Break);
            return;
        }

        if let Some(item) = list_item(trimmed) {
            self.list.get_or_insert_with(Vec::new).push(ListItem {
                spans: parse_inline(item),
            });
            return;
        }

        self.close_list();

        if let Some((level, text)) = heading(trimmed) {
            self.blocks.push(Block::Heading {
                level,
                text: text.to_string(),
            });
            return;
        }

        self.blocks.push(Block::Paragraph {
            spans: parse_inline(trimmed),
        });
    }

    fn close_list(&mut self) {
        if let Some(items) = self.list.take() {
            if !items.is_empty() {
                self.blocks.push(Block::List { items });
            }
        }
    }

    /// Flush the open list and auto-close an unterminated fence
    fn finish(mut self) -> Vec<Block> {
        self.close_list();
        if let Some(fence) = self.fence.take() {
            tracing::debug!("Unterminated code fence closed at end of input");
            self.blocks.push(fence.close());
        }
        self.blocks
    }
}

/// `# ` through `#### `; longer hash runs are not headings
fn heading(line: &str) -> Option<(u8, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=MAX_HEADING_LEVEL).contains(&level) {
        return None;
    }
    line[level..]
        .strip_prefix(' ')
        .map(|text| (level as u8, text))
}

fn list_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ").or_else(|| line.strip_prefix("* "))
}
