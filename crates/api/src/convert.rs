// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Word document to Markdown conversion for newsletter drafts.
//!
//! Conversion runs in two passes. The `.docx` body (`word/document.xml`) is
//! rendered to a small HTML subset: headings, paragraphs, bulleted lists,
//! bold, italics and line breaks. That HTML is then walked into Markdown.
//! Tables, images and footnotes are dropped; their text is kept.

use std::io::{Cursor, Read};

use regex::Regex;
use scraper::{ElementRef, Html, Node};
use thiserror::Error;
use tracing::{debug, info};
use zip::ZipArchive;
use zip::result::ZipError;

const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("No file uploaded")]
    NoFile,
    #[error("File is not a valid Word document: {0}")]
    InvalidArchive(String),
    #[error("Word document has no body ({DOCUMENT_PART} is missing)")]
    MissingBody,
    #[error("Failed to read Word document: {0}")]
    Read(String),
    #[error("Converter is misconfigured: {0}")]
    Pattern(String),
}

/// Converts an uploaded document into Markdown.
pub trait DocumentConverter: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the bytes are not a document this converter
    /// understands.
    fn to_markdown(&self, bytes: &[u8]) -> Result<String, ConversionError>;
}

/// Compiled patterns for the parts of WordprocessingML we read.
#[derive(Debug, Clone)]
pub struct DocxConverter {
    paragraph: Regex,
    style: Regex,
    numbering: Regex,
    run: Regex,
    bold: Regex,
    italic: Regex,
    piece: Regex,
}

fn compile(pattern: &str) -> Result<Regex, ConversionError> {
    Regex::new(pattern).map_err(|e| ConversionError::Pattern(e.to_string()))
}

impl DocxConverter {
    /// # Errors
    ///
    /// Returns `ConversionError::Pattern` if a pattern fails to compile.
    pub fn new() -> Result<Self, ConversionError> {
        Ok(Self {
            paragraph: compile(r"(?s)<w:p(?:\s[^>]*)?/>|<w:p(?:\s[^>]*)?>(.*?)</w:p>")?,
            style: compile(r#"<w:pStyle\s+w:val="([^"]*)""#)?,
            numbering: compile(r"<w:numPr\b")?,
            run: compile(r"(?s)<w:r(?:\s[^>]*)?>(.*?)</w:r>")?,
            bold: compile(r#"<w:b(?:\s+w:val="(?:true|1|on)")?\s*/>"#)?,
            italic: compile(r#"<w:i(?:\s+w:val="(?:true|1|on)")?\s*/>"#)?,
            piece: compile(
                r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:t(?:\s[^>]*)?/>|<w:(br|cr)(?:\s[^>]*)?/>|<w:tab(?:\s[^>]*)?/>",
            )?,
        })
    }

    /// Renders the document body as HTML.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not a zip archive or has no document
    /// part.
    pub fn to_html(&self, bytes: &[u8]) -> Result<String, ConversionError> {
        let xml: String = read_document_part(bytes)?;
        let mut html: String = String::new();
        let mut in_list: bool = false;

        for paragraph in self.paragraph.captures_iter(&xml) {
            let body: &str = paragraph.get(1).map_or("", |m| m.as_str());
            let content: String = self.render_runs(body);
            let is_list_item: bool = self.numbering.is_match(body);

            if in_list && !is_list_item {
                html.push_str("</ul>");
                in_list = false;
            }
            if content.trim().is_empty() {
                continue;
            }

            if is_list_item {
                if !in_list {
                    html.push_str("<ul>");
                    in_list = true;
                }
                html.push_str(&format!("<li>{content}</li>"));
                continue;
            }

            let tag: String = self
                .style
                .captures(body)
                .and_then(|c| c.get(1))
                .map_or_else(|| String::from("p"), |m| block_tag(m.as_str()));
            html.push_str(&format!("<{tag}>{content}</{tag}>"));
        }

        if in_list {
            html.push_str("</ul>");
        }

        debug!(bytes = html.len(), "Rendered document body");
        Ok(html)
    }

    fn render_runs(&self, paragraph: &str) -> String {
        let mut out: String = String::new();

        for run in self.run.captures_iter(paragraph) {
            let body: &str = run.get(1).map_or("", |m| m.as_str());
            let (props, content): (&str, &str) = match body.find("</w:rPr>") {
                Some(end) => body.split_at(end),
                None => ("", body),
            };

            let mut text: String = String::new();
            for piece in self.piece.captures_iter(content) {
                if let Some(t) = piece.get(1) {
                    text.push_str(t.as_str());
                } else if piece.get(2).is_some() {
                    text.push_str("<br>");
                } else if piece.get(0).is_some_and(|m| m.as_str().starts_with("<w:tab")) {
                    text.push(' ');
                }
            }
            if text.is_empty() {
                continue;
            }

            if self.italic.is_match(props) {
                text = format!("<em>{text}</em>");
            }
            if self.bold.is_match(props) {
                text = format!("<strong>{text}</strong>");
            }
            out.push_str(&text);
        }

        out
    }
}

impl DocumentConverter for DocxConverter {
    fn to_markdown(&self, bytes: &[u8]) -> Result<String, ConversionError> {
        let html: String = self.to_html(bytes)?;
        let markdown: String = html_to_markdown(&html);
        info!(chars = markdown.len(), "Converted Word document to Markdown");
        Ok(markdown)
    }
}

fn read_document_part(bytes: &[u8]) -> Result<String, ConversionError> {
    if bytes.is_empty() {
        return Err(ConversionError::NoFile);
    }

    let mut archive: ZipArchive<Cursor<&[u8]>> = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ConversionError::InvalidArchive(e.to_string()))?;
    let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| match e {
        ZipError::FileNotFound => ConversionError::MissingBody,
        other => ConversionError::Read(other.to_string()),
    })?;

    let mut xml: String = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ConversionError::Read(e.to_string()))?;
    Ok(xml)
}

/// Maps a Word paragraph style to an HTML block tag.
fn block_tag(style: &str) -> String {
    let lower: String = style.to_ascii_lowercase();
    if lower == "title" {
        return String::from("h1");
    }
    lower
        .strip_prefix("heading")
        .and_then(|level| level.parse::<u8>().ok())
        .filter(|level| (1..=6).contains(level))
        .map_or_else(|| String::from("p"), |level| format!("h{level}"))
}

/// Converts HTML into Markdown.
///
/// Headings use `#` prefixes, emphasis uses `**` and `_`, and list items use
/// `- `. Blocks are separated by one blank line.
#[must_use]
pub fn html_to_markdown(html: &str) -> String {
    let fragment: Html = Html::parse_fragment(html);
    let mut blocks: Vec<String> = Vec::new();
    collect_blocks(fragment.root_element(), &mut blocks);

    blocks
        .into_iter()
        .map(|b| b.trim_end().to_string())
        .filter(|b| !b.is_empty())
        .collect::<Vec<String>>()
        .join("\n\n")
}

fn collect_blocks(element: ElementRef<'_>, blocks: &mut Vec<String>) {
    let mut loose: String = String::new();

    for child in element.children() {
        let Some(child_element) = ElementRef::wrap(child) else {
            if let Node::Text(text) = child.value() {
                loose.push_str(&escape_markdown(text));
            }
            continue;
        };

        let name: &str = child_element.value().name();
        let block: Option<String> = match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level: usize = name[1..].parse().unwrap_or(1);
                Some(format!("{} {}", "#".repeat(level), inline(child_element).trim()))
            }
            "p" => Some(escape_block_start(inline(child_element).trim())),
            "ul" | "ol" => Some(list(child_element, name == "ol")),
            "blockquote" => Some(
                inline(child_element)
                    .trim()
                    .lines()
                    .map(|line| format!("> {line}"))
                    .collect::<Vec<String>>()
                    .join("\n"),
            ),
            "div" | "section" | "article" | "body" | "html" => {
                flush(&mut loose, blocks);
                collect_blocks(child_element, blocks);
                None
            }
            _ => {
                loose.push_str(&inline(child_element));
                None
            }
        };

        if let Some(block) = block {
            flush(&mut loose, blocks);
            blocks.push(block);
        }
    }

    flush(&mut loose, blocks);
}

fn flush(loose: &mut String, blocks: &mut Vec<String>) {
    let text: &str = loose.trim();
    if !text.is_empty() {
        blocks.push(escape_block_start(text));
    }
    loose.clear();
}

fn list(element: ElementRef<'_>, ordered: bool) -> String {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|item| item.value().name() == "li")
        .enumerate()
        .map(|(index, item)| {
            let marker: String = if ordered {
                format!("{}.", index + 1)
            } else {
                String::from("-")
            };
            format!("{marker} {}", escape_block_start(inline(item).trim()))
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn inline(element: ElementRef<'_>) -> String {
    let mut out: String = String::new();

    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&escape_markdown(text)),
            Node::Element(_) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                let inner: String = inline(child_element);
                match child_element.value().name() {
                    "strong" | "b" => out.push_str(&wrap_emphasis(&inner, "**")),
                    "em" | "i" => out.push_str(&wrap_emphasis(&inner, "_")),
                    "br" => out.push_str("  \n"),
                    "a" => match child_element.value().attr("href") {
                        Some(href) => out.push_str(&format!("[{inner}]({href})")),
                        None => out.push_str(&inner),
                    },
                    _ => out.push_str(&inner),
                }
            }
            _ => {}
        }
    }

    out
}

/// Wraps `text` in `marker`, keeping surrounding whitespace outside it.
fn wrap_emphasis(text: &str, marker: &str) -> String {
    let trimmed: &str = text.trim();
    if trimmed.is_empty() {
        return text.to_string();
    }
    let leading: &str = &text[..text.len() - text.trim_start().len()];
    let trailing: &str = &text[text.trim_end().len()..];
    format!("{leading}{marker}{trimmed}{marker}{trailing}")
}

/// Escapes a leading marker on each line that Markdown would read as a
/// heading, list item, quote or setext underline.
fn escape_block_start(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let body: &str = line.trim_start();
            let indent: &str = &line[..line.len() - body.len()];
            let digits: usize = body.chars().take_while(char::is_ascii_digit).count();

            if digits > 0 && body[digits..].starts_with(". ") {
                format!("{indent}{}\\{}", &body[..digits], &body[digits..])
            } else if body.starts_with(['#', '>', '-', '=']) || body.starts_with("+ ") {
                format!("{indent}\\{body}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn escape_markdown(text: &str) -> String {
    let mut out: String = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '*' | '_' | '`' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
