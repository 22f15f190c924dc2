//! PDF export of a notes pack.
//!
//! Layout happens in two steps: `layout` flattens the pack into a list of
//! styled, pre-wrapped lines (easy to test), and `export` paints those lines
//! onto printpdf pages with builtin Helvetica fonts. Empty collections
//! contribute nothing, heading included.

use crate::notes::NotesPack;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::instrument;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 14.0;
const TOP_Y_MM: f32 = 282.0;

/// Column width for body text; long lines wrap here instead of running off
/// the page.
const WRAP_COLS: usize = 90;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("pdf generation failed: {0}")]
    Render(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Heading,
    Body,
    Blank,
}

/// One pre-wrapped output line.
#[derive(Debug, Clone)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Flatten a notes pack into the ordered line list the PDF renders. Sections
/// with nothing to say are omitted entirely.
pub fn layout(title: &str, source_url: &str, notes: &NotesPack) -> Vec<Line> {
    let mut lines = Vec::new();
    let title = if title.trim().is_empty() {
        "Untitled document"
    } else {
        title.trim()
    };

    push_wrapped(&mut lines, LineKind::Title, title);
    push_wrapped(&mut lines, LineKind::Body, &format!("Source: {source_url}"));
    lines.push(Line::new(LineKind::Blank, ""));

    if !notes.summary.trim().is_empty() {
        section(&mut lines, "Summary");
        push_wrapped(&mut lines, LineKind::Body, &notes.summary);
        lines.push(Line::new(LineKind::Blank, ""));
    }

    if !notes.bullets.is_empty() {
        section(&mut lines, "Key points");
        for bullet in &notes.bullets {
            push_wrapped(&mut lines, LineKind::Body, &format!("- {bullet}"));
        }
        lines.push(Line::new(LineKind::Blank, ""));
    }

    if !notes.concepts.is_empty() {
        section(&mut lines, "Key concepts");
        push_wrapped(&mut lines, LineKind::Body, &notes.concepts.join(", "));
        lines.push(Line::new(LineKind::Blank, ""));
    }

    if !notes.definitions.is_empty() {
        section(&mut lines, "Definitions");
        for def in &notes.definitions {
            push_wrapped(
                &mut lines,
                LineKind::Body,
                &format!("{}: {}", def.term, def.definition),
            );
        }
        lines.push(Line::new(LineKind::Blank, ""));
    }

    if !notes.qas.is_empty() {
        section(&mut lines, "Q&A");
        for (i, qa) in notes.qas.iter().enumerate() {
            push_wrapped(&mut lines, LineKind::Body, &format!("Q{}. {}", i + 1, qa.q));
            push_wrapped(&mut lines, LineKind::Body, &format!("A: {}", qa.a));
        }
        lines.push(Line::new(LineKind::Blank, ""));
    }

    if !notes.mcqs.is_empty() {
        section(&mut lines, "MCQs");
        for (i, mcq) in notes.mcqs.iter().enumerate() {
            push_wrapped(
                &mut lines,
                LineKind::Body,
                &format!("Q{}. {}", i + 1, mcq.stem),
            );
            for (j, option) in mcq.options.iter().enumerate() {
                let letter = (b'A' + (j as u8).min(25)) as char;
                push_wrapped(&mut lines, LineKind::Body, &format!("   {letter}. {option}"));
            }
            push_wrapped(&mut lines, LineKind::Body, &format!("Answer: {}", mcq.answer));
        }
        lines.push(Line::new(LineKind::Blank, ""));
    }

    if !notes.flashcards.is_empty() {
        section(&mut lines, "Flashcards");
        for (i, card) in notes.flashcards.iter().enumerate() {
            push_wrapped(
                &mut lines,
                LineKind::Body,
                &format!("Card {}: {}", i + 1, card.front),
            );
            push_wrapped(&mut lines, LineKind::Body, &format!("   {}", card.back));
        }
    }

    lines
}

/// Render a notes pack to PDF bytes.
#[instrument(skip_all, fields(title = %title))]
pub fn export(title: &str, source_url: &str, notes: &NotesPack) -> Result<Vec<u8>, PdfError> {
    let lines = layout(title, source_url, notes);

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Study notes",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PdfError::Render(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = TOP_Y_MM;

    for line in &lines {
        let (font, size, leading) = match line.kind {
            LineKind::Title => (&bold, 16.0, 9.0),
            LineKind::Heading => (&bold, 12.0, 7.0),
            LineKind::Body => (&regular, 10.0, 5.5),
            LineKind::Blank => (&regular, 10.0, 4.0),
        };

        if y - leading < MARGIN_MM {
            let (page, layer_idx) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page).get_layer(layer_idx);
            y = TOP_Y_MM;
        }

        if line.kind != LineKind::Blank {
            layer.use_text(&line.text, size, Mm(MARGIN_MM), Mm(y), font);
        }
        y -= leading;
    }

    doc.save_to_bytes()
        .map_err(|e| PdfError::Render(e.to_string()))
}

fn section(lines: &mut Vec<Line>, heading: &str) {
    lines.push(Line::new(LineKind::Heading, heading));
}

fn push_wrapped(lines: &mut Vec<Line>, kind: LineKind, text: &str) {
    // Leading spaces are layout (option/flashcard indent); word wrap would
    // eat them, so wrap the body and re-prefix every emitted line.
    let indent: String = text.chars().take_while(|c| *c == ' ').collect();
    let width = WRAP_COLS.saturating_sub(indent.len()).max(1);
    for wrapped in wrap_text(text, width) {
        lines.push(Line::new(kind, format!("{indent}{wrapped}")));
    }
}

/// Greedy word wrap at `width` characters. Words longer than the width get a
/// line of their own rather than being split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if current_chars > 0 && current_chars + 1 + word_chars > width {
            out.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if current_chars > 0 {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }
    if !current.is_empty() {
        out.push(current);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());

const MAX_FILENAME_CHARS: usize = 60;

/// Turn a document title into a safe download filename stem.
pub fn safe_filename(title: &str) -> String {
    let underscored = WHITESPACE.replace_all(title.trim(), "_");
    let cleaned = NON_WORD.replace_all(&underscored, "").to_string();
    let stem: String = cleaned.chars().take(MAX_FILENAME_CHARS).collect();
    if stem.is_empty() {
        "notes".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::{Definition, Flashcard, Mcq, NotesPack, QaPair};

    fn full_pack() -> NotesPack {
        NotesPack {
            summary: "A short summary.".into(),
            bullets: vec!["First point".into(), "Second point".into()],
            concepts: vec!["energy".into(), "cells".into()],
            definitions: vec![Definition {
                term: "ATP".into(),
                definition: "The cell's energy currency.".into(),
            }],
            qas: vec![QaPair {
                q: "Why?".into(),
                a: "Because.".into(),
            }],
            mcqs: vec![Mcq {
                stem: "Pick one".into(),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                answer: "b".into(),
            }],
            flashcards: vec![Flashcard {
                front: "front".into(),
                back: "back".into(),
            }],
            raw_text: "raw".into(),
        }
    }

    fn headings(lines: &[Line]) -> Vec<&str> {
        lines
            .iter()
            .filter(|l| l.kind == LineKind::Heading)
            .map(|l| l.text.as_str())
            .collect()
    }

    #[test]
    fn layout_keeps_section_order() {
        let lines = layout("Title", "https://example.com", &full_pack());
        assert_eq!(
            headings(&lines),
            vec![
                "Summary",
                "Key points",
                "Key concepts",
                "Definitions",
                "Q&A",
                "MCQs",
                "Flashcards"
            ]
        );
    }

    #[test]
    fn empty_sections_are_omitted_entirely() {
        let pack = NotesPack {
            summary: "Only a summary.".into(),
            raw_text: "raw".into(),
            ..NotesPack::default()
        };
        let lines = layout("Title", "https://example.com", &pack);
        let headings = headings(&lines);
        assert_eq!(headings, vec!["Summary"]);
        assert!(!headings.contains(&"MCQs"));
    }

    #[test]
    fn mcq_options_are_lettered_and_answer_marked() {
        let lines = layout("T", "u", &full_pack());
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert!(texts.contains(&"   A. a"));
        assert!(texts.contains(&"   D. d"));
        assert!(texts.contains(&"Answer: b"));
    }

    #[test]
    fn long_lines_wrap_at_column_width() {
        let wrapped = wrap_text(&"word ".repeat(60), 20);
        assert!(wrapped.len() > 10);
        assert!(wrapped.iter().all(|l| l.chars().count() <= 20));
    }

    #[test]
    fn wrapped_option_lines_keep_their_indent() {
        let pack = NotesPack {
            mcqs: vec![Mcq {
                stem: "Pick one".into(),
                options: vec!["alpha ".repeat(30).trim().into(), "b".into(), "c".into(), "d".into()],
                answer: "b".into(),
            }],
            ..NotesPack::default()
        };
        let lines = layout("T", "u", &pack);
        let option_lines: Vec<&Line> =
            lines.iter().filter(|l| l.text.contains("alpha")).collect();
        // Long enough to wrap, and every piece stays indented.
        assert!(option_lines.len() > 1);
        assert!(option_lines.iter().all(|l| l.text.starts_with("   ")));
        assert!(option_lines[0].text.starts_with("   A. alpha"));
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let wrapped = wrap_text("small enormouslyoverlongtokenwithoutspaces small", 10);
        assert_eq!(wrapped.len(), 3);
    }

    #[test]
    fn export_produces_pdf_bytes() {
        let bytes = export("Title", "https://example.com", &full_pack()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn export_handles_empty_pack() {
        let bytes = export("", "https://example.com", &NotesPack::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn safe_filename_sanitizes() {
        assert_eq!(safe_filename("My Great Article!"), "My_Great_Article");
        assert_eq!(safe_filename("  a/b: c  "), "ab_c");
        assert_eq!(safe_filename("???"), "notes");
        assert_eq!(safe_filename(""), "notes");
    }
}
