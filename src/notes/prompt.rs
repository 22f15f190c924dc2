//! Prompt construction for the remote generation capability.

/// Characters per chunk when slicing large documents.
pub const CHUNK_CHARS: usize = 20_000;

/// How much of the first chunk actually goes into the prompt. Long documents
/// are summarized from their head only; see DESIGN.md for the decision.
pub const PREVIEW_CHARS: usize = 4_096;

pub const NOTES_SYSTEM: &str =
    "You are a helpful assistant that turns article text into study materials.";

/// Take the first `max_chars` characters of `s`, respecting char boundaries.
pub fn char_prefix(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// The single notes-generation prompt. The JSON key list must stay in sync
/// with the serde field names on `NotesPack`.
pub fn notes_prompt(title: &str, text: &str) -> String {
    let chunk = char_prefix(text, CHUNK_CHARS);
    let preview = char_prefix(chunk, PREVIEW_CHARS);

    format!(
        r#"You are an expert educational assistant. Given the article title: "{title}" and the article content (below), produce a JSON object with the following keys:
- summary: a concise 3-5 sentence summary.
- bullets: a list of 6-12 short bullet points (actionable / factual).
- concepts: list of key concept phrases (6-12).
- definitions: list of important terms with short definitions (term and definition).
- qas: 6 short Q&A pairs (q and a) useful for study.
- mcqs: 6 multiple-choice questions. Each MCQ should have: stem, 4 options, answer (option text).
- flashcards: 8 flashcards with front/back text.
Return ONLY valid JSON. Do not include commentary. The content follows below:
----
{preview}
----
If the article is long, prioritize the main ideas and educational value. Keep answers short and precise."#
    )
}
