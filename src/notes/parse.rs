//! Tolerant parsing of generation output.
//!
//! Models regularly wrap their JSON in markdown fences or add commentary
//! around it, so the parser slices the outermost brace-delimited span before
//! handing it to serde.

use crate::notes::model::NotesPack;

/// The outermost `{...}` span of `raw`, if any.
pub fn json_object_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parse a raw model response into a `NotesPack`. Missing keys default to
/// empty; anything that is not JSON at all is an error the caller downgrades.
pub fn notes_from_response(raw: &str) -> Result<NotesPack, String> {
    let span = json_object_span(raw).ok_or_else(|| "no JSON object in response".to_string())?;
    serde_json::from_str(span).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json() {
        let pack = notes_from_response(r#"{"summary": "short", "bullets": ["a", "b"]}"#).unwrap();
        assert_eq!(pack.summary, "short");
        assert_eq!(pack.bullets, vec!["a", "b"]);
    }

    #[test]
    fn strips_markdown_fences_and_commentary() {
        let raw = "Here are your notes!\n```json\n{\"summary\": \"fenced\"}\n```\nEnjoy.";
        let pack = notes_from_response(raw).unwrap();
        assert_eq!(pack.summary, "fenced");
    }

    #[test]
    fn full_shape_round_trips() {
        let raw = r#"{
            "summary": "s",
            "bullets": ["b1"],
            "concepts": ["c1"],
            "definitions": [{"term": "t", "definition": "d"}],
            "qas": [{"q": "why", "a": "because"}],
            "mcqs": [{"stem": "pick", "options": ["1", "2", "3", "4"], "answer": "2"}],
            "flashcards": [{"front": "f", "back": "b"}]
        }"#;
        let pack = notes_from_response(raw).unwrap();
        assert_eq!(pack.definitions[0].term, "t");
        assert_eq!(pack.qas[0].a, "because");
        assert_eq!(pack.mcqs[0].options.len(), 4);
        assert_eq!(pack.flashcards[0].back, "b");
        assert!(pack.audit().is_empty());
    }

    #[test]
    fn rejects_non_json() {
        assert!(notes_from_response("Sorry, I cannot help with that.").is_err());
        assert!(notes_from_response("{not: valid json]").is_err());
        assert!(notes_from_response("").is_err());
    }
}
