use serde::{Deserialize, Serialize};

/// Structured study material for one document. Built once per generation
/// call and never mutated afterwards. Field names double as the JSON
/// contract with the remote generation capability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotesPack {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub concepts: Vec<String>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub qas: Vec<QaPair>,
    #[serde(default)]
    pub mcqs: Vec<Mcq>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    /// Always the exact document text the pack was generated from, so chat
    /// can answer follow-ups without re-fetching.
    #[serde(default)]
    pub raw_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Definition {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaPair {
    pub q: String,
    pub a: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mcq {
    pub stem: String,
    pub options: Vec<String>,
    /// Must equal one of `options`; malformed generation output can violate
    /// this, which `audit` flags instead of failing.
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

impl NotesPack {
    /// Best-effort validity check over generated content. Returns
    /// human-readable descriptions of every violation; empty means clean.
    pub fn audit(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for (i, mcq) in self.mcqs.iter().enumerate() {
            if mcq.options.len() != 4 {
                issues.push(format!(
                    "mcq {}: expected 4 options, got {}",
                    i + 1,
                    mcq.options.len()
                ));
            }
            if !mcq.options.contains(&mcq.answer) {
                issues.push(format!("mcq {}: answer is not one of the options", i + 1));
            }
        }
        issues
    }
}
