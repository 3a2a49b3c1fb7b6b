// ═══════════════════════════════════════════════════════════════════════
// Word bank — secret words per category, static defaults plus overrides
// ═══════════════════════════════════════════════════════════════════════

use crate::error::WordBankError;
use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// ── Default lists ──────────────────────────────────────────────────────

pub fn default_words(category: Category) -> &'static [&'static str] {
    match category {
        Category::Object => &["Telescope", "Umbrella", "Bicycle", "Lighthouse", "Volcano"],
        Category::Person => &[
            "Albert Einstein",
            "Marilyn Monroe",
            "Nelson Mandela",
            "Leonardo da Vinci",
            "Marie Curie",
        ],
        Category::Videogame => &[
            "Minecraft",
            "The Legend of Zelda",
            "Fortnite",
            "Super Mario Bros",
            "Pac-Man",
        ],
        Category::Movie => &["The Godfather", "Star Wars", "Pulp Fiction", "Titanic", "The Matrix"],
        Category::Animal => &["Elephant", "Penguin", "Giraffe", "Octopus", "Kangaroo"],
        Category::Food => &["Pizza", "Sushi", "Tacos", "Chocolate", "Spaghetti"],
    }
}

// ── WordBank ───────────────────────────────────────────────────────────

/// Every category maps to a non-empty list of non-blank words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct WordBank {
    lists: BTreeMap<Category, Vec<String>>,
}

impl Default for WordBank {
    fn default() -> Self {
        let lists = Category::ALL
            .iter()
            .map(|&c| (c, default_words(c).iter().map(|w| w.to_string()).collect()))
            .collect();
        WordBank { lists }
    }
}

impl WordBank {
    pub fn words(&self, category: Category) -> &[String] {
        self.lists.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace one category's list.
    pub fn set_words<I, S>(&mut self, category: Category, words: I) -> Result<(), WordBankError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| Into::<String>::into(w).trim().to_string())
            .collect();
        if words.is_empty() {
            return Err(WordBankError::EmptyCategory(category));
        }
        if words.iter().any(|w| w.is_empty()) {
            return Err(WordBankError::BlankWord(category));
        }
        self.lists.insert(category, words);
        Ok(())
    }

    /// Defaults, overridden per category by a JSON object such as
    /// `{"animal": ["Cat", "Dog"]}`.
    pub fn from_json_str(json: &str) -> Result<Self, WordBankError> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::with_overrides(raw)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, WordBankError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn with_overrides(raw: BTreeMap<String, Vec<String>>) -> Result<Self, WordBankError> {
        let mut bank = WordBank::default();
        for (key, words) in raw {
            let category = key.parse::<Category>()?;
            bank.set_words(category, words)?;
        }
        Ok(bank)
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for WordBank {
    type Error = WordBankError;

    fn try_from(raw: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        WordBank::with_overrides(raw)
    }
}

impl From<WordBank> for BTreeMap<String, Vec<String>> {
    fn from(bank: WordBank) -> Self {
        bank.lists
            .into_iter()
            .map(|(c, words)| (c.value().to_string(), words))
            .collect()
    }
}
