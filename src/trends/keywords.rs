use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;

use crate::domain::Document;

use super::stopwords::is_stop_word;

/// Keywords kept per category trend.
pub const CATEGORY_KEYWORD_LIMIT: usize = 20;
/// Keywords kept when tagging a single document.
pub const DEFAULT_KEYWORD_LIMIT: usize = 10;

/// Token frequencies that remember first-seen order for tie-breaking.
#[derive(Debug, Default)]
pub struct KeywordCounter {
    order: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl KeywordCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_text(&mut self, text: &str) {
        let lowered = text.to_lowercase();
        for token in lowered.unicode_words().filter(|token| is_keyword(token)) {
            match self.index.get(token) {
                Some(&slot) => self.order[slot].1 += 1,
                None => {
                    self.index.insert(token.to_string(), self.order.len());
                    self.order.push((token.to_string(), 1));
                }
            }
        }
    }

    /// Up to `n` tokens, most frequent first.
    pub fn top(mut self, n: usize) -> Vec<String> {
        self.order.sort_by(|a, b| b.1.cmp(&a.1));
        self.order.into_iter().take(n).map(|(token, _)| token).collect()
    }
}

fn is_keyword(token: &str) -> bool {
    token.chars().count() > 2 && token.chars().all(char::is_alphabetic) && !is_stop_word(token)
}

pub fn extract_keywords(text: &str, n: usize) -> Vec<String> {
    let mut counter = KeywordCounter::new();
    counter.add_text(text);
    counter.top(n)
}

/// Tags the storage layer attaches to a document's keyword table.
pub fn document_tags(document: &Document) -> Vec<String> {
    extract_keywords(&document.content, DEFAULT_KEYWORD_LIMIT)
}
