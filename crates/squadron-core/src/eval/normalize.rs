//! SQuAD answer normalization: lowercase, strip punctuation, drop English
//! articles, collapse whitespace. Applied to predictions and references
//! alike before any comparison.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ARTICLES: Regex = Regex::new(r"\b(a|an|the)\b").expect("static regex");
}

/// Idempotent: normalizing an already-normalized string is a no-op.
pub fn normalize_answer(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let no_punct: String = lowered
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    let no_articles = ARTICLES.replace_all(&no_punct, " ");
    no_articles.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(normalize_answer("Paris, France!"), "paris france");
    }

    #[test]
    fn drops_articles_and_collapses_whitespace() {
        assert_eq!(normalize_answer("The  Eiffel   Tower"), "eiffel tower");
        assert_eq!(normalize_answer("a an the"), "");
    }

    #[test]
    fn keeps_article_like_prefixes_inside_words() {
        assert_eq!(normalize_answer("another theory"), "another theory");
    }

    #[test]
    fn is_idempotent() {
        for raw in ["The Eiffel Tower", "paris, France", "  ", "a  dog's tail"] {
            let once = normalize_answer(raw);
            assert_eq!(normalize_answer(&once), once);
        }
    }
}
