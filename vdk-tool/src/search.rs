//! Keyword-overlap search over small reference lists.
//!
//! A query is split on whitespace; each word is lowercased as-is, punctuation
//! included, and kept when longer than two characters. A candidate scores one
//! point per distinct query word found as a substring of its lowercased
//! haystack. The highest score wins, ties go to the earliest
//! candidate, and a zero score is no match at all.

/// Something that can be keyword-searched.
pub trait Searchable {
    /// Text the query words are matched against.
    fn haystack(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMatch<'a, T> {
    pub item: &'a T,
    pub index: usize,
    pub score: usize,
}

pub fn query_tokens(query: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for word in query.split_whitespace() {
        let word = word.to_lowercase();
        if word.chars().count() > 2 && !tokens.contains(&word) {
            tokens.push(word);
        }
    }
    tokens
}

pub fn keyword_score(tokens: &[String], haystack: &str) -> usize {
    let haystack = haystack.to_lowercase();
    tokens.iter().filter(|token| haystack.contains(token.as_str())).count()
}

/// Returns the highest-scoring candidate, or `None` when nothing overlaps.
pub fn best_match<'a, T: Searchable>(items: &'a [T], query: &str) -> Option<ScoredMatch<'a, T>> {
    let tokens = query_tokens(query);
    if tokens.is_empty() {
        return None;
    }

    let mut best: Option<ScoredMatch<'a, T>> = None;
    for (index, item) in items.iter().enumerate() {
        let score = keyword_score(&tokens, &item.haystack());
        let better = match &best {
            Some(current) => score > current.score,
            None => score > 0,
        };
        if better {
            best = Some(ScoredMatch { item, index, score });
        }
    }
    best
}
