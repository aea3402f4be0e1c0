use std::cmp::Ordering;
use std::collections::BinaryHeap;
use strsim::jaro_winkler;

/// Minimum Jaro-Winkler similarity for a suggestion.
pub const SUGGESTION_CUTOFF: f64 = 0.75;

#[derive(PartialEq)]
struct ScoredStr {
    score: f64,
    string: String,
}

impl Eq for ScoredStr {}

impl Ord for ScoredStr {
    fn cmp(&self, other: &Self) -> Ordering {
        other.score.total_cmp(&self.score)
    }
}

impl PartialOrd for ScoredStr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Candidates scoring at least `cutoff` against `word`, best first.
pub fn get_close_matches(word: &str, possibilities: &[String], cutoff: f64) -> Vec<String> {
    let mut heap: BinaryHeap<ScoredStr> = BinaryHeap::new();

    for possibility in possibilities {
        let score = jaro_winkler(word, possibility);
        if score >= cutoff {
            heap.push(ScoredStr {
                score,
                string: possibility.clone(),
            });
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|scored| scored.string)
        .collect()
}

/// Case-insensitive suggestions for a category missing from the known list.
pub fn suggest_categories(category: &str, known: &[String]) -> Vec<String> {
    let lowered: Vec<String> = known.iter().map(|k| k.to_lowercase()).collect();
    get_close_matches(&category.to_lowercase(), &lowered, SUGGESTION_CUTOFF)
        .into_iter()
        .filter_map(|hit| {
            lowered
                .iter()
                .position(|l| *l == hit)
                .map(|i| known[i].clone())
        })
        .collect()
}
