//! Search-candidate selection.
//!
//! Keyword search over the knowledge base returns court cases, list pages
//! and disambiguation pages alongside the place the user meant. Candidates
//! that look like either of the first two kinds are discarded; among the
//! rest, the first whose snippet reads like a description of a place wins.

use pathfinder_core::location::SearchHit;

/// Title or snippet fragments marking a hit as a legal case or a
/// disambiguation page.
const DISQUALIFYING_MARKERS: &[&str] = &[
    "(disambiguation)",
    "may refer to",
    " v. ",
    " vs. ",
    "court case",
    "lawsuit",
    "supreme court",
    "plaintiff",
    "defendant",
];

/// Snippet vocabulary typical of articles about buildings and sites.
const PLACE_VOCABULARY: &[&str] = &[
    "building",
    "monument",
    "temple",
    "palace",
    "located in",
    "situated",
    "church",
    "cathedral",
    "basilica",
    "chapel",
    "mosque",
    "monastery",
    "castle",
    "fortress",
    "amphitheatre",
    "ruins",
    "landmark",
    "tower",
];

/// Removes inline highlight markup and common HTML entities from a snippet.
#[must_use]
pub fn strip_markup(snippet: &str) -> String {
    let mut text = String::with_capacity(snippet.len());
    let mut in_tag = false;
    for ch in snippet.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}

fn haystack(hit: &SearchHit) -> String {
    format!("{} {}", hit.title, strip_markup(&hit.snippet)).to_lowercase()
}

/// Whether `hit` looks like a legal case or a disambiguation page.
#[must_use]
pub fn is_disqualified(hit: &SearchHit) -> bool {
    let text = haystack(hit);
    DISQUALIFYING_MARKERS
        .iter()
        .any(|marker| text.contains(marker))
}

/// Whether the snippet of `hit` uses place/structure vocabulary.
#[must_use]
pub fn describes_place(hit: &SearchHit) -> bool {
    let snippet = strip_markup(&hit.snippet).to_lowercase();
    PLACE_VOCABULARY.iter().any(|word| snippet.contains(word))
}

/// Picks the best candidate from ordered search hits.
///
/// Falls back to the first raw hit when no qualified candidate describes a
/// place. Returns `None` only for an empty hit list.
#[must_use]
pub fn choose_candidate(hits: &[SearchHit]) -> Option<&SearchHit> {
    hits.iter()
        .filter(|hit| !is_disqualified(hit))
        .find(|hit| describes_place(hit))
        .or_else(|| hits.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, snippet: &str) -> SearchHit {
        SearchHit {
            title: title.to_owned(),
            snippet: snippet.to_owned(),
        }
    }

    #[test]
    fn test_strip_markup_removes_highlight_spans() {
        let snippet = r#"The <span class="searchmatch">Colosseum</span> is an &quot;oval&quot; amphitheatre"#;
        assert_eq!(
            strip_markup(snippet),
            "The Colosseum is an \"oval\" amphitheatre"
        );
    }

    #[test]
    fn test_legal_case_is_disqualified() {
        let case = hit("Taj Mahal v. State of Uttar Pradesh", "a ruling of the court");
        assert!(is_disqualified(&case));
    }

    #[test]
    fn test_disambiguation_snippet_is_disqualified() {
        let page = hit("Mercury", "Mercury may refer to: a planet, an element");
        assert!(is_disqualified(&page));
    }

    #[test]
    fn test_choose_candidate_prefers_place_over_earlier_generic_hit() {
        let hits = vec![
            hit("Colosseum (film)", "a 2003 documentary"),
            hit("Colosseum", "an oval amphitheatre located in the centre of Rome"),
        ];

        let chosen = choose_candidate(&hits).unwrap();

        assert_eq!(chosen.title, "Colosseum");
    }

    #[test]
    fn test_choose_candidate_skips_disqualified_place_hits() {
        let hits = vec![
            hit("Palace v. Smith", "a lawsuit about a palace located in Ohio"),
            hit("Buckingham Palace", "the royal palace situated in Westminster"),
        ];

        let chosen = choose_candidate(&hits).unwrap();

        assert_eq!(chosen.title, "Buckingham Palace");
    }

    #[test]
    fn test_choose_candidate_falls_back_to_first_raw_hit() {
        let hits = vec![
            hit("Big Ben (disambiguation)", "Big Ben may refer to"),
            hit("Big Ben (song)", "a single by a rock band"),
        ];

        let chosen = choose_candidate(&hits).unwrap();

        assert_eq!(chosen.title, "Big Ben (disambiguation)");
    }

    #[test]
    fn test_choose_candidate_returns_none_for_no_hits() {
        assert!(choose_candidate(&[]).is_none());
    }
}
