//! Shaping of narration requests.

use pathfinder_core::provider::NarrationRequest;

/// Path id used for free-text searches outside any tour.
pub const SEARCH_PATH_ID: &str = "user-search";

/// Maximum number of extract characters forwarded to the service.
pub const DESCRIPTION_LIMIT: usize = 200;

/// What is being narrated.
#[derive(Debug, Clone, Copy)]
pub struct NarrationSubject<'a> {
    /// Display name of the location.
    pub name: &'a str,
    /// Summary extract.
    pub extract: &'a str,
    /// Knowledge-base page identifier, when known.
    pub page_identifier: Option<&'a str>,
    /// Tour id, or `SEARCH_PATH_ID`.
    pub path_id: &'a str,
}

/// Lowercase, hyphen-joined form of `name`.
#[must_use]
pub fn location_slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// The first `limit` characters of `text`.
#[must_use]
pub fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Builds the request body for `subject`.
#[must_use]
pub fn build_request(subject: &NarrationSubject<'_>, style: &str, timestamp: i64) -> NarrationRequest {
    let wikipedia_page = subject.page_identifier.map_or_else(
        || subject.name.split_whitespace().collect::<Vec<_>>().join("_"),
        str::to_owned,
    );

    NarrationRequest {
        path_id: subject.path_id.to_owned(),
        location_id: location_slug(subject.name),
        location_title: subject.name.to_owned(),
        location_description: truncate_chars(subject.extract, DESCRIPTION_LIMIT),
        wikipedia_page,
        narrative_style: style.to_owned(),
        timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject<'a>(name: &'a str, extract: &'a str, page: Option<&'a str>) -> NarrationSubject<'a> {
        NarrationSubject {
            name,
            extract,
            page_identifier: page,
            path_id: SEARCH_PATH_ID,
        }
    }

    #[test]
    fn test_location_slug_joins_lowercase_words() {
        assert_eq!(location_slug("Church of the  Holy Sepulchre"), "church-of-the-holy-sepulchre");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "é".repeat(250);
        let truncated = truncate_chars(&text, DESCRIPTION_LIMIT);
        assert_eq!(truncated.chars().count(), 200);
    }

    #[test]
    fn test_build_request_uses_page_identifier_when_present() {
        let request = build_request(
            &subject("Colosseum", "An oval amphitheatre.", Some("Colosseum")),
            "Provide a dramatic, cinematic description",
            1_700_000_000_000,
        );

        assert_eq!(request.path_id, "user-search");
        assert_eq!(request.location_id, "colosseum");
        assert_eq!(request.wikipedia_page, "Colosseum");
        assert_eq!(request.location_description, "An oval amphitheatre.");
        assert_eq!(request.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn test_build_request_derives_page_from_name() {
        let request = build_request(&subject("Western Wall, Jerusalem", "", None), "style", 0);
        assert_eq!(request.wikipedia_page, "Western_Wall,_Jerusalem");
    }
}
