//! US-or-EU location classifier.
//!
//! A best-effort heuristic over free text. Checks run in order and the first
//! hit wins:
//!
//! 1. general country and continent names
//! 2. full US state names
//! 3. major US cities
//! 4. US state postal codes plus `US`/`USA`/`EU`, whole words only
//! 5. EU member states and major EU cities
//!
//! Everything is case-insensitive. Categories 1, 2, 3 and 5 are plain
//! substring matches, so false positives are possible. Category 4 also
//! accepts ISO country codes that share a postal code (`IN` for India, `DE`
//! for Germany) and English words such as "in", "or" and "me".

use regex::Regex;
use std::sync::OnceLock;

const GENERAL: &[&str] = &[
    "united states",
    "u.s.",
    "north america",
    "europe",
    "european union",
];

const US_STATES: &[&str] = &[
    "alabama",
    "alaska",
    "arizona",
    "arkansas",
    "california",
    "colorado",
    "connecticut",
    "delaware",
    "florida",
    "georgia",
    "hawaii",
    "idaho",
    "illinois",
    "indiana",
    "iowa",
    "kansas",
    "kentucky",
    "louisiana",
    "maine",
    "maryland",
    "massachusetts",
    "michigan",
    "minnesota",
    "mississippi",
    "missouri",
    "montana",
    "nebraska",
    "nevada",
    "new hampshire",
    "new jersey",
    "new mexico",
    "new york",
    "north carolina",
    "north dakota",
    "ohio",
    "oklahoma",
    "oregon",
    "pennsylvania",
    "rhode island",
    "south carolina",
    "south dakota",
    "tennessee",
    "texas",
    "utah",
    "vermont",
    "virginia",
    "washington",
    "west virginia",
    "wisconsin",
    "wyoming",
    "district of columbia",
];

const US_CITIES: &[&str] = &[
    "san francisco",
    "los angeles",
    "san diego",
    "san jose",
    "seattle",
    "austin",
    "boston",
    "chicago",
    "denver",
    "boulder",
    "atlanta",
    "dallas",
    "houston",
    "miami",
    "portland",
    "phoenix",
    "philadelphia",
    "pittsburgh",
    "raleigh",
    "nashville",
    "minneapolis",
    "detroit",
    "salt lake city",
    "palo alto",
    "mountain view",
    "menlo park",
    "sunnyvale",
    "santa clara",
    "cupertino",
    "redmond",
    "bellevue",
    "oakland",
    "brooklyn",
    "manhattan",
    "nyc",
];

const US_STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC", "US", "USA", "EU",
];

const EU: &[&str] = &[
    // Member states
    "austria",
    "belgium",
    "bulgaria",
    "croatia",
    "cyprus",
    "czech",
    "denmark",
    "estonia",
    "finland",
    "france",
    "germany",
    "greece",
    "hungary",
    "ireland",
    "italy",
    "latvia",
    "lithuania",
    "luxembourg",
    "malta",
    "netherlands",
    "poland",
    "portugal",
    "romania",
    "slovakia",
    "slovenia",
    "spain",
    "sweden",
    // Cities
    "berlin",
    "munich",
    "hamburg",
    "frankfurt",
    "paris",
    "amsterdam",
    "rotterdam",
    "dublin",
    "madrid",
    "barcelona",
    "lisbon",
    "stockholm",
    "copenhagen",
    "helsinki",
    "vienna",
    "brussels",
    "milan",
    "rome",
    "warsaw",
    "krakow",
    "prague",
    "budapest",
    "athens",
    "bucharest",
    "tallinn",
    "vilnius",
    "riga",
];

/// Whether a free-text location looks like it is in the US or the EU.
#[must_use]
pub fn is_us_or_eu(location: &str) -> bool {
    let lower = location.to_lowercase();
    contains_any(&lower, GENERAL)
        || contains_any(&lower, US_STATES)
        || contains_any(&lower, US_CITIES)
        || matches_state_code(location)
        || contains_any(&lower, EU)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Whole-word match of a state postal code (or `US`, `USA`, `EU`).
pub(crate) fn matches_state_code(location: &str) -> bool {
    static CODES: OnceLock<Regex> = OnceLock::new();
    CODES
        .get_or_init(|| {
            let alternation = US_STATE_CODES.join("|");
            Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("valid regex")
        })
        .is_match(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_locations() {
        for location in [
            "Austin, TX",
            "San Francisco, CA",
            "Remote - United States",
            "Portland, Maine",
            "New York, NY",
            "Remote (US)",
            "Durham, NC",
        ] {
            assert!(is_us_or_eu(location), "should match: {location}");
        }
    }

    #[test]
    fn test_eu_locations() {
        for location in ["Berlin, Germany", "Dublin", "Amsterdam, NL", "Remote, EU"] {
            assert!(is_us_or_eu(location), "should match: {location}");
        }
    }

    #[test]
    fn test_other_locations() {
        for location in [
            "Bangalore, India",
            "Toronto, Canada",
            "Tokyo, Japan",
            "Singapore",
            "London, United Kingdom",
            "Remote",
        ] {
            assert!(!is_us_or_eu(location), "should not match: {location}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        for location in ["Austin, TX", "Maine", "Berlin, Germany", "Remote (US)"] {
            assert!(is_us_or_eu(&location.to_uppercase()));
            assert!(is_us_or_eu(&location.to_lowercase()));
        }
    }

    #[test]
    fn test_state_code_needs_word_boundary() {
        assert!(!matches_state_code("Germany"));
        assert!(!matches_state_code("Bangalore"));
        assert!(!matches_state_code("Mexico City"));
        assert!(matches_state_code("Augusta, ME"));
        assert!(matches_state_code("Seattle, WA"));
        assert!(is_us_or_eu("Maine"));
    }

    #[test]
    fn test_known_state_code_false_positives() {
        // Codes and short words are indistinguishable from postal codes.
        assert!(is_us_or_eu("Remote in India"));
        assert!(is_us_or_eu("Bangalore, KA, in"));
        assert!(!is_us_or_eu("Bangalore, Karnataka, India"));
    }
}
