//! Search links for a competition when the sheet carries no usable link.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched by form-style query encoding.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b' ');

fn present(part: Option<&str>) -> Option<&str> {
    part.map(str::trim).filter(|p| !p.is_empty())
}

/// Form-encode a query string, using `+` for spaces.
fn encode_query(query: &str) -> String {
    utf8_percent_encode(query, QUERY)
        .to_string()
        .replace(' ', "+")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLinks {
    pub google: String,
    pub google_maps: String,
    pub bing: String,
    pub athletics_weekly: String,
    pub runbritain: String,
}

impl SearchLinks {
    /// Build search URLs for a competition.
    ///
    /// Web searches use `name venue location athletics`. The maps search uses
    /// `venue location`, falling back to the name when both are absent.
    /// Blank parts are skipped.
    #[must_use]
    pub fn for_competition(name: &str, venue: Option<&str>, location: Option<&str>) -> Self {
        let name = present(Some(name));
        let place: Vec<&str> = present(venue).into_iter().chain(present(location)).collect();

        let mut terms: Vec<&str> = name.into_iter().chain(place.iter().copied()).collect();
        terms.push("athletics");
        let web = encode_query(&terms.join(" "));

        let maps = if place.is_empty() {
            encode_query(name.unwrap_or_default())
        } else {
            encode_query(&place.join(" "))
        };

        Self {
            google: format!("https://www.google.com/search?q={web}"),
            google_maps: format!("https://www.google.com/maps/search/{maps}"),
            bing: format!("https://www.bing.com/search?q={web}"),
            athletics_weekly: format!("https://www.google.com/search?q={web}+site:athleticsweekly.com"),
            runbritain: format!("https://www.google.com/search?q={web}+site:runbritain.com"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_spaces_as_plus_and_escapes_reserved() {
        assert_eq!(encode_query("Track & Field 5k"), "Track+%26+Field+5k");
        assert_eq!(encode_query("St. Albans_AC"), "St.+Albans_AC");
    }

    #[test]
    fn web_query_includes_all_parts() {
        let links = SearchLinks::for_competition("Summer Open", Some("Sportcity"), Some("M11 3FF"));
        assert_eq!(
            links.google,
            "https://www.google.com/search?q=Summer+Open+Sportcity+M11+3FF+athletics"
        );
        assert_eq!(
            links.bing,
            "https://www.bing.com/search?q=Summer+Open+Sportcity+M11+3FF+athletics"
        );
        assert!(links.runbritain.ends_with("+site:runbritain.com"));
        assert!(links.athletics_weekly.ends_with("+site:athleticsweekly.com"));
    }

    #[test]
    fn maps_query_prefers_place_over_name() {
        let links = SearchLinks::for_competition("Summer Open", Some("Sportcity"), None);
        assert_eq!(links.google_maps, "https://www.google.com/maps/search/Sportcity");
    }

    #[test]
    fn maps_query_falls_back_to_name() {
        let links = SearchLinks::for_competition("Summer Open", None, None);
        assert_eq!(links.google_maps, "https://www.google.com/maps/search/Summer+Open");
        assert_eq!(
            links.google,
            "https://www.google.com/search?q=Summer+Open+athletics"
        );
    }

    #[test]
    fn blank_parts_are_skipped() {
        let links = SearchLinks::for_competition("", Some("  "), Some("M11 3FF"));
        assert_eq!(
            links.google,
            "https://www.google.com/search?q=M11+3FF+athletics"
        );
        assert_eq!(links.google_maps, "https://www.google.com/maps/search/M11+3FF");
    }
}
