//! Keyword heuristics that map an unstable spreadsheet layout onto the
//! canonical competition fields.
//!
//! Every role owns an ordered list of lower-case keywords. A header matches a
//! role when it contains any of the role's keywords as a case-insensitive
//! substring. The first matching header in table order wins; keyword order
//! only matters for readability, never for tie-breaking.

/// Canonical field a spreadsheet column can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Name,
    Postcode,
    Date,
    Venue,
    Host,
    Level,
    Link,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 7] = [
        ColumnRole::Name,
        ColumnRole::Postcode,
        ColumnRole::Date,
        ColumnRole::Venue,
        ColumnRole::Host,
        ColumnRole::Level,
        ColumnRole::Link,
    ];

    /// The keyword list for this role from [`ROLE_KEYWORDS`].
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        ROLE_KEYWORDS
            .iter()
            .find(|(role, _)| *role == self)
            .map(|(_, keywords)| *keywords)
            .unwrap_or_default()
    }

    fn index(self) -> usize {
        match self {
            ColumnRole::Name => 0,
            ColumnRole::Postcode => 1,
            ColumnRole::Date => 2,
            ColumnRole::Venue => 3,
            ColumnRole::Host => 4,
            ColumnRole::Level => 5,
            ColumnRole::Link => 6,
        }
    }
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRole::Name => write!(f, "name"),
            ColumnRole::Postcode => write!(f, "postcode"),
            ColumnRole::Date => write!(f, "date"),
            ColumnRole::Venue => write!(f, "venue"),
            ColumnRole::Host => write!(f, "host"),
            ColumnRole::Level => write!(f, "level"),
            ColumnRole::Link => write!(f, "link"),
        }
    }
}

/// Role -> ordered keyword list. Keywords must be lower-case.
pub const ROLE_KEYWORDS: &[(ColumnRole, &[&str])] = &[
    (
        ColumnRole::Name,
        &["name", "title", "event", "competition", "meeting"],
    ),
    (
        ColumnRole::Postcode,
        &["postcode", "post_code", "postal_code", "post code", "zip"],
    ),
    (ColumnRole::Date, &["date"]),
    (ColumnRole::Venue, &["venue", "location", "place"]),
    (ColumnRole::Host, &["pot venue"]),
    (ColumnRole::Level, &["level", "licence"]),
    (ColumnRole::Link, &["link", "url", "wpa endorsed"]),
];

/// Which header, if any, plays each [`ColumnRole`] in one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoleMap {
    columns: [Option<String>; 7],
}

impl ColumnRoleMap {
    /// The header chosen for `role`, or `None` when unresolved.
    #[must_use]
    pub fn get(&self, role: ColumnRole) -> Option<&str> {
        self.columns[role.index()].as_deref()
    }

    #[must_use]
    pub fn is_resolved(&self, role: ColumnRole) -> bool {
        self.columns[role.index()].is_some()
    }

    fn set(&mut self, role: ColumnRole, header: String) {
        self.columns[role.index()] = Some(header);
    }
}

fn header_matches(header: &str, keywords: &[&str]) -> bool {
    let lower = header.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// Every header matching `role`, in table order.
#[must_use]
pub fn columns_matching<S: AsRef<str>>(headers: &[S], role: ColumnRole) -> Vec<&str> {
    let keywords = role.keywords();
    headers
        .iter()
        .map(AsRef::as_ref)
        .filter(|h| header_matches(h, keywords))
        .collect()
}

/// Classify a table's headers into a [`ColumnRoleMap`].
///
/// A header may satisfy several roles at once. Additional matches for a role
/// beyond the first are dropped here; use [`columns_matching`] to see them.
/// `Name` falls back to the first column when nothing matches.
#[must_use]
pub fn classify<S: AsRef<str>>(headers: &[S]) -> ColumnRoleMap {
    let mut map = ColumnRoleMap::default();

    for &(role, keywords) in ROLE_KEYWORDS {
        if let Some(header) = headers
            .iter()
            .map(AsRef::as_ref)
            .find(|h| header_matches(h, keywords))
        {
            map.set(role, header.to_string());
        }
    }

    if !map.is_resolved(ColumnRole::Name) {
        if let Some(first) = headers.first() {
            map.set(ColumnRole::Name, first.as_ref().to_string());
        }
    }

    map
}

#[cfg(test)]
#[path = "columns_test.rs"]
mod tests;
