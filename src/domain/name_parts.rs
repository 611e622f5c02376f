//! src/domain/name_parts.rs

/// First and last name derived from the free-form name of a lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub first: String,
    pub last: String,
}

impl NameParts {
    /// Trims the name, splits it on single spaces and keeps the first two
    /// tokens. A missing token becomes an empty string, so a single-word name
    /// has an empty last name.
    pub fn parse(name: &str) -> Self {
        let mut tokens = name.trim().split(' ');
        let first = tokens.next().unwrap_or_default().to_string();
        let last = tokens.next().unwrap_or_default().to_string();

        Self { first, last }
    }
}

impl std::fmt::Display for NameParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first, self.last)
    }
}
