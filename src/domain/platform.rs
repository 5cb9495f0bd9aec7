//! Content destinations understood by the generation backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Linkedin,
    Twitter,
    Instagram,
    Facebook,
    Blog,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Linkedin,
        Platform::Twitter,
        Platform::Instagram,
        Platform::Facebook,
        Platform::Blog,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Linkedin => "linkedin",
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Blog => "blog",
        }
    }

    /// Parses a comma-separated platform list, dropping repeats while keeping
    /// first-seen order.
    pub fn parse_list(raw: &str) -> Result<Vec<Platform>, DomainError> {
        let mut platforms = Vec::new();
        for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let platform = name.parse::<Platform>()?;
            if !platforms.contains(&platform) {
                platforms.push(platform);
            }
        }
        Ok(platforms)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|platform| platform.as_str() == normalized)
            .ok_or_else(|| DomainError::unknown_platform(s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("LinkedIn".parse::<Platform>(), Ok(Platform::Linkedin));
        assert_eq!(" blog ".parse::<Platform>(), Ok(Platform::Blog));
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "myspace".parse::<Platform>().expect_err("unknown platform");
        assert_eq!(err, DomainError::unknown_platform("myspace"));
    }

    #[test]
    fn parse_list_collapses_duplicates() {
        let platforms = Platform::parse_list("twitter, linkedin,twitter,,").expect("valid list");
        assert_eq!(platforms, vec![Platform::Twitter, Platform::Linkedin]);
    }

    #[test]
    fn serializes_as_lowercase_name() {
        let json = serde_json::to_string(&Platform::Facebook).expect("serialize");
        assert_eq!(json, "\"facebook\"");
    }
}
