use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: String,
    pub media_type: MediaType,
    pub poster: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
    Episode,
    Game,
    Other,
}

impl MediaType {
    /// Parse a provider "type" string, falling back to `Other` for
    /// values the provider adds later.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "movie" => MediaType::Movie,
            "series" => MediaType::Series,
            "episode" => MediaType::Episode,
            "game" => MediaType::Game,
            _ => MediaType::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_parse() {
        assert_eq!(MediaType::parse("movie"), MediaType::Movie);
        assert_eq!(MediaType::parse("Series"), MediaType::Series);
        assert_eq!(MediaType::parse("short"), MediaType::Other);
        assert_eq!(MediaType::parse(""), MediaType::Other);
    }
}
