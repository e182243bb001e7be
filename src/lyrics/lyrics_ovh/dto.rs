//! lyrics.ovh API Data Transfer Objects

use serde::{Deserialize, Serialize};

/// `GET /v1/{artist}/{title}` response: either `lyrics` or `error` is set
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LyricsResponse {
    pub lyrics: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_found() {
        let json = r#"{"lyrics": "Yesterday\r\nAll my troubles seemed so far away"}"#;
        let response: LyricsResponse = serde_json::from_str(json).expect("Should parse");
        assert!(response.lyrics.unwrap().starts_with("Yesterday"));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_parse_not_found() {
        let json = r#"{"error": "No lyrics found"}"#;
        let response: LyricsResponse = serde_json::from_str(json).expect("Should parse");
        assert!(response.lyrics.is_none());
        assert_eq!(response.error.as_deref(), Some("No lyrics found"));
    }
}
