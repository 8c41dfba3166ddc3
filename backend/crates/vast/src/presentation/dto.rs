//! API DTOs (Data Transfer Objects)

use crate::application::serve_vast::{DEFAULT_BREAK_TYPE, ServeVastInput};
use kernel::id::{ContentId, ViewerId};
use serde::Deserialize;

/// Query for GET /vast
///
/// Every field is kept as a raw string so no value can make extraction
/// fail; interpretation happens in [`VastQuery::into_input`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VastQuery {
    #[serde(rename = "contentId", default)]
    pub content_id: Option<String>,
    /// Roku ID for Advertising / device identifier
    #[serde(default)]
    pub rida: Option<String>,
    #[serde(rename = "break", default)]
    pub break_type: Option<String>,
    #[serde(default)]
    pub pos: Option<String>,
}

impl VastQuery {
    pub fn into_input(self) -> ServeVastInput {
        let break_type = self
            .break_type
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_BREAK_TYPE.to_string());

        ServeVastInput {
            content_id: ContentId::from_param(self.content_id.as_deref()),
            viewer_id: ViewerId::from_param(self.rida.as_deref()),
            break_type,
            position_seconds: parse_position(self.pos.as_deref()),
        }
    }
}

/// Leading decimal digits of `raw` ("90s" -> 90); anything else is 0
fn parse_position(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else { return 0 };
    let digits: String = raw
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let input = VastQuery::default().into_input();
        assert_eq!(input, ServeVastInput::default());
        assert_eq!(input.content_id.as_str(), "default");
        assert_eq!(input.viewer_id.as_str(), "anon");
        assert_eq!(input.break_type, "preroll");
        assert_eq!(input.position_seconds, 0);
    }

    #[test]
    fn test_full_query() {
        let query = VastQuery {
            content_id: Some("film-9".into()),
            rida: Some("abc-123".into()),
            break_type: Some("midroll".into()),
            pos: Some("1800".into()),
        };
        let input = query.into_input();
        assert_eq!(input.content_id.as_str(), "film-9");
        assert_eq!(input.viewer_id.as_str(), "abc-123");
        assert_eq!(input.break_type, "midroll");
        assert_eq!(input.position_seconds, 1800);
    }

    #[test]
    fn test_position_parsing_is_lenient() {
        assert_eq!(parse_position(Some("90s")), 90);
        assert_eq!(parse_position(Some("-5")), 0);
        assert_eq!(parse_position(Some("abc")), 0);
        assert_eq!(parse_position(Some("99999999999999999999999")), 0);
        assert_eq!(parse_position(None), 0);
    }
}
