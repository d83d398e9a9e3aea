use serde::Deserialize;
use utoipa::ToSchema;

/// Body accepted by both publish endpoints.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MessageParams {
    /// The message text to rebroadcast over the event stream.
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageParams {
    /// The message text if present and non-empty. The original contract is
    /// presence-based only: whitespace is not trimmed.
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_text_rejects_empty_string() {
        let params: MessageParams = serde_json::from_str(r#"{"message": ""}"#).unwrap();
        assert_eq!(params.message_text(), None);
    }

    #[test]
    fn test_message_text_rejects_missing_field() {
        let params: MessageParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.message_text(), None);
    }

    #[test]
    fn test_message_text_preserves_whitespace() {
        let params: MessageParams = serde_json::from_str(r#"{"message": "  hi  "}"#).unwrap();
        assert_eq!(params.message_text(), Some("  hi  "));
    }
}
