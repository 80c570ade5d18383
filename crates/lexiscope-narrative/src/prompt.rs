//! Prompt construction for narrative analysis.

use crate::types::ChatMessage;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that analyzes text and extracts \
structured information. Always respond with valid JSON.";

/// System and user messages asking for a JSON analysis of `text`.
pub fn analysis_messages(text: &str) -> Vec<ChatMessage> {
    let user = format!(
        r#"Analyze the following text and provide a structured response in JSON format.

Text: "{text}"

Please provide:
1. A 1-2 sentence summary
2. A title (if available, otherwise generate a suitable title)
3. 3 key topics from the text
4. Sentiment analysis (positive/neutral/negative)
5. A confidence score (0.0 to 1.0)

Return the response as valid JSON with these exact keys:
{{
    "summary": "string",
    "title": "string",
    "topics": ["topic1", "topic2", "topic3"],
    "sentiment": "positive/neutral/negative",
    "confidence_score": 0.0
}}"#
    );
    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_embed_text() {
        let messages = analysis_messages("Tides follow the moon.");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[1].content.contains("\"Tides follow the moon.\""));
        assert!(messages[1].content.contains("\"confidence_score\""));
    }
}
