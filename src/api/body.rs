use serde::Deserialize;

const BODY_PREVIEW_LIMIT: usize = 256;

/// Error body of the backend. `message` is a string, or a list of strings
/// for field validation failures.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    message: Option<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    Text(String),
    List(Vec<String>),
}

impl ErrorBody {
    pub(super) fn into_message(self) -> Option<String> {
        let message = match self.message? {
            ErrorMessage::Text(text) => text,
            ErrorMessage::List(items) => items.join("; "),
        };
        (!message.trim().is_empty()).then_some(message)
    }
}

pub(super) fn body_preview(body: &[u8]) -> String {
    if body.is_empty() {
        return "<empty>".to_string();
    }
    let end = body.len().min(BODY_PREVIEW_LIMIT);
    let mut preview = String::from_utf8_lossy(&body[..end]).to_string();
    if body.len() > BODY_PREVIEW_LIMIT {
        preview.push_str("...");
    }
    preview.replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::{ErrorBody, body_preview};

    #[test]
    fn error_message_accepts_text_and_lists() {
        let text: ErrorBody = serde_json::from_str(r#"{"message":"Produto não encontrado"}"#).unwrap();
        assert_eq!(text.into_message().as_deref(), Some("Produto não encontrado"));

        let list: ErrorBody =
            serde_json::from_str(r#"{"message":["name must not be empty","price must be a number"]}"#)
                .unwrap();
        assert_eq!(
            list.into_message().as_deref(),
            Some("name must not be empty; price must be a number")
        );

        let blank: ErrorBody = serde_json::from_str(r#"{"statusCode":500}"#).unwrap();
        assert!(blank.into_message().is_none());
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let body = "x".repeat(300);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.len(), 259);
        assert_eq!(body_preview(b""), "<empty>");
    }
}
