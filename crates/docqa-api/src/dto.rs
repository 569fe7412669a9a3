//! Request and response bodies for the HTTP surface.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub documents: usize,
    pub chunks: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_request_deserialization() {
        let request: AskRequest =
            serde_json::from_str(r#"{"question":"What is the refund window?"}"#).unwrap();
        assert_eq!(request.question, "What is the refund window?");
    }

    #[test]
    fn test_upload_response_serialization() {
        let body = UploadResponse {
            message: "Files uploaded and processed.".to_string(),
            documents: 2,
            chunks: 14,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["documents"], 2);
        assert_eq!(json["chunks"], 14);
        assert_eq!(json["message"], "Files uploaded and processed.");
    }
}
