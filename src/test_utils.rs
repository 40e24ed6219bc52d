#[cfg(test)]
pub mod fixtures {
    use serde_json::json;

    use crate::models::domain::Question;

    pub const DEFAULT_TEMPLATE: &str = "Generate ${n} quiz questions about ${topic}.";

    /// A couple of questions shaped the way the bundled prompt asks for them.
    pub fn sample_questions() -> Vec<Question> {
        vec![
            json!({
                "question": "1 + 1 = ?",
                "choices": ["1", "2", "3", "4"],
                "answer": 1,
                "explanation": "1 + 1 = 2"
            }),
            json!({
                "question": "2 * 3 = ?",
                "choices": ["5", "6", "7", "8"],
                "answer": 1,
                "explanation": "2 * 3 = 6"
            }),
        ]
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::{body::MessageBody, dev::ServiceResponse, http::StatusCode, test};

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }

    /// Reads a response body as JSON
    pub async fn read_json<B: MessageBody>(resp: ServiceResponse<B>) -> serde_json::Value {
        let body = test::read_body(resp).await;
        serde_json::from_slice(&body).expect("response body is JSON")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::fixtures::*;
    use crate::services::template_service::{resolve, unresolved_placeholders};

    #[test]
    fn test_fixtures_sample_questions() {
        let questions = sample_questions();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0]["answer"], 1);
    }

    #[test]
    fn test_fixtures_default_template_placeholders() {
        assert_eq!(unresolved_placeholders(DEFAULT_TEMPLATE), vec!["n", "topic"]);

        let vars = BTreeMap::from([
            ("n".to_string(), "2".to_string()),
            ("topic".to_string(), "math".to_string()),
        ]);
        assert_eq!(
            resolve(DEFAULT_TEMPLATE, &vars),
            "Generate 2 quiz questions about math."
        );
    }
}
