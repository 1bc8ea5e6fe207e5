//! Fixed-shape handler response

use serde::{Deserialize, Serialize};

use crate::Result;

/// Message returned after a stop request is accepted
pub const STOPPED_MESSAGE: &str = "EC2 instance stopped successfully";

/// Response returned to the invoking runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    /// HTTP-style status code
    pub status_code: u16,
    /// JSON-serialized body
    pub body: String,
}

impl HandlerResponse {
    /// The success response: status 200 with the confirmation message as a
    /// JSON string body
    ///
    /// # Errors
    /// Returns error if the body cannot be serialized
    pub fn stopped() -> Result<Self> {
        Ok(Self {
            status_code: 200,
            body: serde_json::to_string(STOPPED_MESSAGE)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_response_shape() {
        let response = HandlerResponse::stopped().unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "\"EC2 instance stopped successfully\"");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "statusCode": 200,
                "body": "\"EC2 instance stopped successfully\""
            })
        );
    }
}
