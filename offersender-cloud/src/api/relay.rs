//! Server-side relay endpoint
//!
//! Thin pass-through for clients that cannot reach the gateway directly:
//! normalizes the phone, forwards the campaign request, and mirrors the
//! gateway's status code and body back verbatim.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Deserialize;

use crate::sms::phone;
use crate::sms::strategy::CampaignPayload;
use crate::state::AppState;

/// Relay request. Accepts the current shape
/// `{phone, message, apiKey, apiUrl, originator?}` and the legacy
/// `{to, body|message, from, apiKey, apiUrl}` one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    #[serde(default, alias = "to")]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Legacy alias for `message`; `message` wins when both are present.
    #[serde(default)]
    pub body: Option<String>,
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    #[serde(default, alias = "from")]
    pub originator: Option<String>,
}

/// POST /api/relay/send-sms
pub async fn send_sms(State(state): State<AppState>, Json(req): Json<RelayRequest>) -> Response {
    let message = req.message.as_deref().or(req.body.as_deref());

    let missing_phone = req.phone.as_deref().is_none_or(str::is_empty);
    let missing_message = message.is_none_or(str::is_empty);
    let missing_key = req.api_key.as_deref().is_none_or(str::is_empty);
    let missing_url = req.api_url.as_deref().is_none_or(str::is_empty);

    if missing_phone || missing_message || missing_key || missing_url {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "Missing required fields",
                "missing": {
                    "phone": missing_phone,
                    "message": missing_message,
                    "apiKey": missing_key,
                    "apiUrl": missing_url,
                }
            })),
        )
            .into_response();
    }

    // Unwraps guarded by the missing-field check above
    let phone_raw = req.phone.as_deref().unwrap_or_default();
    let message = message.unwrap_or_default();
    let api_key = req.api_key.as_deref().unwrap_or_default();
    let api_url = req.api_url.as_deref().unwrap_or_default();

    let destination = phone::normalize(phone_raw);
    let payload = CampaignPayload::new(
        message,
        req.originator.as_deref().unwrap_or(&state.originator),
        &destination,
    );

    let result = state
        .http
        .post(api_url)
        .header("Authorization", format!("Basic {api_key}"))
        .header("Accept", "application/json")
        .json(&payload)
        .send()
        .await;

    match result {
        Ok(response) => {
            let status = response.status();
            match response.text().await {
                // Mirror the gateway's status and body verbatim
                Ok(body) => (status, body).into_response(),
                Err(e) => transport_failure(&e.to_string()),
            }
        }
        Err(e) => transport_failure(&e.to_string()),
    }
}

fn transport_failure(detail: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": detail,
            "Code": -1,
            "Message": format!("Server error: {detail}"),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modern_shape_deserializes() {
        let req: RelayRequest = serde_json::from_str(
            r#"{"phone":"021234567","message":"hi","apiKey":"abc","apiUrl":"https://g.test","originator":"3247"}"#,
        )
        .unwrap();
        assert_eq!(req.phone.as_deref(), Some("021234567"));
        assert_eq!(req.message.as_deref(), Some("hi"));
        assert_eq!(req.api_key.as_deref(), Some("abc"));
        assert_eq!(req.originator.as_deref(), Some("3247"));
    }

    #[test]
    fn test_legacy_shape_deserializes() {
        let req: RelayRequest = serde_json::from_str(
            r#"{"to":"021234567","body":"hi","from":"3247","apiKey":"abc","apiUrl":"https://g.test"}"#,
        )
        .unwrap();
        assert_eq!(req.phone.as_deref(), Some("021234567"));
        assert_eq!(req.body.as_deref(), Some("hi"));
        assert_eq!(req.originator.as_deref(), Some("3247"));
    }

    #[test]
    fn test_missing_fields_tolerated_at_parse_time() {
        // Field presence is validated in the handler, not by serde
        let req: RelayRequest = serde_json::from_str(r#"{"phone":"021234567"}"#).unwrap();
        assert!(req.api_key.is_none());
        assert!(req.api_url.is_none());
    }
}
