use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha1::Sha1;

use crate::errors::AppError;
use crate::models::WebhookPayload;
use crate::services::conversation;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct VerifyQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Subscription handshake: echo the challenge back when the token matches.
pub async fn verify_webhook(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VerifyQuery>,
) -> Response {
    let token_ok = query.verify_token.as_deref() == Some(state.config.validation_token.as_str());
    if query.mode.as_deref() == Some("subscribe") && token_ok {
        tracing::info!("validating webhook");
        return (StatusCode::OK, query.challenge.unwrap_or_default()).into_response();
    }

    tracing::error!("failed webhook validation, check that the validation tokens match");
    StatusCode::FORBIDDEN.into_response()
}

/// Hex HMAC-SHA1 of the raw request body, keyed by the app secret.
pub fn sign_body(app_secret: &str, body: &[u8]) -> String {
    let mut mac = match Hmac::<Sha1>::new_from_slice(app_secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return String::new(),
    };
    mac.update(body);
    encode_hex(&mac.finalize().into_bytes())
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        output.push_str(&format!("{byte:02x}"));
    }
    output
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

/// Checks an `X-Hub-Signature` header of the form `sha1=<hex digest>`.
/// The digest comparison is constant-time.
fn validate_signature(app_secret: &str, header: &str, body: &[u8]) -> bool {
    let Some((method, hash)) = header.split_once('=') else {
        return false;
    };
    if method != "sha1" {
        return false;
    }
    let Some(expected) = decode_hex(hash).filter(|d| !d.is_empty()) else {
        return false;
    };
    let Ok(mut mac) = Hmac::<Sha1>::new_from_slice(app_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

pub async fn receive_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let signature = headers
        .get("x-hub-signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if signature.is_empty() {
        tracing::warn!("missing X-Hub-Signature header");
        return Err(AppError::Forbidden("missing signature".to_string()));
    }
    if !validate_signature(&state.config.app_secret, signature, &body) {
        tracing::warn!("invalid X-Hub-Signature");
        return Err(AppError::Forbidden("invalid signature".to_string()));
    }

    let payload: WebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("malformed callback body: {e}")))?;

    if payload.object != "page" {
        tracing::info!(object = %payload.object, "ignoring non-page subscription callback");
        return Ok(StatusCode::OK);
    }

    let events: usize = payload.entry.iter().map(|e| e.messaging.len()).sum();
    tracing::info!(entries = payload.entry.len(), events, "received callback");

    // The platform wants a 200 within its timeout regardless of how long
    // the turns take, so processing happens off the request.
    tokio::spawn(async move {
        for entry in &payload.entry {
            for event in &entry.messaging {
                conversation::handle_event(&state, event).await;
            }
        }
    });

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_body_known_vector() {
        // RFC 2202, HMAC-SHA1 test case 2.
        assert_eq!(
            sign_body("Jefe", b"what do ya want for nothing?"),
            "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79"
        );
    }

    #[test]
    fn test_validate_signature() {
        let body = br#"{"object":"page","entry":[]}"#;
        let good = format!("sha1={}", sign_body("secret", body));

        assert!(validate_signature("secret", &good, body));
        let upper = good.to_uppercase().replacen("SHA1", "sha1", 1);
        assert!(validate_signature("secret", &upper, body));
        assert!(!validate_signature("other-secret", &good, body));
        assert!(!validate_signature("secret", &good, b"tampered"));
        assert!(!validate_signature("secret", "sha256=abc", body));
        assert!(!validate_signature("secret", "garbage", body));
    }

    #[test]
    fn test_validate_signature_rejects_malformed_digest() {
        let body = br#"{"object":"page","entry":[]}"#;
        let good = sign_body("secret", body);

        // Truncated, odd length, non-hex and empty digests never match.
        let truncated = format!("sha1={}", &good[..good.len() - 2]);
        assert!(!validate_signature("secret", &truncated, body));
        let odd = format!("sha1={}", &good[..good.len() - 1]);
        assert!(!validate_signature("secret", &odd, body));
        let non_hex = format!("sha1={}zz", &good[..good.len() - 2]);
        assert!(!validate_signature("secret", &non_hex, body));
        assert!(!validate_signature("secret", "sha1=", body));
    }

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("00ff7A"), Some(vec![0x00, 0xff, 0x7a]));
        assert_eq!(decode_hex("abc"), None);
        assert_eq!(decode_hex("zz"), None);
        assert_eq!(decode_hex("éé"), None);
    }
}
