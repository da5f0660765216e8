//! Billing webhook signature verification.
//!
//! HMAC-SHA256 over `"{timestamp}.{raw body}"` with the shared webhook
//! secret, compared in constant time. The signed timestamp must be recent to
//! limit replay.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::webhook_errors::WebhookError;

/// Maximum allowed age for webhook signatures (5 minutes).
pub const MAX_EVENT_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for future signatures (1 minute).
pub const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components of a `Stripe-Signature` style header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// Every `v1` signature present. Secret rotation sends more than one.
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parses `t=<timestamp>,v1=<hex>[,v1=<hex>...]`.
    ///
    /// Unknown keys (including legacy `v0`) are ignored.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or_else(|| WebhookError::ParseError("invalid header format".to_string()))?;

            match key {
                "t" => {
                    timestamp = Some(value.parse().map_err(|_| {
                        WebhookError::ParseError("invalid timestamp".to_string())
                    })?);
                }
                "v1" => {
                    v1_signatures.push(hex::decode(value).map_err(|_| {
                        WebhookError::ParseError("invalid v1 signature hex".to_string())
                    })?);
                }
                _ => {}
            }
        }

        let timestamp =
            timestamp.ok_or_else(|| WebhookError::ParseError("missing timestamp".to_string()))?;
        if v1_signatures.is_empty() {
            return Err(WebhookError::ParseError("missing v1 signature".to_string()));
        }

        Ok(SignatureHeader {
            timestamp,
            v1_signatures,
        })
    }
}

/// Verifies webhook signatures against one shared secret.
pub struct WebhookSignatureVerifier {
    secret: String,
}

impl WebhookSignatureVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Checks `signature_header` against `payload` as of `now_unix`.
    ///
    /// # Errors
    ///
    /// - `ParseError` - header malformed
    /// - `TimestampOutOfRange` - signature older than 5 minutes
    /// - `InvalidTimestamp` - signature too far in the future
    /// - `InvalidSignature` - no `v1` entry matches
    pub fn verify(
        &self,
        payload: &[u8],
        signature_header: &str,
        now_unix: i64,
    ) -> Result<(), WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;
        validate_timestamp(header.timestamp, now_unix)?;

        let expected = compute_signature(&self.secret, header.timestamp, payload)?;
        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_compare(&expected, candidate));

        if matched {
            Ok(())
        } else {
            Err(WebhookError::InvalidSignature)
        }
    }
}

fn validate_timestamp(timestamp: i64, now_unix: i64) -> Result<(), WebhookError> {
    // `t=` is attacker-controlled; extreme values must not overflow.
    let age = now_unix
        .checked_sub(timestamp)
        .ok_or(WebhookError::TimestampOutOfRange)?;

    if age > MAX_EVENT_AGE_SECS {
        return Err(WebhookError::TimestampOutOfRange);
    }
    if age < -MAX_CLOCK_SKEW_SECS {
        return Err(WebhookError::InvalidTimestamp);
    }
    Ok(())
}

fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, WebhookError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|_| WebhookError::InvalidSignature)?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Produces a header value the verifier accepts, for callers that need to
/// post signed payloads (tests, local replay tooling).
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> Result<String, WebhookError> {
    let signature = compute_signature(secret, timestamp, payload)?;
    Ok(format!("t={},v1={}", timestamp, hex::encode(signature)))
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "whsec_test_secret_12345";
    const NOW: i64 = 1_717_000_000;
    const PAYLOAD: &[u8] = br#"{"id":"evt_1","type":"customer.subscription.deleted"}"#;

    // ══════════════════════════════════════════════════════════════
    // Header Parsing
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_header_with_v1_only() {
        let header = SignatureHeader::parse(&format!("t=1234567890,v1={}", "a".repeat(64))).unwrap();
        assert_eq!(header.timestamp, 1234567890);
        assert_eq!(header.v1_signatures.len(), 1);
        assert_eq!(header.v1_signatures[0].len(), 32);
    }

    #[test]
    fn parse_header_collects_every_v1() {
        let header = SignatureHeader::parse(&format!(
            "t=1,v1={},v1={},v0={}",
            "a".repeat(64),
            "b".repeat(64),
            "c".repeat(64)
        ))
        .unwrap();
        assert_eq!(header.v1_signatures.len(), 2);
    }

    #[test]
    fn parse_header_ignores_unknown_fields() {
        let header =
            SignatureHeader::parse(&format!("t=5,v1={},scheme=hmac", "a".repeat(64))).unwrap();
        assert_eq!(header.timestamp, 5);
    }

    #[test]
    fn parse_header_rejects_malformed_input() {
        for raw in [
            format!("v1={}", "a".repeat(64)),
            "t=1234567890".to_string(),
            format!("t=soon,v1={}", "a".repeat(64)),
            "t=1,v1=not_hex".to_string(),
            "t1234567890".to_string(),
            String::new(),
        ] {
            assert!(
                matches!(SignatureHeader::parse(&raw), Err(WebhookError::ParseError(_))),
                "{raw:?}"
            );
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Verification
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_accepts_own_signature() {
        let header = sign_payload(TEST_SECRET, NOW, PAYLOAD).unwrap();
        let verifier = WebhookSignatureVerifier::new(TEST_SECRET);
        assert!(verifier.verify(PAYLOAD, &header, NOW).is_ok());
    }

    #[test]
    fn verify_accepts_when_any_v1_matches() {
        let good = sign_payload(TEST_SECRET, NOW, PAYLOAD).unwrap();
        let good_sig = good.split_once("v1=").unwrap().1;
        let header = format!("t={},v1={},v1={}", NOW, "0".repeat(64), good_sig);
        let verifier = WebhookSignatureVerifier::new(TEST_SECRET);
        assert!(verifier.verify(PAYLOAD, &header, NOW).is_ok());
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let header = sign_payload("whsec_other", NOW, PAYLOAD).unwrap();
        let verifier = WebhookSignatureVerifier::new(TEST_SECRET);
        assert_eq!(
            verifier.verify(PAYLOAD, &header, NOW),
            Err(WebhookError::InvalidSignature)
        );
    }

    #[test]
    fn verify_rejects_tampered_payload() {
        let header = sign_payload(TEST_SECRET, NOW, PAYLOAD).unwrap();
        let verifier = WebhookSignatureVerifier::new(TEST_SECRET);
        assert_eq!(
            verifier.verify(br#"{"id":"evt_2"}"#, &header, NOW),
            Err(WebhookError::InvalidSignature)
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Timestamp Window
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn timestamp_at_max_age_is_accepted() {
        assert!(validate_timestamp(NOW - 300, NOW).is_ok());
        assert_eq!(
            validate_timestamp(NOW - 301, NOW),
            Err(WebhookError::TimestampOutOfRange)
        );
    }

    #[test]
    fn timestamp_within_skew_is_accepted() {
        assert!(validate_timestamp(NOW + 60, NOW).is_ok());
        assert_eq!(
            validate_timestamp(NOW + 61, NOW),
            Err(WebhookError::InvalidTimestamp)
        );
    }

    #[test]
    fn extreme_timestamps_are_rejected_without_overflow() {
        assert_eq!(
            validate_timestamp(i64::MIN, NOW),
            Err(WebhookError::TimestampOutOfRange)
        );
        assert_eq!(
            validate_timestamp(i64::MAX, NOW),
            Err(WebhookError::InvalidTimestamp)
        );

        let verifier = WebhookSignatureVerifier::new(TEST_SECRET);
        for t in [i64::MIN, i64::MAX] {
            let header = format!("t={},v1={}", t, "a".repeat(64));
            assert!(verifier.verify(b"{}", &header, NOW).is_err(), "t={t}");
        }
    }

    #[test]
    fn stale_signature_is_rejected_even_when_valid() {
        let header = sign_payload(TEST_SECRET, NOW - 3600, PAYLOAD).unwrap();
        let verifier = WebhookSignatureVerifier::new(TEST_SECRET);
        assert_eq!(
            verifier.verify(PAYLOAD, &header, NOW),
            Err(WebhookError::TimestampOutOfRange)
        );
    }

    #[test]
    fn constant_time_compare_checks_length_and_content() {
        assert!(constant_time_compare(&[1, 2, 3], &[1, 2, 3]));
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 4]));
        assert!(!constant_time_compare(&[1, 2], &[1, 2, 3]));
    }
}
