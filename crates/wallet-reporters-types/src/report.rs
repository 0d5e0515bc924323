use serde_json::Value;
use thiserror::Error;

use crate::api::SubmitReportRequest;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("wallet_address is required")]
    MissingWalletAddress,
    #[error("email is required (demo only)")]
    MissingEmail,
}

/// A validated, normalized submission ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSubmission {
    pub wallet_address: String,
    pub email: String,
    pub category: Option<String>,
    pub message: Option<String>,
    pub url: Option<String>,
}

impl TryFrom<SubmitReportRequest> for ReportSubmission {
    type Error = FieldError;

    fn try_from(req: SubmitReportRequest) -> Result<Self, Self::Error> {
        let wallet_address = required(req.wallet_address.as_ref())
            .ok_or(FieldError::MissingWalletAddress)?;
        let email = required(req.email.as_ref()).ok_or(FieldError::MissingEmail)?;

        Ok(Self {
            wallet_address,
            email,
            category: req.category.as_ref().and_then(coerce_text),
            message: req.message.as_ref().and_then(coerce_text),
            url: req.url.as_ref().and_then(coerce_text),
        })
    }
}

/// Coerce a loosely-typed JSON field to trimmed text.
///
/// `null`, `false`, `0` and `""` count as absent. Everything else is rendered
/// the way a JavaScript `String(value)` call would and then trimmed, so a
/// whitespace-only string comes back as `""`.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        _ => Some(js_string(value).trim().to_string()),
    }
}

/// Text form of a JSON value under JavaScript `String()` rules: arrays join
/// their elements with `,` (nulls as empty), objects are `[object Object]`,
/// integral floats drop the fraction.
fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                _ => js_string(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn required(value: Option<&Value>) -> Option<String> {
    value.and_then(coerce_text).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> SubmitReportRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn trims_required_fields() {
        let sub = ReportSubmission::try_from(request(json!({
            "wallet_address": "  0xABC ",
            "email": "\ta@b.com\n",
        })))
        .unwrap();
        assert_eq!(sub.wallet_address, "0xABC");
        assert_eq!(sub.email, "a@b.com");
        assert_eq!(sub.category, None);
        assert_eq!(sub.message, None);
        assert_eq!(sub.url, None);
    }

    #[test]
    fn wallet_checked_before_email() {
        let err = ReportSubmission::try_from(request(json!({}))).unwrap_err();
        assert_eq!(err, FieldError::MissingWalletAddress);

        let err = ReportSubmission::try_from(request(json!({ "wallet_address": "   " })))
            .unwrap_err();
        assert_eq!(err, FieldError::MissingWalletAddress);
    }

    #[test]
    fn whitespace_email_is_missing() {
        let err = ReportSubmission::try_from(request(json!({
            "wallet_address": "0x1",
            "email": "   ",
        })))
        .unwrap_err();
        assert_eq!(err, FieldError::MissingEmail);
        assert_eq!(err.to_string(), "email is required (demo only)");
    }

    #[test]
    fn whitespace_optional_becomes_empty_string() {
        let sub = ReportSubmission::try_from(request(json!({
            "wallet_address": "0x1",
            "email": "a@b.com",
            "category": "   ",
            "message": " phishing ",
            "url": null,
        })))
        .unwrap();
        assert_eq!(sub.category.as_deref(), Some(""));
        assert_eq!(sub.message.as_deref(), Some("phishing"));
        assert_eq!(sub.url, None);
    }

    #[test]
    fn coerces_non_string_values() {
        assert_eq!(coerce_text(&json!(42)), Some("42".to_string()));
        assert_eq!(coerce_text(&json!(true)), Some("true".to_string()));
        assert_eq!(coerce_text(&json!(0)), None);
        assert_eq!(coerce_text(&json!(false)), None);
        assert_eq!(coerce_text(&json!("")), None);
    }

    #[test]
    fn renders_like_js_string() {
        assert_eq!(coerce_text(&json!(1.0)), Some("1".to_string()));
        assert_eq!(coerce_text(&json!(2.5)), Some("2.5".to_string()));
        assert_eq!(coerce_text(&json!(["a", 1])), Some("a,1".to_string()));
        assert_eq!(coerce_text(&json!([" x", null, [2, 3], " "])), Some("x,,2,3,".to_string()));
        assert_eq!(coerce_text(&json!([])), Some(String::new()));
        assert_eq!(coerce_text(&json!({ "k": "v" })), Some("[object Object]".to_string()));
    }

    #[test]
    fn empty_array_wallet_is_missing() {
        let err = ReportSubmission::try_from(request(json!({
            "wallet_address": [],
            "email": "a@b.com",
        })))
        .unwrap_err();
        assert_eq!(err, FieldError::MissingWalletAddress);
    }

    #[test]
    fn numeric_wallet_is_accepted() {
        let sub = ReportSubmission::try_from(request(json!({
            "wallet_address": 12345,
            "email": "a@b.com",
        })))
        .unwrap();
        assert_eq!(sub.wallet_address, "12345");
    }
}
