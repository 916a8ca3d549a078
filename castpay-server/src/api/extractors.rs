//! Validating extractors.
//!
//! Every endpoint describes its input twice: a raw shape where every field
//! is optional, and a typed request produced from it by [`Schema::parse`].
//! Handlers only ever see the typed request; anything that fails to parse
//! is answered with a 400 before the handler runs.
//!
//! - `ValidatedQuery<T>`: query string → `T::Raw` → `T`
//! - `ValidatedJson<T>`: JSON body → `T::Raw` → `T`

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::str::FromStr;

use super::error::{ApiError, ValidationError};

/// A typed request that can be parsed from its raw input.
pub trait Schema: Sized {
    type Raw: DeserializeOwned;

    fn parse(raw: Self::Raw) -> Result<Self, ValidationError>;
}

pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: Schema,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<T::Raw>::from_request_parts(parts, state)
            .await
            .map_err(|e| ValidationError::new(e.body_text()))?;
        Ok(Self(T::parse(raw)?))
    }
}

pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Schema,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<T::Raw>::from_request(req, state)
            .await
            .map_err(|e| ValidationError::new(e.body_text()))?;
        Ok(Self(T::parse(raw)?))
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// A present, non-blank string, trimmed.
pub fn required(value: Option<String>, field: &str) -> Result<String, ValidationError> {
    optional(value).ok_or_else(|| ValidationError::new(format!("{field} is required")))
}

/// `None` for absent or blank strings, the trimmed value otherwise.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// A decimal given as a JSON number or a numeric string.
pub fn decimal(value: Option<serde_json::Value>, field: &str) -> Result<Decimal, ValidationError> {
    let invalid = || ValidationError::new(format!("{field} must be a number"));
    let text = match value {
        None | Some(serde_json::Value::Null) => {
            return Err(ValidationError::new(format!("{field} is required")));
        }
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) => s.trim().to_owned(),
        Some(_) => return Err(invalid()),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| invalid())
}

/// Like [`decimal`], but the value must also be greater than zero.
pub fn positive_decimal(
    value: Option<serde_json::Value>,
    field: &str,
) -> Result<Decimal, ValidationError> {
    let amount = decimal(value, field)?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::new(format!("{field} must be positive")));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_trims_and_rejects_blank() {
        assert_eq!(required(Some(" KE ".into()), "country").unwrap(), "KE");
        assert_eq!(
            required(Some("   ".into()), "country"),
            Err(ValidationError::new("country is required"))
        );
        assert!(required(None, "country").is_err());
    }

    #[test]
    fn test_decimal_accepts_numbers_and_strings() {
        assert_eq!(decimal(Some(json!(12.5)), "amount"), Ok(Decimal::new(125, 1)));
        assert_eq!(decimal(Some(json!("100")), "amount"), Ok(Decimal::new(100, 0)));
        assert_eq!(
            decimal(Some(json!("abc")), "amount"),
            Err(ValidationError::new("amount must be a number"))
        );
        assert_eq!(
            decimal(None, "amount"),
            Err(ValidationError::new("amount is required"))
        );
        assert!(decimal(Some(json!(true)), "amount").is_err());
    }

    #[test]
    fn test_positive_decimal() {
        assert!(positive_decimal(Some(json!("0")), "amount").is_err());
        assert!(positive_decimal(Some(json!(-3)), "amount").is_err());
        assert!(positive_decimal(Some(json!(3)), "amount").is_ok());
    }
}
