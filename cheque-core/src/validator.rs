//! Normalize a parsed model payload into a `ChequeRecord`.
//!
//! Partial extraction beats total failure: a missing or malformed field
//! degrades to its sentinel and only a non-object payload is rejected.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::record::ChequeRecord;

pub const FIELD_PAYEE: &str = "payee";
pub const FIELD_AMOUNT: &str = "amount";
pub const FIELD_BANK: &str = "bank";
pub const FIELD_MICR_CODE: &str = "micr_code";
pub const FIELD_BRANCH: &str = "branch";
pub const FIELD_IFSC_CODE: &str = "ifsc_code";
pub const FIELD_ACCOUNT_NUMBER: &str = "account_number";
pub const FIELD_CHEQUE_NUMBER: &str = "cheque_number";
pub const FIELD_DATE: &str = "date";
pub const FIELD_SIGNATURE_VERIFIED: &str = "signature_verified";

/// Build a record from a parsed payload.
pub fn validate(value: &Value) -> Result<ChequeRecord, ValidationError> {
    let obj = value.as_object().ok_or(ValidationError::NotAnObject {
        found: kind_of(value),
    })?;

    Ok(ChequeRecord {
        payee: text_field(obj, FIELD_PAYEE),
        amount: text_field(obj, FIELD_AMOUNT),
        bank: text_field(obj, FIELD_BANK),
        micr_code: text_field(obj, FIELD_MICR_CODE),
        branch: text_field(obj, FIELD_BRANCH),
        ifsc_code: text_field(obj, FIELD_IFSC_CODE),
        account_number: text_field(obj, FIELD_ACCOUNT_NUMBER),
        cheque_number: obj.get(FIELD_CHEQUE_NUMBER).and_then(coerce_integer),
        date: text_field(obj, FIELD_DATE),
        signature_verified: obj.get(FIELD_SIGNATURE_VERIFIED).and_then(Value::as_bool),
    })
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Integer-valued numbers and integer strings; everything else is unknown.
///
/// Out-of-range values are unknown rather than clamped. `i64::MAX as f64`
/// rounds up to 2^63, so the upper bound must be exclusive.
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            if n.is_u64() {
                return None;
            }
            let f = n.as_f64()?;
            (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64)
                .then_some(f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_payload() {
        let v = json!({
            "payee": "Ravi Kumar",
            "amount": "15,000.00",
            "bank": "State Bank of India",
            "micr_code": "400002005",
            "branch": "Fort, Mumbai",
            "ifsc_code": "SBIN0000300",
            "account_number": "30012345678",
            "cheque_number": 123456,
            "date": "12/03/2024",
            "signature_verified": true
        });
        let r = validate(&v).unwrap();
        assert_eq!(r.payee, "Ravi Kumar");
        assert_eq!(r.ifsc_code, "SBIN0000300");
        assert_eq!(r.cheque_number, Some(123456));
        assert_eq!(r.signature_verified, Some(true));
    }

    #[test]
    fn test_subset_payload_uses_sentinels() {
        let r = validate(&json!({"payee": "A", "amount": "100"})).unwrap();
        assert_eq!(r.payee, "A");
        assert_eq!(r.amount, "100");
        assert_eq!(r.bank, "");
        assert_eq!(r.micr_code, "");
        assert_eq!(r.branch, "");
        assert_eq!(r.ifsc_code, "");
        assert_eq!(r.account_number, "");
        assert_eq!(r.date, "");
        assert_eq!(r.cheque_number, None);
        assert_eq!(r.signature_verified, None);
    }

    #[test]
    fn test_null_text_fields_become_empty() {
        let r = validate(&json!({"payee": null, "bank": null})).unwrap();
        assert_eq!(r.payee, "");
        assert_eq!(r.bank, "");
    }

    #[test]
    fn test_numeric_amount_kept_as_text() {
        let r = validate(&json!({"amount": 2500.5, "account_number": 1234567890})).unwrap();
        assert_eq!(r.amount, "2500.5");
        assert_eq!(r.account_number, "1234567890");
    }

    #[test]
    fn test_cheque_number_coercion() {
        let num = |v: Value| validate(&json!({ "cheque_number": v })).unwrap().cheque_number;
        assert_eq!(num(json!(42)), Some(42));
        assert_eq!(num(json!(42.0)), Some(42));
        assert_eq!(num(json!(" 000123 ")), Some(123));
        assert_eq!(num(json!(42.5)), None);
        assert_eq!(num(json!("12AB34")), None);
        assert_eq!(num(json!("")), None);
        assert_eq!(num(json!(null)), None);
        assert_eq!(num(json!(true)), None);
    }

    #[test]
    fn test_cheque_number_out_of_range_is_unknown() {
        let num = |v: Value| validate(&json!({ "cheque_number": v })).unwrap().cheque_number;
        let too_big: Value = serde_json::from_str("9223372036854775808").unwrap();
        assert_eq!(num(too_big), None);
        assert_eq!(num(json!("9223372036854775808")), None);
        assert_eq!(num(json!(9.3e18)), None);
        assert_eq!(num(json!(-1.0e19)), None);
        assert_eq!(num(json!(i64::MAX)), Some(i64::MAX));
        assert_eq!(num(json!(i64::MIN)), Some(i64::MIN));
    }

    #[test]
    fn test_signature_is_not_coerced_from_strings() {
        let sig = |v: Value| validate(&json!({ "signature_verified": v })).unwrap().signature_verified;
        assert_eq!(sig(json!(false)), Some(false));
        assert_eq!(sig(json!("true")), None);
        assert_eq!(sig(json!(null)), None);
        assert_eq!(sig(json!(1)), None);
    }

    #[test]
    fn test_non_object_rejected() {
        for v in [json!([1, 2]), json!("payee"), json!(null), json!(7)] {
            assert!(matches!(validate(&v), Err(ValidationError::NotAnObject { .. })));
        }
        let err = validate(&json!([])).unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let r = validate(&json!({"payee": "A", "notes": "crossed cheque"})).unwrap();
        assert_eq!(r.payee, "A");
    }
}
