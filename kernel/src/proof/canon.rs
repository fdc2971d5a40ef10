//! Canonical JSON bytes: the single serialization-for-hashing implementation.
//!
//! Rules: object keys sorted (byte order), compact separators, integers only.
//! `serde_json` without `preserve_order` stores objects in a `BTreeMap`, so
//! key order and compact output come from `serde_json::to_vec`; this module
//! adds the integer-only check.

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanonError {
    /// A JSON number was not an integer (float, NaN, Infinity).
    #[error("non-integer number in canonical JSON: {raw}")]
    NonIntegerNumber { raw: String },
    #[error("JSON serialization failed: {detail}")]
    Serialize { detail: String },
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number is not representable
/// as `i64` or `u64`.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    reject_non_integers(value)?;
    serde_json::to_vec(value).map_err(|e| CanonError::Serialize {
        detail: e.to_string(),
    })
}

fn reject_non_integers(value: &serde_json::Value) -> Result<(), CanonError> {
    match value {
        serde_json::Value::Number(n) if n.as_i64().is_none() && n.as_u64().is_none() => {
            Err(CanonError::NonIntegerNumber { raw: n.to_string() })
        }
        serde_json::Value::Array(items) => items.iter().try_for_each(reject_non_integers),
        serde_json::Value::Object(map) => map.values().try_for_each(reject_non_integers),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sorted_keys() {
        let v = json!({"z": 1, "a": 2, "m": 3});
        assert_eq!(canonical_json_bytes(&v).unwrap(), b"{\"a\":2,\"m\":3,\"z\":1}");
    }

    #[test]
    fn nested_sorted_keys_and_compact() {
        let v: serde_json::Value =
            serde_json::from_str("{ \"b\" : {\"d\": 1, \"c\": [2, 3]}, \"a\" : 3 }").unwrap();
        assert_eq!(
            canonical_json_bytes(&v).unwrap(),
            b"{\"a\":3,\"b\":{\"c\":[2,3],\"d\":1}}"
        );
    }

    #[test]
    fn rejects_nested_float() {
        let v = json!({"a": [1, {"b": 1.5}]});
        let err = canonical_json_bytes(&v).unwrap_err();
        assert!(matches!(err, CanonError::NonIntegerNumber { .. }));
    }

    #[test]
    fn accepts_negative_and_large_integers() {
        let v = json!({"n": -3, "u": u64::MAX});
        assert!(canonical_json_bytes(&v).is_ok());
    }
}
