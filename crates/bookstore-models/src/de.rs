//! Deserialization helpers for server-provided records.

use serde::{Deserialize, Deserializer};

/// Decode a field, mapping an explicit `null` to the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "null_as_default")]
        count: u32,
    }

    #[test]
    fn test_null_and_missing_become_default() {
        let record: Record = serde_json::from_value(json!({ "count": null })).unwrap();
        assert_eq!(record.count, 0);

        let record: Record = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record.count, 0);

        let record: Record = serde_json::from_value(json!({ "count": 4 })).unwrap();
        assert_eq!(record.count, 4);
    }

    #[test]
    fn test_wrong_type_still_fails() {
        assert!(serde_json::from_value::<Record>(json!({ "count": "four" })).is_err());
    }
}
