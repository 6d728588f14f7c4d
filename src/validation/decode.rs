use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode each element of a JSON array on its own, so one malformed entry
/// is reported without hiding the others.
///
/// Returns `(index, item)` pairs for the entries that decoded, using the
/// 0-based index of the source array, plus one error line per failure
/// labelled with the 1-based position (`"Region 3: missing field `name`"`).
/// A non-array input yields a single error and no items.
pub fn decode_list<T: DeserializeOwned>(
    value: &Value,
    label: &str,
    plural: &str,
) -> (Vec<(usize, T)>, Vec<String>) {
    let Some(items) = value.as_array() else {
        return (Vec::new(), vec![format!("{} must be an array", plural)]);
    };

    let mut decoded = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (i, item) in items.iter().enumerate() {
        match T::deserialize(item) {
            Ok(v) => decoded.push((i, v)),
            Err(e) => errors.push(format!("{} {}: {}", label, i + 1, e)),
        }
    }
    (decoded, errors)
}
