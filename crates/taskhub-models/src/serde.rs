use serde::{Deserialize, Deserializer};

/// Reads an optional string, treating JSON `null` as an empty string so
/// the field's own validation reports it.
pub fn deserialize_null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}
