use std::{fmt::Display, str::FromStr};

use serde::{
    de::{self, DeserializeOwned, IntoDeserializer},
    Deserialize, Deserializer,
};
use uuid::Uuid;

// Helpers that let one request struct accept both JSON bodies and urlencoded HTML forms,
// where every value arrives as a string and unchecked checkboxes are simply absent.

#[derive(Deserialize)]
#[serde(untagged)]
enum ValueOrText<T> {
    Text(String),
    Value(T),
}

/// Optional field where a blank form input means "no value".
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match Option::<ValueOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(ValueOrText::Value(value)) => Ok(Some(value)),
        Some(ValueOrText::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed.parse::<T>().map(Some).map_err(de::Error::custom)
            }
        }
    }
}

/// `<select>` value: blank means nothing chosen, anything else must name a variant.
pub fn choice<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    T::deserialize(trimmed.to_string().into_deserializer())
        .map(Some)
        .map_err(|e: de::value::Error| de::Error::custom(e))
}

/// Checkbox semantics: `on`, `true`, `1`, `yes` are checked; absence means unchecked.
pub fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match ValueOrText::<bool>::deserialize(deserializer)? {
        ValueOrText::Value(value) => Ok(value),
        ValueOrText::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "on" | "true" | "1" | "yes" => Ok(true),
            "off" | "false" | "0" | "no" | "" => Ok(false),
            other => Err(de::Error::custom(format!("Invalid checkbox value: {other}"))),
        },
    }
}

/// IDs as a JSON array or a comma-separated form value.
pub fn id_list<'de, D>(deserializer: D) -> Result<Vec<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    match ValueOrText::<Vec<Uuid>>::deserialize(deserializer)? {
        ValueOrText::Value(ids) => Ok(ids),
        ValueOrText::Text(text) => text
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| Uuid::parse_str(part).map_err(de::Error::custom))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(rename_all = "snake_case")]
    enum Level {
        HighSchool,
        Master,
    }

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "choice")]
        level: Option<Level>,
        #[serde(default, deserialize_with = "blank_as_none")]
        salary: Option<f64>,
        #[serde(default, deserialize_with = "blank_as_none")]
        note: Option<String>,
        #[serde(default, deserialize_with = "checkbox")]
        current: bool,
        #[serde(default, deserialize_with = "id_list")]
        ids: Vec<Uuid>,
    }

    #[test]
    fn accepts_native_json_values() {
        let id = Uuid::new_v4();
        let sample: Sample = serde_json::from_value(serde_json::json!({
            "salary": 4200.5,
            "note": "remote",
            "current": true,
            "ids": [id],
        }))
        .unwrap();

        assert_eq!(sample.salary, Some(4200.5));
        assert_eq!(sample.note.as_deref(), Some("remote"));
        assert!(sample.current);
        assert_eq!(sample.ids, vec![id]);
    }

    #[test]
    fn accepts_form_style_strings() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let sample: Sample = serde_json::from_value(serde_json::json!({
            "salary": "3000",
            "note": "   ",
            "current": "on",
            "ids": format!("{a}, {b},"),
        }))
        .unwrap();

        assert_eq!(sample.salary, Some(3000.0));
        assert_eq!(sample.note, None);
        assert!(sample.current);
        assert_eq!(sample.ids, vec![a, b]);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let sample: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(sample.salary, None);
        assert!(!sample.current);
        assert!(sample.ids.is_empty());
    }

    #[test]
    fn blank_or_missing_choice_is_none() {
        let sample: Sample = serde_json::from_str(r#"{"level": " high_school "}"#).unwrap();
        assert_eq!(sample.level, Some(Level::HighSchool));

        let sample: Sample = serde_json::from_str(r#"{"level": "master"}"#).unwrap();
        assert_eq!(sample.level, Some(Level::Master));

        let sample: Sample = serde_json::from_str(r#"{"level": ""}"#).unwrap();
        assert_eq!(sample.level, None);

        let sample: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(sample.level, None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Sample>(r#"{"level": "wizard"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"salary": "lots"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"current": "maybe"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"ids": "not-a-uuid"}"#).is_err());
    }
}
