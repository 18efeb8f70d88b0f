//! Autocomplete predictions and their normalization
//!
//! The places service returns suggestions whose fields are all optional and
//! nested a few levels deep. [`PlacePrediction::from_raw`] turns one into a
//! flat record with explicit defaults, and drops suggestions that carry no
//! place identifier since they could never be resolved.

use serde::{Deserialize, Serialize};

/// A candidate place, not yet resolved to a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacePrediction {
    pub place_id: String,
    pub description: String,
    pub main_text: String,
    pub secondary_text: String,
}

/// `{ "text": "..." }` wrapper used throughout the places responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattableText {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredFormat {
    #[serde(default)]
    pub main_text: Option<FormattableText>,
    #[serde(default)]
    pub secondary_text: Option<FormattableText>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlacePrediction {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub text: Option<FormattableText>,
    #[serde(default)]
    pub structured_format: Option<StructuredFormat>,
}

/// One entry of an autocomplete response; query predictions (no place)
/// leave `place_prediction` empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSuggestion {
    #[serde(default)]
    pub place_prediction: Option<RawPlacePrediction>,
}

fn text_of(text: &Option<FormattableText>) -> Option<&str> {
    text.as_ref()
        .and_then(|t| t.text.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl RawSuggestion {
    /// Convenience constructor for a fully populated suggestion
    pub fn new(place_id: &str, main_text: &str, secondary_text: &str) -> Self {
        let full = if secondary_text.is_empty() {
            main_text.to_string()
        } else {
            format!("{}, {}", main_text, secondary_text)
        };
        Self {
            place_prediction: Some(RawPlacePrediction {
                place_id: Some(place_id.to_string()),
                text: Some(FormattableText { text: Some(full) }),
                structured_format: Some(StructuredFormat {
                    main_text: Some(FormattableText {
                        text: Some(main_text.to_string()),
                    }),
                    secondary_text: Some(FormattableText {
                        text: Some(secondary_text.to_string()),
                    }),
                }),
            }),
        }
    }
}

impl PlacePrediction {
    /// Flatten a raw suggestion; `None` when it has no usable place id.
    ///
    /// Missing text falls back in this order: the description is the full
    /// text, else `main, secondary`; the main text is the structured main
    /// text, else the description; the secondary text is empty.
    pub fn from_raw(raw: &RawSuggestion) -> Option<Self> {
        let prediction = raw.place_prediction.as_ref()?;
        let place_id = prediction
            .place_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())?
            .to_string();

        let structured = prediction.structured_format.as_ref();
        let main = structured.and_then(|s| text_of(&s.main_text));
        let secondary = structured.and_then(|s| text_of(&s.secondary_text));

        let description = match (text_of(&prediction.text), main, secondary) {
            (Some(full), _, _) => full.to_string(),
            (None, Some(main), Some(secondary)) => format!("{}, {}", main, secondary),
            (None, Some(main), None) => main.to_string(),
            (None, None, Some(secondary)) => secondary.to_string(),
            (None, None, None) => String::new(),
        };
        let main_text = main.map(str::to_string).unwrap_or_else(|| description.clone());

        Some(Self {
            place_id,
            description,
            main_text,
            secondary_text: secondary.unwrap_or_default().to_string(),
        })
    }
}

/// Normalize a whole response, keeping service order
pub fn normalize_suggestions(raw: &[RawSuggestion]) -> Vec<PlacePrediction> {
    let predictions: Vec<_> = raw.iter().filter_map(PlacePrediction::from_raw).collect();
    let dropped = raw.len() - predictions.len();
    if dropped > 0 {
        log::debug!("dropped {} suggestions without a place id", dropped);
    }
    predictions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_suggestion() {
        let raw = RawSuggestion::new("abc", "鼎泰豐", "台北市信義區");
        let prediction = PlacePrediction::from_raw(&raw).unwrap();

        assert_eq!(prediction.place_id, "abc");
        assert_eq!(prediction.description, "鼎泰豐, 台北市信義區");
        assert_eq!(prediction.main_text, "鼎泰豐");
        assert_eq!(prediction.secondary_text, "台北市信義區");
    }

    #[test]
    fn test_missing_place_id_is_rejected() {
        let mut raw = RawSuggestion::new("", "A", "B");
        assert!(PlacePrediction::from_raw(&raw).is_none());

        raw.place_prediction.as_mut().unwrap().place_id = None;
        assert!(PlacePrediction::from_raw(&raw).is_none());

        assert!(PlacePrediction::from_raw(&RawSuggestion::default()).is_none());
    }

    #[test]
    fn test_defaults_for_missing_text() {
        let raw: RawSuggestion = serde_json::from_value(serde_json::json!({
            "placePrediction": { "placeId": "p1", "text": { "text": "Only full text" } }
        }))
        .unwrap();
        let prediction = PlacePrediction::from_raw(&raw).unwrap();

        assert_eq!(prediction.description, "Only full text");
        assert_eq!(prediction.main_text, "Only full text");
        assert_eq!(prediction.secondary_text, "");
    }

    #[test]
    fn test_description_built_from_parts() {
        let raw: RawSuggestion = serde_json::from_value(serde_json::json!({
            "placePrediction": {
                "placeId": "p2",
                "structuredFormat": {
                    "mainText": { "text": "Main" },
                    "secondaryText": { "text": "Second" }
                }
            }
        }))
        .unwrap();
        let prediction = PlacePrediction::from_raw(&raw).unwrap();

        assert_eq!(prediction.description, "Main, Second");
        assert_eq!(prediction.main_text, "Main");
    }

    #[test]
    fn test_normalize_keeps_order_and_drops_invalid() {
        let raw = vec![
            RawSuggestion::new("1", "A", ""),
            RawSuggestion::default(),
            RawSuggestion::new("2", "B", ""),
        ];
        let ids: Vec<_> = normalize_suggestions(&raw)
            .into_iter()
            .map(|p| p.place_id)
            .collect();

        assert_eq!(ids, vec!["1", "2"]);
    }
}
