use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier of a recorded scan: its creation time in epoch milliseconds,
/// bumped when needed so identifiers never repeat.
pub type ScanId = i64;

/// Critique returned by the analysis service for one submitted document.
///
/// Every field is optional because the service answers with whatever the
/// model produced. Decoding is lenient and normalizes at the boundary:
/// a non-numeric `overall_score` becomes `None`, floats are rounded, and
/// list elements that are not strings keep their JSON text. Fields this type
/// does not model are kept in `extra` so a stored payload survives a round
/// trip through persistence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub candidate_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub overall_score: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub strengths: Option<Vec<String>>,
    /// Entries may start with [`crate::MISSING_MARKER`] for an absent qualification.
    #[serde(
        default,
        deserialize_with = "lenient_string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub weaknesses: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient_improvements",
        skip_serializing_if = "Option::is_none"
    )]
    pub improvements: Option<Vec<RewriteSuggestion>>,
    /// Extracted document text, only shown in the debug view.
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_text: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AnalysisResult {
    /// Candidate name, treating an empty string as absent. Other text is
    /// kept as sent, surrounding whitespace included.
    pub fn candidate_name(&self) -> Option<&str> {
        self.candidate_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }

    /// Error text of a body that carries only an `error` field.
    ///
    /// Some service variants answer with a success status and
    /// `{"error": "..."}` when the model call fails.
    pub fn service_error(&self) -> Option<&str> {
        if self.candidate_name.is_some() || self.overall_score.is_some() || self.summary.is_some()
        {
            return None;
        }
        self.extra.get("error").and_then(Value::as_str)
    }
}

/// Primary key and its alternative spelling, per suggestion field.
const FIELD_ALIASES: [(&str, &str); 3] = [
    ("original", "original_section"),
    ("better", "suggested_rewrite"),
    ("why", "reason"),
];

/// One rewrite suggestion.
///
/// Both field-name conventions seen from the service are accepted on input
/// (`original`/`better`/`why` and `original_section`/`suggested_rewrite`/`reason`);
/// output always uses the first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RewriteSuggestion {
    /// Excerpt being rewritten. Empty means general advice.
    #[serde(
        rename = "original",
        alias = "original_section",
        default,
        deserialize_with = "text_or_empty"
    )]
    pub original: String,
    #[serde(
        rename = "better",
        alias = "suggested_rewrite",
        default,
        deserialize_with = "text_or_empty"
    )]
    pub improved: String,
    #[serde(
        rename = "why",
        alias = "reason",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub rationale: Option<String>,
}

impl RewriteSuggestion {
    /// A general-advice suggestion with no original excerpt.
    pub fn advice(text: impl Into<String>) -> Self {
        Self {
            improved: text.into(),
            ..Self::default()
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::advice(text)),
            Value::Object(mut fields) => {
                // Both conventions in one object: the primary key wins.
                for (primary, alias) in FIELD_ALIASES {
                    if fields.contains_key(primary) {
                        fields.remove(alias);
                    }
                }
                match serde_json::from_value(Value::Object(fields)) {
                    Ok(suggestion) => Some(suggestion),
                    Err(err) => {
                        critique_logging::critique_warn!("Dropping malformed suggestion: {}", err);
                        None
                    }
                }
            }
            _ => None,
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_score<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(score_from_value))
}

fn score_from_value(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|score| score.is_finite())
            .map(|score| score.round() as i64)
    })
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::Array(items)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(|item| match item {
                Value::String(text) => text,
                other => other.to_string(),
            })
            .collect(),
    ))
}

fn lenient_improvements<'de, D>(deserializer: D) -> Result<Option<Vec<RewriteSuggestion>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::Array(items)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .filter_map(RewriteSuggestion::from_value)
            .collect(),
    ))
}
