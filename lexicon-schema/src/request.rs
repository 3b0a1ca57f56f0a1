use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `/find-definition` and `/delete-word`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WordRequest {
    pub word: String,
}

/// Body of `/search-words`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchWordsRequest {
    pub queries: Vec<SearchQuery>,
}

/// One predicate of a word search.
///
/// `operation` joins this predicate to the next one; the browser form sends
/// `null` on the last row.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchQuery {
    pub attribute: String,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub value: String,
}

/// Body of `/add-context`. Field names follow the browser form.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddContextRequest {
    pub word: String,
    pub sentence: String,
    pub sentence_source: String,
    pub definition: String,
    pub lexical_category: String,
    pub region: String,
    pub ethnic_groups: String,
    pub language_family: String,
    pub word_order: String,
    pub language: String,
    pub ancestor: String,
}

/// Body of `/update-language-context`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLanguageRequest {
    /// Name of the language row to update.
    pub key: String,
    pub update_attribute: String,
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub new_data: String,
}

/// Body of `/language-context`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LanguageContextRequest {
    pub attribute: String,
}

fn deserialize_string_lax<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(serde::de::Error::custom("expected a string or a number")),
    }
}
