//! Parsing the language model's answer

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

/// The JSON object the model is asked to return
#[derive(Debug, Clone, Default, PartialEq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelInsight {
    /// Joint comparison of all selected keywords
    #[serde(default)]
    pub comparison: Option<String>,
    /// One entry per selected keyword
    #[serde(default, alias = "keyword_insights")]
    pub keyword_insights: Vec<ModelKeywordInsight>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct ModelKeywordInsight {
    /// The keyword exactly as given in the prompt
    pub keyword: String,
    /// insurance, sidejob or unknown
    #[serde(default)]
    pub category: Option<String>,
    /// Why the search volume moved
    #[serde(default)]
    pub reason: Option<String>,
    /// Marketing action for the month
    #[serde(default)]
    pub strategy: Option<String>,
}

/// Slice out the outermost JSON object from raw model output
///
/// Models sometimes wrap the object in prose or a code fence.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parse the model's answer into per-keyword insights
///
/// A strict parse is tried first. If that fails, well-formed keyword entries
/// are salvaged one by one and malformed ones dropped. Output with no JSON
/// object at all is an error.
pub fn parse_model_output(raw: &str) -> Result<ModelInsight, String> {
    let json_str = extract_json_object(raw)
        .ok_or_else(|| "model response does not contain a JSON object".to_string())?;

    if let Ok(parsed) = serde_json::from_str::<ModelInsight>(json_str) {
        return Ok(parsed);
    }

    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| format!("model response is not valid JSON: {}", e))?;

    let comparison = value
        .get("comparison")
        .and_then(Value::as_str)
        .map(str::to_string);

    let keyword_insights = value
        .get("keywordInsights")
        .or_else(|| value.get("keyword_insights"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value::<ModelKeywordInsight>(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    Ok(ModelInsight {
        comparison,
        keyword_insights,
    })
}

/// Find the model's entry for `keyword`: exact match, then case-insensitive
pub fn resolve_insight<'a>(
    keyword: &str,
    insights: &'a [ModelKeywordInsight],
) -> Option<&'a ModelKeywordInsight> {
    if let Some(found) = insights.iter().find(|i| i.keyword == keyword) {
        return Some(found);
    }

    let wanted = keyword.trim().to_lowercase();
    insights
        .iter()
        .find(|i| i.keyword.trim().to_lowercase() == wanted)
}

/// Treat blank text as missing
pub fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}
