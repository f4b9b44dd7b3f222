//! Per-field lenient decoding for drafts returned by the remote API.
//!
//! Every helper accepts whatever JSON shape the field arrives in and falls back to the empty
//! value instead of failing the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::domain::{DealCount, InvestorPlan, PortfolioEntry};

pub(crate) fn text_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    }
}

pub(crate) fn tags_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
                _ => None,
            })
            .collect(),
        Value::String(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

pub(crate) fn flag_value(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_i64().map(|n| n != 0).unwrap_or(false),
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes"
        ),
        _ => false,
    }
}

fn portfolio_value(value: &Value) -> Vec<PortfolioEntry> {
    let Value::Array(items) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let Value::Object(fields) = item else {
                return None;
            };
            let field = |key: &str| fields.get(key).map(text_value).unwrap_or_default();
            Some(PortfolioEntry {
                name: field("name"),
                category: field("category"),
                year: field("year"),
            })
        })
        .collect()
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_value(&Value::deserialize(deserializer)?))
}

pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = text_value(&Value::deserialize(deserializer)?);
    Ok(Some(raw.trim().to_string()).filter(|value| !value.is_empty()))
}

pub(crate) fn tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(tags_value(&Value::deserialize(deserializer)?))
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(flag_value(&Value::deserialize(deserializer)?))
}

pub(crate) fn portfolio<'de, D>(deserializer: D) -> Result<Vec<PortfolioEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(portfolio_value(&Value::deserialize(deserializer)?))
}

pub(crate) fn deal_count<'de, D>(deserializer: D) -> Result<Option<DealCount>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(DealCount::from_label(&text_value(&Value::deserialize(
        deserializer,
    )?)))
}

pub(crate) fn plan<'de, D>(deserializer: D) -> Result<Option<InvestorPlan>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(InvestorPlan::from_label(&text_value(&Value::deserialize(
        deserializer,
    )?)))
}
