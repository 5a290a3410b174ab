//! Industry trend insight payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub name: String,
    pub growth: String,
    pub summary: String,
}

#[derive(Debug, Deserialize)]
struct RawTrends {
    trends: Vec<Trend>,
}

/// Parse a generated `{ "trends": [...] }` payload. An empty list or a
/// trend without a name is rejected.
pub fn parse_trends(value: Value) -> Result<Vec<Trend>, CoreError> {
    let raw: RawTrends = serde_json::from_value(value)
        .map_err(|e| CoreError::Validation(format!("Malformed trend data: {e}")))?;

    if raw.trends.is_empty() {
        return Err(CoreError::Validation("Trend data is empty".into()));
    }
    if raw.trends.iter().any(|t| t.name.trim().is_empty()) {
        return Err(CoreError::Validation("Trend without a name".into()));
    }
    Ok(raw.trends)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_trend_list() {
        let trends = parse_trends(json!({
            "trends": [{"name": "AI tooling", "growth": "high", "summary": "Everywhere"}]
        }))
        .unwrap();
        assert_eq!(trends[0].name, "AI tooling");
    }

    #[test]
    fn rejects_empty_and_malformed() {
        assert!(parse_trends(json!({"trends": []})).is_err());
        assert!(parse_trends(json!([{"name": "x"}])).is_err());
        let unnamed = json!({"trends": [{"name": " ", "growth": "", "summary": ""}]});
        assert!(parse_trends(unnamed).is_err());
    }
}
