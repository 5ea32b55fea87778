use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Taxonomy holding the financial statement concepts we read
pub const US_GAAP: &str = "us-gaap";
/// Reporting unit for monetary concepts
pub const USD: &str = "USD";

/// Fiscal period tag attached to a reported value.
///
/// Tags outside the usual quarters and full year (e.g. `H1`) are kept verbatim
/// so they still compare equal to the same tag in another year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiscalPeriod {
    Q1,
    Q2,
    Q3,
    Q4,
    FY,
    Other(String),
}

impl FiscalPeriod {
    /// `None` only for a blank tag
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "" => None,
            "Q1" => Some(FiscalPeriod::Q1),
            "Q2" => Some(FiscalPeriod::Q2),
            "Q3" => Some(FiscalPeriod::Q3),
            "Q4" => Some(FiscalPeriod::Q4),
            "FY" => Some(FiscalPeriod::FY),
            other => Some(FiscalPeriod::Other(other.to_string())),
        }
    }
}

/// Filing type the value was reported in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    #[serde(rename = "10-K")]
    TenK,
    #[serde(rename = "10-Q")]
    TenQ,
    Other(String),
}

impl FormType {
    pub fn from_code(code: &str) -> Self {
        match code {
            "10-K" => FormType::TenK,
            "10-Q" => FormType::TenQ,
            other => FormType::Other(other.to_string()),
        }
    }

    /// Annual and quarterly reports are the only authoritative sources
    pub fn is_periodic_report(&self) -> bool {
        matches!(self, FormType::TenK | FormType::TenQ)
    }
}

/// One reported data point for a concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub end: NaiveDate,
    pub value: f64,
    pub fiscal_year: Option<i32>,
    pub fiscal_period: Option<FiscalPeriod>,
    pub form: FormType,
    pub source_concept: String,
}

/// Company facts document as served by the SEC XBRL API.
///
/// Concept payloads are kept as raw JSON and decoded on demand, so a single
/// malformed concept never invalidates the rest of the document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFacts {
    #[serde(default, deserialize_with = "cik_from_number_or_string")]
    pub cik: Option<String>,
    #[serde(default)]
    pub entity_name: Option<String>,
    #[serde(default)]
    pub facts: HashMap<String, HashMap<String, serde_json::Value>>,
}

// Wire shape of a single fact; everything optional so partial rows can be skipped.
#[derive(Debug, Deserialize)]
struct FactRow {
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    val: Option<f64>,
    #[serde(default)]
    fy: Option<i32>,
    #[serde(default)]
    fp: Option<String>,
    #[serde(default)]
    form: Option<String>,
}

impl RawFacts {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Entity name, or "Unknown" when the document does not carry one
    pub fn entity_name(&self) -> &str {
        self.entity_name.as_deref().unwrap_or("Unknown")
    }

    /// CIK zero-padded to 10 digits
    pub fn entity_id(&self) -> Option<String> {
        self.cik.as_deref().map(pad_cik)
    }

    /// USD observations reported under a `us-gaap` concept, tagged with that concept.
    ///
    /// Returns `None` when the concept is absent or its USD unit is not a list of
    /// fact objects. Individual rows without a parseable `end` date or numeric `val`
    /// are dropped.
    pub fn usd_observations(&self, concept: &str) -> Option<Vec<Observation>> {
        let units = self.facts.get(US_GAAP)?.get(concept)?.get("units")?;
        let rows = units.get(USD)?.as_array()?;

        let observations = rows
            .iter()
            .filter_map(|row| FactRow::deserialize(row).ok())
            .filter_map(|row| {
                let end = NaiveDate::parse_from_str(row.end.as_deref()?, "%Y-%m-%d").ok()?;
                Some(Observation {
                    end,
                    value: row.val?,
                    fiscal_year: row.fy,
                    fiscal_period: row.fp.as_deref().and_then(FiscalPeriod::from_code),
                    form: row
                        .form
                        .as_deref()
                        .map(FormType::from_code)
                        .unwrap_or_else(|| FormType::Other(String::new())),
                    source_concept: concept.to_string(),
                })
            })
            .collect();

        Some(observations)
    }
}

/// Pad a CIK to the 10-digit form used in EDGAR URLs
pub fn pad_cik(cik: &str) -> String {
    format!("{:0>10}", cik.trim())
}

fn cik_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> RawFacts {
        RawFacts::from_value(json!({
            "cik": 320193,
            "entityName": "Apple Inc.",
            "facts": {
                "us-gaap": {
                    "Revenues": {
                        "label": "Revenues",
                        "units": {
                            "USD": [
                                {"end": "2024-03-30", "val": 90753000000u64, "fy": 2024, "fp": "Q2", "form": "10-Q"},
                                {"end": "not-a-date", "val": 1.0, "fy": 2024, "fp": "Q2", "form": "10-Q"},
                                {"end": "2023-09-30", "fy": 2023, "fp": "FY", "form": "10-K"},
                                {"end": "2023-07-01", "val": 81797000000u64, "fy": 2023, "fp": "H1", "form": "8-K"}
                            ]
                        }
                    },
                    "Assets": {"units": {"USD": "oops"}},
                    "AssetsCurrent": "not an object"
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_numeric_cik_is_padded() {
        let facts = sample();
        assert_eq!(facts.entity_id().as_deref(), Some("0000320193"));
        assert_eq!(facts.entity_name(), "Apple Inc.");
    }

    #[test]
    fn test_string_cik_and_missing_name() {
        let facts = RawFacts::from_json(r#"{"cik": "0000789019", "facts": {}}"#).unwrap();
        assert_eq!(facts.entity_id().as_deref(), Some("0000789019"));
        assert_eq!(facts.entity_name(), "Unknown");
    }

    #[test]
    fn test_usd_observations_skips_bad_rows() {
        let facts = sample();
        let obs = facts.usd_observations("Revenues").unwrap();
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].fiscal_period, Some(FiscalPeriod::Q2));
        assert_eq!(obs[0].form, FormType::TenQ);
        assert_eq!(obs[0].source_concept, "Revenues");
        assert_eq!(obs[1].fiscal_period, Some(FiscalPeriod::Other("H1".to_string())));
        assert_eq!(obs[1].form, FormType::Other("8-K".to_string()));
    }

    #[test]
    fn test_fiscal_period_codes() {
        assert_eq!(FiscalPeriod::from_code(" Q3 "), Some(FiscalPeriod::Q3));
        assert_eq!(FiscalPeriod::from_code("H2"), Some(FiscalPeriod::Other("H2".to_string())));
        assert_eq!(FiscalPeriod::from_code(""), None);
    }

    #[test]
    fn test_malformed_or_missing_concepts_are_none() {
        let facts = sample();
        assert!(facts.usd_observations("Assets").is_none());
        assert!(facts.usd_observations("AssetsCurrent").is_none());
        assert!(facts.usd_observations("LiabilitiesCurrent").is_none());
    }
}
