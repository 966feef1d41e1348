//! Census ACS API client and zipcode reference upsert
//!
//! The API returns each dataset as a JSON array of `[name, value, zip]`
//! rows, the first row being a column header. Values arrive as strings or
//! numbers depending on the endpoint; both are accepted. A fetch failure of
//! any kind degrades to an empty dataset for that source, so ingestion
//! proceeds with whatever data is available.

use anyhow::Result;
use bizlens_common::Error;
use serde_json::Value;
use sqlx::PgPool;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tracing::{info, warn};

/// ACS 5-year total population (B01003_001E) by zip code tabulation area
pub const POPULATION_URL: &str =
    "https://api.census.gov/data/2020/acs/acs5?get=NAME,B01003_001E&for=zip%20code%20tabulation%20area:*";

/// ACS 5-year median household income (S1903_C03_001E) by zip code tabulation area
pub const INCOME_URL: &str =
    "https://api.census.gov/data/2020/acs/acs5/subject?get=NAME,S1903_C03_001E&for=zip%20code%20tabulation%20area:*";

/// The provider's sentinel for a suppressed/unavailable income figure
pub const SUPPRESSED_INCOME_SENTINEL: f64 = -666666666.0;

const USER_AGENT: &str = "BizLens/0.1.0";

/// One combined row destined for the zipcode reference table
#[derive(Debug, Clone, PartialEq)]
pub struct ZipcodeRecord {
    pub zip_code: String,
    pub population: i64,
    pub avg_income: f64,
}

/// Census ACS API client
pub struct CensusClient {
    http_client: reqwest::Client,
}

impl CensusClient {
    pub fn new() -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http_client })
    }

    /// Fetch one dataset, returning its data rows with the header dropped
    ///
    /// An unreachable API, non-success status, or unparseable body yields an
    /// empty dataset, not an error; every call is attempted exactly once.
    pub async fn fetch_dataset(&self, url: &str) -> Vec<Vec<Value>> {
        match self.try_fetch(url).await {
            Ok(dataset) => {
                info!(url = %url, rows = dataset.len().saturating_sub(1), "Fetched census dataset");
                strip_header(dataset)
            }
            Err(e) => {
                warn!(url = %url, "Census fetch failed, treating dataset as empty: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> std::result::Result<Vec<Vec<Value>>, Error> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("non-success status {}", status)));
        }

        response
            .json::<Vec<Vec<Value>>>()
            .await
            .map_err(|e| Error::Fetch(format!("response was not a JSON row array: {}", e)))
    }
}

/// Drop the header row the API places first in every dataset
pub fn strip_header(mut dataset: Vec<Vec<Value>>) -> Vec<Vec<Value>> {
    if !dataset.is_empty() {
        dataset.remove(0);
    }
    dataset
}

/// Parse population data rows into a zip → population map
///
/// Rows are `[name, value, zip]`; rows missing either field are skipped.
pub fn parse_population(rows: &[Vec<Value>]) -> BTreeMap<String, i64> {
    rows.iter()
        .filter_map(|row| {
            let zip = row.get(2)?.as_str()?.to_string();
            let population = value_to_i64(row.get(1)?)?;
            Some((zip, population))
        })
        .collect()
}

/// Parse income data rows into a zip → income map
///
/// Rows carrying the suppression sentinel are skipped entirely, so their
/// zip codes fall back to the missing-data default when combined.
pub fn parse_income(rows: &[Vec<Value>]) -> BTreeMap<String, f64> {
    rows.iter()
        .filter_map(|row| {
            let zip = row.get(2)?.as_str()?.to_string();
            let income = value_to_f64(row.get(1)?)?;
            if income == SUPPRESSED_INCOME_SENTINEL {
                return None;
            }
            Some((zip, income))
        })
        .collect()
}

/// Combine both maps over the union of their zip codes
///
/// A zip missing from one dataset takes that metric's zero default, never
/// the other dataset's value. Output is ordered by zip code.
pub fn combine(
    population: &BTreeMap<String, i64>,
    income: &BTreeMap<String, f64>,
) -> Vec<ZipcodeRecord> {
    let zips: BTreeSet<&str> = population
        .keys()
        .chain(income.keys())
        .map(String::as_str)
        .collect();

    zips.into_iter()
        .map(|zip| ZipcodeRecord {
            zip_code: zip.to_string(),
            population: population.get(zip).copied().unwrap_or(0),
            avg_income: income.get(zip).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Upsert combined records into the zipcode reference table
///
/// One transaction for the whole batch; on conflict by zip code, population
/// and income are overwritten unconditionally.
pub async fn upsert_zipcodes(pool: &PgPool, records: &[ZipcodeRecord]) -> Result<()> {
    let mut tx = pool.begin().await?;

    for record in records {
        sqlx::query(
            "INSERT INTO zipcodes (zip_code, population, avg_income)
             VALUES ($1, $2, $3)
             ON CONFLICT (zip_code) DO UPDATE SET
                 population = EXCLUDED.population,
                 avg_income = EXCLUDED.avg_income",
        )
        .bind(&record.zip_code)
        .bind(record.population)
        .bind(record.avg_income)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!(rows = records.len(), "Upserted zipcode reference rows");
    Ok(())
}

/// Read a census value as an integer, whether encoded as number or string
fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Read a census value as a float, whether encoded as number or string
fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_unreachable_api_degrades_to_empty_dataset() {
        // Nothing listens on this port; the connection is refused and the
        // fetch must degrade rather than error
        let client = CensusClient::new().expect("Should build client");
        let rows = client.fetch_dataset("http://127.0.0.1:1/census").await;
        assert!(rows.is_empty());
    }

    #[test]
    fn test_strip_header_drops_first_row() {
        let dataset = vec![
            vec![json!("NAME"), json!("B01003_001E"), json!("zip")],
            vec![json!("ZCTA5 00501"), json!("100"), json!("00501")],
        ];
        let rows = strip_header(dataset);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][2], json!("00501"));
    }

    #[test]
    fn test_strip_header_of_empty_dataset() {
        assert!(strip_header(Vec::new()).is_empty());
    }

    #[test]
    fn test_parse_population_accepts_numbers_and_strings() {
        let rows = vec![
            vec![json!("A"), json!(100), json!("00501")],
            vec![json!("B"), json!("250"), json!("00502")],
        ];
        let population = parse_population(&rows);
        assert_eq!(population.get("00501"), Some(&100));
        assert_eq!(population.get("00502"), Some(&250));
    }

    #[test]
    fn test_parse_income_skips_suppression_sentinel() {
        let rows = vec![
            vec![json!("A"), json!("-666666666"), json!("00501")],
            vec![json!("B"), json!("52000.5"), json!("00502")],
        ];
        let income = parse_income(&rows);
        assert!(!income.contains_key("00501"));
        assert_eq!(income.get("00502"), Some(&52000.5));
    }

    #[test]
    fn test_parse_skips_malformed_rows() {
        let rows = vec![
            vec![json!("A")],
            vec![json!("B"), json!("not-a-number"), json!("00503")],
            vec![json!("C"), json!("77"), json!("00504")],
        ];
        let population = parse_population(&rows);
        assert_eq!(population.len(), 1);
        assert_eq!(population.get("00504"), Some(&77));
    }

    #[test]
    fn test_combine_suppressed_income_defaults_to_zero() {
        // Population present, income suppressed: (100, 0.0)
        let population = parse_population(&[vec![json!("A"), json!(100), json!("00501")]]);
        let income = parse_income(&[vec![json!("A"), json!("-666666666"), json!("00501")]]);
        let combined = combine(&population, &income);
        assert_eq!(
            combined,
            vec![ZipcodeRecord {
                zip_code: "00501".to_string(),
                population: 100,
                avg_income: 0.0,
            }]
        );
    }

    #[test]
    fn test_combine_income_only_zip() {
        let population = BTreeMap::new();
        let mut income = BTreeMap::new();
        income.insert("10001".to_string(), 50000.0);
        let combined = combine(&population, &income);
        assert_eq!(
            combined,
            vec![ZipcodeRecord {
                zip_code: "10001".to_string(),
                population: 0,
                avg_income: 50000.0,
            }]
        );
    }

    #[test]
    fn test_combine_union_ordered_by_zip() {
        let mut population = BTreeMap::new();
        population.insert("95616".to_string(), 39000);
        population.insert("00501".to_string(), 100);
        let mut income = BTreeMap::new();
        income.insert("10001".to_string(), 50000.0);
        income.insert("95616".to_string(), 46000.0);

        let combined = combine(&population, &income);
        let zips: Vec<&str> = combined.iter().map(|r| r.zip_code.as_str()).collect();
        assert_eq!(zips, vec!["00501", "10001", "95616"]);

        let davis = combined.iter().find(|r| r.zip_code == "95616").unwrap();
        assert_eq!(davis.population, 39000);
        assert_eq!(davis.avg_income, 46000.0);
    }
}
