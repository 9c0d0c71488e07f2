//! Sample collection records, logged before any report is raised.

use crate::{clock::Clock, error::CoreError};
use chrono::NaiveDate;
use envirolab_schemas::sample::{SampleRecord, SampleType};

const COMPANY_CHARS: usize = 3;
const TIMESTAMP_DIGITS: usize = 4;

/// Creates a record with a code of the form `ACM-7123`: the first three
/// characters of the company name upper-cased, then the last four digits of
/// the current unix millisecond timestamp. The collection date defaults to
/// today.
pub fn record_sample(
    company_name: &str,
    sample_type: SampleType,
    collection_date: Option<NaiveDate>,
    clock: &dyn Clock,
) -> Result<SampleRecord, CoreError> {
    let company_name = company_name.trim();
    if company_name.is_empty() {
        return Err(CoreError::InvalidInput("company name is required".to_string()));
    }

    let sample_code = sample_code(company_name, clock.now_millis());
    tracing::info!(%sample_code, company = company_name, "recorded sample");

    Ok(SampleRecord {
        company_name: company_name.to_string(),
        sample_code,
        collection_date: collection_date.unwrap_or_else(|| clock.today()),
        sample_type,
    })
}

fn sample_code(company_name: &str, millis: i64) -> String {
    let prefix: String = company_name
        .chars()
        .take(COMPANY_CHARS)
        .flat_map(char::to_uppercase)
        .collect();
    let digits = millis.to_string();
    let tail = &digits[digits.len().saturating_sub(TIMESTAMP_DIGITS)..];
    format!("{prefix}-{tail}")
}
