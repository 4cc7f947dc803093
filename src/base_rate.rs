//! Published base rate lookup (Bank of England Bank Rate).
//!
//! The crate does not ship an HTTP client. Callers plug one in through [`RateSource`];
//! this module builds the request, checks the response and reads the CSV body. A lookup
//! never fails outright: problems come back as [`InterestRateData::Unavailable`] so the
//! caller can keep the rate the user typed in.

use std::str::FromStr;

use anyhow::{anyhow, bail};
use chrono::{DateTime, Months, NaiveDate, Utc};
use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::BaseRateConfig;
use crate::error::{MortgageError, Result};

const DATE_FORMAT: &str = "%d/%b/%Y";
const PARSE_FAILURE_MESSAGE: &str = "Could not parse interest rate from the data";

/// Inclusive date window sent to the statistics endpoint, formatted as `DD/Mon/YYYY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the window.
    pub from: String,
    /// Last day of the window.
    pub to: String,
}

/// Raw response handed back by a [`RateSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateResponse {
    /// HTTP status code.
    pub status: u16,
    /// HTTP reason phrase, e.g. `Internal Server Error`.
    pub status_text: String,
    /// Response body, the CSV text on success.
    pub body: String,
}

impl RateResponse {
    /// True for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used to reach the rate publisher.
pub trait RateSource {
    /// Performs a GET request. Errors are connection-level failures only; HTTP error
    /// statuses come back as a [`RateResponse`].
    fn get(&self, url: &str) -> anyhow::Result<RateResponse>;
}

/// Outcome of a base rate lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InterestRateData {
    /// The lookup produced a rate.
    Available {
        /// Annual rate as a percentage (e.g., 4.75 for 4.75%).
        rate: Decimal,
        /// When the lookup was made.
        last_updated: DateTime<Utc>,
    },
    /// The lookup failed; the caller should keep the entered rate.
    Unavailable {
        /// When the lookup was made.
        last_updated: DateTime<Utc>,
        /// Why no rate could be obtained.
        error_message: String,
    },
}

impl InterestRateData {
    /// True when the lookup produced a rate.
    pub fn is_available(&self) -> bool {
        matches!(self, InterestRateData::Available { .. })
    }

    /// The rate as the `f64` percentage the engine works with.
    pub fn rate_percent(&self) -> Option<f64> {
        match self {
            InterestRateData::Available { rate, .. } => rate.to_f64(),
            InterestRateData::Unavailable { .. } => None,
        }
    }

    /// When the lookup was made, whatever its outcome.
    pub fn last_updated(&self) -> DateTime<Utc> {
        match self {
            InterestRateData::Available { last_updated, .. }
            | InterestRateData::Unavailable { last_updated, .. } => *last_updated,
        }
    }

    /// Converts the outcome into a `Result`, for callers that want to propagate the failure.
    pub fn into_rate(self) -> Result<Decimal> {
        match self {
            InterestRateData::Available { rate, .. } => Ok(rate),
            InterestRateData::Unavailable { error_message, .. } => Err(MortgageError::RateUnavailable(error_message)),
        }
    }
}

/// Formats `date` as `DD/Mon/YYYY`, e.g. `05/Jan/2024`.
pub fn format_date_for_bank_of_england(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The month leading up to `today`.
///
/// A day that does not exist in the previous month is clamped to its last day
/// (31 March gives 29 February in a leap year).
pub fn last_month_date_range(today: NaiveDate) -> DateRange {
    let last_month = today.checked_sub_months(Months::new(1)).unwrap_or(today);

    DateRange {
        from: format_date_for_bank_of_england(last_month),
        to: format_date_for_bank_of_england(today),
    }
}

/// Builds the CSV download URL for `range`.
pub fn build_bank_of_england_url(config: &BaseRateConfig, range: &DateRange) -> String {
    let base_url = config.base_url.trim_end_matches('/');

    format!(
        "{}/{}?csv.x=yes&Datefrom={}&Dateto={}&SeriesCodes={}&CSVF=TN&UsingCodes=Y&VPD=Y&VFD=N",
        base_url, config.endpoint, range.from, range.to, config.series_code
    )
}

/// Requests the CSV body for `range`.
///
/// # Errors
///
/// Returns an error if the transport fails or the publisher answers with a
/// non-success status.
pub fn fetch_from_bank_of_england(
    source: &dyn RateSource,
    config: &BaseRateConfig,
    range: &DateRange,
) -> anyhow::Result<String> {
    let url = build_bank_of_england_url(config, range);
    debug!("requesting base rate from {url}");

    let response = source.get(&url)?;
    if !response.is_success() {
        bail!("Failed to fetch data: {} {}", response.status, response.status_text);
    }

    Ok(response.body)
}

/// Reads the most recent rate out of the publisher's CSV.
///
/// Each data line is `DD/Mon/YYYY,rate`. Lines starting with the series code are
/// headers (an empty series code marks no line as a header), and rows with an
/// unreadable date or rate are skipped. Returns `None` when no usable row is left.
pub fn parse_interest_rate_from_csv(csv_data: &str, series_code: &str) -> Option<Decimal> {
    let mut latest: Option<(NaiveDate, Decimal)> = None;

    for line in csv_data.lines().map(str::trim) {
        if line.is_empty() || (!series_code.is_empty() && line.starts_with(series_code)) {
            continue;
        }
        let Some((date, rate)) = parse_row(line) else {
            continue;
        };
        // first row wins on equal dates
        if latest.is_none_or(|(latest_date, _)| date > latest_date) {
            latest = Some((date, rate));
        }
    }

    latest.map(|(_, rate)| rate)
}

fn parse_row(line: &str) -> Option<(NaiveDate, Decimal)> {
    let mut columns = line.split(',').map(str::trim);
    let date = NaiveDate::parse_from_str(columns.next()?, DATE_FORMAT).ok()?;
    let rate = Decimal::from_str(columns.next()?).ok()?;
    Some((date, rate))
}

/// Looks up the latest published rate for the month before `now`.
pub fn fetch_latest_interest_rate(
    source: &dyn RateSource,
    config: &BaseRateConfig,
    now: DateTime<Utc>,
) -> InterestRateData {
    let range = last_month_date_range(now.date_naive());

    let outcome = fetch_from_bank_of_england(source, config, &range).and_then(|csv_data| {
        parse_interest_rate_from_csv(&csv_data, &config.series_code).ok_or_else(|| anyhow!(PARSE_FAILURE_MESSAGE))
    });

    match outcome {
        Ok(rate) => {
            debug!("base rate {rate}% for {} to {}", range.from, range.to);
            InterestRateData::Available { rate, last_updated: now }
        }
        Err(e) => {
            warn!("base rate lookup failed: {e}");
            InterestRateData::Unavailable {
                last_updated: now,
                error_message: e.to_string(),
            }
        }
    }
}

/// Picks the rate to calculate with: the base rate when asked for and available,
/// otherwise the rate the user entered.
pub fn resolve_interest_rate(user_rate: f64, use_base_rate: bool, base_rate: Option<&InterestRateData>) -> f64 {
    if !use_base_rate {
        return user_rate;
    }

    match base_rate.and_then(InterestRateData::rate_percent) {
        Some(rate) => rate,
        None => {
            warn!("base rate requested but unavailable, using entered rate {user_rate}%");
            user_rate
        }
    }
}
