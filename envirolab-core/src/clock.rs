//! Time source and identifier generation.
//!
//! Identifiers are derived from a clock handed to the form rather than read
//! from the wall clock inside form logic, so tests can pin them exactly.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

pub trait Clock: fmt::Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    pub fn at_millis(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    pub fn advance_millis(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.millis.load(Ordering::SeqCst))
            .single()
            .unwrap_or_default()
    }
}

const BARE_PREFIX: &str = "RPT";
const SAMPLE_REG_DIGITS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifiers {
    pub report_no: String,
    pub sample_reg_no: String,
}

impl Identifiers {
    /// `<PREFIX>-RPT-<millis>` and `<PREFIX>-<last 6 digits of millis>`.
    /// Without a prefix the report number is `RPT-<millis>` and the sample
    /// registration number falls back to the `RPT` prefix.
    pub fn generate(prefix: Option<&str>, millis: i64) -> Self {
        let digits = millis.to_string();
        let tail = &digits[digits.len().saturating_sub(SAMPLE_REG_DIGITS)..];

        let report_no = match prefix {
            Some(prefix) => format!("{prefix}-{BARE_PREFIX}-{millis}"),
            None => format!("{BARE_PREFIX}-{millis}"),
        };
        let sample_reg_no = format!("{}-{}", prefix.unwrap_or(BARE_PREFIX), tail);

        Self {
            report_no,
            sample_reg_no,
        }
    }
}
