/// Core data types for the gauge retrieval pipeline.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O - only types, their boundary parsing (`FromStr`), and
/// the crate-wide error enum.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Subject identifier
// ---------------------------------------------------------------------------

/// Subject tag carried on every observation row. The upstream schema reserves
/// the column for other subjects, but every hydrological observation is WATER.
pub const SUBJECT_WATER: &str = "WATER";

// ---------------------------------------------------------------------------
// Request window
// ---------------------------------------------------------------------------

/// Inclusive calendar-date window for a retrieval.
///
/// Both bounds are `NaiveDate` by construction, so the "start/end must be a
/// calendar date, not a datetime or string" precondition of the state APIs
/// is enforced at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RequestWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        RequestWindow { start, end }
    }
}

// ---------------------------------------------------------------------------
// Variable / interval / aggregation / source vocabulary
// ---------------------------------------------------------------------------

/// Physical quantity being requested.
///
/// `Flow`, `Level` and `LakeLevel` are served by the state APIs; `Flow`,
/// `Level`, `StorageLevel` and `StorageVolume` by the BOM service. Requesting
/// a variable a provider does not carry fails with
/// [`GaugeError::UnsupportedVariable`] before any request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Flow,
    Level,
    LakeLevel,
    StorageLevel,
    StorageVolume,
}

impl VariableKind {
    /// Upstream letter code, as used in the original interchange vocabulary.
    pub fn code(&self) -> &'static str {
        match self {
            VariableKind::Flow => "F",
            VariableKind::Level => "L",
            VariableKind::LakeLevel => "LL",
            VariableKind::StorageLevel => "SL",
            VariableKind::StorageVolume => "SV",
        }
    }
}

impl FromStr for VariableKind {
    type Err = GaugeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "F" | "FLOW" => Ok(VariableKind::Flow),
            "L" | "LEVEL" => Ok(VariableKind::Level),
            "LL" | "LAKE_LEVEL" => Ok(VariableKind::LakeLevel),
            "SL" | "STORAGE_LEVEL" => Ok(VariableKind::StorageLevel),
            "SV" | "STORAGE_VOLUME" => Ok(VariableKind::StorageVolume),
            other => Err(GaugeError::InvalidArgument(format!(
                "unknown variable kind '{other}'"
            ))),
        }
    }
}

/// Reporting interval of the requested timeseries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Hour,
    Day,
    Month,
    Year,
}

impl Interval {
    /// Wire form expected by the state APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Hour => "hour",
            Interval::Day => "day",
            Interval::Month => "month",
            Interval::Year => "year",
        }
    }
}

impl FromStr for Interval {
    type Err = GaugeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hour" => Ok(Interval::Hour),
            "day" => Ok(Interval::Day),
            "month" => Ok(Interval::Month),
            "year" => Ok(Interval::Year),
            other => Err(GaugeError::InvalidArgument(format!(
                "unknown interval '{other}'"
            ))),
        }
    }
}

/// Aggregation applied within each interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Mean,
    Min,
    Max,
}

impl Aggregation {
    /// Wire form expected by the state APIs (`data_type` parameter).
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Mean => "mean",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
        }
    }
}

impl FromStr for Aggregation {
    type Err = GaugeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "average", "avg" and "av" are long-standing synonyms in caller code.
        match s.to_ascii_lowercase().as_str() {
            "mean" | "average" | "avg" | "av" => Ok(Aggregation::Mean),
            "min" => Ok(Aggregation::Min),
            "max" => Ok(Aggregation::Max),
            other => Err(GaugeError::InvalidArgument(format!(
                "unknown aggregation '{other}'"
            ))),
        }
    }
}

/// Which provider family answers the retrieval.
///
/// `State` queries each gauge's owning state API, falling back to BOM for
/// gauges without state API support. `Bom` forces every gauge through the
/// BOM service regardless of ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    State,
    Bom,
}

impl FromStr for Source {
    type Err = GaugeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "state" => Ok(Source::State),
            "bom" => Ok(Source::Bom),
            other => Err(GaugeError::InvalidArgument(format!(
                "unknown data source '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Observation rows
// ---------------------------------------------------------------------------

/// An observation value as reported by a provider.
///
/// The state APIs serialize trace values inconsistently - sometimes a JSON
/// number, sometimes a string. The raw form is preserved rather than
/// coerced, so downstream consumers see exactly what the provider sent.
#[derive(Debug, Clone, PartialEq)]
pub enum ObsValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for ObsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObsValue::Number(n) => write!(f, "{n}"),
            ObsValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for ObsValue {
    fn from(n: f64) -> Self {
        ObsValue::Number(n)
    }
}

impl From<&str> for ObsValue {
    fn from(s: &str) -> Self {
        ObsValue::Text(s.to_string())
    }
}

/// One normalized observation. Every provider's output is coerced into this
/// shape; the field order is the output table's column order.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRow {
    /// Originating provider: a state tag (`NSW`, `VIC`, `QLD`) or `BOM`.
    pub data_source_id: String,
    /// Gauge number the observation belongs to.
    pub site_id: String,
    /// Always [`SUBJECT_WATER`].
    pub subject_id: String,
    /// Observation date. Provider timestamps are truncated to calendar-date
    /// granularity; time-of-day is dropped.
    pub date: NaiveDate,
    pub value: ObsValue,
    /// Provider quality flag. Rows with codes >= 999 never reach this struct;
    /// they are dropped during extraction.
    pub quality_code: i64,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can arise while loading reference data or querying providers.
///
/// `Request` and `ResponseParse` carry the same diagnostic context but are
/// distinct kinds: callers may want to tell "server is down" apart from
/// "server is misbehaving". Malformed-but-parseable payloads are *not* an
/// error - extraction logs them and yields zero rows.
#[derive(Debug)]
pub enum GaugeError {
    /// The reference dataset is malformed or missing expected columns.
    DataLoad(String),
    /// A mode flag or variable/provider combination could not be resolved.
    InvalidArgument(String),
    /// The requested variable is not served by this provider.
    UnsupportedVariable {
        provider: String,
        variable: VariableKind,
    },
    /// The request never produced an HTTP response (DNS, socket, TLS).
    Transport { provider: String, detail: String },
    /// The provider answered with a non-success HTTP status.
    Request {
        provider: String,
        status: u16,
        body: String,
    },
    /// The provider answered 200 but the body was not valid in the expected
    /// format.
    ResponseParse {
        provider: String,
        status: u16,
        body: String,
        detail: String,
    },
}

impl fmt::Display for GaugeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GaugeError::DataLoad(msg) => write!(f, "reference data load failed: {msg}"),
            GaugeError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            GaugeError::UnsupportedVariable { provider, variable } => write!(
                f,
                "variable '{}' is not available from {provider}",
                variable.code()
            ),
            GaugeError::Transport { provider, detail } => {
                write!(f, "request to {provider} failed before a response: {detail}")
            }
            GaugeError::Request {
                provider,
                status,
                body,
            } => write!(
                f,
                "request to {provider} failed with HTTP response code {status} and response:\n{body}"
            ),
            GaugeError::ResponseParse {
                provider,
                status,
                body,
                detail,
            } => write!(
                f,
                "unable to parse response from {provider} ({detail}); got HTTP response code {status} and response:\n{body}"
            ),
        }
    }
}

impl std::error::Error for GaugeError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
