/// State water API client: request construction, dispatch, and extraction.
///
/// The NSW/VIC/QLD services share one protocol: a `get_ts_traces` call whose
/// JSON payload rides in the GET query string:
///   https://{host}/cgi/{endpoint}?{"params":{...},"function":"get_ts_traces","version":"2"}
///
/// Responses put the traces under a top-level `return` key, or `_return` on
/// some deployments - the two are aliases of one logical field. See
/// `fixtures.rs` for representative payloads.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::jurisdictions::ProviderConfig;
use crate::model::{
    Aggregation, GaugeError, Interval, ObsValue, ObservationRow, RequestWindow, VariableKind,
    SUBJECT_WATER,
};
use crate::transport::HttpGet;

/// Quality codes at or above this are provider-flagged invalid and dropped.
pub const QUALITY_REJECT_THRESHOLD: i64 = 999;

// ---------------------------------------------------------------------------
// Request construction
// ---------------------------------------------------------------------------

/// Builds the full request URL for one batch of sites.
///
/// Window bounds render as `YYYYMMDD000000`; sites join with commas; the
/// multiplier is always 1. Spaces in the serialized payload are
/// percent-encoded - the services accept the rest of the JSON as-is.
pub fn build_request_url(
    cfg: &ProviderConfig,
    sites: &[String],
    window: &RequestWindow,
    variable: VariableKind,
    interval: Interval,
    aggregation: Aggregation,
) -> Result<String, GaugeError> {
    let (var_from, var_to) = cfg.variable_codes(variable)?;

    let payload = serde_json::json!({
        "params": {
            "site_list": sites.join(","),
            "start_time": format!("{}000000", window.start.format("%Y%m%d")),
            "varfrom": var_from,
            "interval": interval.as_str(),
            "varto": var_to,
            "datasource": cfg.data_source_code,
            "end_time": format!("{}000000", window.end.format("%Y%m%d")),
            "data_type": aggregation.as_str(),
            "multiplier": "1"
        },
        "function": "get_ts_traces",
        "version": "2"
    });

    let url = format!("{}/cgi/{}?{}", cfg.base_url, cfg.endpoint, payload);
    Ok(url.replace(' ', "%20"))
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Sends one batch request and returns the parsed JSON body.
///
/// # Errors
/// - `GaugeError::Request` - non-200 status, with the status and raw body.
/// - `GaugeError::ResponseParse` - 200 but the body is not valid JSON.
///   Distinct from `Request` so callers can tell "down" from "misbehaving".
pub fn fetch(
    transport: &dyn HttpGet,
    cfg: &ProviderConfig,
    sites: &[String],
    window: &RequestWindow,
    variable: VariableKind,
    interval: Interval,
    aggregation: Aggregation,
) -> Result<Value, GaugeError> {
    let jurisdiction = cfg.jurisdiction.as_str();
    let url = build_request_url(cfg, sites, window, variable, interval, aggregation)?;
    debug!(provider = jurisdiction, url = url.as_str(), "sending request");

    let response = transport.get(jurisdiction, &url)?;
    if response.status != 200 {
        return Err(GaugeError::Request {
            provider: jurisdiction.to_string(),
            status: response.status,
            body: response.body,
        });
    }

    serde_json::from_str(&response.body).map_err(|e| GaugeError::ResponseParse {
        provider: jurisdiction.to_string(),
        status: response.status,
        body: response.body.clone(),
        detail: format!("invalid JSON: {e}"),
    })
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ReturnBlock {
    traces: Option<Vec<SiteTrace>>,
}

#[derive(Deserialize)]
struct SiteTrace {
    site: Option<Value>,
    trace: Option<Vec<TraceObservation>>,
}

// q/t/v arrive as numbers on some deployments and strings on others, so
// they are coerced after deserialization rather than typed here.
#[derive(Deserialize)]
struct TraceObservation {
    q: Option<Value>,
    t: Option<Value>,
    v: Option<Value>,
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_i64(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn coerce_obs_value(value: &Value) -> ObsValue {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(ObsValue::Number)
            .unwrap_or_else(|| ObsValue::Text(n.to_string())),
        Value::String(s) => ObsValue::Text(s.clone()),
        other => ObsValue::Text(other.to_string()),
    }
}

/// Walks a parsed response body into normalized rows.
///
/// Observations with quality >= [`QUALITY_REJECT_THRESHOLD`] are dropped;
/// timestamps (`YYYYMMDDHHMMSS`) are truncated to calendar dates. A body
/// without the expected nested structure is logged and yields zero rows -
/// "no data" is recoverable, unlike a failed or unparseable exchange.
pub fn extract(jurisdiction: &str, raw: &Value) -> Vec<ObservationRow> {
    // `return` is canonical; some deployments send `_return` instead.
    let Some(ret) = raw.get("return").or_else(|| raw.get("_return")) else {
        warn!(provider = jurisdiction, "no valid data contained in response, skipping");
        return Vec::new();
    };

    let block: ReturnBlock = match serde_json::from_value(ret.clone()) {
        Ok(block) => block,
        Err(e) => {
            warn!(provider = jurisdiction, error = %e, "unexpected trace structure, skipping");
            return Vec::new();
        }
    };

    let Some(traces) = block.traces else {
        warn!(provider = jurisdiction, "response carries no traces, skipping");
        return Vec::new();
    };

    let mut rows = Vec::new();
    for site_trace in traces {
        let Some(site_id) = site_trace.site.as_ref().and_then(coerce_string) else {
            warn!(provider = jurisdiction, "trace without a site identifier, skipping");
            continue;
        };

        for obs in site_trace.trace.unwrap_or_default() {
            let Some(quality_code) = obs.q.as_ref().and_then(coerce_i64) else {
                warn!(provider = jurisdiction, site = site_id.as_str(), "observation without a readable quality code, skipping");
                continue;
            };
            if quality_code >= QUALITY_REJECT_THRESHOLD {
                continue;
            }

            let Some(date) = obs
                .t
                .as_ref()
                .and_then(coerce_string)
                .and_then(|t| parse_trace_date(&t))
            else {
                warn!(provider = jurisdiction, site = site_id.as_str(), "observation without a readable timestamp, skipping");
                continue;
            };

            let value = obs
                .v
                .as_ref()
                .map(coerce_obs_value)
                .unwrap_or(ObsValue::Text(String::new()));

            rows.push(ObservationRow {
                data_source_id: jurisdiction.to_string(),
                site_id: site_id.clone(),
                subject_id: SUBJECT_WATER.to_string(),
                date,
                value,
                quality_code,
            });
        }
    }

    rows
}

fn parse_trace_date(timestamp: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(timestamp, "%Y%m%d%H%M%S")
        .map(|dt| dt.date())
        .ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
