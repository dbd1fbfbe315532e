/// BOM Water Data Online client (SOS2 / WaterML2).
///
/// The Bureau of Meteorology service answers one gauge per request - there
/// is no batching - over a SOAP-style GetObservation exchange. It is the
/// fallback for gauges without state API support (SA in particular) and an
/// optional universal source.
///
/// Property/procedure vocabulary:
///   discharge  -> "Water Course Discharge", procedures Pat4_C_B_1_*
///   level      -> "Water Course Level",     procedures Pat3_C_B_1_*
///   storage lv -> "Storage Level",          procedures Pat7_C_B_1_*
///   storage vol-> "Storage Volume",         procedures Pat6_C_B_1_*
/// each crossed with {Hourly,Daily,Monthly,Yearly}{Mean,Min,Max}.

use chrono::NaiveDate;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use crate::model::{
    Aggregation, GaugeError, Interval, ObsValue, ObservationRow, RequestWindow, VariableKind,
    SUBJECT_WATER,
};

/// Data-source tag stamped on every row from this provider.
pub const BOM_DATA_SOURCE: &str = "BOM";

/// Discharge arrives in cumecs (m3/s); the unified table carries megalitres
/// per day. 1 m3/s sustained for a day is 86.4 ML.
pub const CUMECS_TO_ML_PER_DAY: f64 = 86.4;

const BOM_SERVICE_ENDPOINT: &str = "http://www.bom.gov.au/waterdata/services";

// ---------------------------------------------------------------------------
// Property / procedure resolution
// ---------------------------------------------------------------------------

/// Resolves the `(observed property, procedure)` pair for a request.
///
/// Lake level has no BOM equivalent and fails here, before any request.
pub fn bom_params(
    variable: VariableKind,
    interval: Interval,
    aggregation: Aggregation,
) -> Result<(&'static str, String), GaugeError> {
    let (property, pattern) = match variable {
        VariableKind::Flow => ("Water Course Discharge", "Pat4"),
        VariableKind::Level => ("Water Course Level", "Pat3"),
        VariableKind::StorageLevel => ("Storage Level", "Pat7"),
        VariableKind::StorageVolume => ("Storage Volume", "Pat6"),
        VariableKind::LakeLevel => {
            return Err(GaugeError::UnsupportedVariable {
                provider: BOM_DATA_SOURCE.to_string(),
                variable,
            });
        }
    };

    let interval_word = match interval {
        Interval::Hour => "Hourly",
        Interval::Day => "Daily",
        Interval::Month => "Monthly",
        Interval::Year => "Yearly",
    };
    let aggregation_word = match aggregation {
        Aggregation::Mean => "Mean",
        Aggregation::Min => "Min",
        Aggregation::Max => "Max",
    };

    Ok((
        property,
        format!("{pattern}_C_B_1_{interval_word}{aggregation_word}"),
    ))
}

// ---------------------------------------------------------------------------
// Service seam
// ---------------------------------------------------------------------------

/// The GetObservation exchange, abstracted so the pipeline can run against a
/// canned service in tests.
pub trait BomService {
    /// Requests all observations for one gauge over `[begin, end]`
    /// (ISO 8601 local timestamps) and returns the raw response XML.
    fn get_observation(
        &self,
        gauge: &str,
        property: &str,
        procedure: &str,
        begin: &str,
        end: &str,
    ) -> Result<String, GaugeError>;
}

/// Production SOS2 client speaking SOAP 1.2 to the BOM endpoint.
pub struct SosClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl SosClient {
    pub fn new() -> Self {
        SosClient {
            client: reqwest::blocking::Client::new(),
            endpoint: BOM_SERVICE_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        SosClient {
            client: reqwest::blocking::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn request_body(gauge: &str, property: &str, procedure: &str, begin: &str, end: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<soap12:Envelope xmlns:soap12="http://www.w3.org/2003/05/soap-envelope"
                 xmlns:sos="http://www.opengis.net/sos/2.0"
                 xmlns:fes="http://www.opengis.net/fes/2.0"
                 xmlns:gml="http://www.opengis.net/gml/3.2">
  <soap12:Body>
    <sos:GetObservation service="SOS" version="2.0.0">
      <sos:procedure>http://bom.gov.au/waterdata/services/tstypes/{procedure}</sos:procedure>
      <sos:observedProperty>http://bom.gov.au/waterdata/services/parameters/{property}</sos:observedProperty>
      <sos:featureOfInterest>http://bom.gov.au/waterdata/services/stations/{gauge}</sos:featureOfInterest>
      <sos:temporalFilter>
        <fes:During>
          <fes:ValueReference>om:phenomenonTime</fes:ValueReference>
          <gml:TimePeriod gml:id="tp1">
            <gml:beginPosition>{begin}</gml:beginPosition>
            <gml:endPosition>{end}</gml:endPosition>
          </gml:TimePeriod>
        </fes:During>
      </sos:temporalFilter>
    </sos:GetObservation>
  </soap12:Body>
</soap12:Envelope>"#
        )
    }
}

impl Default for SosClient {
    fn default() -> Self {
        SosClient::new()
    }
}

impl BomService for SosClient {
    fn get_observation(
        &self,
        gauge: &str,
        property: &str,
        procedure: &str,
        begin: &str,
        end: &str,
    ) -> Result<String, GaugeError> {
        let body = SosClient::request_body(gauge, property, procedure, begin, end);
        debug!(gauge, property, procedure, "sending GetObservation request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/soap+xml")
            .body(body)
            .send()
            .map_err(|e| GaugeError::Transport {
                provider: BOM_DATA_SOURCE.to_string(),
                detail: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let text = response.text().map_err(|e| GaugeError::Transport {
            provider: BOM_DATA_SOURCE.to_string(),
            detail: format!("failed reading response body: {e}"),
        })?;

        if status != 200 {
            return Err(GaugeError::Request {
                provider: BOM_DATA_SOURCE.to_string(),
                status,
                body: text,
            });
        }
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// One time/value/quality point lifted out of a WaterML2 response, with the
/// timestamp already truncated to its calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct BomPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub quality: i64,
}

/// Pulls the `MeasurementTVP` points out of a GetObservation response.
///
/// The envelope varies between deployments, so this walks the XML by local
/// element name: each `MeasurementTVP` carries a `time`, a `value`, and the
/// quality category inside its `metadata` block. A response without points
/// (gauge unknown to BOM, or no data in the window) yields an empty vector -
/// that is "no data", not an error. Structurally invalid XML is an error.
pub fn parse_observations(xml: &str) -> Result<Vec<BomPoint>, GaugeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    #[derive(PartialEq)]
    enum Field {
        Time,
        Value,
    }

    let mut points = Vec::new();
    let mut in_metadata = false;
    let mut current: Option<Field> = None;
    let mut time: Option<String> = None;
    let mut value: Option<f64> = None;
    let mut quality: Option<i64> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"MeasurementTVP" => {
                    time = None;
                    value = None;
                    quality = None;
                }
                b"metadata" => in_metadata = true,
                b"time" => current = Some(Field::Time),
                b"value" => current = Some(Field::Value),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(|e| parse_error(xml, e))?;
                match current {
                    Some(Field::Time) => time = Some(text.into_owned()),
                    Some(Field::Value) if in_metadata => {
                        quality = text.trim().parse().ok();
                    }
                    Some(Field::Value) => value = text.trim().parse().ok(),
                    None => {}
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"MeasurementTVP" => {
                    if let (Some(t), Some(v)) = (time.take(), value.take()) {
                        if let Some(date) = truncate_to_date(&t) {
                            points.push(BomPoint {
                                date,
                                value: v,
                                quality: quality.take().unwrap_or(0),
                            });
                        }
                    }
                }
                b"metadata" => in_metadata = false,
                b"time" | b"value" => current = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error(xml, e)),
            _ => {}
        }
    }

    Ok(points)
}

fn parse_error(xml: &str, e: impl std::fmt::Display) -> GaugeError {
    GaugeError::ResponseParse {
        provider: BOM_DATA_SOURCE.to_string(),
        status: 200,
        body: xml.to_string(),
        detail: format!("invalid WaterML2 XML: {e}"),
    }
}

/// BOM timestamps are ISO 8601 with offsets; only the date part matters.
fn truncate_to_date(timestamp: &str) -> Option<NaiveDate> {
    timestamp
        .get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

// ---------------------------------------------------------------------------
// Fetch + normalize
// ---------------------------------------------------------------------------

/// Retrieves every gauge individually and normalizes the results into the
/// unified row schema, concatenated in input gauge order.
///
/// Flow values are converted from cumecs to ML/day; all other variables
/// pass through unconverted. A gauge with no observations contributes no
/// rows. Service and parse failures propagate.
pub fn fetch_and_normalize(
    service: &dyn BomService,
    gauge_numbers: &[String],
    window: &RequestWindow,
    variable: VariableKind,
    interval: Interval,
    aggregation: Aggregation,
) -> Result<Vec<ObservationRow>, GaugeError> {
    let (property, procedure) = bom_params(variable, interval, aggregation)?;
    let begin = format!("{}T00:00:00", window.start.format("%Y-%m-%d"));
    let end = format!("{}T00:00:00", window.end.format("%Y-%m-%d"));

    let mut rows = Vec::new();
    for gauge in gauge_numbers {
        let xml = service.get_observation(gauge, property, &procedure, &begin, &end)?;
        for point in parse_observations(&xml)? {
            let value = match variable {
                VariableKind::Flow => point.value * CUMECS_TO_ML_PER_DAY,
                _ => point.value,
            };
            rows.push(ObservationRow {
                data_source_id: BOM_DATA_SOURCE.to_string(),
                site_id: gauge.clone(),
                subject_id: SUBJECT_WATER.to_string(),
                date: point.date,
                value: ObsValue::Number(value),
                quality_code: point.quality,
            });
        }
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
