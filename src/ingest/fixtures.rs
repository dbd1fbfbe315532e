/// Test fixtures: representative provider payloads.
///
/// Structurally complete but truncated to the minimum needed to exercise
/// the parsers.
///
/// State API (`get_ts_traces`) response shape:
///   { "error_num": 0,
///     "return": { "traces": [ { "site": ..., "trace": [ {"q","t","v"}, ... ] } ] } }
/// where `return` appears as `_return` on some deployments, and `site` and
/// the q/t/v fields arrive as numbers or strings depending on the deployment.
///
/// BOM responses are SOAP-wrapped WaterML2; each observation is a
/// `MeasurementTVP` with `time`, `value`, and a quality category under
/// `metadata`.

/// Four observations, one provider-flagged invalid (q=1001). Extraction
/// must keep exactly the first three.
#[cfg(test)]
pub(crate) fn fixture_quality_filter_json() -> &'static str {
    r#"{
      "error_num": 0,
      "return": {
        "traces": [
          {
            "site": "site1",
            "trace": [
              { "q": 901,  "t": "20210101010101", "v": "trace1_v" },
              { "q": 902,  "t": "20220202010101", "v": "trace2_v" },
              { "q": 903,  "t": "20230303010101", "v": "trace3_v" },
              { "q": 1001, "t": "20230303010101", "v": "trace3_v" }
            ]
          }
        ]
      }
    }"#
}

/// Same logical payload under the `_return` alias, with a numeric value.
#[cfg(test)]
pub(crate) fn fixture_underscore_return_json() -> &'static str {
    r#"{
      "error_num": 0,
      "_return": {
        "traces": [
          {
            "site": "410001",
            "trace": [
              { "q": 130, "t": "20210101000000", "v": 1234.5 }
            ]
          }
        ]
      }
    }"#
}

/// BOM GetObservation response with two daily points (5.25 at quality 10,
/// 6.5 at quality 140).
#[cfg(test)]
pub(crate) fn fixture_bom_two_points_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<soap12:Envelope xmlns:soap12="http://www.w3.org/2003/05/soap-envelope">
  <soap12:Body>
    <sos:GetObservationResponse xmlns:sos="http://www.opengis.net/sos/2.0"
        xmlns:om="http://www.opengis.net/om/2.0"
        xmlns:wml2="http://www.opengis.net/waterml/2.0"
        xmlns:swe="http://www.opengis.net/swe/2.0"
        xmlns:gml="http://www.opengis.net/gml/3.2">
      <sos:observationData>
        <om:OM_Observation gml:id="o.1">
          <om:result>
            <wml2:MeasurementTimeseries gml:id="ts.1">
              <wml2:point>
                <wml2:MeasurementTVP>
                  <wml2:time>2000-01-31T09:30:00.000+10:00</wml2:time>
                  <wml2:value>5.25</wml2:value>
                  <wml2:metadata>
                    <wml2:TVPMeasurementMetadata>
                      <wml2:qualifier>
                        <swe:Category definition="http://bom.gov.au/waterdata/services/qualifiers">
                          <swe:value>10</swe:value>
                        </swe:Category>
                      </wml2:qualifier>
                    </wml2:TVPMeasurementMetadata>
                  </wml2:metadata>
                </wml2:MeasurementTVP>
              </wml2:point>
              <wml2:point>
                <wml2:MeasurementTVP>
                  <wml2:time>2000-02-01T09:30:00.000+10:00</wml2:time>
                  <wml2:value>6.5</wml2:value>
                  <wml2:metadata>
                    <wml2:TVPMeasurementMetadata>
                      <wml2:qualifier>
                        <swe:Category definition="http://bom.gov.au/waterdata/services/qualifiers">
                          <swe:value>140</swe:value>
                        </swe:Category>
                      </wml2:qualifier>
                    </wml2:TVPMeasurementMetadata>
                  </wml2:metadata>
                </wml2:MeasurementTVP>
              </wml2:point>
            </wml2:MeasurementTimeseries>
          </om:result>
        </om:OM_Observation>
      </sos:observationData>
    </sos:GetObservationResponse>
  </soap12:Body>
</soap12:Envelope>"#
}

/// BOM response for a gauge with no observations in the window.
#[cfg(test)]
pub(crate) fn fixture_bom_empty_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<soap12:Envelope xmlns:soap12="http://www.w3.org/2003/05/soap-envelope">
  <soap12:Body>
    <sos:GetObservationResponse xmlns:sos="http://www.opengis.net/sos/2.0"/>
  </soap12:Body>
</soap12:Envelope>"#
}
