/// State water authority registry.
///
/// One record per state API, carrying everything that differs between them:
/// host, CGI endpoint name, data-source code, batch-size cap, and the
/// variable-code table. Adding a state means adding one record here, not
/// editing control flow elsewhere. This is the single source of truth for
/// state API quirks - no other module hardcodes hosts or variable codes.

use crate::model::{GaugeError, VariableKind};

// ---------------------------------------------------------------------------
// Jurisdiction tags
// ---------------------------------------------------------------------------

/// State/territory authorities recognized by the router. SA has no state API
/// of its own; its gauges are served through the BOM fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jurisdiction {
    Nsw,
    Qld,
    Vic,
    Sa,
}

impl Jurisdiction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Jurisdiction::Nsw => "NSW",
            Jurisdiction::Qld => "QLD",
            Jurisdiction::Vic => "VIC",
            Jurisdiction::Sa => "SA",
        }
    }

    /// Maps a reference-data owner tag to a known jurisdiction, if any.
    pub fn from_owner_tag(tag: &str) -> Option<Jurisdiction> {
        match tag {
            "NSW" => Some(Jurisdiction::Nsw),
            "QLD" => Some(Jurisdiction::Qld),
            "VIC" => Some(Jurisdiction::Vic),
            "SA" => Some(Jurisdiction::Sa),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Variable-code tables
// ---------------------------------------------------------------------------

/// Wire codes for the `varfrom`/`varto` request parameters, pre-formatted
/// the way the APIs expect them (two decimal places). Codes are request
/// tokens, never arithmetic values, so they are kept as strings.
#[derive(Debug, Clone)]
pub struct VariableTable {
    pub flow: (&'static str, &'static str),
    pub level: (&'static str, &'static str),
    pub lake_level: (&'static str, &'static str),
    /// Documented quirk: some deployments require a fixed code for level
    /// requests in place of the normal table value.
    pub level_override: Option<(&'static str, &'static str)>,
}

// ---------------------------------------------------------------------------
// Provider configuration
// ---------------------------------------------------------------------------

/// Everything needed to address one state's timeseries API.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub jurisdiction: Jurisdiction,
    /// Scheme + host, no trailing slash. Owned so tests can point a config
    /// at a local server.
    pub base_url: String,
    /// CGI endpoint name under `/cgi/`.
    pub endpoint: &'static str,
    /// Value for the request's `datasource` parameter.
    pub data_source_code: &'static str,
    /// Hard cap the API places on sites per request.
    pub max_sites_per_request: usize,
    pub variables: VariableTable,
}

impl ProviderConfig {
    /// Resolves the `(varfrom, varto)` pair for a variable, applying the
    /// level override where one is configured.
    pub fn variable_codes(
        &self,
        kind: VariableKind,
    ) -> Result<(&'static str, &'static str), GaugeError> {
        match kind {
            VariableKind::Flow => Ok(self.variables.flow),
            VariableKind::Level => Ok(self.variables.level_override.unwrap_or(self.variables.level)),
            VariableKind::LakeLevel => Ok(self.variables.lake_level),
            VariableKind::StorageLevel | VariableKind::StorageVolume => {
                Err(GaugeError::UnsupportedVariable {
                    provider: self.jurisdiction.as_str().to_string(),
                    variable: kind,
                })
            }
        }
    }
}

/// The state APIs with primary-provider support, in dispatch order. The
/// order here is the order `retrieve` walks the buckets, and therefore the
/// grouping order of rows in the final table: NSW, then VIC, then QLD.
pub fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            jurisdiction: Jurisdiction::Nsw,
            base_url: "https://realtimedata.waternsw.com.au".to_string(),
            endpoint: "webservice.exe",
            data_source_code: "CP",
            max_sites_per_request: 5,
            variables: VariableTable {
                flow: ("100.00", "141.00"),
                level: ("100.00", "100.00"),
                lake_level: ("130.00", "130.00"),
                // NSW rejects the two-decimal form for level requests.
                level_override: Some(("100", "100")),
            },
        },
        ProviderConfig {
            jurisdiction: Jurisdiction::Vic,
            base_url: "https://data.water.vic.gov.au".to_string(),
            endpoint: "webservice.exe",
            data_source_code: "PUBLISH",
            max_sites_per_request: 5,
            variables: VariableTable {
                flow: ("100.00", "141.00"),
                level: ("100.00", "100.00"),
                lake_level: ("130.00", "130.00"),
                level_override: None,
            },
        },
        ProviderConfig {
            jurisdiction: Jurisdiction::Qld,
            base_url: "https://water-monitoring.information.qld.gov.au".to_string(),
            // QLD still fronts its service with the Perl CGI.
            endpoint: "webservice.pl",
            data_source_code: "AT",
            max_sites_per_request: 5,
            variables: VariableTable {
                flow: ("100.00", "141.00"),
                level: ("100.00", "100.00"),
                lake_level: ("130.00", "130.00"),
                level_override: None,
            },
        },
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
