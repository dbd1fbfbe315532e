/// Gauge ownership registry - loads the BOM reference dataset.
///
/// The reference dataset (`data/bom_gauge_data.csv`) maps each gauge number
/// to the state authority that operates it. It is an upstream export with a
/// header row and a ragged trailing footer row, both of which are skipped.
/// The `owner` column encodes the state as its first whitespace-delimited
/// token (e.g. `"NSW - Gauge1.0"` -> `NSW`).
///
/// The registry is built once and immutable afterwards; callers hold it and
/// pass it by reference into routing. A gauge number may legitimately appear
/// under more than one state in the reference data - all claims are kept and
/// returned, and the multiplicity is logged as a warning at lookup time.

use std::collections::HashMap;
use std::io::Read;
use tracing::warn;

use crate::model::GaugeError;

/// One row of the reference dataset, reduced to the retained columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaugeRecord {
    pub gauge_number: String,
    pub jurisdiction: String,
}

/// Immutable gauge-number -> owning-states index.
#[derive(Debug)]
pub struct GaugeRegistry {
    by_gauge: HashMap<String, Vec<String>>,
}

/// Reference dataset compiled into the crate, so lookups work without any
/// runtime file dependency.
const BUNDLED_CSV: &str = include_str!("../data/bom_gauge_data.csv");

impl GaugeRegistry {
    /// Builds the registry from the compiled-in reference dataset.
    ///
    /// # Panics
    /// Panics if the bundled dataset fails to parse. The dataset ships with
    /// the crate, so a parse failure is a build defect.
    pub fn bundled() -> GaugeRegistry {
        GaugeRegistry::from_reader(BUNDLED_CSV.as_bytes())
            .unwrap_or_else(|e| panic!("bundled bom_gauge_data.csv is invalid: {e}"))
    }

    /// Builds the registry from a CSV stream in the upstream export format:
    /// columns `site name, gauge number, owner, lat, lon`, one header row,
    /// one trailing footer row.
    pub fn from_reader(reader: impl Read) -> Result<GaugeRegistry, GaugeError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // the footer row has fewer fields than the data rows
            .from_reader(reader);

        let mut records: Vec<csv::StringRecord> = Vec::new();
        for record in csv_reader.records() {
            let record =
                record.map_err(|e| GaugeError::DataLoad(format!("CSV read error: {e}")))?;
            records.push(record);
        }

        // Last row is the export's footer, not data.
        records.pop();

        let mut by_gauge: HashMap<String, Vec<String>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            if record.len() < 5 {
                return Err(GaugeError::DataLoad(format!(
                    "data row {} has {} columns, expected 5 (site name, gauge number, owner, lat, lon)",
                    idx + 2, // 1-based, counting the header row
                    record.len()
                )));
            }
            let gauge_number = record[1].trim().to_string();
            let owner = record[2].trim();
            let jurisdiction = owner
                .split_whitespace()
                .next()
                .ok_or_else(|| {
                    GaugeError::DataLoad(format!(
                        "data row {} has an empty owner column",
                        idx + 2
                    ))
                })?
                .to_string();
            by_gauge.entry(gauge_number).or_default().push(jurisdiction);
        }

        Ok(GaugeRegistry { by_gauge })
    }

    /// Returns every state claiming `gauge_number` in the reference data, in
    /// dataset order. Empty if the gauge is unknown. A gauge with multiple
    /// claims is reported in full - the ambiguity is a property of the
    /// upstream data, not an error.
    pub fn lookup(&self, gauge_number: &str) -> Vec<&str> {
        let matches: Vec<&str> = self
            .by_gauge
            .get(gauge_number)
            .map(|states| states.iter().map(String::as_str).collect())
            .unwrap_or_default();
        if matches.len() > 1 {
            warn!(
                gauge = gauge_number,
                states = ?matches,
                "gauge has multiple state claims in reference data"
            );
        }
        matches
    }

    /// Number of distinct gauge numbers in the registry.
    pub fn len(&self) -> usize {
        self.by_gauge.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_gauge.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // Mirrors the shape of the real export: quoted and unquoted gauge
    // numbers, duplicate claims, a non-numeric gauge number, and the
    // trailing footer line.
    const TEST_CSV: &str = "\
site name,gauge number,owner,lat,lon
Gauge1.0,\"1\",NSW  - Gauge1.0,-1.111,1.111
Gauge2.0,\"2\",QLD - Gauge2.0,-2.222,2.222
Gauge3.0,3,NSW - Gauge3.0,-3.111,3.111
Gauge3.1,3,QLD - Gauge3.1,-3.222,3.222
Gauge4.0,4,QLD - Gauge4.0,-4.111,4.111
Gauge4.1,4,VIC - Gauge4.1,-4.222,4.222
Gauge5.0,5,VIC - Gauge5.0,-5.111,5.111
Gauge6.0,6,SA - Gauge6.0,-6.111,6.111
Gauge7,SomeRandomString,QLD - non-numeric gauge numbers occur upstream,-7.111,7.111
export footer line
";

    fn registry() -> GaugeRegistry {
        GaugeRegistry::from_reader(TEST_CSV.as_bytes()).expect("test CSV should load")
    }

    #[test]
    fn test_lookup_single_claim() {
        let reg = registry();
        assert_eq!(reg.lookup("1"), vec!["NSW"]);
        assert_eq!(reg.lookup("2"), vec!["QLD"]);
        assert_eq!(reg.lookup("5"), vec!["VIC"]);
        assert_eq!(reg.lookup("6"), vec!["SA"]);
    }

    #[test]
    fn test_lookup_preserves_multiple_claims() {
        let reg = registry();
        assert_eq!(reg.lookup("3"), vec!["NSW", "QLD"]);
        assert_eq!(reg.lookup("4"), vec!["QLD", "VIC"]);
    }

    #[test]
    fn test_lookup_unknown_gauge_is_empty() {
        let reg = registry();
        assert!(reg.lookup("10").is_empty());
    }

    #[test]
    fn test_gauge_numbers_are_opaque_strings() {
        let reg = registry();
        assert_eq!(reg.lookup("SomeRandomString"), vec!["QLD"]);
    }

    #[test]
    fn test_footer_row_is_not_indexed() {
        let reg = registry();
        // 1..6 plus the string gauge; the footer contributes nothing.
        assert_eq!(reg.len(), 7);
        assert!(reg.lookup("export").is_empty());
    }

    #[test]
    fn test_owner_state_is_first_whitespace_token() {
        // "NSW  - Gauge1.0" (double space) must still yield NSW.
        let reg = registry();
        assert_eq!(reg.lookup("1"), vec!["NSW"]);
    }

    #[test]
    fn test_short_data_row_is_a_load_error() {
        let bad = "\
site name,gauge number,owner,lat,lon
Gauge1.0,1,NSW - Gauge1.0,-1.111,1.111
Gauge2.0,2
footer
";
        let err = GaugeRegistry::from_reader(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, GaugeError::DataLoad(_)), "got {err:?}");
    }

    #[test]
    fn test_bundled_dataset_loads() {
        let reg = GaugeRegistry::bundled();
        assert!(!reg.is_empty());
    }
}
