/// Gauge-to-state routing.
///
/// Partitions a requested gauge list into per-state buckets using the
/// reference registry. A gauge claimed by several states lands in each of
/// their buckets; a gauge with no known claim lands only in the `rest`
/// catch-all, which downstream never dispatches. Bucket order follows
/// first-seen input order and never repeats a gauge.

use crate::jurisdictions::Jurisdiction;
use crate::registry::GaugeRegistry;

/// Per-state routing result. A closed struct rather than a string-keyed map:
/// the set of destinations is fixed, and an unknown owner tag is `rest` by
/// definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JurisdictionBuckets {
    pub nsw: Vec<String>,
    pub qld: Vec<String>,
    pub vic: Vec<String>,
    pub sa: Vec<String>,
    /// Gauges owned by no recognized state authority.
    pub rest: Vec<String>,
}

impl JurisdictionBuckets {
    pub fn bucket(&self, jurisdiction: Jurisdiction) -> &[String] {
        match jurisdiction {
            Jurisdiction::Nsw => &self.nsw,
            Jurisdiction::Qld => &self.qld,
            Jurisdiction::Vic => &self.vic,
            Jurisdiction::Sa => &self.sa,
        }
    }

    fn bucket_mut(&mut self, jurisdiction: Jurisdiction) -> &mut Vec<String> {
        match jurisdiction {
            Jurisdiction::Nsw => &mut self.nsw,
            Jurisdiction::Qld => &mut self.qld,
            Jurisdiction::Vic => &mut self.vic,
            Jurisdiction::Sa => &mut self.sa,
        }
    }
}

fn push_unique(bucket: &mut Vec<String>, gauge: &str) {
    if !bucket.iter().any(|g| g == gauge) {
        bucket.push(gauge.to_string());
    }
}

/// Sorts `gauge_numbers` into state buckets via the registry.
pub fn route(registry: &GaugeRegistry, gauge_numbers: &[impl AsRef<str>]) -> JurisdictionBuckets {
    let mut buckets = JurisdictionBuckets::default();

    for gauge in gauge_numbers {
        let gauge = gauge.as_ref();
        let claims = registry.lookup(gauge);
        if claims.is_empty() {
            push_unique(&mut buckets.rest, gauge);
            continue;
        }
        for claim in claims {
            match Jurisdiction::from_owner_tag(claim) {
                Some(jurisdiction) => push_unique(buckets.bucket_mut(jurisdiction), gauge),
                // Claimed, but by an authority without API support.
                None => push_unique(&mut buckets.rest, gauge),
            }
        }
    }

    buckets
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CSV: &str = "\
site name,gauge number,owner,lat,lon
Gauge1.0,1,NSW - Gauge1.0,-1.111,1.111
Gauge2.0,2,QLD - Gauge2.0,-2.222,2.222
Gauge3.0,3,NSW - Gauge3.0,-3.111,3.111
Gauge3.1,3,QLD - Gauge3.1,-3.222,3.222
Gauge4.0,4,QLD - Gauge4.0,-4.111,4.111
Gauge4.1,4,VIC - Gauge4.1,-4.222,4.222
Gauge5.0,5,VIC - Gauge5.0,-5.111,5.111
Gauge6.0,6,SA - Gauge6.0,-6.111,6.111
Gauge8.0,8,ACT - no API support,-8.111,8.111
footer
";

    fn registry() -> GaugeRegistry {
        GaugeRegistry::from_reader(TEST_CSV.as_bytes()).expect("test CSV should load")
    }

    #[test]
    fn test_route_partitions_by_owner() {
        let buckets = route(&registry(), &["1", "2", "3", "4", "5", "6", "10"]);
        assert_eq!(
            buckets,
            JurisdictionBuckets {
                nsw: vec!["1".to_string(), "3".to_string()],
                qld: vec!["2".to_string(), "3".to_string(), "4".to_string()],
                vic: vec!["4".to_string(), "5".to_string()],
                sa: vec!["6".to_string()],
                rest: vec!["10".to_string()],
            }
        );
    }

    #[test]
    fn test_multi_claim_gauge_lands_in_every_claiming_bucket() {
        let buckets = route(&registry(), &["3"]);
        assert_eq!(buckets.nsw, vec!["3"]);
        assert_eq!(buckets.qld, vec!["3"]);
        assert!(buckets.rest.is_empty());
    }

    #[test]
    fn test_unknown_gauge_goes_only_to_rest() {
        let buckets = route(&registry(), &["999999"]);
        assert_eq!(buckets.rest, vec!["999999"]);
        assert!(buckets.nsw.is_empty());
        assert!(buckets.qld.is_empty());
        assert!(buckets.vic.is_empty());
        assert!(buckets.sa.is_empty());
    }

    #[test]
    fn test_claimed_by_unsupported_authority_collapses_to_rest() {
        let buckets = route(&registry(), &["8"]);
        assert_eq!(buckets.rest, vec!["8"]);
    }

    #[test]
    fn test_repeated_input_never_duplicates_within_a_bucket() {
        let buckets = route(&registry(), &["1", "1", "3", "1", "3", "10", "10"]);
        assert_eq!(buckets.nsw, vec!["1", "3"]);
        assert_eq!(buckets.qld, vec!["3"]);
        assert_eq!(buckets.rest, vec!["10"]);
    }

    #[test]
    fn test_bucket_order_follows_first_seen_input_order() {
        let buckets = route(&registry(), &["3", "1"]);
        assert_eq!(buckets.nsw, vec!["3", "1"]);
    }
}
