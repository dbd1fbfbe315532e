/// Provider clients. One file per upstream service:
/// - `state_api` - the NSW/VIC/QLD `get_ts_traces` HTTP services
/// - `bom`       - the BOM Water Data Online SOS2 service
/// - `fixtures`  - (test only) representative response payloads

pub mod bom;
pub mod state_api;

#[cfg(test)]
pub(crate) mod fixtures;
