/// gauge_getter: unified retrieval of Murray-Darling basin gauge
/// observations from the state water APIs and BOM Water Data Online.
///
/// # Module structure
///
/// ```text
/// gauge_getter
/// ├── model         - shared data types (ObservationRow, RequestWindow, GaugeError, …)
/// ├── registry      - gauge-to-state reference dataset (bom_gauge_data.csv)
/// ├── routing       - partitions requested gauges into per-state buckets
/// ├── batch         - splits site lists into provider-sized request batches
/// ├── jurisdictions - per-state API configuration records
/// ├── transport     - blocking HTTP seam
/// ├── ingest
/// │   ├── state_api - NSW/VIC/QLD get_ts_traces: URL construction + extraction
/// │   ├── bom       - BOM SOS2/WaterML2 client + normalization
/// │   └── fixtures (test only) - representative provider payloads
/// └── retrieve      - orchestrator (GaugeGetter public entry point)
/// ```

pub mod batch;
pub mod ingest;
pub mod jurisdictions;
pub mod model;
pub mod registry;
pub mod retrieve;
pub mod routing;
pub mod transport;

pub use model::{
    Aggregation, GaugeError, Interval, ObsValue, ObservationRow, RequestWindow, Source,
    VariableKind,
};
pub use registry::GaugeRegistry;
pub use retrieve::{GaugeGetter, RetrievalOptions};
