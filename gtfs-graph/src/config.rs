use std::collections::BTreeMap;

/// Settings of a [crate::GtfsReader] that can be read from a configuration file
///
/// Every field is optional. Entity types are given by their table name (`stops`),
/// their file name (`stops.txt`) or their type name (`Stop`).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReaderConfig {
    pub default_agency_id: Option<String>,
    /// Replacement of the agency ids found in the feed
    pub agency_id_mapping: BTreeMap<String, String>,
    pub overwrite_duplicates: bool,
    /// Tables to read, in this order. All the tables when not set
    pub entity_types: Option<Vec<String>>,
    pub trim_fields: Option<bool>,
    /// Milliseconds since the epoch, reported in the [crate::LoadSummary]
    pub last_modified_time: Option<i64>,
}
