use serde::{Deserialize, Serialize};

/// A geocoded site. Built once per analysis and replaced wholesale
/// by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}
