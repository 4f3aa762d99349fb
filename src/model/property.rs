use serde::{Deserialize, Serialize};

use super::room::Room;

/// Water contamination category per IICRC S500: 1 = clean, 2 = gray,
/// 3 = black (sewage/contaminated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterCategory {
    #[serde(rename = "1")]
    Category1,
    #[serde(rename = "2")]
    Category2,
    #[serde(rename = "3")]
    Category3,
}

impl WaterCategory {
    pub fn as_u8(self) -> u8 {
        match self {
            WaterCategory::Category1 => 1,
            WaterCategory::Category2 => 2,
            WaterCategory::Category3 => 3,
        }
    }
}

/// Property-specific facts for the claim: affected rooms and water category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDetails {
    #[serde(default)]
    pub affected_rooms: Vec<Room>,
    #[serde(default)]
    pub water_category: Option<WaterCategory>,
    #[serde(default)]
    total_affected_sqft: Option<f64>,
    #[serde(default = "default_property_type")]
    pub property_type: String,
}

fn default_property_type() -> String {
    "residential".to_string()
}

impl PropertyDetails {
    pub fn new(affected_rooms: Vec<Room>) -> Self {
        PropertyDetails {
            affected_rooms,
            water_category: None,
            total_affected_sqft: None,
            property_type: default_property_type(),
        }
    }

    pub fn with_water_category(mut self, category: WaterCategory) -> Self {
        self.water_category = Some(category);
        self
    }

    pub fn with_total_affected_sqft(mut self, sqft: f64) -> Self {
        self.total_affected_sqft = Some(sqft);
        self
    }

    /// The stored value if present, otherwise the sum of `sqft` over
    /// affected rooms (`spec.md` §3 invariant).
    pub fn total_affected_sqft(&self) -> f64 {
        self.total_affected_sqft.unwrap_or_else(|| {
            self.affected_rooms
                .iter()
                .filter(|r| r.affected)
                .map(|r| r.sqft())
                .sum()
        })
    }
}

impl Default for PropertyDetails {
    fn default() -> Self {
        PropertyDetails::new(Vec::new())
    }
}
