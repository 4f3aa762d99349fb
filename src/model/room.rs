use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// A room in the affected property. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    sqft: f64,
    #[serde(default = "default_room_type")]
    pub room_type: String,
    #[serde(default)]
    pub floor_type: Option<String>,
    #[serde(default = "default_true")]
    pub affected: bool,
}

fn default_room_type() -> String {
    "standard".to_string()
}

fn default_true() -> bool {
    true
}

impl Room {
    pub fn new(name: impl Into<String>, sqft: f64) -> Result<Self, AuditError> {
        if !(sqft > 0.0) {
            return Err(AuditError::invalid_claim(
                "room.sqft",
                format!("must be > 0, got {sqft}"),
            ));
        }
        Ok(Room {
            name: name.into(),
            sqft,
            room_type: default_room_type(),
            floor_type: None,
            affected: true,
        })
    }

    pub fn with_room_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = room_type.into();
        self
    }

    pub fn with_floor_type(mut self, floor_type: impl Into<String>) -> Self {
        self.floor_type = Some(floor_type.into());
        self
    }

    pub fn with_affected(mut self, affected: bool) -> Self {
        self.affected = affected;
        self
    }

    pub fn sqft(&self) -> f64 {
        self.sqft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_sqft() {
        assert!(Room::new("Kitchen", 0.0).is_err());
        assert!(Room::new("Kitchen", -5.0).is_err());
    }

    #[test]
    fn accepts_positive_sqft() {
        let room = Room::new("Kitchen", 150.0).unwrap();
        assert_eq!(room.sqft(), 150.0);
        assert!(room.affected);
    }
}
