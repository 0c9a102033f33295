// src/planning/category.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Which formula family sizes a designation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignationCategory {
    Standard,
    WorkshopTechnician,
}

impl DesignationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::WorkshopTechnician => "workshop_technician",
        }
    }

    /// Default category for designations created without one.
    ///
    /// Covers "Workshop Technician", "Senior Workshop Technician" and
    /// "Associate Workshop Technician".
    pub fn from_legacy_name(name: &str) -> Self {
        if name.to_lowercase().contains("workshop technician") {
            Self::WorkshopTechnician
        } else {
            Self::Standard
        }
    }

    pub fn is_workshop(&self) -> bool {
        matches!(self, Self::WorkshopTechnician)
    }
}

impl fmt::Display for DesignationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DesignationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "standard" => Ok(Self::Standard),
            "workshop_technician" => Ok(Self::WorkshopTechnician),
            other => Err(format!("unknown designation category '{other}'")),
        }
    }
}

impl TryFrom<String> for DesignationCategory {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// How a designation's requirement is derived, as shown to planners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanningType {
    #[serde(rename = "Shift Based")]
    ShiftBased,
    #[serde(rename = "As per BIC")]
    AsPerBic,
}

impl From<DesignationCategory> for PlanningType {
    fn from(c: DesignationCategory) -> Self {
        match c {
            DesignationCategory::Standard => PlanningType::ShiftBased,
            DesignationCategory::WorkshopTechnician => PlanningType::AsPerBic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_names_cover_all_workshop_variants() {
        for name in [
            "Workshop Technician",
            "Senior Workshop Technician",
            "Associate Workshop Technician",
            "  senior workshop technician ",
        ] {
            assert_eq!(
                DesignationCategory::from_legacy_name(name),
                DesignationCategory::WorkshopTechnician,
                "{name}"
            );
        }
        assert_eq!(
            DesignationCategory::from_legacy_name("Field Executive"),
            DesignationCategory::Standard
        );
        assert_eq!(
            DesignationCategory::from_legacy_name("Workshop Supervisor"),
            DesignationCategory::Standard
        );
    }

    #[test]
    fn parses_loose_spellings() {
        assert_eq!(
            "Workshop Technician".parse::<DesignationCategory>(),
            Ok(DesignationCategory::WorkshopTechnician)
        );
        assert_eq!(
            "workshop-technician".parse::<DesignationCategory>(),
            Ok(DesignationCategory::WorkshopTechnician)
        );
        assert_eq!("STANDARD".parse::<DesignationCategory>(), Ok(DesignationCategory::Standard));
        assert!("mechanic".parse::<DesignationCategory>().is_err());
    }

    #[test]
    fn stored_values_decode_strictly() {
        assert_eq!(
            DesignationCategory::try_from("workshop_technician".to_string()),
            Ok(DesignationCategory::WorkshopTechnician)
        );
        assert!(DesignationCategory::try_from("mechanic".to_string()).is_err());
        assert_eq!(
            serde_json::to_value(DesignationCategory::WorkshopTechnician).unwrap(),
            serde_json::json!("workshop_technician")
        );
    }

    #[test]
    fn planning_type_labels() {
        assert_eq!(
            serde_json::to_value(PlanningType::ShiftBased).unwrap(),
            serde_json::json!("Shift Based")
        );
        assert_eq!(
            serde_json::to_value(PlanningType::from(DesignationCategory::WorkshopTechnician)).unwrap(),
            serde_json::json!("As per BIC")
        );
    }
}
