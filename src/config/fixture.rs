use crate::config::toml_config::substitute_env_vars;
use crate::domain::model::{LotSeed, NewLot, NewSpace, SpaceStatus, SPACE_NUMBER_MAX_CHARS};
use crate::utils::error::{ParkingError, Result};
use crate::utils::validation::{
    validate_max_chars, validate_non_empty_string, validate_non_negative, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Lots and spaces to load into a store, as written in a seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub lots: Vec<LotFixture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotFixture {
    pub name: String,
    pub total_spaces: i64,
    pub free_spaces: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub spaces: Vec<SpaceFixture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceFixture {
    pub space_number: String,
    #[serde(default)]
    pub status: SpaceStatus,
    pub row: i64,
}

fn default_active() -> bool {
    true
}

impl Fixture {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ParkingError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content)?;
        toml::from_str(&processed).map_err(|e| ParkingError::FixtureError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn space_count(&self) -> usize {
        self.lots.iter().map(|l| l.spaces.len()).sum()
    }

    pub fn to_seeds(&self) -> Vec<LotSeed> {
        self.lots.iter().map(LotFixture::to_seed).collect()
    }

    /// Inconsistencies worth reporting that do not block seeding.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for lot in &self.lots {
            if lot.free_spaces > lot.total_spaces {
                warnings.push(format!(
                    "lot '{}': free_spaces {} exceeds total_spaces {}",
                    lot.name, lot.free_spaces, lot.total_spaces
                ));
            }

            if !lot.spaces.is_empty() {
                let listed_free = lot.spaces.iter().filter(|s| s.status.is_free()).count() as i64;
                if listed_free != lot.free_spaces {
                    warnings.push(format!(
                        "lot '{}': free_spaces {} but {} listed spaces are free",
                        lot.name, lot.free_spaces, listed_free
                    ));
                }
            }

            let mut seen = HashSet::new();
            for space in &lot.spaces {
                if !seen.insert(space.space_number.as_str()) {
                    warnings.push(format!(
                        "lot '{}': duplicate space number '{}'",
                        lot.name, space.space_number
                    ));
                }
            }
        }
        warnings
    }
}

impl LotFixture {
    pub fn to_new_lot(&self) -> NewLot {
        NewLot {
            name: self.name.clone(),
            total_spaces: self.total_spaces,
            free_spaces: self.free_spaces,
            is_active: self.is_active,
        }
    }

    pub fn to_seed(&self) -> LotSeed {
        LotSeed {
            lot: self.to_new_lot(),
            spaces: self.spaces.iter().map(SpaceFixture::to_new_space).collect(),
        }
    }
}

impl SpaceFixture {
    pub fn to_new_space(&self) -> NewSpace {
        NewSpace {
            space_number: self.space_number.clone(),
            status: self.status,
            row: self.row,
        }
    }
}

impl Validate for Fixture {
    fn validate(&self) -> Result<()> {
        for (i, lot) in self.lots.iter().enumerate() {
            validate_non_empty_string(&format!("lots[{i}].name"), &lot.name)?;
            validate_non_negative(&format!("lots[{i}].total_spaces"), lot.total_spaces)?;
            validate_non_negative(&format!("lots[{i}].free_spaces"), lot.free_spaces)?;

            for (j, space) in lot.spaces.iter().enumerate() {
                let field = format!("lots[{i}].spaces[{j}].space_number");
                validate_non_empty_string(&field, &space.space_number)?;
                validate_max_chars(&field, &space.space_number, SPACE_NUMBER_MAX_CHARS)?;
            }
        }
        Ok(())
    }
}
