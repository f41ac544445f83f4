use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub type LotId = i64;
pub type SpaceId = i64;

/// Longest label a space number may carry.
pub const SPACE_NUMBER_MAX_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lot {
    pub id: LotId,
    pub name: String,
    pub total_spaces: i64,
    pub free_spaces: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Lot {
    /// Label used by the JSON summary.
    pub fn display_label(&self) -> String {
        format!("Parking #{}", self.id)
    }

    pub fn occupied_spaces(&self) -> i64 {
        self.total_spaces - self.free_spaces
    }
}

impl fmt::Display for Lot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parking {}", self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceStatus {
    #[default]
    Free,
    Occupied,
}

impl SpaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Occupied => "occupied",
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }
}

impl fmt::Display for SpaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown space status '{0}', expected 'free' or 'occupied'")]
pub struct UnknownStatus(pub String);

impl FromStr for SpaceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "occupied" => Ok(Self::Occupied),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub lot_id: LotId,
    pub space_number: String,
    pub status: SpaceStatus,
    pub row: i64,
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.space_number, self.status)
    }
}

/// Input for creating a lot; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLot {
    pub name: String,
    pub total_spaces: i64,
    pub free_spaces: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpace {
    pub space_number: String,
    pub status: SpaceStatus,
    pub row: i64,
}

/// One lot with the spaces to create under it, loaded in a single batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotSeed {
    pub lot: NewLot,
    pub spaces: Vec<NewSpace>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub lots_deleted: usize,
    pub lots_created: usize,
    pub spaces_created: usize,
}

/// A lot loaded for its detail page: the lot, its spaces in display order,
/// and its neighbours among the active lots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotDetail {
    pub lot: Lot,
    pub spaces: Vec<Space>,
    pub prev: Option<Lot>,
    pub next: Option<Lot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotInfo {
    pub id: LotId,
    pub name: String,
    pub total_spaces: i64,
    pub free_spaces: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceEntry {
    pub space_number: String,
    pub status: SpaceStatus,
    pub row: i64,
}

impl From<&Space> for SpaceEntry {
    fn from(space: &Space) -> Self {
        Self {
            space_number: space.space_number.clone(),
            status: space.status,
            row: space.row,
        }
    }
}

/// Body of `GET /api/parking/<id>/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotSummary {
    pub parking: LotInfo,
    pub spaces: Vec<SpaceEntry>,
}

impl LotSummary {
    pub fn new(lot: &Lot, spaces: &[Space]) -> Self {
        Self {
            parking: LotInfo {
                id: lot.id,
                name: lot.display_label(),
                total_spaces: lot.total_spaces,
                free_spaces: lot.free_spaces,
            },
            spaces: spaces.iter().map(SpaceEntry::from).collect(),
        }
    }
}
