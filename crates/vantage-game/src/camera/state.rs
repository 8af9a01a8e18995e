//! Authored camera states
//!
//! Each named situation the character can be in maps to one [`CameraState`]. The table is
//! authored once and shared by `Arc` across every controller using the same profile.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::CameraConfigError;

/// Camera setpoints for one situation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Pivot relative to the character, in the camera's yaw-only frame
    pub pivot: Vec3,
    /// Camera position relative to the pivot, in the look frame (+Z is behind)
    pub offset: Vec3,
    /// Extra (pitch, yaw, roll) in degrees added to the look angles
    pub orientation: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl CameraState {
    pub const fn new(pivot: Vec3, offset: Vec3, fov: f32) -> Self {
        Self {
            pivot,
            offset,
            orientation: Vec3::ZERO,
            fov,
        }
    }

    pub fn with_orientation(mut self, orientation: Vec3) -> Self {
        self.orientation = orientation;
        self
    }
}

/// Every camera situation the classifier can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CameraStateId {
    Default,
    Aim,
    Crouch,
    Grenade,
    LowCover,
    LowCoverGrenade,
    TallCoverLeft,
    TallCoverRight,
    TallCoverBack,
    LeftCorner,
    RightCorner,
    Climb,
    Dead,
    Zoom,
    CrouchZoom,
    LowCoverZoom,
    TallCoverBackZoom,
    LeftLowCornerZoom,
    RightLowCornerZoom,
    LeftTallCornerZoom,
    RightTallCornerZoom,
}

impl CameraStateId {
    pub const ALL: [CameraStateId; 21] = [
        Self::Default,
        Self::Aim,
        Self::Crouch,
        Self::Grenade,
        Self::LowCover,
        Self::LowCoverGrenade,
        Self::TallCoverLeft,
        Self::TallCoverRight,
        Self::TallCoverBack,
        Self::LeftCorner,
        Self::RightCorner,
        Self::Climb,
        Self::Dead,
        Self::Zoom,
        Self::CrouchZoom,
        Self::LowCoverZoom,
        Self::TallCoverBackZoom,
        Self::LeftLowCornerZoom,
        Self::RightLowCornerZoom,
        Self::LeftTallCornerZoom,
        Self::RightTallCornerZoom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Aim => "Aim",
            Self::Crouch => "Crouch",
            Self::Grenade => "Grenade",
            Self::LowCover => "LowCover",
            Self::LowCoverGrenade => "LowCoverGrenade",
            Self::TallCoverLeft => "TallCoverLeft",
            Self::TallCoverRight => "TallCoverRight",
            Self::TallCoverBack => "TallCoverBack",
            Self::LeftCorner => "LeftCorner",
            Self::RightCorner => "RightCorner",
            Self::Climb => "Climb",
            Self::Dead => "Dead",
            Self::Zoom => "Zoom",
            Self::CrouchZoom => "CrouchZoom",
            Self::LowCoverZoom => "LowCoverZoom",
            Self::TallCoverBackZoom => "TallCoverBackZoom",
            Self::LeftLowCornerZoom => "LeftLowCornerZoom",
            Self::RightLowCornerZoom => "RightLowCornerZoom",
            Self::LeftTallCornerZoom => "LeftTallCornerZoom",
            Self::RightTallCornerZoom => "RightTallCornerZoom",
        }
    }

    /// Peeking around a cover corner, zoomed or not
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Self::LeftCorner
                | Self::RightCorner
                | Self::LeftLowCornerZoom
                | Self::RightLowCornerZoom
                | Self::LeftTallCornerZoom
                | Self::RightTallCornerZoom
        )
    }

    pub fn is_zoom(self) -> bool {
        matches!(
            self,
            Self::Zoom
                | Self::CrouchZoom
                | Self::LowCoverZoom
                | Self::TallCoverBackZoom
                | Self::LeftLowCornerZoom
                | Self::RightLowCornerZoom
                | Self::LeftTallCornerZoom
                | Self::RightTallCornerZoom
        )
    }
}

impl fmt::Display for CameraStateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CameraStateId {
    type Err = CameraConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| CameraConfigError::UnknownState(s.to_string()))
    }
}

/// Named table of camera states with a required `Default` entry.
///
/// Serialised as a map keyed by state name. Ids without an entry resolve to `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, CameraState>",
    into = "BTreeMap<String, CameraState>"
)]
pub struct CameraStateTable {
    default: CameraState,
    states: BTreeMap<CameraStateId, CameraState>,
}

impl CameraStateTable {
    /// Build a table from entries; fails without a `Default` entry or with a bad FOV
    pub fn from_entries(
        entries: impl IntoIterator<Item = (CameraStateId, CameraState)>,
    ) -> Result<Self, CameraConfigError> {
        let states: BTreeMap<CameraStateId, CameraState> = entries.into_iter().collect();
        for (id, state) in &states {
            if !(state.fov > 0.0 && state.fov < 180.0) {
                return Err(CameraConfigError::InvalidFov {
                    state: id.name().to_string(),
                    fov: state.fov,
                });
            }
        }
        let default = *states
            .get(&CameraStateId::Default)
            .ok_or(CameraConfigError::MissingDefaultState)?;
        Ok(Self { default, states })
    }

    /// State for `id`, or the `Default` state when the table has no entry
    pub fn get(&self, id: CameraStateId) -> &CameraState {
        self.states.get(&id).unwrap_or(&self.default)
    }

    pub fn contains(&self, id: CameraStateId) -> bool {
        self.states.contains_key(&id)
    }

    pub fn default_state(&self) -> &CameraState {
        &self.default
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl Default for CameraStateTable {
    /// Shoulder-camera profile covering every state
    fn default() -> Self {
        let states = BTreeMap::from([
            (CameraStateId::Default, preset([0.0, 1.6, 0.0], [0.6, 0.2, 3.0], 60.0)),
            (CameraStateId::Aim, preset([0.0, 1.6, 0.0], [0.7, 0.1, 1.8], 55.0)),
            (CameraStateId::Crouch, preset([0.0, 1.1, 0.0], [0.6, 0.2, 2.6], 60.0)),
            (CameraStateId::Grenade, preset([0.0, 1.6, 0.0], [0.5, 0.4, 3.2], 60.0)),
            (CameraStateId::LowCover, preset([0.0, 1.0, 0.0], [0.6, 0.3, 2.6], 60.0)),
            (CameraStateId::LowCoverGrenade, preset([0.0, 1.0, 0.0], [0.5, 0.5, 3.0], 60.0)),
            (CameraStateId::TallCoverLeft, preset([0.0, 1.6, 0.0], [-0.8, 0.2, 3.0], 60.0)),
            (CameraStateId::TallCoverRight, preset([0.0, 1.6, 0.0], [0.8, 0.2, 3.0], 60.0)),
            (CameraStateId::TallCoverBack, preset([0.0, 1.6, 0.0], [0.6, 0.2, 2.2], 58.0)),
            (CameraStateId::LeftCorner, preset([-0.4, 1.6, 0.0], [-0.8, 0.1, 2.2], 55.0)),
            (CameraStateId::RightCorner, preset([0.4, 1.6, 0.0], [0.8, 0.1, 2.2], 55.0)),
            (
                CameraStateId::Climb,
                preset([0.0, 1.4, 0.0], [0.0, 0.6, 3.4], 60.0)
                    .with_orientation(Vec3::new(-10.0, 0.0, 0.0)),
            ),
            (
                CameraStateId::Dead,
                preset([0.0, 0.5, 0.0], [0.0, 1.5, 3.5], 60.0)
                    .with_orientation(Vec3::new(-25.0, 0.0, 0.0)),
            ),
            (CameraStateId::Zoom, preset([0.0, 1.6, 0.0], [0.55, 0.05, 1.2], 40.0)),
            (CameraStateId::CrouchZoom, preset([0.0, 1.1, 0.0], [0.55, 0.05, 1.2], 40.0)),
            (CameraStateId::LowCoverZoom, preset([0.0, 1.2, 0.0], [0.55, 0.1, 1.3], 40.0)),
            (CameraStateId::TallCoverBackZoom, preset([0.0, 1.6, 0.0], [0.5, 0.05, 1.2], 40.0)),
            (CameraStateId::LeftLowCornerZoom, preset([-0.6, 1.2, 0.0], [-0.5, 0.05, 1.2], 40.0)),
            (CameraStateId::RightLowCornerZoom, preset([0.6, 1.2, 0.0], [0.5, 0.05, 1.2], 40.0)),
            (CameraStateId::LeftTallCornerZoom, preset([-0.7, 1.6, 0.0], [-0.5, 0.05, 1.2], 40.0)),
            (CameraStateId::RightTallCornerZoom, preset([0.7, 1.6, 0.0], [0.5, 0.05, 1.2], 40.0)),
        ]);
        let default = states[&CameraStateId::Default];
        Self { default, states }
    }
}

/// Built-in state from pivot and offset components
fn preset(pivot: [f32; 3], offset: [f32; 3], fov: f32) -> CameraState {
    CameraState::new(Vec3::from_array(pivot), Vec3::from_array(offset), fov)
}

impl TryFrom<BTreeMap<String, CameraState>> for CameraStateTable {
    type Error = CameraConfigError;

    fn try_from(named: BTreeMap<String, CameraState>) -> Result<Self, Self::Error> {
        let entries = named
            .into_iter()
            .map(|(name, state)| Ok((name.parse::<CameraStateId>()?, state)))
            .collect::<Result<Vec<_>, CameraConfigError>>()?;
        Self::from_entries(entries)
    }
}

impl From<CameraStateTable> for BTreeMap<String, CameraState> {
    fn from(table: CameraStateTable) -> Self {
        table
            .states
            .into_iter()
            .map(|(id, state)| (id.name().to_string(), state))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_covers_every_state() {
        let table = CameraStateTable::default();
        for id in CameraStateId::ALL {
            assert!(table.contains(id), "missing {id}");
        }
        assert_eq!(table.len(), CameraStateId::ALL.len());
    }

    #[test]
    fn test_missing_entry_falls_back_to_default() {
        let default = CameraState::new(Vec3::Y, Vec3::Z, 70.0);
        let table = CameraStateTable::from_entries([(CameraStateId::Default, default)]).unwrap();
        assert_eq!(*table.get(CameraStateId::LeftCorner), default);
    }

    #[test]
    fn test_table_requires_default() {
        let aim = CameraState::new(Vec3::Y, Vec3::Z, 50.0);
        let result = CameraStateTable::from_entries([(CameraStateId::Aim, aim)]);
        assert!(matches!(result, Err(CameraConfigError::MissingDefaultState)));
    }

    #[test]
    fn test_table_rejects_bad_fov() {
        let bad = CameraState::new(Vec3::Y, Vec3::Z, 0.0);
        let result = CameraStateTable::from_entries([(CameraStateId::Default, bad)]);
        assert!(matches!(result, Err(CameraConfigError::InvalidFov { .. })));
    }

    #[test]
    fn test_state_names_parse_back() {
        for id in CameraStateId::ALL {
            assert_eq!(id.name().parse::<CameraStateId>().unwrap(), id);
        }
        assert!("Sprint".parse::<CameraStateId>().is_err());
    }

    #[test]
    fn test_corner_and_zoom_sets() {
        assert!(CameraStateId::LeftCorner.is_corner());
        assert!(!CameraStateId::LeftCorner.is_zoom());
        assert!(CameraStateId::RightTallCornerZoom.is_corner());
        assert!(CameraStateId::RightTallCornerZoom.is_zoom());
        assert!(!CameraStateId::LowCover.is_corner());
    }
}
