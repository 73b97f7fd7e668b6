//! Zone state store and update events
//!
//! The store holds one active/inactive flag per zone index. It is mutated
//! only by merging [`UpdateEvent`]s and read through ordered snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Index of a monitored zone (0-based)
pub type ZoneIndex = u32;

/// Zone flags used when no configuration overrides them: zone 0 active,
/// zones 1-3 inactive.
pub const DEFAULT_ZONES: [bool; 4] = [true, false, false, false];

/// A single inbound status report for one zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    pub grid_index: ZoneIndex,
    pub is_active: bool,
}

impl UpdateEvent {
    pub fn new(grid_index: ZoneIndex, is_active: bool) -> Self {
        Self {
            grid_index,
            is_active,
        }
    }
}

/// One entry of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStatus {
    pub index: ZoneIndex,
    pub is_active: bool,
}

/// Last known active flag per zone index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneState {
    zones: BTreeMap<ZoneIndex, bool>,
}

impl ZoneState {
    /// Create a store seeded from a list of flags, where position is the index
    pub fn with_defaults(defaults: &[bool]) -> Self {
        let zones = defaults
            .iter()
            .enumerate()
            .map(|(index, &is_active)| (index as ZoneIndex, is_active))
            .collect();
        Self { zones }
    }

    /// Merge an update, returning true if the visible state changed
    pub fn apply_update(&mut self, event: UpdateEvent) -> bool {
        let previous = self.zones.insert(event.grid_index, event.is_active);
        previous != Some(event.is_active)
    }

    /// All known zones, ordered by ascending index
    pub fn snapshot(&self) -> Vec<ZoneStatus> {
        self.zones
            .iter()
            .map(|(&index, &is_active)| ZoneStatus { index, is_active })
            .collect()
    }

    pub fn is_active(&self, index: ZoneIndex) -> Option<bool> {
        self.zones.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl Default for ZoneState {
    fn default() -> Self {
        Self::with_defaults(&DEFAULT_ZONES)
    }
}

/// Pure reducer form of [`ZoneState::apply_update`]
pub fn reduce(mut state: ZoneState, event: UpdateEvent) -> ZoneState {
    state.apply_update(event);
    state
}
