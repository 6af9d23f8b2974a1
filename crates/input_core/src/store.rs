//! Central store for per-region caret state and conversion phase.
//!
//! This store is UI-agnostic: it never looks at the DOM. Integration layers compute a
//! [`CaretSelection`] from their selection model and hand it over here, and report the
//! start and end of every content rewrite so stale carets are dropped.

use crate::id::RegionId;
use crate::selection::CaretSelection;
use crate::state::{RegionPhase, RegionState};
use std::collections::HashMap;

/// Caret and phase bookkeeping for every tracked region.
///
/// # Example
///
/// ```
/// use input_core::{CaretSelection, CaretStore, RegionId};
///
/// let mut store = CaretStore::new();
/// let id = RegionId::from_raw(1);
/// store.register(id);
///
/// assert!(store.record(id, CaretSelection::new("input-1", 0, 3)));
/// assert!(store.begin_conversion(id));
/// store.finish_conversion(id, true);
///
/// assert_eq!(store.caret(id), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CaretStore {
    regions: HashMap<RegionId, RegionState>,
}

impl CaretStore {
    pub fn new() -> Self {
        Self {
            regions: HashMap::new(),
        }
    }

    /// Start tracking a region. Re-registering keeps the existing state.
    pub fn register(&mut self, id: RegionId) {
        self.regions.entry(id).or_default();
    }

    pub fn phase(&self, id: RegionId) -> Option<RegionPhase> {
        self.regions.get(&id).map(|s| s.phase)
    }

    /// Notifications (selection or content changes) are only dispatched to idle regions.
    pub fn accepts_notifications(&self, id: RegionId) -> bool {
        self.phase(id) == Some(RegionPhase::Idle)
    }

    /// Store the caret for a region, overwriting any previous one.
    ///
    /// Returns `false` (and stores nothing) when the region is unknown or converting.
    pub fn record(&mut self, id: RegionId, selection: CaretSelection) -> bool {
        match self.regions.get_mut(&id) {
            Some(st) if st.phase == RegionPhase::Idle => {
                st.caret = Some(selection);
                true
            }
            _ => false,
        }
    }

    pub fn caret(&self, id: RegionId) -> Option<&CaretSelection> {
        self.regions.get(&id).and_then(|s| s.caret.as_ref())
    }

    /// Remove and return the caret, forcing a fresh capture on the next interaction.
    pub fn take(&mut self, id: RegionId) -> Option<CaretSelection> {
        self.regions.get_mut(&id).and_then(|s| s.caret.take())
    }

    /// `Idle → Converting`. Returns `false` if the region is unknown or already converting,
    /// in which case the caller must not start another rewrite.
    pub fn begin_conversion(&mut self, id: RegionId) -> bool {
        match self.regions.get_mut(&id) {
            Some(st) if st.phase == RegionPhase::Idle => {
                st.phase = RegionPhase::Converting;
                true
            }
            _ => false,
        }
    }

    /// `Converting → Idle`. When the rewrite changed the content the caret is dropped,
    /// since node positions no longer map to the same logical place.
    pub fn finish_conversion(&mut self, id: RegionId, changed: bool) {
        let Some(st) = self.regions.get_mut(&id) else {
            return;
        };
        debug_assert_eq!(st.phase, RegionPhase::Converting, "finish without begin");
        st.phase = RegionPhase::Idle;
        if changed {
            st.caret = None;
        }
    }

    /// Regions currently in `Converting`, sorted for deterministic processing.
    pub fn converting(&self) -> Vec<RegionId> {
        let mut ids: Vec<RegionId> = self
            .regions
            .iter()
            .filter(|(_, st)| st.phase == RegionPhase::Converting)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }
}
