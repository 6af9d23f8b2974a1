//! Internal per-region state stored in the [`CaretStore`](crate::CaretStore).

use crate::selection::CaretSelection;

/// Lifecycle of a region's content.
///
/// `Idle → Converting → Idle`. While `Converting`, the region's content is being (or is
/// waiting to be) rewritten, and change or selection notifications for it are dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegionPhase {
    #[default]
    Idle,
    Converting,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct RegionState {
    pub phase: RegionPhase,

    /// Last captured caret, `None` once invalidated.
    pub caret: Option<CaretSelection>,
}
