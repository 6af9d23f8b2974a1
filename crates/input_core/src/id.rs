//! Generic, UI-agnostic identifier for editable regions.
//!
//! This type intentionally uses a plain `u64` to avoid coupling to any DOM
//! identifier type. Integration layers provide `From` implementations.

/// Opaque identifier for a region within a [`CaretStore`](crate::CaretStore).
///
/// # Integration
///
/// ```ignore
/// impl From<html::Id> for RegionId {
///     fn from(id: html::Id) -> Self {
///         RegionId::from_raw(id.0 as u64)
///     }
/// }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(u64);

impl RegionId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<u32> for RegionId {
    #[inline]
    fn from(raw: u32) -> Self {
        Self::from_raw(raw as u64)
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "region#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_id_round_trip() {
        let id = RegionId::from(7u32);
        assert_eq!(id, RegionId::from_raw(7));
        assert_eq!(id.to_string(), "region#7");
    }
}
