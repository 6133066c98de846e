//! Translation between raw voxel indices and condensed equation indices.
//!
//! Solid voxels get no row or column in the condensed system. For every raw
//! flat index the table stores how many solid voxels occur up to and
//! including it, so a pore voxel's condensed index is
//! `raw - nulls_count[raw]`. The reverse direction keeps the raw index of each
//! condensed row.

use darcy_core::{DarcyError, DarcyResult, Volume};

/// Raw ↔ condensed index map for one volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CondensedIndex {
    nulls_count: Vec<usize>,
    pore_voxels: Vec<usize>,
}

impl CondensedIndex {
    /// Build from a per-voxel "is solid" sequence in raw order.
    pub fn from_solid_flags(solid: impl IntoIterator<Item = bool>) -> Self {
        let mut nulls_count = Vec::new();
        let mut pore_voxels = Vec::new();
        let mut nulls = 0;
        for (raw, is_solid) in solid.into_iter().enumerate() {
            if is_solid {
                nulls += 1;
            } else {
                pore_voxels.push(raw);
            }
            nulls_count.push(nulls);
        }
        Self {
            nulls_count,
            pore_voxels,
        }
    }

    /// Zero-conductivity voxels are solid.
    pub fn from_volume(volume: &Volume) -> Self {
        Self::from_solid_flags(volume.data().iter().map(|&c| c == 0.0))
    }

    /// Rows with a positive diagonal are the identity rows of solid voxels.
    pub fn from_diagonal(diagonal: &[f32]) -> Self {
        Self::from_solid_flags(diagonal.iter().map(|&d| d > 0.0))
    }

    /// Running count of solid voxels up to and including each raw index.
    pub fn nulls_count(&self) -> &[usize] {
        &self.nulls_count
    }

    /// Number of raw voxels.
    pub fn n_raw(&self) -> usize {
        self.nulls_count.len()
    }

    /// Number of condensed rows (pore voxels).
    pub fn n_condensed(&self) -> usize {
        self.pore_voxels.len()
    }

    /// Condensed index of a pore voxel; `None` for solids or out-of-range.
    #[inline]
    pub fn condensed(&self, raw: usize) -> Option<usize> {
        let condensed = raw.checked_sub(*self.nulls_count.get(raw)?)?;
        (self.pore_voxels.get(condensed) == Some(&raw)).then_some(condensed)
    }

    /// Raw index of a condensed row.
    #[inline]
    pub fn raw_index(&self, condensed: usize) -> Option<usize> {
        self.pore_voxels.get(condensed).copied()
    }

    /// Raw indices of all pore voxels, in condensed order.
    pub fn pore_voxels(&self) -> &[usize] {
        &self.pore_voxels
    }

    /// Scatter a condensed vector into raw order, writing `fill` at solids.
    pub fn expand(&self, condensed: &[f32], fill: f32) -> DarcyResult<Vec<f32>> {
        if condensed.len() != self.n_condensed() {
            return Err(DarcyError::DimensionMismatch {
                expected: self.n_condensed(),
                actual: condensed.len(),
            });
        }
        let mut raw = vec![fill; self.n_raw()];
        for (&r, &value) in self.pore_voxels.iter().zip(condensed) {
            raw[r] = value;
        }
        Ok(raw)
    }

    /// Gather a raw-ordered vector into condensed order.
    pub fn condense<T: Copy>(&self, raw: &[T]) -> DarcyResult<Vec<T>> {
        if raw.len() != self.n_raw() {
            return Err(DarcyError::DimensionMismatch {
                expected: self.n_raw(),
                actual: raw.len(),
            });
        }
        Ok(self.pore_voxels.iter().map(|&r| raw[r]).collect())
    }
}
