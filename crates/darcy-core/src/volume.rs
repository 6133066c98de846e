//! Labeled conductivity volumes.
//!
//! A [`Volume`] is a `(W, H, D)` grid of non-negative conductivities stored
//! flat in lexicographic `(x, y, z)` order, z varying fastest. A value of zero
//! marks a solid voxel that carries no flow and receives no equation.

use serde::Serialize;

use crate::error::{DarcyError, DarcyResult};

/// Grid extent `(W, H, D)`.
pub type Shape = [usize; 3];

/// 3D conductivity grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Volume {
    shape: Shape,
    data: Vec<f32>,
}

impl Volume {
    /// Wrap flat data. Fails if `data.len()` is not `W * H * D`.
    pub fn new(shape: Shape, data: Vec<f32>) -> DarcyResult<Self> {
        let expected = shape.iter().product::<usize>();
        if data.len() != expected {
            return Err(DarcyError::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Volume with every voxel set to `value`.
    pub fn filled(shape: Shape, value: f32) -> Self {
        Self {
            shape,
            data: vec![value; shape.iter().product()],
        }
    }

    /// Build a volume by evaluating `f(x, y, z)` in flat order.
    pub fn from_fn(shape: Shape, mut f: impl FnMut(usize, usize, usize) -> f32) -> Self {
        let [w, h, d] = shape;
        let mut data = Vec::with_capacity(w * h * d);
        for x in 0..w {
            for y in 0..h {
                for z in 0..d {
                    data.push(f(x, y, z));
                }
            }
        }
        Self { shape, data }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Total voxel count, solids included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat conductivities in lexicographic order.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Flat index of `(x, y, z)`.
    #[inline]
    pub fn flat_index(&self, x: usize, y: usize, z: usize) -> usize {
        let [_, h, d] = self.shape;
        (x * h + y) * d + z
    }

    /// Inverse of [`Volume::flat_index`].
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize, usize) {
        let [_, h, d] = self.shape;
        (index / (h * d), (index / d) % h, index % d)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        self.data[self.flat_index(x, y, z)]
    }

    pub fn set(&mut self, x: usize, y: usize, z: usize, value: f32) {
        let idx = self.flat_index(x, y, z);
        self.data[idx] = value;
    }

    #[inline]
    pub fn is_solid(&self, index: usize) -> bool {
        self.data[index] == 0.0
    }

    /// Number of non-solid voxels.
    pub fn pore_count(&self) -> usize {
        self.data.iter().filter(|&&c| c != 0.0).count()
    }

    /// Fraction of non-solid voxels.
    pub fn porosity(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.pore_count() as f64 / self.data.len() as f64
    }

    /// Reject volumes that cannot produce a meaningful system.
    ///
    /// Empty extents, negative or non-finite conductivities and volumes made
    /// entirely of solid voxels are all reported here, before assembly.
    pub fn validate(&self) -> DarcyResult<()> {
        if self.data.is_empty() {
            return Err(DarcyError::InvalidVolume(format!(
                "empty volume with shape {:?}",
                self.shape
            )));
        }
        if let Some(idx) = self.data.iter().position(|c| !c.is_finite()) {
            let (x, y, z) = self.coords(idx);
            return Err(DarcyError::InvalidVolume(format!(
                "non-finite conductivity at ({x}, {y}, {z})"
            )));
        }
        if let Some(idx) = self.data.iter().position(|&c| c < 0.0) {
            let (x, y, z) = self.coords(idx);
            return Err(DarcyError::InvalidVolume(format!(
                "negative conductivity {} at ({x}, {y}, {z})",
                self.data[idx]
            )));
        }
        if self.pore_count() == 0 {
            return Err(DarcyError::InvalidVolume(
                "volume contains no pore voxels".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_index_is_z_fastest() {
        let volume = Volume::filled([2, 3, 4], 1.0);
        assert_eq!(volume.flat_index(0, 0, 1), 1);
        assert_eq!(volume.flat_index(0, 1, 0), 4);
        assert_eq!(volume.flat_index(1, 0, 0), 12);
        assert_eq!(volume.coords(17), (1, 1, 1));
    }

    #[test]
    fn test_from_fn_matches_get() {
        let volume = Volume::from_fn([3, 2, 2], |x, y, z| (x * 100 + y * 10 + z) as f32);
        assert_eq!(volume.get(2, 1, 0), 210.0);
        assert_eq!(volume.data()[volume.flat_index(1, 0, 1)], 101.0);
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = Volume::new([2, 2, 2], vec![1.0; 7]).unwrap_err();
        assert!(matches!(
            err,
            DarcyError::DimensionMismatch {
                expected: 8,
                actual: 7
            }
        ));
    }

    #[test]
    fn test_porosity() {
        let mut volume = Volume::filled([2, 2, 1], 1.0);
        volume.set(0, 0, 0, 0.0);
        assert_eq!(volume.pore_count(), 3);
        assert!((volume.porosity() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_malformed_volumes() {
        assert!(Volume::filled([0, 4, 4], 1.0).validate().is_err());
        assert!(Volume::filled([2, 2, 2], 0.0).validate().is_err());

        let mut volume = Volume::filled([2, 2, 2], 1.0);
        volume.set(1, 0, 1, f32::NAN);
        let err = volume.validate().unwrap_err();
        assert!(err.to_string().contains("(1, 0, 1)"));

        volume.set(1, 0, 1, -2.0);
        assert!(volume.validate().is_err());

        volume.set(1, 0, 1, 0.0);
        assert!(volume.validate().is_ok());
    }
}
