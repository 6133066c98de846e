//! Boundary membership and the face neighbours it leaves open.
//!
//! A voxel's six boundary-plane memberships pack into a 6-bit
//! [`BoundaryMask`]. Bit `k` is set exactly when face `k` of [`FACES`] points
//! outside the volume, so the valid neighbours for all 64 masks can be
//! tabulated once.

use darcy_core::Shape;

/// Grid axis of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One of the six axis-aligned faces of a voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub axis: Axis,
    /// `true` for the +axis direction
    pub positive: bool,
}

/// Faces in stencil order: -x, +x, -y, +y, -z, +z.
pub const FACES: [Face; 6] = [
    Face { axis: Axis::X, positive: false },
    Face { axis: Axis::X, positive: true },
    Face { axis: Axis::Y, positive: false },
    Face { axis: Axis::Y, positive: true },
    Face { axis: Axis::Z, positive: false },
    Face { axis: Axis::Z, positive: true },
];

/// Which boundary planes a voxel lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundaryMask(u8);

impl BoundaryMask {
    pub const X_MIN: u8 = 1 << 0;
    pub const X_MAX: u8 = 1 << 1;
    pub const Y_MIN: u8 = 1 << 2;
    pub const Y_MAX: u8 = 1 << 3;
    pub const Z_MIN: u8 = 1 << 4;
    pub const Z_MAX: u8 = 1 << 5;

    pub fn of(shape: Shape, x: usize, y: usize, z: usize) -> Self {
        let [w, h, d] = shape;
        let mut bits = 0;
        if x == 0 {
            bits |= Self::X_MIN;
        }
        if x + 1 == w {
            bits |= Self::X_MAX;
        }
        if y == 0 {
            bits |= Self::Y_MIN;
        }
        if y + 1 == h {
            bits |= Self::Y_MAX;
        }
        if z == 0 {
            bits |= Self::Z_MIN;
        }
        if z + 1 == d {
            bits |= Self::Z_MAX;
        }
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, flag: u8) -> bool {
        self.0 & flag != 0
    }
}

/// Valid face neighbours for every boundary mask.
#[derive(Debug, Clone)]
pub struct NeighbourTable {
    entries: Vec<Vec<Face>>,
}

impl Default for NeighbourTable {
    fn default() -> Self {
        Self::new()
    }
}

impl NeighbourTable {
    pub fn new() -> Self {
        let entries = (0u8..64)
            .map(|mask| {
                FACES
                    .iter()
                    .enumerate()
                    .filter(|(k, _)| mask & (1 << k) == 0)
                    .map(|(_, face)| *face)
                    .collect()
            })
            .collect();
        Self { entries }
    }

    pub fn faces(&self, mask: BoundaryMask) -> &[Face] {
        &self.entries[mask.bits() as usize]
    }
}

/// Flat-index displacement helper for one volume shape.
#[derive(Debug, Clone, Copy)]
pub struct Strides {
    x: usize,
    y: usize,
    z: usize,
}

impl Strides {
    pub fn new(shape: Shape) -> Self {
        let [_, h, d] = shape;
        Self { x: h * d, y: d, z: 1 }
    }

    /// Flat index of the neighbour of `raw` across `face`.
    ///
    /// The caller guarantees the face is not on the boundary.
    #[inline]
    pub fn step(&self, raw: usize, face: Face) -> usize {
        let stride = match face.axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        };
        if face.positive {
            raw + stride
        } else {
            raw - stride
        }
    }
}
