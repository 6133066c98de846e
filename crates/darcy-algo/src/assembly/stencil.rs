//! Seven-point finite-difference stencil for one pore voxel.
//!
//! ```text
//! A[i,j] = 2 / (1/c_i + 1/c_j)                 for each pore face-neighbour j
//! A[i,i] = -(Σ_j A[i,j] + 2·c_i [z boundary])
//! b[i]   = -2·c_i                              on the z_min plane, else 0
//! ```
//!
//! The z_min plane is held at unit pressure and the z_max plane at zero; all
//! x/y faces are insulated. Both the dense and the sparse assemblers evaluate
//! rows through [`voxel_stencil`], so they agree bit for bit.

use darcy_core::Volume;

use super::neighbours::{BoundaryMask, NeighbourTable, Strides};

/// Effective conductance of the face between two cells.
#[inline]
pub fn harmonic_mean(c1: f32, c2: f32) -> f32 {
    let (c1, c2) = (c1 as f64, c2 as f64);
    (2.0 / (1.0 / c1 + 1.0 / c2)) as f32
}

/// One assembled row, still in raw index space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelStencil {
    pub raw: usize,
    faces: [(usize, f32); 6],
    n_faces: usize,
    pub diagonal: f32,
    pub rhs: f32,
}

impl VoxelStencil {
    /// `(raw neighbour index, face conductance)` in face order -x … +z.
    pub fn neighbours(&self) -> &[(usize, f32)] {
        &self.faces[..self.n_faces]
    }
}

/// Shared context for evaluating stencils over one volume.
#[derive(Debug, Clone)]
pub struct StencilBuilder<'a> {
    volume: &'a Volume,
    table: NeighbourTable,
    strides: Strides,
}

impl<'a> StencilBuilder<'a> {
    pub fn new(volume: &'a Volume) -> Self {
        Self {
            volume,
            table: NeighbourTable::new(),
            strides: Strides::new(volume.shape()),
        }
    }

    /// Stencil of the voxel at flat index `raw`; `None` for solid voxels.
    pub fn voxel_stencil(&self, raw: usize) -> Option<VoxelStencil> {
        let data = self.volume.data();
        let center = data[raw];
        if center == 0.0 {
            return None;
        }

        let (x, y, z) = self.volume.coords(raw);
        let mask = BoundaryMask::of(self.volume.shape(), x, y, z);

        let mut total = 0.0f32;
        let mut rhs = 0.0f32;
        // A single-layer volume is on both planes but gets one boundary term.
        if mask.contains(BoundaryMask::Z_MIN) {
            total += 2.0 * center;
            rhs = -(2.0 * center);
        } else if mask.contains(BoundaryMask::Z_MAX) {
            total += 2.0 * center;
        }

        let mut faces = [(0usize, 0.0f32); 6];
        let mut n_faces = 0;
        for &face in self.table.faces(mask) {
            let neighbour = self.strides.step(raw, face);
            let neighbour_c = data[neighbour];
            if neighbour_c == 0.0 {
                continue;
            }
            let conductance = harmonic_mean(center, neighbour_c);
            total += conductance;
            faces[n_faces] = (neighbour, conductance);
            n_faces += 1;
        }

        Some(VoxelStencil {
            raw,
            faces,
            n_faces,
            diagonal: -total,
            rhs,
        })
    }

    /// Stencils of all pore voxels in raw order.
    pub fn pore_stencils(&self) -> impl Iterator<Item = VoxelStencil> + '_ {
        (0..self.volume.len()).filter_map(move |raw| self.voxel_stencil(raw))
    }
}

/// Stencil of a single voxel, building a throwaway context.
pub fn voxel_stencil(volume: &Volume, raw: usize) -> Option<VoxelStencil> {
    StencilBuilder::new(volume).voxel_stencil(raw)
}
