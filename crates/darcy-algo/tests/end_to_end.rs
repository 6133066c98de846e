//! 4×4×4 scenario: unit conductivity with a 2×2 hole at z=1 and a 2×2 plug
//! of conductivity 2 directly above it at z=2.

use darcy_algo::assembly::{assemble_dense, assemble_sparse, sparse_from_dense, DenseSystem};
use darcy_algo::relaxation::{mean_squared, residuals};
use darcy_algo::{DarcySolver, SolverConfig};
use darcy_core::solver::{FaerSolver, LinearSystemBackend};
use darcy_core::Volume;

fn scenario_volume() -> Volume {
    Volume::from_fn([4, 4, 4], |x, y, z| {
        let inside = (1..3).contains(&x) && (1..3).contains(&y);
        match (inside, z) {
            (true, 1) => 0.0,
            (true, 2) => 2.0,
            _ => 1.0,
        }
    })
}

/// Stencil applied with plain bounds checks, independent of the crate's
/// neighbour table.
fn reference_dense(volume: &Volume) -> (Vec<Vec<f32>>, Vec<f32>) {
    let [w, h, d] = volume.shape();
    let n = volume.len();
    let mut a = vec![vec![0.0f32; n]; n];
    let mut b = vec![0.0f32; n];
    let offsets: [(i64, i64, i64); 6] = [
        (-1, 0, 0),
        (1, 0, 0),
        (0, -1, 0),
        (0, 1, 0),
        (0, 0, -1),
        (0, 0, 1),
    ];
    for x in 0..w {
        for y in 0..h {
            for z in 0..d {
                let i = volume.flat_index(x, y, z);
                let c = volume.get(x, y, z);
                if c == 0.0 {
                    a[i][i] = 1.0;
                    continue;
                }
                let mut total = 0.0f32;
                if z == 0 {
                    total += 2.0 * c;
                    b[i] = -2.0 * c;
                } else if z == d - 1 {
                    total += 2.0 * c;
                }
                for (dx, dy, dz) in offsets {
                    let (nx, ny, nz) = (x as i64 + dx, y as i64 + dy, z as i64 + dz);
                    if nx < 0 || ny < 0 || nz < 0 || nx >= w as i64 || ny >= h as i64 || nz >= d as i64 {
                        continue;
                    }
                    let (nx, ny, nz) = (nx as usize, ny as usize, nz as usize);
                    let nc = volume.get(nx, ny, nz);
                    if nc == 0.0 {
                        continue;
                    }
                    let face = (2.0 / (1.0 / c as f64 + 1.0 / nc as f64)) as f32;
                    total += face;
                    a[i][volume.flat_index(nx, ny, nz)] = face;
                }
                a[i][i] = -total;
            }
        }
    }
    (a, b)
}

/// Condensed layout read straight off the reference dense system.
fn reference_sparse(a: &[Vec<f32>], b: &[f32]) -> (Vec<f32>, Vec<usize>, Vec<usize>, Vec<f32>) {
    let n = b.len();
    let mut nulls = vec![0usize; n];
    let mut count = 0;
    for i in 0..n {
        if a[i][i] > 0.0 {
            count += 1;
        }
        nulls[i] = count;
    }
    let (mut val, mut col, mut ptr, mut rhs) = (vec![], vec![], vec![], vec![]);
    for i in 0..n {
        if a[i][i] > 0.0 {
            continue;
        }
        ptr.push(val.len());
        for j in 0..n {
            if a[i][j] != 0.0 {
                val.push(a[i][j]);
                col.push(j - nulls[j]);
            }
        }
        rhs.push(b[i]);
    }
    (val, col, ptr, rhs)
}

#[test]
fn dense_assembly_matches_reference() {
    let volume = scenario_volume();
    let DenseSystem { matrix, rhs } = assemble_dense(&volume).unwrap();
    let (a, b) = reference_dense(&volume);
    assert_eq!(matrix, a);
    assert_eq!(rhs, b);

    // Hand-checked rows
    assert_eq!(matrix[0][0], -5.0);
    assert_eq!(rhs[0], -2.0);
    let hole = volume.flat_index(1, 1, 1);
    assert_eq!(matrix[hole][hole], 1.0);
    assert_eq!(matrix[hole].iter().sum::<f32>(), 1.0);
    let plug = volume.flat_index(2, 2, 2);
    assert!((matrix[plug][plug] + 8.0).abs() < 1e-5);
}

#[test]
fn sparse_assembly_matches_reference() {
    let volume = scenario_volume();
    let system = assemble_sparse(&volume).unwrap();
    let (a, b) = reference_dense(&volume);
    let (val, col, ptr, rhs) = reference_sparse(&a, &b);

    assert_eq!(system.size(), 60);
    assert_eq!(system.matrix.shape(), (60, 60));
    assert_eq!(system.matrix.column_indices(), col.as_slice());
    assert_eq!(system.matrix.row_starts(), ptr.as_slice());
    assert_eq!(system.rhs, rhs);
    for (k, (&actual, &expected)) in system.matrix.values().iter().zip(&val).enumerate() {
        assert!(
            (actual - expected).abs() <= 1e-6 * expected.abs(),
            "value {k}: {actual} vs {expected}"
        );
    }

    // Corner voxel (0, 0, 0): +z, +y, +x neighbours then the diagonal
    assert_eq!(system.matrix.row_iter(0).collect::<Vec<_>>(), vec![
        (0, -5.0),
        (1, 1.0),
        (4, 1.0),
        (16, 1.0),
    ]);

    // Plug voxel (2, 2, 2) sits at condensed row 42 - 4 = 38
    let third = 4.0f32 / 3.0;
    let plug: Vec<(usize, f32)> = system.matrix.row_iter(38).collect();
    let expected = [(24, 2.0), (35, 2.0), (38, -8.0), (39, third), (42, third), (54, third)];
    assert_eq!(plug.len(), expected.len());
    for ((c, v), (ec, ev)) in plug.into_iter().zip(expected) {
        assert_eq!(c, ec);
        assert!((v - ev).abs() < 1e-5, "column {c}: {v} vs {ev}");
    }
}

#[test]
fn dense_to_sparse_conversion_matches_direct_assembly() {
    let volume = scenario_volume();
    let direct = assemble_sparse(&volume).unwrap();
    let converted = sparse_from_dense(&assemble_dense(&volume).unwrap()).unwrap();
    assert_eq!(converted.matrix.values(), direct.matrix.values());
    assert_eq!(converted.matrix.column_indices(), direct.matrix.column_indices());
    assert_eq!(converted.matrix.row_starts(), direct.matrix.row_starts());
    assert_eq!(converted.rhs, direct.rhs);
    assert_eq!(converted.index.nulls_count(), direct.index.nulls_count());
}

#[test]
fn relaxation_converges_with_default_settings() {
    let system = assemble_sparse(&scenario_volume()).unwrap();
    let solution = DarcySolver::new()
        .solve(&system.matrix, &system.rhs, None)
        .unwrap();

    assert!(solution.converged);
    assert!(solution.iterations < 5000);
    let r = residuals(&system.matrix, &system.rhs, &solution.values);
    assert_eq!(mean_squared(&r), solution.error);
    assert!(solution.error <= 1e-7);
}

#[test]
fn relaxation_matches_exact_dense_solution() {
    let volume = scenario_volume();
    let dense = assemble_dense(&volume).unwrap();
    let exact = FaerSolver.solve(&dense.matrix, &dense.rhs).unwrap();

    let system = assemble_sparse(&volume).unwrap();
    let config = SolverConfig::default()
        .with_target_error(1e-10)
        .with_max_iterations(20_000);
    let solution = DarcySolver::with_config(config)
        .solve(&system.matrix, &system.rhs, None)
        .unwrap();
    let pressure = system.index.expand(&solution.values, 0.0).unwrap();

    for (raw, (&p, &e)) in pressure.iter().zip(&exact).enumerate() {
        if volume.is_solid(raw) {
            assert_eq!(p, 0.0);
            assert!(e.abs() < 1e-12);
            continue;
        }
        assert!(
            (p as f64 - e).abs() <= 2e-4 * e.abs(),
            "voxel {:?}: {p} vs {e}",
            volume.coords(raw)
        );
    }

    // Default settings land within the residual-implied bound
    let coarse = DarcySolver::new()
        .solve(&system.matrix, &system.rhs, None)
        .unwrap();
    let coarse = system.index.expand(&coarse.values, 0.0).unwrap();
    for (&p, &e) in coarse.iter().zip(&exact) {
        assert!((p as f64 - e).abs() < 5e-3);
    }
}
