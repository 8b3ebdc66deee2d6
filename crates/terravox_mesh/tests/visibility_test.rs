//! # Visibility Tests
//!
//! Verifies face emission against hand-built height grids and that the
//! merged mesh size follows the face count on generated terrain.

use terravox_mesh::{Face, MeshMerger, MeshStats, Vec3, VoxelMesher};
use terravox_procedural::{GridDimensions, HeightGrid, HeightmapGenerator, SeedOffset};

/// Test: Flat 3x3 grid gives 9 tops and only the 12 boundary sides.
#[test]
fn test_flat_grid_emits_boundary_only() {
    let grid = HeightGrid::flat(GridDimensions::new(3, 3).expect("positive"), 0);
    let faces = VoxelMesher::default().mesh(&grid);
    let stats = MeshStats::from_faces(&faces);

    assert_eq!(stats.top, 9);
    assert_eq!(stats.side_faces(), 12);
    assert_eq!(faces.len(), 21);
}

/// Test: Heights [0, 0, 2] expose the wall between cells 1 and 2 only.
#[test]
fn test_two_step_wall_is_emitted() {
    let grid = HeightGrid::from_heights(3, 1, vec![0, 0, 2]).expect("valid grid");

    let cell0: Vec<Face> = VoxelMesher::visible_faces(&grid, 0, 0).collect();
    let cell1: Vec<Face> = VoxelMesher::visible_faces(&grid, 1, 0).collect();
    let cell2: Vec<Face> = VoxelMesher::visible_faces(&grid, 2, 0).collect();

    // Between 0 and 1: equal heights, nothing
    assert!(!cell0.contains(&Face::PosX));
    assert!(!cell1.contains(&Face::NegX));

    // Between 1 and 2: difference of 2, cell 1 shows its +X wall
    assert!(cell1.contains(&Face::PosX));
    // The tall column looks down on a drop and shows its -X wall as well
    assert!(cell2.contains(&Face::NegX));

    // Grid boundary on every side
    assert!(cell0.contains(&Face::NegX));
    assert!(cell2.contains(&Face::PosX));
    for cell in [&cell0, &cell1, &cell2] {
        assert!(cell.contains(&Face::PosZ));
        assert!(cell.contains(&Face::NegZ));
        assert_eq!(cell.iter().filter(|&&f| f == Face::Top).count(), 1);
    }

    // The same faces come out of the full mesh: 3 tops + 10 sides
    let stats = MeshStats::from_faces(&VoxelMesher::default().mesh(&grid));
    assert_eq!(stats.top, 3);
    assert_eq!(stats.side_faces(), 10);
}

/// Test: A +1 step hides the lower column's wall, but +2 does not.
#[test]
fn test_step_tolerance() {
    let mesher = VoxelMesher::new(1.0);

    let one_step = HeightGrid::from_heights(2, 1, vec![3, 4]).expect("valid grid");
    let stats = MeshStats::from_faces(&mesher.mesh(&one_step));
    // cell 0: no +X; cell 1: -X (drop of 1 from 4 to 3)
    assert_eq!(stats.pos_x, 1); // boundary of cell 1 only
    assert_eq!(stats.neg_x, 2); // boundary of cell 0 + drop on cell 1

    let two_step = HeightGrid::from_heights(2, 1, vec![3, 5]).expect("valid grid");
    let stats = MeshStats::from_faces(&mesher.mesh(&two_step));
    assert_eq!(stats.pos_x, 2);
    assert_eq!(stats.neg_x, 2);
}

/// Test: Boundary columns always show their outward face, whatever the height.
#[test]
fn test_boundary_faces_always_emitted() {
    let heights: Vec<u32> = (0..8 * 6).map(|i| (i * 13 % 7) as u32).collect();
    let grid = HeightGrid::from_heights(8, 6, heights).expect("valid grid");

    for z in 0..grid.depth() {
        for x in 0..grid.width() {
            let faces: Vec<Face> = VoxelMesher::visible_faces(&grid, x, z).collect();
            if x == 0 {
                assert!(faces.contains(&Face::NegX), "({x}, {z}) missing -X");
            }
            if x == grid.width() - 1 {
                assert!(faces.contains(&Face::PosX), "({x}, {z}) missing +X");
            }
            if z == 0 {
                assert!(faces.contains(&Face::NegZ), "({x}, {z}) missing -Z");
            }
            if z == grid.depth() - 1 {
                assert!(faces.contains(&Face::PosZ), "({x}, {z}) missing +Z");
            }
        }
    }
}

/// Test: Generated terrain has one top per cell and 4 vertices per face.
#[test]
fn test_generated_terrain_counts() {
    let dims = GridDimensions::new(48, 32).expect("positive");
    let grid = HeightmapGenerator::default().generate_grid(dims, SeedOffset::new(64.0));

    let faces = VoxelMesher::default().mesh(&grid);
    let stats = MeshStats::from_faces(&faces);
    let mesh = MeshMerger::merge(&faces);

    assert_eq!(stats.top, 48 * 32);
    assert!(stats.side_faces() >= 2 * (48 + 32));
    assert_eq!(mesh.vertex_count(), 4 * faces.len());
    assert_eq!(mesh.triangle_count(), 2 * faces.len());
    assert_eq!(mesh.face_count(), faces.len());

    for vertex in mesh.vertices() {
        let p = Vec3::from_array(vertex.position);
        assert!(mesh.bounds().contains(p));
        assert!(mesh.bounding_sphere().contains(p));
        assert!((0.0..=1.0).contains(&vertex.uv[0]));
        assert!((0.0..=1.0).contains(&vertex.uv[1]));
    }
    assert!(mesh
        .indices()
        .iter()
        .all(|&i| (i as usize) < mesh.vertex_count()));
}

/// Test: Tall columns' tops sit at `h * cell + cell / 2`.
#[test]
fn test_top_face_height() {
    let grid = HeightGrid::from_heights(2, 2, vec![0, 1, 2, 5]).expect("valid grid");
    let faces = VoxelMesher::default().mesh(&grid);
    let top_ys: Vec<f32> = faces
        .iter()
        .filter(|f| f.face == Face::Top)
        .map(|f| f.center().y)
        .collect();

    assert_eq!(top_ys, vec![50.0, 150.0, 250.0, 550.0]);
}

/// Test: Terrain that dips below zero keeps its walls.
///
/// Side faces are counted from the signed levels directly and must match
/// what the mesher emits for the shifted grid.
#[test]
fn test_negative_terrain_keeps_walls() {
    let dims = GridDimensions::new(128, 128).expect("positive dimensions");
    let grid = HeightmapGenerator::default().generate_grid(dims, SeedOffset::new(25.25));
    assert!(grid.base() < 0, "offset 25.25 dips below zero");

    let level = |x: i64, z: i64| -> Option<i64> {
        let x = usize::try_from(x).ok()?;
        let z = usize::try_from(z).ok()?;
        (x < grid.width() && z < grid.depth()).then(|| grid.level(x, z))
    };

    let mut expected_sides = 0;
    for z in 0..128_i64 {
        for x in 0..128_i64 {
            let h = level(x, z).expect("in grid");
            for (dx, dz) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                match level(x + dx, z + dz) {
                    Some(n) if n == h || n == h + 1 => {}
                    _ => expected_sides += 1,
                }
            }
        }
    }

    let stats = MeshStats::from_faces(&VoxelMesher::default().mesh(&grid));
    assert_eq!(stats.top, 128 * 128);
    assert_eq!(stats.side_faces(), expected_sides);
}

/// Test: Two sunken columns two levels apart get a wall between them.
#[test]
fn test_sunken_step_of_two_is_walled() {
    // Signed levels -3 and -1 after the shift
    let grid = HeightGrid::from_heights(2, 1, vec![0, 2]).expect("valid grid");
    let low: Vec<Face> = VoxelMesher::visible_faces(&grid, 0, 0).collect();

    assert!(low.contains(&Face::PosX));
}
