use cloth_core::error::ClothError;
use cloth_core::solver::ClothSolver;
use glam::Vec3;

#[test]
fn test_particle_count_and_layout() {
    // 2x2 segments -> 3x3 = 9 particles, spacing 0.5 on both axes.
    let solver = ClothSolver::new(2, 2, 1.0, 1.0).unwrap();

    assert_eq!(solver.particle_count(), 9);

    // Top-left corner: x = (0 - 1) * 0.5, y = (1 - 0) * 0.5.
    assert_eq!(solver.positions()[0], Vec3::new(-0.5, 0.5, 0.0));
    // Center of the grid sits at the origin.
    assert_eq!(solver.positions()[solver.index_of(1, 1)], Vec3::ZERO);
    // Bottom-right corner.
    assert_eq!(
        solver.positions()[solver.index_of(2, 2)],
        Vec3::new(0.5, -0.5, 0.0)
    );

    // Everything is flat in z at rest.
    for (i, p) in solver.positions().iter().enumerate() {
        assert_eq!(p.z, 0.0, "particle {i} should start at z = 0");
    }
}

#[test]
fn test_zero_initial_velocity() {
    let solver = ClothSolver::new(4, 3, 2.0, 1.5).unwrap();
    for i in 0..solver.particle_count() {
        assert_eq!(
            solver.particles.position[i], solver.particles.previous[i],
            "particle {i} should start with position == previous"
        );
    }
}

#[test]
fn test_top_row_pinned_only() {
    let solver = ClothSolver::new(3, 2, 1.0, 1.0).unwrap();
    for i in 0..solver.particle_count() {
        let expected = i <= 3; // row 0 is indices 0..=segments_x
        assert_eq!(
            solver.is_pinned(i),
            expected,
            "pinned flag wrong for particle {i}"
        );
    }
    // Out-of-range queries are not pinned.
    assert!(!solver.is_pinned(solver.particle_count()));
}

#[test]
fn test_constraint_count_formula() {
    // For w x h segments:
    // horizontal: (h+1)*w, vertical: (w+1)*h, shear: 2*w*h.
    let solver = ClothSolver::new(2, 2, 1.0, 1.0).unwrap();
    assert_eq!(solver.constraint_count(), 3 * 2 + 3 * 2 + 2 * 4);

    let solver = ClothSolver::new(4, 3, 1.0, 1.0).unwrap();
    assert_eq!(solver.constraint_count(), 4 * 4 + 5 * 3 + 2 * 12);
}

#[test]
fn test_constraint_rest_lengths() {
    let solver = ClothSolver::new(2, 2, 1.0, 1.0).unwrap();
    let diagonal = (0.5_f32 * 0.5 + 0.5 * 0.5).sqrt();

    // First cell, construction order: right, down, down-right.
    let c = &solver.constraints()[0];
    assert_eq!((c.a, c.b), (0, 1));
    assert_eq!(c.rest_length, 0.5);

    let c = &solver.constraints()[1];
    assert_eq!((c.a, c.b), (0, 3));
    assert_eq!(c.rest_length, 0.5);

    let c = &solver.constraints()[2];
    assert_eq!((c.a, c.b), (0, 4));
    assert!((c.rest_length - diagonal).abs() < 1e-7);
}

#[test]
fn test_invalid_segments_rejected() {
    assert_eq!(
        ClothSolver::new(0, 2, 1.0, 1.0).err(),
        Some(ClothError::InvalidSegments {
            segments_x: 0,
            segments_y: 2
        })
    );
    assert_eq!(
        ClothSolver::new(3, 0, 1.0, 1.0).err(),
        Some(ClothError::InvalidSegments {
            segments_x: 3,
            segments_y: 0
        })
    );
}

#[test]
fn test_invalid_extent_rejected() {
    assert!(matches!(
        ClothSolver::new(2, 2, 0.0, 1.0),
        Err(ClothError::InvalidExtent { .. })
    ));
    assert!(matches!(
        ClothSolver::new(2, 2, 1.0, -3.0),
        Err(ClothError::InvalidExtent { .. })
    ));
    assert!(matches!(
        ClothSolver::new(2, 2, f32::NAN, 1.0),
        Err(ClothError::InvalidExtent { .. })
    ));
}

#[test]
fn test_reset_restores_rest_layout_exactly() {
    let mut solver = ClothSolver::new(5, 8, 3.0, 5.0).unwrap();
    let rest: Vec<Vec3> = solver.positions().to_vec();

    for _ in 0..60 {
        solver.step(0.016);
    }

    solver.reset();
    for i in 0..solver.particle_count() {
        assert_eq!(
            solver.positions()[i], rest[i],
            "reset should restore particle {i} bit-exactly"
        );
        assert_eq!(
            solver.particles.previous[i], rest[i],
            "reset should zero implicit velocity of particle {i}"
        );
    }
}

#[test]
fn test_reset_keeps_constraints_and_pins() {
    let mut solver = ClothSolver::new(3, 3, 1.0, 1.0).unwrap();
    let constraint_count = solver.constraint_count();

    for _ in 0..10 {
        solver.step(0.016);
    }
    solver.reset();

    assert_eq!(solver.constraint_count(), constraint_count);
    for i in 0..=3 {
        assert!(solver.is_pinned(i), "top row should stay pinned after reset");
    }
}

#[test]
fn test_positions_flat_view() {
    let solver = ClothSolver::new(2, 2, 1.0, 1.0).unwrap();
    let flat = solver.positions_flat();

    assert_eq!(flat.len(), solver.particle_count() * 3);
    for (i, p) in solver.positions().iter().enumerate() {
        assert_eq!(flat[i * 3], p.x);
        assert_eq!(flat[i * 3 + 1], p.y);
        assert_eq!(flat[i * 3 + 2], p.z);
    }
}
