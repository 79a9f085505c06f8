#[cfg(test)]
mod _tests_rowland_torus {
    use super::super::rowland_torus::RowlandTorus;
    use crate::errors::RowlandError;
    use crate::geometries::AffineTransform;
    use crate::interfaces::{DegenerateNormal, Frame};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::{Matrix3, Vector3};
    use std::f64::consts::PI;

    // Helper: arbitrary rotation + translation
    fn tilted_pose() -> AffineTransform {
        AffineTransform::from_axis_angle(Vector3::new(0.2, 1.0, -0.4), 0.9)
            .unwrap()
            .then(&AffineTransform::translation(Vector3::new(1.0, -2.0, 3.5)))
    }

    // Helper: R == r torus with the focal point at the origin, as used for spectrometers
    fn focal_torus() -> RowlandTorus {
        RowlandTorus::at_origin(5.0, 5.0).unwrap()
    }

    fn angle_grid() -> Vec<(f64, f64)> {
        let mut grid = Vec::new();
        for i in 0..7 {
            for j in 0..9 {
                grid.push((0.1 + i as f64 * 0.9, -0.3 + j as f64 * 0.75));
            }
        }
        grid
    }

    #[test]
    fn test_constructor_validation() {
        assert!(RowlandTorus::at_origin(0.0, 1.0).is_err());
        assert!(RowlandTorus::at_origin(-1.0, 1.0).is_err());
        assert!(RowlandTorus::at_origin(1.0, -0.1).is_err());
        assert!(RowlandTorus::at_origin(f64::NAN, 1.0).is_err());
        assert!(RowlandTorus::at_origin(1.0, 0.0).is_ok());

        let torus = RowlandTorus::new(3.0, 2.0, tilted_pose()).unwrap();
        assert_eq!(torus.major_radius(), 3.0);
        assert_eq!(torus.minor_radius(), 2.0);
        assert_eq!(torus.pose(), &tilted_pose());
    }

    #[test]
    fn test_from_position() {
        let torus = RowlandTorus::from_position(
            3.0,
            1.0,
            Vector3::new(0.0, 0.0, 10.0),
            Matrix3::identity(),
            1.0,
        )
        .unwrap();
        // Outer equator point shifted by the position
        assert_abs_diff_eq!(
            torus.quartic(&Vector3::new(4.0, 0.0, 10.0), Frame::Global),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_quartic_sign() {
        let torus = RowlandTorus::at_origin(10.0, 3.0).unwrap();
        // Centre of the tube is inside
        assert!(torus.quartic(&Vector3::new(10.0, 0.0, 0.0), Frame::Local) < 0.0);
        // Far away and on the symmetry axis is outside
        assert!(torus.quartic(&Vector3::new(100.0, 0.0, 0.0), Frame::Local) > 0.0);
        assert!(torus.quartic(&Vector3::new(0.0, 0.0, 0.0), Frame::Local) > 0.0);
        // Surface
        assert_eq!(torus.quartic(&Vector3::new(13.0, 0.0, 0.0), Frame::Local), 0.0);
        assert_eq!(torus.quartic(&Vector3::new(0.0, 0.0, -7.0), Frame::Local), 0.0);
    }

    #[test]
    fn test_quartic_global_frame() {
        let pose = tilted_pose();
        let torus = RowlandTorus::new(10.0, 3.0, pose.clone()).unwrap();
        let local = Vector3::new(0.0, 3.0, 10.0);
        let global = pose.apply_to_point(&local);

        assert_abs_diff_eq!(torus.quartic(&global, Frame::Global), 0.0, epsilon = 1e-8);
        assert_eq!(
            torus.quartic(&local, Frame::Local),
            torus.quartic(&global, Frame::Global).round()
        );

        let tube_centre = torus.to_global(&Vector3::new(10.0, 0.0, 0.0));
        let values = torus.quartic_many(&[global, tube_centre], Frame::Global);
        assert_eq!(values.len(), 2);
        assert_relative_eq!(values[1], -3519.0, epsilon = 1e-6);
    }

    #[test]
    fn test_parametric_points_are_on_surface() {
        let tori = [
            RowlandTorus::new(10.0, 3.0, tilted_pose()).unwrap(),
            RowlandTorus::new(5.0, 5.0, tilted_pose()).unwrap(),
            RowlandTorus::new(4.0, 0.0, tilted_pose()).unwrap(),
            RowlandTorus::at_origin(1e4, 5e3).unwrap(),
        ];
        for torus in &tori {
            let r4 = torus.major_radius().powi(4);
            for (theta, phi) in angle_grid() {
                let point = torus.parametric(theta, phi);
                let q = torus.quartic(&point, Frame::Global) / r4;
                assert_abs_diff_eq!(q, 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_sample_surface() {
        let torus = RowlandTorus::new(10.0, 3.0, tilted_pose()).unwrap();
        let points = torus.sample_surface(8, 12);
        assert_eq!(points.len(), 96);
        assert_abs_diff_eq!(points[0], torus.parametric(0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(points[1], torus.parametric(0.0, PI / 6.0), epsilon = 1e-12);
        for q in torus.quartic_many(&points, Frame::Global) {
            assert_abs_diff_eq!(q / 1e4, 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_normal_is_outward_unit_vector() {
        let pose = tilted_pose();
        let rotation = pose.rotation_matrix();
        let torus = RowlandTorus::new(10.0, 3.0, pose).unwrap();

        for (theta, phi) in angle_grid() {
            let point = torus.parametric(theta, phi);
            let normal = torus.normal(&point, DegenerateNormal::Fail).unwrap();

            // Analytic outward normal of a torus in the local frame
            let expected = rotation
                * Vector3::new(theta.cos() * phi.cos(), theta.sin(), theta.cos() * phi.sin());
            assert_relative_eq!(normal.norm(), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(normal, expected, epsilon = 1e-9);

            // Points away from the tube centre
            let tube_centre = torus
                .pose()
                .apply_to_point(&Vector3::new(10.0 * phi.cos(), 0.0, 10.0 * phi.sin()));
            assert!(normal.dot(&(point - tube_centre)) > 0.0);
        }
    }

    #[test]
    fn test_normal_with_zoomed_pose_is_unit() {
        let pose = AffineTransform::compose(
            Vector3::new(0.0, 1.0, 0.0),
            Matrix3::identity(),
            2.5,
        )
        .unwrap();
        let torus = RowlandTorus::new(4.0, 1.0, pose).unwrap();
        let point = torus.parametric(0.4, 1.3);
        let normal = torus.normal(&point, DegenerateNormal::default()).unwrap();
        assert_relative_eq!(normal.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normal_requires_point_on_surface() {
        let torus = RowlandTorus::at_origin(10.0, 3.0).unwrap();
        let result = torus.normal(&Vector3::new(10.0, 0.0, 0.0), DegenerateNormal::default());
        assert!(matches!(result, Err(RowlandError::NotOnSurface { .. })));

        // Tiny numerical noise is tolerated
        let result = torus.normal(&Vector3::new(13.0 + 1e-12, 0.0, 0.0), DegenerateNormal::Fail);
        assert_abs_diff_eq!(result.unwrap(), Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn test_normal_at_degenerate_centre() {
        let pose = tilted_pose();
        let rotation = pose.rotation_matrix();
        let centre = pose.translation_vector();
        let torus = RowlandTorus::new(5.0, 5.0, pose).unwrap();

        let result = torus.normal(&centre, DegenerateNormal::Fail);
        assert!(matches!(result, Err(RowlandError::AmbiguousNormal { .. })));

        let fixed = DegenerateNormal::UseFixedDirection(Vector3::new(0.0, 0.0, 2.0));
        let normal = torus.normal(&centre, fixed).unwrap();
        assert_abs_diff_eq!(normal, rotation * Vector3::z(), epsilon = 1e-12);

        // Default points back along the optical axis
        let normal = torus.normal(&centre, DegenerateNormal::default()).unwrap();
        assert_abs_diff_eq!(normal, rotation * -Vector3::x(), epsilon = 1e-12);

        let zero = DegenerateNormal::UseFixedDirection(Vector3::zeros());
        assert!(matches!(
            torus.normal(&centre, zero),
            Err(RowlandError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_degenerate_direction_ignored_for_regular_points() {
        let torus = RowlandTorus::at_origin(5.0, 5.0).unwrap();
        let point = Vector3::new(10.0, 0.0, 0.0);
        let normal = torus.normal(&point, DegenerateNormal::Fail).unwrap();
        assert_abs_diff_eq!(normal, Vector3::x(), epsilon = 1e-12);

        let normals = torus
            .normals(&[point, Vector3::zeros()], DegenerateNormal::default())
            .unwrap();
        assert_abs_diff_eq!(normals[1], -Vector3::x(), epsilon = 1e-12);
        assert!(torus
            .normals(&[point, Vector3::zeros()], DegenerateNormal::Fail)
            .is_err());
    }

    #[test]
    fn test_solve_quartic_picks_bracketed_root() {
        // Along y = 3, z = 0 the roots are x = ±1 and x = ±9
        let torus = focal_torus();
        let x = torus
            .solve_quartic(None, Some(3.0), Some(0.0), [5.0, 15.0], Frame::Local)
            .unwrap();
        assert_abs_diff_eq!(x, 9.0, epsilon = 1e-10);

        let x = torus
            .solve_quartic(None, Some(3.0), Some(0.0), [0.5, 5.0], Frame::Local)
            .unwrap();
        assert_abs_diff_eq!(x, 1.0, epsilon = 1e-10);

        let x = torus
            .solve_quartic(None, Some(3.0), Some(0.0), [-15.0, -5.0], Frame::Local)
            .unwrap();
        assert_abs_diff_eq!(x, -9.0, epsilon = 1e-10);
    }

    #[test]
    fn test_solve_quartic_other_axes() {
        let torus = RowlandTorus::at_origin(10.0, 3.0).unwrap();
        let y = torus
            .solve_quartic(Some(10.0), None, Some(0.0), [0.0, 5.0], Frame::Local)
            .unwrap();
        assert_abs_diff_eq!(y, 3.0, epsilon = 1e-10);

        let z = torus
            .solve_quartic(Some(0.0), Some(0.0), None, [10.0, 20.0], Frame::Local)
            .unwrap();
        assert_abs_diff_eq!(z, 13.0, epsilon = 1e-10);
    }

    #[test]
    fn test_solve_quartic_in_global_frame() {
        let pose = AffineTransform::translation(Vector3::new(100.0, 0.0, 0.0));
        let torus = RowlandTorus::new(5.0, 5.0, pose).unwrap();
        let x = torus
            .solve_quartic(None, Some(3.0), Some(0.0), [105.0, 115.0], Frame::Global)
            .unwrap();
        assert_abs_diff_eq!(x, 109.0, epsilon = 1e-9);
    }

    #[test]
    fn test_solve_quartic_no_intersection() {
        let torus = focal_torus();
        // Entirely outside the tube
        let result = torus.solve_quartic(None, Some(3.0), Some(0.0), [20.0, 30.0], Frame::Local);
        assert_eq!(result, Err(RowlandError::NoIntersection { min: 20.0, max: 30.0 }));

        // Two roots in the interval: no sign change
        let result = torus.solve_quartic(None, Some(3.0), Some(0.0), [0.5, 15.0], Frame::Local);
        assert!(matches!(result, Err(RowlandError::NoIntersection { .. })));
        assert!(result.unwrap_err().is_no_intersection());
    }

    #[test]
    fn test_solve_quartic_malformed_requests() {
        let torus = focal_torus();
        let two_free = torus.solve_quartic(None, None, Some(0.0), [5.0, 15.0], Frame::Local);
        assert!(matches!(two_free, Err(RowlandError::MalformedInput(_))));

        let none_free =
            torus.solve_quartic(Some(1.0), Some(1.0), Some(0.0), [5.0, 15.0], Frame::Local);
        assert!(matches!(none_free, Err(RowlandError::MalformedInput(_))));

        let empty = torus.solve_quartic(None, Some(3.0), Some(0.0), [5.0, 5.0], Frame::Local);
        assert!(matches!(empty, Err(RowlandError::MalformedInput(_))));

        let nan = torus.solve_quartic(None, Some(f64::NAN), Some(0.0), [5.0, 15.0], Frame::Local);
        assert!(matches!(nan, Err(RowlandError::MalformedInput(_))));
    }

    #[test]
    fn test_xyz_from_radiusangle_round_trip() {
        let pose = AffineTransform::from_axis_angle(Vector3::y(), 0.3)
            .unwrap()
            .then(&AffineTransform::translation(Vector3::new(1.0, 2.0, 3.0)));
        let torus = RowlandTorus::new(5.0, 5.0, pose).unwrap();

        for &radius in &[0.5, 1.0, 2.0, 3.0] {
            for &angle in &[0.0, 0.7, 2.0, -1.2, 3.0] {
                let point = torus.xyz_from_radiusangle(radius, angle, [5.0, 15.0]).unwrap();
                assert_abs_diff_eq!(
                    torus.quartic(&point, Frame::Global) / 625.0,
                    0.0,
                    epsilon = 1e-10
                );

                let local = torus.to_local(&point);
                let recovered_radius = local.y.hypot(local.z);
                let recovered_angle = local.z.atan2(local.y);
                assert_abs_diff_eq!(recovered_radius, radius, epsilon = 1e-10);
                assert_abs_diff_eq!(recovered_angle, angle, epsilon = 1e-10);
                assert!(local.x > 5.0 && local.x < 15.0);
            }
        }
    }

    #[test]
    fn test_xyz_from_radiusangle_on_axis() {
        // Radius zero hits the far side of the torus on the optical axis
        let point = focal_torus()
            .xyz_from_radiusangle(0.0, 0.0, [5.0, 15.0])
            .unwrap();
        assert_abs_diff_eq!(point, Vector3::new(10.0, 0.0, 0.0), epsilon = 1e-10);
    }

    #[test]
    fn test_xyz_from_radiusangle_no_intersection() {
        let result = focal_torus().xyz_from_radiusangle(2.0, 0.3, [20.0, 30.0]);
        assert!(matches!(result, Err(RowlandError::NoIntersection { .. })));
    }
}
