#[cfg(test)]
mod _tests_affine_transform {
    use super::super::affine_transform::AffineTransform;
    use crate::errors::RowlandError;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};
    use std::f64::consts::PI;

    #[test]
    fn test_identity_transformation() {
        let transform = AffineTransform::identity();
        let point = Vector3::new(3.0, 4.0, 5.0);

        assert_eq!(transform.apply_to_point(&point), point);
        assert!(transform.is_identity());
        assert_eq!(AffineTransform::default(), transform);
    }

    #[test]
    fn test_translation() {
        let transform = AffineTransform::translation(Vector3::new(2.0, 3.0, -1.0));
        let point = Vector3::new(1.0, 1.0, 1.0);

        assert_eq!(transform.apply_to_point(&point), Vector3::new(3.0, 4.0, 0.0));
        // Directions are not translated
        assert_eq!(transform.apply_to_vector(&point), point);
        assert!(!transform.is_identity());
    }

    #[test]
    fn test_axis_angle_rotation() {
        // 90 degrees about +z maps x onto y
        let transform = AffineTransform::from_axis_angle(Vector3::z(), PI / 2.0).unwrap();
        let rotated = transform.apply_to_point(&Vector3::x());

        assert_abs_diff_eq!(rotated, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_axis_angle_negative_axis() {
        // Rotating about -z is rotating the other way round
        let transform = AffineTransform::from_axis_angle(-Vector3::z(), PI / 2.0).unwrap();
        let rotated = transform.apply_to_point(&Vector3::x());

        assert_abs_diff_eq!(rotated, -Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_axis_angle_rejects_zero_axis() {
        let result = AffineTransform::from_axis_angle(Vector3::zeros(), 1.0);
        assert!(matches!(result, Err(RowlandError::MalformedInput(_))));
    }

    #[test]
    fn test_compose_order() {
        // zoom -> rotate -> translate
        let rotation = *AffineTransform::from_axis_angle(Vector3::z(), PI / 2.0)
            .unwrap()
            .matrix();
        let rotation: Matrix3<f64> = rotation.fixed_view::<3, 3>(0, 0).into();
        let transform =
            AffineTransform::compose(Vector3::new(1.0, 0.0, 0.0), rotation, 2.0).unwrap();

        let mapped = transform.apply_to_point(&Vector3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(mapped, Vector3::new(1.0, 2.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(transform.zoom(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(transform.rotation_matrix(), rotation, epsilon = 1e-12);
    }

    #[test]
    fn test_compose_rejects_bad_input() {
        let shear = Matrix3::new(1.0, 0.5, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        assert!(AffineTransform::compose(Vector3::zeros(), shear, 1.0).is_err());

        let mirror = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, -1.0));
        assert!(AffineTransform::compose(Vector3::zeros(), mirror, 1.0).is_err());

        assert!(AffineTransform::compose(Vector3::zeros(), Matrix3::identity(), 0.0).is_err());
        assert!(AffineTransform::compose(Vector3::zeros(), Matrix3::identity(), -1.0).is_err());
    }

    #[test]
    fn test_from_matrix_validation() {
        let mut matrix = Matrix4::identity();
        matrix[(0, 3)] = 5.0;
        let transform = AffineTransform::from_matrix(matrix).unwrap();
        assert_abs_diff_eq!(transform.translation_vector(), Vector3::new(5.0, 0.0, 0.0));

        // Projective last row is not an affine pose
        let mut projective = Matrix4::identity();
        projective[(3, 0)] = 1.0;
        assert!(AffineTransform::from_matrix(projective).is_err());

        // Non-uniform scale is rejected
        let squashed = Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 2.0, 1.0));
        assert!(AffineTransform::from_matrix(squashed).is_err());

        // Uniform scale is accepted
        let zoomed = Matrix4::new_scaling(3.0);
        let zoomed = AffineTransform::from_matrix(zoomed).unwrap();
        assert_abs_diff_eq!(zoomed.zoom(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_deserialize_validates_pose() {
        let pose = AffineTransform::compose(
            Vector3::new(1.0, -2.0, 3.0),
            AffineTransform::from_axis_angle(Vector3::z(), 0.4)
                .unwrap()
                .rotation_matrix(),
            2.0,
        )
        .unwrap();
        let json = serde_json::to_string(&pose).unwrap();
        let back: AffineTransform = serde_json::from_str(&json).unwrap();
        assert_abs_diff_eq!(*back.matrix(), *pose.matrix(), epsilon = 1e-12);

        // Stretching one axis only is not a rigid pose with zoom
        let stretched = Matrix4::from_diagonal(&Vector4::new(2.0, 1.0, 1.0, 1.0));
        let json = serde_json::to_string(&stretched).unwrap();
        assert!(serde_json::from_str::<AffineTransform>(&json).is_err());
    }

    #[test]
    fn test_inverse_transformation() {
        let rotation = AffineTransform::from_axis_angle(Vector3::new(1.0, 2.0, 3.0), 0.7).unwrap();
        let transform = rotation
            .then(&AffineTransform::translation(Vector3::new(-2.0, 0.5, 4.0)));
        let zoomed = AffineTransform::compose(
            transform.translation_vector(),
            transform.rotation_matrix(),
            1.5,
        )
        .unwrap();

        for t in [&transform, &zoomed] {
            let point = Vector3::new(0.3, -1.2, 2.5);
            let back = t.apply_inverse_to_point(&t.apply_to_point(&point));
            assert_abs_diff_eq!(back, point, epsilon = 1e-12);

            let product = t.matrix() * t.inverse().matrix();
            assert_abs_diff_eq!(product, Matrix4::identity(), epsilon = 1e-12);

            let vector = Vector3::new(1.0, 0.0, -1.0);
            let back = t.apply_inverse_to_vector(&t.apply_to_vector(&vector));
            assert_abs_diff_eq!(back, vector, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_composition_is_matrix_product() {
        let a = AffineTransform::from_axis_angle(Vector3::y(), 0.3).unwrap();
        let b = AffineTransform::translation(Vector3::new(1.0, 2.0, 3.0));
        let point = Vector3::new(0.5, 0.5, 0.5);

        // a.then(b) applies a first
        let ab = a.then(&b);
        let expected = b.apply_to_point(&a.apply_to_point(&point));
        assert_abs_diff_eq!(ab.apply_to_point(&point), expected, epsilon = 1e-12);

        // b * a also applies a first
        let product = &b * &a;
        assert_abs_diff_eq!(product.matrix(), ab.matrix(), epsilon = 1e-12);
        assert_abs_diff_eq!((b * a).matrix(), ab.matrix(), epsilon = 1e-12);
    }
}
