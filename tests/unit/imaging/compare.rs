//! Tests for match scores, pixel deltas and normalization

#[cfg(test)]
mod tests {
    use ravensolve::imaging::BinaryImage;
    use ravensolve::imaging::compare::{
        images_equal, match_rate, match_score, normalize, pixel_count_delta,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // Tests exact score is intersection over union
    // Verified by dividing by the first image's count instead
    #[test]
    fn test_exact_score_is_iou() {
        let a = BinaryImage::from_ascii(&["##..", "...."]);
        let b = BinaryImage::from_ascii(&[".##.", "...."]);

        assert!(close(match_score(&a, &b, None), 1.0 / 3.0));
        assert!(close(match_score(&a, &a, None), 1.0));
    }

    // Tests two blank images match perfectly in both modes
    // Verified by returning 0 for empty unions
    #[test]
    fn test_blank_images_score_one() {
        let a = BinaryImage::blank(4, 4);

        assert!(close(match_score(&a, &a, None), 1.0));
        assert!(close(match_score(&a, &a, Some(2)), 1.0));
    }

    // Tests fuzzy matching tolerates small shifts but not large ones
    // Verified by ignoring the radius
    #[test]
    fn test_fuzzy_score_tolerates_shift() {
        let a = BinaryImage::from_ascii(&["#.......", "........"]);
        let near = BinaryImage::from_ascii(&["..#.....", "........"]);
        let far = BinaryImage::from_ascii(&[".......#", "........"]);

        assert!(close(match_score(&a, &near, None), 0.0));
        assert!(close(match_score(&a, &near, Some(2)), 1.0));
        assert!(close(match_score(&a, &far, Some(2)), 0.0));
    }

    // Tests pixel count delta sign
    // Verified by subtracting in the other direction
    #[test]
    fn test_pixel_count_delta_direction() {
        let small = BinaryImage::from_ascii(&["#...", "...."]);
        let large = BinaryImage::from_ascii(&["###.", "...."]);

        assert_eq!(pixel_count_delta(&small, &large), 2);
        assert_eq!(pixel_count_delta(&large, &small), -2);
    }

    // Tests match rate is relative to the first image
    // Verified by dividing by the union
    #[test]
    fn test_match_rate_relative_to_first() {
        let a = BinaryImage::from_ascii(&["##..", "...."]);
        let b = BinaryImage::from_ascii(&["####", "...."]);
        let blank = BinaryImage::blank(4, 2);

        assert!(close(match_rate(&a, &b), 1.0));
        assert!(close(match_rate(&b, &a), 0.5));
        assert!(close(match_rate(&blank, &blank), 1.0));
        assert!(close(match_rate(&blank, &a), 0.0));
    }

    // Tests normalization resamples to the first image
    // Verified by resampling to the largest image
    #[test]
    fn test_normalize_uses_first_dimensions() {
        let images = vec![
            BinaryImage::blank(4, 4),
            BinaryImage::blank(8, 8),
            BinaryImage::blank(2, 6),
        ];

        let normalized = normalize(&images);
        assert_eq!(normalized.len(), 3);
        assert!(normalized.iter().all(|image| image.dimensions() == (4, 4)));
        assert!(normalize(&[]).is_empty());
    }

    // Tests equality includes dimensions
    // Verified by comparing bits only
    #[test]
    fn test_images_equal_checks_dimensions() {
        let a = BinaryImage::blank(2, 3);
        let b = BinaryImage::blank(3, 2);

        assert!(images_equal(&a, &a.clone()));
        assert!(!images_equal(&a, &b));
    }
}
