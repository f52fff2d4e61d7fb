//! Property-based tests for heightmap extraction and smoothing.
//!
//! Run with: cargo test -p mesh-heightmap -- proptest

use mesh_heightmap::{ExtractParams, Heightmap, RasterSample, extract_heightmap, smooth};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Generate a heightmap of random size with values in a bounded range.
fn arb_heightmap(max_side: usize) -> impl Strategy<Value = Heightmap> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(w, h)| {
        prop::collection::vec(-10.0..10.0f64, w * h)
            .prop_map(move |values| Heightmap::new(w, h, values).unwrap())
    })
}

/// Generate a grayscale raster as raw RGBA bytes.
fn arb_raster(max_side: u32) -> impl Strategy<Value = RasterSample> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(w, h)| {
        prop::collection::vec(any::<u8>(), (w * h) as usize).prop_map(move |grays| {
            let rgba = grays.iter().flat_map(|&c| [c, c, c, 255]).collect();
            RasterSample::from_rgba(w, h, rgba).unwrap()
        })
    })
}

// =============================================================================
// Property Tests: Smoothing
// =============================================================================

proptest! {
    /// Blurring never changes the grid shape.
    #[test]
    fn smooth_preserves_dimensions(hm in arb_heightmap(24), radius in 0usize..6) {
        let (w, h) = (hm.width(), hm.height());
        let out = smooth(hm, radius);
        prop_assert_eq!(out.width(), w);
        prop_assert_eq!(out.height(), h);
        prop_assert_eq!(out.len(), w * h);
    }

    /// Every output is a mean of inputs, so it stays inside the input range.
    #[test]
    fn smooth_is_bounded_by_input(hm in arb_heightmap(24), radius in 1usize..6) {
        let (lo, hi) = hm.min_max();
        let out = smooth(hm, radius);
        for &v in out.values() {
            prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9, "{} outside [{}, {}]", v, lo, hi);
        }
    }

    /// Radius zero is the identity.
    #[test]
    fn smooth_zero_radius_is_identity(hm in arb_heightmap(16)) {
        prop_assert_eq!(smooth(hm.clone(), 0), hm);
    }
}

// =============================================================================
// Property Tests: Normalization
// =============================================================================

proptest! {
    /// Extracted heights span exactly [0, 1], or are all zero when flat.
    #[test]
    fn extraction_spans_unit_interval(
        raster in arb_raster(20),
        gamma in 0.5..2.0f64,
        invert in any::<bool>(),
    ) {
        let params = ExtractParams::new(raster.width(), raster.height())
            .with_gamma(gamma)
            .with_invert(invert);
        let hm = extract_heightmap(&raster, &params).unwrap();
        let (lo, hi) = hm.min_max();

        prop_assert!(lo.abs() < 1e-12);
        if hi > 0.0 {
            prop_assert!((hi - 1.0).abs() < 1e-9, "max was {}", hi);
        } else {
            prop_assert!(hm.values().iter().all(|&v| v == 0.0));
        }
    }

    /// Extraction honours the requested grid regardless of source size.
    #[test]
    fn extraction_matches_requested_grid(
        raster in arb_raster(16),
        w in 1u32..32,
        h in 1u32..32,
    ) {
        let hm = extract_heightmap(&raster, &ExtractParams::new(w, h)).unwrap();
        prop_assert_eq!(hm.width(), w as usize);
        prop_assert_eq!(hm.height(), h as usize);
    }
}
