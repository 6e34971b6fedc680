use std::sync::Arc;

use proptest::prelude::*;
use vista_world::{HeightField, NoiseField, WorldGenParams};

fn field(seed: f64) -> HeightField {
    HeightField::new(seed, Arc::new(WorldGenParams::default()))
}

fn coord() -> impl Strategy<Value = f64> {
    -5_000.0f64..5_000.0
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Lattice noise stays (numerically) within the unit range
    #[test]
    fn noise3_is_bounded(seed in -1e6f64..1e6, x in -1e4f64..1e4, y in -1e4f64..1e4, z in -1e4f64..1e4) {
        let n = NoiseField::new(seed);
        let v = n.noise3(x, y, z);
        prop_assert!(v.is_finite());
        prop_assert!(v.abs() <= 1.05, "noise3 = {}", v);
    }

    // Octave noise is normalized by the amplitude sum
    #[test]
    fn octave_noise_is_bounded(
        seed in 0.0f64..1.0,
        x in coord(),
        y in coord(),
        octaves in 1u32..8,
        persistence in 0.1f64..0.9,
    ) {
        let n = NoiseField::new(seed);
        let v = n.octave_noise(x, y, octaves, persistence, 0.01);
        prop_assert!(v.is_finite());
        prop_assert!(v.abs() <= 1.05);
    }

    // Elevation is total and finite everywhere
    #[test]
    fn elevation_is_finite(seed in 0.0f64..1.0, x in coord(), z in coord()) {
        let mut hf = field(seed);
        prop_assert!(hf.elevation(x, z).is_finite());
    }

    // A point's elevation does not depend on what was queried before it
    #[test]
    fn elevation_independent_of_query_history(
        seed in 0.0f64..1.0,
        x in coord(),
        z in coord(),
        warmup in prop::collection::vec((coord(), coord()), 0..6),
    ) {
        let mut fresh = field(seed);
        let mut warmed = field(seed);
        for (wx, wz) in warmup {
            warmed.elevation(wx, wz);
        }
        prop_assert_eq!(fresh.elevation(x, z).to_bits(), warmed.elevation(x, z).to_bits());
    }

    // Overlapping ensure calls never add, drop or perturb a feature
    #[test]
    fn feature_generation_is_idempotent(
        seed in 0.0f64..1.0,
        cx in coord(),
        cz in coord(),
        r in 10.0f64..400.0,
        dx in -200.0f64..200.0,
        dz in -200.0f64..200.0,
    ) {
        let mut hf = field(seed);
        hf.ensure_features(cx, cz, r);
        let first: Vec<_> = hf.features().iter().map(|(k, f)| (*k, *f)).collect();
        hf.ensure_features(cx, cz, r);
        let again: Vec<_> = hf.features().iter().map(|(k, f)| (*k, *f)).collect();
        prop_assert_eq!(&first, &again);

        hf.ensure_features(cx + dx, cz + dz, r);
        for (k, f) in &first {
            prop_assert_eq!(hf.features().get(*k), Some(f));
        }
    }
}
