//! Property-based invariant tests for the picker engine.
//!
//! 1. value → offset → value round-trips for every tick.
//! 2. Larger values map to smaller offsets, and vice versa.
//! 3. Any offset maps to a tick inside `[min, max]`.
//! 4. Rubber-banding scales overshoot by exactly 0.55 and never reaches the raw offset.
//! 5. Settles from within five ticks of a bound converge in at most 200 frames.
//! 6. Emitted drag values stay in range however far the pointer overshoots.

use proptest::prelude::*;
use ruler_picker::config::{RUBBER_BAND_FACTOR, TICK_HEIGHT};
use ruler_picker::elastic::rubber_band;
use ruler_picker::{Geometry, OffsetMapper, PickerEngine, PickerRange, SpringSettler};

// ── Helpers ─────────────────────────────────────────────────────────────

fn ranges() -> impl Strategy<Value = PickerRange> {
    (-500i32..500, 0u32..400, prop::sample::select(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]))
        .prop_map(|(min, span_steps, step)| {
            let min = f64::from(min);
            let max = min + f64::from(span_steps) * step;
            PickerRange::new(min, max, step).expect("valid range")
        })
}

fn mapper(range: PickerRange, height: f64) -> OffsetMapper {
    OffsetMapper::new(range, Geometry::default(), height)
}

fn heights() -> impl Strategy<Value = f64> {
    100.0f64..2000.0
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_tick_round_trips(range in ranges(), height in heights()) {
        let mapper = mapper(range, height);
        for value in range.items() {
            let offset = mapper.value_to_offset(value);
            prop_assert_eq!(mapper.offset_to_value(offset), value);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Monotonicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn value_to_offset_is_strictly_decreasing(range in ranges(), height in heights()) {
        let mapper = mapper(range, height);
        let offsets: Vec<f64> = range.items().map(|v| mapper.value_to_offset(v)).collect();
        for pair in offsets.windows(2) {
            prop_assert!(pair[0] > pair[1], "{} !> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn offset_to_value_is_non_increasing(
        range in ranges(),
        height in heights(),
        a in -100_000.0f64..100_000.0,
        b in -100_000.0f64..100_000.0,
    ) {
        let mapper = mapper(range, height);
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(mapper.offset_to_value(low) >= mapper.offset_to_value(high));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Bounded output
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn any_offset_maps_to_a_tick_in_range(
        range in ranges(),
        height in heights(),
        offset in prop_oneof![
            -1e12f64..1e12,
            Just(f64::INFINITY),
            Just(f64::NEG_INFINITY),
            Just(f64::NAN),
        ],
    ) {
        let value = mapper(range, height).offset_to_value(offset);
        prop_assert!(!value.is_nan());
        prop_assert!(value >= range.min() && value <= range.max());
        prop_assert!(range.items().any(|item| item == value));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Rubber-band bound
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn overshoot_is_scaled_by_the_band_factor(
        range in ranges(),
        height in heights(),
        overshoot in 0.001f64..1e7,
    ) {
        let bounds = mapper(range, height).bounds();

        let above = bounds.max + overshoot;
        let shown = rubber_band(above, bounds);
        prop_assert!((shown - bounds.max - overshoot * RUBBER_BAND_FACTOR).abs() < 1e-6 * overshoot.max(1.0));
        prop_assert!(shown > bounds.max && shown < above);

        let below = bounds.min - overshoot;
        let shown = rubber_band(below, bounds);
        prop_assert!((bounds.min - shown - overshoot * RUBBER_BAND_FACTOR).abs() < 1e-6 * overshoot.max(1.0));
        prop_assert!(shown < bounds.min && shown > below);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Convergence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn settles_within_two_hundred_frames(
        target in -5_000.0f64..5_000.0,
        overshoot in -5.0 * TICK_HEIGHT..5.0 * TICK_HEIGHT,
    ) {
        let mut settler = SpringSettler::new(target + overshoot, target);
        let mut now = 0.0;
        let mut settled = false;
        for _ in 0..200 {
            if settler.step(now).is_settled() {
                settled = true;
                break;
            }
            now += 16.0;
        }
        prop_assert!(settled, "no convergence from overshoot {}", overshoot);
        prop_assert_eq!(settler.current(), target);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Drag hard-clamp
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drag_values_stay_in_range(
        range in ranges(),
        start_index in 0usize..400,
        moves in proptest::collection::vec(-5_000.0f64..5_000.0, 1..40),
    ) {
        let start = range.value_at(start_index);
        let mut engine = PickerEngine::new(range, Geometry::default(), start);
        let bounds = engine.bounds();
        prop_assert!(engine.pointer_down(0.0));

        for y in moves {
            let value = engine.pointer_move(y).expect("dragging emits");
            prop_assert!(value >= range.min() && value <= range.max());

            let overscrolled = !bounds.contains(engine.offset());
            if overscrolled {
                // The list is stretched past the end whose value is being reported.
                let end = if engine.offset() > bounds.max { range.min() } else { range.value_at(range.last_index()) };
                prop_assert_eq!(value, end);
            }
        }
    }
}
