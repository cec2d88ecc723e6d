use crate::range::PickerRange;

const MAX_LABEL_DECIMALS: usize = 6;

/// Number of decimals needed to show `x` exactly, up to six.
pub fn decimals_of(x: f64) -> usize {
    if !x.is_finite() {
        return 0;
    }
    let mut scaled = x.abs();
    for decimals in 0..MAX_LABEL_DECIMALS {
        if (scaled - scaled.round()).abs() < 1e-9 * scaled.max(1.0) {
            return decimals;
        }
        scaled *= 10.0;
    }
    MAX_LABEL_DECIMALS
}

/// Decimals shared by every tick label of `range`.
///
/// Derived from `min` and `step` so values like `0.30000000000000004` render
/// as `0.3`.
pub fn label_decimals(range: &PickerRange) -> usize {
    decimals_of(range.min()).max(decimals_of(range.step()))
}

/// Render a tick label: the value with `decimals` places, then the suffix.
pub fn format_tick_label(value: f64, decimals: usize, suffix: &str) -> String {
    // Avoid "-0" for values that round to zero.
    let value = if value == 0.0 { 0.0 } else { value };
    let number = format!("{value:.decimals$}");
    let number = if number.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        number.trim_start_matches('-').to_string()
    } else {
        number
    };
    if suffix.is_empty() {
        number
    } else {
        format!("{number} {suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_decimals() {
        assert_eq!(decimals_of(5.0), 0);
        assert_eq!(decimals_of(0.5), 1);
        assert_eq!(decimals_of(0.1), 1);
        assert_eq!(decimals_of(0.25), 2);
        assert_eq!(decimals_of(-1.125), 3);
        assert_eq!(decimals_of(1.0 / 3.0), 6);
        assert_eq!(decimals_of(f64::NAN), 0);
    }

    #[test]
    fn labels_hide_float_noise() {
        let range = PickerRange::new(0.0, 1.0, 0.1).unwrap();
        let decimals = label_decimals(&range);
        assert_eq!(format_tick_label(range.value_at(3), decimals, "%"), "0.3 %");
        assert_eq!(format_tick_label(range.value_at(0), decimals, ""), "0.0");
    }

    #[test]
    fn labels_append_suffix() {
        assert_eq!(format_tick_label(60.0, 0, "db"), "60 db");
        assert_eq!(format_tick_label(2000.0, 0, "ms"), "2000 ms");
        assert_eq!(format_tick_label(-0.0001, 2, ""), "0.00");
    }
}
