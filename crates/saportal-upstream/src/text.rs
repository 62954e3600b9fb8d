//! Small formatting helpers shared by the normalizers.

/// Capitalises the first letter of every alphabetic run and lowercases the
/// rest: `"light rain"` becomes `"Light Rain"`, `"SKY IS CLEAR"` becomes
/// `"Sky Is Clear"`.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Rounds half away from zero to a whole number.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_whole(value: f64) -> i64 {
    value.round() as i64
}

/// Rounds to one decimal place.
#[must_use]
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Converts metres per second to km/h, one decimal place.
#[must_use]
pub fn ms_to_kmh(speed: f64) -> f64 {
    round_tenth(speed * 3.6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_capitalises_each_word() {
        assert_eq!(title_case("light rain"), "Light Rain");
        assert_eq!(title_case("SKY IS CLEAR"), "Sky Is Clear");
        assert_eq!(title_case("broken-clouds"), "Broken-Clouds");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn round_whole_goes_half_away_from_zero() {
        assert_eq!(round_whole(21.5), 22);
        assert_eq!(round_whole(21.49), 21);
        assert_eq!(round_whole(-0.5), -1);
    }

    #[test]
    fn wind_speed_is_converted_to_kmh() {
        assert!((ms_to_kmh(4.12) - 14.8).abs() < f64::EPSILON);
        assert!((ms_to_kmh(0.0)).abs() < f64::EPSILON);
    }
}
