/// Sixteen compass points, clockwise from north.
pub const DIRECTIONS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Compass label for a bearing in degrees. Any finite input wraps onto the
/// compass; NaN and infinities give an empty label.
pub fn label_for(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return "";
    }
    let index = ((degrees + 11.25) / 22.5).rem_euclid(16.0).floor() as usize;
    DIRECTIONS.get(index).copied().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_points() {
        assert_eq!(label_for(0.0), "N");
        assert_eq!(label_for(90.0), "E");
        assert_eq!(label_for(180.0), "S");
        assert_eq!(label_for(270.0), "W");
    }

    #[test]
    fn boundaries_between_points() {
        assert_eq!(label_for(11.24), "N");
        assert_eq!(label_for(11.25), "NNE");
        assert_eq!(label_for(348.75), "N");
        assert_eq!(label_for(348.74), "NNW");
        assert_eq!(label_for(208.0), "SSW");
    }

    #[test]
    fn wraps_full_turns() {
        let mut d = -720.0;
        while d <= 720.0 {
            assert_eq!(label_for(d), label_for(d + 360.0), "degrees {d}");
            d += 7.5;
        }
    }

    #[test]
    fn negative_bearing_wraps() {
        assert_eq!(label_for(-90.0), "W");
        assert_eq!(label_for(-11.0), "N");
        assert_eq!(label_for(450.0), "E");
    }

    #[test]
    fn non_finite_is_empty() {
        assert_eq!(label_for(f64::NAN), "");
        assert_eq!(label_for(f64::INFINITY), "");
    }
}
