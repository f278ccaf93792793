//! Integer helpers

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

pub fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    a / gcd(a, b) * b
}

/// Twice the signed area of a closed polygon (shoelace formula).
///
/// The last vertex connects back to the first.
pub fn shoelace2(vertices: &[(i64, i64)]) -> i64 {
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(&(x1, y1), &(x2, y2))| x1 * y2 - x2 * y1)
        .sum()
}

/// Number of interior lattice points of a simple lattice polygon, from
/// Pick's theorem `A = i + b/2 - 1`.
pub fn interior_points(vertices: &[(i64, i64)], boundary: i64) -> i64 {
    (shoelace2(vertices).abs() - boundary + 2) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lcm_of_cycle_lengths() {
        assert_eq!(lcm(4, 6), 12);
        assert_eq!([2u64, 3, 4].into_iter().fold(1, lcm), 12);
        assert_eq!(lcm(0, 5), 0);
    }

    #[test]
    fn test_square_polygon() {
        let square = [(0, 0), (4, 0), (4, 4), (0, 4)];
        assert_eq!(shoelace2(&square), 32);
        // 3x3 interior points inside a 4x4 square, 16 boundary points
        assert_eq!(interior_points(&square, 16), 9);
    }

    proptest! {
        #[test]
        fn prop_gcd_divides_both(a in 1u64..10_000, b in 1u64..10_000) {
            let g = gcd(a, b);
            prop_assert_eq!(a % g, 0);
            prop_assert_eq!(b % g, 0);
            prop_assert_eq!(lcm(a, b) * g, a * b);
        }
    }
}
