use glam::{vec2, Vec2};

/// Plastic number, the generalized golden ratio the R2 sequence is built on.
const PLASTIC_NUMBER: f32 = 1.324_717_957_244_746;

/// Starting point of the R2 sequence.
const R2_BASE: f32 = 1.112_775_684_278_705_5;

/// Returns `n`-th point of the R2 sequence, in range `<0.0, 1.0)²`.
///
/// See: <https://extremelearning.com.au/unreasonable-effectiveness-of-quasirandom-sequences/>.
pub fn r2(n: u32) -> Vec2 {
    let a1 = 1.0 / PLASTIC_NUMBER;
    let a2 = 1.0 / (PLASTIC_NUMBER * PLASTIC_NUMBER);
    let n = n as f32;

    vec2((R2_BASE + a1 * n).fract(), (R2_BASE + a2 * n).fract())
}

/// Returns `index`-th element of the Halton sequence with given base, in
/// range `<0.0, 1.0)`.
pub fn halton(mut index: u32, base: u32) -> f32 {
    let mut fraction = 1.0;
    let mut result = 0.0;

    while index > 0 {
        fraction /= base as f32;
        result += fraction * (index % base) as f32;
        index /= base;
    }

    result
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn halton_base_2() {
        let actual: Vec<_> = (1..=4).map(|i| halton(i, 2)).collect();

        assert_eq!(vec![0.5, 0.25, 0.75, 0.125], actual);
    }

    #[test]
    fn halton_base_3() {
        assert_relative_eq!(halton(1, 3), 1.0 / 3.0);
        assert_relative_eq!(halton(2, 3), 2.0 / 3.0);
        assert_relative_eq!(halton(3, 3), 1.0 / 9.0);
        assert_eq!(0.0, halton(0, 3));
    }

    #[test]
    fn r2_is_in_range() {
        for n in 0..1024 {
            let point = r2(n);

            assert!(point.x >= 0.0 && point.x < 1.0);
            assert!(point.y >= 0.0 && point.y < 1.0);
        }

        assert_relative_eq!(r2(0).x, 0.112_775_68, epsilon = 1e-5);
    }
}
