use glint_gpu::prelude::*;

/// Below this many samples the temporal moments are too young to be trusted
/// and variance gets estimated spatially instead.
const MIN_TEMPORAL_SAMPLES: f32 = 4.0;

const SPATIAL_RADIUS: i32 = 3;

/// Returns variance of the accumulated signal's luminance, in `.x`.
pub fn main(
    global_id: UVec2,
    params: &VariancePassParams,
    surfaces: SurfaceMap,
    colors: Tex,
    moments: Tex,
) -> Vec4 {
    let screen_pos = global_id;
    let surface = surfaces.get(screen_pos);

    if surface.is_sky() {
        return Vec4::ZERO;
    }

    let center_moments = Moments::deserialize(moments.read(screen_pos));

    let variance = if center_moments.sample_count >= MIN_TEMPORAL_SAMPLES {
        center_moments.variance()
    } else {
        let variance = estimate_spatially(
            params, surfaces, colors, moments, screen_pos, surface,
        );

        variance * MIN_TEMPORAL_SAMPLES / center_moments.sample_count.max(1.0)
    };

    vec4(variance.max(params.variance_floor), 0.0, 0.0, 0.0)
}

fn estimate_spatially(
    params: &VariancePassParams,
    surfaces: SurfaceMap,
    colors: Tex,
    moments: Tex,
    screen_pos: UVec2,
    surface: Surface,
) -> f32 {
    let edge = EdgeStopping {
        depth_phi: params.depth_phi,
        normal_phi: params.normal_phi,
        luma_phi: params.luma_phi,
        roughness_phi: 0.0,
    };

    let center_luma = colors.read(screen_pos).xyz().luma();

    let mut sum_weights = 0.0;
    let mut sum_m1 = 0.0;
    let mut sum_m2 = 0.0;

    for dy in -SPATIAL_RADIUS..=SPATIAL_RADIUS {
        for dx in -SPATIAL_RADIUS..=SPATIAL_RADIUS {
            let sample_pos = screen_pos.as_ivec2() + ivec2(dx, dy);

            if !colors.contains(sample_pos) {
                continue;
            }

            let sample_pos = sample_pos.as_uvec2();
            let sample_surface = surfaces.get(sample_pos);

            if sample_surface.is_sky() {
                continue;
            }

            let sample_luma = colors.read(sample_pos).xyz().luma();
            let sample_moments = Moments::deserialize(moments.read(sample_pos));

            let weight = edge.surface(&surface, &sample_surface)
                * edge.luma(center_luma, sample_luma, 1.0);

            sum_weights += weight;
            sum_m1 += weight * sample_moments.m1;
            sum_m2 += weight * sample_moments.m2;
        }
    }

    if sum_weights <= GLINT_EPSILON {
        return 0.0;
    }

    let m1 = sum_m1 / sum_weights;
    let m2 = sum_m2 / sum_weights;

    (m2 - m1 * m1).max(0.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::test_utils::{surface, TestTex};

    const SIZE: UVec2 = UVec2::new(8, 8);

    fn params() -> VariancePassParams {
        VariancePassParams {
            variance_floor: 0.0005,
            depth_phi: 2.0,
            normal_phi: 50.0,
            luma_phi: 10.0,
        }
    }

    fn run(colors: &TestTex, moments: &TestTex) -> f32 {
        let surfaces = TestTex::surfaces(SIZE, |_| surface(1.0));

        main(
            uvec2(4, 4),
            &params(),
            surfaces.surface_map(),
            colors.tex(),
            moments.tex(),
        )
        .x
    }

    #[test]
    fn temporal() {
        let colors = TestTex::filled(SIZE, Vec4::splat(1.0));

        let moments = TestTex::filled(
            SIZE,
            Moments {
                sample_count: 8.0,
                m1: 2.0,
                m2: 5.0,
            }
            .serialize(),
        );

        assert_relative_eq!(run(&colors, &moments), 1.0);
    }

    #[test]
    fn floor() {
        let colors = TestTex::filled(SIZE, Vec4::splat(1.0));
        let moments = TestTex::filled(SIZE, Moments::first(1.0).serialize());

        assert_relative_eq!(run(&colors, &moments), 0.0005);
    }

    #[test]
    fn spatial() {
        // Checkerboard of 0.9 and 1.1 gives a variance of 0.01, boosted 4x
        // since each pixel has seen a single sample so far
        let luma = |pos: UVec2| {
            if (pos.x + pos.y) % 2 == 0 {
                0.9
            } else {
                1.1
            }
        };

        let colors = TestTex::new(SIZE, |pos| Vec4::splat(luma(pos)));
        let moments =
            TestTex::new(SIZE, |pos| Moments::first(luma(pos)).serialize());

        let actual = run(&colors, &moments);

        assert!(actual > 0.0005);
        assert!(actual < 0.04 + 1e-4);
    }

    #[test]
    fn sky() {
        let surfaces = TestTex::surfaces(SIZE, |_| surface(0.0));
        let colors = TestTex::filled(SIZE, Vec4::splat(1.0));
        let moments = TestTex::filled(SIZE, Moments::first(1.0).serialize());

        let actual = main(
            uvec2(1, 1),
            &params(),
            surfaces.surface_map(),
            colors.tex(),
            moments.tex(),
        );

        assert_eq!(Vec4::ZERO, actual);
    }
}
