use glint_gpu::prelude::*;

/// Neighbors less similar than this to the center pixel don't contribute to
/// the clamping box.
const MIN_CLAMP_SIMILARITY: f32 = 0.5;

/// Blends current signal with the reprojected history; returns the
/// accumulated color and moments.
pub fn main(
    global_id: UVec2,
    params: &TemporalPassParams,
    surfaces: SurfaceMap,
    reprojection_map: ReprojectionMap,
    signal: Tex,
    prev_colors: Tex,
    prev_moments: Tex,
) -> [Vec4; 2] {
    let screen_pos = global_id;
    let surface = surfaces.get(screen_pos);
    let reprojection = reprojection_map.get(screen_pos);
    let current = signal.read(screen_pos);
    let current_luma = current.xyz().luma();

    if surface.is_sky() || reprojection.is_none() {
        return [current, Moments::first(current_luma).serialize()];
    }

    // -------------------------------------------------------------------------

    let mut history = if params.catmull_rom() {
        CatmullRomFilter::reproject(reprojection, prev_colors)
    } else {
        BilinearFilter::reproject(reprojection, |pos| prev_colors.read(pos))
    };

    let history_moments = Moments::deserialize(BilinearFilter::reproject(
        reprojection,
        |pos| prev_moments.read(pos),
    ));

    if params.neighborhood_clamp() {
        history = eval_clamp(params, surfaces, signal, screen_pos, surface)
            .apply(history, params.clamp_intensity);
    }

    // ---

    let blend = TemporalBlend::new(
        params,
        history_moments.sample_count.max(0.0),
        surface.roughness,
    );

    let color = blend.apply(history, current, params.log_transform());
    let moments = history_moments.accumulate(current_luma, blend);

    [color, moments.serialize()]
}

fn eval_clamp(
    params: &TemporalPassParams,
    surfaces: SurfaceMap,
    signal: Tex,
    screen_pos: UVec2,
    surface: Surface,
) -> NeighborhoodClamp {
    let radius = params.clamp_radius as i32;
    let mut clamp = NeighborhoodClamp::new(signal.read(screen_pos));

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let sample_pos = screen_pos.as_ivec2() + ivec2(dx, dy);

            if (dx == 0 && dy == 0) || !signal.contains(sample_pos) {
                continue;
            }

            let sample_pos = sample_pos.as_uvec2();
            let sample_surface = surfaces.get(sample_pos);

            if surface.evaluate_similarity_to(&sample_surface)
                < MIN_CLAMP_SIMILARITY
            {
                continue;
            }

            clamp.add(signal.read(sample_pos));
        }
    }

    clamp
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::test_utils::{surface, TestTex};

    const SIZE: UVec2 = UVec2::new(4, 4);

    fn params() -> TemporalPassParams {
        TemporalPassParams {
            blend: 0.9,
            max_history: 32.0,
            clamp_intensity: 1.0,
            clamp_radius: 1,
            flags: 0,
        }
    }

    fn exact(screen_pos: UVec2) -> Vec4 {
        Reprojection {
            prev_x: screen_pos.x as f32,
            prev_y: screen_pos.y as f32,
            confidence: 1.0,
            validity: 0b0001,
        }
        .serialize()
    }

    struct Scene {
        surfaces: TestTex,
        reprojections: TestTex,
        signal: TestTex,
        prev_colors: TestTex,
        prev_moments: TestTex,
    }

    impl Scene {
        fn new(signal: f32, prev_color: f32, prev_sample_count: f32) -> Self {
            Self {
                surfaces: TestTex::surfaces(SIZE, |_| surface(1.0)),
                reprojections: TestTex::new(SIZE, exact),
                signal: TestTex::filled(SIZE, Vec4::splat(signal)),
                prev_colors: TestTex::filled(SIZE, Vec4::splat(prev_color)),
                prev_moments: TestTex::filled(
                    SIZE,
                    Moments {
                        sample_count: prev_sample_count,
                        m1: prev_color,
                        m2: prev_color * prev_color,
                    }
                    .serialize(),
                ),
            }
        }

        fn run(
            &self,
            params: &TemporalPassParams,
            screen_pos: UVec2,
        ) -> (Vec4, Moments) {
            let [color, moments] = main(
                screen_pos,
                params,
                self.surfaces.surface_map(),
                ReprojectionMap::new(self.reprojections.tex()),
                self.signal.tex(),
                self.prev_colors.tex(),
                self.prev_moments.tex(),
            );

            (color, Moments::deserialize(moments))
        }
    }

    #[test]
    fn without_history() {
        let mut scene = Scene::new(2.0, 1.0, 10.0);

        scene.reprojections =
            TestTex::filled(SIZE, Reprojection::none().serialize());

        let (color, moments) = scene.run(&params(), uvec2(1, 1));

        assert_eq!(Vec4::splat(2.0), color);
        assert_eq!(1.0, moments.sample_count);
        assert_relative_eq!(moments.m1, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn sky() {
        let mut scene = Scene::new(2.0, 1.0, 10.0);

        scene.surfaces = TestTex::surfaces(SIZE, |_| surface(-1.0));

        let (color, moments) = scene.run(&params(), uvec2(1, 1));

        assert_eq!(Vec4::splat(2.0), color);
        assert_eq!(1.0, moments.sample_count);
    }

    #[test]
    fn full_accumulation() {
        let scene = Scene::new(2.0, 1.0, 3.0);
        let (color, moments) = scene.run(&params(), uvec2(2, 1));

        assert_relative_eq!(color.x, 1.25);
        assert_relative_eq!(color.w, 1.25);
        assert_eq!(4.0, moments.sample_count);
    }

    #[test]
    fn constant_blend() {
        let params = TemporalPassParams {
            flags: TemporalPassParams::FLAG_CONSTANT_BLEND,
            ..params()
        };

        let scene = Scene::new(2.0, 1.0, 3.0);
        let (color, _) = scene.run(&params, uvec2(2, 1));

        assert_relative_eq!(color.x, 1.1, epsilon = 1e-6);
    }

    #[test]
    fn catmull_rom() {
        let params = TemporalPassParams {
            flags: TemporalPassParams::FLAG_CATMULL_ROM,
            ..params()
        };

        let scene = Scene::new(2.0, 1.0, 3.0);
        let (color, _) = scene.run(&params, uvec2(2, 1));

        assert_relative_eq!(color.x, 1.25);
    }

    #[test]
    fn neighborhood_clamp() {
        let params = TemporalPassParams {
            flags: TemporalPassParams::FLAG_NEIGHBORHOOD_CLAMP,
            ..params()
        };

        // History says 10.0, but everything around says 2.0, so history gets
        // clamped down to 2.0 first
        let scene = Scene::new(2.0, 10.0, 3.0);
        let (color, _) = scene.run(&params, uvec2(1, 1));

        assert_relative_eq!(color.x, 2.0);
        assert_relative_eq!(color.w, 8.0);

        let (color, _) = scene.run(&self::params(), uvec2(1, 1));

        assert_relative_eq!(color.x, 8.0);
    }
}
