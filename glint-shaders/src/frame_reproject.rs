use glint_gpu::prelude::*;

/// Previous positions closer than this to a texel center get snapped onto it,
/// so that static pixels read exactly one texel of history.
const SNAP_DISTANCE: f32 = 1e-3;

pub fn main(
    global_id: UVec2,
    params: &ReprojectionPassParams,
    curr_camera: &Camera,
    prev_camera: &Camera,
    curr_surfaces: SurfaceMap,
    prev_surfaces: SurfaceMap,
    velocities: Tex,
) -> Vec4 {
    let screen_pos = global_id;

    if !params.has_history() {
        return Reprojection::none().serialize();
    }

    let surface = curr_surfaces.get(screen_pos);

    if surface.is_sky() {
        return Reprojection::none().serialize();
    }

    let size = curr_surfaces.size().as_vec2();
    let uv = (screen_pos.as_vec2() + 0.5) / size;
    let velocity = if params.dilation() {
        eval_dilated_velocity(curr_surfaces, velocities, screen_pos)
    } else {
        velocities.read(screen_pos).xy()
    };

    let prev_uv = uv - velocity;

    if !prev_uv.is_finite()
        || prev_uv.x < 0.0
        || prev_uv.y < 0.0
        || prev_uv.x > 1.0
        || prev_uv.y > 1.0
    {
        return Reprojection::none().serialize();
    }

    let mut prev_pos = prev_uv * size - 0.5;

    if prev_pos.distance(prev_pos.round()) < SNAP_DISTANCE {
        prev_pos = prev_pos.round();
    }

    // ---

    let world_pos = curr_camera.ray(screen_pos).at(surface.depth);
    let expected_depth = prev_camera.origin.xyz().distance(world_pos);
    let prev_ray = prev_camera.uv_ray(prev_uv);

    let taps = Reprojection::taps(prev_pos);
    let tap_weights = Reprojection::tap_weights(prev_pos).to_array();

    let mut confidence = 0.0;
    let mut validity = 0;

    for (tap_idx, tap) in taps.into_iter().enumerate() {
        if tap_weights[tap_idx] <= 0.0 || !prev_surfaces.contains(tap) {
            continue;
        }

        let prev_surface = prev_surfaces.get(tap.as_uvec2());

        if prev_surface.is_sky() {
            continue;
        }

        if params.depth_distance > 0.0 {
            let max_diff = expected_depth.percent(params.depth_distance);

            if (prev_surface.depth - expected_depth).abs() > max_diff {
                continue;
            }
        }

        if params.world_distance > 0.0 {
            let max_diff = expected_depth.percent(params.world_distance);
            let prev_world_pos = prev_ray.at(prev_surface.depth);

            if prev_world_pos.distance(world_pos) > max_diff {
                continue;
            }
        }

        if prev_surface.normal.dot(surface.normal) < params.normal_similarity {
            continue;
        }

        confidence += tap_weights[tap_idx];
        validity |= 1 << tap_idx;
    }

    if confidence <= 0.0 {
        return Reprojection::none().serialize();
    }

    Reprojection {
        prev_x: prev_pos.x,
        prev_y: prev_pos.y,
        confidence,
        validity,
    }
    .serialize()
}

/// Returns velocity of the closest non-sky surface around given pixel.
fn eval_dilated_velocity(
    surfaces: SurfaceMap,
    velocities: Tex,
    screen_pos: UVec2,
) -> Vec2 {
    let mut closest_pos = screen_pos;
    let mut closest_depth = surfaces.get(screen_pos).depth;

    for dy in -1..=1 {
        for dx in -1..=1 {
            let sample_pos = screen_pos.as_ivec2() + ivec2(dx, dy);

            if !surfaces.contains(sample_pos) {
                continue;
            }

            let sample_pos = sample_pos.as_uvec2();
            let sample = surfaces.get(sample_pos);

            if !sample.is_sky() && sample.depth < closest_depth {
                closest_pos = sample_pos;
                closest_depth = sample.depth;
            }
        }
    }

    velocities.read(closest_pos).xy()
}
