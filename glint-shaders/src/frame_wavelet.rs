use glint_gpu::prelude::*;

/// Runs one à-trous iteration; returns the filtered color and its variance
/// (in `.x`), which feed the next iteration.
pub fn main(
    global_id: UVec2,
    params: &WaveletPassParams,
    surfaces: SurfaceMap,
    colors: Tex,
    variances: Tex,
) -> [Vec4; 2] {
    let screen_pos = global_id;
    let center_surface = surfaces.get(screen_pos);
    let center_color = colors.read(screen_pos);
    let center_var = variances.read(screen_pos).x;

    if center_surface.is_sky() {
        return [center_color, vec4(center_var, 0.0, 0.0, 0.0)];
    }

    let center_luma = center_color.xyz().luma();
    let center_var_avg = eval_prefiltered_variance(variances, screen_pos);

    let edge = EdgeStopping {
        depth_phi: params.depth_phi,
        normal_phi: params.normal_phi,
        luma_phi: params.luma_phi,
        roughness_phi: if params.roughness_dependent() {
            params.roughness_phi
        } else {
            0.0
        },
    };

    let jitter = if params.dither() {
        let mut noise = Noise::new(params.seed, screen_pos);

        ((noise.sample_vec2() - 0.5) * (params.stride as f32) * 0.33)
            .as_ivec2()
    } else {
        IVec2::ZERO
    };

    // -------------------------------------------------------------------------

    let center_weight = wavelet_kernel(IVec2::ZERO);

    let mut sum_weights = center_weight;
    let mut sum_color = center_color * center_weight;
    let mut sum_var = center_weight * center_weight * center_var;

    for dy in -1..=1 {
        for dx in -1..=1 {
            let sample_offset = ivec2(dx, dy);

            if sample_offset == IVec2::ZERO {
                continue;
            }

            let sample_pos = screen_pos.as_ivec2()
                + sample_offset * (params.stride as i32)
                + jitter;

            if !colors.contains(sample_pos) {
                continue;
            }

            let sample_pos = sample_pos.as_uvec2();
            let sample_surface = surfaces.get(sample_pos);

            if sample_surface.is_sky() {
                continue;
            }

            let sample_color = colors.read(sample_pos);
            let sample_var = variances.read(sample_pos).x;

            let sample_luma = sample_color.xyz().luma();

            let sample_weight = wavelet_kernel(sample_offset)
                * edge.surface(&center_surface, &sample_surface)
                * edge.luma(center_luma, sample_luma, center_var_avg)
                * edge.roughness(
                    center_surface.roughness,
                    sample_surface.roughness,
                );

            if sample_weight.is_nan()
                || sample_weight <= 0.0
                || !sample_color.is_finite()
            {
                continue;
            }

            sum_weights += sample_weight;
            sum_color += sample_color * sample_weight;
            sum_var += sample_weight * sample_weight * sample_var;
        }
    }

    if sum_weights <= GLINT_EPSILON {
        return [center_color, vec4(center_var, 0.0, 0.0, 0.0)];
    }

    [
        sum_color / sum_weights,
        vec4(sum_var / (sum_weights * sum_weights), 0.0, 0.0, 0.0),
    ]
}

/// Returns variance blurred with a 3x3 gaussian, which makes the luminance
/// edge-stopping function less sensitive to noise in the variance itself.
fn eval_prefiltered_variance(variances: Tex, screen_pos: UVec2) -> f32 {
    let mut sum = 0.0;
    let mut sum_weights = 0.0;

    for dy in -1..=1 {
        for dx in -1..=1 {
            let sample_offset = ivec2(dx, dy);
            let sample_pos = screen_pos.as_ivec2() + sample_offset;

            if variances.contains(sample_pos) {
                let sample_weight = wavelet_kernel(sample_offset);

                sum += variances.read(sample_pos.as_uvec2()).x * sample_weight;
                sum_weights += sample_weight;
            }
        }
    }

    sum / sum_weights
}
