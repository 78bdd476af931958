use glint_gpu::prelude::*;

pub fn main(global_id: UVec2, gbuffer_d0: Tex, gbuffer_d1: Tex) -> Vec4 {
    let entry = GBufferEntry::unpack([
        gbuffer_d0.read(global_id),
        gbuffer_d1.read(global_id),
    ]);

    entry.surface().serialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTex;

    #[test]
    fn packs_surface() {
        let size = uvec2(2, 1);

        let entry = GBufferEntry {
            normal: vec3(0.0, 0.0, 3.0),
            depth: 2.5,
            roughness: 0.25,
            velocity: vec2(0.1, 0.2),
        };

        let [d0, d1] = entry.pack();
        let d0 = TestTex::filled(size, d0);
        let d1 = TestTex::filled(size, d1);

        let surface =
            Surface::deserialize(main(uvec2(1, 0), d0.tex(), d1.tex()));

        assert_eq!(Vec3::Z, surface.normal);
        assert_eq!(2.5, surface.depth);
        assert_eq!(0.25, surface.roughness);
    }
}
