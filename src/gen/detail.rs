// Surface-projected detail ribbons (head cracks)

use glam::Vec3;

use crate::gen::bezier;
use crate::mesh::MeshData;

/// Thin crack ribbons drawn on the surface of an ellipsoid.
///
/// Each path is a cubic Bezier authored in object space. Sample points are
/// projected onto the ellipsoid `x^2/rx^2 + y^2/ry^2 + z^2/rz^2 = 1` by
/// dividing by the implicit-equation norm, then nudged outward along the
/// radial direction so the ribbon does not z-fight the head underneath.
/// Every path becomes a two-rail triangle strip.
pub fn surface_cracks(
    radii: [f32; 3],
    paths: &[[Vec3; 4]],
    thickness: f32,
    segments: u32,
    color: [f32; 3],
) -> MeshData {
    let mut mesh = MeshData::new();
    let [rx, ry, rz] = radii;
    let offset = 0.02;

    for path in paths {
        let start = mesh.base_index();

        for i in 0..=segments {
            let t = i as f32 / segments as f32;
            let p = bezier::point(path, t);

            // Scale onto the ellipsoid surface. A sample at the exact
            // center divides by zero and poisons the ribbon with NaNs;
            // callers author paths away from the origin.
            let norm = (p.x * p.x / (rx * rx) + p.y * p.y / (ry * ry) + p.z * p.z / (rz * rz))
                .sqrt();
            let s = p / norm;

            // Outward nudge along the radial direction.
            let out = 1.0 + offset / s.length();
            let n = s * out;

            let half = thickness * 0.01;
            mesh.push_vertex([n.x - half, n.y, n.z], color);
            mesh.push_vertex([n.x + half, n.y, n.z], color);
        }

        for i in 0..segments as u16 {
            let base = start + i * 2;
            mesh.push_triangle(base, base + 1, base + 2);
            mesh.push_triangle(base + 1, base + 3, base + 2);
        }
    }

    mesh.debug_validate();
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn zigzag() -> Vec<[Vec3; 4]> {
        vec![
            [
                Vec3::new(-0.5, 0.63, 1.02),
                Vec3::new(-0.52, 0.59, 1.06),
                Vec3::new(-0.48, 0.56, 1.10),
                Vec3::new(-0.42, 0.50, 1.14),
            ],
            [
                Vec3::new(-0.42, 0.50, 1.14),
                Vec3::new(-0.48, 0.47, 1.12),
                Vec3::new(-0.56, 0.43, 1.09),
                Vec3::new(-0.62, 0.38, 1.08),
            ],
        ]
    }

    #[test]
    fn ribbon_counts() {
        let mesh = surface_cracks([1.0, 0.9, 1.2], &zigzag(), 7.0, 30, [0.16, 0.10, 0.04]);
        // Two rails per sample, one strip per path.
        assert_eq!(mesh.vertices.len(), 2 * 2 * 31);
        assert_eq!(mesh.triangle_count(), 2 * 2 * 30);
        let n = mesh.vertices.len() as u16;
        assert!(mesh.faces.iter().all(|&i| i < n));
    }

    #[test]
    fn samples_sit_just_above_the_surface() {
        let radii = [1.0, 0.9, 1.2];
        let mesh = surface_cracks(radii, &zigzag(), 0.0, 12, [0.0; 3]);
        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            let q = x * x / (radii[0] * radii[0])
                + y * y / (radii[1] * radii[1])
                + z * z / (radii[2] * radii[2]);
            // Slightly outside the unit level set, never inside.
            assert!(q > 1.0);
            assert_relative_eq!(q.sqrt(), 1.0, epsilon = 0.05);
        }
    }
}
