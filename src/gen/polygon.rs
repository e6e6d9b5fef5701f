// Flat layered diamond shapes (wings, tail fins)

use crate::mesh::MeshData;

/// Color and proportion parameters shared by wings and fins.
#[derive(Clone, Debug)]
pub struct DiamondStyle {
    pub center_color: [f32; 3],
    pub mid_color: [f32; 3],
    pub edge_color: [f32; 3],
    /// Fraction of the half-extent given to the border band.
    pub border_width: f32,
    /// Duplicate everything at a mirrored depth with reversed winding so
    /// the membrane is visible from both sides.
    pub two_sided: bool,
}

impl Default for DiamondStyle {
    fn default() -> Self {
        Self {
            center_color: [0.6, 1.0, 0.6],
            mid_color: [0.4, 0.9, 0.4],
            edge_color: [0.8, 0.2, 0.2],
            border_width: 0.2,
            two_sided: false,
        }
    }
}

/// Wing membrane: an inner diamond (center vertex + four points) wrapped in
/// a border-colored outer diamond. The long point runs down (-Y), matching a
/// swept-back wing silhouette.
pub fn layered_diamond(size: f32, style: &DiamondStyle) -> MeshData {
    let mut mesh = MeshData::new();
    let bw = style.border_width;

    // Inner diamond, indices 0..=4.
    let inner = [
        [0.0, 0.0, 0.0],
        [0.0, size * (0.5 - bw), 0.0],
        [size * (0.5 - bw), 0.0, 0.0],
        [0.0, -size * (2.0 - bw * 2.0), 0.0],
        [-size * (0.5 - bw), 0.0, 0.0],
    ];
    mesh.push_vertex(inner[0], style.center_color);
    for p in &inner[1..] {
        mesh.push_vertex(*p, style.mid_color);
    }

    // Outer border ring, indices 5..=8.
    let outer = [
        [0.0, size / 2.0, 0.0],
        [size * 0.5, 0.0, 0.0],
        [0.0, -size * 2.0, 0.0],
        [-size * 0.5, 0.0, 0.0],
    ];
    for p in &outer {
        mesh.push_vertex(*p, style.edge_color);
    }

    // Membrane fan.
    for (b, c) in [(1, 2), (2, 3), (3, 4), (4, 1)] {
        mesh.push_triangle(0, b, c);
    }
    // Border band, one quad per side.
    for (i, o, o2, i2) in [(1, 5, 6, 2), (2, 6, 7, 3), (3, 7, 8, 4), (4, 8, 5, 1)] {
        mesh.push_triangle(i, o, o2);
        mesh.push_triangle(i, o2, i2);
    }

    if style.two_sided {
        add_back_face(&mut mesh, 0.001);
    }

    mesh.debug_validate();
    mesh
}

/// Fan of tail fins: `count` diamonds spread around the local origin,
/// rotated in the XY plane and pushed out along their own axis.
pub fn fin_fan(size: f32, count: u32, spread_deg: f32, separation: f32, style: &DiamondStyle) -> MeshData {
    let mut mesh = MeshData::new();
    let spread = crate::math::deg_to_rad(spread_deg);
    let half_w = size * 0.4;
    let half_h = size * 0.8;
    let inner_w = half_w * (1.0 - style.border_width);
    let inner_h = half_h * (1.0 - style.border_width);
    let z_eps = 0.02;

    for k in 0..count {
        // Angles run from -spread to +spread, fins pointing down.
        let f = if count == 1 { 0.5 } else { k as f32 / (count - 1) as f32 };
        let angle = -spread + 2.0 * spread * f;
        let (sin_a, cos_a) = angle.sin_cos();
        let rot = |x: f32, y: f32| [x * cos_a - y * sin_a, x * sin_a + y * cos_a];
        let [sx, sy] = rot(0.0, -separation);

        let base = mesh.base_index();

        // Inner diamond: center + 4 points.
        let inner = [
            (0.0, 0.0, style.center_color),
            (0.0, inner_h, style.mid_color),
            (inner_w, 0.0, style.mid_color),
            (0.0, -inner_h, style.mid_color),
            (-inner_w, 0.0, style.mid_color),
        ];
        for &(x, y, color) in &inner {
            let [xr, yr] = rot(x, y);
            mesh.push_vertex([xr + sx, yr + sy, z_eps], color);
        }
        // Outer border diamond, slightly behind.
        let outer = [(0.0, half_h), (half_w, 0.0), (0.0, -half_h), (-half_w, 0.0)];
        for &(x, y) in &outer {
            let [xr, yr] = rot(x, y);
            mesh.push_vertex([xr + sx, yr + sy, -z_eps], style.edge_color);
        }

        for (b, c) in [(1, 2), (2, 3), (3, 4), (4, 1)] {
            mesh.push_triangle(base, base + b, base + c);
        }
        for (i, o, o2, i2) in [(1, 5, 6, 2), (2, 6, 7, 3), (3, 7, 8, 4), (4, 8, 5, 1)] {
            mesh.push_triangle(base + i, base + o, base + o2);
            mesh.push_triangle(base + i, base + o2, base + i2);
        }
    }

    if style.two_sided {
        add_back_face(&mut mesh, 0.001);
    }

    mesh.debug_validate();
    mesh
}

/// Duplicate all vertices at mirrored depth (`z' = -z - gap`, keeping the
/// layer ordering and z-fight separation intact) and append the face list
/// with each triangle's last two indices swapped, reversing the winding so
/// the copy faces the other way.
fn add_back_face(mesh: &mut MeshData, gap: f32) {
    let base = mesh.base_index();
    for i in 0..base as usize {
        let v = mesh.vertices[i];
        mesh.push_vertex([v.position[0], v.position[1], -v.position[2] - gap], v.color);
    }
    let front_faces = mesh.faces.len();
    for f in (0..front_faces).step_by(3) {
        let (a, b, c) = (mesh.faces[f], mesh.faces[f + 1], mesh.faces[f + 2]);
        mesh.push_triangle(a + base, c + base, b + base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sided_topology() {
        let mesh = layered_diamond(2.1, &DiamondStyle::default());
        assert_eq!(mesh.vertices.len(), 9);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn two_sided_reverses_winding() {
        let style = DiamondStyle { two_sided: true, ..Default::default() };
        let mesh = layered_diamond(1.0, &style);
        assert_eq!(mesh.vertices.len(), 18);
        assert_eq!(mesh.triangle_count(), 24);

        let half = mesh.faces.len() / 2;
        let (front, back) = mesh.faces.split_at(half);
        for (f, b) in front.chunks(3).zip(back.chunks(3)) {
            // Same triangle shifted by the vertex count, last two swapped.
            assert_eq!(b[0], f[0] + 9);
            assert_eq!(b[1], f[2] + 9);
            assert_eq!(b[2], f[1] + 9);
        }
    }

    #[test]
    fn fin_fan_back_face_mirrors_layer_depths() {
        use approx::assert_relative_eq;
        let style = DiamondStyle { two_sided: true, border_width: 0.5, ..Default::default() };
        let mesh = fin_fan(1.2, 3, 50.0, 0.9, &style);
        let half = mesh.vertices.len() / 2;
        // Each duplicate mirrors its source's depth, so the inner diamond
        // (+z) and border (-z) keep their separation on the back side.
        for (front, back) in mesh.vertices[..half].iter().zip(&mesh.vertices[half..]) {
            assert_relative_eq!(
                back.position[2],
                -front.position[2] - 0.001,
                epsilon = 1e-6
            );
        }
        let depths: Vec<f32> = mesh.vertices[half..].iter().map(|v| v.position[2]).collect();
        assert!(depths.iter().any(|&z| (z - depths[0]).abs() > 1e-4));
    }

    #[test]
    fn fin_fan_counts_and_bounds() {
        let style = DiamondStyle { two_sided: true, border_width: 0.5, ..Default::default() };
        let mesh = fin_fan(1.2, 3, 50.0, 0.9, &style);
        assert_eq!(mesh.vertices.len(), 3 * 9 * 2);
        assert_eq!(mesh.triangle_count(), 3 * 12 * 2);
        let n = mesh.vertices.len() as u16;
        assert!(mesh.faces.iter().all(|&i| i < n));
    }
}
