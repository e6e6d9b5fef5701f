// Tapered tube and cone generators (limbs, horns, necks)

use crate::mesh::MeshData;

/// Which plane a [`bent_cone`] curves into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BendAxis {
    /// Bend around Y: the tube curves in the XZ plane.
    Y,
    /// Bend around Z: the tube curves in the XY plane.
    Z,
}

/// Straight tube along +Y with elliptical cross section interpolating from
/// `(a0, b0)` at the base to `(a1, b1)` at the tip. Used for arm and leg
/// segments; the pivot sits at the base so the part rotates naturally from
/// its joint.
pub fn tapered_tube(
    a0: f32,
    b0: f32,
    a1: f32,
    b1: f32,
    length: f32,
    stacks: u32,
    slices: u32,
    color: [f32; 3],
) -> MeshData {
    let mut mesh = MeshData::new();

    for i in 0..=stacks {
        let t = i as f32 / stacks as f32;
        let a = a0 + (a1 - a0) * t;
        let b = b0 + (b1 - b0) * t;
        let y = t * length;
        for j in 0..=slices {
            let u = std::f32::consts::TAU * j as f32 / slices as f32;
            mesh.push_vertex([a * u.cos(), y, b * u.sin()], color);
        }
    }
    stitch_rings(&mut mesh, stacks, slices, 0);

    mesh.debug_validate();
    mesh
}

/// Hourglass tube along Y: wide at both ends, pinched at the middle, with a
/// squared blend so the pinch is smooth. Radius runs `r_top -> r_mid` over
/// the upper half and `r_mid -> r_bottom` over the lower half.
pub fn hourglass(
    r_top: f32,
    r_mid: f32,
    r_bottom: f32,
    height: f32,
    height_segments: u32,
    radial_segments: u32,
    color: [f32; 3],
) -> MeshData {
    let mut mesh = MeshData::new();

    for i in 0..=height_segments {
        let v = i as f32 / height_segments as f32;
        let y = v * height - height / 2.0;

        let radius = if v <= 0.5 {
            let t = (1.0 - 2.0 * v).abs();
            r_mid + (r_top - r_mid) * t * t
        } else {
            let t = (v - 0.5) * 2.0;
            r_mid + (r_bottom - r_mid) * t * t
        };

        for j in 0..=radial_segments {
            let angle = std::f32::consts::TAU * j as f32 / radial_segments as f32;
            mesh.push_vertex([radius * angle.cos(), y, radius * angle.sin()], color);
        }
    }
    stitch_rings(&mut mesh, height_segments, radial_segments, 0);

    mesh.debug_validate();
    mesh
}

/// Parameters for [`bent_cone`].
#[derive(Clone, Debug)]
pub struct BentCone {
    pub length: f32,
    pub base_radius: f32,
    pub tip_radius: f32,
    pub stacks: u32,
    pub slices: u32,
    /// Total bend in radians; 0 leaves the cone straight.
    pub bend_angle: f32,
    pub bend_axis: BendAxis,
    pub base_color: [f32; 3],
    pub tip_color: [f32; 3],
    pub cap_base: bool,
    pub cap_tip: bool,
}

impl Default for BentCone {
    fn default() -> Self {
        Self {
            length: 2.0,
            base_radius: 0.25,
            tip_radius: 0.03,
            stacks: 36,
            slices: 24,
            bend_angle: std::f32::consts::FRAC_PI_3,
            bend_axis: BendAxis::Y,
            base_color: [0.70, 0.62, 0.50],
            tip_color: [0.95, 0.92, 0.85],
            cap_base: true,
            cap_tip: false,
        }
    }
}

/// Tapered cone along +X, bent onto a circular arc after generation.
///
/// The bend remaps each vertex's axial coordinate with
/// `x' = R * sin(x / R)` and pushes the off-axis coordinate out by
/// `R * (1 - cos(x / R))` where `R = length / bend_angle`. That preserves
/// arc length along the spine, unlike a shear.
pub fn bent_cone(p: &BentCone) -> MeshData {
    let mut mesh = MeshData::new();

    // 1) Straight, X-aligned tapered cone with a color ramp base -> tip.
    for i in 0..=p.stacks {
        let t = i as f32 / p.stacks as f32;
        let x = t * p.length;
        let r = (1.0 - t) * p.base_radius + t * p.tip_radius;
        let col = [
            (1.0 - t) * p.base_color[0] + t * p.tip_color[0],
            (1.0 - t) * p.base_color[1] + t * p.tip_color[1],
            (1.0 - t) * p.base_color[2] + t * p.tip_color[2],
        ];
        for j in 0..=p.slices {
            let a = std::f32::consts::TAU * j as f32 / p.slices as f32;
            mesh.push_vertex([x, r * a.cos(), r * a.sin()], col);
        }
    }
    stitch_rings(&mut mesh, p.stacks, p.slices, 0);

    // Caps are triangle fans to a single center vertex. Indices stay valid
    // through the bend because bending only moves positions.
    if p.cap_base {
        let center = mesh.base_index();
        mesh.push_vertex([0.0, 0.0, 0.0], p.base_color);
        for j in 0..p.slices as u16 {
            mesh.push_triangle(center, j + 1, j);
        }
    }
    if p.cap_tip {
        let center = mesh.base_index();
        mesh.push_vertex([p.length, 0.0, 0.0], p.tip_color);
        let tip_row = (p.stacks * (p.slices + 1)) as u16;
        for j in 0..p.slices as u16 {
            mesh.push_triangle(center, tip_row + j, tip_row + j + 1);
        }
    }

    // 2) Cylindrical bend, applied in place.
    if p.bend_angle.abs() > 1e-6 {
        let r = p.length / p.bend_angle;
        for v in &mut mesh.vertices {
            let [x, y, z] = v.position;
            let s = x / r;
            match p.bend_axis {
                BendAxis::Z => {
                    v.position[0] = r * s.sin();
                    v.position[1] = y + r * (1.0 - s.cos());
                }
                BendAxis::Y => {
                    v.position[0] = r * s.sin();
                    v.position[2] = z + r * (1.0 - s.cos());
                }
            }
        }
    }

    mesh.debug_validate();
    mesh
}

/// Connect `stacks + 1` rings of `slices + 1` seam-duplicated vertices into
/// a regular quad-to-two-triangle strip, starting at vertex `base`.
pub(crate) fn stitch_rings(mesh: &mut MeshData, stacks: u32, slices: u32, base: u16) {
    for i in 0..stacks {
        for j in 0..slices {
            let first = base + (i * (slices + 1) + j) as u16;
            let second = first + slices as u16 + 1;
            mesh.push_triangle(first, second, first + 1);
            mesh.push_triangle(second, second + 1, first + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tapered_tube_spans_its_length() {
        let mesh = tapered_tube(0.14, 0.11, 0.1, 0.08, 0.52, 24, 20, [0.5; 3]);
        assert_eq!(mesh.vertices.len(), 25 * 21);
        let min_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        let max_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert_relative_eq!(min_y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(max_y, 0.52, epsilon = 1e-6);
    }

    #[test]
    fn hourglass_pinches_at_the_middle() {
        let mesh = hourglass(0.325, 0.2, 0.6, 1.2, 8, 16, [0.9, 0.53, 0.22]);
        // Ring at v = 0.5 has the middle radius.
        let mid_ring = 4 * 17;
        let [x, _, z] = mesh.vertices[mid_ring].position;
        assert_relative_eq!((x * x + z * z).sqrt(), 0.2, epsilon = 1e-5);
        // Bottom ring is the widest.
        let [x, _, z] = mesh.vertices.last().unwrap().position;
        assert_relative_eq!((x * x + z * z).sqrt(), 0.6, epsilon = 1e-5);
    }

    #[test]
    fn bend_preserves_centerline_arc_length() {
        let params = BentCone {
            length: 2.0,
            base_radius: 0.25,
            tip_radius: 0.0,
            stacks: 64,
            slices: 8,
            bend_angle: std::f32::consts::FRAC_PI_2,
            cap_base: false,
            cap_tip: false,
            ..Default::default()
        };
        let mesh = bent_cone(&params);

        // Walk the ring centroids and sum segment lengths.
        let ring = (params.slices + 1) as usize;
        let centroid = |i: usize| {
            let mut c = [0.0f32; 3];
            for v in &mesh.vertices[i * ring..(i + 1) * ring - 1] {
                for k in 0..3 {
                    c[k] += v.position[k];
                }
            }
            c.map(|x| x / (ring - 1) as f32)
        };
        let mut arc = 0.0;
        for i in 0..params.stacks as usize {
            let a = centroid(i);
            let b = centroid(i + 1);
            arc += ((b[0] - a[0]).powi(2) + (b[1] - a[1]).powi(2) + (b[2] - a[2]).powi(2)).sqrt();
        }
        assert_relative_eq!(arc, params.length, epsilon = 2e-3);
    }

    #[test]
    fn zero_bend_leaves_cone_straight() {
        let mesh = bent_cone(&BentCone {
            bend_angle: 0.0,
            cap_base: false,
            ..Default::default()
        });
        let max_x = mesh.vertices.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert_relative_eq!(max_x, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn caps_close_the_cone() {
        let open = bent_cone(&BentCone { cap_base: false, cap_tip: false, ..Default::default() });
        let closed = bent_cone(&BentCone { cap_base: true, cap_tip: true, ..Default::default() });
        assert_eq!(closed.vertices.len(), open.vertices.len() + 2);
        assert_eq!(
            closed.triangle_count(),
            open.triangle_count() + 2 * BentCone::default().slices as usize
        );
        let n = closed.vertices.len() as u16;
        assert!(closed.faces.iter().all(|&i| i < n));
    }
}
