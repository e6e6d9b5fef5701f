// Cubic Bezier evaluation and the swept-tube generator (spines, tails)

use glam::Vec3;

use crate::gen::tube::stitch_rings;
use crate::mesh::MeshData;

/// Evaluate a cubic Bezier at `t`.
pub fn point(p: &[Vec3; 4], t: f32) -> Vec3 {
    let u = 1.0 - t;
    u * u * u * p[0] + 3.0 * u * u * t * p[1] + 3.0 * u * t * t * p[2] + t * t * t * p[3]
}

/// Derivative of a cubic Bezier at `t` (unnormalized tangent).
pub fn tangent(p: &[Vec3; 4], t: f32) -> Vec3 {
    let u = 1.0 - t;
    3.0 * u * u * (p[1] - p[0]) + 6.0 * u * t * (p[2] - p[1]) + 3.0 * t * t * (p[3] - p[2])
}

/// Sweep an elliptical cross section along a cubic Bezier.
///
/// The per-ring frame is carried forward by rotating the previous normal
/// around `prev_tangent x tangent` (Rodrigues), a parallel-transport style
/// update that stays stable through inflection points where a true Frenet
/// frame would flip. Cross-section radii are `(a, b)` scaled by
/// `profile(t)`; `color_at(ring, t)` supports banding along the sweep.
pub fn swept_tube(
    p: &[Vec3; 4],
    a: f32,
    b: f32,
    stacks: u32,
    slices: u32,
    profile: impl Fn(f32) -> f32,
    color_at: impl Fn(u32, f32) -> [f32; 3],
) -> MeshData {
    let mut mesh = MeshData::new();

    // Starting frame: pick any normal not parallel to the first tangent.
    let mut prev_tangent = tangent(p, 0.0).normalize_or_zero();
    let mut normal = if prev_tangent.y.abs() > 0.9 { Vec3::X } else { Vec3::Y };
    let mut binormal = prev_tangent.cross(normal).normalize_or_zero();
    normal = binormal.cross(prev_tangent).normalize_or_zero();

    for i in 0..=stacks {
        let t = i as f32 / stacks as f32;
        let center = point(p, t);
        let tan = tangent(p, t).normalize_or_zero();

        // Rotate the frame by the angle between consecutive tangents.
        let axis = prev_tangent.cross(tan);
        let axis_len = axis.length();
        if axis_len > 1e-6 {
            let angle = axis_len.clamp(-1.0, 1.0).asin();
            normal = rodrigues(normal, axis / axis_len, angle).normalize_or_zero();
            binormal = tan.cross(normal).normalize_or_zero();
        }
        prev_tangent = tan;

        let scale = profile(t);
        let (at, bt) = (a * scale, b * scale);
        let color = color_at(i, t);

        for j in 0..=slices {
            let u = std::f32::consts::TAU * j as f32 / slices as f32;
            let pos = center + at * u.cos() * normal + bt * u.sin() * binormal;
            mesh.push_vertex(pos.to_array(), color);
        }
    }
    stitch_rings(&mut mesh, stacks, slices, 0);

    mesh.debug_validate();
    mesh
}

/// Tube of horizontal circular rings following a cubic Bezier path.
///
/// Unlike [`swept_tube`] the rings stay parallel to the XZ plane, which is
/// what a short sagging limb wants: the foot stays flat while the path
/// curves outward and down.
pub fn limb_tube(
    p: &[Vec3; 4],
    radius: f32,
    segments: u32,
    radial_segments: u32,
    color: [f32; 3],
) -> MeshData {
    let mut mesh = MeshData::new();

    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let c = point(p, t);
        for j in 0..=radial_segments {
            let angle = std::f32::consts::TAU * j as f32 / radial_segments as f32;
            mesh.push_vertex(
                [c.x + radius * angle.cos(), c.y, c.z + radius * angle.sin()],
                color,
            );
        }
    }
    stitch_rings(&mut mesh, segments, radial_segments, 0);

    mesh.debug_validate();
    mesh
}

/// Rotate `v` around unit `axis` by `angle` (Rodrigues' formula).
fn rodrigues(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    v * cos + axis.cross(v) * sin + axis * axis.dot(v) * (1.0 - cos)
}
