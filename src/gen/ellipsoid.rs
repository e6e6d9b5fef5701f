// Ellipsoid and sphere samplers (bodies, heads, eyes)

use crate::mesh::MeshData;

/// Uniformly colored ellipsoid with semi-axes `(rx, ry, rz)`.
///
/// Produces `(lat_bands + 1) * (long_bands + 1)` vertices and
/// `2 * lat_bands * long_bands` triangles. Pole rings are not collapsed;
/// every ring carries the full set of seam-duplicated vertices, which wastes
/// a few vertices but keeps the quad indexing regular.
pub fn ellipsoid(
    rx: f32,
    ry: f32,
    rz: f32,
    lat_bands: u32,
    long_bands: u32,
    color: [f32; 3],
) -> MeshData {
    ellipsoid_with(rx, ry, rz, lat_bands, long_bands, |_, _| color)
}

/// Ellipsoid with a per-vertex color callback over the two surface
/// parameters `(v, u)` in `[0,1]` (latitude from the south pole up, and
/// longitude). Used for banding and shading effects.
pub fn ellipsoid_with(
    rx: f32,
    ry: f32,
    rz: f32,
    lat_bands: u32,
    long_bands: u32,
    color_at: impl Fn(f32, f32) -> [f32; 3],
) -> MeshData {
    let mut mesh = MeshData::new();

    for lat in 0..=lat_bands {
        let v = lat as f32 / lat_bands as f32;
        let theta = v * std::f32::consts::PI;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_bands {
            let u = long as f32 / long_bands as f32;
            let phi = u * std::f32::consts::TAU;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let x = rx * cos_phi * sin_theta;
            let y = -ry * cos_theta; // south pole at lat = 0
            let z = rz * sin_phi * sin_theta;
            mesh.push_vertex([x, y, z], color_at(v, u));
        }
    }

    for lat in 0..lat_bands {
        for long in 0..long_bands {
            let first = (lat * (long_bands + 1) + long) as u16;
            let second = first + long_bands as u16 + 1;
            mesh.push_triangle(first, second, first + 1);
            mesh.push_triangle(second, second + 1, first + 1);
        }
    }

    mesh.debug_validate();
    mesh
}
