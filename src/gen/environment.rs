// Desert environment meshes: dune terrain, sky dome, sun, clouds

use crate::gen::tube::stitch_rings;
use crate::mesh::MeshData;

/// Dune field: a grid heightfield displaced by three overlapping sine waves,
/// colored with a warm sand gradient.
pub fn desert_terrain(width: f32, depth: f32, segments: u32) -> MeshData {
    let mut mesh = MeshData::new();
    let seg_w = width / segments as f32;
    let seg_d = depth / segments as f32;

    for z in 0..=segments {
        for x in 0..=segments {
            let px = x as f32 * seg_w - width / 2.0;
            let pz = z as f32 * seg_d - depth / 2.0;

            let wave1 = (px * 0.05).sin() * (pz * 0.03).cos() * 3.0;
            let wave2 = (px * 0.02 + pz * 0.02).sin() * 2.0;
            let wave3 = (px * 0.08).cos() * (pz * 0.06).sin() * 1.5;
            let py = wave1 + wave2 + wave3 - 15.0;

            let variation = ((px * 0.1).sin() + (pz * 0.1).cos()) * 0.1;
            let color = [
                0.85 + variation,
                0.65 + variation * 0.5,
                0.35 + variation * 0.3,
            ];
            mesh.push_vertex([px, py, pz], color);
        }
    }

    let row = segments + 1;
    for z in 0..segments {
        for x in 0..segments {
            let a = (z * row + x) as u16;
            let b = a + 1;
            let c = ((z + 1) * row + x) as u16;
            let d = c + 1;
            mesh.push_triangle(a, b, d);
            mesh.push_triangle(a, d, c);
        }
    }

    mesh.debug_validate();
    mesh
}

/// Upper hemisphere with a sunset gradient baked into vertex colors:
/// purple-blue overhead, orange at the horizon.
pub fn sky_dome(radius: f32, segments: u32) -> MeshData {
    let mut mesh = MeshData::new();
    let lat_bands = segments / 2;

    for lat in 0..=lat_bands {
        let theta = lat as f32 * std::f32::consts::PI / segments as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for lon in 0..=segments {
            let phi = std::f32::consts::TAU * lon as f32 / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let x = cos_phi * sin_theta;
            let y = cos_theta;
            let z = sin_phi * sin_theta;

            let color = if y > 0.3 {
                let t = (y - 0.3) / 0.7;
                [0.3 + t * 0.2, 0.2 + t * 0.5, 0.5 + t * 0.4]
            } else if y > -0.2 {
                let t = (y + 0.2) / 0.5;
                [1.0 - t * 0.2, 0.5 + t * 0.2, 0.2 + t * 0.3]
            } else {
                [0.95, 0.6, 0.25]
            };

            mesh.push_vertex([x * radius, y * radius, z * radius], color);
        }
    }
    stitch_rings(&mut mesh, lat_bands, segments, 0);

    mesh.debug_validate();
    mesh
}

/// Bright sun sphere with a subtle per-vertex shimmer. The shimmer is a
/// deterministic hash of the grid indices, not a random source.
pub fn sun(radius: f32, segments: u32) -> MeshData {
    let mut mesh = MeshData::new();

    for lat in 0..=segments {
        let theta = lat as f32 * std::f32::consts::PI / segments as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for lon in 0..=segments {
            let phi = std::f32::consts::TAU * lon as f32 / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let x = cos_phi * sin_theta;
            let y = cos_theta;
            let z = sin_phi * sin_theta;

            let brightness = 0.8 + 0.2 * jitter(lat * 131 + lon * 17);
            mesh.push_vertex(
                [x * radius, y * radius, z * radius],
                [1.0 * brightness, 0.85 * brightness, 0.4 * brightness],
            );
        }
    }
    stitch_rings(&mut mesh, segments, segments, 0);

    mesh.debug_validate();
    mesh
}

/// Puffy cloud built from several overlapping ellipsoid blobs merged into a
/// single mesh.
pub fn cloud(width: f32, height: f32, depth: f32) -> MeshData {
    let mut mesh = MeshData::new();
    let segments = 10u32;

    // (center, semi-axes) per blob, proportional to the overall size.
    let blobs = [
        ([0.0, 0.0, 0.0], [width * 0.6, height * 0.8, depth * 0.5]),
        ([width * 0.4, height * 0.3, 0.0], [width * 0.5, height * 0.7, depth * 0.4]),
        ([-width * 0.3, height * 0.2, 0.0], [width * 0.4, height * 0.6, depth * 0.35]),
        ([width * 0.2, -height * 0.2, depth * 0.3], [width * 0.35, height * 0.5, depth * 0.3]),
        ([-width * 0.25, -height * 0.15, -depth * 0.25], [width * 0.3, height * 0.45, depth * 0.25]),
        ([0.0, height * 0.4, depth * 0.15], [width * 0.25, height * 0.4, depth * 0.2]),
    ];

    for (bi, (center, axes)) in blobs.iter().enumerate() {
        let base = mesh.base_index();

        for lat in 0..=segments {
            let theta = lat as f32 * std::f32::consts::PI / segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            for lon in 0..=segments {
                let phi = std::f32::consts::TAU * lon as f32 / segments as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();

                let x = center[0] + cos_phi * sin_theta * axes[0];
                let y = center[1] + cos_theta * axes[1];
                let z = center[2] + sin_phi * sin_theta * axes[2];

                let variation = 0.05 * jitter(bi as u32 * 977 + lat * 31 + lon);
                mesh.push_vertex([x, y, z], [0.95 + variation, 0.95 + variation, 0.98]);
            }
        }
        stitch_rings(&mut mesh, segments, segments, base);
    }

    mesh.debug_validate();
    mesh
}

/// Cheap deterministic noise in [0, 1).
fn jitter(seed: u32) -> f32 {
    let x = (seed as f32 * 12.9898).sin() * 43758.547;
    x.fract().abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_grid_counts() {
        let mesh = desert_terrain(200.0, 200.0, 50);
        assert_eq!(mesh.vertices.len(), 51 * 51);
        assert_eq!(mesh.triangle_count(), 2 * 50 * 50);
        let n = mesh.vertices.len() as u16;
        assert!(mesh.faces.iter().all(|&i| i < n));
    }

    #[test]
    fn terrain_sits_below_the_scene() {
        let mesh = desert_terrain(200.0, 200.0, 20);
        // Dune waves sum to at most 6.5 around the -15 base.
        assert!(mesh.vertices.iter().all(|v| v.position[1] < -8.0));
    }

    #[test]
    fn sky_dome_is_a_hemisphere() {
        let mesh = sky_dome(100.0, 32);
        assert_eq!(mesh.vertices.len(), 17 * 33);
        // No vertex below the equator.
        assert!(mesh.vertices.iter().all(|v| v.position[1] >= -1e-3));
        let n = mesh.vertices.len() as u16;
        assert!(mesh.faces.iter().all(|&i| i < n));
    }

    #[test]
    fn cloud_merges_all_blobs() {
        let mesh = cloud(10.0, 3.0, 8.0);
        assert_eq!(mesh.vertices.len(), 6 * 11 * 11);
        assert_eq!(mesh.triangle_count(), 6 * 2 * 10 * 10);
        let n = mesh.vertices.len() as u16;
        assert!(mesh.faces.iter().all(|&i| i < n));
    }

    #[test]
    fn sun_colors_stay_warm() {
        let mesh = sun(5.0, 20);
        for v in &mesh.vertices {
            assert!(v.color[0] >= v.color[1] && v.color[1] >= v.color[2]);
        }
    }
}
