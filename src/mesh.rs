// Mesh data shared between generators and the scene graph

/// One interleaved vertex record: model-space position plus RGB color.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// A generated triangle mesh. Immutable once a generator returns it; nodes
/// share it by reference (`Arc<MeshData>`) when the same part is instanced.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<u16>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the next pushed vertex will get.
    pub fn base_index(&self) -> u16 {
        self.vertices.len() as u16
    }

    pub fn push_vertex(&mut self, position: [f32; 3], color: [f32; 3]) {
        self.vertices.push(Vertex { position, color });
    }

    pub fn push_triangle(&mut self, a: u16, b: u16, c: u16) {
        self.faces.extend_from_slice(&[a, b, c]);
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len() / 3
    }

    /// Debug-build sanity check: in-range indices, finite coordinates.
    /// Malformed meshes still render (as degenerate geometry) in release.
    pub fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        {
            let n = self.vertices.len() as u16;
            for &i in &self.faces {
                debug_assert!(i < n, "face index {i} out of range ({n} vertices)");
            }
            for v in &self.vertices {
                debug_assert!(
                    v.position.iter().all(|c| c.is_finite()),
                    "non-finite vertex coordinate"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_index_tracks_pushes() {
        let mut mesh = MeshData::new();
        assert_eq!(mesh.base_index(), 0);
        mesh.push_vertex([0.0; 3], [1.0; 3]);
        mesh.push_vertex([1.0, 0.0, 0.0], [1.0; 3]);
        assert_eq!(mesh.base_index(), 2);
        mesh.push_triangle(0, 1, 1);
        assert_eq!(mesh.triangle_count(), 1);
        mesh.debug_validate();
    }
}
