// Scene graph: a tree of renderable nodes with parent-relative transforms

use std::sync::Arc;

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::mesh::MeshData;

/// Per-node shader uniforms: world matrix plus opacity.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct NodeUniforms {
    model: [[f32; 4]; 4],
    opacity: f32,
    _pad: [f32; 3],
}

struct GpuBuffers {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    index_count: u32,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// A renderable node. Owns its children; the tree topology is fixed after
/// construction and only the transform values change per frame.
///
/// World transform: `parent_world * placement * movement`. `movement`
/// applies first (the per-frame animation target), then `placement` (the
/// static offset inside the parent), then the parent chain.
pub struct SceneNode {
    pub name: &'static str,
    mesh: Arc<MeshData>,
    pub movement: Mat4,
    pub placement: Mat4,
    pub opacity: f32,
    pub children: Vec<SceneNode>,
    gpu: Option<GpuBuffers>,
}

impl SceneNode {
    pub fn new(name: &'static str, mesh: Arc<MeshData>) -> Self {
        Self {
            name,
            mesh,
            movement: Mat4::IDENTITY,
            placement: Mat4::IDENTITY,
            opacity: 1.0,
            children: Vec::new(),
            gpu: None,
        }
    }

    /// Transfer ownership of a child. Sibling order is paint order for
    /// alpha blending, so push opaque parts before translucent ones.
    pub fn add_child(&mut self, child: SceneNode) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Depth-first lookup of a joint by name, for the animate functions.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(name))
    }

    /// This node's world matrix given its parent's.
    pub fn world(&self, parent_world: Mat4) -> Mat4 {
        parent_world * self.placement * self.movement
    }

    /// Create GPU buffers for this node and every descendant. Must be
    /// called before the first `render`; calling it again re-uploads.
    pub fn setup(&mut self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) {
        let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(self.name),
            contents: bytemuck::cast_slice(&self.mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(self.name),
            contents: bytemuck::cast_slice(&self.mesh.faces),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(self.name),
            contents: bytemuck::cast_slice(&[NodeUniforms {
                model: Mat4::IDENTITY.to_cols_array_2d(),
                opacity: 1.0,
                _pad: [0.0; 3],
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(self.name),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.as_entire_binding(),
            }],
        });

        self.gpu = Some(GpuBuffers {
            vertex,
            index,
            index_count: self.mesh.faces.len() as u32,
            uniform,
            bind_group,
        });

        for child in &mut self.children {
            child.setup(device, layout);
        }
    }

    /// Recursive depth-first pre-order draw. Composes this node's world
    /// matrix, writes the per-node uniforms, issues one indexed draw and
    /// recurses with the composed matrix as the children's parent.
    pub fn render<'a>(
        &'a self,
        pass: &mut wgpu::RenderPass<'a>,
        queue: &wgpu::Queue,
        parent_world: Mat4,
    ) {
        let world = self.world(parent_world);

        if let Some(gpu) = &self.gpu {
            queue.write_buffer(
                &gpu.uniform,
                0,
                bytemuck::cast_slice(&[NodeUniforms {
                    model: world.to_cols_array_2d(),
                    opacity: self.opacity,
                    _pad: [0.0; 3],
                }]),
            );
            pass.set_bind_group(1, &gpu.bind_group, &[]);
            pass.set_vertex_buffer(0, gpu.vertex.slice(..));
            pass.set_index_buffer(gpu.index.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..gpu.index_count, 0, 0..1);
        } else {
            log::warn!("render called on '{}' before setup", self.name);
        }

        for child in &self.children {
            child.render(pass, queue, world);
        }
    }

    /// Total vertex count of this subtree (shared meshes counted per node).
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len() + self.children.iter().map(|c| c.vertex_count()).sum::<usize>()
    }

    /// The bind group layout every node's uniforms use (group 1).
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Node Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math;
    use approx::assert_relative_eq;
    use glam::Vec3;

    fn leaf(name: &'static str) -> SceneNode {
        SceneNode::new(name, Arc::new(MeshData::new()))
    }

    #[test]
    fn world_transforms_compose_down_the_tree() {
        let mut parent = leaf("body");
        parent.movement = math::translated(Mat4::IDENTITY, 5.0, 0.0, 0.0);
        let mut child = leaf("head");
        child.movement = math::translated(Mat4::IDENTITY, 0.0, 3.0, 0.0);

        let parent_world = parent.world(Mat4::IDENTITY);
        let child_world = child.world(parent_world);
        let p = child_world.transform_point3(Vec3::ZERO);
        assert_relative_eq!(p.x, 5.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn movement_applies_before_placement() {
        // placement carries the static offset, movement rotates in place:
        // a node placed at x=2 and rotated about its own origin must stay
        // at x=2.
        let mut node = leaf("arm");
        node.placement = math::translated(Mat4::IDENTITY, 2.0, 0.0, 0.0);
        node.movement = math::rotated_z(Mat4::IDENTITY, std::f32::consts::FRAC_PI_2);
        let p = node.world(Mat4::IDENTITY).transform_point3(Vec3::ZERO);
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn find_mut_walks_depth_first() {
        let mut root = leaf("root");
        let mut body = leaf("body");
        body.add_child(leaf("head"));
        root.add_child(body);
        root.add_child(leaf("tail"));

        assert!(root.find_mut("head").is_some());
        assert!(root.find_mut("tail").is_some());
        assert!(root.find_mut("wing").is_none());
    }
}
