use glam::{Mat4, Quat, Vec3};

use crate::utils::{create_cuboid_mesh, create_ground_mesh, Mesh, MeshBuffer};

const GROUND_TILES: u32 = 32;
const GROUND_TILE_SIZE: f32 = 2.0;
const AVATAR_COLOR: [f32; 4] = [0.78, 0.33, 0.22, 1.0];

/// One drawable: an uploaded mesh plus its model transform and the uniform
/// resources that carry the transform to the shader.
pub struct Renderable {
    pub mesh: MeshBuffer,
    pub transform: Mat4,
    pub transform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl Renderable {
    pub fn new(
        device: &wgpu::Device,
        model_layout: &wgpu::BindGroupLayout,
        mesh: &Mesh,
        transform: Mat4,
    ) -> Self {
        use wgpu::util::DeviceExt;

        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("model_transform"),
            contents: bytemuck::cast_slice(&transform.to_cols_array_2d()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("model_bind_group"),
            layout: model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        Self {
            mesh: mesh.upload(device),
            transform,
            transform_buffer,
            bind_group,
        }
    }

    pub fn write_transform(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.transform_buffer,
            0,
            bytemuck::cast_slice(&self.transform.to_cols_array_2d()),
        );
    }
}

/// The whole renderable scene: one static ground plane and one avatar whose
/// transform mirrors the physics body every frame.
pub struct Scene {
    pub ground: Renderable,
    pub avatar: Renderable,
}

impl Scene {
    pub fn new(
        device: &wgpu::Device,
        model_layout: &wgpu::BindGroupLayout,
        avatar_half_extents: Vec3,
        avatar_spawn: Vec3,
    ) -> Self {
        let ground_mesh = create_ground_mesh(GROUND_TILES, GROUND_TILE_SIZE);
        let avatar_mesh = create_cuboid_mesh(avatar_half_extents, AVATAR_COLOR);

        Self {
            ground: Renderable::new(device, model_layout, &ground_mesh, Mat4::IDENTITY),
            avatar: Renderable::new(
                device,
                model_layout,
                &avatar_mesh,
                Mat4::from_translation(avatar_spawn),
            ),
        }
    }

    /// One-way sync: the physics pose is authoritative, the renderable only
    /// mirrors it.
    pub fn set_avatar_pose(&mut self, position: Vec3, rotation: Quat) {
        self.avatar.transform = Mat4::from_rotation_translation(rotation, position);
    }

    pub fn write_transforms(&self, queue: &wgpu::Queue) {
        self.ground.write_transform(queue);
        self.avatar.write_transform(queue);
    }
}
