use bytemuck::NoUninit;
use glam::Vec3;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Debug, Clone, Copy, NoUninit)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.indices.is_empty()
    }

    pub fn upload(&self, device: &wgpu::Device) -> MeshBuffer {
        let vertices = bytemuck::cast_slice(&self.vertices);
        let indices = bytemuck::cast_slice(&self.indices);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: vertices,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: indices,
            usage: wgpu::BufferUsages::INDEX,
        });

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: self.indices.len() as u32,
        }
    }
}

/// Flat ground plane at y=0: a checkerboard of `tiles`×`tiles` quads so
/// motion over it is visible, `tile_size` units per quad.
pub fn create_ground_mesh(tiles: u32, tile_size: f32) -> Mesh {
    let light = [0.45, 0.55, 0.42, 1.0];
    let dark = [0.33, 0.42, 0.31, 1.0];
    let normal = [0.0, 1.0, 0.0];
    let half = tiles as f32 * tile_size * 0.5;

    let mut mesh = Mesh::empty();
    for tz in 0..tiles {
        for tx in 0..tiles {
            let color = if (tx + tz) % 2 == 0 { light } else { dark };
            let x0 = tx as f32 * tile_size - half;
            let z0 = tz as f32 * tile_size - half;
            let x1 = x0 + tile_size;
            let z1 = z0 + tile_size;

            let base = mesh.vertices.len() as u32;
            mesh.vertices.push(Vertex { pos: [x0, 0.0, z0], normal, color });
            mesh.vertices.push(Vertex { pos: [x1, 0.0, z0], normal, color });
            mesh.vertices.push(Vertex { pos: [x1, 0.0, z1], normal, color });
            mesh.vertices.push(Vertex { pos: [x0, 0.0, z1], normal, color });
            mesh.indices.extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
        }
    }
    mesh
}

/// Axis-aligned cuboid centered on the origin with per-face normals.
pub fn create_cuboid_mesh(half_extents: Vec3, color: [f32; 4]) -> Mesh {
    let (hx, hy, hz) = (half_extents.x, half_extents.y, half_extents.z);

    // (normal, four corners counter-clockwise seen from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [[-hx, -hy, hz], [hx, -hy, hz], [hx, hy, hz], [-hx, hy, hz]],
        ),
        (
            [0.0, 0.0, -1.0],
            [[hx, -hy, -hz], [-hx, -hy, -hz], [-hx, hy, -hz], [hx, hy, -hz]],
        ),
        (
            [1.0, 0.0, 0.0],
            [[hx, -hy, hz], [hx, -hy, -hz], [hx, hy, -hz], [hx, hy, hz]],
        ),
        (
            [-1.0, 0.0, 0.0],
            [[-hx, -hy, -hz], [-hx, -hy, hz], [-hx, hy, hz], [-hx, hy, -hz]],
        ),
        (
            [0.0, 1.0, 0.0],
            [[-hx, hy, hz], [hx, hy, hz], [hx, hy, -hz], [-hx, hy, -hz]],
        ),
        (
            [0.0, -1.0, 0.0],
            [[-hx, -hy, -hz], [hx, -hy, -hz], [hx, -hy, hz], [-hx, -hy, hz]],
        ),
    ];

    let mut mesh = Mesh::empty();
    for (normal, corners) in faces {
        let base = mesh.vertices.len() as u32;
        for pos in corners {
            mesh.vertices.push(Vertex { pos, normal, color });
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_has_six_faces() {
        let mesh = create_cuboid_mesh(Vec3::new(0.5, 1.0, 0.5), [1.0; 4]);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
    }

    #[test]
    fn ground_is_centered() {
        let mesh = create_ground_mesh(4, 2.0);
        let max_x = mesh.vertices.iter().map(|v| v.pos[0]).fold(f32::MIN, f32::max);
        let min_x = mesh.vertices.iter().map(|v| v.pos[0]).fold(f32::MAX, f32::min);
        assert_eq!(max_x, 4.0);
        assert_eq!(min_x, -4.0);
        assert!(mesh.vertices.iter().all(|v| v.pos[1] == 0.0));
    }
}
