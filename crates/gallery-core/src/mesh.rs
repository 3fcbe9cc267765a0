//! Unit meshes shared by every primitive. Scale comes from the model matrix.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub nrm: [f32; 3],
    /// v = 0 at the top edge, matching row order of decoded images.
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    /// One quad with outward normal `n`; `u × v` must equal `n` so the
    /// triangles wind counter-clockwise seen from outside.
    fn push_face(&mut self, center: Vec3, n: Vec3, u: Vec3, v: Vec3) {
        let base = self.vertices.len() as u16;
        let corners = [
            (-u - v, [0.0, 1.0]),
            (u - v, [1.0, 1.0]),
            (u + v, [1.0, 0.0]),
            (-u + v, [0.0, 0.0]),
        ];
        for (offset, uv) in corners {
            self.vertices.push(Vertex {
                pos: (center + offset * 0.5).to_array(),
                nrm: n.to_array(),
                uv,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// 1×1 quad in the XY plane facing +Z.
pub fn unit_plane() -> MeshData {
    let mut m = MeshData::default();
    m.push_face(Vec3::ZERO, Vec3::Z, Vec3::X, Vec3::Y);
    m
}

/// 1×1×1 box centred on the origin.
pub fn unit_cube() -> MeshData {
    let mut m = MeshData::default();
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    for (n, u, v) in faces {
        m.push_face(n * 0.5, n, u, v);
    }
    m
}
