use anyhow::{ensure, Result};
use bevy::prelude::Mesh;
use bevy::render::{mesh::Indices, render_resource::PrimitiveTopology};

/// Triangle indices and per vertex texture coordinates for a regular grid of
/// quads, in the order they get uploaded.
pub struct GridMesh {
    pub indices: Vec<u32>,
    pub uvs: Vec<[f32; 2]>,
}

/// Tessellate an `n` by `n` grid of quads, two triangles per quad.
///
/// Vertices form an `(n + 1) x (n + 1)` lattice indexed row major, so index
/// `i` in the triangle list refers to `uvs[i]`. Texture coordinates span
/// `[0, 1]` in both directions.
pub fn build(subdivisions: usize) -> Result<GridMesh> {
    ensure!(
        subdivisions >= 1,
        "subdivision count must be at least 1, got {}",
        subdivisions
    );
    let n = subdivisions as u32;

    // 3 vertices per triangle, 2 triangles per quad, n x n quads
    let mut indices = Vec::with_capacity(6 * (n * n) as usize);
    for row in 0..n {
        for col in 0..n {
            let top_left = row * (n + 1) + col;
            let top_right = top_left + 1;
            let bottom_left = top_left + n + 1;
            let bottom_right = bottom_left + 1;
            indices.extend([
                top_left,
                bottom_left,
                top_right,
                top_right,
                bottom_left,
                bottom_right,
            ]);
        }
    }

    let mut uvs = Vec::with_capacity(((n + 1) * (n + 1)) as usize);
    for row in 0..=n {
        for col in 0..=n {
            uvs.push([col as f32 / n as f32, row as f32 / n as f32]);
        }
    }

    Ok(GridMesh { indices, uvs })
}

impl GridMesh {
    /// Flat mesh on the xz plane centered on the origin, one vertex per
    /// lattice point. Height displacement happens in the vertex shader.
    pub fn into_mesh(self) -> Mesh {
        let positions: Vec<[f32; 3]> = self
            .uvs
            .iter()
            .map(|uv| [uv[0] - 0.5, 0.0, uv[1] - 0.5])
            .collect();

        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs);
        mesh.set_indices(Some(Indices::U32(self.indices)));
        mesh
    }
}
