// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! GPU-side mesh storage: one interleaved vertex buffer under one VAO.

use glow::HasContext;
use kengine_core::renderer::{Mesh, MeshError, PrimitiveTopology, RenderError};
use log::debug;
use std::fmt;
use std::mem;
use std::sync::Arc;

/// A mesh uploaded to the GPU.
///
/// Holds the vertex buffer and the vertex array object describing its
/// attribute layout. Attribute pointers are declared in ascending location
/// order with byte offsets matching the interleaved layout produced by
/// [`Mesh::interleaved_data`].
///
/// GPU objects are released on [`clear`](MeshNode::clear) or drop.
pub struct MeshNode {
    gl: Arc<glow::Context>,
    vao: Option<glow::VertexArray>,
    vbo: Option<glow::Buffer>,
    vertex_count: usize,
    topology: PrimitiveTopology,
}

impl fmt::Debug for MeshNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshNode")
            .field("vertex_count", &self.vertex_count)
            .field("topology", &self.topology)
            .field("uploaded", &self.vao.is_some())
            .finish()
    }
}

impl MeshNode {
    /// Uploads `mesh` into a fresh vertex buffer and vertex array object.
    ///
    /// The mesh's interleaved buffer is built (or reused) here, which is why
    /// the mesh is taken mutably.
    pub(crate) fn from_mesh(gl: Arc<glow::Context>, mesh: &mut Mesh) -> Result<Self, RenderError> {
        if mesh.is_empty() {
            return Err(MeshError::NoAttributes.into());
        }

        let vertex_count = mesh.vertex_count();
        let topology = mesh.topology();
        let stride = mesh.stride_bytes() as i32;

        unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(|e| RenderError::Internal(format!("VAO allocation failed: {e}")))?;
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(e) => {
                    gl.delete_vertex_array(vao);
                    return Err(RenderError::Internal(format!(
                        "vertex buffer allocation failed: {e}"
                    )));
                }
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(mesh.interleaved_data()),
                glow::STATIC_DRAW,
            );

            let mut offset = 0i32;
            for (location, attribute) in mesh.attributes() {
                gl.enable_vertex_attrib_array(location);
                gl.vertex_attrib_pointer_f32(
                    location,
                    attribute.components() as i32,
                    glow::FLOAT,
                    false,
                    stride,
                    offset,
                );
                offset += (attribute.components() as usize * mem::size_of::<f32>()) as i32;
            }

            gl.bind_vertex_array(None);

            debug!(
                "MeshNode uploaded: {vertex_count} vertices, {} bytes ({topology:?})",
                mesh.total_size_bytes()
            );

            Ok(Self {
                gl,
                vao: Some(vao),
                vbo: Some(vbo),
                vertex_count,
                topology,
            })
        }
    }

    /// Issues the draw call for this mesh.
    ///
    /// Does nothing after [`clear`](MeshNode::clear).
    pub fn draw(&self) {
        let Some(vao) = self.vao else {
            return;
        };
        unsafe {
            self.gl.bind_vertex_array(Some(vao));
            self.gl
                .draw_arrays(topology_to_glow(self.topology), 0, self.vertex_count as i32);
        }
    }

    /// Replaces the GPU data with a fresh upload of `mesh`.
    ///
    /// On failure the existing upload is left untouched and stays drawable.
    pub fn reload(&mut self, mesh: &mut Mesh) -> Result<(), RenderError> {
        let next = Self::from_mesh(self.gl.clone(), mesh)?;
        *self = next;
        Ok(())
    }

    /// Releases the GPU objects. Safe to call more than once.
    pub fn clear(&mut self) {
        unsafe {
            if let Some(vao) = self.vao.take() {
                self.gl.delete_vertex_array(vao);
            }
            if let Some(vbo) = self.vbo.take() {
                self.gl.delete_buffer(vbo);
            }
        }
        self.vertex_count = 0;
    }

    /// Number of vertices in the uploaded buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// The primitive topology this mesh is drawn with.
    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    /// Number of triangles a draw of this node produces.
    pub fn triangle_count(&self) -> usize {
        self.topology.triangle_count(self.vertex_count)
    }
}

impl Drop for MeshNode {
    fn drop(&mut self) {
        self.clear();
    }
}

fn topology_to_glow(topology: PrimitiveTopology) -> u32 {
    match topology {
        PrimitiveTopology::Points => glow::POINTS,
        PrimitiveTopology::Lines => glow::LINES,
        PrimitiveTopology::LineStrip => glow::LINE_STRIP,
        PrimitiveTopology::Triangles => glow::TRIANGLES,
        PrimitiveTopology::TriangleStrip => glow::TRIANGLE_STRIP,
        PrimitiveTopology::TriangleFan => glow::TRIANGLE_FAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_maps_to_gl_enums() {
        assert_eq!(topology_to_glow(PrimitiveTopology::Triangles), glow::TRIANGLES);
        assert_eq!(
            topology_to_glow(PrimitiveTopology::TriangleStrip),
            glow::TRIANGLE_STRIP
        );
        assert_eq!(topology_to_glow(PrimitiveTopology::Points), glow::POINTS);
    }
}
