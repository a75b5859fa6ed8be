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

//! CPU-side vertex data, organized per shader attribute location.
//!
//! A [`Mesh`] collects one [`VertexAttribute`] per shader location and
//! produces a single interleaved buffer ready for upload. Attributes are kept
//! sorted by location, so the interleaved layout is a deterministic function
//! of the locations alone and never depends on insertion order.

use crate::renderer::error::MeshError;

/// How the vertices of a mesh are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    /// Each vertex is an isolated point.
    Points,
    /// Every two vertices form an independent line.
    Lines,
    /// Consecutive vertices form a connected line.
    LineStrip,
    /// Every three vertices form an independent triangle.
    #[default]
    Triangles,
    /// Each vertex after the second forms a triangle with the previous two.
    TriangleStrip,
    /// Each vertex after the second forms a triangle with the first vertex
    /// and the previous one.
    TriangleFan,
}

impl PrimitiveTopology {
    /// Returns the number of triangles `vertex_count` vertices produce under
    /// this topology. Non-triangle topologies yield zero.
    pub fn triangle_count(&self, vertex_count: usize) -> usize {
        match self {
            PrimitiveTopology::Triangles => vertex_count / 3,
            PrimitiveTopology::TriangleStrip | PrimitiveTopology::TriangleFan => {
                vertex_count.saturating_sub(2)
            }
            _ => 0,
        }
    }
}

/// The per-vertex data for a single shader attribute.
///
/// The data is a flat `f32` array holding `components` values per vertex
/// (e.g. 3 for positions, 4 for RGBA colors).
#[derive(Debug, Clone, PartialEq)]
pub struct VertexAttribute {
    data: Vec<f32>,
    components: u32,
}

impl VertexAttribute {
    /// Creates an attribute from flat data and a per-vertex component count.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is empty, if `components` is not in
    /// `1..=4` (the range OpenGL accepts for a vertex attribute), or if the
    /// data length is not a multiple of `components`.
    pub fn new(data: Vec<f32>, components: u32) -> Result<Self, MeshError> {
        if data.is_empty() {
            return Err(MeshError::EmptyAttribute);
        }
        if components == 0 || components > 4 {
            return Err(MeshError::InvalidComponentCount { components });
        }
        if data.len() % components as usize != 0 {
            return Err(MeshError::DataNotDivisible {
                len: data.len(),
                components,
            });
        }
        Ok(Self { data, components })
    }

    /// Returns the number of values per vertex.
    #[inline]
    pub fn components(&self) -> u32 {
        self.components
    }

    /// Returns the number of vertices this attribute covers.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.data.len() / self.components as usize
    }

    /// Returns the flat per-vertex data.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

/// A container of vertex attributes addressed by shader location.
///
/// All registered attributes must agree on their vertex count; inserts that
/// would break that invariant are rejected. The interleaved buffer is built
/// lazily and cached until the attribute set changes.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Attribute list, kept sorted by ascending location.
    attributes: Vec<(u32, VertexAttribute)>,
    topology: PrimitiveTopology,
    interleaved: Option<Vec<f32>>,
}

impl Mesh {
    /// Creates an empty mesh with the given topology.
    pub fn new(topology: PrimitiveTopology) -> Self {
        Self {
            attributes: Vec::new(),
            topology,
            interleaved: None,
        }
    }

    /// Registers `attribute` under the shader `location`.
    ///
    /// The attribute list stays sorted by location, so the interleaved
    /// layout does not depend on the order of insertion. Inserting drops any
    /// cached interleaved buffer.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::DuplicateLocation`] if the location is already
    /// taken, or [`MeshError::VertexCountMismatch`] if the attribute's vertex
    /// count disagrees with the attributes already registered.
    pub fn insert_attribute(
        &mut self,
        location: u32,
        attribute: VertexAttribute,
    ) -> Result<(), MeshError> {
        if self.attributes.iter().any(|(loc, _)| *loc == location) {
            return Err(MeshError::DuplicateLocation(location));
        }
        if let Some(expected) = self.vertex_count_opt() {
            let got = attribute.element_count();
            if got != expected {
                return Err(MeshError::VertexCountMismatch {
                    location,
                    expected,
                    got,
                });
            }
        }

        let index = self
            .attributes
            .partition_point(|(loc, _)| *loc < location);
        self.attributes.insert(index, (location, attribute));
        self.interleaved = None;
        Ok(())
    }

    /// Returns the assembly topology.
    #[inline]
    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    /// Iterates the attributes in ascending location order.
    pub fn attributes(&self) -> impl Iterator<Item = (u32, &VertexAttribute)> {
        self.attributes.iter().map(|(loc, attr)| (*loc, attr))
    }

    /// Returns `true` if no attribute has been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Returns the common vertex count, or zero for an empty mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count_opt().unwrap_or(0)
    }

    fn vertex_count_opt(&self) -> Option<usize> {
        self.attributes
            .first()
            .map(|(_, attr)| attr.element_count())
    }

    /// Returns the number of floats one interleaved vertex occupies.
    pub fn stride_floats(&self) -> u32 {
        self.attributes
            .iter()
            .map(|(_, attr)| attr.components())
            .sum()
    }

    /// Returns the size in bytes of one interleaved vertex.
    pub fn stride_bytes(&self) -> u32 {
        self.stride_floats() * std::mem::size_of::<f32>() as u32
    }

    /// Returns the total size in bytes of the interleaved buffer.
    pub fn total_size_bytes(&self) -> usize {
        self.vertex_count() * self.stride_bytes() as usize
    }

    /// Returns the interleaved vertex buffer, building it on first use.
    ///
    /// Values are laid out per vertex, attributes in ascending location
    /// order. Repeated calls return the cached buffer until an attribute is
    /// inserted.
    pub fn interleaved_data(&mut self) -> &[f32] {
        if self.interleaved.is_none() {
            let vertex_count = self.vertex_count();
            let stride = self.stride_floats() as usize;
            let mut buffer = Vec::with_capacity(vertex_count * stride);
            for vertex in 0..vertex_count {
                for (_, attr) in &self.attributes {
                    let components = attr.components() as usize;
                    let start = vertex * components;
                    buffer.extend_from_slice(&attr.data()[start..start + components]);
                }
            }
            self.interleaved = Some(buffer);
        }
        self.interleaved.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSITIONS: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    const COLORS: [f32; 12] = [
        1.0, 0.0, 0.0, 1.0, //
        0.0, 1.0, 0.0, 1.0, //
        0.0, 0.0, 1.0, 1.0,
    ];

    fn positions() -> VertexAttribute {
        VertexAttribute::new(POSITIONS.to_vec(), 3).unwrap()
    }

    fn colors() -> VertexAttribute {
        VertexAttribute::new(COLORS.to_vec(), 4).unwrap()
    }

    /// Attribute construction must reject empty data, out-of-range component
    /// counts, and data that does not divide evenly into vertices.
    #[test]
    fn vertex_attribute_validates_input() {
        assert_eq!(
            VertexAttribute::new(vec![], 3).unwrap_err(),
            MeshError::EmptyAttribute
        );
        assert_eq!(
            VertexAttribute::new(vec![1.0], 0).unwrap_err(),
            MeshError::InvalidComponentCount { components: 0 }
        );
        assert_eq!(
            VertexAttribute::new(vec![1.0; 10], 5).unwrap_err(),
            MeshError::InvalidComponentCount { components: 5 }
        );
        assert_eq!(
            VertexAttribute::new(vec![1.0; 7], 3).unwrap_err(),
            MeshError::DataNotDivisible {
                len: 7,
                components: 3
            }
        );
    }

    /// Inserting an attribute whose vertex count disagrees with the mesh must
    /// be rejected.
    #[test]
    fn insert_rejects_vertex_count_mismatch() {
        let mut mesh = Mesh::new(PrimitiveTopology::Triangles);
        mesh.insert_attribute(0, positions()).unwrap();

        // Two vertices of color data against three vertices of positions.
        let short_colors = VertexAttribute::new(vec![1.0; 8], 4).unwrap();
        let err = mesh.insert_attribute(1, short_colors).unwrap_err();
        assert_eq!(
            err,
            MeshError::VertexCountMismatch {
                location: 1,
                expected: 3,
                got: 2
            }
        );
        // The failed insert must not have registered anything.
        assert_eq!(mesh.attributes().count(), 1);
    }

    /// A location can only be registered once.
    #[test]
    fn insert_rejects_duplicate_location() {
        let mut mesh = Mesh::new(PrimitiveTopology::Triangles);
        mesh.insert_attribute(0, positions()).unwrap();
        let err = mesh.insert_attribute(0, positions()).unwrap_err();
        assert_eq!(err, MeshError::DuplicateLocation(0));
    }

    /// The interleaved layout must follow ascending locations even when
    /// attributes are inserted out of order.
    #[test]
    fn interleave_order_is_by_location_not_insertion() {
        let mut mesh = Mesh::new(PrimitiveTopology::Triangles);
        mesh.insert_attribute(1, colors()).unwrap();
        mesh.insert_attribute(0, positions()).unwrap();

        assert_eq!(mesh.stride_floats(), 7);
        let data = mesh.interleaved_data();
        // First vertex: position (3 floats) then color (4 floats).
        assert_eq!(&data[0..3], &POSITIONS[0..3]);
        assert_eq!(&data[3..7], &COLORS[0..4]);
        // Second vertex starts one stride later.
        assert_eq!(&data[7..10], &POSITIONS[3..6]);
        assert_eq!(&data[10..14], &COLORS[4..8]);
    }

    /// Repeated interleave requests must hit the cache and return identical
    /// data.
    #[test]
    fn interleave_is_cached_and_idempotent() {
        let mut mesh = Mesh::new(PrimitiveTopology::Triangles);
        mesh.insert_attribute(0, positions()).unwrap();
        assert!(mesh.interleaved.is_none(), "cache should start empty");

        let first = mesh.interleaved_data().to_vec();
        assert!(mesh.interleaved.is_some(), "first call should fill the cache");

        let second = mesh.interleaved_data().to_vec();
        assert_eq!(first, second, "repeated interleave must be identical");
    }

    /// Inserting an attribute must invalidate a previously built cache.
    #[test]
    fn insert_invalidates_interleave_cache() {
        let mut mesh = Mesh::new(PrimitiveTopology::Triangles);
        mesh.insert_attribute(0, positions()).unwrap();
        let before = mesh.interleaved_data().len();
        assert!(mesh.interleaved.is_some());

        mesh.insert_attribute(1, colors()).unwrap();
        assert!(mesh.interleaved.is_none(), "insert should drop the cache");
        let after = mesh.interleaved_data().len();
        assert_eq!(before, 9);
        assert_eq!(after, 21, "rebuilt buffer should include both attributes");
    }

    /// Size bookkeeping must reflect the registered attributes.
    #[test]
    fn stride_and_total_size() {
        let mut mesh = Mesh::new(PrimitiveTopology::Triangles);
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.total_size_bytes(), 0);

        mesh.insert_attribute(0, positions()).unwrap();
        mesh.insert_attribute(1, colors()).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.stride_bytes(), 28);
        assert_eq!(mesh.total_size_bytes(), 84);
    }

    /// Triangle estimates per topology.
    #[test]
    fn topology_triangle_count() {
        assert_eq!(PrimitiveTopology::Triangles.triangle_count(6), 2);
        assert_eq!(PrimitiveTopology::TriangleStrip.triangle_count(6), 4);
        assert_eq!(PrimitiveTopology::TriangleFan.triangle_count(6), 4);
        assert_eq!(PrimitiveTopology::Lines.triangle_count(6), 0);
        assert_eq!(PrimitiveTopology::TriangleStrip.triangle_count(1), 0);
    }
}
