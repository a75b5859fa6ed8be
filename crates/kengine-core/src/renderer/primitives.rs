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

//! Generators for simple built-in meshes.
//!
//! All primitives live in the XY plane, are centered on the origin, and wind
//! counter-clockwise. Positions are registered at attribute location 0 with
//! three components per vertex.

use crate::renderer::mesh::{Mesh, PrimitiveTopology, VertexAttribute};

/// Builds a square of side length `size` as two triangles (six vertices).
pub fn quad(size: f32) -> Mesh {
    let h = size * 0.5;
    #[rustfmt::skip]
    let positions = vec![
        -h, -h, 0.0,
         h, -h, 0.0,
         h,  h, 0.0,
        -h, -h, 0.0,
         h,  h, 0.0,
        -h,  h, 0.0,
    ];
    mesh_from_positions(positions)
}

/// Builds an isoceles triangle of width and height `size` (three vertices).
pub fn triangle(size: f32) -> Mesh {
    let h = size * 0.5;
    #[rustfmt::skip]
    let positions = vec![
        -h, -h, 0.0,
         h, -h, 0.0,
         0.0, h, 0.0,
    ];
    mesh_from_positions(positions)
}

fn mesh_from_positions(positions: Vec<f32>) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::Triangles);
    let attribute =
        VertexAttribute::new(positions, 3).expect("generated positions are statically valid");
    mesh.insert_attribute(0, attribute)
        .expect("inserting into an empty mesh cannot fail");
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn vertex(mesh: &Mesh, index: usize) -> Vec3 {
        let (_, positions) = mesh.attributes().next().unwrap();
        let data = positions.data();
        Vec3::new(data[index * 3], data[index * 3 + 1], data[index * 3 + 2])
    }

    /// A quad must consist of six vertices forming two triangles, spanning
    /// [-size/2, size/2] on both axes.
    #[test]
    fn quad_emits_six_vertices_spanning_the_size() {
        let mesh = quad(2.0);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.topology(), PrimitiveTopology::Triangles);
        assert_eq!(mesh.topology().triangle_count(mesh.vertex_count()), 2);

        let (location, positions) = mesh.attributes().next().unwrap();
        assert_eq!(location, 0, "positions should sit at location 0");
        assert_eq!(positions.components(), 3);
        for value in positions.data() {
            assert!(
                value.abs() <= 1.0,
                "quad(2.0) coordinates should stay within [-1, 1], got {value}"
            );
        }
    }

    /// Both quad triangles must wind counter-clockwise (face normal +Z).
    #[test]
    fn quad_triangles_wind_counter_clockwise() {
        let mesh = quad(2.0);
        for triangle_index in 0..2 {
            let a = vertex(&mesh, triangle_index * 3);
            let b = vertex(&mesh, triangle_index * 3 + 1);
            let c = vertex(&mesh, triangle_index * 3 + 2);
            let normal = (b - a).cross(c - a);
            assert!(
                normal.z > 0.0,
                "triangle {triangle_index} should face +Z, normal {normal:?}"
            );
        }
    }

    /// A triangle primitive is a single CCW triangle.
    #[test]
    fn triangle_emits_three_vertices() {
        let mesh = triangle(1.0);
        assert_eq!(mesh.vertex_count(), 3);

        let a = vertex(&mesh, 0);
        let b = vertex(&mesh, 1);
        let c = vertex(&mesh, 2);
        assert!((b - a).cross(c - a).z > 0.0, "triangle should face +Z");
    }
}
