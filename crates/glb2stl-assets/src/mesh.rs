use glb2stl_core::{face_normal, Bounds, Triangle, Vec3, Vertex};

use crate::error::ConvertError;

/// A triangle mesh whose indices are known to be in range.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Build a mesh, rejecting any triangle that indexes past the vertex array.
    pub fn new(vertices: Vec<Vertex>, triangles: Vec<Triangle>) -> Result<Self, ConvertError> {
        if let Some((i, tri)) = triangles
            .iter()
            .enumerate()
            .find(|(_, tri)| tri.max_index() as usize >= vertices.len())
        {
            return Err(ConvertError::Decode(format!(
                "triangle {} {:?} references a vertex past the {} decoded",
                i,
                tri.indices(),
                vertices.len()
            )));
        }
        Ok(Self {
            vertices,
            triangles,
        })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// The three vertex positions of a triangle, in winding order.
    pub fn corners(&self, tri: &Triangle) -> [Vertex; 3] {
        tri.indices().map(|i| self.vertices[i as usize])
    }

    /// Unit face normal of a triangle.
    pub fn normal(&self, tri: &Triangle) -> Vec3 {
        let [v0, v1, v2] = self.corners(tri);
        face_normal(v0, v1, v2)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.vertices)
    }

    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            vertices: self.vertices.len(),
            triangles: self.triangles.len(),
            bounds: self.bounds(),
        }
    }
}

/// Counts and extent of a mesh that was written out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshSummary {
    pub vertices: usize,
    pub triangles: usize,
    pub bounds: Option<Bounds>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_index_is_decode_error() {
        let vertices = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let result = Mesh::new(vertices, vec![Triangle::new(0, 1, 3)]);
        assert!(matches!(result, Err(ConvertError::Decode(_))));
    }

    #[test]
    fn test_corners_follow_winding() {
        let vertices = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let mesh = Mesh::new(vertices, vec![Triangle::new(2, 0, 1)]).unwrap();
        let tri = mesh.triangles()[0];
        assert_eq!(mesh.corners(&tri), [Vec3::Y, Vec3::ZERO, Vec3::X]);
        assert_eq!(mesh.normal(&tri), Vec3::Z);
    }

    #[test]
    fn test_summary_counts() {
        let vertices = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
        let mesh = Mesh::new(vertices, vec![Triangle::new(0, 1, 2)]).unwrap();
        let summary = mesh.summary();
        assert_eq!(summary.vertices, 4);
        assert_eq!(summary.triangles, 1);
        assert_eq!(summary.bounds.unwrap().max, Vec3::ONE);
    }
}
