//! Core types used throughout the converter

use glam::Vec3;

/// A mesh vertex position. Stored as 32-bit floats on the wire.
pub type Vertex = Vec3;

/// A triangle referencing three vertices by index.
///
/// Index order defines the winding, and therefore the sign of the face normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Triangle {
    /// Create a triangle from three vertex indices
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    /// The three indices in winding order
    pub fn indices(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }

    /// Largest index referenced by this triangle
    pub fn max_index(&self) -> u32 {
        self.a.max(self.b).max(self.c)
    }
}

impl From<[u32; 3]> for Triangle {
    fn from([a, b, c]: [u32; 3]) -> Self {
        Self { a, b, c }
    }
}

/// Axis-aligned bounding box of a set of vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Compute the bounds of the given points, or `None` if there are none
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(
            Self {
                min: first,
                max: first,
            },
            |bounds, p| Self {
                min: bounds.min.min(*p),
                max: bounds.max.max(*p),
            },
        ))
    }

    /// Extent along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}
