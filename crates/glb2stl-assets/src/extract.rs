//! Decode the first primitive of the first mesh into a [`Mesh`]
//!
//! Positions must be tightly packed `VEC3` of little-endian `f32`, indices
//! tightly packed little-endian `u32`.

use glb2stl_core::{Triangle, Vertex};
use tracing::debug;

use crate::error::ConvertError;
use crate::mesh::Mesh;
use crate::scene::{Node, SceneDescriptor};

const POSITION_STRIDE: usize = 12;
const INDEX_STRIDE: usize = 4;

/// Largest multiple of three not above `count`. Trailing indices that do not
/// form a whole triangle are dropped.
pub fn floor_to_triple_boundary(count: usize) -> usize {
    count - count % 3
}

/// Where an accessor's elements live in the binary payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AccessorRange {
    offset: usize,
    count: usize,
}

impl AccessorRange {
    fn resolve<'a>(root: &Node<'a>, accessor_ref: &Node<'a>) -> Result<Self, ConvertError> {
        let accessor = accessor_ref.resolve(root, "accessors")?;
        let count = accessor.field("count")?.as_usize()?;
        let view = accessor.field("bufferView")?.resolve(root, "bufferViews")?;
        let offset = match view.optional_field("byteOffset")? {
            Some(offset) => offset.as_usize()?,
            None => 0,
        };
        Ok(Self { offset, count })
    }

    /// Slice of `payload` holding `elements` elements of `stride` bytes.
    fn slice<'p>(&self, payload: &'p [u8], elements: usize, stride: usize) -> Result<&'p [u8], ConvertError> {
        let end = elements
            .checked_mul(stride)
            .and_then(|len| len.checked_add(self.offset))
            .ok_or_else(|| ConvertError::Decode("accessor byte range overflows".into()))?;
        payload.get(self.offset..end).ok_or_else(|| {
            ConvertError::Decode(format!(
                "accessor needs bytes {}..{} but the binary chunk has {}",
                self.offset,
                end,
                payload.len()
            ))
        })
    }
}

/// Extract vertices and triangles from `meshes[0].primitives[0]`.
pub fn extract_mesh(scene: &SceneDescriptor, payload: &[u8]) -> Result<Mesh, ConvertError> {
    let root = scene.root();
    let primitive = root
        .field("meshes")?
        .index(0)?
        .field("primitives")?
        .index(0)?;

    let positions = AccessorRange::resolve(&root, &primitive.field("attributes")?.field("POSITION")?)?;
    let indices = AccessorRange::resolve(&root, &primitive.field("indices")?)?;
    debug!("POSITION accessor: {:?}, indices accessor: {:?}", positions, indices);

    let vertices: Vec<Vertex> = positions
        .slice(payload, positions.count, POSITION_STRIDE)?
        .chunks_exact(POSITION_STRIDE)
        .map(|b| Vertex::new(read_f32(b, 0), read_f32(b, 4), read_f32(b, 8)))
        .collect();

    let index_count = floor_to_triple_boundary(indices.count);
    if index_count != indices.count {
        debug!(
            "Dropping {} trailing indices that do not form a triangle",
            indices.count - index_count
        );
    }
    let triangles: Vec<Triangle> = indices
        .slice(payload, index_count, INDEX_STRIDE)?
        .chunks_exact(3 * INDEX_STRIDE)
        .map(|b| Triangle::new(read_u32(b, 0), read_u32(b, 4), read_u32(b, 8)))
        .collect();

    Mesh::new(vertices, triangles)
}

fn read_f32(bytes: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}
