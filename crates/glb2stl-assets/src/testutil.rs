//! Builders for in-memory test containers.

use crate::container::{CHUNK_BIN, CHUNK_JSON, MAGIC};

/// Assembles container bytes, with hooks for corrupting individual fields.
pub struct GlbBuilder {
    json: Vec<u8>,
    bin: Vec<u8>,
    json_tag: [u8; 4],
    bin_tag: [u8; 4],
    total_length: Option<u32>,
}

impl GlbBuilder {
    pub fn new(json: Vec<u8>, bin: Vec<u8>) -> Self {
        Self {
            json,
            bin,
            json_tag: CHUNK_JSON,
            bin_tag: CHUNK_BIN,
            total_length: None,
        }
    }

    pub fn json_tag(mut self, tag: [u8; 4]) -> Self {
        self.json_tag = tag;
        self
    }

    pub fn bin_tag(mut self, tag: [u8; 4]) -> Self {
        self.bin_tag = tag;
        self
    }

    pub fn total_length(mut self, length: u32) -> Self {
        self.total_length = Some(length);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let length = 12 + 8 + self.json.len() + 8 + self.bin.len();
        let mut out = Vec::with_capacity(length);
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&self.total_length.unwrap_or(length as u32).to_le_bytes());
        for (tag, data) in [(self.json_tag, &self.json), (self.bin_tag, &self.bin)] {
            out.extend_from_slice(&(data.len() as u32).to_le_bytes());
            out.extend_from_slice(&tag);
            out.extend_from_slice(data);
        }
        out
    }
}

/// Pack positions then indices into one binary chunk.
///
/// Returns the chunk and the byte offsets of the two regions.
pub fn payload(positions: &[[f32; 3]], indices: &[u32]) -> (Vec<u8>, usize, usize) {
    let mut bin = Vec::new();
    for p in positions {
        for c in p {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    let idx_offset = bin.len();
    for i in indices {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    (bin, 0, idx_offset)
}

/// A minimal scene with one mesh, one primitive and two accessors.
pub fn scene_json(pos_count: usize, pos_offset: usize, idx_count: usize, idx_offset: usize) -> String {
    format!(
        r#"{{
            "asset": {{"version": "2.0"}},
            "meshes": [{{"primitives": [{{"attributes": {{"POSITION": 0}}, "indices": 1}}]}}],
            "accessors": [
                {{"bufferView": 0, "componentType": 5126, "count": {pos_count}, "type": "VEC3"}},
                {{"bufferView": 1, "componentType": 5125, "count": {idx_count}, "type": "SCALAR"}}
            ],
            "bufferViews": [
                {{"buffer": 0, "byteOffset": {pos_offset}}},
                {{"buffer": 0, "byteOffset": {idx_offset}}}
            ],
            "buffers": [{{}}]
        }}"#
    )
}

/// A complete container holding the given mesh.
pub fn glb(positions: &[[f32; 3]], indices: &[u32]) -> Vec<u8> {
    let (bin, pos_offset, idx_offset) = payload(positions, indices);
    let json = scene_json(positions.len(), pos_offset, indices.len(), idx_offset);
    GlbBuilder::new(json.into_bytes(), bin).build()
}
