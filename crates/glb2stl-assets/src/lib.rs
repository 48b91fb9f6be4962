//! glb2stl Assets - Container reading and mesh file writing
//!
//! Reads the first mesh primitive out of a binary glTF container and writes
//! it as binary or text STL, with a heuristic fallback for files that cannot
//! be parsed.

mod container;
mod convert;
mod error;
mod extract;
mod fallback;
mod mesh;
mod scene;
mod stl;

#[cfg(test)]
mod testutil;

pub use container::{read_container, Container, Header, CHUNK_BIN, CHUNK_JSON, MAGIC};
pub use convert::{convert, convert_primary, Conversion, ConvertOptions};
pub use error::ConvertError;
pub use extract::{extract_mesh, floor_to_triple_boundary};
pub use fallback::{extract_fallback, fan_mesh, FallbackOptions, FALLBACK_HEADER};
pub use mesh::{Mesh, MeshSummary};
pub use scene::{Node, SceneDescriptor, SceneValue};
pub use stl::{
    binary_size, write_ascii, write_binary, write_file, Normals, OutputFormat, StlOptions,
    CONVERTED_HEADER, DEFAULT_SOLID_NAME, HEADER_LEN, RECORD_LEN,
};
