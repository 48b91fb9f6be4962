//! Binary glTF container framing
//!
//! A container is a 12-byte header followed by a JSON chunk and a binary
//! chunk, each framed as `[u32 length][4-byte tag][length bytes]`.

use std::io::{self, Read};

use tracing::info;

use crate::error::ConvertError;
use crate::scene::SceneDescriptor;

/// Magic tag at the start of every container.
pub const MAGIC: [u8; 4] = *b"glTF";
/// Tag of the structured JSON chunk.
pub const CHUNK_JSON: [u8; 4] = *b"JSON";
/// Tag of the raw binary chunk.
pub const CHUNK_BIN: [u8; 4] = *b"BIN\0";

/// The fixed 12-byte container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u32,
    pub length: u32,
}

/// The two chunks of a container, decoded.
#[derive(Debug)]
pub struct Container {
    pub header: Header,
    pub scene: SceneDescriptor,
    pub payload: Vec<u8>,
}

/// Read a container from a byte stream.
///
/// Only the first JSON chunk and the following BIN chunk are read; anything
/// after them is left in the stream. The header's version and length are
/// reported but not checked against the stream.
pub fn read_container<R: Read>(reader: &mut R) -> Result<Container, ConvertError> {
    let magic = read_array::<4, _>(reader, "header")?;
    if magic != MAGIC {
        return Err(ConvertError::Format(format!(
            "bad magic {}, expected {}",
            tag_display(&magic),
            tag_display(&MAGIC)
        )));
    }
    let version = read_u32(reader, "header")?;
    let length = read_u32(reader, "header")?;
    info!("glTF version: {}, total length: {} bytes", version, length);

    let json = read_chunk(reader, CHUNK_JSON)?;
    info!("JSON chunk: {} bytes", json.len());
    let scene = SceneDescriptor::parse(&json)?;

    let payload = read_chunk(reader, CHUNK_BIN)?;
    info!("BIN chunk: {} bytes", payload.len());

    Ok(Container {
        header: Header { version, length },
        scene,
        payload,
    })
}

/// Read one chunk, requiring its tag to equal `expected`.
fn read_chunk<R: Read>(reader: &mut R, expected: [u8; 4]) -> Result<Vec<u8>, ConvertError> {
    let what = tag_display(&expected);
    let length = read_u32(reader, &what)? as usize;
    let tag = read_array::<4, _>(reader, &what)?;
    if tag != expected {
        return Err(ConvertError::Format(format!(
            "expected {} chunk, found {}",
            what,
            tag_display(&tag)
        )));
    }

    // Grow as bytes arrive; the declared length is untrusted.
    let mut data = Vec::new();
    reader.by_ref().take(length as u64).read_to_end(&mut data)?;
    if data.len() < length {
        return Err(ConvertError::Format(format!(
            "truncated {what}: declared {length} bytes, found {}",
            data.len()
        )));
    }
    Ok(data)
}

fn read_u32<R: Read>(reader: &mut R, what: &str) -> Result<u32, ConvertError> {
    read_array(reader, what).map(u32::from_le_bytes)
}

fn read_array<const N: usize, R: Read>(reader: &mut R, what: &str) -> Result<[u8; N], ConvertError> {
    let mut buf = [0; N];
    read_exact(reader, &mut buf, what)?;
    Ok(buf)
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<(), ConvertError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => ConvertError::Format(format!("truncated {what}")),
        _ => ConvertError::Stream(e),
    })
}

/// Printable form of a chunk tag, e.g. `BIN\0`.
fn tag_display(tag: &[u8; 4]) -> String {
    tag.escape_ascii().to_string()
}
