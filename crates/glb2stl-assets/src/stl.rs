//! STL serialization
//!
//! Binary layout: 80-byte header, `u32` triangle count, then one 50-byte
//! record per triangle (normal, three corners, `u16` attribute count of 0).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glb2stl_core::Vec3;
use tracing::{info, warn};

use crate::error::ConvertError;
use crate::mesh::Mesh;

pub const HEADER_LEN: usize = 80;
pub const RECORD_LEN: usize = 50;

/// Header text of meshes converted along the primary path.
pub const CONVERTED_HEADER: &str = "Converted from glTF/GBL format";
/// Solid name used in text output.
pub const DEFAULT_SOLID_NAME: &str = "glTF_converted";

/// Which STL encoding to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Binary,
    Ascii,
}

/// How facet normals are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normals {
    /// Computed from each triangle's corners.
    Computed,
    /// Written as the zero vector.
    Zero,
}

/// Size in bytes of a binary STL holding `triangles` triangles.
pub fn binary_size(triangles: usize) -> usize {
    HEADER_LEN + 4 + RECORD_LEN * triangles
}

/// Write `mesh` as binary STL.
pub fn write_binary<W: Write>(
    writer: &mut W,
    mesh: &Mesh,
    header: &str,
    normals: Normals,
) -> Result<(), ConvertError> {
    writer.write_all(&header_bytes(header))?;

    let count = u32::try_from(mesh.triangles().len()).map_err(|_| {
        ConvertError::Decode(format!("{} triangles do not fit a binary STL", mesh.triangles().len()))
    })?;
    writer.write_all(&count.to_le_bytes())?;

    for tri in mesh.triangles() {
        let normal = match normals {
            Normals::Computed => mesh.normal(tri),
            Normals::Zero => Vec3::ZERO,
        };
        write_vec3(writer, normal)?;
        for corner in mesh.corners(tri) {
            write_vec3(writer, corner)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }
    Ok(())
}

/// Write `mesh` as text STL with computed normals.
pub fn write_ascii<W: Write>(writer: &mut W, mesh: &Mesh, solid_name: &str) -> Result<(), ConvertError> {
    writeln!(writer, "solid {solid_name}")?;
    for tri in mesh.triangles() {
        let n = mesh.normal(tri);
        writeln!(writer, "facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
        writeln!(writer, "  outer loop")?;
        for v in mesh.corners(tri) {
            writeln!(writer, "    vertex {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "  endloop")?;
        writeln!(writer, "endfacet")?;
    }
    writeln!(writer, "endsolid {solid_name}")?;
    Ok(())
}

/// Options for writing an STL file to disk.
#[derive(Debug, Clone)]
pub struct StlOptions {
    pub format: OutputFormat,
    pub header: String,
    pub solid_name: String,
    pub normals: Normals,
}

impl Default for StlOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Binary,
            header: CONVERTED_HEADER.to_string(),
            solid_name: DEFAULT_SOLID_NAME.to_string(),
            normals: Normals::Computed,
        }
    }
}

/// Create or overwrite `path` with `mesh`. A failure part way leaves a truncated file.
pub fn write_file(path: &Path, mesh: &Mesh, options: &StlOptions) -> Result<(), ConvertError> {
    let file = File::create(path).map_err(|e| ConvertError::Io(path.to_path_buf(), e))?;
    let mut writer = BufWriter::new(file);
    let written = match options.format {
        OutputFormat::Binary => write_binary(&mut writer, mesh, &options.header, options.normals),
        OutputFormat::Ascii => write_ascii(&mut writer, mesh, &options.solid_name),
    };
    written
        .and_then(|()| writer.flush().map_err(ConvertError::from))
        .map_err(|e| e.at(path))?;

    info!(
        "Written {} triangles to {} ({:?})",
        mesh.triangles().len(),
        path.display(),
        options.format
    );
    Ok(())
}

/// `text` as ASCII bytes, zero-padded or truncated to 80 bytes.
fn header_bytes(text: &str) -> [u8; HEADER_LEN] {
    let mut header = [0; HEADER_LEN];
    let bytes = text.as_bytes();
    if bytes.len() > HEADER_LEN {
        warn!("STL header '{}' is longer than {} bytes, truncating", text, HEADER_LEN);
    }
    let len = bytes.len().min(HEADER_LEN);
    header[..len].copy_from_slice(&bytes[..len]);
    header
}

fn write_vec3<W: Write>(writer: &mut W, v: Vec3) -> Result<(), ConvertError> {
    for c in v.to_array() {
        writer.write_all(&c.to_le_bytes())?;
    }
    Ok(())
}
