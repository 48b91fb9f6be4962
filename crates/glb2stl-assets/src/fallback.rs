//! Heuristic recovery when a container cannot be parsed
//!
//! The whole input is read as a flat run of little-endian `f32`, grouped into
//! vertices and stitched into a triangle fan around the first vertex. The
//! result is only a rough preview of whatever geometry the file contains.

use std::fs;
use std::path::Path;

use glb2stl_core::{Triangle, Vertex};
use tracing::{info, warn};

use crate::error::ConvertError;
use crate::mesh::{Mesh, MeshSummary};
use crate::stl::{self, Normals, OutputFormat, StlOptions};

/// Header text of meshes produced by the fallback path.
pub const FALLBACK_HEADER: &str = "Simple extraction";

/// Limits and labelling for the fallback mesh.
#[derive(Debug, Clone)]
pub struct FallbackOptions {
    pub max_vertices: usize,
    pub max_triangles: usize,
    pub header: String,
}

impl Default for FallbackOptions {
    fn default() -> Self {
        Self {
            max_vertices: 100,
            max_triangles: 98,
            header: FALLBACK_HEADER.to_string(),
        }
    }
}

/// Build a fan mesh from raw bytes, or `None` if fewer than three vertices can be formed.
pub fn fan_mesh(data: &[u8], options: &FallbackOptions) -> Result<Option<Mesh>, ConvertError> {
    let floats: Vec<f32> = data
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    let vertices: Vec<Vertex> = floats
        .chunks_exact(3)
        .map(|c| Vertex::new(c[0], c[1], c[2]))
        .collect();

    if vertices.len() < 3 {
        return Ok(None);
    }

    let kept = vertices.len().min(options.max_vertices);
    let triangles: Vec<Triangle> = (1..vertices.len() - 1)
        .take(options.max_triangles)
        .map(|i| Triangle::new(0, i as u32, (i + 1) as u32))
        .filter(|tri| (tri.max_index() as usize) < kept)
        .collect();

    let mut vertices = vertices;
    vertices.truncate(kept);
    Mesh::new(vertices, triangles).map(Some)
}

/// Recover what geometry we can from `input` and write it to `output` as binary STL.
///
/// Returns `Ok(None)` without touching `output` when the input is too small.
pub fn extract_fallback(
    input: &Path,
    output: &Path,
    options: &FallbackOptions,
) -> Result<Option<MeshSummary>, ConvertError> {
    let data = fs::read(input).map_err(|e| ConvertError::Io(input.to_path_buf(), e))?;

    let Some(mesh) = fan_mesh(&data, options)? else {
        warn!("Could not extract sufficient vertex data from {}", input.display());
        return Ok(None);
    };

    let stl_options = StlOptions {
        format: OutputFormat::Binary,
        header: options.header.clone(),
        normals: Normals::Zero,
        ..StlOptions::default()
    };
    stl::write_file(output, &mesh, &stl_options)?;
    info!("Fallback: wrote {} faces to {}", mesh.triangles().len(), output.display());
    Ok(Some(mesh.summary()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glb2stl_core::Vec3;

    fn floats_to_bytes(floats: &[f32]) -> Vec<u8> {
        floats.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    #[test]
    fn test_four_vertices_make_two_triangles() {
        let floats: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let mesh = fan_mesh(&floats_to_bytes(&floats), &FallbackOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.vertices()[3], Vec3::new(9.0, 10.0, 11.0));
        assert_eq!(
            mesh.triangles(),
            &[Triangle::new(0, 1, 2), Triangle::new(0, 2, 3)]
        );
    }

    #[test]
    fn test_trailing_bytes_and_floats_ignored() {
        // 11 floats and 3 stray bytes: only three whole vertices.
        let mut data = floats_to_bytes(&[1.0; 11]);
        data.extend_from_slice(&[7, 7, 7]);
        let mesh = fan_mesh(&data, &FallbackOptions::default()).unwrap().unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.triangles(), &[Triangle::new(0, 1, 2)]);
    }

    #[test]
    fn test_too_few_vertices() {
        let data = floats_to_bytes(&[1.0; 8]);
        assert!(fan_mesh(&data, &FallbackOptions::default()).unwrap().is_none());
        assert!(fan_mesh(&[], &FallbackOptions::default()).unwrap().is_none());
    }

    #[test]
    fn test_clamped_to_limits() {
        let data = floats_to_bytes(&vec![0.5; 3 * 500]);
        let mesh = fan_mesh(&data, &FallbackOptions::default()).unwrap().unwrap();
        assert_eq!(mesh.vertices().len(), 100);
        assert_eq!(mesh.triangles().len(), 98);
        assert_eq!(mesh.triangles()[97], Triangle::new(0, 98, 99));
    }

    #[test]
    fn test_writes_zero_normal_binary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.bin");
        let output = dir.path().join("output.stl");
        let floats: Vec<f32> = (0..12).map(|i| i as f32 + 0.5).collect();
        fs::write(&input, floats_to_bytes(&floats)).unwrap();

        let summary = extract_fallback(&input, &output, &FallbackOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(summary.triangles, 2);

        let bytes = fs::read(&output).unwrap();
        assert_eq!(bytes.len(), stl::binary_size(2));
        assert_eq!(&bytes[..FALLBACK_HEADER.len()], FALLBACK_HEADER.as_bytes());
        assert!(bytes[FALLBACK_HEADER.len()..80].iter().all(|&b| b == 0));
        for record in bytes[84..].chunks(stl::RECORD_LEN) {
            assert!(record[..12].iter().all(|&b| b == 0));
        }
        // Second triangle is (0, 2, 3): its second corner is vertex 2.
        let second = &bytes[84 + stl::RECORD_LEN..];
        assert_eq!(&second[24..36], &floats_to_bytes(&floats[6..9])[..]);
    }

    #[test]
    fn test_small_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.bin");
        let output = dir.path().join("output.stl");
        fs::write(&input, [0u8; 20]).unwrap();

        let summary = extract_fallback(&input, &output, &FallbackOptions::default()).unwrap();
        assert!(summary.is_none());
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_fallback(
            &dir.path().join("nope.glb"),
            &dir.path().join("out.stl"),
            &FallbackOptions::default(),
        );
        assert!(matches!(result, Err(ConvertError::Io(_, _))));
    }
}
