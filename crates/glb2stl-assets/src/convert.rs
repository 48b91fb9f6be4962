//! Two-stage conversion: exact container parsing, then heuristic recovery
//!
//! The fallback stage never sees state from the failed primary attempt; it
//! starts again from the input path.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, info};

use crate::container::read_container;
use crate::error::ConvertError;
use crate::extract::extract_mesh;
use crate::fallback::{extract_fallback, FallbackOptions};
use crate::mesh::MeshSummary;
use crate::stl::{self, StlOptions};

/// Settings for a whole conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub stl: StlOptions,
    pub fallback: FallbackOptions,
}

/// How a conversion ended.
#[derive(Debug)]
pub enum Conversion {
    /// The container was decoded and written exactly.
    Primary(MeshSummary),
    /// The primary path failed with `cause` and the fallback ran. `written`
    /// is `None` when the input held too little data to write anything.
    Fallback {
        cause: ConvertError,
        written: Option<MeshSummary>,
    },
    /// Both stages failed.
    Failure {
        cause: ConvertError,
        fallback: ConvertError,
    },
}

impl Conversion {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failure { .. })
    }
}

/// Convert the container at `input` into an STL file at `output`.
pub fn convert(input: &Path, output: &Path, options: &ConvertOptions) -> Conversion {
    info!("Parsing {}...", input.display());
    let cause = match convert_primary(input, output, &options.stl) {
        Ok(summary) => return Conversion::Primary(summary),
        Err(e) => e,
    };
    debug!("Primary conversion failed: {:?}", cause);

    info!("Trying fallback extraction...");
    match extract_fallback(input, output, &options.fallback) {
        Ok(written) => Conversion::Fallback { cause, written },
        Err(fallback) => Conversion::Failure { cause, fallback },
    }
}

/// Decode the container exactly and write the mesh.
pub fn convert_primary(input: &Path, output: &Path, options: &StlOptions) -> Result<MeshSummary, ConvertError> {
    let file = File::open(input).map_err(|e| ConvertError::Io(input.to_path_buf(), e))?;
    let container = read_container(&mut BufReader::new(file)).map_err(|e| e.at(input))?;
    info!("Scene has {} mesh(es)", container.scene.mesh_count());

    let mesh = extract_mesh(&container.scene, &container.payload)?;
    let summary = mesh.summary();
    info!(
        "Extracted {} vertices, {} faces",
        summary.vertices, summary.triangles
    );
    if let Some(bounds) = summary.bounds {
        info!("Vertex bounds: X({:.3} to {:.3})", bounds.min.x, bounds.max.x);
        info!("              Y({:.3} to {:.3})", bounds.min.y, bounds.max.y);
        info!("              Z({:.3} to {:.3})", bounds.min.z, bounds.max.z);
    }

    stl::write_file(output, &mesh, options)?;
    Ok(summary)
}
