use crate::base::{Config, Dof};
use crate::mesh::{Domain, MeshImage, Partition, StructuredMesh};
use crate::StrError;
use log::{error, info};

/// Validates the configuration before any mesh is generated
pub fn check_config(config: &Config) -> Result<(), StrError> {
    if let Some(message) = config.validate() {
        error!("{}", message);
        return Err("configuration is invalid");
    }
    if config.loading.axis != Dof::Ux {
        error!("loading axis = {} is not supported; it must be Ux", config.loading.axis);
        return Err("loading must be applied along Ux");
    }
    Ok(())
}

/// Generates the mesh of this process and writes the mesh image if requested
pub fn generate_mesh(config: &Config) -> Result<StructuredMesh, StrError> {
    info!("generating problem mesh");
    let domain = Domain::new(&config.domain)?;
    let partition = Partition::new(config.run.n_process, config.run.rank)?;
    let mesh = StructuredMesh::new(domain, partition)?;
    info!(
        "ndiv = {:?}, ncell = {}, npoint = {}",
        mesh.domain.ndiv,
        mesh.n_cell(),
        mesh.n_point()
    );
    if let Some(path) = &config.run.mesh_image_path {
        MeshImage::new(config.run.mesh_image_threshold).write_best_effort(&mesh, path);
    }
    Ok(mesh)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
