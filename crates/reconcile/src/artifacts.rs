use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use dso_admin_common::{constant::ARTIFACT_EXTENSION, prelude::*};
use serde::Serialize;
use tracing::{debug, info};

/// A deployable archive found on disk. The application name is the file stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeployReport {
    /// Applications installed by this run
    pub installed: Vec<String>,
    /// Applications that were already installed
    pub skipped: Vec<String>,
}

/// List the archives in `dir`, sorted by application name.
pub fn scan_artifacts(dir: &Path) -> Result<Vec<Artifact>, DeployError> {
    let read_err = |source| DeployError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut artifacts = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(ARTIFACT_EXTENSION)
        {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        artifacts.push(Artifact {
            name: name.to_string(),
            path,
        });
    }

    artifacts.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(artifacts)
}

/// Split `available` into artifacts that still need installing and the names
/// of those already installed.
pub fn partition_pending(
    available: Vec<Artifact>,
    installed: &[String],
) -> (Vec<Artifact>, Vec<String>) {
    let installed: HashSet<&str> = installed.iter().map(String::as_str).collect();
    let (skipped, pending): (Vec<_>, Vec<_>) = available
        .into_iter()
        .partition(|a| installed.contains(a.name.as_str()));
    (pending, skipped.into_iter().map(|a| a.name).collect())
}

/// Installs every archive of a directory that the host does not know yet.
pub struct ArtifactInstaller<C> {
    client: C,
    options: InstallOptions,
}

impl<C: ArtifactDeployer> ArtifactInstaller<C> {
    pub fn new(client: C, options: InstallOptions) -> Self {
        Self { client, options }
    }

    /// Reads the installed list once, then installs each pending archive in
    /// name order. Stops at the first failed install.
    pub fn deploy_dir(&self, dir: &Path) -> Result<DeployReport, DeployError> {
        let available = scan_artifacts(dir)?;
        let installed = self
            .client
            .list_installed()
            .map_err(DeployError::ListError)?;

        let (pending, skipped) = partition_pending(available, &installed);
        for name in &skipped {
            debug!("{name} is already installed");
        }

        let mut report = DeployReport {
            installed: Vec::with_capacity(pending.len()),
            skipped,
        };

        for artifact in pending {
            info!("installing {} from {}", artifact.name, artifact.path.display());
            self.client
                .install_artifact(&artifact.path, &artifact.name, &self.options)
                .map_err(|source| DeployError::InstallError {
                    name: artifact.name.clone(),
                    source,
                })?;
            report.installed.push(artifact.name);
        }

        Ok(report)
    }
}
