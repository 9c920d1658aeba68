//! Contracts of the remote administrative host.
//!
//! Every call is a blocking round trip. Implementations map a dropped or
//! refused connection to [`RemoteError::Connection`] and everything else to
//! [`RemoteError::Other`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::RemoteError,
    state::{ArgumentList, ObjectRef},
};

/// Read and replace a remote process's argument list as a whole.
pub trait ArgumentStore {
    fn get_arguments(&self) -> Result<ArgumentList, RemoteError>;
    fn set_arguments(&self, args: &ArgumentList) -> Result<(), RemoteError>;
}

/// Discover remote managed objects and read their attributes.
pub trait ObjectLocator {
    fn find_instances(&self, query: &str) -> Result<Vec<ObjectRef>, RemoteError>;
    fn get_attribute(&self, object: &ObjectRef, field: &str) -> Result<String, RemoteError>;
}

/// Pending configuration changes on the host, persisted by the caller after a
/// write.
pub trait ConfigSession {
    fn has_pending_changes(&self) -> Result<bool, RemoteError>;
    fn commit(&self) -> Result<(), RemoteError>;
}

/// Install web application archives on the host.
pub trait ArtifactDeployer {
    fn list_installed(&self) -> Result<Vec<String>, RemoteError>;
    fn install_artifact(
        &self,
        source: &Path,
        name: &str,
        options: &InstallOptions,
    ) -> Result<(), RemoteError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallOptions {
    /// Context root the application is served under, `/<name>` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_root: Option<String>,
    /// Let the host generate default resource bindings
    #[serde(default = "default_true")]
    pub use_default_bindings: bool,
}

fn default_true() -> bool {
    true
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            context_root: None,
            use_default_bindings: true,
        }
    }
}

impl InstallOptions {
    pub fn context_root_for(&self, name: &str) -> String {
        self.context_root
            .clone()
            .unwrap_or_else(|| format!("/{name}"))
    }
}

impl<T: ArgumentStore + ?Sized> ArgumentStore for &T {
    fn get_arguments(&self) -> Result<ArgumentList, RemoteError> {
        (**self).get_arguments()
    }

    fn set_arguments(&self, args: &ArgumentList) -> Result<(), RemoteError> {
        (**self).set_arguments(args)
    }
}

impl<T: ObjectLocator + ?Sized> ObjectLocator for &T {
    fn find_instances(&self, query: &str) -> Result<Vec<ObjectRef>, RemoteError> {
        (**self).find_instances(query)
    }

    fn get_attribute(&self, object: &ObjectRef, field: &str) -> Result<String, RemoteError> {
        (**self).get_attribute(object, field)
    }
}

impl<T: ConfigSession + ?Sized> ConfigSession for &T {
    fn has_pending_changes(&self) -> Result<bool, RemoteError> {
        (**self).has_pending_changes()
    }

    fn commit(&self) -> Result<(), RemoteError> {
        (**self).commit()
    }
}

impl<T: ArtifactDeployer + ?Sized> ArtifactDeployer for &T {
    fn list_installed(&self) -> Result<Vec<String>, RemoteError> {
        (**self).list_installed()
    }

    fn install_artifact(
        &self,
        source: &Path,
        name: &str,
        options: &InstallOptions,
    ) -> Result<(), RemoteError> {
        (**self).install_artifact(source, name, options)
    }
}
