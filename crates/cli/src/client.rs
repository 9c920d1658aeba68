use std::{fs::File, path::Path, time::Duration};

use dso_admin_common::prelude::*;
use reqwest::{
    blocking::{Client, RequestBuilder, Response},
    StatusCode, Url,
};
use serde::de::DeserializeOwned;
use tracing::trace;

/// Blocking client for the administrative http bridge of one server.
pub struct HttpAdminClient {
    client: Client,
    base: Url,
    endpoint: RemoteEndpoint,
}

impl HttpAdminClient {
    pub fn new(url: &str, endpoint: RemoteEndpoint, timeout: Duration) -> anyhow::Result<Self> {
        let base = Url::parse(url)?;
        if base.cannot_be_a_base() {
            anyhow::bail!("admin url `{url}` cannot be used as a base url");
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &RemoteEndpoint {
        &self.endpoint
    }

    /// Build `<base>/api/v1/<segments...>`, escaping every segment.
    fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        // checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "v1"]).extend(segments);
        }
        url
    }

    fn arguments_url(&self) -> Url {
        let RemoteEndpoint { cell, node, server } = &self.endpoint;
        self.url([
            "cells",
            cell.as_str(),
            "nodes",
            node.as_str(),
            "servers",
            server.as_str(),
            "jvm",
            "arguments",
        ])
    }

    fn send(&self, req: RequestBuilder) -> Result<Response, RemoteError> {
        let res = req.send().map_err(map_reqwest_err)?;
        trace!("{} {}", res.status(), res.url());

        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().unwrap_or_default();
        let message = if body.is_empty() {
            status.to_string()
        } else {
            format!("{status}: {body}")
        };

        // the bridge is up but can no longer reach the server behind it
        Err(match status {
            StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => RemoteError::Connection(message),
            _ => RemoteError::Other(message),
        })
    }

    fn json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, RemoteError> {
        self.send(req)?.json().map_err(map_reqwest_err)
    }
}

/// Failures to reach the bridge, or losing it mid request, are connection
/// errors. Everything else, including undecodable bodies, is not.
fn map_reqwest_err(e: reqwest::Error) -> RemoteError {
    if e.is_connect() || e.is_timeout() || e.is_request() || e.is_body() {
        RemoteError::connection(e)
    } else {
        RemoteError::other(e)
    }
}

impl ArgumentStore for HttpAdminClient {
    fn get_arguments(&self) -> Result<ArgumentList, RemoteError> {
        self.json(self.client.get(self.arguments_url()))
    }

    fn set_arguments(&self, args: &ArgumentList) -> Result<(), RemoteError> {
        self.send(self.client.put(self.arguments_url()).json(args))
            .map(drop)
    }
}

impl ObjectLocator for HttpAdminClient {
    fn find_instances(&self, query: &str) -> Result<Vec<ObjectRef>, RemoteError> {
        let mut url = self.url(["objects"]);
        url.query_pairs_mut().append_pair("query", query);
        self.json(self.client.get(url))
    }

    fn get_attribute(&self, object: &ObjectRef, field: &str) -> Result<String, RemoteError> {
        let url = self.url(["objects", object.as_str(), "attributes", field]);
        self.json(self.client.get(url))
    }
}

impl ConfigSession for HttpAdminClient {
    fn has_pending_changes(&self) -> Result<bool, RemoteError> {
        self.json(self.client.get(self.url(["config", "pending"])))
    }

    fn commit(&self) -> Result<(), RemoteError> {
        self.send(self.client.post(self.url(["config", "save"])))
            .map(drop)
    }
}

impl ArtifactDeployer for HttpAdminClient {
    fn list_installed(&self) -> Result<Vec<String>, RemoteError> {
        self.json(self.client.get(self.url(["applications"])))
    }

    fn install_artifact(
        &self,
        source: &Path,
        name: &str,
        options: &InstallOptions,
    ) -> Result<(), RemoteError> {
        let file = File::open(source)
            .map_err(|e| RemoteError::other(format!("{}: {e}", source.display())))?;

        let mut url = self.url(["applications", name]);
        url.query_pairs_mut()
            .append_pair("context_root", &options.context_root_for(name))
            .append_pair(
                "default_bindings",
                if options.use_default_bindings {
                    "true"
                } else {
                    "false"
                },
            );

        self.send(
            self.client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, "application/java-archive")
                .body(file),
        )
        .map(drop)
    }
}
