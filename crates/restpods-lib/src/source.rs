//! Pod retrieval
//!
//! The report only needs a list of pod snapshots. [`KubePodSource`] reads them
//! from the cluster using the current kube context, [`StaticPodSource`] serves
//! an in-memory or file-based list.

use crate::error::{ReportError, SourceError};
use crate::models::{PodListDocument, PodSnapshot};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, ListParams};
use kube::Client;
use std::path::Path;
use tracing::{debug, info};

/// Source of pod snapshots
#[async_trait]
pub trait PodSource: Send + Sync {
    /// List pods in `namespace`, or in all namespaces when `None`
    async fn list(&self, namespace: Option<&str>) -> Result<Vec<PodSnapshot>, SourceError>;
}

/// Pod source backed by the Kubernetes API
pub struct KubePodSource {
    client: Client,
}

impl KubePodSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect using the local kubeconfig or in-cluster configuration
    pub async fn try_default() -> Result<Self, SourceError> {
        let client = Client::try_default().await?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl PodSource for KubePodSource {
    async fn list(&self, namespace: Option<&str>) -> Result<Vec<PodSnapshot>, SourceError> {
        let api: Api<Pod> = match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };

        let pods = api.list(&ListParams::default()).await?;
        info!(
            namespace = namespace.unwrap_or("*"),
            count = pods.items.len(),
            "Listed pods"
        );

        Ok(pods.items.iter().map(PodSnapshot::from).collect())
    }
}

/// Pod source serving a fixed list of snapshots
#[derive(Debug, Clone, Default)]
pub struct StaticPodSource {
    pods: Vec<PodSnapshot>,
}

impl StaticPodSource {
    pub fn new(pods: Vec<PodSnapshot>) -> Self {
        Self { pods }
    }

    /// Parse a `kubectl get pods -o json` document
    pub fn from_json(content: &str) -> Result<Self, ReportError> {
        let document: PodListDocument = serde_json::from_str(content)?;
        Ok(Self::new(document.items.iter().map(PodSnapshot::from).collect()))
    }

    /// Read a `kubectl get pods -o json` document from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }
}

#[async_trait]
impl PodSource for StaticPodSource {
    async fn list(&self, namespace: Option<&str>) -> Result<Vec<PodSnapshot>, SourceError> {
        let pods: Vec<PodSnapshot> = self
            .pods
            .iter()
            .filter(|pod| namespace.map_or(true, |ns| pod.namespace == ns))
            .cloned()
            .collect();
        debug!(count = pods.len(), "Listed static pods");
        Ok(pods)
    }
}
