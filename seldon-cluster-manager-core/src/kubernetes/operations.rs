use std::fmt::Debug;

use k8s_openapi::{
    api::core::v1::Namespace,
    serde::{de::DeserializeOwned, Serialize},
    Metadata, NamespaceResourceScope,
};
use kube::{
    api::{DeleteParams, ListParams, Patch, PatchParams, PostParams},
    config::{KubeConfigOptions, Kubeconfig},
    core::ObjectMeta,
    Api, Client, Config, Resource,
};
use log::{debug, info, warn};

use crate::{
    error::{ClusterOperationError, InitializationError},
    helpers::{is_not_found, pretty_type_name},
    manager::config::ManagerConfig,
};

pub async fn create_client(config: &ManagerConfig) -> Result<Client, InitializationError> {
    let config_options = KubeConfigOptions {
        context: config.kube_context.to_owned(),
        ..Default::default()
    };

    let client_config = match (&config.master_url, &config.kube_config) {
        (Some(url), _) => {
            if config.kube_config.is_some() || config.kube_context.is_some() {
                warn!("Connecting to '{url}' directly, kubeconfig settings are ignored!");
            }

            let cluster_url = url
                .parse()
                .map_err(|_| InitializationError::InvalidMasterUrl(url.to_owned()))?;

            Config::new(cluster_url)
        }
        (None, Some(path)) => {
            let kubeconfig = Kubeconfig::read_from(path).map_err(InitializationError::Kubeconfig)?;

            Config::from_custom_kubeconfig(kubeconfig, &config_options)
                .await
                .map_err(InitializationError::Kubeconfig)?
        }
        (None, None) if config.kube_context.is_some() => Config::from_kubeconfig(&config_options)
            .await
            .map_err(InitializationError::Kubeconfig)?,
        (None, None) => Config::infer()
            .await
            .map_err(InitializationError::InferConfig)?,
    };

    debug!("Connecting to the cluster at {}...", client_config.cluster_url);

    Client::try_from(client_config).map_err(InitializationError::Client)
}

pub async fn list_namespace_names(client: &Client) -> Result<Vec<String>, ClusterOperationError> {
    let namespace_api: Api<Namespace> = Api::all(client.clone());
    let namespaces = namespace_api.list_metadata(&ListParams::default()).await?;

    Ok(namespaces
        .items
        .into_iter()
        .filter_map(|namespace| namespace.metadata.name)
        .collect())
}

pub async fn list_labelled_resources<T>(
    client: &Client,
    namespace: &str,
    label_selector: &str,
) -> Result<Vec<T>, ClusterOperationError>
where
    T: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + DeserializeOwned
        + Debug,
{
    let resource_api: Api<T> = Api::namespaced(client.clone(), namespace);
    let resources = resource_api
        .list(&ListParams::default().labels(label_selector))
        .await?;

    debug!(
        "Found {} {} resource(s) matching '{label_selector}' in '{namespace}' namespace",
        resources.items.len(),
        pretty_type_name::<T>()
    );

    Ok(resources.items)
}

pub async fn create_resource<T>(
    client: &Client,
    resource: &T,
    post_params: &PostParams,
) -> Result<T, ClusterOperationError>
where
    T: Metadata<Ty = ObjectMeta>
        + Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Serialize
        + Clone
        + DeserializeOwned
        + Debug,
{
    let (resource_name, namespace) = require_name_and_namespace(resource)?;

    info!(
        "Creating '{resource_name}' {} resource on the cluster...",
        pretty_type_name::<T>()
    );

    let resource_api: Api<T> = Api::namespaced(client.clone(), namespace);

    Ok(resource_api.create(post_params, resource).await?)
}

pub async fn apply_resource<T>(
    client: &Client,
    resource: &T,
    patch_params: &PatchParams,
) -> Result<T, ClusterOperationError>
where
    T: Metadata<Ty = ObjectMeta>
        + Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Serialize
        + Clone
        + DeserializeOwned
        + Debug,
{
    let (resource_name, namespace) = require_name_and_namespace(resource)?;

    info!(
        "Updating '{resource_name}' {} resource on the cluster...",
        pretty_type_name::<T>()
    );

    let resource_api: Api<T> = Api::namespaced(client.clone(), namespace);

    Ok(resource_api
        .patch(resource_name, patch_params, &Patch::Apply(resource))
        .await?)
}

/// Deletes a namespaced resource, a resource that is already gone counts as deleted.
pub async fn remove_resource<T>(
    client: &Client,
    name: &str,
    namespace: &str,
    delete_params: &DeleteParams,
) -> Result<(), ClusterOperationError>
where
    T: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + DeserializeOwned
        + Debug,
{
    let resource_type = pretty_type_name::<T>();

    info!("Removing '{name}' {resource_type} from the cluster...");

    let resource_api: Api<T> = Api::namespaced(client.clone(), namespace);

    match resource_api.delete(name, delete_params).await {
        Ok(_) => Ok(()),
        Err(error) if is_not_found(&error) => {
            debug!("'{name}' {resource_type} is already gone");
            Ok(())
        }
        Err(error) => Err(error.into()),
    }
}

fn require_name_and_namespace<T>(resource: &T) -> Result<(&str, &str), ClusterOperationError>
where
    T: Metadata<Ty = ObjectMeta>,
{
    let metadata = resource.metadata();
    let name = metadata
        .name
        .as_deref()
        .ok_or(ClusterOperationError::MissingObjectMetadata)?;
    let namespace = metadata
        .namespace
        .as_deref()
        .ok_or(ClusterOperationError::MissingObjectMetadata)?;

    Ok((name, namespace))
}
