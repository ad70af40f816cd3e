use log::{debug, info};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use super::models::Collection;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with {status}")]
    Status { url: String, status: StatusCode },
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// A trait, necessary for every entity that serves the `users` and `products` collections.
/// Identifiers are assigned by the backend; updates always carry the full entity.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn get_all<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, BackendError>;

    async fn create<T: Serialize + DeserializeOwned>(
        &self,
        collection: Collection,
        body: &T,
    ) -> Result<T, BackendError>;

    async fn update<T: Serialize + DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
        body: &T,
    ) -> Result<T, BackendError>;

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), BackendError>;
}

impl<B: Backend> Backend for &B {
    async fn get_all<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, BackendError> {
        (**self).get_all(collection).await
    }

    async fn create<T: Serialize + DeserializeOwned>(
        &self,
        collection: Collection,
        body: &T,
    ) -> Result<T, BackendError> {
        (**self).create(collection, body).await
    }

    async fn update<T: Serialize + DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
        body: &T,
    ) -> Result<T, BackendError> {
        (**self).update(collection, id, body).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), BackendError> {
        (**self).delete(collection, id).await
    }
}

/// Hosted REST resource reachable at `{base_url}/{collection}`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        HttpBackend { client, base_url }
    }

    pub fn collection_url(&self, collection: Collection) -> String {
        format!("{}/{}", self.base_url, collection.path())
    }

    pub fn entity_url(&self, collection: Collection, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection.path(), id)
    }
}

fn transport_error(url: &str) -> impl FnOnce(reqwest::Error) -> BackendError {
    let url = url.to_owned();
    move |source| BackendError::Transport { url, source }
}

fn check_status(url: &str, response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(BackendError::Status {
            url: url.to_owned(),
            status,
        })
    }
}

impl Backend for HttpBackend {
    async fn get_all<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, BackendError> {
        let url = self.collection_url(collection);
        info!("Getting all {} from {}", collection, url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error(&url))?;
        check_status(&url, response)?
            .json()
            .await
            .map_err(transport_error(&url))
    }

    async fn create<T: Serialize + DeserializeOwned>(
        &self,
        collection: Collection,
        body: &T,
    ) -> Result<T, BackendError> {
        let url = self.collection_url(collection);
        debug!("Creating entity in {}", url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error(&url))?;
        check_status(&url, response)?
            .json()
            .await
            .map_err(transport_error(&url))
    }

    async fn update<T: Serialize + DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
        body: &T,
    ) -> Result<T, BackendError> {
        let url = self.entity_url(collection, id);
        debug!("Updating {}", url);
        let response = self
            .client
            .put(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error(&url))?;
        check_status(&url, response)?
            .json()
            .await
            .map_err(transport_error(&url))
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), BackendError> {
        let url = self.entity_url(collection, id);
        debug!("Deleting {}", url);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(transport_error(&url))?;
        check_status(&url, response)?;
        Ok(())
    }
}
