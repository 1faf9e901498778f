//! Record store backed by the platform's HTTP collection API

use super::{Patch, RecordStore, StoreError};
use crate::shared::api_utils::collection_url;
use async_trait::async_trait;
use contracts::shared::record::RawRecord;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub struct HttpRecordStore {
    base_url: String,
}

#[derive(Serialize)]
struct BatchEntry<'a> {
    id: &'a str,
    fields: &'a RawRecord,
}

impl HttpRecordStore {
    /// `base_url` from `[api] base_url`; empty derives it from the window location
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, collection: &str, id: Option<&str>) -> String {
        collection_url(&self.base_url, collection, id)
    }
}

fn transport(e: gloo_net::Error) -> StoreError {
    StoreError::Transport(e.to_string())
}

async fn read_json<T: DeserializeOwned>(
    response: Response,
    collection: &str,
    id: Option<&str>,
) -> Result<T, StoreError> {
    let status = response.status();
    if status == 404 {
        if let Some(id) = id {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
    }
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(StoreError::Rejected(format!("HTTP {}: {}", status, body)));
    }
    response.json::<T>().await.map_err(transport)
}

#[async_trait(?Send)]
impl RecordStore for HttpRecordStore {
    async fn query_all(&self, collection: &str) -> Result<Vec<RawRecord>, StoreError> {
        let url = self.url(collection, None);
        log::debug!("GET {}", url);
        let response = Request::get(&url).send().await.map_err(transport)?;
        read_json(response, collection, None).await
    }

    async fn insert(&self, collection: &str, fields: RawRecord) -> Result<RawRecord, StoreError> {
        let url = self.url(collection, None);
        log::debug!("POST {}", url);
        let response = Request::post(&url)
            .json(&fields)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        read_json(response, collection, None).await
    }

    async fn patch(&self, collection: &str, patch: Patch) -> Result<RawRecord, StoreError> {
        let url = self.url(collection, Some(&patch.id));
        log::debug!("PATCH {}", url);
        let response = Request::patch(&url)
            .json(&patch.fields)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        read_json(response, collection, Some(&patch.id)).await
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<RawRecord, StoreError> {
        let url = self.url(collection, Some(id));
        log::debug!("DELETE {}", url);
        let response = Request::delete(&url).send().await.map_err(transport)?;
        read_json(response, collection, Some(id)).await
    }

    async fn patch_batch(
        &self,
        collection: &str,
        patches: Vec<Patch>,
    ) -> Result<Vec<RawRecord>, StoreError> {
        let url = format!("{}/batch", self.url(collection, None));
        let body: Vec<BatchEntry<'_>> = patches
            .iter()
            .map(|p| BatchEntry {
                id: &p.id,
                fields: &p.fields,
            })
            .collect();
        log::debug!("POST {} ({} patches)", url, body.len());
        let response = Request::post(&url)
            .json(&body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        // The platform answers 404/501 when the batch endpoint is not deployed
        if matches!(response.status(), 404 | 501) {
            return Err(StoreError::Unsupported("patch_batch"));
        }
        read_json(response, collection, None).await
    }
}
