//! Minimal REST client for one Appwrite document collection.

use anyhow::Result;
use reqwest::{Client, Method, header};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::AnalyticsConfig;
use crate::constants::appwrite;

#[derive(Debug, Deserialize)]
pub struct DocumentList<T> {
    #[serde(default)]
    pub total: u64,
    #[serde(default = "Vec::new")]
    pub documents: Vec<T>,
}

/// Filter, ordering and paging understood by the list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Equal { attribute: String, value: String },
    OrderDesc(String),
    Limit(u64),
    Offset(u64),
}

impl Query {
    pub fn equal(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equal {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// JSON form sent as a `queries[]` parameter.
    #[must_use]
    pub fn to_param(&self) -> String {
        match self {
            Self::Equal { attribute, value } => json!({
                "method": "equal",
                "attribute": attribute,
                "values": [value],
            })
            .to_string(),
            Self::OrderDesc(attribute) => json!({
                "method": "orderDesc",
                "attribute": attribute,
            })
            .to_string(),
            Self::Limit(n) => json!({"method": "limit", "values": [n]}).to_string(),
            Self::Offset(n) => json!({"method": "offset", "values": [n]}).to_string(),
        }
    }
}

#[derive(Serialize)]
struct CreateDocument<'a, T> {
    #[serde(rename = "documentId")]
    document_id: &'a str,
    data: &'a T,
}

#[derive(Serialize)]
struct UpdateDocument<'a, T> {
    data: &'a T,
}

#[derive(Clone)]
pub struct AppwriteClient {
    client: Client,
    endpoint: String,
    project_id: String,
    database_id: String,
    collection_id: String,
    api_key: Option<String>,
}

impl AppwriteClient {
    pub fn new(client: Client, config: &AnalyticsConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            database_id: config.database_id.clone(),
            collection_id: config.collection_id.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, self.collection_id
        )
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json")
            .header("X-Appwrite-Project", &self.project_id);

        match &self.api_key {
            Some(key) => builder.header("X-Appwrite-Key", key),
            None => builder,
        }
    }

    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        queries: &[Query],
    ) -> Result<DocumentList<T>> {
        let params: Vec<(&str, String)> = queries.iter().map(|q| ("queries[]", q.to_param())).collect();

        let response = self
            .request(Method::GET, &self.documents_url())
            .query(&params)
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Every matching document, fetched page by page until `total` is reached.
    pub async fn list_all_documents<T: DeserializeOwned>(&self, queries: &[Query]) -> Result<Vec<T>> {
        let mut documents = Vec::new();

        loop {
            let offset = documents.len() as u64;
            let mut page_queries = queries.to_vec();
            page_queries.push(Query::Limit(appwrite::PAGE_SIZE));
            page_queries.push(Query::Offset(offset));

            let page: DocumentList<T> = self.list_documents(&page_queries).await?;
            let received = page.documents.len();
            documents.extend(page.documents);

            if received == 0 || documents.len() as u64 >= page.total {
                break;
            }
        }

        Ok(documents)
    }

    pub async fn create_document<T: Serialize, R: DeserializeOwned>(&self, data: &T) -> Result<R> {
        let body = CreateDocument {
            document_id: appwrite::UNIQUE_ID,
            data,
        };

        let response = self
            .request(Method::POST, &self.documents_url())
            .json(&body)
            .send()
            .await?;

        Self::parse(response).await
    }

    pub async fn update_document<T: Serialize, R: DeserializeOwned>(
        &self,
        document_id: &str,
        data: &T,
    ) -> Result<R> {
        let url = format!("{}/{}", self.documents_url(), document_id);

        let response = self
            .request(Method::PATCH, &url)
            .json(&UpdateDocument { data })
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn parse<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Appwrite API error: {} - {}", status, body));
        }

        Ok(response.json().await?)
    }
}
