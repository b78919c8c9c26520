//! Firestore REST client
//!
//! Reads whole collections through `projects.databases.documents.list`,
//! following page tokens until the collection is exhausted.

use super::models::{convert_fields, ListDocumentsResponse};
use crate::adapters::store::{DocumentStore, StoreDocument};
use crate::config::FirestoreConfig;
use crate::domain::ids::CollectionName;
use crate::domain::{DocsheetError, Result, StoreError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

/// Firestore document store client
///
/// # Example
///
/// ```no_run
/// use docsheet::adapters::firestore::FirestoreClient;
/// use docsheet::adapters::store::DocumentStore;
/// use docsheet::config::FirestoreConfig;
/// use docsheet::domain::CollectionName;
///
/// # async fn example() -> docsheet::domain::Result<()> {
/// let config = FirestoreConfig {
///     project_id: "my-project".to_string(),
///     ..Default::default()
/// };
/// let client = FirestoreClient::new(config)?;
/// let docs = client.query_all(&CollectionName::new("users").unwrap()).await?;
/// println!("{} documents", docs.len());
/// # Ok(())
/// # }
/// ```
pub struct FirestoreClient {
    /// HTTP client for making requests
    client: Client,

    /// `{base_url}/projects/{project}/databases/{database}/documents`
    documents_root: Url,

    /// Firestore configuration
    config: FirestoreConfig,
}

impl FirestoreClient {
    /// Create a new Firestore client
    ///
    /// # Errors
    ///
    /// Returns [`DocsheetError::Configuration`] if the base URL is unusable or
    /// the HTTP client cannot be built.
    pub fn new(config: FirestoreConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification disabled for Firestore client");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            DocsheetError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        let documents_root = documents_root(&config)?;

        Ok(Self {
            client,
            documents_root,
            config,
        })
    }

    /// URL listing the documents of `collection`
    ///
    /// Slash-separated subcollection paths (`users/alice/orders`) are
    /// supported; a path with an even number of segments names a document
    /// and is rejected.
    fn collection_url(&self, collection: &CollectionName) -> Result<Url> {
        let segments: Vec<&str> = collection.as_str().split('/').collect();

        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(StoreError::InvalidRequest(format!(
                "collection path '{collection}' contains an empty segment"
            ))
            .into());
        }
        if segments.len() % 2 == 0 {
            return Err(StoreError::InvalidRequest(format!(
                "'{collection}' is a document path, not a collection path"
            ))
            .into());
        }

        let mut url = self.documents_root.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidRequest("base URL cannot be a base".to_string()))?
            .extend(segments);
        Ok(url)
    }

    /// Fetch one page of documents
    async fn fetch_page(
        &self,
        url: &Url,
        page_token: Option<&str>,
    ) -> Result<ListDocumentsResponse> {
        let mut query: Vec<(&str, String)> = vec![("pageSize", self.config.page_size.to_string())];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }
        if let Some(ref key) = self.config.api_key {
            query.push(("key", key.expose_secret().as_ref().to_string()));
        }

        let response = self
            .client
            .get(url.clone())
            .query(&query)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, body).into());
        }

        response
            .json::<ListDocumentsResponse>()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()).into())
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn query_all(&self, collection: &CollectionName) -> Result<Vec<StoreDocument>> {
        let url = self.collection_url(collection)?;
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self.fetch_page(&url, page_token.as_deref()).await?;
            pages += 1;

            let next = page.next_page().map(str::to_string);
            for doc in page.documents {
                let id = doc.id().to_string();
                let fields = convert_fields(doc.fields).map_err(|e| {
                    StoreError::InvalidResponse(format!("document '{id}': {e}"))
                })?;
                documents.push(StoreDocument::new(id, fields));
            }

            tracing::debug!(
                collection = %collection,
                page = pages,
                fetched = documents.len(),
                "Fetched Firestore page"
            );

            match next {
                Some(token) if page_token.as_deref() == Some(token.as_str()) => {
                    return Err(StoreError::InvalidResponse(format!(
                        "nextPageToken '{token}' repeated after page {pages}"
                    ))
                    .into());
                }
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::info!(
            collection = %collection,
            documents = documents.len(),
            pages = pages,
            "Read Firestore collection"
        );

        Ok(documents)
    }

    fn describe(&self) -> String {
        format!(
            "firestore project '{}' database '{}'",
            self.config.project_id, self.config.database_id
        )
    }
}

fn documents_root(config: &FirestoreConfig) -> Result<Url> {
    let mut url = Url::parse(&config.base_url).map_err(|e| {
        DocsheetError::Configuration(format!(
            "Invalid firestore.base_url '{}': {e}",
            config.base_url
        ))
    })?;

    url.path_segments_mut()
        .map_err(|_| {
            DocsheetError::Configuration(format!(
                "firestore.base_url '{}' cannot be used as a base URL",
                config.base_url
            ))
        })?
        .pop_if_empty()
        .extend([
            "projects",
            config.project_id.as_str(),
            "databases",
            config.database_id.as_str(),
            "documents",
        ]);

    Ok(url)
}

fn map_transport_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::Timeout(err.to_string())
    } else {
        StoreError::ConnectionFailed(err.to_string())
    }
}

fn map_status_error(status: StatusCode, body: String) -> StoreError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            StoreError::PermissionDenied(format!("{status}: {body}"))
        }
        s if s.is_server_error() => StoreError::ServerError {
            status: s.as_u16(),
            message: body,
        },
        s => StoreError::ClientError {
            status: s.as_u16(),
            message: body,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::domain::FieldValue;
    use mockito::Matcher;

    const LIST_PATH: &str = "/v1/projects/demo/databases/(default)/documents/users";

    fn config_for(base_url: String) -> FirestoreConfig {
        FirestoreConfig {
            project_id: "demo".to_string(),
            base_url,
            page_size: 2,
            ..Default::default()
        }
    }

    fn users() -> CollectionName {
        CollectionName::new("users").unwrap()
    }

    #[test]
    fn test_documents_root_handles_trailing_slash() {
        let config = config_for("http://localhost:8080/v1/".to_string());
        let root = documents_root(&config).unwrap();
        assert_eq!(
            root.as_str(),
            "http://localhost:8080/v1/projects/demo/databases/(default)/documents"
        );
    }

    #[test]
    fn test_collection_url_subcollection() {
        let client = FirestoreClient::new(config_for("http://localhost:8080/v1".to_string()))
            .unwrap();
        let url = client
            .collection_url(&CollectionName::new("users/alice/orders").unwrap())
            .unwrap();
        assert!(url.as_str().ends_with("/documents/users/alice/orders"));
    }

    #[test]
    fn test_collection_url_rejects_document_path() {
        let client = FirestoreClient::new(config_for("http://localhost:8080/v1".to_string()))
            .unwrap();
        let err = client
            .collection_url(&CollectionName::new("users/alice").unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            DocsheetError::StoreQuery(StoreError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_map_status_error() {
        assert!(matches!(
            map_status_error(StatusCode::FORBIDDEN, String::new()),
            StoreError::PermissionDenied(_)
        ));
        assert!(matches!(
            map_status_error(StatusCode::SERVICE_UNAVAILABLE, String::new()),
            StoreError::ServerError { status: 503, .. }
        ));
        assert!(matches!(
            map_status_error(StatusCode::NOT_FOUND, String::new()),
            StoreError::ClientError { status: 404, .. }
        ));
    }

    #[tokio::test]
    async fn test_query_all_follows_page_tokens() {
        let mut server = mockito::Server::new_async().await;

        let first = server
            .mock("GET", LIST_PATH)
            .match_query(Matcher::Regex("^pageSize=2$".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "documents": [
                        {"name": "projects/demo/databases/(default)/documents/users/a",
                         "fields": {"x": {"integerValue": "1"}}},
                        {"name": "projects/demo/databases/(default)/documents/users/b",
                         "fields": {"x": {"integerValue": "2"}}}
                    ],
                    "nextPageToken": "page-2"
                }"#,
            )
            .create_async()
            .await;

        let second = server
            .mock("GET", LIST_PATH)
            .match_query(Matcher::UrlEncoded("pageToken".to_string(), "page-2".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"documents": [
                    {"name": "projects/demo/databases/(default)/documents/users/c",
                     "fields": {"x": {"integerValue": "3"}}}
                ]}"#,
            )
            .create_async()
            .await;

        let client = FirestoreClient::new(config_for(format!("{}/v1", server.url()))).unwrap();
        let docs = client.query_all(&users()).await.unwrap();

        first.assert_async().await;
        second.assert_async().await;

        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(docs[2].fields["x"], FieldValue::Integer(3));
    }

    #[tokio::test]
    async fn test_query_all_rejects_repeated_page_token() {
        let mut server = mockito::Server::new_async().await;
        let page = |id: &str| {
            format!(
                r#"{{"documents": [
                    {{"name": "projects/demo/databases/(default)/documents/users/{id}",
                     "fields": {{}}}}
                ], "nextPageToken": "loop"}}"#
            )
        };

        let first = server
            .mock("GET", LIST_PATH)
            .match_query(Matcher::Regex("^pageSize=2$".to_string()))
            .with_status(200)
            .with_body(page("a"))
            .create_async()
            .await;
        let repeated = server
            .mock("GET", LIST_PATH)
            .match_query(Matcher::UrlEncoded("pageToken".to_string(), "loop".to_string()))
            .with_status(200)
            .with_body(page("b"))
            .expect(1)
            .create_async()
            .await;

        let client = FirestoreClient::new(config_for(format!("{}/v1", server.url()))).unwrap();
        let err = client.query_all(&users()).await.unwrap_err();

        first.assert_async().await;
        repeated.assert_async().await;
        match err {
            DocsheetError::StoreQuery(StoreError::InvalidResponse(message)) => {
                assert!(message.contains("'loop'"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_query_all_empty_collection() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", LIST_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let client = FirestoreClient::new(config_for(format!("{}/v1", server.url()))).unwrap();
        let docs = client.query_all(&users()).await.unwrap();

        mock.assert_async().await;
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_query_all_sends_api_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", LIST_PATH)
            .match_query(Matcher::UrlEncoded("key".to_string(), "web-key".to_string()))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let mut config = config_for(format!("{}/v1", server.url()));
        config.api_key = Some(secret_string("web-key".to_string()));
        let client = FirestoreClient::new(config).unwrap();
        client.query_all(&users()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_query_all_permission_denied() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", LIST_PATH)
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error": {"status": "PERMISSION_DENIED"}}"#)
            .create_async()
            .await;

        let client = FirestoreClient::new(config_for(format!("{}/v1", server.url()))).unwrap();
        let err = client.query_all(&users()).await.unwrap_err();

        assert!(matches!(
            err,
            DocsheetError::StoreQuery(StoreError::PermissionDenied(_))
        ));
    }

    #[tokio::test]
    async fn test_query_all_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", LIST_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = FirestoreClient::new(config_for(format!("{}/v1", server.url()))).unwrap();
        let err = client.query_all(&users()).await.unwrap_err();

        assert!(matches!(
            err,
            DocsheetError::StoreQuery(StoreError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_query_all_connection_refused() {
        // Port 9 (discard) is almost never listening locally.
        let client =
            FirestoreClient::new(config_for("http://127.0.0.1:9/v1".to_string())).unwrap();
        let err = client.query_all(&users()).await.unwrap_err();

        assert!(matches!(err, DocsheetError::StoreQuery(_)));
    }
}
