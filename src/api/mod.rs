mod client;
mod error;
mod resource;

pub use client::Payload;
pub use error::ApiError;
pub use resource::*;

use client::Client;
use log::*;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::path::Path;

/// Responsible for asynchronous interaction with the collections API
/// including transformation of response data into explicitly-defined types.
///
pub struct Recall {
    client: Client,
}

impl Recall {
    /// Returns a new instance for the given base URL and optional API key.
    ///
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Recall, ApiError> {
        debug!("Initializing API client for {}...", base_url);
        Ok(Recall {
            client: Client::new(base_url, api_key)?,
        })
    }

    /// Returns the names of all collections.
    ///
    pub async fn collections(&self) -> Result<Vec<String>, ApiError> {
        debug!("Requesting collections...");
        let payload = self.client.request(Method::GET, &[], None).await?;
        list_field(&payload.data, "collections")
    }

    /// Create a collection with the given name.
    ///
    pub async fn create_collection(&self, name: &str) -> Result<Ack, ApiError> {
        debug!("Creating collection '{}'...", name);
        let payload = self
            .client
            .request(Method::POST, &[], Some(json!({ "name": name })))
            .await?;
        Ok(ack(payload))
    }

    /// Remove every entry from a collection.
    ///
    pub async fn reset_collection(&self, name: &str) -> Result<Ack, ApiError> {
        debug!("Resetting collection '{}'...", name);
        let payload = self
            .client
            .request(Method::POST, &[name, "reset"], None)
            .await?;
        Ok(ack(payload))
    }

    /// Upload a file from disk into a collection.
    ///
    pub async fn upload(&self, name: &str, path: &Path) -> Result<Ack, ApiError> {
        debug!("Uploading {} to collection '{}'...", path.display(), name);
        let contents = tokio::fs::read(path).await.map_err(|e| ApiError::File {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let payload = self
            .client
            .upload(&[name, "upload"], file_name, contents)
            .await?;
        Ok(ack(payload))
    }

    /// Returns the external sources registered for a collection.
    ///
    pub async fn sources(&self, name: &str) -> Result<Vec<Source>, ApiError> {
        debug!("Requesting sources for collection '{}'...", name);
        let payload = self
            .client
            .request(Method::GET, &[name, "sources"], None)
            .await?;
        list_field(&payload.data, "sources")
    }

    /// Register an external source polled every `update_interval` minutes.
    ///
    pub async fn add_source(
        &self,
        name: &str,
        url: &str,
        update_interval: u32,
    ) -> Result<Ack, ApiError> {
        debug!("Adding source {} to collection '{}'...", url, name);
        let payload = self
            .client
            .request(
                Method::POST,
                &[name, "sources"],
                Some(json!({ "url": url, "update_interval": update_interval })),
            )
            .await?;
        Ok(ack(payload))
    }

    /// Remove the external source with the given URL.
    ///
    pub async fn remove_source(&self, name: &str, url: &str) -> Result<Ack, ApiError> {
        debug!("Removing source {} from collection '{}'...", url, name);
        let payload = self
            .client
            .request(Method::DELETE, &[name, "sources"], Some(json!({ "url": url })))
            .await?;
        Ok(ack(payload))
    }

    /// Returns the entries stored in a collection.
    ///
    pub async fn entries(&self, name: &str) -> Result<Vec<Entry>, ApiError> {
        debug!("Requesting entries for collection '{}'...", name);
        let payload = self
            .client
            .request(Method::GET, &[name, "entries"], None)
            .await?;
        list_field(&payload.data, "entries")
    }

    /// Returns the stored content of one entry.
    ///
    pub async fn entry_content(&self, name: &str, entry: &Entry) -> Result<EntryContent, ApiError> {
        debug!("Requesting content of entry {} in '{}'...", entry, name);
        let key = entry.key();
        let payload = self
            .client
            .request(Method::GET, &[name, "entries", &key], None)
            .await?;
        serde_json::from_value(payload.data).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    /// Delete an entry, echoing the entry payload back to the backend.
    ///
    pub async fn delete_entry(&self, name: &str, entry: &Entry) -> Result<Ack, ApiError> {
        debug!("Deleting entry {} from collection '{}'...", entry, name);
        let payload = self
            .client
            .request(
                Method::DELETE,
                &[name, "entry", "delete"],
                Some(json!({ "entry": entry })),
            )
            .await?;
        Ok(ack(payload))
    }

    /// Search a collection.
    ///
    pub async fn search(
        &self,
        name: &str,
        query: &str,
        max_results: i64,
    ) -> Result<Vec<SearchResult>, ApiError> {
        debug!(
            "Searching collection '{}' for '{}' (max {})...",
            name, query, max_results
        );
        let payload = self
            .client
            .request(
                Method::POST,
                &[name, "search"],
                Some(json!({ "query": query, "max_results": max_results })),
            )
            .await?;
        list_field(&payload.data, "results")
    }
}

fn ack(payload: Payload) -> Ack {
    Ack {
        message: payload.message,
    }
}

/// Extract a list field from a payload. Missing or null lists are empty; any
/// other non-conforming value is malformed.
///
fn list_field<T: DeserializeOwned>(data: &Value, field: &str) -> Result<Vec<T>, ApiError> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(vec![]),
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
            warn!("Unexpected '{}' field in response: {}", field, value);
            ApiError::Malformed(format!("'{}': {}", field, e))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::uuid::UUIDv4;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use std::io::Write;
    use uuid::Uuid;

    fn recall(server: &MockServer, api_key: Option<&str>) -> Recall {
        Recall::new(&server.base_url(), api_key).unwrap()
    }

    #[tokio::test]
    async fn collections_success() -> Result<(), ApiError> {
        let token: Uuid = UUIDv4.fake();
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/api/collections")
                    .header("Authorization", &format!("Bearer {}", &token));
                then.status(200).json_body(json!({
                    "success": true,
                    "message": "Collections retrieved successfully",
                    "data": { "collections": ["docs", "reports"], "count": 2 }
                }));
            })
            .await;

        let names = recall(&server, Some(&token.to_string())).collections().await?;
        mock.assert_async().await;
        assert_eq!(names, vec!["docs".to_string(), "reports".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn collections_non_array_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/api/collections");
                then.status(200).json_body(json!({
                    "success": true,
                    "data": { "collections": "docs" }
                }));
            })
            .await;

        let error = recall(&server, None).collections().await.unwrap_err();
        assert!(error.is_malformed());
    }

    #[tokio::test]
    async fn collections_unauthorized() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/api/collections");
                then.status(401).json_body(json!({
                    "success": false,
                    "error": { "code": "UNAUTHORIZED", "message": "Unauthorized", "details": "Invalid or missing API key" }
                }));
            })
            .await;

        let error = recall(&server, None).collections().await.unwrap_err();
        mock.assert_async().await;
        assert!(matches!(error, ApiError::Server { status: 401, .. }));
        assert_eq!(error.to_string(), "Unauthorized");
    }

    #[tokio::test]
    async fn create_collection_success() -> Result<(), ApiError> {
        let name: String = Faker.fake();
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/collections")
                    .json_body(json!({ "name": name }));
                then.status(201).json_body(json!({
                    "success": true,
                    "message": "Collection created successfully",
                    "data": { "name": name }
                }));
            })
            .await;

        let ack = recall(&server, None).create_collection(&name).await?;
        mock.assert_async().await;
        assert_eq!(ack.message.as_deref(), Some("Collection created successfully"));
        Ok(())
    }

    #[tokio::test]
    async fn reset_collection_success() -> Result<(), ApiError> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/api/collections/docs/reset");
                then.status(200).json_body(json!({ "success": true }));
            })
            .await;

        let ack = recall(&server, None).reset_collection("docs").await?;
        mock.assert_async().await;
        assert_eq!(ack, Ack::default());
        Ok(())
    }

    #[tokio::test]
    async fn upload_sends_multipart_file() -> Result<(), ApiError> {
        let mut file = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .expect("temp file");
        write!(file, "hello collection").expect("write temp file");
        let file_name = file
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/collections/docs/upload")
                    .header_exists("content-type")
                    .body_contains("name=\"file\"")
                    .body_contains(&file_name)
                    .body_contains("hello collection");
                then.status(200).json_body(json!({
                    "success": true,
                    "message": "File uploaded successfully"
                }));
            })
            .await;

        recall(&server, None).upload("docs", file.path()).await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn upload_missing_file_never_reaches_server() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.path_contains("/api/collections");
                then.status(200);
            })
            .await;

        let error = recall(&server, None)
            .upload("docs", Path::new("/definitely/not/here.txt"))
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::File { .. }));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn sources_success() -> Result<(), ApiError> {
        let sources: [Source; 2] = Faker.fake();
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/api/collections/docs/sources");
                then.status(200).json_body(json!({
                    "success": true,
                    "data": {
                        "collection": "docs",
                        "sources": [
                            { "url": sources[0].url, "update_interval": sources[0].update_interval, "last_update": sources[0].last_update },
                            { "url": sources[1].url, "update_interval": sources[1].update_interval, "last_update": sources[1].last_update },
                        ],
                        "count": 2
                    }
                }));
            })
            .await;

        let received = recall(&server, None).sources("docs").await?;
        mock.assert_async().await;
        assert_eq!(received, sources.to_vec());
        Ok(())
    }

    #[tokio::test]
    async fn add_and_remove_source_bodies() -> Result<(), ApiError> {
        let server = MockServer::start_async().await;
        let add = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/collections/docs/sources")
                    .json_body(json!({ "url": "https://example.com/feed", "update_interval": 15 }));
                then.status(200).json_body(json!({ "success": true }));
            })
            .await;
        let remove = server
            .mock_async(|when, then| {
                when.method("DELETE")
                    .path("/api/collections/docs/sources")
                    .json_body(json!({ "url": "https://example.com/feed" }));
                then.status(200).json_body(json!({ "success": true }));
            })
            .await;

        let recall = recall(&server, None);
        recall
            .add_source("docs", "https://example.com/feed", 15)
            .await?;
        recall.remove_source("docs", "https://example.com/feed").await?;
        add.assert_async().await;
        remove.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn entries_missing_field_is_empty() -> Result<(), ApiError> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/api/collections/docs/entries");
                then.status(200).json_body(json!({ "success": true, "data": {} }));
            })
            .await;

        assert!(recall(&server, None).entries("docs").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn delete_entry_echoes_payload() -> Result<(), ApiError> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("DELETE")
                    .path("/api/collections/docs/entry/delete")
                    .json_body(json!({ "entry": "notes.md" }));
                then.status(200).json_body(json!({
                    "success": true,
                    "message": "Entry deleted successfully"
                }));
            })
            .await;

        recall(&server, None)
            .delete_entry("docs", &Entry::new("notes.md"))
            .await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn entry_content_success() -> Result<(), ApiError> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path_contains("/api/collections/docs/entries/notes");
                then.status(200).json_body(json!({
                    "success": true,
                    "data": { "collection": "docs", "entry": "notes v2.md", "content": "# Notes", "chunk_count": 3 }
                }));
            })
            .await;

        let content = recall(&server, None)
            .entry_content("docs", &Entry::new("notes v2.md"))
            .await?;
        mock.assert_async().await;
        assert_eq!(content.content, "# Notes");
        assert_eq!(content.chunk_count, 3);
        Ok(())
    }

    #[tokio::test]
    async fn search_success() -> Result<(), ApiError> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/collections/docs/search")
                    .json_body(json!({ "query": "rust", "max_results": 5 }));
                then.status(200).json_body(json!({
                    "success": true,
                    "data": {
                        "query": "rust",
                        "results": [ { "ID": "1", "Content": "a" }, { "ID": "2", "Content": "b" } ],
                        "count": 2
                    }
                }));
            })
            .await;

        let results = recall(&server, None).search("docs", "rust", 5).await?;
        mock.assert_async().await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0["ID"], "1");
        Ok(())
    }
}
