use crate::models::UserProfile;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Appwrite API client for user profiles
///
/// Profiles carry the home location and interest categories that the
/// featured feed is personalised with.
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    profiles_collection: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        profiles_collection: String,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            profiles_collection,
        })
    }

    /// Get a single profile by user ID
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile, AppwriteError> {
        let query = user_id_query(user_id)?;

        let url = format!(
            "{}/databases/{}/collections/{}/documents?queries[]={}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.profiles_collection,
            urlencoding::encode(&query)
        );

        tracing::debug!("Fetching profile for user: {}", user_id);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppwriteError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch profile for {}: {} - {}", user_id, status, body);
            return Err(AppwriteError::ApiError(format!(
                "Failed to fetch profile: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        let doc = documents
            .first()
            .ok_or_else(|| AppwriteError::NotFound(format!("Profile not found for user {}", user_id)))?;

        let data = doc.get("data").unwrap_or(doc);

        serde_json::from_value(data.clone())
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }
}

/// `equal("userId", [..])` filter with the id JSON-escaped so it stays a single value
fn user_id_query(user_id: &str) -> Result<String, AppwriteError> {
    let value = serde_json::to_string(user_id)
        .map_err(|e| AppwriteError::InvalidRequest(format!("Failed to encode user id: {}", e)))?;
    Ok(format!("equal(\"userId\", [{}])", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(url: &str) -> AppwriteClient {
        AppwriteClient::new(
            url.to_string(),
            "test_key".to_string(),
            "test_project".to_string(),
            "test_db".to_string(),
            "users".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_appwrite_client_creation() {
        let client = client_for("https://appwrite.test/v1");

        assert_eq!(client.base_url, "https://appwrite.test/v1");
        assert_eq!(client.api_key, "test_key");
        assert_eq!(client.profiles_collection, "users");
    }

    #[tokio::test]
    async fn test_get_profile_parses_document() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/databases/test_db/collections/users/documents")
            .match_query(mockito::Matcher::Any)
            .match_header("X-Appwrite-Project", "test_project")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "total": 1,
                    "documents": [{
                        "$id": "doc1",
                        "userId": "user_1",
                        "name": "Asha",
                        "location": { "city": "Pune", "state": "Maharashtra", "country": "India" },
                        "interests": ["tech", "music"]
                    }]
                }"#,
            )
            .create_async()
            .await;

        let client = client_for(&server.url());
        let profile = client.get_profile("user_1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(profile.user_id, "user_1");
        assert_eq!(profile.location.unwrap().city.as_deref(), Some("Pune"));
        assert_eq!(profile.interests, vec!["tech", "music"]);
    }

    #[tokio::test]
    async fn test_get_profile_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/databases/test_db/collections/users/documents")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"total": 0, "documents": []}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let result = client.get_profile("ghost").await;

        assert!(matches!(result, Err(AppwriteError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_profile_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/databases/test_db/collections/users/documents")
            .match_query(mockito::Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let result = client.get_profile("user_1").await;

        assert!(matches!(result, Err(AppwriteError::Unauthorized)));
    }

    #[test]
    fn test_user_id_query_escapes_quotes() {
        assert_eq!(user_id_query("user_1").unwrap(), r#"equal("userId", ["user_1"])"#);
        assert_eq!(
            user_id_query(r#"x", "victim"#).unwrap(),
            r#"equal("userId", ["x\", \"victim"])"#
        );
    }

    #[tokio::test]
    async fn test_get_profile_quoted_id_stays_one_value() {
        let mut server = mockito::Server::new_async().await;
        let widened = server
            .mock("GET", "/databases/test_db/collections/users/documents")
            .match_query(mockito::Matcher::UrlEncoded(
                "queries[]".into(),
                r#"equal("userId", ["x", "victim"])"#.into(),
            ))
            .with_status(200)
            .with_body(r#"{"total": 1, "documents": [{ "userId": "victim" }]}"#)
            .expect(0)
            .create_async()
            .await;
        let escaped = server
            .mock("GET", "/databases/test_db/collections/users/documents")
            .match_query(mockito::Matcher::UrlEncoded(
                "queries[]".into(),
                r#"equal("userId", ["x\", \"victim"])"#.into(),
            ))
            .with_status(200)
            .with_body(r#"{"total": 0, "documents": []}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let result = client.get_profile(r#"x", "victim"#).await;

        widened.assert_async().await;
        escaped.assert_async().await;
        assert!(matches!(result, Err(AppwriteError::NotFound(_))));
    }
}
