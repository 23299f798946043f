use anyhow::{anyhow, Context, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Thin PostgREST client. Every call carries the anon key, and the caller's
/// bearer token when one is given so row-level security applies.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    fn get_headers(&self, auth_token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.anon_key).context("Invalid anon key header")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = auth_token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .context("Invalid bearer token header")?,
            );
        }

        Ok(headers)
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        body: Option<Value>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.request_with_headers(method, path, auth_token, body, None).await
    }

    pub async fn request_with_headers<T>(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut headers = self.get_headers(auth_token)?;
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Authentication error: {}", error_text),
                404 => anyhow!("Resource not found: {}", error_text),
                _ => anyhow!("API error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Insert a row and return the stored representation.
    pub async fn insert<T>(&self, table: &str, auth_token: Option<&str>, row: Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let mut rows: Vec<T> = self
            .request_with_headers(
                Method::POST,
                &format!("/rest/v1/{}", table),
                auth_token,
                Some(row),
                Some(headers),
            )
            .await?;

        if rows.is_empty() {
            return Err(anyhow!("Insert into {} returned no representation", table));
        }

        Ok(rows.swap_remove(0))
    }

    /// Call a database function exposed under `/rest/v1/rpc/`.
    pub async fn rpc<T>(&self, function: &str, auth_token: Option<&str>, args: Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.request(
            Method::POST,
            &format!("/rest/v1/rpc/{}", function),
            auth_token,
            Some(args),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared_config::MatchingConfig;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(url: String) -> AppConfig {
        AppConfig {
            supabase_url: url,
            supabase_anon_key: "test-anon-key".to_string(),
            supabase_jwt_secret: "secret".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            matching: MatchingConfig::default(),
        }
    }

    #[tokio::test]
    async fn insert_returns_first_representation_row() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/things"))
            .and(header("Prefer", "return=representation"))
            .and(header("apikey", "test-anon-key"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([{"id": 7}])))
            .mount(&mock_server)
            .await;

        let client = SupabaseClient::new(&config_for(mock_server.uri()));
        let row: Value = client
            .insert("things", Some("token"), json!({"name": "x"}))
            .await
            .unwrap();

        assert_eq!(row["id"], 7);
    }

    #[tokio::test]
    async fn maps_404_to_not_found_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
            .mount(&mock_server)
            .await;

        let client = SupabaseClient::new(&config_for(mock_server.uri()));
        let err = client
            .request::<Value>(Method::GET, "/rest/v1/missing", None, None)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Resource not found"));
    }

    #[tokio::test]
    async fn rpc_posts_arguments() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/echo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
            .mount(&mock_server)
            .await;

        let client = SupabaseClient::new(&config_for(mock_server.uri()));
        let values: Vec<i32> = client.rpc("echo", None, json!({"a": 1})).await.unwrap();

        assert_eq!(values, vec![1, 2, 3]);
    }
}
