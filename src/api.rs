//! A small client for the JSONPlaceholder `/todos` resource.
//!
//! The API accepts writes but persists nothing, so scenarios never need to clean up after
//! themselves and may run concurrently.

use crate::config::Config;
use crate::error::ApiError;
use crate::net::{self, Connector};
use http::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use http::{Method, Request, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper_util::client::legacy::Client as HttpClient;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// A todo as the API returns it.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TodoRecord {
    /// Server-assigned identifier.
    pub id: u64,
    /// Title text.
    pub title: String,
    /// Completion flag.
    pub completed: bool,
    /// Owning user.
    #[serde(rename = "userId")]
    pub user_id: u64,
}

/// A todo to create; the server assigns the id.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NewTodo {
    /// Title text.
    pub title: String,
    /// Completion flag.
    pub completed: bool,
    /// Owning user.
    #[serde(rename = "userId")]
    pub user_id: u64,
}

/// A decoded response.
#[derive(Clone, Debug)]
pub struct ApiResponse<T> {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Decoded JSON body.
    pub body: T,
}

impl<T> ApiResponse<T> {
    /// The declared media type of the body, if any and if it parses.
    pub fn content_type(&self) -> Option<mime::Mime> {
        self.headers
            .get(CONTENT_TYPE)?
            .to_str()
            .ok()?
            .parse()
            .ok()
    }

    /// Whether the body is declared as JSON.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .map_or(false, |m| m.type_() == mime::APPLICATION && m.subtype() == mime::JSON)
    }
}

/// Client for the `/todos` resource of a JSONPlaceholder-compatible API.
#[derive(Clone, Debug)]
pub struct TodoApi {
    base: Url,
    client: HttpClient<Connector, Full<Bytes>>,
}

impl TodoApi {
    /// A client for the API rooted at `base`.
    pub fn new(mut base: Url) -> Result<Self, ApiError> {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = HttpClient::builder(TokioExecutor::new()).build(net::connector()?);
        Ok(TodoApi { base, client })
    }

    /// A client for the configured API.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(config.api_url.clone())
    }

    /// The API root, always ending in `/`.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `GET /todos/{id}`.
    pub async fn get(&self, id: u64) -> Result<ApiResponse<TodoRecord>, ApiError> {
        let url = self.base.join(&format!("todos/{}", id))?;
        self.send(Method::GET, url, None).await
    }

    /// `GET /todos`, or `GET /todos?completed={bool}` to restrict by completion.
    pub async fn list(&self, completed: Option<bool>) -> Result<ApiResponse<Vec<TodoRecord>>, ApiError> {
        let mut url = self.base.join("todos")?;
        if let Some(completed) = completed {
            url.query_pairs_mut()
                .append_pair("completed", if completed { "true" } else { "false" });
        }
        self.send(Method::GET, url, None).await
    }

    /// `POST /todos`.
    pub async fn create(&self, todo: &NewTodo) -> Result<ApiResponse<TodoRecord>, ApiError> {
        let url = self.base.join("todos")?;
        let body = serde_json::to_vec(todo)?;
        self.send(Method::POST, url, Some(body)).await
    }

    /// `PUT /todos/{id}` with the whole record.
    pub async fn update(&self, todo: &TodoRecord) -> Result<ApiResponse<TodoRecord>, ApiError> {
        let url = self.base.join(&format!("todos/{}", todo.id))?;
        let body = serde_json::to_vec(todo)?;
        self.send(Method::PUT, url, Some(body)).await
    }

    /// `DELETE /todos/{id}`. The API answers with an empty object.
    pub async fn delete(
        &self,
        id: u64,
    ) -> Result<ApiResponse<serde_json::Map<String, serde_json::Value>>, ApiError> {
        let url = self.base.join(&format!("todos/{}", id))?;
        self.send(Method::DELETE, url, None).await
    }

    /// Any request against a path below the API root, with the body left as untyped JSON.
    ///
    /// Useful for probing error responses, whose bodies do not have the record shape.
    pub async fn raw(
        &self,
        method: Method,
        path: &str,
    ) -> Result<ApiResponse<serde_json::Value>, ApiError> {
        let url = self.base.join(path.trim_start_matches('/'))?;
        self.send(method, url, None).await
    }

    async fn send<T>(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        debug!(%method, %url, "api request");

        let mut req = Request::builder()
            .method(method.clone())
            .uri(url.as_str())
            .header(ACCEPT, "application/json");
        if body.is_some() {
            req = req.header(CONTENT_TYPE, "application/json; charset=utf-8");
        }
        let req = req.body(Full::new(Bytes::from(body.unwrap_or_default())))?;

        let res = self
            .client
            .request(req)
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let (parts, body) = res.into_parts();
        let bytes = body.collect().await?.to_bytes();
        debug!(%method, %url, status = %parts.status, len = bytes.len(), "api response");

        let body = serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            status: parts.status,
            source,
        })?;

        Ok(ApiResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_use_the_wire_field_names() {
        let record: TodoRecord = serde_json::from_str(
            r#"{"userId": 1, "id": 1, "title": "delectus aut autem", "completed": false}"#,
        )
        .unwrap();
        assert_eq!(record.user_id, 1);
        assert!(!record.completed);

        let json = serde_json::to_value(NewTodo {
            title: "Write tests".to_string(),
            completed: false,
            user_id: 1,
        })
        .unwrap();
        assert_eq!(json["userId"], 1);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn content_type_parses_media_type() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            "application/json; charset=utf-8".parse().unwrap(),
        );
        let res = ApiResponse {
            status: StatusCode::OK,
            headers,
            body: (),
        };
        assert!(res.is_json());
        assert_eq!(
            res.content_type().unwrap().get_param(mime::CHARSET),
            Some(mime::UTF_8)
        );

        let res = ApiResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: (),
        };
        assert!(!res.is_json());
    }

    #[tokio::test]
    async fn base_gets_a_trailing_slash() {
        let api = TodoApi::new(Url::parse("http://localhost:3000/api").unwrap()).unwrap();
        assert_eq!(api.base().as_str(), "http://localhost:3000/api/");
        assert_eq!(
            api.base().join("todos/1").unwrap().as_str(),
            "http://localhost:3000/api/todos/1"
        );
    }
}
