//! The remote todo service as seen by the driver.

use async_trait::async_trait;
use tracing::debug;

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Todo, TodoClient, TodoPatch};

/// The four remote operations the list needs. Any error is treated as a
/// plain failure by the caller.
#[async_trait]
pub trait TodoApi: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Todo>, ApiError>;
    async fn create(&self, title: &str) -> Result<Todo, ApiError>;
    async fn update(&self, id: i64, patch: &TodoPatch) -> Result<Todo, ApiError>;
    async fn remove(&self, id: i64) -> Result<(), ApiError>;
}

/// `TodoApi` over HTTP: `TodoClient` builds and parses, reqwest moves bytes.
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    client: TodoClient,
    http: reqwest::Client,
}

impl HttpTodoApi {
    pub fn new(base_url: &str, user_id: i64) -> Self {
        Self {
            client: TodoClient::new(base_url, user_id),
            http: reqwest::Client::new(),
        }
    }

    /// Run one request. Error statuses come back as data so the core parser
    /// decides what they mean.
    async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %req.method, path = %req.path, "sending request");
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.http.request(method, &req.path);
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(status, "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.execute(self.client.build_list_todos()).await?;
        self.client.parse_list_todos(response)
    }

    async fn create(&self, title: &str) -> Result<Todo, ApiError> {
        let req = self.client.build_create_todo(title)?;
        let response = self.execute(req).await?;
        self.client.parse_create_todo(response)
    }

    async fn update(&self, id: i64, patch: &TodoPatch) -> Result<Todo, ApiError> {
        let req = self.client.build_update_todo(id, patch)?;
        let response = self.execute(req).await?;
        self.client.parse_update_todo(response)
    }

    async fn remove(&self, id: i64) -> Result<(), ApiError> {
        let response = self.execute(self.client.build_delete_todo(id)).await?;
        self.client.parse_delete_todo(response)
    }
}
