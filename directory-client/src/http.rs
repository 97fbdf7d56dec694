//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use shared::client::{AuthResponse, LoginRequest, SignupRequest};
use shared::models::{Employee, EmployeeInput};
use shared::response::{ApiResponse, MessageResponse};

/// Failure body: the envelope (`{success, message, error}`) or a bare `{message}`
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the directory server
///
/// No retries and no caching: every call is one request.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join path segments onto the base URL, escaping each one
    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
            let message = body.message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
            tracing::debug!(status = %status.as_u16(), message = %message, "Request failed");

            return Err(match status {
                StatusCode::BAD_REQUEST => ClientError::BadRequest { message },
                StatusCode::NOT_FOUND => ClientError::NotFound { message },
                _ => ClientError::Server {
                    status: status.as_u16(),
                    message,
                    detail: body.error,
                },
            });
        }

        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Pull `data` out of a success envelope
    fn data<T>(response: ApiResponse<T>) -> ClientResult<T> {
        response
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing data".to_string()))
    }

    // ========== Employee API ==========

    pub async fn list_employees(&self) -> ClientResult<Vec<Employee>> {
        let url = self.url(&["api", "employees"])?;
        let response: ApiResponse<Vec<Employee>> = Self::send(self.client.get(url)).await?;
        Self::data(response)
    }

    pub async fn get_employee(&self, id: &str) -> ClientResult<Employee> {
        let url = self.url(&["api", "employees", id])?;
        let response: ApiResponse<Employee> = Self::send(self.client.get(url)).await?;
        Self::data(response)
    }

    pub async fn create_employee(&self, input: &EmployeeInput) -> ClientResult<Employee> {
        let url = self.url(&["api", "employees"])?;
        let response: ApiResponse<Employee> =
            Self::send(self.client.post(url).json(input)).await?;
        Self::data(response)
    }

    pub async fn update_employee(&self, id: &str, input: &EmployeeInput) -> ClientResult<Employee> {
        let url = self.url(&["api", "employees", id])?;
        let response: ApiResponse<Employee> = Self::send(self.client.put(url).json(input)).await?;
        Self::data(response)
    }

    /// Returns the server's confirmation message
    pub async fn delete_employee(&self, id: &str) -> ClientResult<String> {
        let url = self.url(&["api", "employees", id])?;
        let response: ApiResponse<()> = Self::send(self.client.delete(url)).await?;
        Ok(response.message.unwrap_or_default())
    }

    // ========== Health API ==========

    pub async fn health_check(&self) -> ClientResult<MessageResponse> {
        let url = self.url(&["api", "health"])?;
        Self::send(self.client.get(url)).await
    }

    // ========== Auth API ==========

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        let url = self.url(&["api", "auth", "login"])?;
        Self::send(self.client.post(url).json(request)).await
    }

    pub async fn signup(&self, request: &SignupRequest) -> ClientResult<AuthResponse> {
        let url = self.url(&["api", "auth", "signup"])?;
        Self::send(self.client.post(url).json(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_escapes_segments() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:5000/")).unwrap();
        let url = client.url(&["api", "employees", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/employees/a%2Fb%20c");
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = HttpClient::new(&ClientConfig::new("http://example.com/directory")).unwrap();
        let url = client.url(&["api", "health"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/directory/api/health");
    }

    #[test]
    fn test_rejects_non_base_url() {
        let err = HttpClient::new(&ClientConfig::new("mailto:someone@example.com")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
