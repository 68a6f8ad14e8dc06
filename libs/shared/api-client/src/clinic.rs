use reqwest::{
    Client,
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::error::ApiError;

pub const CSRF_HEADER: &str = "x-csrftoken";
pub const REQUESTED_WITH_HEADER: &str = "x-requested-with";

/// HTTP client for the clinic backend's JSON endpoints.
///
/// Every request asks for JSON and identifies itself as an XHR so the backend
/// answers the same way it answers its own dashboard pages. State-changing
/// requests also carry the CSRF token header.
#[derive(Clone)]
pub struct ClinicApiClient {
    client: Client,
    base_url: String,
    csrf_token: String,
    session_id: Option<String>,
}

impl ClinicApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.clinic_base_url.trim_end_matches('/').to_string(),
            csrf_token: config.csrf_token.clone(),
            session_id: config.session_id.clone(),
        }
    }

    fn get_headers(&self, with_csrf: bool) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(REQUESTED_WITH_HEADER),
            HeaderValue::from_static("XMLHttpRequest"),
        );

        if with_csrf {
            headers.insert(
                HeaderName::from_static(CSRF_HEADER),
                header_value(&self.csrf_token)?,
            );
        }

        if let Some(session_id) = &self.session_id {
            let mut cookie = format!("sessionid={}", session_id);
            if !self.csrf_token.is_empty() {
                cookie.push_str(&format!("; csrftoken={}", self.csrf_token));
            }
            headers.insert(COOKIE, header_value(&cookie)?);
        }

        Ok(headers)
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let with_csrf = method != Method::GET && method != Method::HEAD;
        let headers = self.get_headers(with_csrf)?;

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(body_data) = body {
            req = req
                .header(CONTENT_TYPE, "application/json")
                .json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Clinic API error ({}): {}", status, error_text);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let bytes = response.bytes().await?;
        let data = serde_json::from_slice::<T>(&bytes)?;
        Ok(data)
    }

    pub async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<T>(&self, path: &str, body: Option<Value>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, body).await
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }
}

fn header_value(raw: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(raw).map_err(|e| ApiError::InvalidHeader(e.to_string()))
}
