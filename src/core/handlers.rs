//! Request entrypoints. Each handler parses an [`ApiRequest`], calls the service and
//! always answers with an [`ApiResponse`]; errors become status codes here and nowhere else.

use crate::core::service::CustomerService;
use crate::domain::ports::CustomerRepository;
use crate::utils::error::{CustomerError, ErrorCategory};
use crate::utils::validation::{read_customer_patch, read_new_customer, JsonObject};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const ID_REQUIRED: &str = "Customer ID is required";

/// The subset of an API Gateway proxy event the handlers read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn with_id(id: impl Into<String>) -> Self {
        let mut path_parameters = HashMap::new();
        path_parameters.insert("id".to_string(), id.into());
        Self {
            path_parameters: Some(path_parameters),
            ..Default::default()
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.http_method = Some(method.into());
        self
    }

    fn id(&self) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get("id"))
            .map(String::as_str)
            .filter(|id| !id.trim().is_empty())
    }

    /// An absent or blank body is read as `{}`. Anything but a JSON object is malformed.
    fn json_body(&self) -> Result<JsonObject, CustomerError> {
        match self.body.as_deref().map(str::trim) {
            None | Some("") => Ok(JsonObject::new()),
            Some(body) => Ok(serde_json::from_str(body)?),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    pub fn json(status_code: u16, body: serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }

    pub fn error(status_code: u16, message: &str) -> Self {
        Self::json(status_code, json!({ "error": message }))
    }

    pub fn from_error(err: &CustomerError) -> Self {
        if err.category() == ErrorCategory::Internal {
            tracing::error!("Unexpected error: {}", err);
        } else {
            tracing::warn!(status = err.status_code(), "request rejected: {}", err);
        }
        Self::error(err.status_code(), &err.public_message())
    }

    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    Update,
    Delete,
}

impl Operation {
    pub fn from_http_method(method: &str) -> Option<Self> {
        match method.to_ascii_uppercase().as_str() {
            "POST" => Some(Self::Create),
            "GET" => Some(Self::Get),
            "PUT" | "PATCH" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl FromStr for Operation {
    type Err = CustomerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "get" => Ok(Self::Get),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(CustomerError::ConfigError {
                message: format!("Unknown customer operation: {}", other),
            }),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Get => "get",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Runs `operation`, or the one implied by the request method when none is configured.
pub async fn dispatch<R: CustomerRepository>(
    service: &CustomerService<R>,
    operation: Option<Operation>,
    request: ApiRequest,
) -> ApiResponse {
    let operation = operation.or_else(|| {
        request
            .http_method
            .as_deref()
            .and_then(Operation::from_http_method)
    });

    match operation {
        Some(Operation::Create) => create_customer(service, request).await,
        Some(Operation::Get) => get_customer(service, request).await,
        Some(Operation::Update) => update_customer(service, request).await,
        Some(Operation::Delete) => delete_customer(service, request).await,
        None => ApiResponse::error(400, "Unsupported operation"),
    }
}

pub async fn create_customer<R: CustomerRepository>(
    service: &CustomerService<R>,
    request: ApiRequest,
) -> ApiResponse {
    let result = match request.json_body().and_then(|body| read_new_customer(&body)) {
        Ok(data) => service.create_customer(data).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(id) => ApiResponse::json(201, json!({ "message": "Customer created", "id": id })),
        Err(e) => ApiResponse::from_error(&e),
    }
}

pub async fn get_customer<R: CustomerRepository>(
    service: &CustomerService<R>,
    request: ApiRequest,
) -> ApiResponse {
    let Some(id) = request.id() else {
        return ApiResponse::error(400, ID_REQUIRED);
    };

    match service.get_customer(id).await {
        Ok(Some(customer)) => ApiResponse::json(200, json!(customer)),
        Ok(None) => ApiResponse::from_error(&CustomerError::not_found("Customer")),
        Err(e) => ApiResponse::from_error(&e),
    }
}

pub async fn update_customer<R: CustomerRepository>(
    service: &CustomerService<R>,
    request: ApiRequest,
) -> ApiResponse {
    let Some(id) = request.id() else {
        return ApiResponse::error(400, ID_REQUIRED);
    };

    let result = match request.json_body().and_then(|body| read_customer_patch(&body)) {
        Ok(data) => service.update_customer(id, data).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(customer) => ApiResponse::json(
            200,
            json!({ "message": "Customer updated", "customer": customer }),
        ),
        Err(e) => ApiResponse::from_error(&e),
    }
}

/// The existence check lives here: deleting an unknown id answers 404.
pub async fn delete_customer<R: CustomerRepository>(
    service: &CustomerService<R>,
    request: ApiRequest,
) -> ApiResponse {
    let Some(id) = request.id() else {
        return ApiResponse::error(400, ID_REQUIRED);
    };

    let result = match service.get_customer(id).await {
        Ok(Some(_)) => service.delete_customer(id).await,
        Ok(None) => Err(CustomerError::not_found("Customer")),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ApiResponse::json(200, json!({ "message": "Customer deleted" })),
        Err(e) => ApiResponse::from_error(&e),
    }
}
