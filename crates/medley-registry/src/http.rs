use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use url::Url;

use crate::client::RegistryClient;
use crate::error::RegistryError;
use crate::task::TaskDefinition;

/// Key/secret pair exchanged for an access token at connect time.
#[derive(Debug, Clone)]
pub struct Credentials {
  pub key_id: String,
  pub key_secret: String,
}

/// Conductor-compatible HTTP registry client.
pub struct HttpRegistryClient {
  http: Client,
  base_url: Url,
  token: Option<String>,
}

impl HttpRegistryClient {
  /// Connect to the registry, exchanging credentials for a token when
  /// they are provided. Anonymous access is fine for local registries.
  pub async fn connect(
    base_url: &str,
    credentials: Option<Credentials>,
  ) -> Result<Self, RegistryError> {
    // Url::join drops the last path segment of a base without a trailing
    // slash, which would strip a proxied registry prefix.
    let base_url = if base_url.ends_with('/') {
      Url::parse(base_url)?
    } else {
      Url::parse(&format!("{base_url}/"))?
    };
    let http = Client::new();

    let token = match credentials {
      Some(credentials) => Some(fetch_token(&http, &base_url, &credentials).await?),
      None => None,
    };

    Ok(Self {
      http,
      base_url,
      token,
    })
  }

  fn endpoint(&self, path: &str) -> Result<Url, RegistryError> {
    Ok(self.base_url.join(path)?)
  }

  fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
    match &self.token {
      Some(token) => request.header("X-Authorization", token),
      None => request,
    }
  }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
  async fn register_task_definition(
    &self,
    definition: &TaskDefinition,
  ) -> Result<(), RegistryError> {
    let url = self.endpoint("api/metadata/taskdefs")?;
    tracing::debug!(name = %definition.name, "registering task definition");

    // The endpoint takes a batch; the registrar sends one definition per
    // call so each name gets a definite outcome to classify.
    let response = self
      .authorized(self.http.post(url))
      .json(&[definition])
      .send()
      .await?;
    check(response).await
  }

  async fn register_form_template(&self, document: &Value) -> Result<(), RegistryError> {
    let url = self.endpoint("api/human/template")?;
    tracing::debug!("registering form template");

    let response = self
      .authorized(self.http.post(url))
      .json(document)
      .send()
      .await?;
    check(response).await
  }

  async fn register_workflow_definition(
    &self,
    document: &Value,
    overwrite: bool,
  ) -> Result<(), RegistryError> {
    let mut url = self.endpoint("api/metadata/workflow")?;
    url
      .query_pairs_mut()
      .append_pair("overwrite", if overwrite { "true" } else { "false" });
    tracing::debug!(overwrite, "registering workflow definition");

    let response = self
      .authorized(self.http.post(url))
      .json(document)
      .send()
      .await?;
    check(response).await
  }
}

async fn fetch_token(
  http: &Client,
  base_url: &Url,
  credentials: &Credentials,
) -> Result<String, RegistryError> {
  let url = base_url.join("api/token")?;
  let response = http
    .post(url)
    .json(&serde_json::json!({
      "keyId": credentials.key_id,
      "keySecret": credentials.key_secret,
    }))
    .send()
    .await?;

  if !response.status().is_success() {
    let status = response.status().as_u16();
    let message = rejection_message(response).await;
    return Err(RegistryError::Auth {
      message: format!("token exchange returned {status}: {message}"),
    });
  }

  let body: Value = response.json().await?;
  body
    .get("token")
    .and_then(Value::as_str)
    .map(str::to_string)
    .ok_or_else(|| RegistryError::Auth {
      message: "token missing from token exchange response".to_string(),
    })
}

/// Map a non-success response into [`RegistryError::Rejected`].
async fn check(response: Response) -> Result<(), RegistryError> {
  if response.status().is_success() {
    return Ok(());
  }

  let status = response.status().as_u16();
  let message = rejection_message(response).await;
  Err(RegistryError::Rejected { status, message })
}

/// Prefer the JSON `message` field when the error body carries one.
async fn rejection_message(response: Response) -> String {
  let text = response.text().await.unwrap_or_default();
  match serde_json::from_str::<Value>(&text) {
    Ok(body) => body
      .get("message")
      .and_then(Value::as_str)
      .map(str::to_string)
      .unwrap_or(text),
    Err(_) => text,
  }
}
