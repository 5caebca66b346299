use super::envelope::{decode_error, decode_message};
use super::error::RpcError;
use super::methods::{MethodPaths, UPLOAD_FILE};
use crate::backend::{CustomerApi, FeedApi, FileUpload, SaveRequest};
use crate::config::{Auth, DeskConfig};
use crate::model::{BlogPost, Customer, CustomerSummary, FileRef, SaveReply, StatusReply};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, COOKIE};
use reqwest::multipart::{Form, Part};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;

pub const CSRF_HEADER: &str = "X-Frappe-CSRF-Token";

/// Whether a call changes server state and therefore carries the CSRF token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Read,
    Mutating,
}

/// HTTP client for `/api/method/<name>` calls.
#[derive(Clone)]
pub struct FrappeClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
    csrf: Option<HeaderValue>,
    paths: MethodPaths,
}

impl FrappeClient {
    pub fn new(cfg: &DeskConfig) -> Result<Self, RpcError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        match &cfg.auth {
            Auth::Guest => {}
            Auth::Token {
                api_key,
                api_secret,
            } => {
                let mut v = HeaderValue::from_str(&format!(
                    "token {}:{}",
                    api_key,
                    api_secret.expose_secret()
                ))
                .map_err(|_| RpcError::Header("Authorization"))?;
                v.set_sensitive(true);
                headers.insert(AUTHORIZATION, v);
            }
            Auth::Session { sid } => {
                let mut v = HeaderValue::from_str(&format!("sid={}", sid.expose_secret()))
                    .map_err(|_| RpcError::Header("Cookie"))?;
                v.set_sensitive(true);
                headers.insert(COOKIE, v);
            }
        }

        let csrf = match &cfg.csrf_token {
            Some(token) => {
                let mut v = HeaderValue::from_str(token.expose_secret())
                    .map_err(|_| RpcError::Header(CSRF_HEADER))?;
                v.set_sensitive(true);
                Some(v)
            }
            None => None,
        };

        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .default_headers(headers)
            .timeout(cfg.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: cfg.base_url.clone(),
            csrf,
            paths: MethodPaths::from_config(cfg),
        })
    }

    fn method_url(&self, method: &str) -> Result<reqwest::Url, RpcError> {
        self.base_url
            .join(&format!("api/method/{method}"))
            .map_err(|_| RpcError::Url(method.to_string()))
    }

    fn with_csrf(&self, req: reqwest::RequestBuilder, kind: CallKind) -> reqwest::RequestBuilder {
        match (&self.csrf, kind) {
            (Some(token), CallKind::Mutating) => req.header(CSRF_HEADER, token.clone()),
            _ => req,
        }
    }

    /// Invoke a whitelisted method with form-encoded arguments and decode its `message`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        args: &[(&str, &str)],
        kind: CallKind,
    ) -> Result<T, RpcError> {
        let url = self.method_url(method)?;
        tracing::debug!(method, ?kind, "remote call");
        let req = self.with_csrf(self.http.post(url).form(args), kind);
        let resp = req.send().await?;
        read_response(method, resp).await
    }

    /// Push a local file to the generic upload endpoint.
    pub async fn upload(&self, upload: &FileUpload) -> Result<FileRef, RpcError> {
        let bytes = tokio::fs::read(&upload.path)
            .await
            .map_err(|source| RpcError::Io {
                path: upload.path.display().to_string(),
                source,
            })?;
        let size = bytes.len();
        let part = Part::bytes(bytes).file_name(upload.file_name());
        let mut form = Form::new()
            .part("file", part)
            .text("is_private", if upload.is_private { "1" } else { "0" })
            .text("attached_to_doctype", upload.attached_to_doctype.clone());
        if let Some(name) = &upload.attached_to_name {
            form = form.text("attached_to_name", name.clone());
        }

        let url = self.method_url(UPLOAD_FILE)?;
        tracing::debug!(file = %upload.path.display(), size, "uploading file");
        let req = self.with_csrf(self.http.post(url).multipart(form), CallKind::Mutating);
        let resp = req.send().await?;
        read_response(UPLOAD_FILE, resp).await
    }
}

async fn read_response<T: DeserializeOwned>(
    method: &str,
    resp: reqwest::Response,
) -> Result<T, RpcError> {
    let status = resp.status();
    let body = resp.bytes().await?;
    if !status.is_success() {
        let err = decode_error(status.as_u16(), &body);
        tracing::debug!(method, status = status.as_u16(), error = %err, "remote call failed");
        return Err(err);
    }
    decode_message(&body)
}

impl CustomerApi for FrappeClient {
    async fn get_customers(&self) -> Result<Vec<CustomerSummary>, RpcError> {
        self.call(&self.paths.get_customers(), &[], CallKind::Read)
            .await
    }

    async fn get_customer(&self, docname: &str) -> Result<Customer, RpcError> {
        // The page sent the CSRF header on this fetch as well.
        self.call(
            &self.paths.get_customer(),
            &[("docname", docname)],
            CallKind::Mutating,
        )
        .await
    }

    async fn save_customer(&self, req: &SaveRequest) -> Result<SaveReply, RpcError> {
        self.call(
            &self.paths.save_customer(),
            &req.form_args(),
            CallKind::Mutating,
        )
        .await
    }

    async fn delete_customer(&self, docname: &str) -> Result<StatusReply, RpcError> {
        self.call(
            &self.paths.delete_customer(),
            &[("docname", docname)],
            CallKind::Mutating,
        )
        .await
    }

    async fn upload_file(&self, upload: &FileUpload) -> Result<FileRef, RpcError> {
        self.upload(upload).await
    }
}

impl FeedApi for FrappeClient {
    async fn get_published_blogs(&self, search: &str) -> Result<Vec<BlogPost>, RpcError> {
        self.call(
            &self.paths.get_published_blogs(),
            &[("search", search)],
            CallKind::Read,
        )
        .await
    }
}
