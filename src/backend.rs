//! Remote operations the controllers depend on, and the payloads they send.
//!
//! `FrappeClient` implements these over HTTP; tests substitute in-memory fakes.

use crate::model::{Address, BlogPost, Customer, CustomerSummary, FileRef, SaveReply, StatusReply};
use crate::rpc::RpcError;
use serde::Serialize;
use std::future::Future;
use std::path::PathBuf;

/// Arguments of the create-or-update call.
///
/// `docname` empty means create. `customer_addressx` is the JSON-encoded
/// address list in row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveRequest {
    pub docname: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub photo: String,
    pub customer_addressx: String,
}

impl SaveRequest {
    pub fn new(
        docname: Option<&str>,
        first_name: &str,
        last_name: &str,
        email: &str,
        photo: Option<&str>,
        addresses: &[Address],
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            docname: docname.unwrap_or_default().to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            photo: photo.unwrap_or_default().to_string(),
            customer_addressx: serde_json::to_string(addresses)?,
        })
    }

    #[cfg(test)]
    pub fn is_create(&self) -> bool {
        self.docname.is_empty()
    }

    /// Decode the embedded address list back out of the payload.
    #[cfg(test)]
    pub fn addresses(&self) -> Result<Vec<Address>, serde_json::Error> {
        serde_json::from_str(&self.customer_addressx)
    }

    pub(crate) fn form_args(&self) -> [(&'static str, &str); 6] {
        [
            ("docname", self.docname.as_str()),
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("photo", self.photo.as_str()),
            ("customer_addressx", self.customer_addressx.as_str()),
        ]
    }
}

/// A local file to push to the upload endpoint as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub path: PathBuf,
    pub attached_to_doctype: String,
    pub attached_to_name: Option<String>,
    pub is_private: bool,
}

impl FileUpload {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| "upload".to_string())
    }
}

pub trait CustomerApi {
    fn get_customers(&self)
        -> impl Future<Output = Result<Vec<CustomerSummary>, RpcError>> + Send;

    fn get_customer(&self, docname: &str)
        -> impl Future<Output = Result<Customer, RpcError>> + Send;

    fn save_customer(&self, req: &SaveRequest)
        -> impl Future<Output = Result<SaveReply, RpcError>> + Send;

    fn delete_customer(&self, docname: &str)
        -> impl Future<Output = Result<StatusReply, RpcError>> + Send;

    fn upload_file(&self, upload: &FileUpload)
        -> impl Future<Output = Result<FileRef, RpcError>> + Send;
}

pub trait FeedApi {
    fn get_published_blogs(&self, search: &str)
        -> impl Future<Output = Result<Vec<BlogPost>, RpcError>> + Send;
}
