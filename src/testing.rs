//! In-memory stand-ins for the remote API, used by unit tests.

use crate::backend::{CustomerApi, FeedApi, FileUpload, SaveRequest};
use crate::model::{BlogPost, Customer, CustomerSummary, FileRef, SaveReply, StatusReply};
use crate::rpc::RpcError;
use std::collections::HashMap;
use std::sync::Mutex;

fn bad_gateway() -> RpcError {
    RpcError::Status {
        status: 502,
        body: "Bad Gateway".into(),
    }
}

struct CustomersState {
    customers: Vec<CustomerSummary>,
    records: HashMap<String, Customer>,
    save_status: String,
    fail_save: bool,
    fail_upload: bool,
    saved: Vec<SaveRequest>,
    deleted: Vec<String>,
    uploads: Vec<FileUpload>,
    list_calls: usize,
}

impl Default for CustomersState {
    fn default() -> Self {
        Self {
            customers: Vec::new(),
            records: HashMap::new(),
            save_status: "success".into(),
            fail_save: false,
            fail_upload: false,
            saved: Vec::new(),
            deleted: Vec::new(),
            uploads: Vec::new(),
            list_calls: 0,
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeCustomers {
    inner: Mutex<CustomersState>,
}

impl FakeCustomers {
    fn with<R>(&self, f: impl FnOnce(&mut CustomersState) -> R) -> R {
        let mut guard = self.inner.lock().unwrap();
        f(&mut guard)
    }

    pub fn set_customers(&self, rows: Vec<CustomerSummary>) {
        self.with(|s| s.customers = rows);
    }

    pub fn insert_customer(&self, c: Customer) {
        self.with(|s| s.records.insert(c.name.clone(), c));
    }

    pub fn set_save_status(&self, status: &str) {
        self.with(|s| s.save_status = status.to_string());
    }

    pub fn fail_next_save(&self) {
        self.with(|s| s.fail_save = true);
    }

    pub fn fail_next_upload(&self) {
        self.with(|s| s.fail_upload = true);
    }

    pub fn saved(&self) -> Vec<SaveRequest> {
        self.with(|s| s.saved.clone())
    }

    pub fn deleted(&self) -> Vec<String> {
        self.with(|s| s.deleted.clone())
    }

    pub fn uploads(&self) -> Vec<FileUpload> {
        self.with(|s| s.uploads.clone())
    }

    pub fn list_calls(&self) -> usize {
        self.with(|s| s.list_calls)
    }
}

impl CustomerApi for FakeCustomers {
    async fn get_customers(&self) -> Result<Vec<CustomerSummary>, RpcError> {
        Ok(self.with(|s| {
            s.list_calls += 1;
            s.customers.clone()
        }))
    }

    async fn get_customer(&self, docname: &str) -> Result<Customer, RpcError> {
        self.with(|s| s.records.get(docname).cloned())
            .ok_or_else(|| RpcError::Server {
                status: 404,
                exc_type: "DoesNotExistError".into(),
                message: format!("CostomerX {docname} not found"),
            })
    }

    async fn save_customer(&self, req: &SaveRequest) -> Result<SaveReply, RpcError> {
        self.with(|s| {
            s.saved.push(req.clone());
            if std::mem::take(&mut s.fail_save) {
                return Err(bad_gateway());
            }
            Ok(SaveReply {
                status: s.save_status.clone(),
                docname: Some(if req.is_create() {
                    format!("C{}", s.saved.len())
                } else {
                    req.docname.clone()
                }),
            })
        })
    }

    async fn delete_customer(&self, docname: &str) -> Result<StatusReply, RpcError> {
        self.with(|s| s.deleted.push(docname.to_string()));
        Ok(StatusReply {
            status: "success".into(),
        })
    }

    async fn upload_file(&self, upload: &FileUpload) -> Result<FileRef, RpcError> {
        self.with(|s| {
            s.uploads.push(upload.clone());
            if std::mem::take(&mut s.fail_upload) {
                return Err(bad_gateway());
            }
            Ok(FileRef {
                file_url: format!("/files/{}", upload.file_name()),
                name: None,
                file_name: Some(upload.file_name()),
            })
        })
    }
}

#[derive(Default)]
pub(crate) struct FakeFeed {
    posts: Mutex<HashMap<String, Vec<BlogPost>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeFeed {
    pub fn answer(&self, search: &str, posts: Vec<BlogPost>) {
        self.posts.lock().unwrap().insert(search.to_string(), posts);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl FeedApi for FakeFeed {
    async fn get_published_blogs(&self, search: &str) -> Result<Vec<BlogPost>, RpcError> {
        self.calls.lock().unwrap().push(search.to_string());
        Ok(self
            .posts
            .lock()
            .unwrap()
            .get(search)
            .cloned()
            .unwrap_or_default())
    }
}

pub(crate) fn post(title: &str, content: &str) -> BlogPost {
    BlogPost {
        name: title.to_lowercase(),
        title: title.into(),
        route: title.to_lowercase().replace(' ', "-"),
        author: "u1".into(),
        author_name: Some("Asha".into()),
        author_city: Some("Pune".into()),
        published_on: Some("2025-03-04 09:15:00".into()),
        content: Some(content.into()),
    }
}
