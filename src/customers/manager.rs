use super::form::{CustomerForm, FormError, RowId};
use crate::backend::{CustomerApi, FileUpload, SaveRequest};
use crate::model::{Address, Customer, CustomerSummary, FileRef, SaveReply, StatusReply};
use crate::outcome::{Notice, Outcome};
use crate::rpc::RpcError;
use std::path::PathBuf;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this customer?";

/// State that lives for one edit of one record and is handed to save explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    /// Last uploaded (or loaded) photo reference.
    pub photo: Option<String>,
}

/// Customer list + form controller.
///
/// Every remote operation comes as a `prepare_*`/`apply_*` pair so the caller
/// decides where the call runs; the `async` helpers chain both for direct use.
#[derive(Debug)]
pub struct CustomerManager {
    pub table: Vec<CustomerSummary>,
    pub form: CustomerForm,
    pub session: EditSession,
    pub notice: Option<Notice>,
    attach_doctype: String,
}

impl CustomerManager {
    pub fn new(attach_doctype: impl Into<String>) -> Self {
        Self {
            table: Vec::new(),
            form: CustomerForm::default(),
            session: EditSession::default(),
            notice: None,
            attach_doctype: attach_doctype.into(),
        }
    }

    // ---- list ----

    pub fn apply_list(&mut self, res: Result<Vec<CustomerSummary>, RpcError>) -> Outcome<usize> {
        let outcome = Outcome::from_result(res);
        match outcome {
            Outcome::Success(rows) => {
                let n = rows.len();
                self.table = rows;
                tracing::debug!(count = n, "customer list loaded");
                Outcome::Success(n)
            }
            other => {
                self.notice = Some(other.report("Loading customers", String::new));
                other.map(|_| 0)
            }
        }
    }

    pub async fn load_list<A: CustomerApi>(&mut self, api: &A) -> Outcome<usize> {
        let res = api.get_customers().await;
        self.apply_list(res)
    }

    // ---- address rows ----

    pub fn add_address_row(&mut self, prefill: Option<Address>) -> RowId {
        self.form.addresses.push(prefill.unwrap_or_default())
    }

    /// Drop one row locally; only the next save's payload is affected.
    pub fn remove_address_row(&mut self, id: RowId) -> bool {
        self.form.addresses.remove(id)
    }

    // ---- photo ----

    pub fn prepare_upload(&self, path: impl Into<PathBuf>) -> FileUpload {
        FileUpload {
            path: path.into(),
            attached_to_doctype: self.attach_doctype.clone(),
            attached_to_name: self.form.docname().map(str::to_string),
            is_private: false,
        }
    }

    /// Store the uploaded reference. Failures are logged and leave the photo as it was.
    pub fn apply_upload(&mut self, res: Result<FileRef, RpcError>) -> Outcome<FileRef> {
        let outcome = Outcome::from_result(res);
        match &outcome {
            Outcome::Success(file) => {
                tracing::info!(file_url = %file.file_url, "photo uploaded");
                self.session.photo = Some(file.file_url.clone());
            }
            Outcome::Rejected(reason) => tracing::error!(%reason, "photo upload rejected"),
            Outcome::Failed(err) => tracing::error!(error = %err, "photo upload failed"),
        }
        outcome
    }

    pub async fn upload_photo<A: CustomerApi>(
        &mut self,
        api: &A,
        path: impl Into<PathBuf>,
    ) -> Outcome<FileRef> {
        let upload = self.prepare_upload(path);
        let res = api.upload_file(&upload).await;
        self.apply_upload(res)
    }

    // ---- save ----

    pub fn prepare_save(&mut self) -> Result<SaveRequest, FormError> {
        self.form
            .to_request(self.session.photo.as_deref())
            .inspect_err(|e| {
                self.notice = Some(Notice::Warning(e.to_string()));
            })
    }

    /// On explicit success the form is reset; the caller then reloads the list.
    pub fn apply_save(&mut self, res: Result<SaveReply, RpcError>) -> Outcome<SaveReply> {
        let outcome = Outcome::from_status(res);
        self.notice = Some(outcome.report("Save", || "Customer saved successfully".into()));
        if let Outcome::Success(reply) = &outcome {
            tracing::info!(docname = ?reply.docname, "customer saved");
            self.reset_form();
        }
        outcome
    }

    pub async fn save<A: CustomerApi>(&mut self, api: &A) -> Result<Outcome<SaveReply>, FormError> {
        let req = self.prepare_save()?;
        let res = api.save_customer(&req).await;
        let outcome = self.apply_save(res);
        if outcome.is_success() {
            self.load_list(api).await;
        }
        Ok(outcome)
    }

    // ---- edit ----

    /// Overwrite the form with a fetched record. On failure the form is kept.
    pub fn apply_edit(&mut self, res: Result<Customer, RpcError>) -> Outcome<Customer> {
        let outcome = Outcome::from_result(res);
        match &outcome {
            Outcome::Success(customer) => {
                self.form.load(customer);
                self.session = EditSession {
                    photo: customer.photo.clone(),
                };
                self.notice = None;
            }
            other => self.notice = Some(other.report("Loading customer", String::new)),
        }
        outcome
    }

    pub async fn edit<A: CustomerApi>(&mut self, api: &A, docname: &str) -> Outcome<Customer> {
        let res = api.get_customer(docname).await;
        self.apply_edit(res)
    }

    // ---- delete ----

    pub fn apply_delete(&mut self, res: Result<StatusReply, RpcError>) -> Outcome<StatusReply> {
        let outcome = Outcome::from_status(res);
        self.notice = Some(outcome.report("Delete", || "Customer deleted successfully".into()));
        outcome
    }

    /// Ask `confirm` first; `None` means the user declined and nothing was sent.
    pub async fn delete<A: CustomerApi>(
        &mut self,
        api: &A,
        docname: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Option<Outcome<StatusReply>> {
        if !confirm(DELETE_PROMPT) {
            tracing::debug!(docname, "delete declined");
            return None;
        }
        let res = api.delete_customer(docname).await;
        let outcome = self.apply_delete(res);
        if outcome.is_success() {
            tracing::info!(docname, "customer deleted");
            self.load_list(api).await;
        }
        Some(outcome)
    }

    pub fn reset_form(&mut self) {
        self.form.reset();
        self.session = EditSession::default();
    }
}
