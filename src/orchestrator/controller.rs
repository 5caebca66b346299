//! Remote request controller.
//!
//! Runs every request the UI issues as its own task and reports each result
//! back as an event. Requests are neither queued nor cancelled relative to
//! each other; results arrive in completion order.

use crate::backend::{CustomerApi, FeedApi, FileUpload, SaveRequest};
use crate::feed::SearchTicket;
use crate::model::{BlogPost, Customer, CustomerSummary, FileRef, SaveReply, StatusReply};
use crate::rpc::{FrappeClient, RpcError};
use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;

/// One remote operation requested by the UI.
#[derive(Debug, Clone)]
pub(crate) enum Request {
    LoadCustomers,
    FetchCustomer(String),
    SaveCustomer(SaveRequest),
    DeleteCustomer(String),
    UploadPhoto(FileUpload),
    SearchBlogs(SearchTicket),
}

/// Commands emitted by UI layers.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    Request(Request),
    Quit,
}

/// Completed requests, delivered to the UI in arrival order.
#[derive(Debug)]
pub(crate) enum AppEvent {
    CustomersLoaded(Result<Vec<CustomerSummary>, RpcError>),
    CustomerFetched(Result<Customer, RpcError>),
    CustomerSaved(Result<SaveReply, RpcError>),
    CustomerDeleted(Result<StatusReply, RpcError>),
    PhotoUploaded(Result<FileRef, RpcError>),
    BlogsLoaded(SearchTicket, Result<Vec<BlogPost>, RpcError>),
    Info(String),
}

pub(crate) async fn execute<A: CustomerApi + FeedApi>(api: &A, req: Request) -> AppEvent {
    match req {
        Request::LoadCustomers => AppEvent::CustomersLoaded(api.get_customers().await),
        Request::FetchCustomer(docname) => {
            AppEvent::CustomerFetched(api.get_customer(&docname).await)
        }
        Request::SaveCustomer(req) => AppEvent::CustomerSaved(api.save_customer(&req).await),
        Request::DeleteCustomer(docname) => {
            AppEvent::CustomerDeleted(api.delete_customer(&docname).await)
        }
        Request::UploadPhoto(upload) => AppEvent::PhotoUploaded(api.upload_file(&upload).await),
        Request::SearchBlogs(ticket) => {
            let res = api.get_published_blogs(&ticket.term).await;
            AppEvent::BlogsLoaded(ticket, res)
        }
    }
}

/// Execute UI requests until `Quit` (or the UI side hangs up).
pub(crate) async fn run_controller(
    client: FrappeClient,
    event_tx: UnboundedSender<AppEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let mut tasks: JoinSet<()> = JoinSet::new();

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UiCommand::Request(req)) => {
                        tracing::debug!(?req, "dispatching request");
                        let client = client.clone();
                        let tx = event_tx.clone();
                        tasks.spawn(async move {
                            let ev = execute(&client, req).await;
                            let _ = tx.send(ev);
                        });
                    }
                    Some(UiCommand::Quit) | None => break,
                }
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(e) = joined {
                    tracing::error!(error = %e, "request task failed");
                    let _ = event_tx.send(AppEvent::Info(format!("Request task failed: {e}")));
                }
            }
        }
    }

    if !tasks.is_empty() {
        tracing::debug!(in_flight = tasks.len(), "aborting in-flight requests");
    }
    tasks.abort_all();
    Ok(())
}
