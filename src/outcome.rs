//! Result of one remote operation as seen by a controller.

use crate::model::HasStatus;
use crate::rpc::RpcError;
use anyhow::Context;

/// Three-way result of a remote call.
#[derive(Debug)]
pub enum Outcome<T> {
    Success(T),
    /// The backend answered but refused: a non-"success" status or a raised exception.
    Rejected(String),
    /// Transport failure or a response of the wrong shape.
    Failed(RpcError),
}

impl<T> Outcome<T> {
    pub fn from_result(res: Result<T, RpcError>) -> Self {
        match res {
            Ok(v) => Outcome::Success(v),
            Err(RpcError::Server {
                exc_type, message, ..
            }) => Outcome::Rejected(format!("{exc_type}: {message}")),
            Err(e) => Outcome::Failed(e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(v) => Outcome::Success(f(v)),
            Outcome::Rejected(m) => Outcome::Rejected(m),
            Outcome::Failed(e) => Outcome::Failed(e),
        }
    }

    /// Log a non-success outcome and produce the notice shown to the user.
    pub fn report(&self, action: &str, on_success: impl FnOnce() -> String) -> Notice {
        match self {
            Outcome::Success(_) => Notice::Info(on_success()),
            Outcome::Rejected(reason) => {
                tracing::warn!(action, %reason, "remote call rejected");
                Notice::Warning(format!("{action} rejected: {reason}"))
            }
            Outcome::Failed(err) => {
                tracing::error!(action, error = %err, "remote call failed");
                Notice::Error(format!("{action} failed: {err}"))
            }
        }
    }

    /// Convert for one-shot commands, where anything but success is an error.
    pub fn into_result(self, action: &str) -> anyhow::Result<T> {
        match self {
            Outcome::Success(v) => Ok(v),
            Outcome::Rejected(reason) => Err(anyhow::anyhow!("{action} rejected: {reason}")),
            Outcome::Failed(err) => Err(err).with_context(|| format!("{action} failed")),
        }
    }
}

impl<T: HasStatus> Outcome<T> {
    /// Only an explicit `"success"` status counts as success.
    pub fn from_status(res: Result<T, RpcError>) -> Self {
        match res {
            Ok(reply) if reply.is_success() => Outcome::Success(reply),
            Ok(reply) => Outcome::Rejected(format!("status {:?}", reply.status())),
            Err(e) => Outcome::from_result(Err(e)),
        }
    }
}

/// User-facing message left by the last operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(s) | Notice::Warning(s) | Notice::Error(s) => s,
        }
    }

    #[cfg(test)]
    pub fn is_info(&self) -> bool {
        matches!(self, Notice::Info(_))
    }
}
