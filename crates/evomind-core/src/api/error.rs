//! API error types

use thiserror::Error;

use crate::plan::TaskStatus;

/// Failure of a remote call
///
/// Every failure path of a request collapses into this one type. Callers that
/// only need something to show the user should use [`ApiError::user_message`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: DNS, connect, TLS, reset
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success response
    #[error("request rejected with status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },

    /// Success response whose body could not be understood
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Transition refused before any request was sent
    #[error("cannot move a task from {from} to {to}")]
    IllegalTransition { from: TaskStatus, to: TaskStatus },
}

impl ApiError {
    /// Human-readable detail supplied by the service, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message suitable for an alert: the service's detail, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::IllegalTransition { .. } => self.to_string(),
            _ => self.detail().unwrap_or(fallback).to_string(),
        }
    }
}
