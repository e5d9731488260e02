//! nimble-cfn: drive Nimble Studio resource handlers from the command line.
//!
//! Runs one logical operation through the [`Orchestrator`] against the
//! in-memory service and writes every progress event as a JSON line.

use std::io::Write;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use nimble_cfn_core::{
    Action, OperationReport, Orchestrator, ReconciliationHandler, Resource, ResourceHandlerRequest,
};

/// One remote record to preload into the in-memory service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord<T> {
    pub studio_id: String,
    pub record: T,
}

pub fn parse_request<M: DeserializeOwned + Default>(text: &str) -> Result<ResourceHandlerRequest<M>> {
    serde_json::from_str(text).context("invalid handler request")
}

/// Parse a seed file: a JSON array of [`SeedRecord`]s.
pub fn parse_seed<T: DeserializeOwned>(text: &str) -> Result<Vec<SeedRecord<T>>> {
    serde_json::from_str(text).context("invalid seed file")
}

/// Run `action` to completion, writing each progress event to `out`.
pub async fn execute<R, W>(
    handler: &ReconciliationHandler<R>,
    orchestrator: &Orchestrator,
    action: Action,
    request: &ResourceHandlerRequest<R::Model>,
    out: &mut W,
) -> Result<OperationReport<R::Model>>
where
    R: Resource,
    W: Write,
{
    let mut write_error = None;
    let report = orchestrator
        .run_observed(handler, action, request, |event| {
            if write_error.is_some() {
                return;
            }
            let written = serde_json::to_writer(&mut *out, event)
                .map_err(anyhow::Error::from)
                .and_then(|_| writeln!(out).map_err(anyhow::Error::from));
            if let Err(e) = written {
                write_error = Some(e);
            }
        })
        .await;

    if let Some(e) = write_error {
        return Err(e).context("failed to write progress event");
    }

    Ok(report)
}
