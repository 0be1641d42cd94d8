//! Dispatch of host commands onto the search controller.

use cine_search::{PageFetcher, SearchController, SearchOutcome, SearchQuery};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::host::contract::{
    CommandEnvelope, CommandName, ContractError, ContractErrorKind, ResponseEnvelope,
    SessionView, SetPagePayload, SortPayload,
};

/// Handle one command envelope and produce its response.
///
/// Failures never escape: invalid envelopes, bad payloads and search errors
/// all become error envelopes carrying the request id.
pub async fn handle_command<F: PageFetcher>(
    controller: &SearchController<F>,
    envelope: CommandEnvelope,
) -> ResponseEnvelope {
    if let Err(e) = envelope.validate() {
        warn!(request_id = %envelope.request_id, error = %e, "rejected command envelope");
        return ResponseEnvelope::error(envelope.request_id, e.to_string());
    }

    let CommandEnvelope {
        request_id,
        command,
        payload,
        ..
    } = envelope;
    debug!(request_id = %request_id, command = command.as_str(), "handling host command");

    match dispatch(controller, command, payload).await {
        Ok(payload) => ResponseEnvelope::ok(request_id, payload),
        Err(message) => {
            warn!(request_id = %request_id, command = command.as_str(), error = %message, "host command failed");
            ResponseEnvelope::error(request_id, message)
        }
    }
}

async fn dispatch<F: PageFetcher>(
    controller: &SearchController<F>,
    command: CommandName,
    payload: serde_json::Value,
) -> Result<serde_json::Value, String> {
    match command {
        CommandName::SearchSubmit => {
            let query: SearchQuery = parse_payload(payload).map_err(|e| e.to_string())?;
            let outcome = controller
                .search(query)
                .await
                .map_err(|e| e.to_string())?;
            Ok(outcome_payload(controller, outcome))
        }
        CommandName::SearchSetPage => {
            let SetPagePayload { page } = parse_payload(payload).map_err(|e| e.to_string())?;
            let outcome = controller
                .set_page(page)
                .await
                .map_err(|e| e.to_string())?;
            Ok(outcome_payload(controller, outcome))
        }
        CommandName::SearchSort => {
            let SortPayload {
                category,
                direction,
            } = parse_payload(payload).map_err(|e| e.to_string())?;
            controller
                .sort(category, direction)
                .map_err(|e| e.to_string())?;
            Ok(json!({ "session": session_payload(controller) }))
        }
        CommandName::SessionGet => Ok(json!({ "session": session_payload(controller) })),
        CommandName::RuntimeStop => {
            info!("runtime.stop requested");
            Ok(json!({ "stopping": true }))
        }
    }
}

fn parse_payload<T: DeserializeOwned>(payload: serde_json::Value) -> Result<T, ContractError> {
    serde_json::from_value(payload).map_err(|e| {
        ContractError::new(
            ContractErrorKind::InvalidPayload,
            format!("invalid payload: {e}"),
        )
    })
}

fn outcome_payload<F: PageFetcher>(
    controller: &SearchController<F>,
    outcome: SearchOutcome,
) -> serde_json::Value {
    let outcome = match outcome {
        SearchOutcome::Completed => "completed",
        SearchOutcome::Superseded => "superseded",
    };
    json!({ "outcome": outcome, "session": session_payload(controller) })
}

fn session_payload<F: PageFetcher>(controller: &SearchController<F>) -> serde_json::Value {
    let Some(session) = controller.session() else {
        return serde_json::Value::Null;
    };
    session_view_json(SessionView::from(session))
}

fn session_view_json(view: SessionView) -> serde_json::Value {
    match serde_json::to_value(view) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "failed to serialize session view; reporting null session");
            serde_json::Value::Null
        }
    }
}
