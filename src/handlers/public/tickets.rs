use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use super::utils::all_present;
use crate::database::{NewTicket, Ticket};
use crate::error::ApiError;
use crate::handlers::CreatedId;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TicketRequest {
    pub customer: String,
    pub topic: String,
    pub contents: String,
}

/// GET /tickets - list every ticket, oldest first
pub async fn tickets_list(State(state): State<AppState>) -> ApiResult<Vec<Ticket>> {
    let tickets = state.store.get_all_tickets().await?;
    Ok(ApiResponse::success(tickets))
}

/// POST /tickets - open a ticket
///
/// Expected Input:
/// ```json
/// { "customer": "string", "topic": "string", "contents": "string" }
/// ```
/// All three fields are required and must not be blank.
pub async fn ticket_create(
    State(state): State<AppState>,
    payload: Result<Json<TicketRequest>, JsonRejection>,
) -> ApiResult<CreatedId> {
    let Json(ticket) = payload?;

    if !all_present(&[ticket.customer.as_str(), ticket.topic.as_str(), ticket.contents.as_str()]) {
        return Err(ApiError::bad_request("Missing fields in payload."));
    }

    let id = state
        .store
        .create_ticket(NewTicket {
            customer: ticket.customer,
            topic: ticket.topic,
            contents: ticket.contents,
        })
        .await?;

    tracing::info!("Created ticket {}", id);
    Ok(ApiResponse::created(CreatedId { id }))
}
