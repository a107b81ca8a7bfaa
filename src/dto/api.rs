//! DTOs exposed by the directory API endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::services::clients::ClientPage;

/// Query parameters accepted by `/api/v1/clients`.
#[derive(Debug, Default, Deserialize)]
pub struct ClientsQuery {
    /// Continuation token returned by a previous call.
    pub cursor: Option<String>,
    /// Signed so that non-positive sizes reach validation instead of failing
    /// deserialization.
    pub page_size: Option<i64>,
    /// Optional free-form search string applied to client names.
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<Client> for ClientDto {
    fn from(client: Client) -> Self {
        Self {
            id: client.id.get(),
            name: client.name.into_inner(),
            created_at: client.created_at,
        }
    }
}

/// Result payload returned by `/api/v1/clients`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientsResponse {
    pub items: Vec<ClientDto>,
    pub is_done: bool,
    pub continuation_cursor: String,
}

impl From<ClientPage> for ClientsResponse {
    fn from(page: ClientPage) -> Self {
        Self {
            items: page.items.into_iter().map(ClientDto::from).collect(),
            is_done: page.is_done,
            continuation_cursor: page.continuation_cursor.into_inner(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
