use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, ClientName};

/// A consulting-platform customer record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    /// Assigned by the store at insertion; the listing order key.
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewClient {
    pub name: ClientName,
}

impl NewClient {
    #[must_use]
    pub fn new(name: ClientName) -> Self {
        Self { name }
    }
}
