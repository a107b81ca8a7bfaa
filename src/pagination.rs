//! Cursor-based pagination primitives.
//!
//! A [`Cursor`] is an opaque token handed to callers. Internally it is a
//! versioned JSON document, base64url encoded without padding, that records
//! which listing mode issued it and where the next page starts.
//!
//! Continuation is forward-only over live data; no snapshot is pinned across
//! calls, so concurrent inserts may or may not show up in later pages.

use std::fmt::{Display, Formatter};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{ClientId, PageSize};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

const CURSOR_VERSION: u8 = 1;

/// Opaque continuation token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Cursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Retrieval strategy a request or cursor belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListMode {
    /// Newest-first browsing.
    Recent,
    /// Relevance-ranked full-text search.
    Search,
}

impl Display for ListMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ListMode::Recent => write!(f, "default"),
            ListMode::Search => write!(f, "search"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CursorError {
    #[error("invalid cursor: invalid base64url encoding")]
    InvalidBase64,

    #[error("invalid cursor: malformed JSON")]
    InvalidJson,

    #[error("invalid cursor: unsupported version")]
    UnsupportedVersion,

    #[error("invalid cursor: issued for {found} listing, used with {expected} listing")]
    ModeMismatch { expected: ListMode, found: ListMode },

    #[error("invalid cursor: issued for a different search query")]
    SearchMismatch,

    #[error("invalid cursor: search offset out of range")]
    OffsetOutOfRange,
}

/// Ordering key of the newest-first listing: `(created_at DESC, id DESC)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentKey {
    #[serde(rename = "t")]
    pub created_at: NaiveDateTime,
    pub id: ClientId,
}

/// Where the next page starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "m", rename_all = "snake_case")]
pub enum CursorPosition {
    /// Resume strictly after `after`; `None` means from the start.
    Recent {
        #[serde(rename = "k", default, skip_serializing_if = "Option::is_none")]
        after: Option<RecentKey>,
    },
    /// Resume at `offset` in the ranked results for `term`.
    Search {
        #[serde(rename = "q")]
        term: String,
        #[serde(rename = "o")]
        offset: u64,
    },
}

impl CursorPosition {
    pub fn mode(&self) -> ListMode {
        match self {
            CursorPosition::Recent { .. } => ListMode::Recent,
            CursorPosition::Search { .. } => ListMode::Search,
        }
    }
}

/// Decoded content of a [`Cursor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorState {
    pub position: CursorPosition,
    /// Set on the cursor returned with the final page.
    pub exhausted: bool,
}

#[derive(Serialize, Deserialize)]
struct Wire {
    v: u8,
    #[serde(flatten)]
    position: CursorPosition,
    #[serde(rename = "x", default, skip_serializing_if = "is_false")]
    exhausted: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl CursorState {
    pub fn new(position: CursorPosition, exhausted: bool) -> Self {
        Self {
            position,
            exhausted,
        }
    }

    pub fn mode(&self) -> ListMode {
        self.position.mode()
    }

    /// Encode into an opaque token.
    ///
    /// # Errors
    /// Returns a JSON serialization error if encoding fails.
    pub fn encode(&self) -> serde_json::Result<Cursor> {
        let wire = Wire {
            v: CURSOR_VERSION,
            position: self.position.clone(),
            exhausted: self.exhausted,
        };
        serde_json::to_vec(&wire).map(|bytes| Cursor(URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Decode a token previously produced by [`CursorState::encode`].
    ///
    /// # Errors
    /// Returns [`CursorError`] when the token is not valid base64url, is not
    /// a cursor document, carries an unsupported version, or holds a search
    /// offset storage cannot address.
    pub fn decode(cursor: &Cursor) -> Result<Self, CursorError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(cursor.as_str())
            .map_err(|_| CursorError::InvalidBase64)?;
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|_| CursorError::InvalidJson)?;
        match value.get("v").and_then(serde_json::Value::as_u64) {
            Some(v) if v == u64::from(CURSOR_VERSION) => {}
            Some(_) => return Err(CursorError::UnsupportedVersion),
            None => return Err(CursorError::InvalidJson),
        }
        let wire: Wire = serde_json::from_value(value).map_err(|_| CursorError::InvalidJson)?;
        if let CursorPosition::Search { offset, .. } = &wire.position {
            i64::try_from(*offset).map_err(|_| CursorError::OffsetOutOfRange)?;
        }
        Ok(Self {
            position: wire.position,
            exhausted: wire.exhausted,
        })
    }
}

/// Pagination state supplied by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub cursor: Option<Cursor>,
    pub page_size: PageSize,
}

impl PageRequest {
    pub fn new(cursor: Option<Cursor>, page_size: PageSize) -> Self {
        Self { cursor, page_size }
    }
}

/// One page of results plus the token for the next call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub is_done: bool,
    pub continuation_cursor: Cursor,
}
