//! Paginated, search-aware client directory listing.

use crate::domain::client::Client;
use crate::domain::types::{PageSize, SearchTerm};
use crate::pagination::{
    Cursor, CursorError, CursorPosition, CursorState, ListMode, Page, PageRequest, RecentKey,
};
use crate::repository::{ClientReader, FtsQuery};
use crate::services::{ServiceError, ServiceResult};

pub type ClientPage = Page<Client>;

/// A directory request: either newest-first browsing or a text search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListRequest {
    Default(PageRequest),
    Search(PageRequest, SearchTerm),
}

impl ListRequest {
    /// Builds a request from loose caller input.
    ///
    /// An absent or blank `search` selects the default listing.
    pub fn new(
        cursor: Option<Cursor>,
        page_size: i64,
        search: Option<&str>,
    ) -> ServiceResult<Self> {
        let page = PageRequest::new(cursor, PageSize::new(page_size)?);
        Ok(match SearchTerm::parse_optional(search) {
            Some(term) => ListRequest::Search(page, term),
            None => ListRequest::Default(page),
        })
    }

    pub fn mode(&self) -> ListMode {
        match self {
            ListRequest::Default(_) => ListMode::Recent,
            ListRequest::Search(..) => ListMode::Search,
        }
    }
}

/// Returns one page of clients plus the cursor for the next call.
pub fn list_clients<R>(repo: &R, request: ListRequest) -> ServiceResult<ClientPage>
where
    R: ClientReader + ?Sized,
{
    match request {
        ListRequest::Default(page) => list_recent(repo, page),
        ListRequest::Search(page, term) => search(repo, page, term),
    }
}

fn list_recent<R>(repo: &R, page: PageRequest) -> ServiceResult<ClientPage>
where
    R: ClientReader + ?Sized,
{
    let after = match decode(page.cursor.as_ref())? {
        None => None,
        Some(CursorState {
            position: CursorPosition::Recent { after },
            exhausted,
        }) => {
            if exhausted {
                return finished_page(CursorPosition::Recent { after });
            }
            after
        }
        Some(state) => return Err(mode_mismatch(ListMode::Recent, state.mode())),
    };

    let limit = page.page_size.get();
    let mut items = repo.list_recent_clients(after, limit + 1)?;
    let is_done = items.len() <= limit;
    items.truncate(limit);

    let after = items
        .last()
        .map(|client| RecentKey {
            created_at: client.created_at,
            id: client.id,
        })
        .or(after);

    build_page(items, is_done, CursorPosition::Recent { after })
}

fn search<R>(repo: &R, page: PageRequest, term: SearchTerm) -> ServiceResult<ClientPage>
where
    R: ClientReader + ?Sized,
{
    let offset = match decode(page.cursor.as_ref())? {
        None => 0,
        Some(CursorState {
            position: CursorPosition::Search {
                term: issued_for,
                offset,
            },
            exhausted,
        }) => {
            if issued_for != term.as_str() {
                return Err(reject(CursorError::SearchMismatch));
            }
            if exhausted {
                return finished_page(CursorPosition::Search {
                    term: term.into_inner(),
                    offset,
                });
            }
            offset
        }
        Some(state) => return Err(mode_mismatch(ListMode::Search, state.mode())),
    };

    let Some(query) = FtsQuery::from_term(&term) else {
        return finished_page(CursorPosition::Search {
            term: term.into_inner(),
            offset,
        });
    };

    let limit = page.page_size.get();
    let mut items = repo.search_clients(&query, offset, limit + 1)?;
    let is_done = items.len() <= limit;
    items.truncate(limit);

    let offset = offset
        .checked_add(items.len() as u64)
        .ok_or_else(|| ServiceError::Internal("search offset overflow".to_string()))?;
    build_page(
        items,
        is_done,
        CursorPosition::Search {
            term: term.into_inner(),
            offset,
        },
    )
}

fn decode(cursor: Option<&Cursor>) -> ServiceResult<Option<CursorState>> {
    cursor
        .map(CursorState::decode)
        .transpose()
        .map_err(reject)
}

fn reject(err: CursorError) -> ServiceError {
    log::warn!("Rejected pagination cursor: {err}");
    ServiceError::from(err)
}

fn mode_mismatch(expected: ListMode, found: ListMode) -> ServiceError {
    reject(CursorError::ModeMismatch { expected, found })
}

fn finished_page(position: CursorPosition) -> ServiceResult<ClientPage> {
    build_page(Vec::new(), true, position)
}

fn build_page(
    items: Vec<Client>,
    is_done: bool,
    position: CursorPosition,
) -> ServiceResult<ClientPage> {
    let continuation_cursor = CursorState::new(position, is_done)
        .encode()
        .map_err(|e| ServiceError::Internal(format!("Failed to encode cursor: {e}")))?;

    Ok(Page {
        items,
        is_done,
        continuation_cursor,
    })
}
