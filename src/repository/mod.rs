use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        client::{Client, NewClient},
        types::SearchTerm,
    },
    pagination::RecentKey,
    repository::errors::RepositoryResult,
};

pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Diesel-backed repository over a shared SQLite pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// FTS5 `MATCH` expression derived from a user search term.
///
/// Every whitespace-separated token becomes a quoted phrase so user input can
/// never inject FTS5 operators. All tokens must match; the last one is matched
/// as a prefix so partially typed words still find results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FtsQuery(String);

impl FtsQuery {
    /// Returns `None` when the term holds nothing the tokenizer would index.
    pub fn from_term(term: &SearchTerm) -> Option<Self> {
        let tokens: Vec<&str> = term
            .split_whitespace()
            .filter(|token| token.chars().any(char::is_alphanumeric))
            .collect();
        let (last, rest) = tokens.split_last()?;

        let mut phrases: Vec<String> = rest.iter().map(|token| quote(token)).collect();
        phrases.push(format!("{}*", quote(last)));
        Some(Self(phrases.join(" ")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn quote(token: &str) -> String {
    format!("\"{}\"", token.replace('"', "\"\""))
}

pub trait ClientReader {
    /// Clients newest first, strictly after `after` when given.
    fn list_recent_clients(
        &self,
        after: Option<RecentKey>,
        limit: usize,
    ) -> RepositoryResult<Vec<Client>>;
    /// Clients matching `query`, most relevant first.
    fn search_clients(
        &self,
        query: &FtsQuery,
        offset: u64,
        limit: usize,
    ) -> RepositoryResult<Vec<Client>>;
    fn count_clients(&self) -> RepositoryResult<usize>;
}

pub trait ClientWriter {
    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
}
