//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient};
use crate::pagination::RecentKey;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientReader, ClientWriter, FtsQuery};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn list_recent_clients(
            &self,
            after: Option<RecentKey>,
            limit: usize,
        ) -> RepositoryResult<Vec<Client>>;
        fn search_clients(
            &self,
            query: &FtsQuery,
            offset: u64,
            limit: usize,
        ) -> RepositoryResult<Vec<Client>>;
        fn count_clients(&self) -> RepositoryResult<usize>;
    }

    impl ClientWriter for Repository {
        fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
    }
}
