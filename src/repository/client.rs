use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};

use crate::{
    domain::client::{Client, NewClient},
    models::client::{Client as DbClient, ClientCount, NewClient as DbNewClient},
    pagination::RecentKey,
    repository::{
        ClientReader, ClientWriter, DieselRepository, FtsQuery,
        errors::{RepositoryError, RepositoryResult},
    },
};

const SEARCH_CLIENTS_SQL: &str = "\
    SELECT clients.id, clients.name, clients.created_at \
    FROM clients_fts \
    JOIN clients ON clients.id = clients_fts.rowid \
    WHERE clients_fts MATCH ? \
    ORDER BY bm25(clients_fts) ASC, clients.id DESC \
    LIMIT ? OFFSET ?";

fn to_domain(rows: Vec<DbClient>) -> RepositoryResult<Vec<Client>> {
    rows.into_iter()
        .map(|row| Client::try_from(row).map_err(RepositoryError::from))
        .collect()
}

fn to_sql_limit(value: u64) -> RepositoryResult<i64> {
    i64::try_from(value)
        .map_err(|_| RepositoryError::ValidationError(format!("{value} is out of range")))
}

impl ClientReader for DieselRepository {
    fn list_recent_clients(
        &self,
        after: Option<RecentKey>,
        limit: usize,
    ) -> RepositoryResult<Vec<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let mut items = clients::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(key) = after {
            items = items.filter(
                clients::created_at.lt(key.created_at).or(clients::created_at
                    .eq(key.created_at)
                    .and(clients::id.lt(key.id.get()))),
            );
        }

        let rows = items
            .order((clients::created_at.desc(), clients::id.desc()))
            .limit(to_sql_limit(limit as u64)?)
            .load::<DbClient>(&mut conn)?;

        to_domain(rows)
    }

    fn search_clients(
        &self,
        query: &FtsQuery,
        offset: u64,
        limit: usize,
    ) -> RepositoryResult<Vec<Client>> {
        let mut conn = self.conn()?;

        let rows = diesel::sql_query(SEARCH_CLIENTS_SQL)
            .bind::<Text, _>(query.as_str())
            .bind::<BigInt, _>(to_sql_limit(limit as u64)?)
            .bind::<BigInt, _>(to_sql_limit(offset)?)
            .load::<DbClient>(&mut conn)?;

        to_domain(rows)
    }

    fn count_clients(&self) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let total = diesel::sql_query("SELECT COUNT(*) AS count FROM clients")
            .get_result::<ClientCount>(&mut conn)?;

        usize::try_from(total.count).map_err(|_| {
            RepositoryError::Unexpected(format!("invalid client count {}", total.count))
        })
    }
}

impl ClientWriter for DieselRepository {
    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let insertables: Vec<DbNewClient> = new_clients.iter().map(Into::into).collect();

        // One row per statement keeps ids in input order.
        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut affected = 0;
            for insertable in &insertables {
                affected += diesel::insert_into(clients::table)
                    .values(insertable)
                    .execute(conn)?;
            }
            Ok(affected)
        })
        .map_err(RepositoryError::from)
    }
}
