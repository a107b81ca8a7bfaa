//! One-shot population of the client directory with sample data.

use std::io::Read;

use crate::domain::client::NewClient;
use crate::domain::types::ClientName;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

/// Employers inserted when no CSV file is supplied.
pub const SAMPLE_CLIENT_NAMES: &[&str] = &[
    "Acme Corp",
    "Acme Industries",
    "Globex Corporation",
    "Initech",
    "Umbrella Health Systems",
    "Stark Manufacturing",
    "Wayne Logistics",
    "Hooli",
    "Vandelay Imports",
    "Cyberdyne Systems",
    "Tyrell Biotech",
    "Zenith LLC",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Inserted(usize),
    /// The directory already held clients and `force` was not set.
    Skipped { existing: usize },
}

/// Validated names from [`SAMPLE_CLIENT_NAMES`].
pub fn sample_client_names() -> ServiceResult<Vec<ClientName>> {
    SAMPLE_CLIENT_NAMES
        .iter()
        .map(|name| ClientName::new(*name).map_err(ServiceError::from))
        .collect()
}

/// Reads client names from a CSV document with a `name` header column.
///
/// Other columns are ignored. A row with an empty name fails the whole file.
pub fn parse_clients_csv<Rd: Read>(reader: Rd) -> ServiceResult<Vec<ClientName>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| ServiceError::InvalidArgument(format!("invalid CSV header: {e}")))?
        .clone();
    let name_idx = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("name"))
        .ok_or_else(|| ServiceError::InvalidArgument("CSV has no `name` column".to_string()))?;

    let mut names = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result
            .map_err(|e| ServiceError::InvalidArgument(format!("invalid CSV row: {e}")))?;
        let raw = record.get(name_idx).unwrap_or_default();
        let name = ClientName::new(raw).map_err(|e| {
            // +2: one for the header, one for 1-based numbering.
            ServiceError::InvalidArgument(format!("row {}: {e}", row + 2))
        })?;
        names.push(name);
    }

    Ok(names)
}

/// Inserts `names` in order so creation order follows input order.
///
/// Does nothing when the directory already has clients, unless `force` is set.
pub fn seed_clients<R>(repo: &R, names: &[ClientName], force: bool) -> ServiceResult<SeedOutcome>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    if !force {
        let existing = repo.count_clients()?;
        if existing > 0 {
            log::info!("Directory already holds {existing} clients, skipping seed");
            return Ok(SeedOutcome::Skipped { existing });
        }
    }

    let new_clients: Vec<NewClient> = names.iter().cloned().map(NewClient::new).collect();
    let inserted = repo.create_clients(&new_clients).map_err(|err| {
        log::error!("Failed to seed clients: {err}");
        err
    })?;

    log::info!("Seeded {inserted} clients");
    Ok(SeedOutcome::Inserted(inserted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn names(values: &[&str]) -> Vec<ClientName> {
        values.iter().map(|v| ClientName::new(*v).unwrap()).collect()
    }

    #[test]
    fn sample_names_are_valid() {
        let names = sample_client_names().unwrap();
        assert_eq!(names.len(), SAMPLE_CLIENT_NAMES.len());
    }

    #[test]
    fn parse_csv_reads_name_column() {
        let csv = "id,Name,industry\n1, Acme Corp ,retail\n2,Zenith LLC,finance\n";
        let parsed = parse_clients_csv(csv.as_bytes()).unwrap();
        assert_eq!(parsed, names(&["Acme Corp", "Zenith LLC"]));
    }

    #[test]
    fn parse_csv_requires_name_column() {
        let err = parse_clients_csv("id,title\n1,x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[test]
    fn parse_csv_rejects_blank_names() {
        let err = parse_clients_csv("name\nAcme\n  \n".as_bytes()).unwrap_err();
        match err {
            ServiceError::InvalidArgument(message) => assert!(message.starts_with("row 3")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn seed_skips_populated_directory() {
        let mut repo = MockRepository::new();
        repo.expect_count_clients().returning(|| Ok(4));
        repo.expect_create_clients().never();

        let outcome = seed_clients(&repo, &names(&["Acme Corp"]), false).unwrap();

        assert_eq!(outcome, SeedOutcome::Skipped { existing: 4 });
    }

    #[test]
    fn seed_inserts_in_order() {
        let mut repo = MockRepository::new();
        repo.expect_count_clients().returning(|| Ok(0));
        repo.expect_create_clients()
            .withf(|new_clients| {
                new_clients
                    .iter()
                    .map(|c| c.name.as_str())
                    .eq(["Acme Corp", "Acme Industries", "Zenith LLC"])
            })
            .times(1)
            .returning(|new_clients| Ok(new_clients.len()));

        let outcome = seed_clients(
            &repo,
            &names(&["Acme Corp", "Acme Industries", "Zenith LLC"]),
            false,
        )
        .unwrap();

        assert_eq!(outcome, SeedOutcome::Inserted(3));
    }

    #[test]
    fn forced_seed_does_not_count() {
        let mut repo = MockRepository::new();
        repo.expect_count_clients().never();
        repo.expect_create_clients().returning(|c| Ok(c.len()));

        let outcome = seed_clients(&repo, &names(&["Initech"]), true).unwrap();

        assert_eq!(outcome, SeedOutcome::Inserted(1));
    }
}
