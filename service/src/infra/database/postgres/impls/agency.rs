//! [`Agency`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{agency, Agency},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Restores an [`Agency`] from the provided [`Row`].
fn from_row(row: &Row) -> Agency {
    Agency {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        website: row.get("website"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Agency>, agency::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Agency>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Agency>, agency::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: agency::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, description, website, created_at \
            FROM agencies \
            WHERE id = $1::UUID \
            LIMIT 1";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<'n, C> Database<Select<By<Option<Agency>, &'n agency::Name>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Agency>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Agency>, &'n agency::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        let name = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, description, website, created_at \
            FROM agencies \
            WHERE name = $1::VARCHAR \
            LIMIT 1";
        self.query_opt(SQL, &[&name])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Agency>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Agency>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<Agency>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, description, website, created_at \
            FROM agencies \
            ORDER BY name ASC, id ASC";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Agency>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(agency): Insert<Agency>,
    ) -> Result<Self::Ok, Self::Err> {
        let Agency {
            id,
            name,
            description,
            website,
            created_at,
        } = agency;

        const SQL: &str = "\
            INSERT INTO agencies (\
                id, name, description, website, created_at\
            ) \
            VALUES (\
                $1::UUID, \
                $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                description = EXCLUDED.description, \
                website = EXCLUDED.website, \
                created_at = EXCLUDED.created_at";
        self.exec(SQL, &[&id, &name, &description, &website, &created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
