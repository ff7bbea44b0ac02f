//! Verification-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{broker, verification},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of a [`verification::Request`] projection.
const REQUEST_COLUMNS: &str = "\
    id, broker_id, status, document_urls, notes, submitted_at, decided_at";

/// Restores a [`verification::Request`] from the provided [`Row`].
fn from_row(row: &Row) -> verification::Request {
    verification::Request {
        id: row.get("id"),
        broker_id: row.get("broker_id"),
        status: row.get("status"),
        document_urls: row.get("document_urls"),
        notes: row.get("notes"),
        submitted_at: row.get("submitted_at"),
        decided_at: row.get("decided_at"),
    }
}

impl<C> Database<Select<By<Option<verification::Request>, verification::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<verification::Request>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Option<verification::Request>, verification::Id>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: verification::Id = by.into_inner();

        let sql = format!(
            "SELECT {REQUEST_COLUMNS} \
             FROM verification_requests \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Option<read::verification::Pending>, broker::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<read::verification::Pending>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Option<read::verification::Pending>, broker::Id>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let broker_id: broker::Id = by.into_inner();

        let sql = format!(
            "SELECT {REQUEST_COLUMNS} \
             FROM verification_requests \
             WHERE broker_id = $1::UUID \
               AND status = $2::INT2 \
             LIMIT 1",
        );
        self.query_opt(&sql, &[&broker_id, &verification::Status::UnderReview])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.as_ref().map(|r| read::verification::Pending(from_row(r)))
            })
    }
}

impl<C> Database<Insert<verification::Request>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(request): Insert<verification::Request>,
    ) -> Result<Self::Ok, Self::Err> {
        let verification::Request {
            id,
            broker_id,
            status,
            document_urls,
            notes,
            submitted_at,
            decided_at,
        } = request;

        const SQL: &str = "\
            INSERT INTO verification_requests (\
                id, broker_id, status, \
                document_urls, notes, \
                submitted_at, decided_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::INT2, \
                $4::VARCHAR[], $5::VARCHAR, \
                $6::TIMESTAMPTZ, $7::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET status = EXCLUDED.status, \
                notes = EXCLUDED.notes, \
                decided_at = EXCLUDED.decided_at";
        self.exec(
            SQL,
            &[
                &id,
                &broker_id,
                &status,
                &document_urls,
                &notes,
                &submitted_at,
                &decided_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<verification::Request, broker::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<verification::Request, broker::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let broker_id: broker::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO verification_submission_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (broker_id) DO NOTHING";
        self.query(SQL, &[&broker_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<verification::Request, verification::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<verification::Request, verification::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: verification::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO verification_requests_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Option<read::verification::Status>, broker::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<read::verification::Status>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Option<read::verification::Status>, broker::Id>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let broker_id: broker::Id = by.into_inner();

        const CURRENT_SQL: &str = "\
            SELECT verification \
            FROM brokers \
            WHERE id = $1::UUID \
            LIMIT 1";
        let Some(current) = self
            .query_opt(CURRENT_SQL, &[&broker_id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| row.get("verification"))
        else {
            return Ok(None);
        };

        let history_sql = format!(
            "SELECT {REQUEST_COLUMNS} \
             FROM verification_requests \
             WHERE broker_id = $1::UUID \
             ORDER BY submitted_at DESC, id ASC",
        );
        let history = self
            .query(&history_sql, &[&broker_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect::<Vec<_>>();

        let notes = history
            .iter()
            .filter_map(|r| r.decided_at.map(|at| (at, r)))
            .max_by_key(|(at, _)| *at)
            .and_then(|(_, r)| r.notes.clone());

        Ok(Some(read::verification::Status {
            current,
            notes,
            history,
        }))
    }
}
