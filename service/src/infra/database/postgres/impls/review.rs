//! [`Review`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select};
use postgres_types::ToSql;
use rust_decimal::Decimal;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{broker, review, user, Review},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Restores a [`Review`] from the provided [`Row`].
fn from_row(row: &Row) -> Review {
    Review {
        id: row.get("id"),
        broker_id: row.get("broker_id"),
        author_id: row.get("author_id"),
        rating: review::Rating::new(
            u8::try_from(row.get::<_, i16>("rating"))
                .expect("`rating` overflow"),
        )
        .expect("`rating` out of bounds"),
        comment: row.get("comment"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Review>, (broker::Id, user::Id)>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Review>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Review>, (broker::Id, user::Id)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (broker_id, author_id) = by.into_inner();

        const SQL: &str = "\
            SELECT id, broker_id, author_id, rating, comment, created_at \
            FROM reviews \
            WHERE broker_id = $1::UUID \
              AND author_id = $2::UUID \
            LIMIT 1";
        self.query_opt(SQL, &[&broker_id, &author_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Lock<By<Review, (broker::Id, user::Id)>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Review, (broker::Id, user::Id)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (broker_id, author_id) = by.into_inner();

        const SQL: &str = "\
            INSERT INTO reviews_lock \
            VALUES ($1::UUID, $2::UUID) \
            ON CONFLICT (broker_id, author_id) DO NOTHING";
        self.query(SQL, &[&broker_id, &author_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Insert<Review>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(review): Insert<Review>,
    ) -> Result<Self::Ok, Self::Err> {
        let Review {
            id,
            broker_id,
            author_id,
            rating,
            comment,
            created_at,
        } = review;

        let rating = i16::from(rating.u8());

        const SQL: &str = "\
            INSERT INTO reviews (\
                id, broker_id, author_id, rating, comment, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, \
                $4::INT2, $5::VARCHAR, \
                $6::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET rating = EXCLUDED.rating, \
                comment = EXCLUDED.comment";
        self.exec(
            SQL,
            &[&id, &broker_id, &author_id, &rating, &comment, &created_at],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C>
    Database<Select<By<read::review::list::Page, read::review::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<read::review::list::TotalCount, read::review::list::Filter>>,
        Ok = read::review::list::TotalCount,
        Err = Traced<database::Error>,
    >,
{
    type Ok = read::review::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::review::list::Page, read::review::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::review::list::Selector { arguments, filter } =
            by.into_inner();

        let total = self
            .execute(Select(By::new(filter)))
            .await
            .map_err(tracerr::wrap!())?;
        let total = usize::try_from(i64::from(total))
            .expect("`COUNT` is non-negative");

        let limit = i64::try_from(arguments.limit()).unwrap();
        let offset = i64::try_from(arguments.offset()).unwrap();
        let ps: Vec<&(dyn ToSql + Sync)> =
            vec![&limit, &offset, &filter.broker_id];

        const SQL: &str = "\
            SELECT id, broker_id, author_id, rating, comment, created_at \
            FROM reviews \
            WHERE broker_id = $3::UUID \
            ORDER BY created_at DESC, id ASC \
            LIMIT $1::INT8 OFFSET $2::INT8";
        let items = self
            .query(SQL, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect();

        Ok(read::review::list::Page::new(arguments, items, total))
    }
}

impl<C>
    Database<
        Select<By<read::review::list::TotalCount, read::review::list::Filter>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::review::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::review::list::TotalCount, read::review::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::review::list::Filter { broker_id } = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM reviews \
            WHERE broker_id = $1::UUID";
        self.query_opt(SQL, &[&broker_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i64>(0).into())
    }
}

impl<C> Database<Select<By<read::review::Summary, broker::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::review::Summary;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::review::Summary, broker::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let broker_id: broker::Id = by.into_inner();

        const SQL: &str = "\
            SELECT AVG(rating)::NUMERIC AS average, \
                   COUNT(*)::INT8 AS count \
            FROM reviews \
            WHERE broker_id = $1::UUID";
        let row = self
            .query_opt(SQL, &[&broker_id])
            .await
            .map_err(tracerr::wrap!())?
            .expect("always exists");

        Ok(read::review::Summary {
            average: row
                .get::<_, Option<Decimal>>("average")
                .map(|avg| avg.round_dp(2)),
            count: row.get("count"),
        })
    }
}
