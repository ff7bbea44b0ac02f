//! [`Message`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::Message,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Restores a [`Message`] from the provided [`Row`].
fn from_row(row: &Row) -> Message {
    Message {
        id: row.get("id"),
        sender_id: row.get("sender_id"),
        recipient_id: row.get("recipient_id"),
        listing_id: row.get("listing_id"),
        text: row.get("text"),
        read_at: row.get("read_at"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Insert<Message>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(message): Insert<Message>,
    ) -> Result<Self::Ok, Self::Err> {
        let Message {
            id,
            sender_id,
            recipient_id,
            listing_id,
            text,
            read_at,
            created_at,
        } = message;

        const SQL: &str = "\
            INSERT INTO messages (\
                id, sender_id, recipient_id, listing_id, \
                text, read_at, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::UUID, \
                $5::VARCHAR, \
                $6::TIMESTAMPTZ, $7::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET read_at = EXCLUDED.read_at";
        self.exec(
            SQL,
            &[
                &id,
                &sender_id,
                &recipient_id,
                &listing_id,
                &text,
                &read_at,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<read::message::ConversationRead>> for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(conversation): Update<read::message::ConversationRead>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::message::ConversationRead { reader, peer, at } =
            conversation;

        // Already read messages keep their original `read_at`.
        const SQL: &str = "\
            UPDATE messages \
            SET read_at = $3::TIMESTAMPTZ \
            WHERE recipient_id = $1::UUID \
              AND sender_id = $2::UUID \
              AND read_at IS NULL";
        self.exec(SQL, &[&reader, &peer, &at])
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C>
    Database<
        Select<
            By<
                read::message::conversation::Page,
                read::message::conversation::Selector,
            >,
        >,
    > for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<
            By<
                read::message::conversation::TotalCount,
                read::message::conversation::Filter,
            >,
        >,
        Ok = read::message::conversation::TotalCount,
        Err = Traced<database::Error>,
    >,
{
    type Ok = read::message::conversation::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                read::message::conversation::Page,
                read::message::conversation::Selector,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::message::conversation::Selector { arguments, filter } =
            by.into_inner();

        let total = self
            .execute(Select(By::new(filter)))
            .await
            .map_err(tracerr::wrap!())?;
        let total = usize::try_from(i64::from(total))
            .expect("`COUNT` is non-negative");

        let limit = i64::try_from(arguments.limit()).unwrap();
        let offset = i64::try_from(arguments.offset()).unwrap();
        let (a, b) = filter.between;
        let ps: Vec<&(dyn ToSql + Sync)> = vec![&limit, &offset, &a, &b];

        const SQL: &str = "\
            SELECT id, sender_id, recipient_id, listing_id, \
                   text, read_at, created_at \
            FROM messages \
            WHERE (sender_id = $3::UUID AND recipient_id = $4::UUID) \
               OR (sender_id = $4::UUID AND recipient_id = $3::UUID) \
            ORDER BY created_at DESC, id ASC \
            LIMIT $1::INT8 OFFSET $2::INT8";
        let items = self
            .query(SQL, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect();

        Ok(read::message::conversation::Page::new(
            arguments, items, total,
        ))
    }
}

impl<C>
    Database<
        Select<
            By<
                read::message::conversation::TotalCount,
                read::message::conversation::Filter,
            >,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::message::conversation::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                read::message::conversation::TotalCount,
                read::message::conversation::Filter,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::message::conversation::Filter { between: (a, b) } =
            by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM messages \
            WHERE (sender_id = $1::UUID AND recipient_id = $2::UUID) \
               OR (sender_id = $2::UUID AND recipient_id = $1::UUID)";
        self.query_opt(SQL, &[&a, &b])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i64>(0).into())
    }
}
