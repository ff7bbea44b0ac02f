//! [`Broker`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Insert, Lock, Select};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{broker, user, verification, Broker},
    infra::{
        database::{
            self,
            postgres::{Connection, SubstringPattern},
            Postgres,
        },
        Database,
    },
    read,
};

impl<C, IDs> Database<Select<By<HashMap<broker::Id, Broker>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[broker::Id]>,
{
    type Ok = HashMap<broker::Id, Broker>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<broker::Id, Broker>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[broker::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let limit = i32::try_from(ids.len()).unwrap();

        const SQL: &str = "\
            SELECT id, user_id, agency_id, \
                   name, phone, email, bio, photo_url, \
                   license_number, registration_id, \
                   years_of_experience, languages, \
                   verification, completeness, \
                   created_at \
            FROM brokers \
            WHERE id IN (SELECT unnest($1::UUID[]) LIMIT $2::INT4) \
            LIMIT $2::INT4";
        Ok(self
            .query(SQL, &[&ids, &limit])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let id = row.get("id");
                (
                    id,
                    Broker {
                        id,
                        user_id: row.get("user_id"),
                        agency_id: row.get("agency_id"),
                        name: row.get("name"),
                        phone: row.get("phone"),
                        email: row.get("email"),
                        bio: row.get("bio"),
                        photo_url: row.get("photo_url"),
                        license_number: row.get("license_number"),
                        registration_id: row.get("registration_id"),
                        years_of_experience: row
                            .get::<_, Option<i32>>("years_of_experience")
                            .map(u16::try_from)
                            .transpose()
                            .expect("`years_of_experience` overflow"),
                        languages: row.get("languages"),
                        verification: row.get("verification"),
                        completeness: row.get("completeness"),
                        created_at: row.get("created_at"),
                    },
                )
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<Broker>, broker::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<broker::Id, Broker>, [broker::Id; 1]>>,
        Ok = HashMap<broker::Id, Broker>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Broker>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Broker>, broker::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C> Database<Select<By<Option<Broker>, user::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Option<Broker>, broker::Id>>,
        Ok = Option<Broker>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Broker>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Broker>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let user_id: user::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM brokers \
            WHERE user_id = $1::UUID \
            LIMIT 1";
        let Some(row) = self
            .query_opt(SQL, &[&user_id])
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        self.execute(Select(By::new(row.get::<_, broker::Id>("id"))))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Lock<By<Broker, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Broker, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let user_id: user::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO brokers_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (user_id) DO NOTHING";
        self.query(SQL, &[&user_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Insert<Broker>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(broker): Insert<Broker>,
    ) -> Result<Self::Ok, Self::Err> {
        let Broker {
            id,
            user_id,
            agency_id,
            name,
            phone,
            email,
            bio,
            photo_url,
            license_number,
            registration_id,
            years_of_experience,
            languages,
            verification,
            completeness,
            created_at,
        } = broker;

        let years_of_experience = years_of_experience.map(i32::from);

        const SQL: &str = "\
            INSERT INTO brokers (\
                id, user_id, agency_id, \
                name, phone, email, bio, photo_url, \
                license_number, registration_id, \
                years_of_experience, languages, \
                verification, completeness, \
                created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, \
                $4::VARCHAR, $5::VARCHAR, $6::VARCHAR, \
                $7::VARCHAR, $8::VARCHAR, \
                $9::VARCHAR, $10::VARCHAR, \
                $11::INT4, $12::VARCHAR[], \
                $13::INT2, $14::NUMERIC, \
                $15::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET agency_id = EXCLUDED.agency_id, \
                name = EXCLUDED.name, \
                phone = EXCLUDED.phone, \
                email = EXCLUDED.email, \
                bio = EXCLUDED.bio, \
                photo_url = EXCLUDED.photo_url, \
                license_number = EXCLUDED.license_number, \
                registration_id = EXCLUDED.registration_id, \
                years_of_experience = EXCLUDED.years_of_experience, \
                languages = EXCLUDED.languages, \
                verification = EXCLUDED.verification, \
                completeness = EXCLUDED.completeness";
        self.exec(
            SQL,
            &[
                &id,
                &user_id,
                &agency_id,
                &name,
                &phone,
                &email,
                &bio,
                &photo_url,
                &license_number,
                &registration_id,
                &years_of_experience,
                &languages,
                &verification,
                &completeness,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C>
    Database<
        Select<
            By<
                read::broker::directory::Page,
                read::broker::directory::Selector,
            >,
        >,
    > for Postgres<C>
where
    C: Connection,
    Self: Database<
            Select<
                By<
                    read::broker::directory::TotalCount,
                    read::broker::directory::Filter,
                >,
            >,
            Ok = read::broker::directory::TotalCount,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<broker::Id, Broker>, Vec<broker::Id>>>,
            Ok = HashMap<broker::Id, Broker>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = read::broker::directory::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::broker::directory::Page, read::broker::directory::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::broker::directory::Selector { arguments, filter } =
            by.into_inner();

        let total = self
            .execute(Select(By::new(filter.clone())))
            .await
            .map_err(tracerr::wrap!())?;
        let total = usize::try_from(i64::from(total))
            .expect("`COUNT` is non-negative");

        let limit = i64::try_from(arguments.limit()).unwrap();
        let offset = i64::try_from(arguments.offset()).unwrap();
        let verified = verification::Status::Verified;

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit, &offset, &verified];

        let name_pattern = filter
            .name
            .as_ref()
            .map(|n| SubstringPattern::new(n.as_ref()));
        let name_pattern_idx = name_pattern.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });

        let sql = format!(
            "SELECT id \
             FROM brokers \
             WHERE verification = $3::INT2 \
                   {name_filtering} \
             ORDER BY completeness DESC, created_at DESC, id ASC \
             LIMIT $1::INT8 OFFSET $2::INT8",
            name_filtering =
                name_pattern_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND name ILIKE ${idx}::VARCHAR"))
                }),
        );
        let ids = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| row.get("id"))
            .collect::<Vec<broker::Id>>();

        let mut brokers = self
            .execute(Select(By::new(ids.clone())))
            .await
            .map_err(tracerr::wrap!())?;
        let items = ids
            .iter()
            .filter_map(|id| brokers.remove(id))
            .collect();

        Ok(read::broker::directory::Page::new(arguments, items, total))
    }
}

impl<C>
    Database<
        Select<
            By<
                read::broker::directory::TotalCount,
                read::broker::directory::Filter,
            >,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::broker::directory::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                read::broker::directory::TotalCount,
                read::broker::directory::Filter,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::broker::directory::Filter { name } = by.into_inner();

        let verified = verification::Status::Verified;
        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&verified];

        let name_pattern =
            name.as_ref().map(|n| SubstringPattern::new(n.as_ref()));
        let name_pattern_idx = name_pattern.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });

        let sql = format!(
            "SELECT COUNT(*)::INT8 \
             FROM brokers \
             WHERE verification = $1::INT2 \
                   {name_filtering}",
            name_filtering =
                name_pattern_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND name ILIKE ${idx}::VARCHAR"))
                }),
        );
        self.query_opt(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i64>(0).into())
    }
}
