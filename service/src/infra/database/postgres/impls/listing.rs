//! [`Listing`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Insert, Lock, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{listing, Listing},
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

impl<C, IDs> Database<Select<By<HashMap<listing::Id, Listing>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[listing::Id]>,
{
    type Ok = HashMap<listing::Id, Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<listing::Id, Listing>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[listing::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let limit = i32::try_from(ids.len()).unwrap();

        const SQL: &str = "\
            SELECT id, broker_id, title, description, \
                   kind, property_kind, location, \
                   bedrooms, bathrooms, furnishing, \
                   price, area, \
                   amenities, photo_urls, \
                   status, featured, view_count, \
                   created_at \
            FROM listings \
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
                    Listing {
                        id,
                        broker_id: row.get("broker_id"),
                        title: row.get("title"),
                        description: row.get("description"),
                        kind: row.get("kind"),
                        property_kind: row.get("property_kind"),
                        location: row.get("location"),
                        bedrooms: row
                            .get::<_, Option<i32>>("bedrooms")
                            .map(u16::try_from)
                            .transpose()
                            .expect("`bedrooms` overflow"),
                        bathrooms: row
                            .get::<_, Option<i32>>("bathrooms")
                            .map(u16::try_from)
                            .transpose()
                            .expect("`bathrooms` overflow"),
                        furnishing: row.get("furnishing"),
                        price: row.get("price"),
                        area: row.get("area"),
                        amenities: row.get("amenities"),
                        photo_urls: row.get("photo_urls"),
                        status: row.get("status"),
                        featured: row.get("featured"),
                        view_count: u32::try_from(
                            row.get::<_, i64>("view_count"),
                        )
                        .expect("`view_count` overflow"),
                        created_at: row.get("created_at"),
                    },
                )
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<Listing>, listing::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<listing::Id, Listing>, [listing::Id; 1]>>,
        Ok = HashMap<listing::Id, Listing>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C> Database<Lock<By<Listing, listing::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Listing, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: listing::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO listings_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Insert<Listing>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(listing): Insert<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        let Listing {
            id,
            broker_id,
            title,
            description,
            kind,
            property_kind,
            location,
            bedrooms,
            bathrooms,
            furnishing,
            price,
            area,
            amenities,
            photo_urls,
            status,
            featured,
            view_count,
            created_at,
        } = listing;

        let bedrooms = bedrooms.map(i32::from);
        let bathrooms = bathrooms.map(i32::from);
        let view_count = i64::from(view_count);

        // Derived numeric columns back range filtering and sorting, so are
        // recomputed on every write.
        let price_numeric = price.numeric();
        let area_numeric = area.as_ref().map(common::NumericText::numeric);

        const SQL: &str = "\
            INSERT INTO listings (\
                id, broker_id, title, description, \
                kind, property_kind, location, \
                bedrooms, bathrooms, furnishing, \
                price, price_numeric, area, area_numeric, \
                amenities, photo_urls, \
                status, featured, view_count, \
                created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, \
                $3::VARCHAR, $4::VARCHAR, \
                $5::INT2, $6::INT2, $7::VARCHAR, \
                $8::INT4, $9::INT4, $10::INT2, \
                $11::VARCHAR, $12::NUMERIC, \
                $13::VARCHAR, $14::NUMERIC, \
                $15::VARCHAR[], $16::VARCHAR[], \
                $17::INT2, $18::BOOL, $19::INT8, \
                $20::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET title = EXCLUDED.title, \
                description = EXCLUDED.description, \
                kind = EXCLUDED.kind, \
                property_kind = EXCLUDED.property_kind, \
                location = EXCLUDED.location, \
                bedrooms = EXCLUDED.bedrooms, \
                bathrooms = EXCLUDED.bathrooms, \
                furnishing = EXCLUDED.furnishing, \
                price = EXCLUDED.price, \
                price_numeric = EXCLUDED.price_numeric, \
                area = EXCLUDED.area, \
                area_numeric = EXCLUDED.area_numeric, \
                amenities = EXCLUDED.amenities, \
                photo_urls = EXCLUDED.photo_urls, \
                status = EXCLUDED.status, \
                featured = EXCLUDED.featured";
        self.exec(
            SQL,
            &[
                &id,
                &broker_id,
                &title,
                &description,
                &kind,
                &property_kind,
                &location,
                &bedrooms,
                &bathrooms,
                &furnishing,
                &price,
                &price_numeric,
                &area,
                &area_numeric,
                &amenities,
                &photo_urls,
                &status,
                &featured,
                &view_count,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<read::listing::View>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(view): Update<read::listing::View>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::listing::View(id) = view;

        const SQL: &str = "\
            UPDATE listings \
            SET view_count = view_count + 1 \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}

impl<C>
    Database<
        Select<By<read::listing::search::Page, read::listing::search::Selector>>,
    > for Postgres<C>
where
    C: Connection,
    Self: Database<
            Select<
                By<
                    read::listing::search::TotalCount,
                    read::listing::search::Filter,
                >,
            >,
            Ok = read::listing::search::TotalCount,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<listing::Id, Listing>, Vec<listing::Id>>>,
            Ok = HashMap<listing::Id, Listing>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = read::listing::search::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::listing::search::Page, read::listing::search::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        use read::listing::search::SortKey;

        let read::listing::search::Selector {
            arguments,
            filter,
            sort,
        } = by.into_inner();

        let total = self
            .execute(Select(By::new(filter.clone())))
            .await
            .map_err(tracerr::wrap!())?;
        let total = usize::try_from(i64::from(total))
            .expect("`COUNT` is non-negative");

        let limit = i64::try_from(arguments.limit()).unwrap();
        let offset = i64::try_from(arguments.offset()).unwrap();
        let available = listing::Status::Available;

        let mut ps: Vec<&(dyn ToSql + Sync)> =
            vec![&limit, &offset, &available];

        let kind_idx = filter.kind.as_ref().map(|k| {
            ps.push(k);
            ps.len()
        });
        let property_kind_idx = filter.property_kind.as_ref().map(|k| {
            ps.push(k);
            ps.len()
        });
        let location_pattern = filter
            .location
            .as_ref()
            .map(|l| SubstringPattern::new(l.as_ref()));
        let location_idx = location_pattern.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });
        let bedrooms = filter.bedrooms.map(i32::from);
        let bedrooms_idx = bedrooms.as_ref().map(|b| {
            ps.push(b);
            ps.len()
        });
        let furnishing_idx = filter.furnishing.as_ref().map(|f| {
            ps.push(f);
            ps.len()
        });
        let min_price_idx = filter.min_price.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });
        let max_price_idx = filter.max_price.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });

        // Every ordering ends with the same tie-break, keeping repeated
        // calls with the same arguments stable.
        let ordering = match sort {
            SortKey::Newest => "created_at DESC, id ASC",
            SortKey::PriceAsc => "price_numeric ASC, created_at DESC, id ASC",
            SortKey::PriceDesc => "price_numeric DESC, created_at DESC, id ASC",
            SortKey::Popular => "view_count DESC, created_at DESC, id ASC",
            SortKey::AreaDesc => {
                "area_numeric DESC NULLS LAST, created_at DESC, id ASC"
            }
        };

        let sql = format!(
            "SELECT id \
             FROM listings \
             WHERE status = $3::INT2 \
                   {kind} \
                   {property_kind} \
                   {location} \
                   {bedrooms} \
                   {furnishing} \
                   {min_price} \
                   {max_price} \
             ORDER BY {ordering} \
             LIMIT $1::INT8 OFFSET $2::INT8",
            kind = kind_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND kind = ${idx}::INT2"))
            }),
            property_kind =
                property_kind_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND property_kind = ${idx}::INT2"))
                }),
            location = location_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND location ILIKE ${idx}::VARCHAR"))
            }),
            bedrooms = bedrooms_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND bedrooms = ${idx}::INT4"))
            }),
            furnishing = furnishing_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND furnishing = ${idx}::INT2"))
            }),
            min_price = min_price_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND price_numeric >= ${idx}::NUMERIC"))
            }),
            max_price = max_price_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND price_numeric <= ${idx}::NUMERIC"))
            }),
        );
        let ids = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| row.get("id"))
            .collect::<Vec<listing::Id>>();

        let mut listings = self
            .execute(Select(By::new(ids.clone())))
            .await
            .map_err(tracerr::wrap!())?;
        let items = ids
            .iter()
            .filter_map(|id| listings.remove(id))
            .collect();

        Ok(read::listing::search::Page::new(arguments, items, total))
    }
}

impl<C>
    Database<
        Select<
            By<read::listing::search::TotalCount, read::listing::search::Filter>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::listing::search::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::listing::search::TotalCount, read::listing::search::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();

        let available = listing::Status::Available;
        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&available];

        let kind_idx = filter.kind.as_ref().map(|k| {
            ps.push(k);
            ps.len()
        });
        let property_kind_idx = filter.property_kind.as_ref().map(|k| {
            ps.push(k);
            ps.len()
        });
        let location_pattern = filter
            .location
            .as_ref()
            .map(|l| SubstringPattern::new(l.as_ref()));
        let location_idx = location_pattern.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });
        let bedrooms = filter.bedrooms.map(i32::from);
        let bedrooms_idx = bedrooms.as_ref().map(|b| {
            ps.push(b);
            ps.len()
        });
        let furnishing_idx = filter.furnishing.as_ref().map(|f| {
            ps.push(f);
            ps.len()
        });
        let min_price_idx = filter.min_price.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });
        let max_price_idx = filter.max_price.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });

        let sql = format!(
            "SELECT COUNT(*)::INT8 \
             FROM listings \
             WHERE status = $1::INT2 \
                   {kind} \
                   {property_kind} \
                   {location} \
                   {bedrooms} \
                   {furnishing} \
                   {min_price} \
                   {max_price}",
            kind = kind_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND kind = ${idx}::INT2"))
            }),
            property_kind =
                property_kind_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND property_kind = ${idx}::INT2"))
                }),
            location = location_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND location ILIKE ${idx}::VARCHAR"))
            }),
            bedrooms = bedrooms_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND bedrooms = ${idx}::INT4"))
            }),
            furnishing = furnishing_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND furnishing = ${idx}::INT2"))
            }),
            min_price = min_price_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND price_numeric >= ${idx}::NUMERIC"))
            }),
            max_price = max_price_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND price_numeric <= ${idx}::NUMERIC"))
            }),
        );
        self.query_opt(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i64>(0).into())
    }
}
