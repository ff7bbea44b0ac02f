//! [`Command`] for registering a new [`Agency`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::agency::{Description, Name};
use crate::{
    domain::{agency, Agency, Url},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for registering a new [`Agency`].
#[derive(Clone, Debug)]
pub struct RegisterAgency {
    /// [`Name`] of a new [`Agency`].
    pub name: agency::Name,

    /// [`Description`] of a new [`Agency`].
    pub description: Option<agency::Description>,

    /// Website [`Url`] of a new [`Agency`].
    pub website: Option<Url>,
}

impl<Db> Command<RegisterAgency> for Service<Db>
where
    Db: for<'n> Database<
            Select<By<Option<Agency>, &'n agency::Name>>,
            Ok = Option<Agency>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Agency>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Agency;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RegisterAgency,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RegisterAgency {
            name,
            description,
            website,
        } = cmd;

        let existing = self
            .database()
            .execute(Select(By::new(&name)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::NameOccupied(name)));
        }

        let agency = Agency {
            id: agency::Id::new(),
            name,
            description,
            website,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(agency.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(agency)
    }
}

/// Error of [`RegisterAgency`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`agency::Name`] is already occupied.
    #[display("`{_0}` agency name is occupied")]
    NameOccupied(#[error(not(source))] agency::Name),
}
