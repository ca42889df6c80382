use std::{borrow::Cow, sync::Arc};

use tower::{Service, ServiceExt};

pub mod member_command;
pub mod register;
pub mod roster_file;

pub struct DomainLogic<R, S> {
    roster: Arc<R>,
    storage: Arc<S>,
    /// Domain appended to the email local part given at registration
    email_domain: Arc<str>,
}

impl<R, S> DomainLogic<R, S> {
    pub fn new(roster: Arc<R>, storage: Arc<S>, email_domain: impl Into<Arc<str>>) -> Self {
        Self {
            roster,
            storage,
            email_domain: email_domain.into(),
        }
    }

    /// Wait until the service is ready and run a single request
    ///
    /// `DomainLogic` serves several request types, so this pins down which one `ready` is for.
    pub async fn execute<Req>(&mut self, req: Req) -> Result<<Self as Service<Req>>::Response, Error>
    where
        Self: Service<Req, Error = Error>,
    {
        ServiceExt::<Req>::ready(self).await?.call(req).await
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("roster port error: {0}")]
    Roster(#[from] crate::ports::roster::Error),
    #[error("storage port error: {0}")]
    Storage(#[from] crate::ports::storage::Error),
    #[error("{0}")]
    Domain(#[from] crate::domain::DomainError),
    #[error("cannot read member records: {0}")]
    Format(#[from] crate::formats::records::ParseError),

    #[error("invalid input: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("no members to export")]
    NothingToExport,
    #[error("invalid state: {0}")]
    InvalidState(Cow<'static, str>),
}
