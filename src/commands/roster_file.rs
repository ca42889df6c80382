use std::{
    future::Future,
    path::PathBuf,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::Member,
    formats::{records, report},
    ports::{roster::RosterPort, storage::StoragePort},
};
use tower::Service;

use super::{DomainLogic, Error};

/// Write the bordered member report
pub struct ExportReportRequest {
    pub path: PathBuf,
}

/// Replace the roster with the records found in a file
pub struct ImportRecordsRequest {
    pub path: PathBuf,
}

/// Write the roster as records that [`ImportRecordsRequest`] can load again
pub struct SaveRecordsRequest {
    pub path: PathBuf,
}

pub struct ListMembersRequest;

#[derive(Debug, PartialEq, Eq)]
pub struct RosterFileResponse {
    pub path: PathBuf,
    /// Members written or loaded
    pub count: usize,
}

#[derive(Debug, PartialEq)]
pub struct ListMembersResponse {
    pub members: Vec<Member>,
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = Result<T, Error>>>>;

impl<R, S> Service<ExportReportRequest> for DomainLogic<R, S>
where
    R: RosterPort + 'static,
    S: StoragePort + 'static,
{
    type Response = RosterFileResponse;
    type Error = Error;
    type Future = BoxFuture<Self::Response>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ExportReportRequest) -> Self::Future {
        let roster = self.roster.clone();
        let storage = self.storage.clone();
        Box::pin(async move {
            let members = roster.list_members().await?;
            if members.is_empty() {
                return Err(Error::NothingToExport);
            }

            storage
                .write_text(&req.path, &report::render(&members))
                .await?;
            tracing::info!(path = %req.path.display(), count = members.len(), "report exported");

            Ok(RosterFileResponse {
                path: req.path,
                count: members.len(),
            })
        })
    }
}

impl<R, S> Service<SaveRecordsRequest> for DomainLogic<R, S>
where
    R: RosterPort + 'static,
    S: StoragePort + 'static,
{
    type Response = RosterFileResponse;
    type Error = Error;
    type Future = BoxFuture<Self::Response>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: SaveRecordsRequest) -> Self::Future {
        let roster = self.roster.clone();
        let storage = self.storage.clone();
        Box::pin(async move {
            let members = roster.list_members().await?;
            if members.is_empty() {
                return Err(Error::NothingToExport);
            }

            storage
                .write_text(&req.path, &records::to_records(&members))
                .await?;
            tracing::info!(path = %req.path.display(), count = members.len(), "records saved");

            Ok(RosterFileResponse {
                path: req.path,
                count: members.len(),
            })
        })
    }
}

impl<R, S> Service<ImportRecordsRequest> for DomainLogic<R, S>
where
    R: RosterPort + 'static,
    S: StoragePort + 'static,
{
    type Response = RosterFileResponse;
    type Error = Error;
    type Future = BoxFuture<Self::Response>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ImportRecordsRequest) -> Self::Future {
        let roster = self.roster.clone();
        let storage = self.storage.clone();
        Box::pin(async move {
            // A file that cannot be read leaves the roster as it was
            let text = storage.read_text(&req.path).await?;

            // From here on a malformed record leaves the roster empty
            roster.clear().await?;
            let members = records::parse_records(&text)?;
            let count = members.len();
            roster.replace_all(members).await?;
            tracing::info!(path = %req.path.display(), count, "records imported");

            Ok(RosterFileResponse {
                path: req.path,
                count,
            })
        })
    }
}

impl<R, S> Service<ListMembersRequest> for DomainLogic<R, S>
where
    R: RosterPort + 'static,
    S: StoragePort + 'static,
{
    type Response = ListMembersResponse;
    type Error = Error;
    type Future = BoxFuture<Self::Response>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: ListMembersRequest) -> Self::Future {
        let roster = self.roster.clone();
        Box::pin(async move {
            Ok(ListMembersResponse {
                members: roster.list_members().await?,
            })
        })
    }
}
