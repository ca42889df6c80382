use crate::domain::Member;

/// The collection of registered members, kept in registration order
#[mockall::automock]
#[async_trait::async_trait]
pub trait RosterPort {
    async fn add(&self, member: Member) -> Result<(), Error>;
    async fn get_member(&self, member_id: &str) -> Result<Member, Error>;
    /// Replace the stored member that has the same id, keeping its position
    ///
    /// The stored member must still equal `expected`, otherwise [`Error::Conflict`] is returned
    /// and nothing is written.
    async fn update_member(&self, expected: &Member, member: Member) -> Result<(), Error>;
    async fn list_members(&self) -> Result<Vec<Member>, Error>;
    async fn clear(&self) -> Result<(), Error>;
    /// Swap the whole roster for `members`
    ///
    /// The roster is left untouched if two of the new members share an id.
    async fn replace_all(&self, members: Vec<Member>) -> Result<(), Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Another member is already registered under this id
    #[error("member {0} already exists")]
    DuplicateId(String),

    /// The member changed between being read and being written back
    #[error("member {0} was changed by another operation")]
    Conflict(String),

    /// Domain-level error when a member does not exist
    #[error("member {0} does not exist")]
    MemberDoesNotExist(String),

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as a poisoned lock or an unreachable store.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
