use crate::{
    domain::Member,
    ports::roster::{Error, RosterPort},
};
use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
};

/// In-memory roster
///
/// Every operation takes the lock for its whole duration, so concurrent callers see roster
/// mutations one at a time.
#[derive(Clone, Debug)]
pub struct MemoryRoster {
    members: Arc<Mutex<Vec<Member>>>,
}

#[async_trait::async_trait]
impl RosterPort for MemoryRoster {
    async fn add(&self, member: Member) -> Result<(), Error> {
        let mut members = self.members.lock()?;
        // Return an error if the id is already taken
        if members.iter().any(|existing| existing.id() == member.id()) {
            return Err(Error::DuplicateId(member.id().to_string()));
        }

        tracing::debug!(member_id = member.id(), "adding member to roster");
        members.push(member);
        Ok(())
    }

    async fn get_member(&self, member_id: &str) -> Result<Member, Error> {
        self.members
            .lock()?
            .iter()
            .find(|member| member.id() == member_id)
            .cloned()
            .ok_or_else(|| Error::MemberDoesNotExist(member_id.to_string()))
    }

    async fn update_member(&self, expected: &Member, member: Member) -> Result<(), Error> {
        let mut members = self.members.lock()?;
        let existing = members
            .iter_mut()
            .find(|existing| existing.id() == member.id())
            .ok_or_else(|| Error::MemberDoesNotExist(member.id().to_string()))?;

        // Compared under the same lock as the write
        if *existing != *expected {
            return Err(Error::Conflict(member.id().to_string()));
        }

        *existing = member;
        Ok(())
    }

    async fn list_members(&self) -> Result<Vec<Member>, Error> {
        Ok(self.members.lock()?.clone())
    }

    async fn clear(&self) -> Result<(), Error> {
        self.members.lock()?.clear();
        Ok(())
    }

    async fn replace_all(&self, members: Vec<Member>) -> Result<(), Error> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = members.iter().find(|member| !seen.insert(member.id())) {
            return Err(Error::DuplicateId(duplicate.id().to_string()));
        }

        tracing::debug!(count = members.len(), "replacing roster");
        *self.members.lock()? = members;
        Ok(())
    }
}

impl Default for MemoryRoster {
    fn default() -> Self {
        Self {
            members: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Erased [`PoisonError`]
///
/// `PoisonError` keeps the `MutexGuard` internally, which is not send. Thus we erase the error
/// and only keep the string representation instead.
#[derive(Debug, thiserror::Error)]
#[error("poison error: {0}")]
pub struct ErasedPoisonError(String);

impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{premium, regular};
    use rstest::*;
    use speculoos::prelude::*;

    #[fixture]
    fn roster() -> MemoryRoster {
        MemoryRoster::default()
    }

    #[rstest]
    #[tokio::test]
    async fn test_add_retrieve(roster: MemoryRoster) {
        let member = Member::from(regular("1", "Basic"));

        let res = roster.add(member.clone()).await;
        assert_that!(res).is_ok();

        let res = roster.get_member("1").await;
        assert_that!(res).is_ok().is_equal_to(member);
    }

    #[rstest]
    #[tokio::test]
    async fn test_add_duplicate_id(roster: MemoryRoster) {
        roster.add(regular("1", "Basic").into()).await.unwrap();

        // A premium member with the same id is still a duplicate
        let res = roster.add(premium("1").into()).await;

        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::DuplicateId(id) if id == "1"));
        assert_that!(roster.list_members().await.unwrap()).has_length(1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_missing(roster: MemoryRoster) {
        let res = roster.get_member("42").await;

        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::MemberDoesNotExist(id) if id == "42"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_keeps_order(roster: MemoryRoster) {
        roster.add(regular("1", "Basic").into()).await.unwrap();
        roster.add(premium("2").into()).await.unwrap();
        roster.add(regular("3", "Deluxe").into()).await.unwrap();

        let original = roster.get_member("2").await.unwrap();
        let mut member = original.clone();
        member.activate();
        roster.update_member(&original, member).await.unwrap();

        let members = roster.list_members().await.unwrap();
        let ids: Vec<_> = members.iter().map(Member::id).collect();
        assert_that!(ids).is_equal_to(vec!["1", "2", "3"]);
        assert_that!(members[1].activity().is_active()).is_true();
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_missing(roster: MemoryRoster) {
        let member = Member::from(premium("9"));

        let res = roster.update_member(&member, member.clone()).await;

        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::MemberDoesNotExist(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_stale_member_conflicts(roster: MemoryRoster) {
        // GIVEN two copies of the same member read before either is written back
        roster.add(premium("2").into()).await.unwrap();
        let original = roster.get_member("2").await.unwrap();
        let mut activated = original.clone();
        activated.activate();
        let mut paid = original.clone();
        paid.as_premium_mut().unwrap().pay_due_amount(100.0).unwrap();

        // WHEN both are written back against the same original
        roster.update_member(&original, activated.clone()).await.unwrap();
        let res = roster.update_member(&original, paid).await;

        // THEN the second write is refused and the first one is kept
        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::Conflict(id) if id == "2"));
        assert_that!(roster.get_member("2").await).is_ok().is_equal_to(activated);
    }

    #[rstest]
    #[tokio::test]
    async fn test_replace_all(roster: MemoryRoster) {
        roster.add(regular("1", "Basic").into()).await.unwrap();

        let res = roster
            .replace_all(vec![premium("7").into(), regular("8", "Standard").into()])
            .await;

        assert_that!(res).is_ok();
        let members = roster.list_members().await.unwrap();
        let ids: Vec<_> = members.iter().map(Member::id).collect();
        assert_that!(ids).is_equal_to(vec!["7", "8"]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_replace_all_rejects_duplicates(roster: MemoryRoster) {
        roster.add(regular("1", "Basic").into()).await.unwrap();

        let res = roster
            .replace_all(vec![premium("7").into(), regular("7", "Standard").into()])
            .await;

        assert_that!(res).is_err();
        assert_that!(roster.get_member("1").await).is_ok();
    }

    #[rstest]
    #[tokio::test]
    async fn test_clear(roster: MemoryRoster) {
        roster.add(regular("1", "Basic").into()).await.unwrap();

        roster.clear().await.unwrap();

        assert_that!(roster.list_members().await.unwrap()).is_empty();
    }
}
