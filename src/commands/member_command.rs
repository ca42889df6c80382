use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{DomainError, Member, MemberEvent, MemberKind, Plan},
    ports::{roster::RosterPort, storage::StoragePort},
};
use tower::Service;

use super::{DomainLogic, Error};

/// A lifecycle operation on a registered member
pub struct MemberCommandRequest {
    pub member_id: String,
    pub command: MemberCommand,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MemberCommand {
    Activate,
    Deactivate,
    MarkAttendance,
    /// Regular members only
    UpgradePlan { plan: Plan },
    /// Regular members only, the reason must not be blank
    RevertRegular { reason: String },
    /// Premium members only
    RevertPremium,
    /// Premium members only
    PayDueAmount { amount: f64 },
    /// Premium members only
    CalculateDiscount,
}

impl MemberCommand {
    /// The member kind this command is restricted to, if any
    fn required_kind(&self) -> Option<MemberKind> {
        match self {
            MemberCommand::Activate | MemberCommand::Deactivate | MemberCommand::MarkAttendance => {
                None
            }
            MemberCommand::UpgradePlan { .. } | MemberCommand::RevertRegular { .. } => {
                Some(MemberKind::Regular)
            }
            MemberCommand::RevertPremium
            | MemberCommand::PayDueAmount { .. }
            | MemberCommand::CalculateDiscount => Some(MemberKind::Premium),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct MemberCommandResponse {
    /// The member after the command was applied
    pub member: Member,
    pub events: Vec<MemberEvent>,
}

impl<R, S> Service<MemberCommandRequest> for DomainLogic<R, S>
where
    R: RosterPort + 'static,
    S: StoragePort + 'static,
{
    type Response = MemberCommandResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: MemberCommandRequest) -> Self::Future {
        let roster = self.roster.clone();
        Box::pin(async move {
            let original = roster.get_member(&req.member_id).await?;

            // Work on a copy, the roster only sees it if the command succeeds
            let mut member = original.clone();
            let events = apply(&mut member, req.command)?;
            roster.update_member(&original, member.clone()).await?;

            for event in &events {
                tracing::info!(member_id = member.id(), %event, "member updated");
            }

            Ok(MemberCommandResponse { member, events })
        })
    }
}

fn apply(member: &mut Member, command: MemberCommand) -> Result<Vec<MemberEvent>, Error> {
    if let Some(kind) = command.required_kind() {
        if member.kind() != kind {
            return Err(Error::InvalidState(
                format!("member {} is not a {} member", member.id(), kind).into(),
            ));
        }
    }

    let member_id = member.id().to_string();
    let events = match command {
        MemberCommand::Activate => vec![member.activate()],
        MemberCommand::Deactivate => vec![member.deactivate()],
        MemberCommand::MarkAttendance => member.mark_attendance()?,
        MemberCommand::UpgradePlan { plan } => regular(member)?.upgrade_plan(plan).map(|e| vec![e])?,
        MemberCommand::RevertRegular { reason } => {
            let reason = reason.trim();
            if reason.is_empty() {
                return Err(Error::Validation(vec![
                    "removal reason is required".to_string()
                ]));
            }
            regular(member)?.revert(reason)
        }
        MemberCommand::RevertPremium => premium(member)?.revert(),
        MemberCommand::PayDueAmount { amount } => premium(member)?.pay_due_amount(amount)?,
        MemberCommand::CalculateDiscount => match premium(member)?.calculate_discount() {
            discount if discount > 0.0 => vec![MemberEvent::DiscountApplied { amount: discount }],
            _ => return Err(DomainError::PaymentIncomplete(member_id).into()),
        },
    };

    Ok(events)
}

fn regular(member: &mut Member) -> Result<&mut crate::domain::RegularMember, Error> {
    member
        .as_regular_mut()
        .ok_or(Error::InvalidState("not a regular member".into()))
}

fn premium(member: &mut Member) -> Result<&mut crate::domain::PremiumMember, Error> {
    member
        .as_premium_mut()
        .ok_or(Error::InvalidState("not a premium member".into()))
}
