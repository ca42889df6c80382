mod event;
mod member;
mod premium;
mod regular;

pub use event::MemberEvent;
pub use member::{Activity, Profile};
pub use premium::{PremiumMember, DISCOUNT_RATE, PREMIUM_CHARGE, PREMIUM_VISIT_POINTS};
pub use regular::{Plan, RegularMember, ATTENDANCE_LIMIT, REGULAR_VISIT_POINTS};

/// A registered member of either kind
#[derive(Clone, Debug, PartialEq)]
pub enum Member {
    Regular(RegularMember),
    Premium(PremiumMember),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Regular,
    Premium,
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberKind::Regular => f.write_str("Regular"),
            MemberKind::Premium => f.write_str("Premium"),
        }
    }
}

impl Member {
    pub fn id(&self) -> &str {
        &self.profile().id
    }

    pub fn name(&self) -> &str {
        &self.profile().name
    }

    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Regular(_) => MemberKind::Regular,
            Member::Premium(_) => MemberKind::Premium,
        }
    }

    pub fn profile(&self) -> &Profile {
        match self {
            Member::Regular(member) => member.profile(),
            Member::Premium(member) => member.profile(),
        }
    }

    pub fn activity(&self) -> &Activity {
        match self {
            Member::Regular(member) => member.activity(),
            Member::Premium(member) => member.activity(),
        }
    }

    fn activity_mut(&mut self) -> &mut Activity {
        match self {
            Member::Regular(member) => member.activity_mut(),
            Member::Premium(member) => member.activity_mut(),
        }
    }

    pub fn activate(&mut self) -> MemberEvent {
        self.activity_mut().activate()
    }

    pub fn deactivate(&mut self) -> MemberEvent {
        self.activity_mut().deactivate()
    }

    /// Record a visit, using the loyalty rules of the member's kind
    pub fn mark_attendance(&mut self) -> Result<Vec<MemberEvent>, DomainError> {
        match self {
            Member::Regular(member) => member.mark_attendance(),
            Member::Premium(member) => member.mark_attendance(),
        }
    }

    pub fn as_regular_mut(&mut self) -> Option<&mut RegularMember> {
        match self {
            Member::Regular(member) => Some(member),
            Member::Premium(_) => None,
        }
    }

    pub fn as_premium_mut(&mut self) -> Option<&mut PremiumMember> {
        match self {
            Member::Premium(member) => Some(member),
            Member::Regular(_) => None,
        }
    }
}

impl From<RegularMember> for Member {
    fn from(member: RegularMember) -> Self {
        Member::Regular(member)
    }
}

impl From<PremiumMember> for Member {
    fn from(member: PremiumMember) -> Self {
        Member::Premium(member)
    }
}

/// Rejected lifecycle transitions
///
/// None of these change the member they were raised for.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("membership is not active for member {0}")]
    Inactive(String),

    /// Plans can only move up: Basic to Standard or Deluxe, Standard to Deluxe.
    #[error("cannot move from plan {current} to {requested}: only upgrades are allowed")]
    InvalidUpgrade { current: Plan, requested: Plan },

    #[error("unknown membership plan: {0}")]
    UnknownPlan(String),

    #[error("invalid payment amount {0}: amount must be greater than 0")]
    InvalidPaymentAmount(f64),

    #[error("payment is already complete for member {0}")]
    PaymentAlreadyComplete(String),

    #[error("payment is not complete for member {0}")]
    PaymentIncomplete(String),
}
