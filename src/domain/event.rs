use std::fmt;

use super::Plan;

/// Something that happened to a member as the result of a lifecycle operation
///
/// Operations return these instead of narrating what they did, so the caller decides whether to
/// log them, print them or ignore them.
#[derive(Clone, Debug, PartialEq)]
pub enum MemberEvent {
    Activated,
    Deactivated,
    /// Deactivation was requested for a member that was not active
    AlreadyInactive,
    AttendanceMarked {
        attendance_count: u32,
        loyalty_points: u32,
    },
    /// A regular member reached the attendance limit
    UpgradeEligible,
    PlanUpgraded {
        from: Plan,
        to: Plan,
        price: f64,
    },
    /// The requested payment overshot the balance and was reduced to it
    PaymentAdjusted {
        requested: f64,
        accepted: f64,
    },
    PaymentReceived {
        amount: f64,
        remaining: f64,
    },
    PaymentCompleted,
    DiscountApplied {
        amount: f64,
    },
    /// Attendance and loyalty points zeroed and the membership deactivated
    Reset,
    RegularReverted {
        reason: String,
    },
    PremiumReverted,
}

impl fmt::Display for MemberEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberEvent::Activated => write!(f, "membership activated"),
            MemberEvent::Deactivated => write!(f, "membership deactivated"),
            MemberEvent::AlreadyInactive => write!(f, "membership is already inactive"),
            MemberEvent::AttendanceMarked {
                attendance_count,
                loyalty_points,
            } => write!(
                f,
                "attendance marked, total attendance {attendance_count}, loyalty points {loyalty_points}"
            ),
            MemberEvent::UpgradeEligible => {
                write!(f, "attendance limit reached, eligible for an upgrade")
            }
            MemberEvent::PlanUpgraded { from, to, price } => {
                write!(f, "plan upgraded from {from} to {to}, new price {price:.2}")
            }
            MemberEvent::PaymentAdjusted {
                requested,
                accepted,
            } => write!(
                f,
                "payment of {requested:.2} exceeds the remaining due, adjusted to {accepted:.2}"
            ),
            MemberEvent::PaymentReceived { amount, remaining } => {
                write!(f, "payment of {amount:.2} received, remaining due {remaining:.2}")
            }
            MemberEvent::PaymentCompleted => write!(f, "payment completed"),
            MemberEvent::DiscountApplied { amount } => write!(f, "discount of {amount:.2} applied"),
            MemberEvent::Reset => write!(f, "member details reset"),
            MemberEvent::RegularReverted { reason } => {
                write!(f, "regular member reverted, reason: {reason}")
            }
            MemberEvent::PremiumReverted => write!(f, "premium member reverted"),
        }
    }
}
