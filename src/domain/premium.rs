use super::{Activity, DomainError, MemberEvent, Profile};

/// Fixed charge for a premium membership
pub const PREMIUM_CHARGE: f64 = 50_000.0;
/// Share of the charge granted as a discount once it is fully paid
pub const DISCOUNT_RATE: f64 = 0.10;
/// Loyalty points earned per visit
pub const PREMIUM_VISIT_POINTS: u32 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct PremiumMember {
    profile: Profile,
    activity: Activity,
    personal_trainer: String,
    payment_complete: bool,
    /// Accumulated payments, never above [`PREMIUM_CHARGE`] through `pay_due_amount`
    paid_amount: f64,
    /// Zero unless the payment is complete
    discount_amount: f64,
}

impl PremiumMember {
    pub fn new(profile: Profile, personal_trainer: impl Into<String>) -> Self {
        Self {
            profile,
            activity: Activity::default(),
            personal_trainer: personal_trainer.into(),
            payment_complete: false,
            paid_amount: 0.0,
            discount_amount: 0.0,
        }
    }

    /// Rebuild a premium member loaded from a file
    ///
    /// A paid amount covering the charge marks the payment complete, and a discount recorded
    /// against an incomplete payment is dropped.
    pub fn restore(
        profile: Profile,
        activity: Activity,
        personal_trainer: String,
        payment_complete: bool,
        paid_amount: f64,
        discount_amount: f64,
    ) -> Self {
        let payment_complete = payment_complete || paid_amount >= PREMIUM_CHARGE;
        Self {
            profile,
            activity,
            personal_trainer,
            payment_complete,
            paid_amount,
            discount_amount: if payment_complete {
                discount_amount
            } else {
                0.0
            },
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub(super) fn activity_mut(&mut self) -> &mut Activity {
        &mut self.activity
    }

    pub fn personal_trainer(&self) -> &str {
        &self.personal_trainer
    }

    pub fn is_payment_complete(&self) -> bool {
        self.payment_complete
    }

    pub fn paid_amount(&self) -> f64 {
        self.paid_amount
    }

    pub fn remaining_amount(&self) -> f64 {
        PREMIUM_CHARGE - self.paid_amount
    }

    pub fn discount_amount(&self) -> f64 {
        self.discount_amount
    }

    pub fn mark_attendance(&mut self) -> Result<Vec<MemberEvent>, DomainError> {
        let event = self
            .activity
            .record_visit(&self.profile.id, PREMIUM_VISIT_POINTS)?;
        Ok(vec![event])
    }

    /// Add a payment towards the charge
    ///
    /// Payments overshooting the remaining balance are reduced to it.
    pub fn pay_due_amount(&mut self, amount: f64) -> Result<Vec<MemberEvent>, DomainError> {
        // Written this way round so NaN is rejected too
        if !(amount > 0.0) {
            return Err(DomainError::InvalidPaymentAmount(amount));
        }
        if self.payment_complete {
            return Err(DomainError::PaymentAlreadyComplete(self.profile.id.clone()));
        }

        let mut events = Vec::new();
        let remaining = self.remaining_amount();
        let accepted = if amount > remaining {
            events.push(MemberEvent::PaymentAdjusted {
                requested: amount,
                accepted: remaining,
            });
            remaining
        } else {
            amount
        };

        self.paid_amount += accepted;

        if self.paid_amount >= PREMIUM_CHARGE {
            self.payment_complete = true;
            events.push(MemberEvent::PaymentCompleted);
        } else {
            events.push(MemberEvent::PaymentReceived {
                amount: accepted,
                remaining: self.remaining_amount(),
            });
        }

        Ok(events)
    }

    /// Apply the discount for a fully paid membership
    ///
    /// Returns `0.0` without touching the member while the payment is incomplete.
    pub fn calculate_discount(&mut self) -> f64 {
        if !self.payment_complete {
            return 0.0;
        }

        self.discount_amount = PREMIUM_CHARGE * DISCOUNT_RATE;
        self.discount_amount
    }

    pub fn revert(&mut self) -> Vec<MemberEvent> {
        let reset = self.activity.reset();
        self.payment_complete = false;
        self.paid_amount = 0.0;
        self.discount_amount = 0.0;
        vec![reset, MemberEvent::PremiumReverted]
    }
}
