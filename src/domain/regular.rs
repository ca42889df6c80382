use std::{fmt, str::FromStr};

use super::{Activity, DomainError, MemberEvent, Profile};

/// Visits after which a regular member becomes eligible for an upgrade
pub const ATTENDANCE_LIMIT: u32 = 30;
/// Loyalty points earned per visit
pub const REGULAR_VISIT_POINTS: u32 = 5;

/// Membership plan of a regular member, ordered from lowest to highest tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Plan {
    Basic,
    Standard,
    Deluxe,
}

impl Plan {
    pub fn price(&self) -> f64 {
        match self {
            Plan::Basic => 6500.0,
            Plan::Standard => 12500.0,
            Plan::Deluxe => 18500.0,
        }
    }

    /// Parse a plan name, falling back to [`Plan::Basic`] for anything unrecognised
    pub fn parse_or_basic(name: &str) -> Self {
        name.parse().unwrap_or(Plan::Basic)
    }
}

impl FromStr for Plan {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Plan::Basic),
            "standard" => Ok(Plan::Standard),
            "deluxe" => Ok(Plan::Deluxe),
            _ => Err(DomainError::UnknownPlan(s.to_string())),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Basic => f.write_str("Basic"),
            Plan::Standard => f.write_str("Standard"),
            Plan::Deluxe => f.write_str("Deluxe"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegularMember {
    profile: Profile,
    activity: Activity,
    plan: Plan,
    referral_source: String,
    /// Set once attendance reaches [`ATTENDANCE_LIMIT`], never cleared by attendance
    eligible_for_upgrade: bool,
    /// Empty until the member is reverted
    removal_reason: String,
}

impl RegularMember {
    /// Register a new regular member
    ///
    /// An unrecognised `plan` silently becomes [`Plan::Basic`].
    pub fn new(profile: Profile, plan: &str, referral_source: impl Into<String>) -> Self {
        Self {
            profile,
            activity: Activity::default(),
            plan: Plan::parse_or_basic(plan),
            referral_source: referral_source.into(),
            eligible_for_upgrade: false,
            removal_reason: String::new(),
        }
    }

    /// Rebuild a regular member loaded from a file
    pub fn restore(
        profile: Profile,
        activity: Activity,
        plan: Plan,
        referral_source: String,
        eligible_for_upgrade: bool,
        removal_reason: String,
    ) -> Self {
        Self {
            profile,
            activity,
            plan,
            referral_source,
            eligible_for_upgrade,
            removal_reason,
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

    pub fn plan(&self) -> Plan {
        self.plan
    }

    /// Price of the current plan
    pub fn price(&self) -> f64 {
        self.plan.price()
    }

    pub fn referral_source(&self) -> &str {
        &self.referral_source
    }

    pub fn is_eligible_for_upgrade(&self) -> bool {
        self.eligible_for_upgrade
    }

    pub fn removal_reason(&self) -> &str {
        &self.removal_reason
    }

    pub fn mark_attendance(&mut self) -> Result<Vec<MemberEvent>, DomainError> {
        let mut events = vec![self
            .activity
            .record_visit(&self.profile.id, REGULAR_VISIT_POINTS)?];

        if self.activity.attendance_count() >= ATTENDANCE_LIMIT && !self.eligible_for_upgrade {
            self.eligible_for_upgrade = true;
            events.push(MemberEvent::UpgradeEligible);
        }

        Ok(events)
    }

    /// Move to a strictly higher plan and re-derive the price
    pub fn upgrade_plan(&mut self, requested: Plan) -> Result<MemberEvent, DomainError> {
        if requested <= self.plan {
            return Err(DomainError::InvalidUpgrade {
                current: self.plan,
                requested,
            });
        }

        let from = self.plan;
        self.plan = requested;
        Ok(MemberEvent::PlanUpgraded {
            from,
            to: requested,
            price: self.price(),
        })
    }

    pub fn revert(&mut self, reason: impl Into<String>) -> Vec<MemberEvent> {
        self.removal_reason = reason.into();
        let reset = self.activity.reset();
        vec![
            reset,
            MemberEvent::RegularReverted {
                reason: self.removal_reason.clone(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{profile, regular};
    use rstest::*;
    use speculoos::prelude::*;

    #[rstest]
    #[case("Basic", Plan::Basic, 6500.0)]
    #[case("standard", Plan::Standard, 12500.0)]
    #[case("DELUXE", Plan::Deluxe, 18500.0)]
    #[case("Platinum", Plan::Basic, 6500.0)]
    #[case("", Plan::Basic, 6500.0)]
    fn test_new_price_from_plan(#[case] name: &str, #[case] plan: Plan, #[case] price: f64) {
        let member = RegularMember::new(profile("1"), name, "Friend");

        assert_that!(member.plan()).is_equal_to(plan);
        assert_that!(member.price()).is_equal_to(price);
        assert_that!(member.is_eligible_for_upgrade()).is_false();
        assert_that!(member.removal_reason()).is_equal_to("");
    }

    #[rstest]
    #[case(29, false)]
    #[case(30, true)]
    fn test_upgrade_eligibility(#[case] visits: usize, #[case] eligible: bool) {
        // GIVEN an active regular member
        let mut member = regular("1", "Basic");
        member.activity_mut().activate();

        // WHEN attending a number of times
        for _ in 0..visits {
            assert_that!(member.mark_attendance()).is_ok();
        }

        // THEN eligibility follows the attendance limit
        assert_that!(member.is_eligible_for_upgrade()).is_equal_to(eligible);
        assert_that!(member.activity().loyalty_points()).is_equal_to(visits as u32 * 5);
    }

    #[test]
    fn test_upgrade_eligibility_is_sticky() {
        let mut member = regular("1", "Basic");
        member.activity_mut().activate();
        for _ in 0..ATTENDANCE_LIMIT {
            member.mark_attendance().unwrap();
        }

        // Only the visit that crosses the limit reports it
        let events = member.mark_attendance().unwrap();
        assert_that!(events).has_length(1);

        member.activity_mut().deactivate();
        assert_that!(member.is_eligible_for_upgrade()).is_true();
    }

    #[rstest]
    #[case(Plan::Basic, Plan::Standard)]
    #[case(Plan::Basic, Plan::Deluxe)]
    #[case(Plan::Standard, Plan::Deluxe)]
    fn test_upgrade_plan_allowed(#[case] current: Plan, #[case] requested: Plan) {
        let mut member = regular("1", &current.to_string());

        let res = member.upgrade_plan(requested);

        assert_that!(res).is_ok().is_equal_to(MemberEvent::PlanUpgraded {
            from: current,
            to: requested,
            price: requested.price(),
        });
        assert_that!(member.plan()).is_equal_to(requested);
        assert_that!(member.price()).is_equal_to(requested.price());
    }

    #[rstest]
    #[case(Plan::Deluxe, Plan::Basic)]
    #[case(Plan::Deluxe, Plan::Standard)]
    #[case(Plan::Deluxe, Plan::Deluxe)]
    #[case(Plan::Standard, Plan::Basic)]
    #[case(Plan::Basic, Plan::Basic)]
    fn test_upgrade_plan_rejected(#[case] current: Plan, #[case] requested: Plan) {
        let mut member = regular("1", &current.to_string());

        let res = member.upgrade_plan(requested);

        assert_that!(res)
            .is_err()
            .is_equal_to(DomainError::InvalidUpgrade { current, requested });
        assert_that!(member.plan()).is_equal_to(current);
        assert_that!(member.price()).is_equal_to(current.price());
    }

    #[test]
    fn test_revert() {
        let mut member = regular("1", "Standard");
        member.activity_mut().activate();
        member.mark_attendance().unwrap();

        let events = member.revert("Moved away");

        assert_that!(events).is_equal_to(vec![
            MemberEvent::Reset,
            MemberEvent::RegularReverted {
                reason: "Moved away".to_string(),
            },
        ]);
        assert_that!(member.removal_reason()).is_equal_to("Moved away");
        assert_that!(member.activity()).is_equal_to(&Activity::default());
        assert_that!(member.plan()).is_equal_to(Plan::Standard);
    }

    #[test]
    fn test_plan_from_str_unknown() {
        let res = "Gold".parse::<Plan>();

        assert_that!(res)
            .is_err()
            .is_equal_to(DomainError::UnknownPlan("Gold".to_string()));
    }

    #[test]
    fn test_scenario_register_upgrade_attend() {
        // GIVEN a regular member on the Basic plan
        let mut member = regular("1", "Basic");
        assert_that!(member.price()).is_equal_to(6500.0);

        // WHEN upgrading to Standard and attending 30 times while active
        member.upgrade_plan(Plan::Standard).unwrap();
        assert_that!(member.price()).is_equal_to(12500.0);
        member.activity_mut().activate();
        for _ in 0..30 {
            member.mark_attendance().unwrap();
        }

        // THEN the member is eligible for an upgrade
        assert_that!(member.is_eligible_for_upgrade()).is_true();
    }
}
