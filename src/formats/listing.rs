//! Console views of the roster

use std::fmt::{self, Display, Formatter};

use crate::domain::{Member, PREMIUM_CHARGE};

use super::{records::DATE_FORMAT, report::status};

/// One line per member: id, name, kind, plan or trainer, status, attendance and loyalty points
pub fn render_summary(members: &[Member]) -> String {
    Summary(members).to_string()
}

/// Every field of every member, including balances for premium members
pub fn render_details(members: &[Member]) -> String {
    Details(members).to_string()
}

struct Summary<'a>(&'a [Member]);

impl Display for Summary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<8} {:<20} {:<8} {:<20} {:<8} {:>10} {:>8}",
            "ID", "Name", "Type", "Plan/Trainer", "Status", "Attendance", "Loyalty"
        )?;
        for member in self.0 {
            let plan_or_trainer = match member {
                Member::Regular(regular) => regular.plan().to_string(),
                Member::Premium(premium) => premium.personal_trainer().to_string(),
            };
            writeln!(
                f,
                "{:<8} {:<20} {:<8} {:<20} {:<8} {:>10} {:>8}",
                member.id(),
                member.name(),
                member.kind().to_string(),
                plan_or_trainer,
                status(member),
                member.activity().attendance_count(),
                member.activity().loyalty_points(),
            )?;
        }
        Ok(())
    }
}

struct Details<'a>(&'a [Member]);

impl Display for Details<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("=== ALL GYM MEMBERS ===\n\n")?;
        for member in self.0 {
            write_details(f, member)?;
            f.write_str("\n-----------------------------------------\n\n")?;
        }
        Ok(())
    }
}

fn write_details(out: &mut Formatter<'_>, member: &Member) -> fmt::Result {
    let profile = member.profile();
    let activity = member.activity();
    writeln!(out, "ID: {}", profile.id)?;
    writeln!(out, "Name: {}", profile.name)?;
    writeln!(out, "Phone: {}", profile.phone_number)?;
    writeln!(out, "Email: {}", profile.email)?;
    writeln!(out, "Gender: {}", profile.gender)?;
    writeln!(out, "Date of Birth: {}", profile.date_of_birth.format(DATE_FORMAT))?;
    writeln!(
        out,
        "Membership Start Date: {}",
        profile.membership_start_date.format(DATE_FORMAT)
    )?;
    writeln!(out, "Attendance Count: {}", activity.attendance_count())?;
    writeln!(out, "Loyalty Points: {}", activity.loyalty_points())?;
    writeln!(out, "Active Status: {}", status(member))?;
    writeln!(out, "Member Type: {}", member.kind())?;

    match member {
        Member::Regular(regular) => {
            writeln!(out, "Membership Plan: {}", regular.plan())?;
            writeln!(out, "Price: {:.2}", regular.price())?;
            writeln!(out, "Referral Source: {}", regular.referral_source())?;
            writeln!(
                out,
                "Eligible for Upgrade: {}",
                yes_no(regular.is_eligible_for_upgrade())
            )?;
            if !regular.removal_reason().is_empty() {
                writeln!(out, "Removal Reason: {}", regular.removal_reason())?;
            }
        }
        Member::Premium(premium) => {
            writeln!(out, "Premium Charge: {PREMIUM_CHARGE:.2}")?;
            writeln!(out, "Personal Trainer: {}", premium.personal_trainer())?;
            writeln!(
                out,
                "Payment Status: {}",
                if premium.is_payment_complete() {
                    "Complete"
                } else {
                    "Incomplete"
                }
            )?;
            writeln!(out, "Paid Amount: {:.2}", premium.paid_amount())?;
            writeln!(out, "Remaining Amount: {:.2}", premium.remaining_amount())?;
            if premium.discount_amount() > 0.0 {
                writeln!(out, "Discount Amount: {:.2}", premium.discount_amount())?;
                writeln!(
                    out,
                    "Final Amount After Discount: {:.2}",
                    PREMIUM_CHARGE - premium.discount_amount()
                )?;
            }
        }
    }
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{premium, regular};
    use speculoos::prelude::*;

    #[test]
    fn test_summary() {
        let members = vec![Member::from(regular("1", "Standard")), Member::from(premium("2"))];

        let summary = render_summary(&members);
        let lines: Vec<_> = summary.lines().collect();

        assert_that!(lines).has_length(3);
        assert_that!(lines[1]).starts_with("1        Ann");
        assert_that!(lines[1]).contains("Standard");
        assert_that!(lines[2]).contains("Premium");
        assert_that!(lines[2]).contains("Sam");
    }

    #[test]
    fn test_empty_roster_views() {
        assert_that!(render_summary(&[]).lines().count()).is_equal_to(1);
        assert_that!(render_details(&[])).is_equal_to("=== ALL GYM MEMBERS ===\n\n".to_string());
    }

    #[test]
    fn test_details_separates_members() {
        let members = vec![Member::from(regular("1", "Basic")), Member::from(premium("2"))];

        let details = render_details(&members);

        assert_that!(details.matches("-----------------------------------------\n").count())
            .is_equal_to(2);
        assert_that!(details).contains("Member Type: Regular\n");
        assert_that!(details).contains("Member Type: Premium\n");
    }

    #[test]
    fn test_details_regular_removal_reason() {
        let mut member = regular("1", "Basic");
        member.revert("Moved away");

        let details = render_details(&[Member::from(member)]);

        assert_that!(details).starts_with("=== ALL GYM MEMBERS ===");
        assert_that!(details).contains("Price: 6500.00\n");
        assert_that!(details).contains("Eligible for Upgrade: No\n");
        assert_that!(details).contains("Removal Reason: Moved away\n");
    }

    #[test]
    fn test_details_premium_discount() {
        let mut member = premium("2");
        member.pay_due_amount(50_000.0).unwrap();
        member.calculate_discount();

        let details = render_details(&[Member::from(member)]);

        assert_that!(details).contains("Payment Status: Complete\n");
        assert_that!(details).contains("Remaining Amount: 0.00\n");
        assert_that!(details).contains("Final Amount After Discount: 45000.00\n");
    }

    #[test]
    fn test_details_premium_without_discount() {
        let details = render_details(&[Member::from(premium("2"))]);

        assert_that!(details).contains("Remaining Amount: 50000.00\n");
        assert_that!(details.contains("Discount Amount")).is_false();
    }
}
