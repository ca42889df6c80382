//! Bordered fixed-width member report
//!
//! Meant for people reading the file. It is not parsed back in; see [`super::records`] for the
//! format the roster is loaded from.

use crate::domain::{Member, MemberKind};

use super::records::DATE_FORMAT;

const BORDER: &str = "+---------+--------------------+--------------------+---------------+-------------------------+------------+------------+--------+------------+---------------+----------+------------+--------------------+---------------+";
const HEADER: &str = "| ID      | Name               | Location/Type      | Phone         | Email                   | Start Date | Plan       | Gender | Attendance | Loyalty Points| Status   | DOB        | Trainer            | Paid Amount   |";

/// Render the report for every member, header and footer included
pub fn render(members: &[Member]) -> String {
    let mut out = String::new();
    for line in [BORDER, HEADER, BORDER] {
        out.push_str(line);
        out.push('\n');
    }
    for member in members {
        out.push_str(&row(member));
        out.push('\n');
    }
    out.push_str(BORDER);
    out.push('\n');
    out
}

fn row(member: &Member) -> String {
    let profile = member.profile();
    let activity = member.activity();
    let (kind, plan, trainer, paid) = match member {
        Member::Regular(regular) => {
            let plan = regular.plan().to_string();
            (plan.clone(), plan, "N/A".to_string(), "N/A".to_string())
        }
        Member::Premium(premium) => (
            MemberKind::Premium.to_string(),
            MemberKind::Premium.to_string(),
            premium.personal_trainer().to_string(),
            format!("{:.2}", premium.paid_amount()),
        ),
    };

    format!(
        "| {:<7} | {:<18} | {:<18} | {:<13} | {:<23} | {:<10} | {:<10} | {:<6} | {:<10} | {:<13} | {:<8} | {:<10} | {:<18} | {:<13} |",
        profile.id,
        profile.name,
        kind,
        profile.phone_number,
        profile.email,
        profile.membership_start_date.format(DATE_FORMAT).to_string(),
        plan,
        profile.gender,
        activity.attendance_count(),
        activity.loyalty_points(),
        status(member),
        profile.date_of_birth.format(DATE_FORMAT).to_string(),
        trainer,
        paid,
    )
}

pub(crate) fn status(member: &Member) -> &'static str {
    if member.activity().is_active() {
        "Active"
    } else {
        "Inactive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{premium, regular};
    use speculoos::prelude::*;

    #[test]
    fn test_render_frames_rows() {
        let members = vec![Member::from(regular("1", "Deluxe")), Member::from(premium("2"))];

        let report = render(&members);
        let lines: Vec<_> = report.lines().collect();

        assert_that!(lines).has_length(6);
        assert_that!(lines[0]).is_equal_to(BORDER);
        assert_that!(lines[1]).is_equal_to(HEADER);
        assert_that!(lines[5]).is_equal_to(BORDER);
        // Every row lines up with the border
        for line in &lines[3..5] {
            assert_that!(line.len()).is_equal_to(BORDER.len());
        }
    }

    #[test]
    fn test_regular_row() {
        let line = row(&regular("1", "Deluxe").into());

        assert_that!(line).is_equal_to(
            "| 1       | Ann                | Deluxe             | 555           | ann@gmail.com           | 2024-01-01 | Deluxe     | Female | 0          | 0             | Inactive | 2000-01-01 | N/A                | N/A           |"
                .to_string(),
        );
    }

    #[test]
    fn test_premium_row() {
        let mut member = premium("2");
        member.pay_due_amount(1234.5).unwrap();

        let line = row(&member.into());

        assert_that!(line).is_equal_to(
            "| 2       | Ann                | Premium            | 555           | ann@gmail.com           | 2024-01-01 | Premium    | Female | 0          | 0             | Inactive | 2000-01-01 | Sam                | 1234.50       |"
                .to_string(),
        );
    }
}
