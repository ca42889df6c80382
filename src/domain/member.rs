use chrono::NaiveDate;

use super::{DomainError, MemberEvent};

/// Identity and contact details shared by every member
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    /// Caller-supplied identifier, unique across the roster
    ///
    /// Numeric-looking, but kept as text.
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub membership_start_date: NaiveDate,
}

/// Attendance, loyalty and activation state shared by every member
///
/// The counters only go down through [`Activity::reset`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Activity {
    attendance_count: u32,
    loyalty_points: u32,
    active: bool,
}

impl Activity {
    /// Rebuild the state of a member loaded from a file
    pub fn restore(attendance_count: u32, loyalty_points: u32, active: bool) -> Self {
        Self {
            attendance_count,
            loyalty_points,
            active,
        }
    }

    pub fn attendance_count(&self) -> u32 {
        self.attendance_count
    }

    pub fn loyalty_points(&self) -> u32 {
        self.loyalty_points
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) -> MemberEvent {
        self.active = true;
        MemberEvent::Activated
    }

    pub fn deactivate(&mut self) -> MemberEvent {
        if self.active {
            self.active = false;
            MemberEvent::Deactivated
        } else {
            MemberEvent::AlreadyInactive
        }
    }

    pub fn reset(&mut self) -> MemberEvent {
        self.attendance_count = 0;
        self.loyalty_points = 0;
        self.active = false;
        MemberEvent::Reset
    }

    /// Count one visit worth `points` loyalty points
    pub(super) fn record_visit(
        &mut self,
        member_id: &str,
        points: u32,
    ) -> Result<MemberEvent, DomainError> {
        if !self.active {
            return Err(DomainError::Inactive(member_id.to_string()));
        }

        self.attendance_count = self.attendance_count.saturating_add(1);
        self.loyalty_points = self.loyalty_points.saturating_add(points);

        Ok(MemberEvent::AttendanceMarked {
            attendance_count: self.attendance_count,
            loyalty_points: self.loyalty_points,
        })
    }
}
