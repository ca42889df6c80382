//! Comma-separated member records
//!
//! One member per line, tagged `REGULAR` or `PREMIUM`:
//!
//! ```text
//! REGULAR,id,name,phone,email,gender,dob,start,attendance,loyalty,active,plan,price,referral,eligible[,removal_reason]
//! PREMIUM,id,name,phone,email,gender,dob,start,attendance,loyalty,active,trainer,payment_complete,paid,discount
//! ```
//!
//! There is no quoting, so a comma inside a field shifts every later field.

use std::num::{ParseFloatError, ParseIntError};

use chrono::NaiveDate;

use crate::domain::{Activity, Member, Plan, PremiumMember, Profile, RegularMember};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Length of a date written with [`DATE_FORMAT`]
const DATE_LEN: usize = 10;
pub const REGULAR_TAG: &str = "REGULAR";
pub const PREMIUM_TAG: &str = "PREMIUM";
/// Fields a line needs, tag included, before it is considered a record
pub const MIN_FIELDS: usize = 15;

/// A well-tagged line with a field that does not parse
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Not a `YYYY-MM-DD` date, `source` is unset when only the shape is wrong
    #[error("line {line}: invalid date {value:?}, expected YYYY-MM-DD")]
    Date {
        line: usize,
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("line {line}: invalid integer {value:?}: {source}")]
    Integer {
        line: usize,
        value: String,
        source: ParseIntError,
    },

    /// Not a finite, non-negative decimal
    #[error("line {line}: invalid amount {value:?}")]
    Amount {
        line: usize,
        value: String,
        #[source]
        source: Option<ParseFloatError>,
    },
}

/// Parse every record in `text`
///
/// Lines with another tag or too few fields are skipped. The first field that fails to parse
/// aborts the whole batch.
pub fn parse_records(text: &str) -> Result<Vec<Member>, ParseError> {
    let mut members = Vec::new();
    for (index, line) in text.lines().enumerate() {
        match parse_line(index + 1, line)? {
            Some(member) => members.push(member),
            None => tracing::debug!(line = index + 1, "skipping line without a member record"),
        }
    }
    Ok(members)
}

/// Parse a single line, `line` being its 1-based number for error reporting
pub fn parse_line(line: usize, text: &str) -> Result<Option<Member>, ParseError> {
    let fields = split_fields(text);
    if fields.len() < MIN_FIELDS {
        return Ok(None);
    }

    let fields = Fields { line, fields };
    let member = match fields.text(0) {
        REGULAR_TAG => Member::Regular(RegularMember::restore(
            fields.profile()?,
            fields.activity()?,
            Plan::parse_or_basic(fields.text(11)),
            fields.text(13).to_string(),
            fields.flag(14),
            fields.fields.get(15).copied().unwrap_or_default().to_string(),
        )),
        PREMIUM_TAG => Member::Premium(PremiumMember::restore(
            fields.profile()?,
            fields.activity()?,
            fields.text(11).to_string(),
            fields.flag(12),
            fields.amount(13)?,
            fields.amount(14)?,
        )),
        _ => return Ok(None),
    };

    Ok(Some(member))
}

/// Render a member as a single record line, without the line terminator
pub fn to_record_line(member: &Member) -> String {
    let profile = member.profile();
    let activity = member.activity();
    let common = format!(
        "{},{},{},{},{},{},{},{},{},{}",
        profile.id,
        profile.name,
        profile.phone_number,
        profile.email,
        profile.gender,
        profile.date_of_birth.format(DATE_FORMAT),
        profile.membership_start_date.format(DATE_FORMAT),
        activity.attendance_count(),
        activity.loyalty_points(),
        activity.is_active(),
    );

    match member {
        Member::Regular(regular) => format!(
            "{REGULAR_TAG},{common},{},{:?},{},{},{}",
            regular.plan(),
            regular.price(),
            regular.referral_source(),
            regular.is_eligible_for_upgrade(),
            regular.removal_reason(),
        ),
        Member::Premium(premium) => format!(
            "{PREMIUM_TAG},{common},{},{},{:?},{:?}",
            premium.personal_trainer(),
            premium.is_payment_complete(),
            premium.paid_amount(),
            premium.discount_amount(),
        ),
    }
}

/// Render the whole roster, one record per line
pub fn to_records(members: &[Member]) -> String {
    members
        .iter()
        .map(|member| to_record_line(member) + "\n")
        .collect()
}

/// Split on commas, dropping trailing empty fields
///
/// A regular member without a removal reason ends with a bare comma, which must not count as a
/// field.
fn split_fields(text: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = text.split(',').collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields
}

struct Fields<'a> {
    line: usize,
    fields: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn text(&self, index: usize) -> &'a str {
        self.fields[index]
    }

    /// Anything other than a case-insensitive `true` reads as false
    fn flag(&self, index: usize) -> bool {
        self.text(index).eq_ignore_ascii_case("true")
    }

    fn date(&self, index: usize) -> Result<NaiveDate, ParseError> {
        let value = self.text(index);
        let error = |source| ParseError::Date {
            line: self.line,
            value: value.to_string(),
            source,
        };
        // chrono accepts unpadded months and days, the format does not
        if value.len() != DATE_LEN {
            return Err(error(None));
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| error(Some(source)))
    }

    fn count(&self, index: usize) -> Result<u32, ParseError> {
        let value = self.text(index);
        value.parse().map_err(|source| ParseError::Integer {
            line: self.line,
            value: value.to_string(),
            source,
        })
    }

    fn amount(&self, index: usize) -> Result<f64, ParseError> {
        let value = self.text(index);
        let error = |source| ParseError::Amount {
            line: self.line,
            value: value.to_string(),
            source,
        };
        match value.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
            Ok(_) => Err(error(None)),
            Err(source) => Err(error(Some(source))),
        }
    }

    fn profile(&self) -> Result<Profile, ParseError> {
        Ok(Profile {
            id: self.text(1).to_string(),
            name: self.text(2).to_string(),
            phone_number: self.text(3).to_string(),
            email: self.text(4).to_string(),
            gender: self.text(5).to_string(),
            date_of_birth: self.date(6)?,
            membership_start_date: self.date(7)?,
        })
    }

    fn activity(&self) -> Result<Activity, ParseError> {
        Ok(Activity::restore(
            self.count(8)?,
            self.count(9)?,
            self.flag(10),
        ))
    }
}
