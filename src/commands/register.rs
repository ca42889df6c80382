use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{Member, PremiumMember, Profile, RegularMember},
    ports::{roster::RosterPort, storage::StoragePort},
};
use chrono::NaiveDate;
use tower::Service;

use super::{DomainLogic, Error};

#[derive(Clone, Debug)]
pub struct RegisterMemberRequest {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    /// Local part only, the configured domain is appended
    pub email: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub membership_start_date: NaiveDate,
    pub details: MembershipDetails,
}

#[derive(Clone, Debug)]
pub enum MembershipDetails {
    Regular {
        /// Plan name, an unknown name registers the member on the Basic plan
        plan: String,
        referral_source: String,
    },
    Premium {
        personal_trainer: String,
    },
}

#[derive(Debug, PartialEq)]
pub struct RegisterMemberResponse {
    pub member: Member,
}

impl RegisterMemberRequest {
    /// Check the request, collecting every problem instead of stopping at the first one
    fn validate(&self) -> Result<(), Error> {
        let mut errors = Vec::new();

        let id = self.id.trim();
        if id.is_empty() {
            errors.push("member id is required".to_string());
        } else if id.parse::<i32>().is_err() {
            errors.push("member id must be a valid number".to_string());
        }

        if self.name.trim().is_empty() {
            errors.push("name is required".to_string());
        }

        let phone = self.phone_number.trim();
        if phone.is_empty() {
            errors.push("phone number is required".to_string());
        } else if !phone.chars().all(|c| c.is_ascii_digit()) || phone.parse::<i64>().is_err() {
            errors.push("phone number must contain only numbers".to_string());
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push("email is required".to_string());
        } else if email.contains('@') {
            errors.push("email must not contain @, the domain is added automatically".to_string());
        }

        match &self.details {
            MembershipDetails::Regular {
                referral_source, ..
            } if referral_source.trim().is_empty() => {
                errors.push("referral source is required for regular members".to_string());
            }
            MembershipDetails::Premium { personal_trainer }
                if personal_trainer.trim().is_empty() =>
            {
                errors.push("personal trainer is required for premium members".to_string());
            }
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }

    fn into_member(self, email_domain: &str) -> Member {
        let profile = Profile {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            email: format!("{}@{}", self.email.trim().to_lowercase(), email_domain),
            gender: self.gender.trim().to_string(),
            date_of_birth: self.date_of_birth,
            membership_start_date: self.membership_start_date,
        };

        match self.details {
            MembershipDetails::Regular {
                plan,
                referral_source,
            } => RegularMember::new(profile, &plan, referral_source.trim()).into(),
            MembershipDetails::Premium { personal_trainer } => {
                PremiumMember::new(profile, personal_trainer.trim()).into()
            }
        }
    }
}

impl<R, S> Service<RegisterMemberRequest> for DomainLogic<R, S>
where
    R: RosterPort + 'static,
    S: StoragePort + 'static,
{
    type Response = RegisterMemberResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: RegisterMemberRequest) -> Self::Future {
        let roster = self.roster.clone();
        let email_domain = self.email_domain.clone();
        Box::pin(async move {
            req.validate()?;
            let member = req.into_member(&email_domain);

            // The roster rejects ids that are already taken
            roster.add(member.clone()).await?;
            tracing::info!(
                member_id = member.id(),
                kind = %member.kind(),
                email = %member.profile().email,
                "member registered"
            );

            Ok(RegisterMemberResponse { member })
        })
    }
}
