//! Application configuration loaded from environment variables.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Record file the roster is loaded from and saved to
    pub data_file: PathBuf,
    /// Where the bordered member report is exported
    pub report_file: PathBuf,
    /// Domain appended to the email local part at registration
    pub email_domain: String,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup, `from_env` uses the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let email_domain = lookup("FITCLUB_EMAIL_DOMAIN").unwrap_or_else(|| "gmail.com".to_string());
        let email_domain = email_domain.trim().to_lowercase();
        if email_domain.is_empty() || email_domain.contains('@') {
            return Err(Error::Invalid {
                key: "FITCLUB_EMAIL_DOMAIN",
                reason: format!("{email_domain:?} is not a domain name"),
            });
        }

        Ok(Config {
            data_file: lookup("FITCLUB_DATA_FILE")
                .unwrap_or_else(|| "members.dat".to_string())
                .into(),
            report_file: lookup("FITCLUB_REPORT_FILE")
                .unwrap_or_else(|| "members.txt".to_string())
                .into(),
            email_domain,
            log_filter: lookup("FITCLUB_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
