//! Newsletter subscribers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{SubscriberId, Timestamp, ValidationError};

/// A syntactically valid, normalized (trimmed, lowercased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let email = raw.trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        let invalid = || ValidationError::invalid_format("email", "Invalid email address");

        let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
        let well_formed = !local.is_empty()
            && !domain.contains('@')
            && !email.chars().any(char::is_whitespace)
            && domain
                .rsplit_once('.')
                .map_or(false, |(host, tld)| !host.is_empty() && !tld.is_empty())
            && !domain.starts_with('.')
            && !domain.contains("..");

        if well_formed {
            Ok(Self(email))
        } else {
            Err(invalid())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSubscriber {
    pub id: SubscriberId,
    pub email: EmailAddress,
    pub created_at: Timestamp,
}

impl NewsletterSubscriber {
    pub fn new(email: EmailAddress, now: Timestamp) -> Self {
        Self {
            id: SubscriberId::new(),
            email,
            created_at: now,
        }
    }
}
