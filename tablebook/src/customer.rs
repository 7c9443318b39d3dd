//! Customer records and contact-detail validation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// Honorific a customer may be addressed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerTitle {
    /// Mr
    Mr,
    /// Mrs
    Mrs,
    /// Ms
    Ms,
    /// Dr
    Dr,
    /// Prof
    Prof,
}

impl CustomerTitle {
    /// Every accepted title.
    pub const ALL: [Self; 5] = [Self::Mr, Self::Mrs, Self::Ms, Self::Dr, Self::Prof];

    /// Returns the title as written on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mr => "Mr",
            Self::Mrs => "Mrs",
            Self::Ms => "Ms",
            Self::Dr => "Dr",
            Self::Prof => "Prof",
        }
    }
}

impl fmt::Display for CustomerTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerTitle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|title| title.as_str() == s)
            .ok_or_else(|| {
                ValidationError::new("title", format!("must be one of Mr, Mrs, Ms, Dr, Prof; got '{s}'"))
            })
    }
}

/// A stored customer.
///
/// Created the first time an unknown phone number books, then reused
/// unchanged for every later booking with that number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Storage id.
    pub id: i64,
    /// Optional honorific.
    pub title: Option<CustomerTitle>,
    /// Given name.
    pub first_name: String,
    /// Family name; may be empty.
    pub last_name: String,
    /// Phone number, unique across customers.
    pub phone: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Last-modified timestamp.
    pub updated_at: NaiveDateTime,
}

impl Customer {
    /// Returns the name as it would be printed on a booking sheet.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        match self.title {
            Some(title) => format!("{title} {name}"),
            None => name.to_string(),
        }
    }
}

/// Raw contact block from a booking request.
///
/// Nothing is checked until [`ContactDetails::validate`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    /// Honorific; empty means none.
    #[serde(default)]
    pub title: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Email; empty means none.
    #[serde(default)]
    pub email: String,
}

impl ContactDetails {
    /// Validates the contact block and normalizes it for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The title is set but is not one of the five honorifics
    /// - The first name is shorter than two characters after trimming
    /// - The phone number is empty after trimming
    /// - The email is set but malformed
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::ContactDetails;
    ///
    /// let contact = ContactDetails {
    ///     title: "Dr".into(),
    ///     first_name: "Ada".into(),
    ///     last_name: "Lovelace".into(),
    ///     phone: "555-0100".into(),
    ///     email: "ada@example.com".into(),
    /// };
    /// let customer = contact.validate().unwrap();
    /// assert_eq!(customer.phone, "555-0100");
    ///
    /// let bad = ContactDetails { first_name: "A".into(), ..contact };
    /// assert!(bad.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<NewCustomer, ValidationError> {
        let title = match self.title.trim() {
            "" => None,
            raw => Some(raw.parse::<CustomerTitle>()?),
        };

        let first_name = self.first_name.trim();
        if first_name.chars().count() < 2 {
            return Err(ValidationError::new(
                "first_name",
                "must be at least 2 characters",
            ));
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(ValidationError::new("phone", "is required"));
        }

        let email = match self.email.trim() {
            "" => None,
            raw if is_valid_email(raw) => Some(raw.to_string()),
            raw => {
                return Err(ValidationError::new(
                    "email",
                    format!("'{raw}' is not a valid email address"),
                ))
            }
        };

        Ok(NewCustomer {
            title,
            first_name: first_name.to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: phone.to_string(),
            email,
        })
    }
}

/// Insert payload for a new customer, produced by [`ContactDetails::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    /// Optional honorific.
    pub title: Option<CustomerTitle>,
    /// Given name, trimmed.
    pub first_name: String,
    /// Family name, trimmed.
    pub last_name: String,
    /// Phone number, trimmed.
    pub phone: String,
    /// Optional email.
    pub email: Option<String>,
}

// One '@', non-empty local part, a dot inside the domain, no whitespace.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.find('.') {
        Some(dot) => dot > 0 && dot < domain.len() - 1 && !domain.ends_with('.'),
        None => false,
    }
}
