//! Customer resolution by phone number.

use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::customer::{Customer, NewCustomer};
use crate::error::{Error, Result};
use crate::store::CustomerStore;

/// Finds the customer owning a phone number, creating one on first sight.
///
/// The first record written for a phone number wins: later bookings with
/// different names or email reuse it unchanged.
#[derive(Debug)]
pub struct CustomerResolver<'a, S: CustomerStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: CustomerStore + ?Sized> CustomerResolver<'a, S> {
    /// Creates a resolver over `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Returns the existing customer for `contact.phone`, or creates one
    /// stamped with `at`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CustomerLookupFailed`] wrapping any storage failure.
    pub fn resolve(
        &self,
        conn: &Connection,
        contact: &NewCustomer,
        at: NaiveDateTime,
    ) -> Result<Customer> {
        let lookup_failed = |source: Error| Error::CustomerLookupFailed {
            phone: contact.phone.clone(),
            source: Box::new(source),
        };

        if let Some(existing) = self
            .store
            .find_by_phone(conn, &contact.phone)
            .map_err(lookup_failed)?
        {
            log::debug!("resolved existing customer {} by phone", existing.id);
            return Ok(existing);
        }

        self.store
            .create_customer(conn, contact, at)
            .map_err(lookup_failed)
    }
}
