//! Registration form validation
//!
//! Field rules for new-attendee registration. The contact-number
//! requirement is deployment-dependent and controlled by
//! [`ContactNumberPolicy`](crate::config::ContactNumberPolicy); the format
//! itself (Philippine mobile, `+639xxxxxxxxx`) is fixed.

use crate::config::ContactNumberPolicy;
use crate::db::models::AttendeeRegistration;
use crate::{Error, Result};

/// Display form of the expected contact number format
pub const CONTACT_NUMBER_FORMAT: &str = "+639xxxxxxxxx";
/// Example shown in validation messages
pub const CONTACT_NUMBER_EXAMPLE: &str = "+639123456789";

/// Check contact number format: `+639` followed by exactly nine digits.
pub fn is_valid_contact_number(contact: &str) -> bool {
    let Some(rest) = contact.strip_prefix("+639") else {
        return false;
    };
    rest.len() == 9 && rest.chars().all(|c| c.is_ascii_digit())
}

/// Check basic mailbox shape: local `@` domain, domain containing a dot,
/// no whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let Some(domain) = parts.next() else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Domain needs a dot with something on both sides
    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn require(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(message.to_string()));
    }
    Ok(())
}

/// Validate a complete registration form.
///
/// Checks run in a fixed order and the first failure wins, so validation
/// messages are stable for the UI.
pub fn validate_registration(
    data: &AttendeeRegistration,
    policy: ContactNumberPolicy,
) -> Result<()> {
    require(&data.first_name, "First name is required.")?;
    require(&data.last_name, "Last name is required.")?;

    let contact = data.contact_number.as_deref().unwrap_or("").trim();
    let contact_required = match policy {
        ContactNumberPolicy::RequiredStrict => true,
        ContactNumberPolicy::Optional => data.has_mobile_number,
    };
    if contact_required && contact.is_empty() {
        return Err(Error::InvalidArgument("Contact number is required.".to_string()));
    }
    if !contact.is_empty() && !is_valid_contact_number(contact) {
        return Err(Error::InvalidArgument(format!(
            "Contact number must be in format {CONTACT_NUMBER_FORMAT} (e.g., {CONTACT_NUMBER_EXAMPLE})"
        )));
    }

    require(&data.school_name, "School name is required.")?;
    require(&data.barangay, "Barangay is required.")?;
    require(&data.city, "City is required.")?;

    if let Some(email) = data.email.as_deref() {
        if !email.trim().is_empty() && !is_valid_email(email.trim()) {
            return Err(Error::InvalidArgument(
                "Please enter a valid email address.".to_string(),
            ));
        }
    }

    if data.is_dgroup_member
        && data.dgroup_leader_name.as_deref().unwrap_or("").trim().is_empty()
    {
        return Err(Error::InvalidArgument(
            "Dgroup leader name is required for dgroup members.".to_string(),
        ));
    }

    Ok(())
}
