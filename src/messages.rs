//! Role-flavored banner wording shared by every portal page.
//!
//! Pure string builders; rendering is the caller's concern. The patient
//! variants interpolate the session display name when one is known.

use crate::Role;

/// Failure banner shown after a terminal request failure.
pub fn error_banner(role: Role, name: Option<&str>, feature: &str) -> String {
    match role {
        Role::Admin => format!(
            "Sorry, Admin, we couldn’t process your {feature} request. \
             Please try again or contact support."
        ),
        Role::Doctor => format!(
            "Oops, Doctor, we encountered an issue with your {feature}. \
             Please try again later or reach out to support."
        ),
        Role::Patient => {
            let name = name.unwrap_or("Patient");
            format!(
                "Sorry, {name}, we couldn’t complete your {feature} request. \
                 Please try again or contact our support team."
            )
        }
    }
}

/// Success banner shown after a completed request.
pub fn success_banner(role: Role, name: Option<&str>, feature: &str) -> String {
    match role {
        Role::Admin => {
            format!("Thank you, Admin! Your action on {feature} has been completed successfully.")
        }
        Role::Doctor => format!("Great job, Doctor! Your update to {feature} was successful."),
        Role::Patient => {
            let name = name.unwrap_or("Patient");
            format!("Thank you, {name}! Your {feature} has been updated successfully.")
        }
    }
}
