//! One-shot flash notices for the web interface
//!
//! After a submission the server redirects back to the capsule page. The outcome
//! travels across that redirect in a short-lived cookie holding a fixed code, which
//! the next page render reads and clears.

use timecapsule::SubmissionOutcome;
use tower_cookies::{Cookie, Cookies};

use crate::templates::{Notice, NoticeKind};

/// Cookie carrying the pending flash code
pub const FLASH_COOKIE: &str = "capsule_flash";

/// Outcomes that are reported across a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Sealed,
    CapsuleFull,
}

impl Flash {
    /// Flash for a redirected outcome, `None` for outcomes rendered in place.
    pub fn from_outcome(outcome: &SubmissionOutcome) -> Option<Self> {
        match outcome {
            SubmissionOutcome::Success => Some(Flash::Sealed),
            SubmissionOutcome::CapacityReached => Some(Flash::CapsuleFull),
            SubmissionOutcome::ValidationFailed { .. } => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Flash::Sealed => "sealed",
            Flash::CapsuleFull => "full",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "sealed" => Some(Flash::Sealed),
            "full" => Some(Flash::CapsuleFull),
            _ => None,
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            Flash::Sealed => Notice::new(
                NoticeKind::Success,
                SubmissionOutcome::Success.user_message(),
            ),
            Flash::CapsuleFull => Notice::new(
                NoticeKind::Warning,
                SubmissionOutcome::CapacityReached.user_message(),
            ),
        }
    }
}

/// Queue `flash` for the next page render
pub fn set_flash(cookies: &Cookies, flash: Flash) {
    let mut cookie = Cookie::new(FLASH_COOKIE, flash.code());
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookies.add(cookie);
}

/// Read and clear the pending flash, if any
pub fn take_flash(cookies: &Cookies) -> Option<Flash> {
    let cookie = cookies.get(FLASH_COOKIE)?;
    let flash = Flash::from_code(cookie.value());

    let mut removal = Cookie::from(FLASH_COOKIE);
    removal.set_path("/");
    cookies.remove(removal);

    flash
}
