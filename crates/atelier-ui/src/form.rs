#![forbid(unsafe_code)]

//! Contact form: validation and a simulated single-shot submission.
//!
//! Validation collects every failing field at once so the whole problem
//! can be surfaced in one message. Submission is modeled as a pending
//! operation with a fixed delay, resolved exactly once by `tick`; a form
//! that fails validation never enters the submitting state.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\-\(\)\s\+]{8,15}$").expect("phone pattern"));

pub const MESSAGE_LIMIT: usize = 1000;
const SUBMIT_DELAY: Duration = Duration::from_millis(1500);

/// Form fields, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
    Email,
    Message,
}

/// One failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldIssue {
    pub field: Field,
    pub message: &'static str,
}

/// Submission lifecycle. Transitions Idle → Submitting → Succeeded, once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Idle,
    Submitting { completes_at: Instant },
    Succeeded,
}

/// The resolved outcome delivered by `tick`, at most once per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Confirmation message addressed to the sender.
    pub confirmation: String,
}

/// Contact form state.
#[derive(Debug)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
    state: Submission,
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            message: String::new(),
            state: Submission::Idle,
        }
    }

    pub fn state(&self) -> Submission {
        self.state
    }

    /// Validate every field, returning all issues at once.
    pub fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            issues.push(FieldIssue {
                field: Field::Name,
                message: "please enter your name",
            });
        } else if name.chars().count() < 2 {
            issues.push(FieldIssue {
                field: Field::Name,
                message: "name must be at least 2 characters",
            });
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            issues.push(FieldIssue {
                field: Field::Phone,
                message: "please enter your phone number",
            });
        } else if !PHONE_RE.is_match(phone) {
            issues.push(FieldIssue {
                field: Field::Phone,
                message: "please enter a valid phone number",
            });
        }

        let email = self.email.trim();
        if !email.is_empty() && !EMAIL_RE.is_match(email) {
            issues.push(FieldIssue {
                field: Field::Email,
                message: "please enter a valid email address",
            });
        }

        if self.message.chars().count() > MESSAGE_LIMIT {
            issues.push(FieldIssue {
                field: Field::Message,
                message: "message cannot exceed 1000 characters",
            });
        }

        issues
    }

    /// Start a submission. Validation failures keep the form idle.
    pub fn submit(&mut self, now: Instant) -> Result<(), Vec<FieldIssue>> {
        if matches!(self.state, Submission::Submitting { .. }) {
            tracing::debug!("submission already in flight; ignoring");
            return Ok(());
        }
        let issues = self.validate();
        if !issues.is_empty() {
            return Err(issues);
        }
        self.state = Submission::Submitting {
            completes_at: now + SUBMIT_DELAY,
        };
        Ok(())
    }

    /// Resolve a pending submission once its delay has elapsed. Returns
    /// the outcome exactly once; the form resets on success.
    pub fn tick(&mut self, now: Instant) -> Option<SubmitOutcome> {
        let Submission::Submitting { completes_at } = self.state else {
            return None;
        };
        if now < completes_at {
            return None;
        }
        let confirmation = format!(
            "Thank you for your booking, {}! We will contact you within 24 hours.",
            self.name.trim()
        );
        self.reset();
        self.state = Submission::Succeeded;
        Some(SubmitOutcome { confirmation })
    }

    fn reset(&mut self) {
        self.name.clear();
        self.phone.clear();
        self.email.clear();
        self.message.clear();
    }

    /// Characters still available for the message, saturating at zero.
    pub fn characters_left(&self) -> usize {
        MESSAGE_LIMIT.saturating_sub(self.message.chars().count())
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a phone number: strip non-digits, then group Taiwanese
/// mobile numbers as `09xx-xxx-xxx` and area-02 landlines as
/// `02-xxxx-xxxx`. Anything else is returned as bare digits.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.starts_with("09") && digits.len() >= 10 {
        let (head, rest) = digits.split_at(10);
        format!("{}-{}-{}{}", &head[0..4], &head[4..7], &head[7..10], rest)
    } else if digits.starts_with("02") && digits.len() >= 10 {
        let (head, rest) = digits.split_at(10);
        format!("{}-{}-{}{}", &head[0..2], &head[2..6], &head[6..10], rest)
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut f = ContactForm::new();
        f.name = "Lin Wei".into();
        f.phone = "0912-345-678".into();
        f.email = "lin@example.com".into();
        f.message = "Looking for a fitting appointment.".into();
        f
    }

    #[test]
    fn a_complete_form_validates_cleanly() {
        assert!(filled().validate().is_empty());
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let f = ContactForm::new();
        let issues = f.validate();
        let fields: Vec<Field> = issues.iter().map(|i| i.field).collect();
        assert_eq!(fields, vec![Field::Name, Field::Phone]);
    }

    #[test]
    fn short_name_is_rejected() {
        let mut f = filled();
        f.name = "L".into();
        assert_eq!(f.validate()[0].field, Field::Name);
    }

    #[test]
    fn email_is_optional_but_checked_when_present() {
        let mut f = filled();
        f.email.clear();
        assert!(f.validate().is_empty());
        f.email = "not-an-address".into();
        assert_eq!(f.validate()[0].field, Field::Email);
    }

    #[test]
    fn oversized_message_is_rejected() {
        let mut f = filled();
        f.message = "x".repeat(MESSAGE_LIMIT + 1);
        assert_eq!(f.validate()[0].field, Field::Message);
        assert_eq!(f.characters_left(), 0);
    }

    #[test]
    fn invalid_form_never_enters_submitting() {
        let mut f = ContactForm::new();
        assert!(f.submit(Instant::now()).is_err());
        assert_eq!(f.state(), Submission::Idle);
    }

    #[test]
    fn submission_resolves_exactly_once() {
        let mut f = filled();
        let now = Instant::now();
        f.submit(now).unwrap();

        assert_eq!(f.tick(now + Duration::from_millis(1000)), None);

        let outcome = f.tick(now + Duration::from_millis(1500)).unwrap();
        assert!(outcome.confirmation.contains("Lin Wei"));
        assert_eq!(f.state(), Submission::Succeeded);
        assert!(f.name.is_empty());

        assert_eq!(f.tick(now + Duration::from_secs(10)), None);
    }

    #[test]
    fn double_submit_while_pending_is_ignored() {
        let mut f = filled();
        let now = Instant::now();
        f.submit(now).unwrap();
        let pending = f.state();
        f.name = "Someone Else".into();
        assert!(f.submit(now + Duration::from_millis(100)).is_ok());
        assert_eq!(f.state(), pending);
    }

    #[test]
    fn mobile_numbers_format_as_4_3_3() {
        assert_eq!(format_phone("0912345678"), "0912-345-678");
        assert_eq!(format_phone("09 1234 5678"), "0912-345-678");
    }

    #[test]
    fn landline_numbers_format_as_2_4_4() {
        assert_eq!(format_phone("0212345678"), "02-1234-5678");
    }

    #[test]
    fn short_numbers_stay_bare_digits() {
        assert_eq!(format_phone("0912"), "0912");
    }
}
