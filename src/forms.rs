//! Contact and newsletter form payloads.
//!
//! Submission itself is somebody else's job: the generated HTML posts to the
//! configured endpoints and a backend handles the rest. This module only
//! defines the payloads, the required-field checks, and the [`Submitter`]
//! seam. The default [`LogSubmitter`] writes each payload as one JSON line,
//! which is what a site without a backend does.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A field rendered into the generated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    TextArea,
}

impl FieldKind {
    /// `type` attribute for `<input>`. `None` for textareas.
    pub fn input_type(self) -> Option<&'static str> {
        match self {
            FieldKind::Text => Some("text"),
            FieldKind::Email => Some("email"),
            FieldKind::Tel => Some("tel"),
            FieldKind::TextArea => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

impl ContactSubmission {
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            name: "name",
            label: "Name",
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            name: "email",
            label: "Email",
            kind: FieldKind::Email,
            required: true,
        },
        FieldSpec {
            name: "company",
            label: "Company",
            kind: FieldKind::Text,
            required: false,
        },
        FieldSpec {
            name: "phone",
            label: "Phone",
            kind: FieldKind::Tel,
            required: false,
        },
        FieldSpec {
            name: "message",
            label: "Message",
            kind: FieldKind::TextArea,
            required: true,
        },
    ];

    pub fn validate(&self) -> Result<(), FormError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("message", &self.message)?;
        check_email(&self.email)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsletterSubscription {
    pub email: String,
}

impl NewsletterSubscription {
    pub const FIELDS: &'static [FieldSpec] = &[FieldSpec {
        name: "email",
        label: "Email",
        kind: FieldKind::Email,
        required: true,
    }];

    pub fn validate(&self) -> Result<(), FormError> {
        require("email", &self.email)?;
        check_email(&self.email)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(())
}

/// Shape check only: one `@`, something on both sides, a dot in the domain.
fn check_email(email: &str) -> Result<(), FormError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(FormError::InvalidEmail(email.to_string()))
    }
}

/// Hands validated payloads to whatever handles them.
pub trait Submitter {
    fn submit_contact(&mut self, submission: &ContactSubmission) -> Result<(), FormError>;
    fn subscribe(&mut self, subscription: &NewsletterSubscription) -> Result<(), FormError>;
}

/// Writes each payload as a JSON line tagged with its form name.
#[derive(Debug)]
pub struct LogSubmitter<W: Write> {
    out: W,
}

impl LogSubmitter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> LogSubmitter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn log<T: Serialize>(&mut self, form: &str, payload: &T) -> Result<(), FormError> {
        let line = serde_json::json!({ "form": form, "payload": payload });
        writeln!(self.out, "{}", serde_json::to_string(&line)?)?;
        Ok(())
    }
}

impl<W: Write> Submitter for LogSubmitter<W> {
    fn submit_contact(&mut self, submission: &ContactSubmission) -> Result<(), FormError> {
        submission.validate()?;
        self.log("contact", submission)
    }

    fn subscribe(&mut self, subscription: &NewsletterSubscription) -> Result<(), FormError> {
        subscription.validate()?;
        self.log("newsletter", subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_contact() -> ContactSubmission {
        ContactSubmission {
            name: "Dana Ortiz".into(),
            email: "dana@example.com".into(),
            company: Some("Ortiz Pumps".into()),
            phone: None,
            message: "Quote for 5k housings in A380.".into(),
        }
    }

    #[test]
    fn valid_contact_passes() {
        valid_contact().validate().unwrap();
    }

    #[test]
    fn blank_message_is_missing() {
        let mut c = valid_contact();
        c.message = "   ".into();
        assert!(matches!(c.validate(), Err(FormError::MissingField("message"))));
    }

    #[test]
    fn email_shape_checked() {
        for bad in ["dana", "dana@", "@example.com", "dana@example", "a@b@c.com", "a@.com"] {
            let sub = NewsletterSubscription { email: bad.into() };
            assert!(
                matches!(sub.validate(), Err(FormError::InvalidEmail(_)) | Err(FormError::MissingField(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn log_submitter_writes_json_line() {
        let mut submitter = LogSubmitter::new(Vec::new());
        submitter.submit_contact(&valid_contact()).unwrap();
        submitter
            .subscribe(&NewsletterSubscription {
                email: "news@example.com".into(),
            })
            .unwrap();

        let out = String::from_utf8(submitter.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["form"], "contact");
        assert_eq!(first["payload"]["company"], "Ortiz Pumps");
        assert!(first["payload"].get("phone").is_none());

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["form"], "newsletter");
    }

    #[test]
    fn log_submitter_rejects_invalid_payload() {
        let mut submitter = LogSubmitter::new(Vec::new());
        let result = submitter.subscribe(&NewsletterSubscription::default());
        assert!(result.is_err());
        assert!(submitter.into_inner().is_empty());
    }

    #[test]
    fn contact_fields_cover_required_payload() {
        let required: Vec<&str> = ContactSubmission::FIELDS
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();
        assert_eq!(required, vec!["name", "email", "message"]);
        assert_eq!(FieldKind::TextArea.input_type(), None);
    }
}
