use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SENT_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
pub const REJECTED_FALLBACK: &str = "Failed to send message. Please try again.";

const MIN_NAME_CHARS: usize = 2;
const MIN_SUBJECT_CHARS: usize = 3;
const MIN_MESSAGE_CHARS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Subject must be at least 3 characters")]
    SubjectTooShort,
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("{}", join_lines(.0))]
    Invalid(Vec<FieldError>),
    #[error("{0}")]
    Rejected(String),
    /// The request never completed; the detail is for logs only.
    #[error("Network error. Please check your connection and try again.")]
    Transport(String),
}

fn join_lines(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactPayload {
    pub fn new(name: &str, email: &str, subject: &str, message: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            subject: subject.trim().to_string(),
            message: message.trim().to_string(),
        }
    }

    pub fn validate(self) -> Result<ValidContact, ContactError> {
        let mut errors = Vec::new();

        if self.name.chars().count() < MIN_NAME_CHARS {
            errors.push(FieldError::NameTooShort);
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldError::InvalidEmail);
        }
        if self.subject.chars().count() < MIN_SUBJECT_CHARS {
            errors.push(FieldError::SubjectTooShort);
        }
        if self.message.chars().count() < MIN_MESSAGE_CHARS {
            errors.push(FieldError::MessageTooShort);
        }

        if errors.is_empty() {
            Ok(ValidContact(self))
        } else {
            Err(ContactError::Invalid(errors))
        }
    }
}

/// A payload that passed [`ContactPayload::validate`]; the only thing [`deliver`] accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidContact(ContactPayload);

impl ValidContact {
    pub fn payload(&self) -> &ContactPayload {
        &self.0
    }
}

pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    !local.is_empty()
        && domain
            .char_indices()
            .any(|(index, c)| c == '.' && index > 0 && index + 1 < domain.len())
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ContactResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactReply {
    pub http_ok: bool,
    pub body: ContactResponse,
}

pub trait ContactTransport {
    async fn post(&self, payload: &ContactPayload) -> Result<ContactReply, String>;
}

pub async fn deliver<T: ContactTransport>(
    transport: &T,
    contact: &ValidContact,
) -> Result<(), ContactError> {
    let reply = transport
        .post(contact.payload())
        .await
        .map_err(ContactError::Transport)?;

    interpret_reply(reply)
}

pub fn interpret_reply(reply: ContactReply) -> Result<(), ContactError> {
    if reply.http_ok && reply.body.success {
        return Ok(());
    }

    let message = reply
        .body
        .message
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| REJECTED_FALLBACK.to_string());

    Err(ContactError::Rejected(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingTransport {
        calls: RefCell<Vec<ContactPayload>>,
        reply: Result<ContactReply, String>,
    }

    impl RecordingTransport {
        fn replying(reply: Result<ContactReply, String>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                reply,
            }
        }
    }

    impl ContactTransport for RecordingTransport {
        async fn post(&self, payload: &ContactPayload) -> Result<ContactReply, String> {
            self.calls.borrow_mut().push(payload.clone());
            self.reply.clone()
        }
    }

    fn reply(http_ok: bool, success: bool, message: Option<&str>) -> ContactReply {
        ContactReply {
            http_ok,
            body: ContactResponse {
                success,
                message: message.map(ToString::to_string),
            },
        }
    }

    fn valid_contact() -> ValidContact {
        ContactPayload::new("Jane", "jane@x.com", "Hello", "This is a valid message.")
            .validate()
            .expect("payload is valid")
    }

    #[test]
    fn every_failing_rule_is_reported_together() {
        let result = ContactPayload::new("A", "bad", "Hi", "short").validate();

        assert_eq!(
            result,
            Err(ContactError::Invalid(vec![
                FieldError::NameTooShort,
                FieldError::InvalidEmail,
                FieldError::SubjectTooShort,
                FieldError::MessageTooShort,
            ]))
        );
    }

    #[test]
    fn combined_message_lists_one_error_per_line() {
        let error = ContactPayload::new("A", "jane@x.com", "Hi", "This is a valid message.")
            .validate()
            .expect_err("name and subject are too short");

        assert_eq!(
            error.to_string(),
            "Name must be at least 2 characters\nSubject must be at least 3 characters"
        );
    }

    #[test]
    fn fields_are_trimmed_before_length_checks() {
        let result = ContactPayload::new("  J  ", " jane@x.com ", " Hey ", "   too short   ").validate();

        assert_eq!(
            result,
            Err(ContactError::Invalid(vec![
                FieldError::NameTooShort,
                FieldError::MessageTooShort,
            ]))
        );
    }

    #[test]
    fn email_shape_rules() {
        assert!(is_valid_email("jane@x.com"));
        assert!(is_valid_email("a.b+tag@mail.example.org"));
        assert!(!is_valid_email("bad"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("jane@xcom"));
        assert!(!is_valid_email("jane@.com"));
        assert!(!is_valid_email("jane@x."));
        assert!(!is_valid_email("ja ne@x.com"));
        assert!(!is_valid_email("jane@x@y.com"));
    }

    #[test]
    fn payload_serializes_the_four_fields() {
        let json = serde_json::to_value(valid_contact().payload()).expect("serializes");

        assert_eq!(
            json,
            serde_json::json!({
                "name": "Jane",
                "email": "jane@x.com",
                "subject": "Hello",
                "message": "This is a valid message.",
            })
        );
    }

    #[tokio::test]
    async fn valid_submission_posts_once_with_fields_verbatim() {
        let transport = RecordingTransport::replying(Ok(reply(true, true, None)));

        let result = deliver(&transport, &valid_contact()).await;

        assert_eq!(result, Ok(()));
        let calls = transport.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            ContactPayload {
                name: "Jane".to_string(),
                email: "jane@x.com".to_string(),
                subject: "Hello".to_string(),
                message: "This is a valid message.".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn application_failure_surfaces_server_message() {
        let transport = RecordingTransport::replying(Ok(reply(true, false, Some("Mailbox full."))));

        let result = deliver(&transport, &valid_contact()).await;

        assert_eq!(result, Err(ContactError::Rejected("Mailbox full.".to_string())));
    }

    #[tokio::test]
    async fn http_failure_without_message_uses_fallback() {
        let transport = RecordingTransport::replying(Ok(reply(false, false, Some("  "))));

        let error = deliver(&transport, &valid_contact())
            .await
            .expect_err("server rejected");

        assert_eq!(error.to_string(), REJECTED_FALLBACK);
    }

    #[tokio::test]
    async fn http_failure_overrides_success_flag() {
        let transport = RecordingTransport::replying(Ok(reply(false, true, Some("Too many requests."))));

        let result = deliver(&transport, &valid_contact()).await;

        assert_eq!(result, Err(ContactError::Rejected("Too many requests.".to_string())));
    }

    #[tokio::test]
    async fn transport_failure_hides_detail_from_visitor() {
        let transport = RecordingTransport::replying(Err("TypeError: Failed to fetch".to_string()));

        let error = deliver(&transport, &valid_contact())
            .await
            .expect_err("request never completed");

        assert_eq!(
            error.to_string(),
            "Network error. Please check your connection and try again."
        );
        assert_eq!(error, ContactError::Transport("TypeError: Failed to fetch".to_string()));
    }

    #[test]
    fn response_fields_default_when_missing() {
        let body: ContactResponse = serde_json::from_str("{}").expect("empty object decodes");

        assert_eq!(body, ContactResponse::default());
        assert_eq!(interpret_reply(ContactReply { http_ok: true, body }), Err(ContactError::Rejected(REJECTED_FALLBACK.to_string())));
    }
}
