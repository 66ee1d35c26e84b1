use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::notification::NewNotification;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryType {
    Media,
    Speaking,
    Academic,
    General,
}

impl InquiryType {
    pub const ALL: [InquiryType; 4] = [
        InquiryType::Media,
        InquiryType::Speaking,
        InquiryType::Academic,
        InquiryType::General,
    ];

    pub fn parse(value: &str) -> Option<InquiryType> {
        Self::ALL.into_iter().find(|t| t.value() == value)
    }

    pub fn value(&self) -> &'static str {
        match self {
            InquiryType::Media => "media",
            InquiryType::Speaking => "speaking",
            InquiryType::Academic => "academic",
            InquiryType::General => "general",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InquiryType::Media => "Media Inquiry",
            InquiryType::Speaking => "Speaking Engagement",
            InquiryType::Academic => "Academic Inquiry",
            InquiryType::General => "General Question",
        }
    }
}

impl Display for InquiryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

/// Why a submission was turned away.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Name, email, inquiry type, and message are required")]
    MissingField,
    #[error("Valid email address is required")]
    InvalidEmail,
    #[error("Invalid inquiry type")]
    InvalidInquiryType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub organization: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub inquiry_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
}

impl ContactRequest {
    pub fn validate(&self) -> Result<InquiryType, Rejection> {
        if [&self.name, &self.email, &self.inquiry_type, &self.message]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(Rejection::MissingField);
        }
        if !is_email(&self.email) {
            return Err(Rejection::InvalidEmail);
        }
        InquiryType::parse(&self.inquiry_type).ok_or(Rejection::InvalidInquiryType)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
}

impl NewsletterRequest {
    pub fn validate(&self) -> Result<(), Rejection> {
        match is_email(&self.email) {
            true => Ok(()),
            false => Err(Rejection::InvalidEmail),
        }
    }
}

/// Reads a form field as text. `null` counts as empty and other JSON values
/// keep their literal form, so they fail validation rather than parsing.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(value) => value,
        value => value.to_string(),
    })
}

fn lenient_optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Some(lenient_string(deserializer)?).filter(|value| !value.is_empty()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Success { success: bool, message: String },
    Failure { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: ResponseBody,
}

impl Response {
    fn ok(message: &str) -> Self {
        Self {
            status: 200,
            body: ResponseBody::Success {
                success: true,
                message: message.to_string(),
            },
        }
    }

    fn error(status: u16, error: impl Display) -> Self {
        Self {
            status,
            body: ResponseBody::Failure {
                error: error.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Failure { error } => Some(error.as_str()),
            ResponseBody::Success { .. } => None,
        }
    }

}

/// The contact endpoint: accepts a JSON body and logs the submission.
pub fn handle_contact(body: &str) -> Response {
    let request: ContactRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(err) => {
            log::error!("Contact form error: {}", err);
            return Response::error(500, "Failed to send message. Please try again.");
        }
    };

    let inquiry_type = match request.validate() {
        Ok(inquiry_type) => inquiry_type,
        Err(rejection) => {
            log::warn!("Contact form rejected: {}", rejection);
            return Response::error(400, rejection);
        }
    };

    log::info!(
        "Contact form submission: name={} email={} organization={:?} inquiry_type={} message={}",
        request.name,
        request.email,
        request.organization,
        inquiry_type,
        preview(&request.message),
    );

    Response::ok("Message sent successfully. We will be in touch soon.")
}

/// The newsletter endpoint.
pub fn handle_newsletter(body: &str) -> Response {
    let request: NewsletterRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(err) => {
            log::error!("Newsletter subscription error: {}", err);
            return Response::error(500, "Failed to subscribe. Please try again.");
        }
    };

    if let Err(rejection) = request.validate() {
        log::warn!("Newsletter subscription rejected: {}", rejection);
        return Response::error(400, rejection);
    }

    log::info!("Newsletter subscription: {}", request.email);
    Response::ok("Successfully subscribed to newsletter")
}

fn preview(message: &str) -> String {
    format!("{}...", message.chars().take(100).collect::<String>())
}

/// Sends the contact form and turns the response into a toast.
pub fn submit_contact(request: &ContactRequest) -> (bool, NewNotification) {
    let response = match serde_json::to_string(request) {
        Ok(body) => handle_contact(&body),
        Err(err) => {
            log::error!("could not encode contact form: {}", err);
            return (false, contact_failed("Please try again or email us directly."));
        }
    };

    if response.is_success() {
        return (
            true,
            NewNotification::success("Message sent!")
                .with_description("We'll get back to you as soon as possible."),
        );
    }

    match response.status {
        400 => (
            false,
            contact_failed(response.error_message().unwrap_or_default()),
        ),
        _ => (false, contact_failed("Please try again or email us directly.")),
    }
}

fn contact_failed(description: &str) -> NewNotification {
    NewNotification::error("Failed to send message").with_description(description)
}

/// Sends the newsletter form and turns the response into a toast.
pub fn submit_newsletter(request: &NewsletterRequest) -> (bool, NewNotification) {
    let response = match serde_json::to_string(request) {
        Ok(body) => handle_newsletter(&body),
        Err(err) => {
            log::error!("could not encode newsletter form: {}", err);
            return (false, subscription_failed(None));
        }
    };

    match response.is_success() {
        true => (
            true,
            NewNotification::success("Thanks for subscribing!")
                .with_description("You'll receive updates about the book and events."),
        ),
        false => (false, subscription_failed(response.error_message())),
    }
}

fn subscription_failed(error: Option<&str>) -> NewNotification {
    NewNotification::error("Subscription failed")
        .with_description(error.filter(|e| !e.is_empty()).unwrap_or("Please try again."))
}
