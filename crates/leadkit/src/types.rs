//! Core types for LeadKit

use crate::error::LeadError;
use crate::normalize::{company_from_url, non_empty, normalize_url};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

/// Title used when no candidate survives the fallback chain
pub const TITLE_SENTINEL: &str = "No title found";

/// Description used when no candidate survives the fallback chain
pub const DESCRIPTION_SENTINEL: &str = "No description found";

/// Language reported when the page does not declare one
pub const DEFAULT_LANGUAGE: &str = "en";

/// A page returned by a [`Fetcher`](crate::Fetcher)
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after scheme normalization and redirects
    pub url: Url,
    /// HTTP status code (always a success status)
    pub status_code: u16,
    /// Content-Type header value
    pub content_type: Option<String>,
    /// Response body
    pub html: String,
}

/// A lead extracted from (or submitted for) a single web page
///
/// `title` and `description` are never empty: absence is reported with
/// [`TITLE_SENTINEL`] / [`DESCRIPTION_SENTINEL`]. Optional fields are `None`
/// rather than empty strings, and URL-valued fields are absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LeadRecord {
    /// Company name derived from the URL host
    pub company: String,
    /// Resolved, scheme-qualified URL
    pub url: String,
    /// Page title
    pub title: String,
    /// Page description, at most 300 characters
    pub description: String,
    /// First plausible contact email
    pub email: Option<String>,
    /// First plausible phone number
    pub phone: Option<String>,
    /// Absolute logo URL
    pub logo_url: Option<String>,
    /// Absolute favicon URL
    pub favicon_url: Option<String>,
    /// Twitter handle without the leading `@`
    pub twitter_handle: Option<String>,
    /// LinkedIn profile URL
    pub linkedin_url: Option<String>,
    /// Facebook page URL
    pub facebook_url: Option<String>,
    /// Instagram profile URL
    pub instagram_url: Option<String>,
    /// Absolute URL of a contact or about page
    pub contact_page: Option<String>,
    /// Raw `<meta name="keywords">` content
    pub industry_keywords: Option<String>,
    /// Page language, defaults to "en"
    pub language: String,
}

impl LeadRecord {
    /// Create a record for `url` with every optional field empty
    pub fn new(url: &Url) -> Self {
        Self {
            company: company_from_url(url),
            url: url.to_string(),
            title: TITLE_SENTINEL.to_string(),
            description: DESCRIPTION_SENTINEL.to_string(),
            email: None,
            phone: None,
            logo_url: None,
            favicon_url: None,
            twitter_handle: None,
            linkedin_url: None,
            facebook_url: None,
            instagram_url: None,
            contact_page: None,
            industry_keywords: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// True when the title came from the page rather than the sentinel
    pub fn has_title(&self) -> bool {
        self.title != TITLE_SENTINEL
    }

    /// True when the description came from the page rather than the sentinel
    pub fn has_description(&self) -> bool {
        self.description != DESCRIPTION_SENTINEL
    }
}

/// A lead supplied pre-built by a programmatic caller
///
/// Every field is optional on the wire; [`LeadSubmission::into_record`]
/// rejects a missing `url`. `company` is not accepted: it is always derived
/// from the URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LeadSubmission {
    /// The page URL (required)
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_keywords: Option<String>,
    /// Page language (default "en")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl LeadSubmission {
    /// Create a submission for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Validate the submission and build a record from it
    ///
    /// Fields are taken as given (trimmed, blanks dropped). The URL gets the
    /// same scheme normalization as a scraped URL and `company` is derived
    /// from it.
    pub fn into_record(self) -> Result<LeadRecord, LeadError> {
        let raw_url = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(LeadError::MissingUrl)?;
        let url =
            normalize_url(raw_url).map_err(|_| LeadError::InvalidUrl(raw_url.to_string()))?;

        let mut record = LeadRecord::new(&url);
        if let Some(title) = non_empty(self.title) {
            record.title = title;
        }
        if let Some(description) = non_empty(self.description) {
            record.description = description;
        }
        record.email = non_empty(self.email);
        record.phone = non_empty(self.phone);
        record.logo_url = non_empty(self.logo_url);
        record.favicon_url = non_empty(self.favicon_url);
        record.twitter_handle = non_empty(self.twitter_handle);
        record.linkedin_url = non_empty(self.linkedin_url);
        record.facebook_url = non_empty(self.facebook_url);
        record.instagram_url = non_empty(self.instagram_url);
        record.contact_page = non_empty(self.contact_page);
        record.industry_keywords = non_empty(self.industry_keywords);
        if let Some(language) = non_empty(self.language) {
            record.language = language;
        }
        Ok(record)
    }
}

/// A lead as persisted by a [`LeadStore`](crate::LeadStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLead {
    /// Identity assigned by the store
    pub id: i64,
    /// Insert time assigned by the store; `None` for rows written without one
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub lead: LeadRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let url = Url::parse("https://www.acme.io/").unwrap();
        let record = LeadRecord::new(&url);
        assert_eq!(record.company, "Acme");
        assert_eq!(record.title, TITLE_SENTINEL);
        assert_eq!(record.description, DESCRIPTION_SENTINEL);
        assert_eq!(record.language, "en");
        assert!(!record.has_title());
        assert!(!record.has_description());
    }

    #[test]
    fn test_submission_requires_url() {
        let err = LeadSubmission::default().into_record().unwrap_err();
        assert!(matches!(err, LeadError::MissingUrl));

        let err = LeadSubmission::new("   ").into_record().unwrap_err();
        assert!(matches!(err, LeadError::MissingUrl));
    }

    #[test]
    fn test_submission_recomputes_company() {
        let json = r#"{
            "url": "https://www.globex.com/contact",
            "title": "Globex Corporation",
            "email": "sales@globex.com",
            "language": "de"
        }"#;
        let submission: LeadSubmission = serde_json::from_str(json).unwrap();
        let record = submission.into_record().unwrap();

        assert_eq!(record.company, "Globex");
        assert_eq!(record.url, "https://www.globex.com/contact");
        assert_eq!(record.title, "Globex Corporation");
        assert_eq!(record.description, DESCRIPTION_SENTINEL);
        assert_eq!(record.email.as_deref(), Some("sales@globex.com"));
        assert_eq!(record.language, "de");
    }

    #[test]
    fn test_submission_blank_fields_dropped() {
        let json = r#"{"url": "initech.com", "phone": "", "language": "  "}"#;
        let submission: LeadSubmission = serde_json::from_str(json).unwrap();
        let record = submission.into_record().unwrap();

        assert_eq!(record.url, "https://initech.com/");
        assert_eq!(record.company, "Initech");
        assert!(record.phone.is_none());
        assert_eq!(record.language, "en");
    }

    #[test]
    fn test_submission_invalid_url() {
        let err = LeadSubmission::new("ftp://files.acme.io")
            .into_record()
            .unwrap_err();
        assert!(matches!(err, LeadError::InvalidUrl(_)));
    }

    #[test]
    fn test_stored_lead_serialization_is_flat() {
        let url = Url::parse("https://acme.io/").unwrap();
        let stored = StoredLead {
            id: 7,
            created_at: Some(Utc::now()),
            lead: LeadRecord::new(&url),
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["company"], "Acme");
        assert!(json["email"].is_null());
        assert!(json.get("lead").is_none());
    }
}
