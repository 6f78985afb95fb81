use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::storage::{Storage, StoreError, StoreEvent};

pub const SUBMISSION_KEY: &str = "prp_final_submission";

const PROJECT_LINK_MESSAGE: &str = "Enter a valid project URL.";
const REPOSITORY_LINK_MESSAGE: &str = "Enter a valid repository URL.";
const DEPLOYED_URL_MESSAGE: &str = "Enter a valid deployed app URL.";

/// Proof-of-work links as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub project_link: String,
    pub repository_link: String,
    pub deployed_url: String,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmissionInput {
    pub project_link: String,
    pub repository_link: String,
    pub deployed_url: String,
}

/// Per-field validation message; empty string means the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkErrors {
    pub project_link: String,
    pub repository_link: String,
    pub deployed_url: String,
}

impl LinkErrors {
    pub fn is_empty(&self) -> bool {
        self.project_link.is_empty() && self.repository_link.is_empty() && self.deployed_url.is_empty()
    }
}

/// Parses as a WHATWG URL with an http(s) scheme and a non-empty host.
pub fn is_http_url(value: &str) -> bool {
    let Ok(url) = Url::parse(value) else {
        return false;
    };
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
}

fn link_error(value: &str, message: &str) -> String {
    if is_http_url(value) {
        String::new()
    } else {
        message.to_string()
    }
}

pub fn validate_submission_links(submission: &Submission) -> LinkErrors {
    LinkErrors {
        project_link: link_error(&submission.project_link, PROJECT_LINK_MESSAGE),
        repository_link: link_error(&submission.repository_link, REPOSITORY_LINK_MESSAGE),
        deployed_url: link_error(&submission.deployed_url, DEPLOYED_URL_MESSAGE),
    }
}

fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

/// Reads whatever is stored, accepting the older camelCase field names.
pub fn normalize_submission(raw: Option<&Value>) -> Submission {
    let Some(obj) = raw.and_then(Value::as_object) else {
        return Submission::default();
    };
    Submission {
        project_link: string_field(obj, &["project_link", "lovableProjectLink"]),
        repository_link: string_field(obj, &["repository_link", "githubRepositoryLink"]),
        deployed_url: string_field(obj, &["deployed_url", "deployedUrl"]),
        updated_at: ["updated_at", "updatedAt"]
            .iter()
            .find_map(|k| obj.get(*k).and_then(Value::as_str))
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

pub fn load_submission(storage: &Storage) -> Result<Submission, StoreError> {
    Ok(normalize_submission(storage.read_json(SUBMISSION_KEY)?.as_ref()))
}

/// Trims each link and stamps the save time. Invalid links are still saved so the
/// user can keep editing them.
pub fn save_submission(storage: &Storage, input: SubmissionInput) -> Result<Submission, StoreError> {
    let submission = Submission {
        project_link: input.project_link.trim().to_string(),
        repository_link: input.repository_link.trim().to_string(),
        deployed_url: input.deployed_url.trim().to_string(),
        updated_at: Some(Utc::now()),
    };
    let _guard = storage.lock();
    storage.write_json(SUBMISSION_KEY, &submission, StoreEvent::SubmissionChanged)?;
    Ok(submission)
}
