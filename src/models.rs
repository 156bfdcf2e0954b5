//! Typed portfolio records.
//!
//! The gateway caches payloads as opaque JSON; these types are only applied
//! when a caller asks for a typed view. Unknown fields are ignored so the
//! backend can grow its payloads without breaking older clients.

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// Owner's headline information (Home and Contact sections).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub avatar: String,
    /// Link to a downloadable resume.
    #[serde(default)]
    pub resume: String,
}

/// About section: introduction paragraphs and a skill list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutInfo {
    pub introduction: Vec<String>,
    pub skills: Vec<String>,
    #[serde(default)]
    pub image: String,
}

/// One position on the Experience page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: u32,
    pub company: String,
    pub position: String,
    pub duration: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: u32,
    pub school: String,
    pub degree: String,
    pub duration: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub github: String,
    /// Live demo link.
    #[serde(default)]
    pub external: String,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    pub icon: String,
}

/// Copy for the Contact section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub title: String,
    pub heading: String,
    pub description: String,
    pub email: String,
}

/// Contact form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Require every field and a plausible email address.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(FolioError::Validation(format!(
                "Please fill in all fields (missing: {})",
                missing.join(", ")
            )));
        }

        if !is_plausible_email(self.email.trim()) {
            return Err(FolioError::Validation(format!(
                "'{}' is not a valid email address",
                self.email.trim()
            )));
        }
        Ok(())
    }
}

/// `local@domain` with no whitespace and a single `@`.
pub(crate) fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Human-readable confirmation returned by contact and newsletter submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub message: String,
}
