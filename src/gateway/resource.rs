//! Well-known portfolio resources: record key, REST path and fixture latency.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{FolioError, Result};

/// A logical resource the gateway knows how to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    PersonalInfo,
    AboutInfo,
    Experiences,
    Education,
    Projects,
    FeaturedProjects,
    SocialLinks,
    ContactInfo,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::PersonalInfo,
        Resource::AboutInfo,
        Resource::Experiences,
        Resource::Education,
        Resource::Projects,
        Resource::FeaturedProjects,
        Resource::SocialLinks,
        Resource::ContactInfo,
    ];

    /// Cache key. Stable across locale changes.
    pub fn key(self) -> &'static str {
        match self {
            Resource::PersonalInfo => "personal-info",
            Resource::AboutInfo => "about-info",
            Resource::Experiences => "experiences",
            Resource::Education => "education",
            Resource::Projects => "projects",
            Resource::FeaturedProjects => "featured-projects",
            Resource::SocialLinks => "social-links",
            Resource::ContactInfo => "contact-info",
        }
    }

    /// Path relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Resource::PersonalInfo => "/personal-info",
            Resource::AboutInfo => "/about-info",
            Resource::Experiences => "/experiences",
            Resource::Education => "/education",
            Resource::Projects => "/projects",
            Resource::FeaturedProjects => "/projects/featured",
            Resource::SocialLinks => "/social-links",
            Resource::ContactInfo => "/contact-info",
        }
    }

    /// Simulated latency before the fixture is returned.
    pub fn fixture_delay(self) -> Duration {
        let ms = match self {
            Resource::Experiences => 700,
            Resource::Education | Resource::Projects | Resource::FeaturedProjects => 600,
            Resource::PersonalInfo
            | Resource::AboutInfo
            | Resource::SocialLinks
            | Resource::ContactInfo => 500,
        };
        Duration::from_millis(ms)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.key() == key)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Resource {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Resource::from_key(&normalized).ok_or_else(|| {
            let known: Vec<&str> = Resource::ALL.iter().map(|r| r.key()).collect();
            FolioError::Validation(format!(
                "Unknown resource '{}' (expected one of: {})",
                s.trim(),
                known.join(", ")
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_and_paths_unique() {
        let keys: HashSet<_> = Resource::ALL.iter().map(|r| r.key()).collect();
        let paths: HashSet<_> = Resource::ALL.iter().map(|r| r.path()).collect();
        assert_eq!(keys.len(), Resource::ALL.len());
        assert_eq!(paths.len(), Resource::ALL.len());
        assert!(Resource::ALL.iter().all(|r| r.path().starts_with('/')));
    }

    #[test]
    fn test_from_key_roundtrip() {
        for resource in Resource::ALL {
            assert_eq!(Resource::from_key(resource.key()), Some(resource));
        }
        assert_eq!(Resource::from_key("newsletter"), None);
    }

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!(
            "Featured_Projects".parse::<Resource>().unwrap(),
            Resource::FeaturedProjects
        );
        assert!("resume".parse::<Resource>().is_err());
    }

    #[test]
    fn test_fixture_delays() {
        assert_eq!(Resource::Experiences.fixture_delay(), Duration::from_millis(700));
        assert_eq!(Resource::Projects.fixture_delay(), Duration::from_millis(600));
        assert_eq!(Resource::PersonalInfo.fixture_delay(), Duration::from_millis(500));
    }
}
