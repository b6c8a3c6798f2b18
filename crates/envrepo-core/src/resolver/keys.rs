//! Lookup key planning
//!
//! Request normalization:
//! 1. An empty label becomes `master`
//! 2. An empty profile becomes `default`; any profile list not starting with
//!    `default` gets `default,` prepended
//! 3. Any application list not starting with `application` gets
//!    `application,` prepended
//!
//! Both lists are then split on commas and deduplicated keeping the first
//! occurrence. Lookups run over the lists in reverse, applications in the
//! outer loop, so the `application`/`default` baselines are queried last.

use crate::types::LookupKey;

use super::error::{RepositoryError, RepositoryResult};

pub const DEFAULT_LABEL: &str = "master";
pub const DEFAULT_PROFILE: &str = "default";
pub const BASE_APPLICATION: &str = "application";

/// Label to query with, `master` when none was given
pub fn normalize_label(label: Option<&str>) -> String {
    match label {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => DEFAULT_LABEL.to_string(),
    }
}

/// Profile list with the `default` profile guaranteed up front
pub fn normalize_profile(profile: Option<&str>) -> String {
    let profile = match profile {
        Some(profile) if !profile.is_empty() => profile,
        _ => DEFAULT_PROFILE,
    };
    if profile.starts_with(DEFAULT_PROFILE) {
        profile.to_string()
    } else {
        format!("{},{}", DEFAULT_PROFILE, profile)
    }
}

/// Application list with the shared `application` baseline guaranteed up front
pub fn normalize_application(application: &str) -> String {
    if application.starts_with(BASE_APPLICATION) {
        application.to_string()
    } else {
        format!("{},{}", BASE_APPLICATION, application)
    }
}

/// Split a comma-separated list. Empty tokens are dropped; whitespace is kept.
pub fn split_tokens(list: &str) -> Vec<String> {
    list.split(',')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove repeated tokens, keeping the first occurrence of each
pub fn dedup_tokens(tokens: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tokens
        .iter()
        .filter(|token| seen.insert(*token))
        .cloned()
        .collect()
}

/// The normalized form of one request and the lookups it expands to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupPlan {
    label: String,
    profiles: Vec<String>,
    applications: Vec<String>,
    envs: Vec<String>,
}

impl LookupPlan {
    /// Normalize a request.
    ///
    /// Fails only when the application name is empty, since no lookup can be
    /// built for it.
    pub fn new(application: &str, profile: Option<&str>, label: Option<&str>) -> RepositoryResult<Self> {
        if application.trim().is_empty() {
            return Err(RepositoryError::configuration("application name must not be empty"));
        }

        let profiles = split_tokens(&normalize_profile(profile));
        let applications = dedup_tokens(&split_tokens(&normalize_application(application)));
        let envs = dedup_tokens(&profiles);

        Ok(Self {
            label: normalize_label(label),
            profiles,
            applications,
            envs,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Profile tokens as requested (after the default prepend), repeats kept
    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    /// Distinct application tokens in declaration order
    pub fn applications(&self) -> &[String] {
        &self.applications
    }

    /// Distinct profile tokens in declaration order
    pub fn envs(&self) -> &[String] {
        &self.envs
    }

    /// Lookups in query order: applications reversed (outer), profiles reversed (inner)
    pub fn keys(&self) -> Vec<LookupKey> {
        self.applications
            .iter()
            .rev()
            .flat_map(|app| {
                self.envs
                    .iter()
                    .rev()
                    .map(move |env| LookupKey::new(app.as_str(), env.as_str()))
            })
            .collect()
    }
}
