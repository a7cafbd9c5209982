use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Range type whose events carry semantic versions.
pub const RANGE_SEMVER: &str = "SEMVER";

/// Key in `ecosystem_specific` under which Go advisories list the affected
/// packages and symbols.
pub const IMPORTS_KEY: &str = "imports";

/// An OSV advisory entry.
///
/// Only `id` and `modified` are required; every other field is carried
/// through untouched so that the `ID/<id>.json` endpoint contains the full
/// record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    pub id: String,
    pub modified: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawn: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected: Vec<Affected>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub severity: Vec<SeverityScore>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_specific: Option<Map<String, Value>>,
}

impl Vulnerability {
    pub fn new(id: impl Into<String>, modified: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            modified,
            ..Default::default()
        }
    }

    pub fn with_affected(mut self, affected: Affected) -> Self {
        self.affected.push(affected);
        self
    }

    /// Affected entries describing the given package name.
    pub fn affected_for<'a>(&'a self, package_name: &'a str) -> impl Iterator<Item = &'a Affected> {
        self.affected
            .iter()
            .filter(move |affected| affected.package.name == package_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Affected {
    pub package: AffectedPackage,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<Range>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecosystem_specific: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_specific: Option<Map<String, Value>>,
}

impl Affected {
    pub fn new(package: AffectedPackage) -> Self {
        Self {
            package,
            ..Default::default()
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.ranges.push(range);
        self
    }

    pub fn with_ecosystem_specific(mut self, key: &str, value: Value) -> Self {
        self.ecosystem_specific
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value);
        self
    }

    /// Whether the advisory carries source-level import information for this
    /// package, i.e. the affected symbols are known.
    pub fn has_import_info(&self) -> bool {
        self.ecosystem_specific
            .as_ref()
            .is_some_and(|specific| specific.contains_key(IMPORTS_KEY))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedPackage {
    pub ecosystem: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
}

impl AffectedPackage {
    pub fn go(name: impl Into<String>) -> Self {
        Self {
            ecosystem: "Go".to_string(),
            name: name.into(),
            purl: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    #[serde(rename = "type")]
    pub range_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_specific: Option<Map<String, Value>>,
}

impl Range {
    pub fn semver(events: Vec<Event>) -> Self {
        Self {
            range_type: RANGE_SEMVER.to_string(),
            events,
            ..Default::default()
        }
    }

    pub fn is_semver(&self) -> bool {
        self.range_type == RANGE_SEMVER
    }
}

/// A single range event. Exactly one field is expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduced: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_affected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl Event {
    pub fn introduced(version: impl Into<String>) -> Self {
        Self {
            introduced: Some(version.into()),
            ..Default::default()
        }
    }

    pub fn fixed(version: impl Into<String>) -> Self {
        Self {
            fixed: Some(version.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityScore {
    #[serde(rename = "type")]
    pub severity_type: String,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type")]
    pub reference_type: String,
    pub url: String,
}
