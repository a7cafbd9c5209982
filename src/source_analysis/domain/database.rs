use crate::shared::error::SourceAnalysisError;
use crate::shared::Result;
use crate::source_analysis::domain::{Range, Vulnerability};
use crate::source_analysis::policies::latest_fixed_version;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};

/// Database represents a Go vulnerability database in the v1 layout.
///
/// - `db` backs the `index/db.json` endpoint
/// - `modules` backs the `index/modules.json` endpoint
/// - `entries` back the `ID/<id>.json` endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Database {
    db: DbMeta,
    modules: ModulesIndex,
    entries: Vec<Vulnerability>,
}

impl Database {
    /// Creates a database from the given entries.
    ///
    /// # Errors
    /// Returns `SourceAnalysisError::DuplicateEntry` if two entries share an ID.
    pub fn new(entries: impl IntoIterator<Item = Vulnerability>) -> Result<Self> {
        let mut db = Self::default();
        db.add(entries)?;
        Ok(db)
    }

    /// Adds entries to the database.
    ///
    /// The whole batch is validated before anything is written, so on error
    /// the database is left exactly as it was.
    ///
    /// # Errors
    /// Returns `SourceAnalysisError::DuplicateEntry` naming the first ID that
    /// is already in the database or repeated within `entries`.
    pub fn add(&mut self, entries: impl IntoIterator<Item = Vulnerability>) -> Result<()> {
        let entries: Vec<Vulnerability> = entries.into_iter().collect();

        {
            let mut known: HashSet<&str> = self.entries.iter().map(|e| e.id.as_str()).collect();
            if let Some(duplicate) = entries.iter().find(|e| !known.insert(e.id.as_str())) {
                return Err(SourceAnalysisError::DuplicateEntry {
                    id: duplicate.id.clone(),
                }
                .into());
            }
        }

        for entry in entries {
            self.modules.add(&entry);
            self.db.add(&entry, self.entries.is_empty());
            self.entries.push(entry);
        }
        Ok(())
    }

    pub fn db(&self) -> &DbMeta {
        &self.db
    }

    pub fn modules(&self) -> &ModulesIndex {
        &self.modules
    }

    pub fn entries(&self) -> &[Vulnerability] {
        &self.entries
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn entry(&self, id: &str) -> Option<&Vulnerability> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn module(&self, path: &str) -> Option<&Module> {
        self.modules.get(path)
    }
}

/// Metadata about the database itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbMeta {
    /// Most recent `modified` time of any entry.
    pub modified: DateTime<Utc>,
}

impl DbMeta {
    /// The first entry always sets `modified`, so pre-epoch dates count too.
    fn add(&mut self, entry: &Vulnerability, first: bool) {
        if first || entry.modified > self.modified {
            self.modified = entry.modified;
        }
    }
}

/// Map from module path to module metadata.
///
/// Serializes to the `index/modules.json` format: a JSON array sorted by
/// module path, with each module's vulns sorted by ID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModulesIndex(HashMap<String, Module>);

impl ModulesIndex {
    /// Records `entry` once per affected module. Affected items naming the
    /// same module have their ranges resolved together.
    fn add(&mut self, entry: &Vulnerability) {
        let mut ranges_by_module: Vec<(&str, Vec<Range>)> = Vec::new();
        for affected in &entry.affected {
            let path = affected.package.name.as_str();
            match ranges_by_module.iter_mut().find(|(p, _)| *p == path) {
                Some((_, ranges)) => ranges.extend(affected.ranges.iter().cloned()),
                None => ranges_by_module.push((path, affected.ranges.clone())),
            }
        }

        for (path, ranges) in ranges_by_module {
            let module = self
                .0
                .entry(path.to_string())
                .or_insert_with(|| Module::new(path));
            module.vulns.push(ModuleVuln {
                id: entry.id.clone(),
                modified: entry.modified,
                fixed: latest_fixed_version(&ranges),
            });
        }
    }

    pub fn get(&self, path: &str) -> Option<&Module> {
        self.0.get(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Modules in serialization order.
    pub fn sorted(&self) -> Vec<Module> {
        let mut modules: Vec<Module> = self.0.values().cloned().collect();
        modules.sort_by(|a, b| a.path.cmp(&b.path));
        for module in &mut modules {
            module.vulns.sort_by(|a, b| a.id.cmp(&b.id));
        }
        modules
    }
}

impl FromIterator<Module> for ModulesIndex {
    fn from_iter<I: IntoIterator<Item = Module>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|module| (module.path.clone(), module))
                .collect(),
        )
    }
}

impl Serialize for ModulesIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sorted())
    }
}

impl<'de> Deserialize<'de> for ModulesIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let modules = Vec::<Module>::deserialize(deserializer)?;
        Ok(modules.into_iter().collect())
    }
}

/// A Go module with one or more vulnerabilities in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub path: String,
    pub vulns: Vec<ModuleVuln>,
}

impl Module {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            vulns: Vec::new(),
        }
    }
}

/// Metadata about one vulnerability affecting a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleVuln {
    pub id: String,
    pub modified: DateTime<Utc>,
    /// Latest version introducing a fix, with no "v" prefix. Any version at
    /// or above it is unaffected; absent when no such version is known
    /// (see `latest_fixed_version`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<String>,
}
