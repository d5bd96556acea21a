use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

/// Which dependency map of `package.json` an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencySection {
    Dependencies,
    DevDependencies,
}

impl DependencySection {
    /// The JSON key of the section.
    pub fn key(self) -> &'static str {
        match self {
            DependencySection::Dependencies => "dependencies",
            DependencySection::DevDependencies => "devDependencies",
        }
    }
}

impl fmt::Display for DependencySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A project `package.json`.
///
/// The whole document is kept as an ordered JSON object so fields lnk does not
/// know about (`name`, `scripts`, ...) survive a rewrite in their original order.
/// Both dependency maps are checked to be objects of strings on load, which
/// keeps every accessor below infallible.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Manifest {
    fields: Map<String, Value>,
}

/// The subset of a module's own `package.json` lnk reads.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ModulePackage {
    pub version: Option<String>,
}

impl Manifest {
    /// Parse manifest text read from `path`.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| Error::manifest(path, "not valid JSON", e))?;

        let Value::Object(fields) = value else {
            return Err(Error::malformed_manifest(path, "top level is not an object"));
        };

        for section in [
            DependencySection::Dependencies,
            DependencySection::DevDependencies,
        ] {
            match fields.get(section.key()) {
                None => {}
                Some(Value::Object(map)) => {
                    if let Some((name, _)) = map.iter().find(|(_, v)| !v.is_string()) {
                        return Err(Error::malformed_manifest(
                            path,
                            format!("\"{}\" in {} is not a version string", name, section),
                        ));
                    }
                }
                Some(_) => {
                    return Err(Error::malformed_manifest(
                        path,
                        format!("{} is not an object", section),
                    ));
                }
            }
        }

        Ok(Self { fields })
    }

    /// The manifest's own `version` field.
    #[cfg(test)]
    pub(crate) fn version(&self) -> Option<&str> {
        self.fields.get("version").and_then(Value::as_str)
    }

    fn section(&self, section: DependencySection) -> Option<&Map<String, Value>> {
        self.fields.get(section.key()).and_then(Value::as_object)
    }

    /// Snapshot of `(name, range)` pairs of a section in insertion order.
    pub fn entries(&self, section: DependencySection) -> Vec<(String, String)> {
        self.section(section)
            .map(|map| {
                map.iter()
                    .filter_map(|(name, range)| {
                        range.as_str().map(|r| (name.clone(), r.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether `name` is a key of the section.
    pub fn contains(&self, section: DependencySection, name: &str) -> bool {
        self.section(section)
            .is_some_and(|map| map.contains_key(name))
    }

    /// The range recorded for `name` in the section.
    #[cfg(test)]
    pub(crate) fn get(&self, section: DependencySection, name: &str) -> Option<&str> {
        self.section(section)
            .and_then(|map| map.get(name))
            .and_then(Value::as_str)
    }

    /// The section `name` is currently recorded in, devDependencies first.
    pub fn section_of(&self, name: &str) -> Option<DependencySection> {
        [
            DependencySection::DevDependencies,
            DependencySection::Dependencies,
        ]
        .into_iter()
        .find(|section| self.contains(*section, name))
    }

    /// Record `range` for `name`, creating the section if needed.
    ///
    /// Existing keys keep their position; new keys are appended.
    /// Returns the previously recorded range.
    pub fn set(&mut self, section: DependencySection, name: &str, range: &str) -> Option<String> {
        let entry = self
            .fields
            .entry(section.key())
            .or_insert_with(|| Value::Object(Map::new()));

        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }

        match entry {
            Value::Object(map) => map
                .insert(name.to_string(), Value::String(range.to_string()))
                .and_then(|old| old.as_str().map(str::to_string)),
            _ => None,
        }
    }

    /// Serialize as pretty JSON indented with tabs.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.fields.serialize(&mut serializer)?;
        // serde_json only ever writes UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl ModulePackage {
    /// Parse a module's `package.json` read from `path`.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::manifest(path, "not a valid package.json", e))
    }

    /// The declared version, treating an empty string as absent.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref().filter(|v| !v.is_empty())
    }
}
