//! Landsat MTL metadata parser
//!
//! MTL files are flat `KEY = VALUE` lines nested with
//! `GROUP = NAME` / `END_GROUP = NAME` pairs and terminated by a bare `END`.

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::metadata::errors::{MetadataError, MetadataResult};

lazy_static! {
    static ref ASSIGNMENT: Regex = Regex::new(r"^\s*([A-Za-z0-9_]+)\s*=\s*(.*?)\s*$").unwrap();
}

const GROUP_KEY: &str = "GROUP";
const END_GROUP_KEY: &str = "END_GROUP";
const END_MARKER: &str = "END";

/// A value in an MTL file
#[derive(Debug, Clone, PartialEq)]
pub enum MtlValue {
    /// A scalar field, quotes removed
    Field(String),
    /// A nested group
    Group(MtlGroup),
}

/// A named group of MTL entries, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MtlGroup {
    name: String,
    entries: Vec<(String, MtlValue)>,
}

impl MtlGroup {
    fn new(name: &str) -> Self {
        MtlGroup {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in file order
    pub fn entries(&self) -> &[(String, MtlValue)] {
        &self.entries
    }

    /// First entry with the given key
    pub fn get(&self, key: &str) -> Option<&MtlValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// First sub-group with the given name
    pub fn group(&self, key: &str) -> Option<&MtlGroup> {
        match self.get(key)? {
            MtlValue::Group(group) => Some(group),
            MtlValue::Field(_) => None,
        }
    }

    /// First scalar field with the given key
    pub fn field(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            MtlValue::Field(value) => Some(value),
            MtlValue::Group(_) => None,
        }
    }

    /// Follow a path of group names ending in a field
    pub fn lookup(&self, path: &[&str]) -> Option<&str> {
        let (last, groups) = path.split_last()?;
        let mut current = self;
        for name in groups {
            current = current.group(name)?;
        }
        current.field(last)
    }

    /// Depth-first search for a field anywhere below this group
    pub fn find_field(&self, key: &str) -> Option<&str> {
        for (k, value) in &self.entries {
            match value {
                MtlValue::Field(v) if k == key => return Some(v),
                MtlValue::Group(group) => {
                    if let Some(v) = group.find_field(key) {
                        return Some(v);
                    }
                }
                MtlValue::Field(_) => {}
            }
        }
        None
    }
}

/// A parsed MTL file
#[derive(Debug, Clone, PartialEq)]
pub struct MtlDocument {
    root: MtlGroup,
}

impl MtlDocument {
    /// Parse MTL text
    ///
    /// # Errors
    /// `ParseError` for a line that is not an assignment, an `END_GROUP` that
    /// does not close the innermost open group, or a group left open.
    pub fn parse(content: &str) -> MetadataResult<Self> {
        let mut stack = vec![MtlGroup::default()];

        for (index, raw_line) in content.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            if line == END_MARKER {
                break;
            }

            let captures = ASSIGNMENT.captures(line).ok_or_else(|| {
                MetadataError::ParseError(format!("line {}: expected KEY = VALUE, found {:?}", line_number, line))
            })?;
            let key = &captures[1];
            let value = unquote(&captures[2]);

            match key {
                GROUP_KEY => stack.push(MtlGroup::new(value)),
                END_GROUP_KEY => {
                    if stack.len() == 1 {
                        return Err(MetadataError::ParseError(format!(
                            "line {}: END_GROUP = {} without an open group",
                            line_number, value
                        )));
                    }
                    let group = stack.pop().unwrap_or_default();
                    if group.name != value {
                        return Err(MetadataError::ParseError(format!(
                            "line {}: END_GROUP = {} does not close group {}",
                            line_number, value, group.name
                        )));
                    }
                    if let Some(parent) = stack.last_mut() {
                        parent.entries.push((group.name.clone(), MtlValue::Group(group)));
                    }
                }
                _ => {
                    if let Some(current) = stack.last_mut() {
                        current.entries.push((key.to_string(), MtlValue::Field(value.to_string())));
                    }
                }
            }
        }

        if stack.len() != 1 {
            let open: Vec<&str> = stack[1..].iter().map(|g| g.name.as_str()).collect();
            return Err(MetadataError::ParseError(format!(
                "unterminated group(s): {}",
                open.join(", ")
            )));
        }

        let root = stack.pop().unwrap_or_default();
        debug!("Parsed MTL with {} top-level entries", root.entries.len());
        Ok(MtlDocument { root })
    }

    /// Read and parse an MTL file
    pub fn from_file<P: AsRef<Path>>(path: P) -> MetadataResult<Self> {
        let path = path.as_ref();
        debug!("Reading MTL file {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Top-level entries
    pub fn root(&self) -> &MtlGroup {
        &self.root
    }

    /// Follow a path from the top level, see [`MtlGroup::lookup`]
    pub fn lookup(&self, path: &[&str]) -> Option<&str> {
        self.root.lookup(path)
    }
}

/// Strip one pair of surrounding double quotes
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
