//! On-disk database document.
//!
//! The tree is stored as TOML: nested group tables, each entry an ordered list
//! of fields. Binary payloads are standard base64.

use crate::constants;
use crate::core::tree::{Database, GroupId};
use crate::models::entry::Entry;
use crate::models::value::{FieldData, Value};
use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;
use zeroize::{Zeroize, Zeroizing};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[derive(Debug, Serialize, Deserialize)]
struct DatabaseFile {
    #[serde(default = "default_version")]
    version: u32,
    root: GroupRecord,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct GroupRecord {
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    groups: Vec<GroupRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    entries: Vec<EntryRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct EntryRecord {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FieldRecord {
    key: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    binary: Option<String>,
}

impl FieldRecord {
    fn wipe(&mut self) {
        self.text.zeroize();
        self.binary.zeroize();
    }
}

impl Drop for FieldRecord {
    fn drop(&mut self) {
        self.wipe();
    }
}

fn default_version() -> u32 {
    1
}

/// Read and parse the database at `path`.
pub fn load(path: &Path) -> Result<Database> {
    let content = Zeroizing::new(
        fs::read_to_string(path).with_context(|| format!("read database {}", path.display()))?,
    );
    let file: DatabaseFile = toml::from_str(&content)
        .with_context(|| format!("parse database {}", path.display()))?;
    if file.version != 1 {
        bail!("unsupported database version {} in {}", file.version, path.display());
    }

    let mut db = Database::new(&file.root.name);
    let root = db.root();
    fill_group(&mut db, root, &file.root)
        .with_context(|| format!("load database {}", path.display()))?;
    db.mark_clean();
    Ok(db)
}

/// An empty database whose root is named after the file stem.
pub fn create_empty(path: &Path) -> Database {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("root");
    Database::new(name)
}

/// Write the database atomically with owner-only permissions and clear the
/// dirty flag.
pub fn save(path: &Path, db: &mut Database) -> Result<()> {
    let file = DatabaseFile {
        version: default_version(),
        root: group_record(db, db.root()),
    };
    let content = Zeroizing::new(toml::to_string_pretty(&file).context("serialize database")?);
    drop(file);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).context("create temp database")?;
    tmp.write_all(content.as_bytes()).context("write database")?;
    tmp.flush().context("flush database")?;

    #[cfg(unix)]
    {
        let perm = fs::Permissions::from_mode(constants::SECRET_FILE_MODE);
        tmp.as_file()
            .set_permissions(perm)
            .context("set permissions on temp database")?;
    }

    tmp.persist(path)
        .map_err(|err| anyhow::anyhow!("persist database {}: {}", path.display(), err))?;
    db.mark_clean();
    info!(path = %path.display(), "database saved");
    Ok(())
}

fn fill_group(db: &mut Database, id: GroupId, record: &GroupRecord) -> Result<()> {
    for child in &record.groups {
        let child_id = db.new_subgroup(id, &child.name);
        fill_group(db, child_id, child)?;
    }
    for entry in &record.entries {
        db.add_entry(id, entry_from_record(entry)?);
    }
    Ok(())
}

fn entry_from_record(record: &EntryRecord) -> Result<Entry> {
    let mut entry = Entry::new();
    for field in &record.fields {
        let value = match (&field.text, &field.binary) {
            (Some(text), None) => Value::text(field.name.as_str(), text.as_str()),
            (None, Some(encoded)) => {
                let bytes = STANDARD
                    .decode(encoded)
                    .with_context(|| format!("decode binary field '{}'", field.key))?;
                Value::binary(field.name.as_str(), bytes)
            }
            _ => bail!("field '{}' must have exactly one of text or binary", field.key),
        };
        entry.set(&field.key, value);
    }
    Ok(entry)
}

fn group_record(db: &Database, id: GroupId) -> GroupRecord {
    let group = db.group(id);
    GroupRecord {
        name: group.name().to_string(),
        groups: group
            .groups()
            .iter()
            .map(|child| group_record(db, *child))
            .collect(),
        entries: group
            .entries()
            .iter()
            .map(|entry| EntryRecord {
                fields: entry
                    .fields()
                    .map(|(key, value)| {
                        let (text, binary) = match &value.data {
                            FieldData::Text(s) => (Some(s.clone()), None),
                            FieldData::Binary(b) => (None, Some(STANDARD.encode(b))),
                        };
                        FieldRecord {
                            key: key.to_string(),
                            name: value.name.clone(),
                            text,
                            binary,
                        }
                    })
                    .collect(),
            })
            .collect(),
    }
}
