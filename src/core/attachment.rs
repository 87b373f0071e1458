//! Attachment operations on a single entry.
//!
//! Callers locate the entry first; these functions only touch its reserved
//! attachment field and the filesystem.

use crate::constants;
use crate::core::tree::{Database, GroupId};
use crate::error::{ShellError, ShellResult};
use crate::models::entry::Entry;
use crate::models::value::Value;
use crate::util::fs as kp_fs;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;
use zeroize::Zeroize;

/// `Name: <name>\nSize: <n> bytes` for the entry's attachment.
pub fn details(entry: &Entry) -> ShellResult<String> {
    let attachment = entry.attachment()?;
    Ok(format!(
        "Name: {}\nSize: {} bytes",
        attachment.name,
        attachment.len()
    ))
}

/// Write the attachment payload to `output`, creating or truncating it.
/// Returns the number of bytes written.
pub fn write_to(attachment: &Value, output: &Path) -> ShellResult<usize> {
    let bytes = attachment
        .as_bytes()
        .ok_or_else(|| ShellError::WrongFieldType(constants::ATTACHMENT_FIELD.to_string()))?;
    let mut file =
        kp_fs::create_secret_file(output).map_err(|e| ShellError::io("open", output, e))?;
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|e| ShellError::io("write to", output, e))?;
    Ok(bytes.len())
}

/// Read `source` and store it as the attachment of entry `index` in `group`,
/// replacing any previous attachment. Marks the database dirty.
pub fn create(
    db: &mut Database,
    group: GroupId,
    index: usize,
    name: &str,
    source: &Path,
    max_size: usize,
) -> ShellResult<()> {
    let size = fs::metadata(source)
        .map_err(|e| ShellError::io("open", source, e))?
        .len();
    if size > max_size as u64 {
        return Err(ShellError::TooLarge {
            size,
            max: max_size,
        });
    }
    // Metadata lies for pipes and devices; cap what is actually read.
    let mut data = Vec::new();
    File::open(source)
        .map_err(|e| ShellError::io("open", source, e))?
        .take(max_size as u64 + 1)
        .read_to_end(&mut data)
        .map_err(|e| ShellError::io("read", source, e))?;
    let len = data.len();
    if len > max_size {
        data.zeroize();
        return Err(ShellError::TooLarge {
            size: len as u64,
            max: max_size,
        });
    }

    let replaced = db
        .set_entry_field(group, index, constants::ATTACHMENT_FIELD, Value::binary(name, data))
        .ok_or_else(|| ShellError::EntryNotFound(index.to_string()))?;
    info!(
        attachment = name,
        bytes = len,
        replaced,
        source = %source.display(),
        "attachment stored"
    );
    Ok(())
}
