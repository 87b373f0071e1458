use crate::cli::host::Host;
use crate::cli::Session;
use crate::constants;
use crate::core::resolver;
use crate::error::{ShellError, ShellResult};

/// Print an entry's well-known fields. The password is redacted unless
/// `full` is set.
pub fn run(session: &Session, host: &mut dyn Host, path: &str, full: bool) -> ShellResult<()> {
    let (group, index) = resolver::resolve_entry(&session.db, session.cursor, path)?;
    let entry = session
        .db
        .entry(group, index)
        .ok_or_else(|| ShellError::EntryNotFound(path.to_string()))?;

    let field = |name: &str| entry.text(name).unwrap_or("").to_string();
    let password = if full {
        field(constants::PASSWORD_FIELD)
    } else {
        constants::REDACTED.to_string()
    };

    host.println(&format!("Title: {}", entry.title()));
    host.println(&format!("URL: {}", field(constants::URL_FIELD)));
    host.println(&format!("Username: {}", field(constants::USERNAME_FIELD)));
    host.println(&format!("Password: {}", password));
    host.println(&format!("Notes: {}", field(constants::NOTES_FIELD)));
    if let Ok(attachment) = entry.attachment() {
        host.println(&format!("Attachment: {}", attachment.name));
    }
    Ok(())
}
