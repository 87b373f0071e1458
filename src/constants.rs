//! Centralized constants for field names, limits, and file modes.

/// Reserved entry field holding the binary attachment.
pub const ATTACHMENT_FIELD: &str = "attachment";

/// Entry field used as the entry's display identity.
pub const TITLE_FIELD: &str = "title";

/// Well-known text fields printed by `show`, in display order.
pub const URL_FIELD: &str = "url";
pub const USERNAME_FIELD: &str = "username";
pub const PASSWORD_FIELD: &str = "password";
pub const NOTES_FIELD: &str = "notes";

/// Default upper bound for attachment payloads (16 MiB).
pub const DEFAULT_MAX_ATTACHMENT_SIZE: usize = 16 * 1_048_576;

/// Default text appended to the current group name in the prompt.
pub const DEFAULT_PROMPT_SUFFIX: &str = " > ";

/// Permission mode for the database file and extracted attachments.
pub const SECRET_FILE_MODE: u32 = 0o600;

/// Suffix of the advisory lock file placed next to the database.
pub const LOCK_SUFFIX: &str = ".lock";

/// Placeholder printed instead of the password unless `show -f` is used.
pub const REDACTED: &str = "[redacted]";
