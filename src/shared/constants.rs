/// Maximum size for an uploaded report file (10 MiB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Date format used in derived report filenames (MMDDYYYY)
pub const FILENAME_DATE_FORMAT: &str = "%m%d%Y";

/// Actor recorded on config updates when the caller leaves `updatedBy` blank
pub const DEFAULT_UPDATED_BY: &str = "Admin";
