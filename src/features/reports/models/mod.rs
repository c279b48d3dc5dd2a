mod report_type;

pub use report_type::{
    default_recipient_entries, is_extension_allowed, is_mime_type_allowed, report_type,
    ReportType, ALLOWED_EXTENSIONS, ALLOWED_MIME_TYPES, REPORT_TYPES,
};
