//! SAUCE field widths.
//!
//! All string fields of a SAUCE record are fixed width. Text fields are space
//! padded, `TInfoS` is NUL padded. The builder validates against these limits
//! and the header parser slices by them.

/// Title field width.
pub const MAX_TITLE_LENGTH: usize = 35;

/// Author field width.
pub const MAX_AUTHOR_LENGTH: usize = 20;

/// Group field width.
pub const MAX_GROUP_LENGTH: usize = 20;

/// Width of one line in the comment block.
pub const MAX_COMMENT_LENGTH: usize = 64;

/// Comment line count is stored in a single byte.
pub const MAX_COMMENTS: usize = 255;

/// Date field width (`CCYYMMDD`).
pub const DATE_LENGTH: usize = 8;

/// `TInfoS` width, used as font name for character art.
pub const MAX_FONT_NAME_LENGTH: usize = 22;
