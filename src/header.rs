//! The fixed 128-byte SAUCE record.
//!
//! | Offset | Length | Field    | Type     |
//! |--------|--------|----------|----------|
//! | 0      | 5      | ID       | "SAUCE"  |
//! | 5      | 2      | Version  | "00"     |
//! | 7      | 35     | Title    | char[35] |
//! | 42     | 20     | Author   | char[20] |
//! | 62     | 20     | Group    | char[20] |
//! | 82     | 8      | Date     | CCYYMMDD |
//! | 90     | 4      | FileSize | u32 LE   |
//! | 94     | 1      | DataType | u8       |
//! | 95     | 1      | FileType | u8       |
//! | 96     | 2      | TInfo1   | u16 LE   |
//! | 98     | 2      | TInfo2   | u16 LE   |
//! | 100    | 2      | TInfo3   | u16 LE   |
//! | 102    | 2      | TInfo4   | u16 LE   |
//! | 104    | 1      | Comments | u8       |
//! | 105    | 1      | TFlags   | u8       |
//! | 106    | 22     | TInfoS   | char[22] |
//!
//! Fields are located by offset only; nothing in the record is delimited.

use bstr::BString;

use crate::limits::{MAX_AUTHOR_LENGTH, MAX_FONT_NAME_LENGTH, MAX_GROUP_LENGTH, MAX_TITLE_LENGTH};
use crate::util::{sauce_pad, trim_spaces, zero_pad, zero_trim};
use crate::{SauceDataType, SauceDate};

pub(crate) const HDR_LEN: usize = 128;
pub(crate) const SAUCE_ID: &[u8; 5] = b"SAUCE";
pub(crate) const SAUCE_VERSION: &[u8; 2] = b"00";

const TITLE_OFFSET: usize = 7;
const AUTHOR_OFFSET: usize = TITLE_OFFSET + MAX_TITLE_LENGTH;
const GROUP_OFFSET: usize = AUTHOR_OFFSET + MAX_AUTHOR_LENGTH;
const DATE_OFFSET: usize = GROUP_OFFSET + MAX_GROUP_LENGTH;
const FILE_SIZE_OFFSET: usize = 90;
const DATA_TYPE_OFFSET: usize = 94;
const FILE_TYPE_OFFSET: usize = 95;
const TINFO1_OFFSET: usize = 96;
const COMMENTS_OFFSET: usize = 104;
const TFLAGS_OFFSET: usize = 105;
const TINFOS_OFFSET: usize = 106;

/// Raw SAUCE header fields.
///
/// String fields are kept as raw CP437 bytes with their padding removed;
/// [`SauceRecord`](crate::SauceRecord) offers decoded accessors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SauceHeader {
    pub title: BString,
    pub author: BString,
    pub group: BString,
    pub date: SauceDate,
    /// Size of the file body, without EOF marker, comments and record.
    pub file_size: u32,
    pub data_type: SauceDataType,
    /// Meaning depends on `data_type`; for character art 1 is ANSI.
    pub file_type: u8,
    pub t_info1: u16,
    pub t_info2: u16,
    pub t_info3: u16,
    pub t_info4: u16,
    /// Declared number of 64 byte comment lines.
    pub comments: u8,
    pub t_flags: u8,
    pub t_info_s: BString,
}

impl SauceHeader {
    /// Parse the header from the last 128 bytes of `data`.
    ///
    /// Returns `None` when `data` is too short, the `SAUCE` tag is missing or
    /// the version is not `00`. There is no error case: a bad tag simply
    /// means the tail is ordinary content.
    #[must_use]
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < HDR_LEN {
            return None;
        }
        let header = &data[data.len() - HDR_LEN..];
        if &header[..5] != SAUCE_ID {
            return None;
        }
        if &header[5..7] != SAUCE_VERSION {
            log::warn!(
                "SAUCE record with unsupported version {:?} - treating as content",
                BString::from(&header[5..7])
            );
            return None;
        }

        let u16_at = |offset: usize| u16::from_le_bytes([header[offset], header[offset + 1]]);

        let date_bytes = &header[DATE_OFFSET..FILE_SIZE_OFFSET];
        let date = SauceDate::from_bytes(date_bytes).unwrap_or_else(|| {
            log::debug!("Unparsable SAUCE date {:?}", BString::from(date_bytes));
            SauceDate::default()
        });

        Some(Self {
            title: trim_spaces(&header[TITLE_OFFSET..AUTHOR_OFFSET]),
            author: trim_spaces(&header[AUTHOR_OFFSET..GROUP_OFFSET]),
            group: trim_spaces(&header[GROUP_OFFSET..DATE_OFFSET]),
            date,
            file_size: u32::from_le_bytes([
                header[FILE_SIZE_OFFSET],
                header[FILE_SIZE_OFFSET + 1],
                header[FILE_SIZE_OFFSET + 2],
                header[FILE_SIZE_OFFSET + 3],
            ]),
            data_type: SauceDataType::from(header[DATA_TYPE_OFFSET]),
            file_type: header[FILE_TYPE_OFFSET],
            t_info1: u16_at(TINFO1_OFFSET),
            t_info2: u16_at(TINFO1_OFFSET + 2),
            t_info3: u16_at(TINFO1_OFFSET + 4),
            t_info4: u16_at(TINFO1_OFFSET + 6),
            comments: header[COMMENTS_OFFSET],
            t_flags: header[TFLAGS_OFFSET],
            t_info_s: zero_trim(&header[TINFOS_OFFSET..]),
        })
    }

    /// Serialize to exactly 128 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HDR_LEN);
        out.extend(SAUCE_ID);
        out.extend(SAUCE_VERSION);
        out.extend(sauce_pad(&self.title, MAX_TITLE_LENGTH));
        out.extend(sauce_pad(&self.author, MAX_AUTHOR_LENGTH));
        out.extend(sauce_pad(&self.group, MAX_GROUP_LENGTH));
        out.extend(self.date.to_bytes());
        out.extend(self.file_size.to_le_bytes());
        out.push(self.data_type.into());
        out.push(self.file_type);
        out.extend(self.t_info1.to_le_bytes());
        out.extend(self.t_info2.to_le_bytes());
        out.extend(self.t_info3.to_le_bytes());
        out.extend(self.t_info4.to_le_bytes());
        out.push(self.comments);
        out.push(self.t_flags);
        out.extend(zero_pad(&self.t_info_s, MAX_FONT_NAME_LENGTH));
        debug_assert_eq!(out.len(), HDR_LEN);
        out
    }
}
