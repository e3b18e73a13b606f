//! SAUCE record with its optional comment block, and body extraction.
//!
//! A file carrying SAUCE metadata looks like this, reading from the end:
//!
//! ```text
//! [body bytes]
//! [0x1A EOF marker]          (conventional, not required)
//! ["COMNT" + N * 64 bytes]   (only when the record declares N > 0)
//! [128 byte SAUCE record]
//! ```
//!
//! Extraction never fails. A missing or damaged record leaves the whole input
//! as body; a damaged comment block only costs the comments.
//!
//! ```
//! use ansiview::{SauceRecordBuilder, extract};
//! use bstr::BString;
//!
//! let mut file = b"\x1b[31mHello".to_vec();
//! let record = SauceRecordBuilder::default()
//!     .title(BString::from("DEMO"))?
//!     .build();
//! file.extend(record.to_bytes_without_eof());
//!
//! let (body, sauce) = extract(&file);
//! assert_eq!(body, b"\x1b[31mHello");
//! assert_eq!(sauce.unwrap().title(), &BString::from("DEMO"));
//! # Ok::<(), ansiview::AnsiViewError>(())
//! ```

use std::io::Write;

use bstr::BString;

use crate::header::{HDR_LEN, SauceHeader};
use crate::limits::MAX_COMMENT_LENGTH;
use crate::util::{sauce_pad, trim_spaces};
use crate::{CharacterCapabilities, EOF_CHAR, SauceDataType, SauceDate, cp437};

pub(crate) const COMMENT_ID_LEN: usize = 5;
pub(crate) const COMMENT_ID: &[u8; COMMENT_ID_LEN] = b"COMNT";

/// Parsed SAUCE metadata: the header fields plus any comment lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SauceRecord {
    pub(crate) header: SauceHeader,
    pub(crate) comments: Vec<BString>,
}

/// Split `data` into its body and its SAUCE metadata.
///
/// The body is every byte in front of the metadata region. Without a valid
/// record the body is all of `data` and the metadata is `None`. In all cases
/// `body.len() + record.record_len() == data.len()`.
pub fn extract(data: &[u8]) -> (&[u8], Option<SauceRecord>) {
    match SauceRecord::from_bytes(data) {
        Some(record) => {
            let body = &data[..data.len() - record.record_len()];
            (body, Some(record))
        }
        None => (data, None),
    }
}

/// The body of `data` without its SAUCE metadata.
pub fn strip_sauce(data: &[u8]) -> &[u8] {
    extract(data).0
}

impl SauceRecord {
    /// Parse the record at the end of `data`.
    ///
    /// Returns `None` when there is no record. When the record declares
    /// comments but the block is truncated or lacks its `COMNT` marker, the
    /// record is still returned, without comments.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        let mut header = SauceHeader::from_bytes(data)?;
        let declared = header.comments as usize;
        let mut comments = Vec::new();

        if declared > 0 {
            let block_len = COMMENT_ID_LEN + declared * MAX_COMMENT_LENGTH;
            let record_start = data.len() - HDR_LEN;
            match record_start.checked_sub(block_len) {
                Some(block_start) if &data[block_start..block_start + COMMENT_ID_LEN] == COMMENT_ID => {
                    comments = data[block_start + COMMENT_ID_LEN..record_start]
                        .chunks_exact(MAX_COMMENT_LENGTH)
                        .map(trim_spaces)
                        .collect();
                }
                Some(_) => {
                    log::warn!("SAUCE comment block missing COMNT ID - ignoring comments");
                }
                None => {
                    log::warn!(
                        "SAUCE record declares {declared} comment lines but the file is too short - ignoring comments"
                    );
                }
            }
            if comments.is_empty() {
                header.comments = 0;
            }
        }

        let record = SauceRecord { header, comments };
        let region = record.record_len();
        if data.len() > region && data[data.len() - region - 1] != EOF_CHAR {
            log::warn!("Missing EOF marker before SAUCE record");
        }
        Some(record)
    }

    /// Bytes taken by the record and its comment block, without EOF marker.
    pub fn record_len(&self) -> usize {
        if self.comments.is_empty() {
            HDR_LEN
        } else {
            HDR_LEN + COMMENT_ID_LEN + self.comments.len() * MAX_COMMENT_LENGTH
        }
    }

    /// Write EOF marker, comment block and record.
    ///
    /// # Errors
    ///
    /// Propagates write errors of `writer`.
    pub fn write<W: Write>(&self, writer: &mut W) -> crate::Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// EOF marker, comment block and record as one buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.record_len() + 1);
        out.push(EOF_CHAR);
        out.extend(self.to_bytes_without_eof());
        out
    }

    /// Comment block and record, without the leading EOF marker.
    pub fn to_bytes_without_eof(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.record_len());
        if !self.comments.is_empty() {
            out.extend(COMMENT_ID);
            for comment in &self.comments {
                out.extend(sauce_pad(comment, MAX_COMMENT_LENGTH));
            }
        }
        let mut header = self.header.clone();
        header.comments = self.comments.len() as u8;
        out.extend(header.to_bytes());
        out
    }

    pub fn header(&self) -> &SauceHeader {
        &self.header
    }

    /// Always `"00"`; other versions are not recognized as SAUCE.
    pub fn version(&self) -> &'static str {
        "00"
    }

    pub fn title(&self) -> &BString {
        &self.header.title
    }

    pub fn author(&self) -> &BString {
        &self.header.author
    }

    pub fn group(&self) -> &BString {
        &self.header.group
    }

    pub fn date(&self) -> SauceDate {
        self.header.date
    }

    pub fn file_size(&self) -> u32 {
        self.header.file_size
    }

    pub fn data_type(&self) -> SauceDataType {
        self.header.data_type
    }

    pub fn comments(&self) -> &[BString] {
        &self.comments
    }

    /// Title decoded from CP437.
    pub fn title_text(&self) -> String {
        cp437::decode_bytes(&self.header.title)
    }

    /// Author decoded from CP437.
    pub fn author_text(&self) -> String {
        cp437::decode_bytes(&self.header.author)
    }

    /// Group decoded from CP437.
    pub fn group_text(&self) -> String {
        cp437::decode_bytes(&self.header.group)
    }

    /// Comment lines decoded from CP437.
    pub fn comment_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.comments.iter().map(|c| cp437::decode_bytes(c))
    }

    /// Display hints, if this record describes character art.
    pub fn character_capabilities(&self) -> Option<CharacterCapabilities> {
        CharacterCapabilities::try_from(&self.header).ok()
    }
}
