use bstr::BString;

use crate::limits::{
    MAX_AUTHOR_LENGTH, MAX_COMMENT_LENGTH, MAX_COMMENTS, MAX_GROUP_LENGTH, MAX_TITLE_LENGTH,
};
use crate::{
    AnsiViewError, CharacterCapabilities, SauceDataType, SauceDate, SauceRecord,
    header::SauceHeader,
};

/// Builds valid SAUCE records, checking every field against its width.
///
/// ```
/// use ansiview::{CharacterCapabilities, CharacterFormat, SauceRecordBuilder};
/// use bstr::BString;
///
/// let mut caps = CharacterCapabilities::new(CharacterFormat::Ansi);
/// caps.ice_colors = true;
/// let record = SauceRecordBuilder::default()
///     .title(BString::from("Sunset"))?
///     .author(BString::from("Artist"))?
///     .character_capabilities(caps)?
///     .add_comment(BString::from("drawn in 1996"))?
///     .build();
/// assert_eq!(record.comments().len(), 1);
/// # Ok::<(), ansiview::AnsiViewError>(())
/// ```
#[derive(Debug)]
pub struct SauceRecordBuilder {
    header: SauceHeader,
    comments: Vec<BString>,
}

impl Default for SauceRecordBuilder {
    fn default() -> Self {
        Self {
            header: SauceHeader {
                data_type: SauceDataType::Character,
                ..Default::default()
            },
            comments: Vec::new(),
        }
    }
}

impl SauceRecordBuilder {
    /// # Errors
    ///
    /// [`AnsiViewError::TitleTooLong`] over 35 bytes.
    pub fn title(mut self, title: BString) -> crate::Result<Self> {
        if title.len() > MAX_TITLE_LENGTH {
            return Err(AnsiViewError::TitleTooLong(title.len()));
        }
        self.header.title = title;
        Ok(self)
    }

    /// # Errors
    ///
    /// [`AnsiViewError::AuthorTooLong`] over 20 bytes.
    pub fn author(mut self, author: BString) -> crate::Result<Self> {
        if author.len() > MAX_AUTHOR_LENGTH {
            return Err(AnsiViewError::AuthorTooLong(author.len()));
        }
        self.header.author = author;
        Ok(self)
    }

    /// # Errors
    ///
    /// [`AnsiViewError::GroupTooLong`] over 20 bytes.
    pub fn group(mut self, group: BString) -> crate::Result<Self> {
        if group.len() > MAX_GROUP_LENGTH {
            return Err(AnsiViewError::GroupTooLong(group.len()));
        }
        self.header.group = group;
        Ok(self)
    }

    pub fn date(mut self, date: SauceDate) -> Self {
        self.header.date = date;
        self
    }

    pub fn file_size(mut self, file_size: u32) -> Self {
        self.header.file_size = file_size;
        self
    }

    pub fn data_type(mut self, data_type: SauceDataType) -> Self {
        self.header.data_type = data_type;
        self
    }

    /// Store the character art hints in the type dependent fields.
    ///
    /// # Errors
    ///
    /// [`AnsiViewError::UnsupportedDataType`] unless the data type is
    /// [`SauceDataType::Character`].
    pub fn character_capabilities(mut self, caps: CharacterCapabilities) -> crate::Result<Self> {
        caps.encode_into_header(&mut self.header)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// [`AnsiViewError::CommentLimitExceeded`] past 255 lines,
    /// [`AnsiViewError::CommentTooLong`] over 64 bytes.
    pub fn add_comment(mut self, comment: BString) -> crate::Result<Self> {
        if self.comments.len() >= MAX_COMMENTS {
            return Err(AnsiViewError::CommentLimitExceeded);
        }
        if comment.len() > MAX_COMMENT_LENGTH {
            return Err(AnsiViewError::CommentTooLong(comment.len()));
        }
        self.comments.push(comment);
        self.header.comments = self.comments.len() as u8;
        Ok(self)
    }

    pub fn build(self) -> SauceRecord {
        SauceRecord {
            header: self.header,
            comments: self.comments,
        }
    }
}
