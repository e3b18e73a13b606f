//! Display hints for character art, decoded from the type dependent fields.
//!
//! For `DataType = Character` the header carries the canvas size in
//! `TInfo1`/`TInfo2`, the ANSI flags in `TFlags` and a font name in `TInfoS`.
//! The viewer uses the width for wrapping and the iCE flag to decide whether
//! SGR 5 means blink or bright background.

use bstr::BString;

use crate::limits::MAX_FONT_NAME_LENGTH;
use crate::{AnsiViewError, SauceDataType, header::SauceHeader};

/// Bit 0: non-blink mode, the blink bit selects bright backgrounds.
const ANSI_FLAG_NON_BLINK_MODE: u8 = 0b0000_0001;
const ANSI_MASK_LETTER_SPACING: u8 = 0b0000_0110;
const ANSI_LETTER_SPACING_8PX: u8 = 0b0000_0010;
const ANSI_LETTER_SPACING_9PX: u8 = 0b0000_0100;
const ANSI_MASK_ASPECT_RATIO: u8 = 0b0001_1000;
const ANSI_ASPECT_RATIO_STRETCH: u8 = 0b0000_1000;
const ANSI_ASPECT_RATIO_SQUARE: u8 = 0b0001_0000;

/// The `FileType` of a character file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterFormat {
    Ascii,
    Ansi,
    AnsiMation,
    RipScript,
    PCBoard,
    Avatar,
    Html,
    Source,
    TundraDraw,
    Unknown(u8),
}

impl CharacterFormat {
    pub fn from_sauce(file_type: u8) -> Self {
        match file_type {
            0 => CharacterFormat::Ascii,
            1 => CharacterFormat::Ansi,
            2 => CharacterFormat::AnsiMation,
            3 => CharacterFormat::RipScript,
            4 => CharacterFormat::PCBoard,
            5 => CharacterFormat::Avatar,
            6 => CharacterFormat::Html,
            7 => CharacterFormat::Source,
            8 => CharacterFormat::TundraDraw,
            _ => CharacterFormat::Unknown(file_type),
        }
    }

    pub fn to_sauce(self) -> u8 {
        match self {
            CharacterFormat::Ascii => 0,
            CharacterFormat::Ansi => 1,
            CharacterFormat::AnsiMation => 2,
            CharacterFormat::RipScript => 3,
            CharacterFormat::PCBoard => 4,
            CharacterFormat::Avatar => 5,
            CharacterFormat::Html => 6,
            CharacterFormat::Source => 7,
            CharacterFormat::TundraDraw => 8,
            CharacterFormat::Unknown(ft) => ft,
        }
    }

    /// Only ASCII, ANSI and ANSiMation define `TFlags` and `TInfoS`.
    pub fn supports_ansi_flags(self) -> bool {
        matches!(
            self,
            CharacterFormat::Ascii | CharacterFormat::Ansi | CharacterFormat::AnsiMation
        )
    }

    /// Whether `TInfo1`/`TInfo2` hold a character grid size.
    pub fn has_dimensions(self) -> bool {
        !matches!(
            self,
            CharacterFormat::RipScript | CharacterFormat::Html | CharacterFormat::Source
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterSpacing {
    Legacy,
    EightPixel,
    NinePixel,
    Reserved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Legacy,
    /// Pixels need vertical stretching, as on period CRT monitors.
    LegacyDevice,
    Square,
    Reserved,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterCapabilities {
    pub format: CharacterFormat,
    /// Canvas width in characters, 0 when unknown.
    pub columns: u16,
    /// Canvas height in lines, 0 when unknown.
    pub lines: u16,
    pub ice_colors: bool,
    pub letter_spacing: LetterSpacing,
    pub aspect_ratio: AspectRatio,
    font_opt: Option<BString>,
}

impl CharacterCapabilities {
    pub fn new(format: CharacterFormat) -> Self {
        CharacterCapabilities {
            format,
            columns: 80,
            lines: 25,
            ice_colors: false,
            letter_spacing: LetterSpacing::Legacy,
            aspect_ratio: AspectRatio::Legacy,
            font_opt: None,
        }
    }

    pub fn font(&self) -> Option<&BString> {
        self.font_opt.as_ref()
    }

    /// Set the font name; an empty name removes it.
    ///
    /// # Errors
    ///
    /// [`AnsiViewError::FontNameTooLong`] for names over 22 bytes.
    pub fn set_font(&mut self, font: BString) -> crate::Result<()> {
        if font.len() > MAX_FONT_NAME_LENGTH {
            return Err(AnsiViewError::FontNameTooLong(font.len()));
        }
        self.font_opt = if font.is_empty() { None } else { Some(font) };
        Ok(())
    }

    pub(crate) fn encode_into_header(&self, header: &mut SauceHeader) -> crate::Result<()> {
        if header.data_type != SauceDataType::Character {
            return Err(AnsiViewError::UnsupportedDataType(header.data_type));
        }
        header.file_type = self.format.to_sauce();
        header.t_info3 = 0;
        header.t_info4 = 0;
        header.t_flags = 0;
        header.t_info_s.clear();
        if self.format.has_dimensions() {
            header.t_info1 = self.columns;
            header.t_info2 = self.lines;
        } else {
            header.t_info1 = 0;
            header.t_info2 = 0;
        }
        if self.format.supports_ansi_flags() {
            if self.ice_colors {
                header.t_flags |= ANSI_FLAG_NON_BLINK_MODE;
            }
            header.t_flags |= match self.letter_spacing {
                LetterSpacing::EightPixel => ANSI_LETTER_SPACING_8PX,
                LetterSpacing::NinePixel => ANSI_LETTER_SPACING_9PX,
                LetterSpacing::Legacy | LetterSpacing::Reserved => 0,
            };
            header.t_flags |= match self.aspect_ratio {
                AspectRatio::LegacyDevice => ANSI_ASPECT_RATIO_STRETCH,
                AspectRatio::Square => ANSI_ASPECT_RATIO_SQUARE,
                AspectRatio::Legacy | AspectRatio::Reserved => 0,
            };
            if let Some(font) = &self.font_opt {
                header.t_info_s.clone_from(font);
            }
        }
        Ok(())
    }
}

impl TryFrom<&SauceHeader> for CharacterCapabilities {
    type Error = AnsiViewError;

    fn try_from(header: &SauceHeader) -> crate::Result<Self> {
        if header.data_type != SauceDataType::Character {
            return Err(AnsiViewError::UnsupportedDataType(header.data_type));
        }
        let format = CharacterFormat::from_sauce(header.file_type);
        let mut caps = CharacterCapabilities::new(format);
        if format.has_dimensions() {
            caps.columns = header.t_info1;
            caps.lines = header.t_info2;
        } else if format != CharacterFormat::RipScript {
            caps.columns = 0;
            caps.lines = 0;
        }
        if format.supports_ansi_flags() {
            caps.ice_colors = header.t_flags & ANSI_FLAG_NON_BLINK_MODE != 0;
            caps.letter_spacing = match header.t_flags & ANSI_MASK_LETTER_SPACING {
                0 => LetterSpacing::Legacy,
                ANSI_LETTER_SPACING_8PX => LetterSpacing::EightPixel,
                ANSI_LETTER_SPACING_9PX => LetterSpacing::NinePixel,
                _ => LetterSpacing::Reserved,
            };
            caps.aspect_ratio = match header.t_flags & ANSI_MASK_ASPECT_RATIO {
                0 => AspectRatio::Legacy,
                ANSI_ASPECT_RATIO_STRETCH => AspectRatio::LegacyDevice,
                ANSI_ASPECT_RATIO_SQUARE => AspectRatio::Square,
                _ => AspectRatio::Reserved,
            };
            if !header.t_info_s.is_empty() {
                caps.font_opt = Some(header.t_info_s.clone());
            }
        }
        Ok(caps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ansi_header(t_flags: u8) -> SauceHeader {
        SauceHeader {
            data_type: SauceDataType::Character,
            file_type: 1,
            t_info1: 160,
            t_info2: 100,
            t_flags,
            t_info_s: BString::from("IBM VGA"),
            ..Default::default()
        }
    }

    #[test]
    fn decodes_ansi_flags() {
        let caps = CharacterCapabilities::try_from(&ansi_header(0b0001_0101)).unwrap();
        assert_eq!(caps.format, CharacterFormat::Ansi);
        assert_eq!((caps.columns, caps.lines), (160, 100));
        assert!(caps.ice_colors);
        assert_eq!(caps.letter_spacing, LetterSpacing::NinePixel);
        assert_eq!(caps.aspect_ratio, AspectRatio::Square);
        assert_eq!(caps.font(), Some(&BString::from("IBM VGA")));
    }

    #[test]
    fn flags_are_ignored_for_pcboard() {
        let mut header = ansi_header(0b0000_0001);
        header.file_type = 4;
        let caps = CharacterCapabilities::try_from(&header).unwrap();
        assert_eq!(caps.format, CharacterFormat::PCBoard);
        assert!(!caps.ice_colors);
        assert!(caps.font().is_none());
    }

    #[test]
    fn non_character_data_is_rejected() {
        let header = SauceHeader {
            data_type: SauceDataType::Bitmap,
            ..Default::default()
        };
        assert!(CharacterCapabilities::try_from(&header).is_err());
    }

    #[test]
    fn encode_then_decode_keeps_hints() {
        let mut caps = CharacterCapabilities::new(CharacterFormat::Ansi);
        caps.ice_colors = true;
        caps.letter_spacing = LetterSpacing::EightPixel;
        caps.set_font(BString::from("Amiga Topaz 1")).unwrap();
        let mut header = SauceHeader {
            data_type: SauceDataType::Character,
            ..Default::default()
        };
        caps.encode_into_header(&mut header).unwrap();
        assert_eq!(header.t_flags, 0b0000_0011);
        assert_eq!(CharacterCapabilities::try_from(&header).unwrap(), caps);
    }

    #[test]
    fn font_name_length_is_checked() {
        let mut caps = CharacterCapabilities::new(CharacterFormat::Ansi);
        assert!(caps.set_font(BString::from("x".repeat(23))).is_err());
        caps.set_font(BString::from("")).unwrap();
        assert!(caps.font().is_none());
    }
}
