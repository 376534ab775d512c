use strum::{Display, EnumString, FromRepr};

use crate::errors::FileTypeError;

/// File kinds the upload/download surfaces understand. The discriminant is
/// the stable integer code exchanged with external callers; a pure lookup
/// table, consumed nowhere by the mutation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, FromRepr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[repr(u8)]
pub enum FileKind {
    Xls = 1,
    Xlsx = 2,
    Doc = 3,
    Docx = 4,
    Pdf = 5,
    Txt = 6,
    Csv = 7,
    Jpg = 8,
    Png = 9,
    Gif = 10,
    Ico = 11,
}

impl FileKind {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, FileTypeError> {
        Self::from_repr(code).ok_or_else(|| FileTypeError::Unsupported(format!("code {code}")))
    }

    /// Accepts the suffix with or without a leading dot, any case.
    pub fn from_suffix(suffix: &str) -> Result<Self, FileTypeError> {
        let trimmed = suffix.trim().trim_start_matches('.');
        trimmed
            .parse()
            .map_err(|_| FileTypeError::Unsupported(trimmed.to_string()))
    }

    pub fn from_file_name(file_name: &str) -> Result<Self, FileTypeError> {
        let (_, suffix) = file_name
            .rsplit_once('.')
            .ok_or_else(|| FileTypeError::Unsupported(file_name.to_string()))?;
        Self::from_suffix(suffix)
    }

    /// Maps the `data:` URL prefix of a base64 image payload.
    pub fn from_base64_prefix(prefix: &str) -> Result<Self, FileTypeError> {
        match prefix.to_ascii_lowercase().as_str() {
            "data:image/jpeg;" => Ok(Self::Jpg),
            "data:image/x-icon;" => Ok(Self::Ico),
            "data:image/gif;" => Ok(Self::Gif),
            "data:image/png;" => Ok(Self::Png),
            _ => Err(FileTypeError::Unsupported(prefix.to_string())),
        }
    }

    pub fn suffix(self) -> String {
        format!(".{self}")
    }
}
