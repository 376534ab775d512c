use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue};

use crate::errors::DownloadError;

/// Content type the legacy download consumers expect for workbooks.
pub const EXCEL_CONTENT_TYPE: &str = "application/msexcel";

/// Headers for serving a workbook as a browser download attachment.
///
/// The file name must be ASCII. `HeaderValue` would tolerate high bytes as
/// obs-text, but a raw UTF-8 name in `Content-Disposition` is mojibake on
/// the receiving side; callers with non-ASCII names go through
/// [`attachment_headers_encoded`].
pub fn attachment_headers(file_name: &str) -> Result<HeaderMap, DownloadError> {
    if !file_name.is_ascii() {
        return Err(DownloadError::InvalidFileName(file_name.to_string()));
    }
    let disposition = HeaderValue::from_str(&format!("attachment;filename={file_name}"))
        .map_err(|_| DownloadError::InvalidFileName(file_name.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(EXCEL_CONTENT_TYPE));
    headers.insert(CONTENT_DISPOSITION, disposition);
    Ok(headers)
}

/// Variant for filenames that may leave ASCII: the name is UTF-8
/// percent-encoded before entering the header, so non-Latin filenames
/// survive the transport instead of failing header construction.
pub fn attachment_headers_encoded(file_name: &str) -> Result<HeaderMap, DownloadError> {
    attachment_headers(&percent_encode(file_name))
}

fn percent_encode(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 3);
    for c in input.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    result.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_non_ascii_as_utf8_percent_sequences() {
        assert_eq!(percent_encode("report.xlsx"), "report.xlsx");
        assert_eq!(percent_encode("a b"), "a%20b");
        assert_eq!(percent_encode("统计.xlsx"), "%E7%BB%9F%E8%AE%A1.xlsx");
    }

    #[test]
    fn headers_carry_the_legacy_type_and_attachment_disposition() {
        let headers = attachment_headers("report.xlsx").unwrap();
        assert_eq!(
            headers.get(CONTENT_TYPE).unwrap().to_str().unwrap(),
            "application/msexcel"
        );
        assert_eq!(
            headers.get(CONTENT_DISPOSITION).unwrap().to_str().unwrap(),
            "attachment;filename=report.xlsx"
        );
    }

    #[test]
    fn raw_headers_reject_names_outside_ascii() {
        assert!(matches!(
            attachment_headers("统计.xlsx"),
            Err(DownloadError::InvalidFileName(_))
        ));
        // Control characters are invalid header bytes outright.
        assert!(attachment_headers("bad\nname.xlsx").is_err());
    }

    #[test]
    fn encoded_headers_accept_names_outside_ascii() {
        let headers = attachment_headers_encoded("统计.xlsx").unwrap();
        assert_eq!(
            headers.get(CONTENT_DISPOSITION).unwrap().to_str().unwrap(),
            "attachment;filename=%E7%BB%9F%E8%AE%A1.xlsx"
        );
    }
}
