//! Source document loading.

use crate::error::Result;
use crate::model::SourceDocument;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load an HTML document from a file path.
///
/// # Returns
/// * `Ok(SourceDocument)` with the full file content
/// * `Err(Error::Io)` if the file is missing or unreadable
/// * `Err(Error::Decode)` if the content is not valid UTF-8
///
/// # Example
/// ```no_run
/// use unpage::loader::load_file;
///
/// let doc = load_file("demo-complete-umroh-app.html").unwrap();
/// println!("{} bytes", doc.len());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<SourceDocument> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let doc = load_reader(BufReader::new(file))?;
    log::debug!("loaded {} ({} bytes)", path.display(), doc.len());
    Ok(doc.with_path(path))
}

/// Load an HTML document from any reader.
pub fn load_reader<R: Read>(mut reader: R) -> Result<SourceDocument> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    load_bytes(data)
}

/// Decode raw bytes as a UTF-8 document.
pub fn load_bytes(data: Vec<u8>) -> Result<SourceDocument> {
    let text = String::from_utf8(data)?;
    Ok(SourceDocument::new(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn test_load_bytes_utf8() {
        let doc = load_bytes("<p>Assalamu'alaikum ✓</p>".as_bytes().to_vec()).unwrap();
        assert!(doc.text().contains('✓'));
    }

    #[test]
    fn test_load_bytes_invalid_utf8() {
        let result = load_bytes(vec![0x3c, 0x70, 0xff, 0xfe]);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_file("definitely/not/here.html");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_file_records_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<html><body></body></html>").unwrap();

        let doc = load_file(file.path()).unwrap();
        assert_eq!(doc.path(), Some(file.path()));
        assert_eq!(doc.text(), "<html><body></body></html>");
    }
}
