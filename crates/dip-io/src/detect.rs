//! Format detection utilities.
//!
//! Raw dumps carry no signature, so an explicit raw extension is trusted
//! as is. Any other file is checked for the PNG magic bytes before the
//! extension decides.

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Headerless raw dump.
    Raw,
    /// PNG format.
    Png,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file path (raw extension, magic bytes, then
    /// other extensions).
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let by_ext = Self::from_extension(path);
        if by_ext == Format::Raw {
            return Ok(Format::Raw);
        }
        if Self::from_magic_bytes(path)? == Format::Png {
            return Ok(Format::Png);
        }
        Ok(by_ext)
    }

    /// Detects format from file extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("png") => Format::Png,
            Some("raw") | Some("bin") | Some("gray") => Format::Raw,
            _ => Format::Unknown,
        }
    }

    /// Detects format from file magic bytes.
    ///
    /// Anything without a PNG signature is reported as [`Format::Unknown`].
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut file = File::open(path)?;
        let mut header = [0u8; 8];
        let n = file.read(&mut header)?;
        if n == header.len() && header == PNG_MAGIC {
            Ok(Format::Png)
        } else {
            Ok(Format::Unknown)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("cat.raw"), Format::Raw);
        assert_eq!(Format::from_extension("CAT.RAW"), Format::Raw);
        assert_eq!(Format::from_extension("dump.gray"), Format::Raw);
        assert_eq!(Format::from_extension("out.png"), Format::Png);
        assert_eq!(Format::from_extension("notes.txt"), Format::Unknown);
        assert_eq!(Format::from_extension("noext"), Format::Unknown);
    }

    #[test]
    fn test_raw_extension_beats_magic() {
        let dir = tempfile::tempdir().unwrap();
        // First pixels of a raw dump that happen to spell the PNG signature.
        let path = dir.path().join("pixels.raw");
        std::fs::write(&path, PNG_MAGIC).unwrap();
        assert_eq!(Format::detect(&path).unwrap(), Format::Raw);

        let raw = dir.path().join("plain.gray");
        std::fs::write(&raw, [0u8; 4]).unwrap();
        assert_eq!(Format::detect(&raw).unwrap(), Format::Raw);
    }

    #[test]
    fn test_magic_identifies_unlabeled_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picture.dat");
        std::fs::write(&path, PNG_MAGIC).unwrap();
        assert_eq!(Format::detect(&path).unwrap(), Format::Png);

        let other = dir.path().join("notes.dat");
        std::fs::write(&other, b"plain text").unwrap();
        assert_eq!(Format::detect(&other).unwrap(), Format::Unknown);
    }
}
