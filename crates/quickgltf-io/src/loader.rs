//! Loading of external buffer and image files.
//!
//! Runs after entity parsing. Every `FilePath` source selected by the options
//! is read synchronously and replaced with an in-memory `Vector`.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::ops::Range;
use std::path::Path;

use quickgltf_core::{DataSource, Document, GltfError, Options, Result};

/// Loads the external files requested by `options` into `document`.
pub fn load_external_files(document: &mut Document, options: Options) -> Result<()> {
    if options.contains(Options::LOAD_EXTERNAL_FILE_BUFFERS) {
        for buffer in &mut document.buffers {
            load_source(&mut buffer.data)?;
        }
        log::debug!("loaded external data of {} buffers", document.buffers.len());
    }
    if options.contains(Options::LOAD_EXTERNAL_FILE_IMAGES) {
        for image in &mut document.images {
            load_source(&mut image.data)?;
        }
        log::debug!("loaded external data of {} images", document.images.len());
    }
    Ok(())
}

fn load_source(source: &mut DataSource) -> Result<()> {
    let DataSource::FilePath { path, byte_range, mime_type } = source else {
        return Ok(());
    };

    let mime_type = *mime_type;
    let bytes = read_file(path, byte_range.clone()).map_err(|err| GltfError::FileLoad {
        path: path.clone(),
        source: err,
    })?;
    log::trace!("read {} bytes from {}", bytes.len(), path.display());

    *source = DataSource::Vector { bytes, mime_type };
    Ok(())
}

fn read_file(path: &Path, range: Option<Range<u64>>) -> io::Result<Vec<u8>> {
    let Some(range) = range else {
        return fs::read(path);
    };

    let length = range
        .end
        .checked_sub(range.start)
        .and_then(|len| usize::try_from(len).ok())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid byte range"))?;

    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(range.start))?;
    let mut bytes = vec![0u8; length];
    file.read_exact(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickgltf_core::{Buffer, ErrorCode, Image, MimeType};
    use std::io::Write;
    use std::path::PathBuf;

    fn buffer_at(path: PathBuf, byte_range: Option<Range<u64>>) -> Buffer {
        Buffer {
            byte_length: 0,
            data: DataSource::FilePath { path, byte_range, mime_type: MimeType::OctetStream },
            name: None,
        }
    }

    #[test]
    fn test_flags_select_categories() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[9, 8, 7, 6]).unwrap();

        let mut document = Document::default();
        document.buffers.push(buffer_at(file.path().to_path_buf(), None));
        document.images.push(Image {
            data: DataSource::FilePath {
                path: file.path().to_path_buf(),
                byte_range: None,
                mime_type: MimeType::Png,
            },
            name: None,
        });

        load_external_files(&mut document, Options::LOAD_EXTERNAL_FILE_BUFFERS).unwrap();
        assert_eq!(document.buffers[0].data.bytes(), Some(&[9u8, 8, 7, 6][..]));
        assert!(document.images[0].data.bytes().is_none());

        load_external_files(&mut document, Options::LOAD_EXTERNAL_FILE_IMAGES).unwrap();
        assert_eq!(document.images[0].data.mime_type(), MimeType::Png);
        assert_eq!(document.images[0].data.bytes().map(<[u8]>::len), Some(4));
    }

    #[test]
    fn test_byte_range_applied() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0, 1, 2, 3, 4, 5]).unwrap();

        let mut document = Document::default();
        document.buffers.push(buffer_at(file.path().to_path_buf(), Some(2..5)));
        load_external_files(&mut document, Options::LOAD_EXTERNAL_FILE_BUFFERS).unwrap();
        assert_eq!(document.buffers[0].data.bytes(), Some(&[2u8, 3, 4][..]));
    }

    #[test]
    fn test_missing_file() {
        let mut document = Document::default();
        document.buffers.push(buffer_at(PathBuf::from("/no/such/file.bin"), None));
        let err = load_external_files(&mut document, Options::LOAD_EXTERNAL_FILE_BUFFERS)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::FileLoadFailed);

        // Without the flag the path is never opened.
        assert!(load_external_files(&mut document, Options::empty()).is_ok());
    }
}
