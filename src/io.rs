//! Loading from and saving to files and byte streams.
//!
//! Each call opens its file, uses it and closes it before returning, on success
//! and failure alike. Read failures surface before any parsing starts, so a
//! failed load never leaves half a file in the store.

use crate::options::DumpOptions;
use crate::{Error, Ini, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// The default location of the configuration file: the running executable's path
/// with `.ini` appended (`/usr/bin/app` becomes `/usr/bin/app.ini`).
///
/// # Errors
///
/// Returns [`Error::DefaultPath`] if the executable path cannot be determined.
pub fn default_path() -> Result<PathBuf> {
    let exe = env::current_exe().map_err(|e| Error::DefaultPath(e.to_string()))?;
    let mut path = exe.into_os_string();
    path.push(".ini");
    Ok(PathBuf::from(path))
}

fn read_text<R: Read>(mut reader: R) -> io::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(decode(bytes))
}

fn decode(mut bytes: Vec<u8>) -> String {
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!("source is not valid UTF-8; decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

fn write_text<W: Write>(mut writer: W, text: &str) -> io::Result<()> {
    writer.write_all(text.as_bytes())?;
    writer.flush()
}

impl Ini {
    /// Reads the file at `path` and parses it into this store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnavailable`] if the file cannot be opened or read.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::source_unavailable(path, e))?;
        let text = read_text(file).map_err(|e| Error::source_unavailable(path, e))?;
        self.parse(&text);
        debug!(path = %path.display(), entries = self.len(), "loaded ini");
        Ok(())
    }

    /// Loads from [`default_path`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DefaultPath`] if the default path cannot be resolved, or
    /// [`Error::SourceUnavailable`] if the file cannot be read.
    pub fn load_default(&mut self) -> Result<()> {
        let path = default_path()?;
        self.load(path)
    }

    /// Creates a key-sorted store from the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnavailable`] if the file cannot be opened or read.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut ini = Ini::new();
        ini.load(path)?;
        Ok(ini)
    }

    /// Reads `reader` to the end and parses it into this store.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::Ini;
    /// use std::io::Cursor;
    ///
    /// let mut ini = Ini::new();
    /// ini.read_from(Cursor::new(b"[a]\nk=v")).unwrap();
    /// assert_eq!(ini.get("a.k").unwrap(), "v");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnavailable`] if reading fails.
    pub fn read_from<R: Read>(&mut self, reader: R) -> Result<()> {
        let text = read_text(reader).map_err(|e| Error::source_unavailable("<reader>", e))?;
        self.parse(&text);
        Ok(())
    }

    /// Writes the dump with the default banner to the file at `path`, replacing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SinkUnavailable`] if the file cannot be created or written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with(path, &DumpOptions::default())
    }

    /// Writes the dump produced with `options` to the file at `path`, replacing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SinkUnavailable`] if the file cannot be created, written or
    /// flushed.
    pub fn save_with<P: AsRef<Path>>(&self, path: P, options: &DumpOptions) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::sink_unavailable(path, e))?;
        write_text(BufWriter::new(file), &self.dump_with(options))
            .map_err(|e| Error::sink_unavailable(path, e))?;
        debug!(path = %path.display(), entries = self.len(), "saved ini");
        Ok(())
    }

    /// Saves to [`default_path`] with the default banner.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DefaultPath`] if the default path cannot be resolved, or
    /// [`Error::SinkUnavailable`] if the file cannot be written.
    pub fn save_default(&self) -> Result<()> {
        let path = default_path()?;
        self.save(path)
    }

    /// Writes the dump produced with `options` to `writer` and flushes it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SinkUnavailable`] if writing or flushing fails.
    pub fn write_to<W: Write>(&self, writer: W, options: &DumpOptions) -> Result<()> {
        write_text(writer, &self.dump_with(options))
            .map_err(|e| Error::sink_unavailable("<writer>", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_decode_strips_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"[a]\nk=v");
        assert_eq!(decode(bytes), "[a]\nk=v");
    }

    #[test]
    fn test_decode_lossy() {
        assert_eq!(decode(b"k=\xFFv".to_vec()), "k=\u{FFFD}v");
    }

    #[test]
    fn test_read_failure_leaves_store_untouched() {
        let mut ini: Ini = "a=1".parse().unwrap();
        let err = ini.read_from(Broken).unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { .. }));
        assert!(err.to_string().contains("device gone"));
        assert_eq!(ini.len(), 1);
    }

    #[test]
    fn test_write_failure() {
        let ini: Ini = "a=1".parse().unwrap();
        let err = ini.write_to(Broken, &DumpOptions::default()).unwrap_err();
        assert!(matches!(err, Error::SinkUnavailable { .. }));
    }

    #[test]
    fn test_write_to_buffer() {
        let ini: Ini = "[a]\nk=v".parse().unwrap();
        let mut buffer = Cursor::new(Vec::new());
        ini.write_to(&mut buffer, &DumpOptions::bare()).unwrap();
        assert_eq!(buffer.into_inner(), b"\r\n[a]\r\nk=v\r\n\r\n");
    }

    #[test]
    fn test_default_path_has_ini_suffix() {
        let path = default_path().unwrap();
        assert!(path.to_string_lossy().ends_with(".ini"));
    }
}
