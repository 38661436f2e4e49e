use crate::core::models::plate::Plate;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Defines the interface for reading and writing plate file formats.
///
/// Implementors handle format-specific parsing and serialization; the provided
/// path helpers take care of opening files and of writing them atomically.
pub trait PlateFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a plate from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Plate, Self::Error>;

    /// Writes a plate to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or I/O operations encounter issues.
    fn write_to(plate: &Plate, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a plate from a file path.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Plate, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a plate to a file path, replacing any existing file.
    fn write_to_path<P: AsRef<Path>>(plate: &Plate, path: P) -> Result<(), Self::Error> {
        write_atomically(path, |writer| Self::write_to(plate, writer))
    }
}

/// Writes `path` through a temporary sibling file that is renamed into place
/// once `write` succeeds. On any error the temporary file is removed and the
/// previous content of `path`, if any, is left untouched.
pub fn write_atomically<P, F, E>(path: P, write: F) -> Result<(), E>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<(), E>,
    E: From<io::Error>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
