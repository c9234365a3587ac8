use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::input::InputError;

fn is_gz(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if is_gz(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Creates `path` (and its parent directories) and hands `body` a writer that
/// gzips when the path ends in `.gz`. The gzip trailer is written before return.
pub fn write_maybe_gz<F>(path: &Path, body: F) -> Result<(), InputError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), InputError>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = BufWriter::new(File::create(path)?);
    if is_gz(path) {
        let mut enc = GzEncoder::new(file, Compression::default());
        body(&mut enc)?;
        enc.finish()?.flush()?;
    } else {
        let mut w = file;
        body(&mut w)?;
        w.flush()?;
    }
    Ok(())
}
