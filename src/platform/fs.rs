// LogWeave - platform/fs.rs
//
// Opening input files. Maps open failures to `InputUnavailable` so the error
// names the path the user typed.

use crate::util::constants;
use crate::util::error::{LogWeaveError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Open `path` for buffered reading.
///
/// Directories are rejected up front: on some platforms `File::open` succeeds
/// on a directory and only the first read fails, which would surface as a
/// confusing mid-stream error.
pub fn open_log(path: &Path) -> Result<BufReader<File>> {
    let unavailable = |source| LogWeaveError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unavailable)?;
    let metadata = file.metadata().map_err(unavailable)?;
    if metadata.is_dir() {
        return Err(unavailable(std::io::Error::new(
            std::io::ErrorKind::Other,
            "is a directory",
        )));
    }

    tracing::debug!(
        path = %path.display(),
        size = metadata.len(),
        "Opened input"
    );

    Ok(BufReader::with_capacity(constants::INPUT_BUFFER_BYTES, file))
}
