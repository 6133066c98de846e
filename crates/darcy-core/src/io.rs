//! JSON volume files.
//!
//! ```json
//! {"shape": [4, 4, 4], "data": [1, 1, 0, ...]}
//! ```
//!
//! `data` is flat in lexicographic `(x, y, z)` order with z varying fastest.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DarcyResult;
use crate::volume::{Shape, Volume};

#[derive(Debug, Deserialize)]
struct VolumeFile {
    shape: Shape,
    data: Vec<f32>,
}

/// Parse a volume from any JSON reader. Shape/length consistency is checked;
/// conductivity values are not (see [`Volume::validate`]).
pub fn read_volume_from<R: Read>(reader: R) -> DarcyResult<Volume> {
    let file: VolumeFile = serde_json::from_reader(reader)?;
    Volume::new(file.shape, file.data)
}

/// Load a volume from a JSON file.
pub fn read_volume(path: impl AsRef<Path>) -> DarcyResult<Volume> {
    let file = File::open(path.as_ref())?;
    read_volume_from(BufReader::new(file))
}

/// Write any serializable value as JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(data: &T, writer: &mut W, pretty: bool) -> DarcyResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, data)?;
    } else {
        serde_json::to_writer(&mut *writer, data)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Write `data` as JSON to a file at `path`.
pub fn write_json_file<T: Serialize>(data: &T, path: impl AsRef<Path>, pretty: bool) -> DarcyResult<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_json(data, &mut writer, pretty)?;
    writer.flush()?;
    Ok(())
}
