//! 4klang container reader.
//!
//! Decodes `.4kp` patch documents and `.4ki` instrument documents from
//! in-memory buffers or files. Both shapes are fixed-size aggregates: every
//! array length is a format constant, so decoding never discovers a length
//! from the stream.
//!
//! Patch document layout:
//!
//! | Offset | Length | Field            | Description                     |
//! |--------|--------|------------------|---------------------------------|
//! | 0      | 4      | version tag      | One of the known revision tags  |
//! | 4      | 4      | polyphony        | u32 little-endian               |
//! | 8      | 1024   | instrument names | 16 x 64-byte null-padded text   |
//! | 1032   | 16384  | instrument units | 16 x 64 slots, 16 bytes each    |
//! | 17416  | 1024   | global units     | 64 slots, 16 bytes each         |
//!
//! Instrument document layout:
//!
//! | Offset | Length | Field       | Description                     |
//! |--------|--------|-------------|---------------------------------|
//! | 0      | 4      | version tag | One of the known revision tags  |
//! | 4      | 64     | name        | Null-padded text                |
//! | 68     | 1024   | units       | 64 slots, 16 bytes each         |

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::cursor::Cursor;
use crate::error::{FkpError, Result};
use crate::layout::{LayoutTable, decode_slot};
use crate::types::{
    FkpDocument, InstrumentDocument, MAX_INSTRUMENTS, MAX_UNITS, NAME_LEN, PATCH_DOCUMENT_LEN,
    PatchDocument, UnitSlot,
};
use crate::version::{TAG_LEN, VersionTag};

/// 4klang container reader.
pub struct FkpReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> FkpReader<R> {
    /// Create a new reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Read and decode a patch document.
    pub fn read_patch(mut self) -> Result<PatchDocument> {
        let data = self.read_all_bytes()?;
        parse_patch(&data)
    }

    /// Read and decode an instrument document.
    pub fn read_instrument(mut self) -> Result<InstrumentDocument> {
        let data = self.read_all_bytes()?;
        parse_instrument(&data)
    }

    /// Read and decode either document shape, detected from the buffer size.
    pub fn read_document(mut self) -> Result<FkpDocument> {
        let data = self.read_all_bytes()?;
        parse_document(&data)
    }

    fn read_all_bytes(&mut self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        Ok(data)
    }
}

impl FkpReader<File> {
    /// Open a container file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FkpError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                FkpError::Io(e)
            }
        })?;
        Ok(Self::new(file))
    }
}

/// Read a patch document from a file.
pub fn read_patch(path: &Path) -> Result<PatchDocument> {
    FkpReader::open(path)?.read_patch()
}

/// Read an instrument document from a file.
pub fn read_instrument(path: &Path) -> Result<InstrumentDocument> {
    FkpReader::open(path)?.read_instrument()
}

/// Read either document shape from a file, detected from the file size.
pub fn read_document(path: &Path) -> Result<FkpDocument> {
    FkpReader::open(path)?.read_document()
}

/// Decode a patch document from bytes.
pub fn parse_patch(data: &[u8]) -> Result<PatchDocument> {
    let mut cursor = Cursor::new(data);
    let version = parse_version(&mut cursor)?;
    let table = LayoutTable::for_version(version);

    let polyphony = cursor.read_u32_le()?;
    let mut instrument_names = Vec::with_capacity(MAX_INSTRUMENTS);
    for _ in 0..MAX_INSTRUMENTS {
        instrument_names.push(cursor.read_str(NAME_LEN)?);
    }
    let instrument_units = parse_slots(&mut cursor, MAX_INSTRUMENTS * MAX_UNITS, &table)?;
    let global_units = parse_slots(&mut cursor, MAX_UNITS, &table)?;

    Ok(PatchDocument {
        version,
        polyphony,
        instrument_names,
        instrument_units,
        global_units,
    })
}

/// Decode an instrument document from bytes.
pub fn parse_instrument(data: &[u8]) -> Result<InstrumentDocument> {
    let mut cursor = Cursor::new(data);
    let version = parse_version(&mut cursor)?;
    let table = LayoutTable::for_version(version);

    let name = cursor.read_str(NAME_LEN)?;
    let units = parse_slots(&mut cursor, MAX_UNITS, &table)?;

    Ok(InstrumentDocument {
        version,
        name,
        units,
    })
}

/// Decode either document shape from bytes.
///
/// A buffer at least as large as a full patch document decodes as a patch;
/// anything smaller decodes as an instrument document.
pub fn parse_document(data: &[u8]) -> Result<FkpDocument> {
    if data.len() >= PATCH_DOCUMENT_LEN {
        Ok(FkpDocument::Patch(parse_patch(data)?))
    } else {
        Ok(FkpDocument::Instrument(parse_instrument(data)?))
    }
}

/// Read and validate the version tag.
fn parse_version(cursor: &mut Cursor<'_>) -> Result<VersionTag> {
    let span = cursor.take(TAG_LEN)?;
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(span);
    VersionTag::from_tag(tag).ok_or(FkpError::UnsupportedVersion { tag })
}

/// Decode a fixed-length run of unit slots.
fn parse_slots(cursor: &mut Cursor<'_>, count: usize, table: &LayoutTable) -> Result<Vec<UnitSlot>> {
    let mut slots = Vec::with_capacity(count);
    for _ in 0..count {
        slots.push(decode_slot(cursor, table)?);
    }
    Ok(slots)
}
