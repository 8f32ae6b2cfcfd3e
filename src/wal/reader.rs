//! WAL Reader
//!
//! Handles reading entries from the WAL file.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::error::{LedgerError, Result};
use super::{WalEntry, HEADER_SIZE, MAX_ENTRY_SIZE};

/// Reads entries from the WAL file
pub struct WalReader {
    file: BufReader<File>,
    /// End offset of the last entry that decoded cleanly
    valid_offset: u64,
}

impl WalReader {
    /// Open a WAL file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            file: BufReader::new(file),
            valid_offset: 0,
        })
    }

    /// Read the next entry from the WAL
    ///
    /// Returns `Ok(None)` at a clean end of file. A torn header, a short data
    /// block or a checksum mismatch is reported as `WalCorruption`; the
    /// reader should not be used past that point.
    pub fn next_entry(&mut self) -> Result<Option<WalEntry>> {
        let mut header = [0u8; HEADER_SIZE];
        let read = read_fully(&mut self.file, &mut header)?;
        if read == 0 {
            return Ok(None);
        }
        if read < HEADER_SIZE {
            return Err(LedgerError::WalCorruption(format!(
                "partial header at offset {}: {} of {} bytes",
                self.valid_offset, read, HEADER_SIZE
            )));
        }

        let mut lsn = [0u8; 8];
        lsn.copy_from_slice(&header[0..8]);
        let lsn = u64::from_le_bytes(lsn);
        let crc = u32::from_le_bytes([header[8], header[9], header[10], header[11]]);
        let len = u32::from_le_bytes([header[12], header[13], header[14], header[15]]);

        if len > MAX_ENTRY_SIZE {
            return Err(LedgerError::WalCorruption(format!(
                "entry length {} at offset {} exceeds maximum {}",
                len, self.valid_offset, MAX_ENTRY_SIZE
            )));
        }

        let mut data = vec![0u8; len as usize];
        let read = read_fully(&mut self.file, &mut data)?;
        if read < data.len() {
            return Err(LedgerError::WalCorruption(format!(
                "partial entry at offset {}: {} of {} data bytes",
                self.valid_offset, read, len
            )));
        }

        let entry = WalEntry::decode(lsn, crc, &data)?;
        self.valid_offset += (HEADER_SIZE + data.len()) as u64;
        Ok(Some(entry))
    }

    /// Offset just past the last cleanly decoded entry
    pub fn valid_offset(&self) -> u64 {
        self.valid_offset
    }

    /// Iterate over entries until end of file or the first error
    pub fn entries(self) -> WalIterator {
        WalIterator {
            reader: self,
            done: false,
        }
    }
}

/// Iterator over WAL entries
pub struct WalIterator {
    reader: WalReader,
    done: bool,
}

impl Iterator for WalIterator {
    type Item = Result<WalEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Fill `buf` as far as the file allows, returning the bytes read
fn read_fully(reader: &mut impl Read, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
