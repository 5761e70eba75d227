use std::io::{self, Read, Write};

use tracing::{debug, instrument};

use easyfile_base::{EasyFileError, EasyFileResult};

use crate::handle::FileHandle;
use crate::mode::ContentKind;

/// Byte span covered by `element_count` records of `element_size` bytes,
/// checked against the caller's buffer.
fn record_span(
    buffer_len: usize,
    element_size: usize,
    element_count: usize,
) -> EasyFileResult<usize> {
    if element_size == 0 {
        return Err(Box::new(EasyFileError::invalid_argument(
            "element size must be greater than 0",
        )));
    }
    if element_count == 0 {
        return Err(Box::new(EasyFileError::invalid_argument(
            "element count must be greater than 0",
        )));
    }
    let span = element_size.checked_mul(element_count).ok_or_else(|| {
        Box::new(EasyFileError::invalid_argument(format!(
            "{} records of {} bytes overflow the address space",
            element_count, element_size
        )))
    })?;
    if buffer_len < span {
        return Err(Box::new(EasyFileError::invalid_argument(format!(
            "buffer holds {} bytes but {} records of {} bytes need {}",
            buffer_len, element_count, element_size, span
        ))));
    }
    Ok(span)
}

impl FileHandle {
    /// Reads up to `element_count` records of `element_size` bytes into the front of `buffer`.
    ///
    /// Returns the number of complete records read. Bytes of a trailing partial record
    /// are still consumed from the file and left in `buffer`.
    #[instrument(skip(self, buffer), fields(path = ?self.path()))]
    pub fn read_records(
        &mut self,
        buffer: &mut [u8],
        element_size: usize,
        element_count: usize,
    ) -> EasyFileResult<usize> {
        let open = self.gate("read records", ContentKind::Binary)?;
        let span = record_span(buffer.len(), element_size, element_count)?;
        let mut filled = 0;
        while filled < span {
            match open.native.read(&mut buffer[filled..span]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(open.io_error(e)),
            }
        }
        let records = filled / element_size;
        debug!(records, bytes = filled, "records read");
        Ok(records)
    }

    /// Writes the first `element_count` records of `element_size` bytes from `buffer`.
    ///
    /// Returns the number of complete records the native file accepted.
    #[instrument(skip(self, buffer), fields(path = ?self.path()))]
    pub fn write_records(
        &mut self,
        buffer: &[u8],
        element_size: usize,
        element_count: usize,
    ) -> EasyFileResult<usize> {
        let open = self.gate("write records", ContentKind::Binary)?;
        let span = record_span(buffer.len(), element_size, element_count)?;
        let mut written = 0;
        while written < span {
            match open.native.write(&buffer[written..span]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(open.io_error(e)),
            }
        }
        let records = written / element_size;
        debug!(records, bytes = written, "records written");
        Ok(records)
    }

    /// Appends every remaining byte of a binary file to `buffer`.
    #[instrument(skip(self, buffer), fields(path = ?self.path()))]
    pub fn read_all_bytes(&mut self, buffer: &mut Vec<u8>) -> EasyFileResult<usize> {
        let chunk_size = self.read_chunk_size();
        let open = self.gate("read bytes to end", ContentKind::Binary)?;
        let total = open.read_chunks(buffer, chunk_size)?;
        debug!(total, "bytes read to end");
        Ok(total)
    }
}
