use std::io::{self, Read, Write};

use tracing::{debug, instrument};

use easyfile_base::{EasyFileError, EasyFileResult};

use crate::handle::FileHandle;
use crate::mode::ContentKind;

/* 📖 # Why does read_line issue one native read per byte?

The handle does no buffering of its own, so the native cursor is the only read
position there is. A buffered scan would pull bytes past the newline out of the
file, and the next read_bounded or read_records would silently skip them. Reading a
byte at a time leaves the cursor exactly after the newline.
*/

impl FileHandle {
    /// Appends up to `max_bytes` bytes from the cursor to `buffer`.
    ///
    /// Returns the number of bytes read; 0 means end of stream.
    #[instrument(skip(self, buffer), fields(path = ?self.path()))]
    pub fn read_bounded(
        &mut self,
        buffer: &mut Vec<u8>,
        max_bytes: usize,
    ) -> EasyFileResult<usize> {
        let open = self.gate("read", ContentKind::Text)?;
        if max_bytes == 0 {
            return Err(Box::new(EasyFileError::invalid_argument(
                "max_bytes must be greater than 0",
            )));
        }
        let result = Read::take(&mut open.native, max_bytes as u64).read_to_end(buffer);
        let read = result.map_err(|e| open.io_error(e))?;
        debug!(read, "bounded read");
        Ok(read)
    }

    /// Appends bytes to `buffer` up to and including the next `\n`, or up to end of stream.
    ///
    /// Returns the number of bytes read not counting the newline itself, so a stream
    /// `"abc\ndef"` yields 3 and then 3, and an empty line yields 0 after appending `"\n"`.
    #[instrument(skip(self, buffer), fields(path = ?self.path()))]
    pub fn read_line(&mut self, buffer: &mut Vec<u8>) -> EasyFileResult<usize> {
        let open = self.gate("read a line", ContentKind::Text)?;
        let mut byte = [0u8; 1];
        let mut count = 0;
        loop {
            match open.native.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    buffer.push(byte[0]);
                    if byte[0] == b'\n' {
                        break;
                    }
                    count += 1;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(open.io_error(e)),
            }
        }
        debug!(count, "line read");
        Ok(count)
    }

    /// Appends everything from the cursor to end of stream to `buffer`.
    #[instrument(skip(self, buffer), fields(path = ?self.path()))]
    pub fn read_all(&mut self, buffer: &mut Vec<u8>) -> EasyFileResult<usize> {
        let chunk_size = self.read_chunk_size();
        let open = self.gate("read to end", ContentKind::Text)?;
        let total = open.read_chunks(buffer, chunk_size)?;
        debug!(total, chunk_size, "read to end");
        Ok(total)
    }

    /// Writes all of `bytes` at the cursor.
    ///
    /// Returns the number of bytes the native file accepted, which is less than
    /// `bytes.len()` only if it stopped accepting data.
    #[instrument(skip(self, bytes), fields(path = ?self.path(), len = bytes.len()))]
    pub fn write(&mut self, bytes: &[u8]) -> EasyFileResult<usize> {
        let open = self.gate("write", ContentKind::Text)?;
        let mut written = 0;
        while written < bytes.len() {
            match open.native.write(&bytes[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(open.io_error(e)),
            }
        }
        if written < bytes.len() {
            debug!(written, requested = bytes.len(), "short write");
        }
        Ok(written)
    }
}
