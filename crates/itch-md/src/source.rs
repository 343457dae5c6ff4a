//! Forward-only byte sources over a decompressed capture.
//!
//! The scan never seeks: it reads one tag byte, then a fixed-length body,
//! over and over. [`ByteSource`] is the narrow seam for that; [`ReaderSource`]
//! implements it over any `std::io::Read` and tracks the byte position for
//! diagnostics. The underlying reader (and file handle) is owned by the
//! source and released when it is dropped, on every exit path.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use itch_core::config::Compression;
use itch_core::error::{ItchError, Result};
use tracing::info;

/// Sequential byte supplier.
pub trait ByteSource {
    /// Fill `buf` completely, or fail with [`ItchError::EndOfStream`] if
    /// fewer bytes remain.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Next byte, or `None` at end of stream.
    fn read_byte(&mut self) -> Result<Option<u8>>;

    /// Bytes consumed so far.
    fn position(&self) -> u64;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_exact(buf)
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        (**self).read_byte()
    }

    fn position(&self) -> u64 {
        (**self).position()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_exact(buf)
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        (**self).read_byte()
    }

    fn position(&self) -> u64 {
        (**self).position()
    }
}

/// [`ByteSource`] over a buffered reader.
pub struct ReaderSource<R: Read> {
    inner: BufReader<R>,
    position: u64,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { inner: BufReader::with_capacity(1 << 16, reader), position: 0 }
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.position += filled as u64;
                    return Err(ItchError::EndOfStream { position: self.position });
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.position += filled as u64;
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut b = [0u8; 1];
        loop {
            match self.inner.read(&mut b) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.position += 1;
                    return Ok(Some(b[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    #[inline]
    fn position(&self) -> u64 {
        self.position
    }
}

/// Open a capture file, decompressing gzip containers on the fly.
///
/// Failing to open the file is fatal for the run. Decompression errors
/// surface later as [`ItchError::Io`] from the first read that hits them.
pub fn open_capture(path: &Path, compression: Compression) -> Result<Box<dyn ByteSource>> {
    let file = File::open(path)?;
    let compression = compression.resolve(path);
    info!("opening capture {} ({compression:?})", path.display());

    let source: Box<dyn ByteSource> = match compression {
        Compression::Gzip => Box::new(ReaderSource::new(MultiGzDecoder::new(file))),
        Compression::None | Compression::Auto => Box::new(ReaderSource::new(file)),
    };
    Ok(source)
}
