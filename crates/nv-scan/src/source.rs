//! # Decode Sources
//!
//! The seam between the scan session and whatever device produces decoded
//! codes. Hardware wedge scanners present each decoded code as a line of
//! text; the console reads them from stdin. Every source follows the same
//! contract: acquire once, poll for decodes, release on teardown, re-acquire
//! on an explicit restart.
//!
//! Drivers act on a decode only while the session is in `SCANNING`; while a
//! verdict is displayed, input is operator acknowledgement. A decode error
//! while scanning is logged and polling continues. Acquisition failure is
//! fatal to the scan session until [`DecodeSource::restart`] succeeds.

use std::io;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// A device that yields decoded codes as text, one per scan.
#[allow(async_fn_in_trait)]
pub trait DecodeSource {
    /// The next decoded code, or `None` once the source is closed.
    async fn next_decode(&mut self) -> io::Result<Option<String>>;

    /// Release and re-acquire the underlying device.
    ///
    /// Session state is untouched by a restart; only the device comes back.
    async fn restart(&mut self) -> io::Result<()>;
}

/// Decode source backed by stdin, for wedge scanners that type decoded
/// payloads as keyboard input.
#[derive(Debug)]
pub struct StdinSource {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinSource {
    /// Acquire stdin as the decode device.
    pub fn acquire() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::acquire()
    }
}

impl DecodeSource for StdinSource {
    async fn next_decode(&mut self) -> io::Result<Option<String>> {
        self.lines.next_line().await
    }

    async fn restart(&mut self) -> io::Result<()> {
        self.lines = BufReader::new(tokio::io::stdin()).lines();
        Ok(())
    }
}
