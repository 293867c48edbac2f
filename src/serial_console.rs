//! Line-oriented console over any async byte port (UART0 on the board).
//!
//! The console reads one command byte at a time and writes whole lines. Line terminators
//! typed after a command are skipped, so a terminal that sends `7\r\n` produces one command.

use embedded_io_async::{Read, Write};

use crate::status::CONSOLE_PROMPT;
use crate::{Error, Result};

/// Baud rate of the board's console UART (8 data bits, no parity, 1 stop bit).
pub const CONSOLE_BAUD: u32 = 115_200;

/// Console session on a byte port.
pub struct SerialConsole<P> {
    port: P,
}

impl<P: Read + Write> SerialConsole<P> {
    /// Wraps a configured port.
    pub const fn new(port: P) -> Self {
        Self { port }
    }

    /// Prints the command prompt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serial`] if the port rejects the write.
    pub async fn prompt(&mut self) -> Result<()> {
        self.write_all(CONSOLE_PROMPT.as_bytes()).await?;
        self.port.flush().await.map_err(|_| Error::Serial)
    }

    /// Waits for the next byte that is not a line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serial`] on a read error or if the port reports end of input.
    pub async fn read_byte(&mut self) -> Result<u8> {
        let mut buf = [0_u8; 1];
        loop {
            let count = self.port.read(&mut buf).await.map_err(|_| Error::Serial)?;
            if count == 0 {
                return Err(Error::Serial);
            }
            let [byte] = buf;
            if !matches!(byte, b'\r' | b'\n') {
                return Ok(byte);
            }
        }
    }

    /// Writes `line` followed by CR LF.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serial`] if the port rejects the write.
    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        self.write_all(line.as_bytes()).await?;
        self.write_all(b"\r\n").await
    }

    /// The wrapped port.
    pub fn into_inner(self) -> P {
        self.port
    }

    async fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.port.write_all(bytes).await.map_err(|_| Error::Serial)
    }
}
