use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    /// An embassy task could not be spawned (pool exhausted).
    #[cfg(not(feature = "host"))]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    /// A pulse stream ended in the middle of a color word.
    #[display("pulse stream ended after {bits} bits, mid color word")]
    PulseStreamTruncated {
        /// Number of bits decoded before the stream ended.
        bits: usize,
    },

    /// A pulse stream carried more color words than the frame holds.
    #[display("pulse stream holds more than {capacity} color words")]
    PulseStreamTooLong {
        /// Frame capacity in color words.
        capacity: usize,
    },

    /// A pulse did not span exactly one bit period.
    #[display("pulse of {high_cycles}+{low_cycles} cycles is not one bit period")]
    MalformedPulse {
        /// High phase length in PIO cycles.
        high_cycles: u8,
        /// Low phase length in PIO cycles.
        low_cycles: u8,
    },

    /// The status display rejected a command or flush.
    #[display("status display I/O failed")]
    Display,

    /// The serial console could not read or write.
    #[display("serial console I/O failed")]
    Serial,
}

#[cfg(not(feature = "host"))]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}
