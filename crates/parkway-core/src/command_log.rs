//! Ordered, replayable log of executed commands.
//!
//! Binary layout, all integers little-endian:
//!
//! ```text
//! magic "PKWL" | version u8 | recorded_at i64 (unix millis) | initial checksum u64
//! record count u32
//! per record: sequence u32 | command tag u8 | payload length u32 | payload
//! ```
//!
//! Payloads are exactly the bytes [`encode_command`] produces, so a record
//! decodes through the registry with no extra framing.

use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use parkway_actions::{CommandType, GameCommand, StreamError, encode_command};

/// File magic.
pub const MAGIC: [u8; 4] = *b"PKWL";

/// Current log format version.
pub const FORMAT_VERSION: u8 = 1;

/// Errors that can occur while recording, encoding, decoding or replaying a
/// command log.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Reading or writing the underlying buffer failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The data does not start with the log magic.
    #[error("invalid magic bytes (expected b\"PKWL\")")]
    InvalidMagic,

    /// The format version is not supported by this build.
    #[error("unsupported log format version {found}")]
    UnsupportedVersion {
        /// The version found in the data.
        found: u8,
    },

    /// The header timestamp is out of range.
    #[error("invalid recorded-at timestamp {millis}")]
    InvalidTimestamp {
        /// Milliseconds since the Unix epoch, as stored.
        millis: i64,
    },

    /// A command payload failed to encode or decode.
    #[error("command stream error: {source}")]
    Stream {
        /// The underlying stream error.
        #[from]
        source: StreamError,
    },

    /// A record or the record list outgrew its 32-bit length field.
    #[error("log length {len} does not fit the format")]
    TooLarge {
        /// The offending length.
        len: usize,
    },

    /// Replay started from a world that differs from the recorded one.
    #[error("initial state mismatch: recorded={expected:#018x}, actual={actual:#018x}")]
    InitialStateMismatch {
        /// Checksum stored in the log header.
        expected: u64,
        /// Checksum of the world handed to replay.
        actual: u64,
    },
}

/// Log header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogHeader {
    /// When recording started, truncated to milliseconds.
    pub recorded_at: DateTime<Utc>,
    /// World checksum before the first command.
    pub initial_checksum: u64,
}

/// One executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Position in the log, starting at zero.
    pub sequence: u32,
    /// Which command the payload decodes to.
    pub command_type: CommandType,
    /// Encoded base and derived fields.
    pub payload: Vec<u8>,
}

/// Header plus records, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLog {
    header: LogHeader,
    records: Vec<LogRecord>,
}

impl CommandLog {
    /// Start a log for a world whose checksum is `initial_checksum`.
    pub fn new(initial_checksum: u64) -> Self {
        Self::with_timestamp(initial_checksum, Utc::now())
    }

    /// Start a log with an explicit recording time.
    pub fn with_timestamp(initial_checksum: u64, recorded_at: DateTime<Utc>) -> Self {
        // The wire keeps milliseconds; truncate now so decode round-trips.
        let recorded_at =
            DateTime::from_timestamp_millis(recorded_at.timestamp_millis()).unwrap_or(recorded_at);
        Self {
            header: LogHeader {
                recorded_at,
                initial_checksum,
            },
            records: Vec::new(),
        }
    }

    /// The header.
    pub const fn header(&self) -> &LogHeader {
        &self.header
    }

    /// Records in execution order.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Encode `command` and append it. Returns the record's sequence number.
    pub fn record(&mut self, command: &mut dyn GameCommand) -> Result<u32, LogError> {
        let len = self.records.len();
        let sequence = u32::try_from(len).ok().ok_or(LogError::TooLarge { len })?;
        let payload = encode_command(command)?;
        self.records.push(LogRecord {
            sequence,
            command_type: command.command_type(),
            payload,
        });
        Ok(sequence)
    }

    /// Write the whole log.
    pub fn encode(&self, w: &mut dyn Write) -> Result<(), LogError> {
        w.write_all(&MAGIC)?;
        write_u8(w, FORMAT_VERSION)?;
        w.write_all(&self.header.recorded_at.timestamp_millis().to_le_bytes())?;
        w.write_all(&self.header.initial_checksum.to_le_bytes())?;

        write_len(w, self.records.len())?;
        for record in &self.records {
            write_u32_le(w, record.sequence)?;
            write_u8(w, record.command_type.tag())?;
            write_len(w, record.payload.len())?;
            w.write_all(&record.payload)?;
        }
        Ok(())
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, LogError> {
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Read and validate a whole log.
    pub fn decode(r: &mut dyn Read) -> Result<Self, LogError> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(LogError::InvalidMagic);
        }
        let version = read_u8(r)?;
        if version != FORMAT_VERSION {
            return Err(LogError::UnsupportedVersion { found: version });
        }

        let millis = i64::from_le_bytes(read_array(r)?);
        let recorded_at =
            DateTime::from_timestamp_millis(millis).ok_or(LogError::InvalidTimestamp { millis })?;
        let initial_checksum = u64::from_le_bytes(read_array(r)?);

        let count = read_u32_le(r)?;
        let mut records = Vec::new();
        for _ in 0..count {
            let sequence = read_u32_le(r)?;
            let command_type = CommandType::from_tag(read_u8(r)?)?;
            let payload = read_length_prefixed_bytes(r)?;
            records.push(LogRecord {
                sequence,
                command_type,
                payload,
            });
        }

        Ok(Self {
            header: LogHeader {
                recorded_at,
                initial_checksum,
            },
            records,
        })
    }
}

fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), LogError> {
    w.write_all(&[v])?;
    Ok(())
}

fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), LogError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn write_len(w: &mut dyn Write, len: usize) -> Result<(), LogError> {
    let v = u32::try_from(len).ok().ok_or(LogError::TooLarge { len })?;
    write_u32_le(w, v)
}

fn read_array<const N: usize>(r: &mut dyn Read) -> Result<[u8; N], LogError> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

fn read_u8(r: &mut dyn Read) -> Result<u8, LogError> {
    let [v] = read_array::<1>(r)?;
    Ok(v)
}

fn read_u32_le(r: &mut dyn Read) -> Result<u32, LogError> {
    Ok(u32::from_le_bytes(read_array(r)?))
}

/// Reads through `take` so a corrupt length cannot force a huge allocation.
fn read_length_prefixed_bytes(r: &mut dyn Read) -> Result<Vec<u8>, LogError> {
    let len = read_u32_le(r)?;
    let mut buf = Vec::new();
    Read::take(&mut *r, u64::from(len)).read_to_end(&mut buf)?;
    if buf.len() != usize::try_from(len).unwrap_or(usize::MAX) {
        return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use parkway_actions::{RideEntranceExitPlaceAction, RideEntranceExitRemoveAction};
    use parkway_types::{CommandFlags, Direction, RideId, StationIndex, TileCoords};

    use super::*;

    fn sample_log() -> CommandLog {
        let recorded_at = DateTime::from_timestamp_millis(1_760_000_000_123).unwrap();
        let mut log = CommandLog::with_timestamp(0xDEAD_BEEF, recorded_at);
        let mut place = RideEntranceExitPlaceAction::new(
            TileCoords::new(3, 4),
            Direction::from_masked(1),
            RideId::new(0),
            StationIndex::new(0),
            true,
        );
        let mut remove = RideEntranceExitRemoveAction::new(
            TileCoords::new(3, 4),
            RideId::new(0),
            StationIndex::new(0),
            true,
        )
        .with_flags(CommandFlags::ALLOW_DURING_PAUSED);
        log.record(&mut place).unwrap();
        log.record(&mut remove).unwrap();
        log
    }

    #[test]
    fn records_are_numbered_in_order() {
        let log = sample_log();
        let sequences: Vec<u32> = log.records().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![0, 1]);
        assert_eq!(
            log.records().first().map(|r| r.command_type),
            Some(CommandType::RideEntranceExitPlace)
        );
    }

    #[test]
    fn encoded_log_decodes_to_the_same_log() {
        let log = sample_log();
        let bytes = log.to_bytes().unwrap();
        assert_eq!(bytes.get(..4), Some(MAGIC.as_slice()));
        let decoded = CommandLog::decode(&mut bytes.as_slice()).unwrap();
        assert_eq!(decoded, log);
    }

    #[test]
    fn timestamp_is_truncated_to_millis() {
        let precise = DateTime::from_timestamp(1_760_000_000, 123_456_789).unwrap();
        let log = CommandLog::with_timestamp(0, precise);
        assert_eq!(log.header().recorded_at.timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut bytes = sample_log().to_bytes().unwrap();
        if let Some(first) = bytes.first_mut() {
            *first = b'X';
        }
        let result = CommandLog::decode(&mut bytes.as_slice());
        assert!(matches!(result, Err(LogError::InvalidMagic)));
    }

    #[test]
    fn future_version_is_rejected() {
        let mut bytes = sample_log().to_bytes().unwrap();
        if let Some(version) = bytes.get_mut(4) {
            *version = 9;
        }
        let result = CommandLog::decode(&mut bytes.as_slice());
        assert!(matches!(result, Err(LogError::UnsupportedVersion { found: 9 })));
    }

    #[test]
    fn truncated_payload_is_an_io_error() {
        let bytes = sample_log().to_bytes().unwrap();
        let mut cut = bytes.get(..bytes.len().saturating_sub(3)).unwrap();
        let result = CommandLog::decode(&mut cut);
        assert!(matches!(result, Err(LogError::Io { .. })));
    }

    #[test]
    fn unknown_command_tag_is_a_stream_error() {
        let mut bytes = sample_log().to_bytes().unwrap();
        // magic, version, timestamp, checksum, count, first sequence
        if let Some(tag) = bytes.get_mut(29) {
            *tag = 200;
        }
        let result = CommandLog::decode(&mut bytes.as_slice());
        assert!(matches!(
            result,
            Err(LogError::Stream {
                source: StreamError::UnknownCommandType(200)
            })
        ));
    }
}
