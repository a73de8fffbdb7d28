//! Bidirectional binary serialisation for commands.
//!
//! A [`DataSerialiser`] is either saving (appending to a buffer) or loading
//! (reading from a slice). Commands describe their wire layout once, by
//! passing each field through [`DataSerialiser::serialise`] in order, and the
//! same code encodes and decodes. All integers are little-endian.

use parkway_types::{CommandFlags, Direction, PlayerId, RideId, StationIndex, TileCoords};

use crate::error::StreamError;

/// A value with a fixed wire encoding.
pub trait StreamValue: Sized {
    /// Append the encoding to `out`.
    fn encode(&self, out: &mut Vec<u8>);

    /// Read a value from the stream.
    fn decode(stream: &mut DataSerialiser<'_>) -> Result<Self, StreamError>;
}

#[derive(Debug)]
enum Mode<'a> {
    Saving(Vec<u8>),
    Loading { data: &'a [u8], offset: usize },
}

/// A fixed-order binary encoder/decoder.
#[derive(Debug)]
pub struct DataSerialiser<'a> {
    mode: Mode<'a>,
}

impl DataSerialiser<'static> {
    /// A serialiser that encodes into a fresh buffer.
    pub const fn saving() -> Self {
        Self {
            mode: Mode::Saving(Vec::new()),
        }
    }
}

impl<'a> DataSerialiser<'a> {
    /// A serialiser that decodes from `data`.
    pub const fn loading(data: &'a [u8]) -> Self {
        Self {
            mode: Mode::Loading { data, offset: 0 },
        }
    }

    /// Encode `value`, or overwrite it with the next decoded value.
    pub fn serialise<T: StreamValue>(&mut self, value: &mut T) -> Result<(), StreamError> {
        if let Mode::Saving(out) = &mut self.mode {
            value.encode(out);
        } else {
            *value = T::decode(self)?;
        }
        Ok(())
    }

    /// The encoded bytes. Empty for a loading serialiser.
    pub fn into_bytes(self) -> Vec<u8> {
        match self.mode {
            Mode::Saving(out) => out,
            Mode::Loading { .. } => Vec::new(),
        }
    }

    /// Bytes not yet read. Zero for a saving serialiser.
    pub const fn remaining(&self) -> usize {
        match &self.mode {
            Mode::Saving(_) => 0,
            Mode::Loading { data, offset } => data.len().saturating_sub(*offset),
        }
    }

    /// Fail unless every byte has been read.
    pub const fn finish(&self) -> Result<(), StreamError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(StreamError::TrailingBytes(n)),
        }
    }

    /// Read exactly `N` bytes.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], StreamError> {
        let Mode::Loading { data, offset } = &mut self.mode else {
            return Err(StreamError::UnexpectedEnd {
                offset: 0,
                needed: N,
                remaining: 0,
            });
        };
        let remaining = data.len().saturating_sub(*offset);
        let bytes = offset
            .checked_add(N)
            .and_then(|end| data.get(*offset..end))
            .ok_or(StreamError::UnexpectedEnd {
                offset: *offset,
                needed: N,
                remaining,
            })?;
        let mut array = [0_u8; N];
        array.copy_from_slice(bytes);
        *offset = offset.saturating_add(N);
        Ok(array)
    }
}

impl StreamValue for u8 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(*self);
    }

    fn decode(stream: &mut DataSerialiser<'_>) -> Result<Self, StreamError> {
        let [byte] = stream.read_array::<1>()?;
        Ok(byte)
    }
}

impl StreamValue for u16 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn decode(stream: &mut DataSerialiser<'_>) -> Result<Self, StreamError> {
        Ok(Self::from_le_bytes(stream.read_array()?))
    }
}

impl StreamValue for u32 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn decode(stream: &mut DataSerialiser<'_>) -> Result<Self, StreamError> {
        Ok(Self::from_le_bytes(stream.read_array()?))
    }
}

impl StreamValue for i32 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn decode(stream: &mut DataSerialiser<'_>) -> Result<Self, StreamError> {
        Ok(Self::from_le_bytes(stream.read_array()?))
    }
}

impl StreamValue for bool {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(u8::from(*self));
    }

    fn decode(stream: &mut DataSerialiser<'_>) -> Result<Self, StreamError> {
        match u8::decode(stream)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(StreamError::InvalidValue {
                field: "bool",
                value: u32::from(other),
            }),
        }
    }
}

impl StreamValue for Direction {
    fn encode(&self, out: &mut Vec<u8>) {
        self.into_inner().encode(out);
    }

    fn decode(stream: &mut DataSerialiser<'_>) -> Result<Self, StreamError> {
        let raw = u8::decode(stream)?;
        Self::new(raw).ok_or(StreamError::InvalidValue {
            field: "direction",
            value: u32::from(raw),
        })
    }
}

impl StreamValue for TileCoords {
    fn encode(&self, out: &mut Vec<u8>) {
        self.x.encode(out);
        self.y.encode(out);
    }

    fn decode(stream: &mut DataSerialiser<'_>) -> Result<Self, StreamError> {
        let x = i32::decode(stream)?;
        let y = i32::decode(stream)?;
        Ok(Self::new(x, y))
    }
}

impl StreamValue for RideId {
    fn encode(&self, out: &mut Vec<u8>) {
        self.into_inner().encode(out);
    }

    fn decode(stream: &mut DataSerialiser<'_>) -> Result<Self, StreamError> {
        u16::decode(stream).map(Self::new)
    }
}

impl StreamValue for StationIndex {
    fn encode(&self, out: &mut Vec<u8>) {
        self.into_inner().encode(out);
    }

    fn decode(stream: &mut DataSerialiser<'_>) -> Result<Self, StreamError> {
        u8::decode(stream).map(Self::new)
    }
}

impl StreamValue for PlayerId {
    fn encode(&self, out: &mut Vec<u8>) {
        self.into_inner().encode(out);
    }

    fn decode(stream: &mut DataSerialiser<'_>) -> Result<Self, StreamError> {
        u8::decode(stream).map(Self::new)
    }
}

impl StreamValue for CommandFlags {
    fn encode(&self, out: &mut Vec<u8>) {
        self.bits().encode(out);
    }

    fn decode(stream: &mut DataSerialiser<'_>) -> Result<Self, StreamError> {
        u32::decode(stream).map(Self::from_bits_truncate)
    }
}
