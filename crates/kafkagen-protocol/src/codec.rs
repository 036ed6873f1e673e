//! Big-endian wire codec used by generated messages
//!
//! Fixed-width integers are written big-endian. Strings carry an `int16`
//! length prefix, byte blobs and arrays an `int32` one; a length of `-1`
//! (null) reads back as empty.

use thiserror::Error;

/// Errors raised while encoding or decoding wire data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("invalid {kind} length {length}")]
    InvalidLength { kind: &'static str, length: i64 },

    #[error("string is not valid UTF-8")]
    InvalidUtf8,
}

/// A message that knows its own versioned wire layout.
pub trait Message {
    /// Replace `self` with the value decoded at `version`.
    fn decode(&mut self, d: &mut Decoder<'_>, version: i16) -> Result<(), CodecError>;

    /// Append the `version` layout of `self`.
    fn encode(&self, e: &mut Encoder, version: i16) -> Result<(), CodecError>;
}

/// Growable output buffer.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_bool(&mut self, v: bool) {
        self.buf.push(u8::from(v));
    }

    pub fn write_int8(&mut self, v: i8) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_int16(&mut self, v: i16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_int32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_int64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Write an `int16` length followed by the UTF-8 bytes.
    pub fn write_string(&mut self, v: &str) -> Result<(), CodecError> {
        let len = i16::try_from(v.len()).map_err(|_| CodecError::InvalidLength {
            kind: "string",
            length: v.len() as i64,
        })?;
        self.write_int16(len);
        self.buf.extend_from_slice(v.as_bytes());
        Ok(())
    }

    /// Write an `int32` length followed by the raw bytes.
    pub fn write_bytes(&mut self, v: &[u8]) -> Result<(), CodecError> {
        self.write_length("bytes", v.len())?;
        self.buf.extend_from_slice(v);
        Ok(())
    }

    /// Write the `int32` element count that precedes an array.
    pub fn write_array_len(&mut self, len: usize) -> Result<(), CodecError> {
        self.write_length("array", len)
    }

    fn write_length(&mut self, kind: &'static str, len: usize) -> Result<(), CodecError> {
        let len = i32::try_from(len).map_err(|_| CodecError::InvalidLength {
            kind,
            length: len as i64,
        })?;
        self.write_int32(len);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over an input slice.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    buf: &'a [u8],
}

impl<'a> Decoder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        self.buf
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.buf.len() < n {
            return Err(CodecError::UnexpectedEof {
                needed: n,
                remaining: self.buf.len(),
            });
        }
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        Ok(self.take_array::<1>()?[0] != 0)
    }

    pub fn read_int8(&mut self) -> Result<i8, CodecError> {
        Ok(i8::from_be_bytes(self.take_array()?))
    }

    pub fn read_int16(&mut self) -> Result<i16, CodecError> {
        Ok(i16::from_be_bytes(self.take_array()?))
    }

    pub fn read_int32(&mut self) -> Result<i32, CodecError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_int64(&mut self) -> Result<i64, CodecError> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let len = self.read_int16()?;
        let len = checked_length("string", i64::from(len))?;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }

    pub fn read_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        let len = self.read_int32()?;
        let len = checked_length("bytes", i64::from(len))?;
        Ok(self.take(len)?.to_vec())
    }

    pub fn read_array_len(&mut self) -> Result<usize, CodecError> {
        let len = self.read_int32()?;
        checked_length("array", i64::from(len))
    }
}

/// `-1` is null and reads as zero; other negatives are corrupt.
fn checked_length(kind: &'static str, length: i64) -> Result<usize, CodecError> {
    match length {
        -1 => Ok(0),
        n if n < 0 => Err(CodecError::InvalidLength { kind, length: n }),
        n => usize::try_from(n).map_err(|_| CodecError::InvalidLength { kind, length: n }),
    }
}

/// Encode `message` at `version` into a fresh buffer.
pub fn encode_to_vec<M: Message>(message: &M, version: i16) -> Result<Vec<u8>, CodecError> {
    let mut e = Encoder::new();
    message.encode(&mut e, version)?;
    Ok(e.into_bytes())
}

/// Decode a `version` layout from `data` into a default-initialized message.
///
/// Trailing bytes are left unread and ignored.
pub fn decode_from_slice<M: Message + Default>(data: &[u8], version: i16) -> Result<M, CodecError> {
    let mut message = M::default();
    message.decode(&mut Decoder::new(data), version)?;
    Ok(message)
}
