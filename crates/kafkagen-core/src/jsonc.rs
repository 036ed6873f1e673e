//! Relaxed JSON: `//` line comments removed from a byte stream
//!
//! Comment bytes are not discarded. They are collected, in stream order and
//! including the leading `//` and the trailing newline, so the generator can
//! re-emit them as documentation.

use std::io::{self, Read};

const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Normal,
    /// One `/` seen and held back.
    Slash,
    Comment,
}

/// Incremental comment filter.
///
/// Input may be split anywhere: a `/` ending one chunk is held until the next
/// chunk decides whether it starts a comment.
#[derive(Debug, Default)]
pub struct CommentFilter {
    state: State,
    comments: Vec<u8>,
}

impl CommentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter one chunk, appending the non-comment bytes to `out`.
    ///
    /// The newline ending a comment is kept on both sides so that line
    /// numbers in the filtered stream match the source.
    pub fn filter(&mut self, mut input: &[u8], out: &mut Vec<u8>) {
        while let Some(&first) = input.first() {
            match self.state {
                State::Normal => match input.iter().position(|&b| b == b'/') {
                    Some(i) => {
                        out.extend_from_slice(&input[..i]);
                        self.state = State::Slash;
                        input = &input[i + 1..];
                    }
                    None => {
                        out.extend_from_slice(input);
                        return;
                    }
                },
                State::Slash => {
                    if first == b'/' {
                        self.comments.extend_from_slice(b"//");
                        self.state = State::Comment;
                    } else {
                        out.push(b'/');
                        out.push(first);
                        self.state = State::Normal;
                    }
                    input = &input[1..];
                }
                State::Comment => match input.iter().position(|&b| b == b'\n') {
                    Some(i) => {
                        self.comments.extend_from_slice(&input[..=i]);
                        out.push(b'\n');
                        self.state = State::Normal;
                        input = &input[i + 1..];
                    }
                    None => {
                        self.comments.extend_from_slice(input);
                        return;
                    }
                },
            }
        }
    }

    /// Comment bytes collected so far.
    pub fn comments(&self) -> &[u8] {
        &self.comments
    }

    pub fn into_comments(self) -> Vec<u8> {
        self.comments
    }
}

/// A [`Read`] adapter that removes `//` comments from the wrapped reader.
///
/// End of input while a `/` is held or a comment is open is not an error; the
/// held `/` is dropped.
pub struct JsoncReader<R> {
    inner: R,
    filter: CommentFilter,
    chunk: Vec<u8>,
    pending: Vec<u8>,
    pos: usize,
}

impl<R: Read> JsoncReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_chunk_size(inner, DEFAULT_CHUNK_SIZE)
    }

    /// Create a reader that pulls at most `chunk_size` bytes per inner read.
    pub fn with_chunk_size(inner: R, chunk_size: usize) -> Self {
        Self {
            inner,
            filter: CommentFilter::new(),
            chunk: vec![0; chunk_size.max(1)],
            pending: Vec::new(),
            pos: 0,
        }
    }

    pub fn comments(&self) -> &[u8] {
        self.filter.comments()
    }

    pub fn into_comments(self) -> Vec<u8> {
        self.filter.into_comments()
    }
}

impl<R: Read> Read for JsoncReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        while self.pos == self.pending.len() {
            self.pending.clear();
            self.pos = 0;

            let n = match self.inner.read(&mut self.chunk) {
                Ok(0) => return Ok(0),
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            self.filter.filter(&self.chunk[..n], &mut self.pending);
        }

        let n = buf.len().min(self.pending.len() - self.pos);
        buf[..n].copy_from_slice(&self.pending[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Filter a whole buffer at once, returning `(filtered, comments)`.
pub fn strip_comments(input: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let mut filter = CommentFilter::new();
    let mut out = Vec::with_capacity(input.len());
    filter.filter(input, &mut out);
    (out, filter.into_comments())
}
