//! Character sources.
//!
//! The scanner pulls characters in blocks through [`CharSource::fill`].
//! A source signals end of input with [`SourceRead::Eof`]; returning
//! `Read(0)` for a non-empty buffer is a protocol violation that the
//! scanner reports as a stalled source rather than looping on it.

use std::collections::VecDeque;
use std::io;
use std::str::Chars;

/// Outcome of one [`CharSource::fill`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SourceRead {
    /// This many characters were written to the front of the buffer.
    Read(usize),
    /// No characters remain.
    Eof,
}

/// Pull-based supplier of characters.
///
/// Once a source has reported end of input it must keep doing so.
pub trait CharSource {
    /// Next character, or `None` at end of input.
    fn next_char(&mut self) -> io::Result<Option<char>>;

    /// Fill the front of `buf` with as many characters as are available.
    ///
    /// The default pulls through [`next_char`](Self::next_char) until the
    /// buffer is full or input ends.
    fn fill(&mut self, buf: &mut [char]) -> io::Result<SourceRead> {
        let mut read = 0;
        for slot in buf.iter_mut() {
            match self.next_char()? {
                Some(ch) => {
                    *slot = ch;
                    read += 1;
                }
                None => break,
            }
        }
        if read == 0 && !buf.is_empty() {
            Ok(SourceRead::Eof)
        } else {
            Ok(SourceRead::Read(read))
        }
    }
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        (**self).next_char()
    }

    fn fill(&mut self, buf: &mut [char]) -> io::Result<SourceRead> {
        (**self).fill(buf)
    }
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        (**self).next_char()
    }

    fn fill(&mut self, buf: &mut [char]) -> io::Result<SourceRead> {
        (**self).fill(buf)
    }
}

// ─── In-memory text ───

/// Source over a borrowed string.
#[derive(Clone, Debug)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        StrSource {
            chars: text.chars(),
        }
    }

    /// The part of the string not yet handed to the scanner.
    pub fn remaining(&self) -> &'a str {
        self.chars.as_str()
    }
}

impl CharSource for StrSource<'_> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Source over any character iterator.
#[derive(Clone, Debug)]
pub struct IterSource<I> {
    iter: std::iter::Fuse<I>,
}

impl<I: Iterator<Item = char>> IterSource<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        IterSource {
            iter: iter.into_iter().fuse(),
        }
    }
}

impl<I: Iterator<Item = char>> CharSource for IterSource<I> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.iter.next())
    }
}

// ─── Byte streams ───

/// Bytes pulled from the reader per refill.
const READ_CHUNK: usize = 8 * 1024;

/// UTF-8 decoding source over an [`io::Read`].
///
/// A multi-byte sequence split across two reads is held back until its
/// remaining bytes arrive. Invalid UTF-8, or a stream that ends inside a
/// sequence, is reported as [`io::ErrorKind::InvalidData`].
#[derive(Debug)]
pub struct Utf8Reader<R> {
    inner: R,
    /// Undecoded bytes: an incomplete trailing sequence, or bytes not yet
    /// handed out because the caller's buffer was full.
    pending: VecDeque<u8>,
}

impl<R: io::Read> Utf8Reader<R> {
    pub fn new(inner: R) -> Self {
        Utf8Reader {
            inner,
            pending: VecDeque::new(),
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Decode complete characters from `pending` into `buf`.
    fn decode_into(&mut self, buf: &mut [char]) -> io::Result<usize> {
        let bytes = self.pending.make_contiguous();
        let (valid, invalid) = match std::str::from_utf8(bytes) {
            Ok(text) => (text, false),
            Err(err) => {
                let valid = std::str::from_utf8(&bytes[..err.valid_up_to()])
                    .map_err(invalid_data)?;
                (valid, err.error_len().is_some())
            }
        };

        let mut written = 0;
        let mut consumed = 0;
        for (slot, ch) in buf.iter_mut().zip(valid.chars()) {
            *slot = ch;
            written += 1;
            consumed += ch.len_utf8();
        }
        self.pending.drain(..consumed);

        if written == 0 && invalid {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stream contains invalid UTF-8",
            ));
        }
        Ok(written)
    }

    fn read_chunk(&mut self) -> io::Result<usize> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.inner.read(&mut chunk) {
                Ok(n) => {
                    self.pending.extend(&chunk[..n]);
                    return Ok(n);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }
}

fn invalid_data(err: std::str::Utf8Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

impl<R: io::Read> CharSource for Utf8Reader<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let mut one = ['\0'];
        match self.fill(&mut one)? {
            SourceRead::Read(0) | SourceRead::Eof => Ok(None),
            SourceRead::Read(_) => Ok(Some(one[0])),
        }
    }

    fn fill(&mut self, buf: &mut [char]) -> io::Result<SourceRead> {
        if buf.is_empty() {
            return Ok(SourceRead::Read(0));
        }
        loop {
            let written = self.decode_into(buf)?;
            if written > 0 {
                return Ok(SourceRead::Read(written));
            }
            if self.read_chunk()? == 0 {
                if self.pending.is_empty() {
                    return Ok(SourceRead::Eof);
                }
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "stream ends inside a UTF-8 sequence",
                ));
            }
        }
    }
}
