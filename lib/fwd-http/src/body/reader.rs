/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use tokio::io::{AsyncBufRead, AsyncRead, ReadBuf};

use super::HttpBodyType;
use crate::HttpChunkedLine;

enum NextReadType {
    EndOfFile,
    FixedLength,
    ChunkSize,
    ChunkEnd,
    Trailer,
}

/// Read out the body of a http message as it is on the wire.
///
/// The chunk size lines, the chunk endings and the trailer are also returned for chunked body.
/// The reader will never read beyond the end of the body.
pub struct HttpBodyReader<'a, R> {
    stream: &'a mut R,
    body_type: HttpBodyType,
    next_read_type: NextReadType,
    body_line_max_len: usize,

    left_fixed_size: u64,
    line_cache: Vec<u8>,

    finished: bool,
    read_size: u64,
}

impl<'a, R> HttpBodyReader<'a, R>
where
    R: AsyncBufRead + Unpin,
{
    const DEFAULT_LINE_SIZE: usize = 64;

    pub fn new(stream: &'a mut R, body_type: HttpBodyType, body_line_max_len: usize) -> Self {
        let (next_read_type, left_fixed_size) = match body_type {
            HttpBodyType::ContentLength(0) => (NextReadType::EndOfFile, 0),
            HttpBodyType::ContentLength(size) => (NextReadType::FixedLength, size),
            HttpBodyType::Chunked => (NextReadType::ChunkSize, 0),
        };
        HttpBodyReader {
            stream,
            body_type,
            next_read_type,
            body_line_max_len,
            left_fixed_size,
            line_cache: Vec::with_capacity(Self::DEFAULT_LINE_SIZE),
            finished: false,
            read_size: 0,
        }
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// total bytes read out, including the chunked encoding
    pub fn read_size(&self) -> u64 {
        self.read_size
    }

    fn poll_fixed(
        &mut self,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<usize>> {
        let buf_len = usize::try_from(self.left_fixed_size)
            .unwrap_or(usize::MAX)
            .min(buf.remaining());
        let mut limited_buf = ReadBuf::new(buf.initialize_unfilled_to(buf_len));
        ready!(Pin::new(&mut *self.stream).poll_read(cx, &mut limited_buf))?;
        let nr = limited_buf.filled().len();
        if nr == 0 {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "reader closed while reading fixed length body",
            )));
        }
        buf.advance(nr);

        self.left_fixed_size -= nr as u64;
        if self.left_fixed_size == 0 {
            self.next_read_type = match self.body_type {
                HttpBodyType::ContentLength(_) => NextReadType::EndOfFile,
                HttpBodyType::Chunked => NextReadType::ChunkEnd,
            };
        }
        Poll::Ready(Ok(nr))
    }

    fn poll_line(
        &mut self,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<usize>> {
        let mut reader = Pin::new(&mut *self.stream);
        let cache = ready!(reader.as_mut().poll_fill_buf(cx))?;
        if cache.is_empty() {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "reader closed while reading chunked body line",
            )));
        }

        // do not parse more data than really needed
        let max_len = buf.remaining();
        let cache = if max_len < cache.len() {
            &cache[0..max_len]
        } else {
            cache
        };

        let (line_end, nw) = match memchr::memchr(b'\n', cache) {
            Some(offset) => (true, offset + 1),
            None => (false, cache.len()),
        };
        if self.line_cache.len() + nw > self.body_line_max_len {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "chunked body line too long",
            )));
        }
        buf.put_slice(&cache[0..nw]);
        self.line_cache.extend_from_slice(&cache[0..nw]);
        reader.as_mut().consume(nw);

        if line_end {
            self.handle_line()?;
            self.line_cache.clear();
        }
        Poll::Ready(Ok(nw))
    }

    fn handle_line(&mut self) -> io::Result<()> {
        let Some(line) = self.line_cache.strip_suffix(b"\r\n") else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "invalid chunked body line ending",
            ));
        };

        match self.next_read_type {
            NextReadType::ChunkSize => {
                let chunk = HttpChunkedLine::parse(self.line_cache.as_slice())
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                if chunk.chunk_size == 0 {
                    self.next_read_type = NextReadType::Trailer;
                } else {
                    self.left_fixed_size = chunk.chunk_size;
                    self.next_read_type = NextReadType::FixedLength;
                }
            }
            NextReadType::ChunkEnd => {
                if !line.is_empty() {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        "invalid chunk ending",
                    ));
                }
                self.next_read_type = NextReadType::ChunkSize;
            }
            NextReadType::Trailer => {
                if line.is_empty() {
                    self.next_read_type = NextReadType::EndOfFile;
                }
            }
            NextReadType::EndOfFile | NextReadType::FixedLength => unreachable!(),
        }
        Ok(())
    }
}

impl<R> AsyncRead for HttpBodyReader<'_, R>
where
    R: AsyncBufRead + Unpin,
{
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if buf.remaining() == 0 {
            return Poll::Ready(Ok(()));
        }

        let nr = match self.next_read_type {
            NextReadType::EndOfFile => {
                self.finished = true;
                return Poll::Ready(Ok(()));
            }
            NextReadType::FixedLength => ready!(self.poll_fixed(cx, buf))?,
            NextReadType::ChunkSize | NextReadType::ChunkEnd | NextReadType::Trailer => {
                ready!(self.poll_line(cx, buf))?
            }
        };
        self.read_size += nr as u64;
        Poll::Ready(Ok(()))
    }
}
