use std::{borrow::Cow, fmt};

use anyhow::{anyhow, bail};
use nom::{
    bytes::complete::{tag, take},
    combinator::map_res,
    number::complete::be_u32,
    IResult,
};

use crate::crc::chunk_crc;

pub mod idat;
pub mod iend;
pub mod ihdr;

pub const SIGNATURE: &[u8; 8] = b"\x89PNG\x0d\x0a\x1a\x0a";

pub fn parse_signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(SIGNATURE)(input)
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug)]
pub enum Chunk<'a> {
    IHDR(ihdr::IHDRChunk),
    IDAT(idat::IDATChunk<&'a [u8]>),
    IEND,
    Unknown(RawChunk<'a>),
}

/// A chunk as framed on the wire, before its data is interpreted.
#[derive(Debug, Clone, Copy)]
pub struct RawChunk<'a> {
    pub chunk_type: &'a [u8; 4],
    pub data: &'a [u8],
    pub crc: u32,
}
impl<'a> RawChunk<'a> {
    pub fn type_name(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.chunk_type)
    }

    pub fn crc_matches(&self) -> bool {
        chunk_crc(self.chunk_type, self.data) == self.crc
    }

    pub fn parse(&self) -> anyhow::Result<Chunk<'a>> {
        match self.chunk_type {
            ihdr::HEADER => Ok(Chunk::IHDR(ihdr::IHDRChunk::from_bytes(self.data)?)),
            idat::HEADER => Ok(Chunk::IDAT(idat::IDATChunk { data: self.data })),
            iend::HEADER => {
                if !self.data.is_empty() {
                    bail!("IEND carries {} bytes of data", self.data.len());
                }
                Ok(Chunk::IEND)
            }
            _ => Ok(Chunk::Unknown(*self)),
        }
    }
}

/// Walks the chunks following the signature. Stops after `IEND` or the first
/// framing/CRC error.
pub fn iter_chunks(source: &[u8]) -> ChunkIter<'_> {
    ChunkIter {
        source,
        finished: false,
    }
}

pub struct ChunkIter<'a> {
    source: &'a [u8],
    finished: bool,
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = anyhow::Result<RawChunk<'a>>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match raw_chunk(self.source) {
            Ok((rest, chunk)) => {
                self.source = rest;
                if chunk.chunk_type == iend::HEADER {
                    self.finished = true;
                }
                if !chunk.crc_matches() {
                    self.finished = true;
                    return Some(Err(anyhow!(
                        "CRC mismatch in {} chunk: stored {:08x}, computed {:08x}",
                        chunk.type_name(),
                        chunk.crc,
                        chunk_crc(chunk.chunk_type, chunk.data),
                    )));
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(parse_error("chunk", e)))
            }
        }
    }
}

fn raw_chunk(input: &[u8]) -> IResult<&[u8], RawChunk<'_>> {
    let (input, length) = be_u32(input)?;
    let (input, chunk_type) = map_res(take(4usize), <&[u8; 4]>::try_from)(input)?;
    let (input, data) = take(length)(input)?;
    let (input, crc) = be_u32(input)?;
    Ok((
        input,
        RawChunk {
            chunk_type,
            data,
            crc,
        },
    ))
}

/// Converts a nom failure into an error that doesn't borrow the input.
pub(crate) fn parse_error(what: &str, e: nom::Err<nom::error::Error<&[u8]>>) -> anyhow::Error {
    match e {
        nom::Err::Incomplete(_) => anyhow!("truncated {what}"),
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            anyhow!("malformed {what} ({:?} with {} bytes left)", e.code, e.input.len())
        }
    }
}

pub trait WritableChunk {
    const HEADER: &'static [u8; 4];

    fn data(&self) -> Cow<'_, [u8]>;

    /// Length, type, data and CRC, ready to append to a stream.
    fn to_bytes(&self) -> Vec<u8> {
        let data = self.data();
        let mut bytes = Vec::with_capacity(data.len() + 12);
        write_chunk(&mut bytes, Self::HEADER, &data);
        bytes
    }
}

pub(crate) fn write_chunk(out: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    out.extend((data.len() as u32).to_be_bytes());
    out.extend(chunk_type);
    out.extend(data);
    out.extend(chunk_crc(chunk_type, data).to_be_bytes());
}

impl fmt::Display for RawChunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} length={} crc={:08x}",
            self.type_name(),
            self.data.len(),
            self.crc
        )
    }
}
