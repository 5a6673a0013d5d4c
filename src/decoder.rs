use anyhow::{anyhow, bail, Context};

use crate::{
    chunks::{
        ihdr::{ColorType, IHDRChunk, Interlacing},
        iter_chunks, parse_signature, Chunk, ChunkIter,
    },
    color::Rgb,
    image_data::decompress_data,
    scanlines::unfiltered_rows,
};

/// What a solid-color PNG decodes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolidImage {
    pub width: u32,
    pub height: u32,
    /// `None` when the image has no pixels.
    pub color: Option<Rgb>,
}

pub(crate) struct PNGDecoder<'a, State> {
    chunks: ChunkIter<'a>,
    state: State,
}

pub(crate) struct Start;
pub(crate) struct Header(IHDRChunk);
pub(crate) struct Data {
    header: IHDRChunk,
    compressed: Vec<u8>,
}

impl<'a> PNGDecoder<'a, Start> {
    pub(crate) fn new(data: &'a [u8]) -> anyhow::Result<Self> {
        let (rest, _) = parse_signature(data)
            .map_err(|_| anyhow!("input doesn't start with expected signature"))?;
        Ok(Self {
            chunks: iter_chunks(rest),
            state: Start,
        })
    }

    pub(crate) fn parse_ihdr(mut self) -> anyhow::Result<PNGDecoder<'a, Header>> {
        let chunk = self
            .chunks
            .next()
            .ok_or_else(|| anyhow!("no chunks after signature"))??;
        let header = match chunk.parse()? {
            Chunk::IHDR(header) => header,
            _ => bail!("first chunk is {}, expected IHDR", chunk.type_name()),
        };
        if header.bit_depth != 8
            || header.color_type != ColorType::Truecolor
            || header.compression_method != 0
            || header.filter_method != 0
            || header.interlace_method != Interlacing::None
        {
            bail!("only 8-bit non-interlaced truecolor is supported, got {header:?}");
        }
        Ok(PNGDecoder {
            chunks: self.chunks,
            state: Header(header),
        })
    }
}

impl<'a> PNGDecoder<'a, Header> {
    /// Gathers every IDAT up to IEND. Ancillary chunks are skipped; a second
    /// IHDR or a missing IEND is an error.
    pub(crate) fn parse_idat(self) -> anyhow::Result<PNGDecoder<'a, Data>> {
        let Header(header) = self.state;
        let mut compressed = vec![];
        let mut idat_count = 0;
        let mut chunks = self.chunks;
        loop {
            let chunk = chunks
                .next()
                .ok_or_else(|| anyhow!("stream ended without IEND"))??;
            match chunk.parse()? {
                Chunk::IDAT(idat) => {
                    idat_count += 1;
                    compressed.extend_from_slice(idat.data);
                }
                Chunk::IEND => break,
                Chunk::IHDR(_) => bail!("duplicate IHDR"),
                Chunk::Unknown(raw) => log::debug!("skipping {raw}"),
            }
        }
        if idat_count == 0 {
            bail!("Couldn't find an IDAT");
        }
        log::debug!("read {idat_count} IDAT chunk(s), {} bytes", compressed.len());
        Ok(PNGDecoder {
            chunks,
            state: Data { header, compressed },
        })
    }
}

impl PNGDecoder<'_, Data> {
    pub(crate) fn finish(self) -> anyhow::Result<SolidImage> {
        let Data { header, compressed } = self.state;
        let expected = header.image_data_size().ok_or_else(|| {
            anyhow!("{}x{} image is too large", header.width, header.height)
        })?;
        // One byte of slack leaves overlong data to the length check.
        let data = decompress_data(&compressed, expected.saturating_add(1))?;
        let mut color = None;
        for (y, row) in unfiltered_rows(&data, &header)?.enumerate() {
            for (x, pixel) in row.chunks_exact(3).enumerate() {
                let pixel = Rgb::new(pixel[0], pixel[1], pixel[2]);
                match color {
                    None => color = Some(pixel),
                    Some(expected) if expected != pixel => {
                        bail!("pixel ({x}, {y}) is {pixel}, expected {expected}")
                    }
                    Some(_) => (),
                }
            }
        }
        Ok(SolidImage {
            width: header.width,
            height: header.height,
            color,
        })
    }
}

/// Reads back a stream shaped like the ones [`crate::encode`] writes and
/// checks that every pixel has the same color.
pub fn decode_solid(bytes: &[u8]) -> anyhow::Result<SolidImage> {
    PNGDecoder::new(bytes)?
        .parse_ihdr()
        .context("Failed to read image header.")?
        .parse_idat()
        .context("Failed to read image data.")?
        .finish()
}
