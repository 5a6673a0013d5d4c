use crate::{
    chunks::{idat::IDATChunk, iend::IENDChunk, ihdr::IHDRChunk, WritableChunk, SIGNATURE},
    color::Rgb,
    image_data::compress_data,
    scanlines::solid_scanlines,
};

/// An image of `width`x`height` pixels that all share one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidPng {
    pub width: u32,
    pub height: u32,
    pub color: Rgb,
}
impl SolidPng {
    pub fn new(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            width,
            height,
            color,
        }
    }

    /// Serializes the image as signature, IHDR, a single IDAT and IEND.
    ///
    /// Zero dimensions are not rejected; they yield a stream with no pixels
    /// whose chunks are still well formed.
    pub fn encode(&self) -> Vec<u8> {
        let header = IHDRChunk::truecolor(self.width, self.height);
        let idat = IDATChunk {
            data: compress_data(&solid_scanlines(&header, self.color)),
        };

        let mut bytes = SIGNATURE.to_vec();
        bytes.extend(header.to_bytes());
        bytes.extend(idat.to_bytes());
        bytes.extend(IENDChunk.to_bytes());
        log::debug!(
            "encoded {}x{} {} as {} bytes",
            self.width,
            self.height,
            self.color,
            bytes.len()
        );
        bytes
    }
}

pub fn encode(width: u32, height: u32, color: Rgb) -> Vec<u8> {
    SolidPng::new(width, height, color).encode()
}
