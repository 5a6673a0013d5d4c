use std::borrow::Cow;

use anyhow::anyhow;
use nom::{
    combinator::{all_consuming, map_res},
    number::complete::{be_u32, u8},
    sequence::tuple,
};

use super::{parse_error, WritableChunk};

pub const HEADER: &[u8; 4] = b"IHDR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IHDRChunk {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: Interlacing,
}
impl IHDRChunk {
    /// 8-bit truecolor, deflate, adaptive filtering method 0, no interlace.
    pub fn truecolor(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: 8,
            color_type: ColorType::Truecolor,
            compression_method: 0,
            filter_method: 0,
            interlace_method: Interlacing::None,
        }
    }

    pub fn from_bytes(chunk_data: &[u8]) -> anyhow::Result<Self> {
        let (
            _,
            (
                width,
                height,
                bit_depth,
                color_type,
                compression_method,
                filter_method,
                interlace_method,
            ),
        ) = all_consuming(tuple((
            be_u32,
            be_u32,
            u8,
            map_res(u8, ColorType::try_from),
            u8,
            u8,
            map_res(u8, Interlacing::try_from),
        )))(chunk_data)
        .map_err(|e| parse_error("IHDR", e))?;
        Ok(Self {
            width,
            height,
            bit_depth,
            color_type,
            compression_method,
            filter_method,
            interlace_method,
        })
    }

    /// Bytes in one serialized scanline, filter byte included. `None` if it
    /// doesn't fit in a `usize`.
    pub(crate) fn scanline_size(&self) -> Option<usize> {
        let bits = (self.width as usize)
            .checked_mul(self.color_type.channel_count() as usize)?
            .checked_mul(self.bit_depth as usize)?;
        bits.div_ceil(8).checked_add(1)
    }

    /// Bytes of unfiltered image data: every scanline of the image.
    pub(crate) fn image_data_size(&self) -> Option<usize> {
        self.scanline_size()?.checked_mul(self.height as usize)
    }
}
impl WritableChunk for IHDRChunk {
    const HEADER: &'static [u8; 4] = HEADER;

    fn data(&self) -> Cow<'_, [u8]> {
        let mut bytes = Vec::with_capacity(13);
        bytes.extend(self.width.to_be_bytes());
        bytes.extend(self.height.to_be_bytes());
        bytes.extend([
            self.bit_depth,
            self.color_type as u8,
            self.compression_method,
            self.filter_method,
            self.interlace_method as u8,
        ]);
        Cow::Owned(bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Greyscale = 0,
    Truecolor = 2,
    IndexedColor = 3,
    GreyscaleWithAlpha = 4,
    TruecolorWithAlpha = 6,
}
impl TryFrom<u8> for ColorType {
    type Error = anyhow::Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Greyscale),
            2 => Ok(Self::Truecolor),
            3 => Ok(Self::IndexedColor),
            4 => Ok(Self::GreyscaleWithAlpha),
            6 => Ok(Self::TruecolorWithAlpha),
            i => Err(anyhow!("{i} is not a PNG color type")),
        }
    }
}
impl ColorType {
    pub fn channel_count(&self) -> u8 {
        match self {
            Self::Greyscale => 1,
            Self::IndexedColor => 1,
            Self::GreyscaleWithAlpha => 2,
            Self::Truecolor => 3,
            Self::TruecolorWithAlpha => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interlacing {
    None = 0,
    Adam7 = 1,
}
impl TryFrom<u8> for Interlacing {
    type Error = anyhow::Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Adam7),
            i => Err(anyhow!("{i} is not a PNG interlace method")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorType, IHDRChunk, Interlacing};
    use crate::chunks::WritableChunk;

    #[test]
    fn truecolor_header_bytes() {
        let header = IHDRChunk::truecolor(512, 192);
        assert_eq!(
            header.data().as_ref(),
            &[0, 0, 2, 0, 0, 0, 0, 192, 8, 2, 0, 0, 0]
        );
        insta::assert_snapshot!(
            format!("{:02x?}", header.to_bytes()),
            @"[00, 00, 00, 0d, 49, 48, 44, 52, 00, 00, 02, 00, 00, 00, 00, c0, 08, 02, 00, 00, 00, fd, 6d, 4c, 30]"
        );
    }

    #[test]
    fn parses_what_it_writes() {
        let header = IHDRChunk::truecolor(7, 3);
        assert_eq!(IHDRChunk::from_bytes(&header.data()).unwrap(), header);
    }

    #[test]
    fn parses_other_color_types() {
        let parsed = IHDRChunk::from_bytes(&[0, 0, 0, 4, 0, 0, 0, 5, 16, 6, 0, 0, 1]).unwrap();
        assert_eq!(parsed.width, 4);
        assert_eq!(parsed.height, 5);
        assert_eq!(parsed.bit_depth, 16);
        assert_eq!(parsed.color_type, ColorType::TruecolorWithAlpha);
        assert_eq!(parsed.interlace_method, Interlacing::Adam7);
    }

    #[test]
    fn rejects_bad_headers() {
        // unknown color type
        assert!(IHDRChunk::from_bytes(&[0, 0, 0, 1, 0, 0, 0, 1, 8, 5, 0, 0, 0]).is_err());
        // unknown interlace method
        assert!(IHDRChunk::from_bytes(&[0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 2]).is_err());
        // too short, too long
        assert!(IHDRChunk::from_bytes(&[0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0]).is_err());
        assert!(IHDRChunk::from_bytes(&[0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 0, 0]).is_err());
    }

    #[test]
    fn scanline_size_counts_filter_byte() {
        assert_eq!(IHDRChunk::truecolor(192, 1).scanline_size(), Some(577));
        assert_eq!(IHDRChunk::truecolor(0, 1).scanline_size(), Some(1));
        assert_eq!(IHDRChunk::truecolor(192, 10).image_data_size(), Some(5770));
    }

    #[test]
    fn oversized_dimensions_do_not_overflow() {
        let header = IHDRChunk::truecolor(u32::MAX, u32::MAX);
        assert!(header.scanline_size().is_some());
        assert_eq!(header.image_data_size(), None);
    }
}
