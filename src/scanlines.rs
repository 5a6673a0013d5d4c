use anyhow::{anyhow, bail};

use crate::{chunks::ihdr::IHDRChunk, color::Rgb};

/// Per-scanline filter types of PNG filter method 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Filter {
    None = 0,
    Sub = 1,
    Up = 2,
    Average = 3,
    Paeth = 4,
}
impl TryFrom<u8> for Filter {
    type Error = anyhow::Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Sub),
            2 => Ok(Self::Up),
            3 => Ok(Self::Average),
            4 => Ok(Self::Paeth),
            i => Err(anyhow!("{i} is not a PNG filter type")),
        }
    }
}

/// Unfiltered image data where every pixel is `color`: each row is a
/// `Filter::None` byte followed by `width` copies of the color samples.
pub(crate) fn solid_scanlines(header: &IHDRChunk, color: Rgb) -> Vec<u8> {
    let mut row = Vec::with_capacity(header.scanline_size().unwrap_or(0));
    row.push(Filter::None as u8);
    for _ in 0..header.width {
        row.extend(color.to_bytes());
    }
    let mut data = Vec::with_capacity(header.image_data_size().unwrap_or(0));
    for _ in 0..header.height {
        data.extend_from_slice(&row);
    }
    data
}

/// Splits inflated image data into the pixel bytes of each row, requiring
/// every row to be unfiltered.
pub(crate) fn unfiltered_rows<'a>(
    data: &'a [u8],
    header: &IHDRChunk,
) -> anyhow::Result<impl Iterator<Item = &'a [u8]>> {
    let (scanline_size, expected) = header
        .scanline_size()
        .zip(header.image_data_size())
        .ok_or_else(|| anyhow!("{}x{} image is too large", header.width, header.height))?;
    if data.len() != expected {
        bail!(
            "image data is {} bytes, expected {expected} for {}x{}",
            data.len(),
            header.width,
            header.height
        );
    }
    for (index, row) in data.chunks_exact(scanline_size).enumerate() {
        match Filter::try_from(row[0])? {
            Filter::None => (),
            other => bail!("row {index} uses the {other:?} filter, only None is supported"),
        }
    }
    Ok(data.chunks_exact(scanline_size).map(|row| &row[1..]))
}
