use std::io::Cursor;

use solid_png::{
    chunks::{iter_chunks, parse_signature, SIGNATURE},
    encode, Rgb, DEFAULT_ICONS,
};

const INDIGO: Rgb = Rgb::new(99, 102, 241);

/// Decodes with the `png` crate, returning width, height and RGB samples.
fn decode_reference(bytes: &[u8]) -> (u32, u32, Vec<u8>) {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    assert_eq!(info.color_type, png::ColorType::Rgb);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);
    buf.truncate(info.buffer_size());
    (info.width, info.height, buf)
}

fn pixel(samples: &[u8], width: u32, x: u32, y: u32) -> Rgb {
    let offset = ((y * width + x) * 3) as usize;
    Rgb::new(samples[offset], samples[offset + 1], samples[offset + 2])
}

#[test]
fn signature_comes_first() {
    for (width, height) in [(1, 1), (3, 7), (192, 192)] {
        assert_eq!(&encode(width, height, INDIGO)[..8], SIGNATURE);
    }
    assert_eq!(SIGNATURE, &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a]);
}

#[test]
fn chunk_lengths_and_crcs_are_consistent() {
    let bytes = encode(33, 17, INDIGO);
    let (mut rest, _) = parse_signature(&bytes).unwrap();
    // Walk the framing by hand alongside the library reader.
    let mut types = vec![];
    for chunk in iter_chunks(rest) {
        let chunk = chunk.unwrap();
        let declared = u32::from_be_bytes(rest[0..4].try_into().unwrap()) as usize;
        assert_eq!(declared, chunk.data.len());
        assert_eq!(&rest[4..8], chunk.chunk_type);
        assert!(chunk.crc_matches());
        types.push(chunk.type_name().into_owned());
        rest = &rest[12 + declared..];
    }
    assert_eq!(types, ["IHDR", "IDAT", "IEND"]);
    assert!(rest.is_empty());
}

#[test]
fn round_trips_through_a_standard_decoder() {
    for (width, height, color) in [
        (192, 192, INDIGO),
        (5, 3, Rgb::new(255, 0, 128)),
        (1, 40, Rgb::new(1, 2, 3)),
    ] {
        let (w, h, samples) = decode_reference(&encode(width, height, color));
        assert_eq!((w, h), (width, height));
        assert_eq!(samples.len(), (width * height * 3) as usize);
        assert!(samples.chunks_exact(3).all(|p| p == color.to_bytes()));
    }
}

#[test]
fn icon_192_corners() {
    let (width, height, samples) = decode_reference(&encode(192, 192, INDIGO));
    assert_eq!((width, height), (192, 192));
    assert_eq!(pixel(&samples, width, 0, 0), INDIGO);
    assert_eq!(pixel(&samples, width, 191, 191), INDIGO);
}

#[test]
fn icon_512_header_width() {
    let bytes = encode(512, 512, INDIGO);
    // signature, length, "IHDR", then width
    assert_eq!(&bytes[12..16], b"IHDR");
    assert_eq!(&bytes[16..20], &[0x00, 0x00, 0x02, 0x00]);
    assert_eq!(&bytes[20..24], &[0x00, 0x00, 0x02, 0x00]);
    assert_eq!(&bytes[24..29], &[8, 2, 0, 0, 0]);
}

#[test]
fn single_black_pixel() {
    let bytes = encode(1, 1, Rgb::new(0, 0, 0));
    let (width, height, samples) = decode_reference(&bytes);
    assert_eq!((width, height), (1, 1));
    assert_eq!(samples, vec![0, 0, 0]);
    insta::assert_snapshot!(
        format!("{:02x?}", &bytes[8..33]),
        @"[00, 00, 00, 0d, 49, 48, 44, 52, 00, 00, 00, 01, 00, 00, 00, 01, 08, 02, 00, 00, 00, 90, 77, 53, de]"
    );
}

#[test]
fn encoding_is_deterministic() {
    assert_eq!(encode(512, 512, INDIGO), encode(512, 512, INDIGO));
}

#[test]
fn default_icons_decode_to_their_spec() {
    for icon in DEFAULT_ICONS {
        let (width, height, samples) = decode_reference(&icon.encode());
        assert_eq!((width, height), (icon.size, icon.size));
        assert!(samples.chunks_exact(3).all(|p| p == icon.color.to_bytes()));
        assert_eq!(
            solid_png::decode_solid(&icon.encode()).unwrap().color,
            Some(icon.color)
        );
    }
}
