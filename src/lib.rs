pub mod chunks;
mod color;
mod crc;
mod decoder;
mod encoder;
mod icons;
mod image_data;
mod scanlines;

pub use color::Rgb;
pub use decoder::{decode_solid, SolidImage};
pub use encoder::{encode, SolidPng};
pub use icons::{create_icons, write_icon, IconSpec, DEFAULT_ICONS};
