use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};

use crate::{color::Rgb, decoder::decode_solid, encoder::SolidPng};

/// A square, single-color application icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSpec {
    pub file_name: &'static str,
    pub size: u32,
    pub color: Rgb,
}
impl IconSpec {
    pub fn image(&self) -> SolidPng {
        SolidPng::new(self.size, self.size, self.color)
    }

    pub fn encode(&self) -> Vec<u8> {
        self.image().encode()
    }
}

pub const DEFAULT_ICONS: [IconSpec; 2] = [
    IconSpec {
        file_name: "icon-192x192.png",
        size: 192,
        color: Rgb::INDIGO,
    },
    IconSpec {
        file_name: "icon-512x512.png",
        size: 512,
        color: Rgb::INDIGO,
    },
];

/// Encodes `icon` and writes it into `dir`, returning the path written.
pub fn write_icon(dir: &Path, icon: &IconSpec) -> anyhow::Result<PathBuf> {
    let path = dir.join(icon.file_name);
    let bytes = icon.encode();
    fs::write(&path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

/// Writes every icon into `dir` and reads each one back, failing if a file
/// doesn't decode to its size and color.
pub fn create_icons(dir: &Path, icons: &[IconSpec]) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(icons.len());
    for icon in icons {
        let path = write_icon(dir, icon)?;
        let bytes =
            fs::read(&path).with_context(|| format!("Failed to read back {}", path.display()))?;
        let image =
            decode_solid(&bytes).with_context(|| format!("{} did not verify", path.display()))?;
        if (image.width, image.height, image.color) != (icon.size, icon.size, Some(icon.color)) {
            bail!(
                "{} decoded as {}x{} {:?}, expected {}x{} {}",
                path.display(),
                image.width,
                image.height,
                image.color,
                icon.size,
                icon.size,
                icon.color
            );
        }
        written.push(path);
    }
    Ok(written)
}
