use std::path::Path;

pub const PALETTE_SIZE: usize = 256;

/// Substitute for a pixel whose index the table cannot resolve.
pub const SENTINEL_COLOR: [u8; 4] = [255, 0, 255, 255];

/// 256-entry RGBA color table. Entry 0 is fully transparent, every other
/// entry fully opaque.
///
/// Source .PAL channels live in the 0-63 hardware range and are scaled x4
/// on load.
#[derive(Debug, Clone)]
pub struct Palette(pub Vec<[u8; 4]>);

impl Palette {
    /// Fallback ramp: entry i is the source triple (i, i, i), put through the
    /// same x4 channel scaling as a real table.
    pub fn grayscale() -> Self {
        Self(
            (0..PALETTE_SIZE)
                .map(|i| {
                    let v = (i as u8).saturating_mul(4);
                    [v, v, v, alpha(i)]
                })
                .collect(),
        )
    }

    /// Builds a table from raw 3-byte RGB triples. Short tables are padded
    /// with opaque black, long ones truncated; a buffer without a single
    /// complete triple falls back to grayscale.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut entries: Vec<[u8; 4]> = bytes
            .chunks_exact(3)
            .take(PALETTE_SIZE)
            .enumerate()
            .map(|(i, rgb)| {
                [
                    rgb[0].saturating_mul(4),
                    rgb[1].saturating_mul(4),
                    rgb[2].saturating_mul(4),
                    alpha(i),
                ]
            })
            .collect();

        if entries.is_empty() {
            log::warn!("palette data holds no complete RGB triple, using grayscale fallback");
            return Self::grayscale();
        }

        while entries.len() < PALETTE_SIZE {
            entries.push([0, 0, 0, 255]);
        }

        Self(entries)
    }

    /// Loads a .PAL file, falling back to the grayscale ramp when no path is
    /// given or the file cannot be read. The fallback is never an error.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::warn!("no palette supplied, using grayscale ramp");
            return Self::grayscale();
        };

        match std::fs::read(path) {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(err) => {
                log::warn!(
                    "cannot read palette {}: {}. Using grayscale fallback",
                    path.display(),
                    err
                );
                Self::grayscale()
            }
        }
    }

    pub fn get(&self, index: u8) -> [u8; 4] {
        self.0
            .get(index as usize)
            .copied()
            .unwrap_or(SENTINEL_COLOR)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn alpha(index: usize) -> u8 {
    if index == 0 {
        0
    } else {
        255
    }
}
