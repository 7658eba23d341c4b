use std::{ffi::OsStr, path::Path};

use crate::{
    error::FrmError,
    parser::{parse_header, parse_legacy_header},
    types::{Frm, LegacyFrm, HEADER_SIZE, LEGACY_HEADER_SIZE},
};

impl Frm {
    /// Parses the directional layout. The caller chooses the layout by
    /// calling this or [`LegacyFrm::open_from_bytes`]; the two are distinct
    /// tool outputs and not distinguishable from content.
    pub fn open_from_bytes(i: &[u8]) -> Result<Frm, FrmError> {
        let (_, header) = parse_header(i).map_err(|_| FrmError::TruncatedHeader {
            need: HEADER_SIZE,
            have: i.len(),
        })?;

        Ok(Frm {
            header,
            data: i.to_vec(),
        })
    }

    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Frm, FrmError> {
        let bytes = std::fs::read(path)?;

        Self::open_from_bytes(&bytes)
    }
}

impl LegacyFrm {
    pub fn open_from_bytes(i: &[u8]) -> Result<LegacyFrm, FrmError> {
        let (_, header) = parse_legacy_header(i).map_err(|_| {
            let need = if i.len() < LEGACY_HEADER_SIZE {
                LEGACY_HEADER_SIZE
            } else {
                // The fixed part parsed; the offset table is what ran short.
                let directions = u16::from_le_bytes([i[6], i[7]]) as usize;
                let frames = u16::from_le_bytes([i[8], i[9]]) as usize;
                LEGACY_HEADER_SIZE + 4 * directions * frames
            };

            FrmError::TruncatedHeader { need, have: i.len() }
        })?;

        Ok(LegacyFrm {
            header,
            data: i.to_vec(),
        })
    }

    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<LegacyFrm, FrmError> {
        let bytes = std::fs::read(path)?;

        Self::open_from_bytes(&bytes)
    }
}
