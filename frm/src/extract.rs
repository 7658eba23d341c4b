use crate::{
    error::FrmError,
    palette::Palette,
    parser::{expand_rle, parse_frame_header},
    types::{FrmFrame, FrmFrameHeader, FrmHeader, LegacyFrmHeader, DIRECTION_COUNT, FRAME_HEADER_SIZE},
    Frm, LegacyFrm,
};

/// One resolved slot of the direction table: where the direction's frame
/// block starts and how many frames it holds. `frame_count` is `None` when
/// the header declares zero frames per direction and the count has to be
/// discovered while decoding.
#[derive(Debug, Clone, Copy)]
pub struct ActiveDirection {
    pub direction: usize,
    pub shift_x: i16,
    pub shift_y: i16,
    pub start: usize,
    pub frame_count: Option<usize>,
}

pub(crate) fn resolve_directions(header: &FrmHeader) -> Vec<ActiveDirection> {
    let mut active = vec![];

    if header.frames_per_direction == 0 {
        // No authoritative count exists; slots with a recorded offset (plus
        // slot 0) each start a sequence terminated by a zero-sized frame
        // header or the end of readable data.
        for (dir, entry) in header.directions.iter().enumerate() {
            if dir == 0 || entry.frame_data_offset != 0 {
                active.push(ActiveDirection {
                    direction: dir,
                    shift_x: entry.shift_x,
                    shift_y: entry.shift_y,
                    start: entry.frame_data_offset as usize,
                    frame_count: None,
                });
            }
        }
        return active;
    }

    for dir in 0..DIRECTION_COUNT {
        let entry = header.directions[dir];
        let offset = entry.frame_data_offset;
        let next_offset = header
            .directions
            .get(dir + 1)
            .map(|next| next.frame_data_offset)
            .unwrap_or(0);

        if offset == 0 && dir > 0 {
            // The table ends at an unpopulated slot whose successor is also
            // unpopulated; a lone hole is skipped.
            if next_offset == 0 {
                break;
            }
            continue;
        }

        // A slot sharing its start with the next populated slot holds no
        // frames of its own.
        if next_offset != 0 && next_offset == offset {
            continue;
        }

        active.push(ActiveDirection {
            direction: dir,
            shift_x: entry.shift_x,
            shift_y: entry.shift_y,
            start: offset as usize,
            frame_count: Some(header.frames_per_direction as usize),
        });
    }

    active
}

/// Maps palette indices to a flat RGBA buffer. Out-of-range references get
/// the sentinel color and a warning instead of failing the frame.
fn indexed_to_rgba(indices: &[u8], palette: &Palette) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(indices.len() * 4);
    let mut unresolved = 0usize;

    for &index in indices {
        if index as usize >= palette.len() {
            unresolved += 1;
        }
        rgba.extend_from_slice(&palette.get(index));
    }

    if unresolved > 0 {
        log::warn!("{unresolved} pixels reference entries outside the palette, substituted");
    }

    rgba
}

fn frame_dimensions(header: &FrmFrameHeader) -> Result<(), FrmError> {
    if header.width == 0 || header.height == 0 {
        return Err(FrmError::ZeroDimension);
    }

    Ok(())
}

fn frame_payload(data: &[u8], start: usize, need: usize) -> Result<&[u8], FrmError> {
    data.get(start..start + need)
        .ok_or_else(|| FrmError::ShortPixelPayload {
            need,
            have: data.len().saturating_sub(start),
        })
}

/// Peeks the width/height pair of the next frame header without consuming
/// it. A zero/zero pair or a failed read ends a discovered-count sequence.
fn next_frame_follows(data: &[u8], offset: usize) -> bool {
    let Some(bytes) = data.get(offset..offset + 4) else {
        return false;
    };

    let width = u16::from_le_bytes([bytes[0], bytes[1]]);
    let height = u16::from_le_bytes([bytes[2], bytes[3]]);

    width != 0 || height != 0
}

struct DirectionCursor {
    entry: ActiveDirection,
    cursor: usize,
    attempted: usize,
}

impl DirectionCursor {
    fn new(entry: ActiveDirection) -> Self {
        Self {
            entry,
            cursor: entry.start,
            attempted: 0,
        }
    }
}

/// Lazy forward pass over the frames of a directional-layout file. Header
/// failures surface before iteration ever starts; everything that goes wrong
/// past that point is logged and recovered so earlier frames still arrive.
pub struct FrmFrames<'a> {
    data: &'a [u8],
    palette: &'a Palette,
    directions: std::vec::IntoIter<ActiveDirection>,
    current: Option<DirectionCursor>,
}

impl<'a> FrmFrames<'a> {
    pub(crate) fn new(data: &'a [u8], header: &FrmHeader, palette: &'a Palette) -> Self {
        Self {
            data,
            palette,
            directions: resolve_directions(header).into_iter(),
            current: None,
        }
    }
}

impl Iterator for FrmFrames<'_> {
    type Item = FrmFrame;

    fn next(&mut self) -> Option<FrmFrame> {
        loop {
            let Some(state) = self.current.as_mut() else {
                self.current = Some(DirectionCursor::new(self.directions.next()?));
                continue;
            };

            if let Some(count) = state.entry.frame_count {
                if state.attempted >= count {
                    self.current = None;
                    continue;
                }
            }

            let dir = state.entry.direction;
            let frame_index = state.attempted;
            let source_offset = state.cursor;
            state.attempted += 1;

            let discovered_count = state.entry.frame_count.is_none();

            let header = self
                .data
                .get(source_offset..)
                .and_then(|i| parse_frame_header(i).ok())
                .map(|(_, header)| header);

            let Some(header) = header else {
                if !discovered_count {
                    log::warn!("direction {dir}: frame {frame_index} header unreadable, direction abandoned");
                }
                self.current = None;
                continue;
            };

            let payload_start = source_offset + FRAME_HEADER_SIZE;
            state.cursor = payload_start + header.pixel_data_size as usize;

            if let Err(err) = frame_dimensions(&header) {
                if discovered_count {
                    // The zero-sized header is the end-of-sequence signal.
                    self.current = None;
                } else {
                    log::warn!("direction {dir}: frame {frame_index}: {err}, skipped");
                }
                continue;
            }

            let payload = match frame_payload(self.data, payload_start, header.pixel_data_size as usize)
            {
                Ok(payload) => payload,
                Err(err) => {
                    log::warn!("direction {dir}: frame {frame_index}: {err}, direction abandoned");
                    self.current = None;
                    continue;
                }
            };

            if discovered_count && !next_frame_follows(self.data, state.cursor) {
                // Close the sequence after this frame is delivered.
                state.entry.frame_count = Some(state.attempted);
            }

            return Some(FrmFrame {
                direction: dir,
                frame: frame_index,
                width: header.width,
                height: header.height,
                offset_x: header.offset_x,
                offset_y: header.offset_y,
                shift_x: state.entry.shift_x,
                shift_y: state.entry.shift_y,
                source_offset,
                rgba: indexed_to_rgba(payload, self.palette),
            });
        }
    }
}

/// Lazy forward pass over a flat-offset-table file. Every recorded offset is
/// decoded in order under the single synthetic direction 0.
pub struct LegacyFrmFrames<'a> {
    data: &'a [u8],
    palette: &'a Palette,
    width: u16,
    height: u16,
    offsets: std::vec::IntoIter<u32>,
    frame: usize,
}

impl<'a> LegacyFrmFrames<'a> {
    pub(crate) fn new(data: &'a [u8], header: &LegacyFrmHeader, palette: &'a Palette) -> Self {
        if header.width == 0 || header.height == 0 {
            log::warn!("shared frame dimensions are zero, nothing to decode");
        }

        let offsets = if header.width == 0 || header.height == 0 {
            vec![]
        } else {
            header.frame_offsets.clone()
        };

        Self {
            data,
            palette,
            width: header.width,
            height: header.height,
            offsets: offsets.into_iter(),
            frame: 0,
        }
    }
}

impl Iterator for LegacyFrmFrames<'_> {
    type Item = FrmFrame;

    fn next(&mut self) -> Option<FrmFrame> {
        loop {
            let offset = self.offsets.next()? as usize;
            let frame_index = self.frame;
            self.frame += 1;

            let Some(stream) = self.data.get(offset..) else {
                log::warn!("frame {frame_index}: offset {offset} is past the end of the file, skipped");
                continue;
            };

            let target = self.width as usize * self.height as usize;
            let indices = expand_rle(stream, target);

            if indices.len() < target {
                log::warn!(
                    "frame {frame_index}: pixel stream exhausted after {} of {target} indices",
                    indices.len()
                );
            }

            return Some(FrmFrame {
                direction: 0,
                frame: frame_index,
                width: self.width,
                height: self.height,
                offset_x: 0,
                offset_y: 0,
                shift_x: 0,
                shift_y: 0,
                source_offset: offset,
                rgba: indexed_to_rgba(&indices, self.palette),
            });
        }
    }
}

impl Frm {
    /// Resolved direction table: which of the 6 slots actually hold frames.
    pub fn active_directions(&self) -> Vec<ActiveDirection> {
        resolve_directions(&self.header)
    }

    /// Single forward pass over every frame of every active direction.
    /// A fresh call is needed to decode again.
    pub fn frames<'a>(&'a self, palette: &'a Palette) -> FrmFrames<'a> {
        FrmFrames::new(&self.data, &self.header, palette)
    }
}

impl LegacyFrm {
    pub fn frames<'a>(&'a self, palette: &'a Palette) -> LegacyFrmFrames<'a> {
        LegacyFrmFrames::new(&self.data, &self.header, palette)
    }
}
