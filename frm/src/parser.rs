use nom::{
    combinator::map,
    multi::count,
    number::complete::{le_i16, le_u16, le_u32},
    IResult as _IResult, Parser,
};

use crate::{FrmDirection, FrmFrameHeader, FrmHeader, LegacyFrmHeader, DIRECTION_COUNT};

pub type IResult<'a, T> = _IResult<&'a [u8], T>;

/// Byte introducing a (count, value) pair in a run-length pixel stream.
pub const RLE_MARKER: u8 = 0x80;

pub fn parse_header(i: &'_ [u8]) -> IResult<'_, FrmHeader> {
    let (i, (version, fps, action_frame, frames_per_direction)) =
        (le_u32, le_u16, le_u16, le_u16).parse(i)?;
    let (i, shift_x) = count(le_i16, DIRECTION_COUNT).parse(i)?;
    let (i, shift_y) = count(le_i16, DIRECTION_COUNT).parse(i)?;
    let (i, frame_data_offsets) = count(le_u32, DIRECTION_COUNT).parse(i)?;
    let (i, frame_area_size) = le_u32.parse(i)?;

    let directions = (0..DIRECTION_COUNT)
        .map(|dir| FrmDirection {
            shift_x: shift_x[dir],
            shift_y: shift_y[dir],
            frame_data_offset: frame_data_offsets[dir],
        })
        .collect();

    Ok((
        i,
        FrmHeader {
            version,
            fps,
            action_frame,
            frames_per_direction,
            directions,
            frame_area_size,
        },
    ))
}

pub fn parse_legacy_header(i: &'_ [u8]) -> IResult<'_, LegacyFrmHeader> {
    // Two dead bytes after frame_count keep the leading block at 12 bytes.
    let (i, (fps, action_frame, direction_count, frame_count, _pad)) =
        (le_u32, le_u16, le_u16, le_u16, le_u16).parse(i)?;
    let (i, (width, height)) = (le_u16, le_u16).parse(i)?;
    let (i, frame_offsets) =
        count(le_u32, direction_count as usize * frame_count as usize).parse(i)?;

    Ok((
        i,
        LegacyFrmHeader {
            fps,
            action_frame,
            direction_count,
            frame_count,
            width,
            height,
            frame_offsets,
        },
    ))
}

pub fn parse_frame_header(i: &'_ [u8]) -> IResult<'_, FrmFrameHeader> {
    map(
        (le_u16, le_u16, le_u32, le_i16, le_i16),
        |(width, height, pixel_data_size, offset_x, offset_y)| FrmFrameHeader {
            width,
            height,
            pixel_data_size,
            offset_x,
            offset_y,
        },
    )
    .parse(i)
}

/// Expands a run-length pixel stream into at most `target` palette indices.
///
/// A `RLE_MARKER` byte is followed by a (count, value) pair meaning `count`
/// copies of `value`; any other byte is one literal index. Expansion stops at
/// `target` indices (a run never overshoots it) or when the input runs out,
/// in which case the result is simply short.
pub fn expand_rle(i: &[u8], target: usize) -> Vec<u8> {
    let mut indices = Vec::with_capacity(target);
    let mut cursor = 0;

    while indices.len() < target {
        let Some(&byte) = i.get(cursor) else {
            break;
        };
        cursor += 1;

        if byte == RLE_MARKER {
            let Some(&run) = i.get(cursor) else {
                break;
            };
            let Some(&value) = i.get(cursor + 1) else {
                break;
            };
            cursor += 2;

            let run = (run as usize).min(target - indices.len());
            indices.extend(std::iter::repeat(value).take(run));
        } else {
            indices.push(byte);
        }
    }

    indices
}
