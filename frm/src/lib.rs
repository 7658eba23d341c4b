pub mod error;
mod extract;
mod palette;
mod parser;
mod types;
mod utils;

pub use extract::{ActiveDirection, FrmFrames, LegacyFrmFrames};
pub use palette::{Palette, PALETTE_SIZE, SENTINEL_COLOR};
pub use parser::RLE_MARKER;
pub use types::*;

#[cfg(test)]
mod test {
    use std::path::Path;

    use crate::{
        error::FrmError, parser::expand_rle, Frm, FrmFrame, LegacyFrm, Palette, SENTINEL_COLOR,
    };

    fn extended_header(fps: u16, action_frame: u16, frames_per_direction: u16, offsets: [u32; 6]) -> Vec<u8> {
        let mut bytes = vec![];

        bytes.extend(4u32.to_le_bytes()); // version
        bytes.extend(fps.to_le_bytes());
        bytes.extend(action_frame.to_le_bytes());
        bytes.extend(frames_per_direction.to_le_bytes());
        for dir in 0..6i16 {
            bytes.extend((dir * 3).to_le_bytes()); // shift_x
        }
        for dir in 0..6i16 {
            bytes.extend((-dir).to_le_bytes()); // shift_y
        }
        for offset in offsets {
            bytes.extend(offset.to_le_bytes());
        }
        bytes.extend(0u32.to_le_bytes()); // frame_area_size

        bytes
    }

    fn extended_frame(width: u16, height: u16, indices: &[u8], offset_x: i16, offset_y: i16) -> Vec<u8> {
        let mut bytes = vec![];

        bytes.extend(width.to_le_bytes());
        bytes.extend(height.to_le_bytes());
        bytes.extend((indices.len() as u32).to_le_bytes());
        bytes.extend(offset_x.to_le_bytes());
        bytes.extend(offset_y.to_le_bytes());
        bytes.extend_from_slice(indices);

        bytes
    }

    fn legacy_file(direction_count: u16, frame_count: u16, width: u16, height: u16, offsets: &[u32], tail: &[u8]) -> Vec<u8> {
        let mut bytes = vec![];

        bytes.extend(10u32.to_le_bytes()); // fps
        bytes.extend(0u16.to_le_bytes()); // action_frame
        bytes.extend(direction_count.to_le_bytes());
        bytes.extend(frame_count.to_le_bytes());
        bytes.extend(0u16.to_le_bytes()); // pad
        bytes.extend(width.to_le_bytes());
        bytes.extend(height.to_le_bytes());
        for offset in offsets {
            bytes.extend(offset.to_le_bytes());
        }
        bytes.extend_from_slice(tail);

        bytes
    }

    #[test]
    fn palette_scales_and_sets_alpha() {
        let mut triples = vec![63u8, 0, 63, 1, 2, 3, 63, 63, 63];
        triples.resize(256 * 3, 0);

        let palette = Palette::from_bytes(&triples);

        assert_eq!(palette.len(), 256);
        assert_eq!(palette.0[0], [252, 0, 252, 0]);
        assert_eq!(palette.0[1], [4, 8, 12, 255]);
        assert_eq!(palette.0[2], [252, 252, 252, 255]);
    }

    #[test]
    fn palette_pads_and_truncates() {
        let short = Palette::from_bytes(&[1u8; 30]); // 10 triples
        assert_eq!(short.len(), 256);
        assert_eq!(short.0[9], [4, 4, 4, 255]);
        assert_eq!(short.0[10], [0, 0, 0, 255]);

        let long = Palette::from_bytes(&[1u8; 300 * 3]);
        assert_eq!(long.len(), 256);
    }

    #[test]
    fn palette_without_usable_entries_falls_back() {
        let palette = Palette::from_bytes(&[1, 2]);

        assert_eq!(palette.len(), 256);
        assert_eq!(palette.0[0], [0, 0, 0, 0]);
        assert_eq!(palette.0[5], [20, 20, 20, 255]);
    }

    #[test]
    fn missing_palette_resource_falls_back() {
        for palette in [
            Palette::load(None),
            Palette::load(Some(Path::new("/nonexistent/COLOR.PAL"))),
        ] {
            assert_eq!(palette.len(), 256);
            assert_eq!(palette.0[0][3], 0);
            assert_eq!(palette.0[5], [20, 20, 20, 255]);
        }
    }

    #[test]
    fn unresolvable_index_gets_sentinel() {
        let mut palette = Palette::grayscale();
        palette.0.truncate(16);

        assert_eq!(palette.get(200), SENTINEL_COLOR);
        assert_eq!(palette.get(15), [60, 60, 60, 255]);
    }

    #[test]
    fn parse_extended_header_fields() {
        let bytes = extended_header(8, 3, 1, [62, 0, 0, 0, 0, 0]);
        let frm = Frm::open_from_bytes(&bytes).unwrap();

        assert_eq!(frm.header.version, 4);
        assert_eq!(frm.header.fps, 8);
        assert_eq!(frm.header.action_frame, 3);
        assert_eq!(frm.header.frames_per_direction, 1);
        assert_eq!(frm.header.directions.len(), 6);
        assert_eq!(frm.header.directions[2].shift_x, 6);
        assert_eq!(frm.header.directions[2].shift_y, -2);
        assert_eq!(frm.header.directions[0].frame_data_offset, 62);
    }

    #[test]
    fn truncated_header_is_fatal() {
        let res = Frm::open_from_bytes(&[0u8; 10]);

        assert!(matches!(
            res,
            Err(FrmError::TruncatedHeader { need: 62, have: 10 })
        ));
    }

    #[test]
    fn declared_count_is_honored_per_direction() {
        // Two populated directions, two 1x1 frames each.
        let mut bytes = extended_header(8, 0, 2, [62, 84, 0, 0, 0, 0]);
        for indices in [[5u8], [6], [7], [8]] {
            bytes.extend(extended_frame(1, 1, &indices, 1, -1));
        }

        let frm = Frm::open_from_bytes(&bytes).unwrap();
        let palette = Palette::grayscale();
        let frames: Vec<FrmFrame> = frm.frames(&palette).collect();

        assert_eq!(frames.len(), 4);
        assert_eq!(
            frames.iter().map(|f| f.direction).collect::<Vec<_>>(),
            [0, 0, 1, 1]
        );
        assert_eq!(
            frames.iter().map(|f| f.frame).collect::<Vec<_>>(),
            [0, 1, 0, 1]
        );
        // Shifts come from the direction slot, offsets from the frame header.
        assert_eq!(frames[2].shift_x, 3);
        assert_eq!(frames[2].shift_y, -1);
        assert_eq!(frames[0].offset_x, 1);
        assert_eq!(frames[0].rgba, [20, 20, 20, 255]);
        assert_eq!(frames[3].source_offset, 84 + 11);
    }

    #[test]
    fn direction_sharing_next_start_is_empty() {
        // Slot 1 records the same offset as slot 2: it holds no frames.
        let mut bytes = extended_header(8, 0, 1, [62, 73, 73, 0, 0, 0]);
        bytes.extend(extended_frame(1, 1, &[1], 0, 0));
        bytes.extend(extended_frame(1, 1, &[2], 0, 0));

        let frm = Frm::open_from_bytes(&bytes).unwrap();

        let active = frm.active_directions();
        assert_eq!(
            active.iter().map(|d| d.direction).collect::<Vec<_>>(),
            [0, 2]
        );

        let palette = Palette::grayscale();
        let frames: Vec<FrmFrame> = frm.frames(&palette).collect();
        assert_eq!(frames.len(), 2);
        assert_eq!(
            frames.iter().map(|f| f.direction).collect::<Vec<_>>(),
            [0, 2]
        );
    }

    #[test]
    fn discovered_count_stops_at_zero_header() {
        // frames_per_direction == 0: one real frame followed by a zero/zero
        // width/height pair.
        let mut bytes = extended_header(8, 0, 0, [62, 0, 0, 0, 0, 0]);
        bytes.extend(extended_frame(2, 1, &[1, 2], 0, 0));
        bytes.extend([0u8; 4]);

        let frm = Frm::open_from_bytes(&bytes).unwrap();
        let palette = Palette::grayscale();
        let frames: Vec<FrmFrame> = frm.frames(&palette).collect();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].width, 2);
    }

    #[test]
    fn discovered_count_stops_at_end_of_data() {
        // Same stream, but the file simply ends after the frame.
        let mut bytes = extended_header(8, 0, 0, [62, 0, 0, 0, 0, 0]);
        bytes.extend(extended_frame(2, 1, &[1, 2], 0, 0));

        let frm = Frm::open_from_bytes(&bytes).unwrap();
        let palette = Palette::grayscale();

        assert_eq!(frm.frames(&palette).count(), 1);
    }

    #[test]
    fn discovered_count_continues_past_first_frame() {
        let mut bytes = extended_header(8, 0, 0, [62, 0, 0, 0, 0, 0]);
        bytes.extend(extended_frame(1, 1, &[1], 0, 0));
        bytes.extend(extended_frame(1, 1, &[2], 0, 0));
        bytes.extend([0u8; 4]);

        let frm = Frm::open_from_bytes(&bytes).unwrap();
        let palette = Palette::grayscale();

        assert_eq!(frm.frames(&palette).count(), 2);
    }

    #[test]
    fn short_payload_abandons_direction_only() {
        // Slot 0 declares a 100 byte payload with only 40 bytes left in the
        // file; slot 1 points at an intact frame stored before it.
        let mut bytes = extended_header(8, 0, 1, [73, 62, 0, 0, 0, 0]);
        bytes.extend(extended_frame(1, 1, &[9], 0, 0)); // at 62, for slot 1
        bytes.extend(2u16.to_le_bytes()); // broken frame header at 73
        bytes.extend(20u16.to_le_bytes());
        bytes.extend(100u32.to_le_bytes());
        bytes.extend(0i16.to_le_bytes());
        bytes.extend(0i16.to_le_bytes());
        bytes.extend([0u8; 40]);

        let frm = Frm::open_from_bytes(&bytes).unwrap();
        let palette = Palette::grayscale();
        let frames: Vec<FrmFrame> = frm.frames(&palette).collect();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].direction, 1);
        assert_eq!(frames[0].source_offset, 62);
    }

    #[test]
    fn zero_dimension_frame_skipped_with_known_count() {
        let mut bytes = extended_header(8, 0, 2, [62, 0, 0, 0, 0, 0]);
        bytes.extend(extended_frame(0, 0, &[], 0, 0));
        bytes.extend(extended_frame(1, 1, &[3], 0, 0));

        let frm = Frm::open_from_bytes(&bytes).unwrap();
        let palette = Palette::grayscale();
        let frames: Vec<FrmFrame> = frm.frames(&palette).collect();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].frame, 1);
        assert_eq!(frames[0].rgba, [12, 12, 12, 255]);
    }

    #[test]
    fn transparent_index_zero_survives_decode() {
        let mut bytes = extended_header(8, 0, 1, [62, 0, 0, 0, 0, 0]);
        bytes.extend(extended_frame(1, 1, &[0], 0, 0));

        let frm = Frm::open_from_bytes(&bytes).unwrap();
        let palette = Palette::grayscale();
        let frames: Vec<FrmFrame> = frm.frames(&palette).collect();

        assert_eq!(frames[0].rgba, [0, 0, 0, 0]);
    }

    #[test]
    fn expand_rle_runs_and_literals() {
        assert_eq!(expand_rle(&[0x80, 3, 9, 1, 2], 10), [9, 9, 9, 1, 2]);
        assert_eq!(expand_rle(&[1, 2, 3], 3), [1, 2, 3]);
        // A run never overshoots the target, excess input is ignored.
        assert_eq!(expand_rle(&[0x80, 200, 7, 1, 1, 1], 4), [7, 7, 7, 7]);
        // Marker without a complete pair ends expansion.
        assert_eq!(expand_rle(&[1, 0x80], 5), [1]);
        assert_eq!(expand_rle(&[1, 0x80, 3], 5), [1]);
    }

    #[test]
    fn legacy_end_to_end() {
        // One 2x1 frame whose pixel stream is a single run of index 5.
        let bytes = legacy_file(1, 1, 2, 1, &[20], &[0x80, 0x02, 0x05]);

        let frm = LegacyFrm::open_from_bytes(&bytes).unwrap();
        assert_eq!(frm.header.fps, 10);
        assert_eq!(frm.header.width, 2);

        let palette = Palette::grayscale();
        let frames: Vec<FrmFrame> = frm.frames(&palette).collect();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].direction, 0);
        assert_eq!(frames[0].source_offset, 20);
        assert_eq!(frames[0].rgba, [20, 20, 20, 255, 20, 20, 20, 255]);
    }

    #[test]
    fn legacy_decodes_every_recorded_offset() {
        // direction_count 2 x frame_count 2: four offsets, four frames, all
        // under the single synthetic direction.
        let offsets = [32u32, 33, 34, 35];
        let bytes = legacy_file(2, 2, 1, 1, &offsets, &[1, 2, 3, 4]);

        let frm = LegacyFrm::open_from_bytes(&bytes).unwrap();
        let palette = Palette::grayscale();
        let frames: Vec<FrmFrame> = frm.frames(&palette).collect();

        assert_eq!(frames.len(), 4);
        assert!(frames.iter().all(|f| f.direction == 0));
        assert_eq!(
            frames.iter().map(|f| f.frame).collect::<Vec<_>>(),
            [0, 1, 2, 3]
        );
        assert_eq!(frames[3].rgba, [16, 16, 16, 255]);
    }

    #[test]
    fn legacy_exhausted_stream_yields_short_buffer() {
        // 4x1 frame but the stream holds a single literal index.
        let bytes = legacy_file(1, 1, 4, 1, &[20], &[7]);

        let frm = LegacyFrm::open_from_bytes(&bytes).unwrap();
        let palette = Palette::grayscale();
        let frames: Vec<FrmFrame> = frm.frames(&palette).collect();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].rgba, [28, 28, 28, 255]);
    }

    #[test]
    fn legacy_truncated_header_is_fatal() {
        // Fixed part present, offset table missing.
        let bytes = legacy_file(2, 2, 1, 1, &[], &[]);
        let res = LegacyFrm::open_from_bytes(&bytes);

        assert!(matches!(
            res,
            Err(FrmError::TruncatedHeader { need: 32, have: 16 })
        ));
    }
}
