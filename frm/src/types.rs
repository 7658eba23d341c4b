pub const DIRECTION_COUNT: usize = 6;

/// Fixed header size of the directional layout.
pub const HEADER_SIZE: usize = 62;

/// Fixed size of the flat-offset-table layout before its offset list.
pub const LEGACY_HEADER_SIZE: usize = 16;

/// Per-frame header size of the directional layout.
pub const FRAME_HEADER_SIZE: usize = 10;

/// Header of the directional layout. Always carries exactly 6 direction
/// slots in file order; unused slots keep `frame_data_offset` 0.
#[derive(Debug, Clone)]
pub struct FrmHeader {
    pub version: u32,
    pub fps: u16,
    pub action_frame: u16,
    /// 0 is a sentinel: the frame count is discovered while decoding.
    pub frames_per_direction: u16,
    // [FrmDirection; 6]
    pub directions: Vec<FrmDirection>,
    pub frame_area_size: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct FrmDirection {
    pub shift_x: i16,
    pub shift_y: i16,
    pub frame_data_offset: u32,
}

/// Header of the flat-offset-table layout. One shared frame size, one
/// absolute offset per frame, run-length pixel streams.
#[derive(Debug, Clone)]
pub struct LegacyFrmHeader {
    pub fps: u32,
    pub action_frame: u16,
    pub direction_count: u16,
    pub frame_count: u16,
    pub width: u16,
    pub height: u16,
    // [u32; direction_count * frame_count]
    pub frame_offsets: Vec<u32>,
}

#[derive(Debug, Clone, Copy)]
pub struct FrmFrameHeader {
    pub width: u16,
    pub height: u16,
    pub pixel_data_size: u32,
    pub offset_x: i16,
    pub offset_y: i16,
}

/// One decoded frame plus the metadata a writer needs to place it.
#[derive(Debug, Clone)]
pub struct FrmFrame {
    pub direction: usize,
    pub frame: usize,
    pub width: u16,
    pub height: u16,
    pub offset_x: i16,
    pub offset_y: i16,
    pub shift_x: i16,
    pub shift_y: i16,
    /// Byte offset of the frame inside the source file, for diagnostics.
    pub source_offset: usize,
    /// `width * height * 4` bytes, except when a run-length stream ran out
    /// of input early, in which case the buffer is short.
    pub rgba: Vec<u8>,
}

pub struct Frm {
    pub header: FrmHeader,
    pub(crate) data: Vec<u8>,
}

pub struct LegacyFrm {
    pub header: LegacyFrmHeader,
    pub(crate) data: Vec<u8>,
}
