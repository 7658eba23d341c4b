use std::{
    fmt,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use eyre::eyre;
use frm::{Frm, FrmFrame, LegacyFrm, Palette};
use serde::Serialize;

use crate::{
    config::parse_config,
    utils::{
        constants::{DIRECTION_LABELS, SINGLE_DIRECTION_LABEL},
        img_stuffs::{ImageSink, PngSink},
        run_bin::run_blender_gltf,
    },
};

/// Decodes an animation sheet into per-frame PNGs plus an optional metadata
/// manifest, and optionally hands the first frame to Blender for a glTF
/// mesh.
pub struct ExtractBuilder {
    path: PathBuf,
    out_dir: PathBuf,
    palette: Option<PathBuf>,
    legacy: bool,
    manifest: bool,
    gltf: bool,
}

impl ExtractBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            out_dir: PathBuf::from("."),
            palette: None,
            legacy: false,
            manifest: false,
            gltf: false,
        }
    }

    pub fn out_dir(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.out_dir = path.into();
        self
    }

    pub fn palette(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.palette = Some(path.into());
        self
    }

    /// Treats the input as the flat-offset-table layout with run-length
    /// pixel streams instead of the directional layout.
    pub fn legacy(&mut self, legacy: bool) -> &mut Self {
        self.legacy = legacy;
        self
    }

    pub fn manifest(&mut self, manifest: bool) -> &mut Self {
        self.manifest = manifest;
        self
    }

    pub fn gltf(&mut self, gltf: bool) -> &mut Self {
        self.gltf = gltf;
        self
    }

    pub fn work(&self) -> eyre::Result<ExtractSummary> {
        let mut sink = PngSink::new(&self.out_dir);
        self.work_with_sink(&mut sink)
    }

    pub fn work_with_sink(&self, sink: &mut dyn ImageSink) -> eyre::Result<ExtractSummary> {
        if !self.path.exists() {
            return Err(eyre!("{} does not exist", self.path.display()));
        }

        std::fs::create_dir_all(&self.out_dir)?;

        let palette = Palette::load(self.palette.as_deref());
        let name = self
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "sprite".to_string());

        let mut first_png: Option<PathBuf> = None;

        let manifest = if self.legacy {
            let sheet = LegacyFrm::open_from_file(&self.path)?;
            let mut manifest = Manifest {
                name,
                fps: sheet.header.fps,
                action_frame: sheet.header.action_frame,
                declared_frame_count: sheet.header.frame_count,
                directions: vec![SINGLE_DIRECTION_LABEL.to_string()],
                frames: vec![],
            };

            for frame in sheet.frames(&palette) {
                let filename = format!("frame_{}.png", frame.frame);
                if let Some(written) = write_frame(sink, &filename, &frame, &mut manifest)? {
                    first_png.get_or_insert(written);
                }
            }

            manifest
        } else {
            let sheet = Frm::open_from_file(&self.path)?;
            let directions = sheet
                .active_directions()
                .iter()
                .map(|dir| DIRECTION_LABELS[dir.direction].to_string())
                .collect();
            let mut manifest = Manifest {
                name,
                fps: sheet.header.fps as u32,
                action_frame: sheet.header.action_frame,
                declared_frame_count: sheet.header.frames_per_direction,
                directions,
                frames: vec![],
            };

            for frame in sheet.frames(&palette) {
                let filename = format!("dir{}_frame{}.png", frame.direction, frame.frame);
                if let Some(written) = write_frame(sink, &filename, &frame, &mut manifest)? {
                    first_png.get_or_insert(written);
                }
            }

            manifest
        };

        let manifest_path = if self.manifest {
            let path = self.out_dir.join(format!("{}.json", manifest.name));
            let text = serde_json::to_string_pretty(&manifest)?;

            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)?;
            file.write_all(text.as_bytes())?;
            file.flush()?;

            Some(path)
        } else {
            None
        };

        let gltf_path = if self.gltf {
            let Some(first_png) = first_png.as_deref() else {
                return Err(eyre!("no frames decoded, nothing for Blender to wrap"));
            };

            Some(self.blender_gltf(first_png, &manifest.name)?)
        } else {
            None
        };

        Ok(ExtractSummary {
            frames_written: manifest.frames.len(),
            manifest_path,
            gltf_path,
        })
    }

    fn blender_gltf(&self, image: &Path, name: &str) -> eyre::Result<PathBuf> {
        let config = parse_config()?;
        let output = self.out_dir.join(format!("{}.gltf", name));

        let handle = run_blender_gltf(Path::new(&config.blender), image, &output);
        let out = handle
            .join()
            .map_err(|_| eyre!("Blender thread panicked"))??;

        if !out.status.success() {
            log::warn!("Blender exited with {}", out.status);
        }

        Ok(output)
    }
}

/// Refused frames stay out of the manifest so it only lists files that
/// actually exist.
fn write_frame(
    sink: &mut dyn ImageSink,
    filename: &str,
    frame: &FrmFrame,
    manifest: &mut Manifest,
) -> eyre::Result<Option<PathBuf>> {
    let Some(written) = sink.write_frame(
        filename,
        frame.width as u32,
        frame.height as u32,
        &frame.rgba,
    )?
    else {
        return Ok(None);
    };

    manifest.frames.push(FrameRecord {
        direction: frame.direction,
        frame: frame.frame,
        width: frame.width,
        height: frame.height,
        offset_x: frame.offset_x,
        offset_y: frame.offset_y,
        shift_x: frame.shift_x,
        shift_y: frame.shift_y,
        source_offset: frame.source_offset,
        filename: filename.to_string(),
    });

    Ok(Some(written))
}

#[derive(Debug, Serialize)]
struct Manifest {
    name: String,
    fps: u32,
    action_frame: u16,
    declared_frame_count: u16,
    directions: Vec<String>,
    frames: Vec<FrameRecord>,
}

#[derive(Debug, Serialize)]
struct FrameRecord {
    direction: usize,
    frame: usize,
    width: u16,
    height: u16,
    offset_x: i16,
    offset_y: i16,
    shift_x: i16,
    shift_y: i16,
    source_offset: usize,
    filename: String,
}

pub struct ExtractSummary {
    pub frames_written: usize,
    pub manifest_path: Option<PathBuf>,
    pub gltf_path: Option<PathBuf>,
}

impl fmt::Display for ExtractSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wrote {} frames", self.frames_written)?;

        if let Some(manifest) = &self.manifest_path {
            write!(f, "\nmanifest: {}", manifest.display())?;
        }

        if let Some(gltf) = &self.gltf_path {
            write!(f, "\ngltf: {}", gltf.display())?;
        }

        Ok(())
    }
}
