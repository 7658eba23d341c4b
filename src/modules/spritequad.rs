use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use eyre::eyre;
use serde_json::json;

/// Where the quad's pivot sits relative to the sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuadOrigin {
    Center,
    #[value(name = "bottomcenter")]
    BottomCenter,
    #[value(name = "bottomleft")]
    BottomLeft,
}

/// Builds a one-quad glTF 2.0 asset textured with a single sprite PNG: four
/// vertices, two triangles, sized `pixels * scale`. The vertex data goes to
/// a `.bin` next to the output and the texture is referenced by URI, so the
/// PNG is not copied or embedded.
pub fn sprite_quad(
    png: impl AsRef<Path> + Into<PathBuf>,
    output: impl AsRef<Path> + Into<PathBuf>,
    scale: f32,
    origin: QuadOrigin,
) -> eyre::Result<PathBuf> {
    let png = png.as_ref();
    let output = output.as_ref();

    if !png.exists() {
        return Err(eyre!("{} does not exist", png.display()));
    }

    if png.extension().is_none() || png.extension().unwrap() != "png" {
        return Err(eyre!("{} is not a .png file", png.display()));
    }

    let (img_width, img_height) = image::image_dimensions(png)?;

    let quad_width = img_width as f32 * scale;
    let quad_height = img_height as f32 * scale;

    let (x0, x1, y0, y1) = match origin {
        QuadOrigin::Center => (
            -quad_width / 2.,
            quad_width / 2.,
            -quad_height / 2.,
            quad_height / 2.,
        ),
        QuadOrigin::BottomCenter => (-quad_width / 2., quad_width / 2., 0., quad_height),
        QuadOrigin::BottomLeft => (0., quad_width, 0., quad_height),
    };

    // bottom-left, bottom-right, top-right, top-left
    let positions: [[f32; 3]; 4] = [
        [x0, y0, 0.],
        [x1, y0, 0.],
        [x1, y1, 0.],
        [x0, y1, 0.],
    ];
    // image row 0 is the top of the sprite
    let uvs: [[f32; 2]; 4] = [[0., 1.], [1., 1.], [1., 0.], [0., 0.]];
    let indices: [u16; 6] = [0, 1, 2, 0, 2, 3];

    let mut bin: Vec<u8> = vec![];
    for index in indices {
        bin.extend(index.to_le_bytes());
    }
    let positions_offset = bin.len();
    for position in positions.iter().flatten() {
        bin.extend(position.to_le_bytes());
    }
    let uvs_offset = bin.len();
    for uv in uvs.iter().flatten() {
        bin.extend(uv.to_le_bytes());
    }

    let bin_path = output.with_extension("bin");

    let image_uri = if png.parent() == output.parent() {
        png.file_name().unwrap().to_string_lossy().to_string()
    } else {
        png.display().to_string()
    };

    let gltf = json!({
        "asset": { "version": "2.0", "generator": "frmx" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "mesh": 0 }],
        "meshes": [{
            "primitives": [{
                "attributes": { "POSITION": 1, "TEXCOORD_0": 2 },
                "indices": 0,
                "material": 0,
            }],
        }],
        "materials": [{
            "pbrMetallicRoughness": {
                "baseColorTexture": { "index": 0 },
                "metallicFactor": 0.0,
            },
            "alphaMode": "BLEND",
            "doubleSided": true,
        }],
        "textures": [{ "source": 0, "sampler": 0 }],
        // nearest filtering keeps the pixel-art look
        "samplers": [{ "magFilter": 9728, "minFilter": 9728 }],
        "images": [{ "uri": image_uri }],
        "buffers": [{
            "uri": bin_path.file_name().unwrap().to_string_lossy(),
            "byteLength": bin.len(),
        }],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": positions_offset, "target": 34963 },
            { "buffer": 0, "byteOffset": positions_offset, "byteLength": uvs_offset - positions_offset, "target": 34962 },
            { "buffer": 0, "byteOffset": uvs_offset, "byteLength": bin.len() - uvs_offset, "target": 34962 },
        ],
        "accessors": [
            { "bufferView": 0, "componentType": 5123, "count": 6, "type": "SCALAR" },
            {
                "bufferView": 1, "componentType": 5126, "count": 4, "type": "VEC3",
                "min": [x0, y0, 0.0], "max": [x1, y1, 0.0],
            },
            { "bufferView": 2, "componentType": 5126, "count": 4, "type": "VEC2" },
        ],
    });

    let mut bin_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&bin_path)?;
    bin_file.write_all(&bin)?;
    bin_file.flush()?;

    let mut gltf_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(output)?;
    gltf_file.write_all(serde_json::to_string_pretty(&gltf)?.as_bytes())?;
    gltf_file.flush()?;

    Ok(output.to_path_buf())
}
