use std::path::Path;
use std::{
    process::{Command, Output},
    thread::{self, JoinHandle},
};

use eyre::eyre;

/// Runs Blender in background mode to wrap a frame image into a textured
/// mesh and export it as glTF.
pub fn run_blender_gltf(
    blender: &Path,
    image: &Path,
    output: &Path,
) -> JoinHandle<eyre::Result<Output>> {
    // `blender -b --python-expr <expr> <image> <output>`
    let expr = "\
import bpy,sys;img=bpy.data.images.load(sys.argv[-2]);\
bpy.ops.mesh.primitive_plane_add();\
mat=bpy.data.materials.new('mat');\
tex=bpy.data.textures.new('tex', 'IMAGE');tex.image=img;\
mat.texture_slots.add().texture=tex;\
bpy.context.object.data.materials.append(mat);\
bpy.ops.export_scene.gltf(filepath=sys.argv[-1])";

    let command = vec![
        blender.display().to_string(),
        "-b".to_string(),
        "--python-expr".to_string(),
        expr.to_string(),
        image.display().to_string(),
        output.display().to_string(),
    ];

    run_command(command)
}

fn run_command(command: Vec<String>) -> JoinHandle<eyre::Result<Output>> {
    thread::spawn(move || {
        let output = Command::new(&command[0])
            .args(&command[1..])
            .output()
            .map_err(|err| eyre!("cannot spawn {}: {}", command[0], err))?;

        Ok(output)
    })
}
