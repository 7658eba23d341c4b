use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::{Cli, CliRes};
use crate::modules::spritequad::{sprite_quad, QuadOrigin};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct SpriteQuadCliStruct {
    // This is just dummy command because we are already in the command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Spritequad {
        /// Path to the sprite .png
        #[arg(short, long)]
        path: PathBuf,
        /// Path of the output .gltf
        #[arg(short, long)]
        out: PathBuf,
        /// Pixels-to-world-units factor for the quad size
        #[arg(long, default_value_t = 0.01)]
        scale: f32,
        /// Pivot placement of the quad
        #[arg(long, value_enum, default_value = "center")]
        origin: QuadOrigin,
    },
}

pub struct SpriteQuad;
impl Cli for SpriteQuad {
    fn name(&self) -> &'static str {
        "spritequad"
    }

    fn cli(&self) -> CliRes {
        let cli = SpriteQuadCliStruct::parse();

        let Commands::Spritequad {
            path,
            out,
            scale,
            origin,
        } = cli.command;

        match sprite_quad(path, out, scale, origin) {
            Ok(output) => {
                println!("wrote {}", output.display());
                CliRes::Ok
            }
            Err(err) => {
                println!("{}", err);
                CliRes::Err
            }
        }
    }

    fn cli_help(&self) {
        println!(
            "\
Builds a single textured-quad glTF asset from one sprite image.

<.png> <output .gltf>
"
        )
    }
}
