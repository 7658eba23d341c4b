use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::{Cli, CliRes};
use crate::modules::extract::ExtractBuilder;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct ExtractCliStruct {
    // This is just dummy command because we are already in the command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Extract {
        /// Path to the animation sheet (.FRM)
        #[arg(short, long)]
        path: PathBuf,
        /// Directory the decoded frames go to
        #[arg(short, long)]
        out: PathBuf,
        /// Path to a 256 color .PAL file; a grayscale ramp is used when omitted
        #[arg(long)]
        palette: Option<PathBuf>,
        /// Treats the input as the flat offset-table layout with run-length pixels
        #[arg(short, long)]
        legacy: bool,
        /// Writes a metadata .json next to the frames
        #[arg(long)]
        json: bool,
        /// Invokes Blender on the first decoded frame to build a glTF mesh
        #[arg(long)]
        gltf: bool,
    },
}

pub struct Extract;
impl Cli for Extract {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn cli(&self) -> CliRes {
        let cli = ExtractCliStruct::parse();

        let Commands::Extract {
            path,
            out,
            palette,
            legacy,
            json,
            gltf,
        } = cli.command;

        let mut extract = ExtractBuilder::new(path);

        extract.out_dir(out).legacy(legacy).manifest(json).gltf(gltf);

        if let Some(palette) = palette {
            extract.palette(palette);
        }

        match extract.work() {
            Ok(summary) => {
                println!("{}", summary);
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
Decodes an animation sheet into PNG frames and optional metadata.

<.frm> <output folder>
"
        )
    }
}
