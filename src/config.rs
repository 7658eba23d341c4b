//! Parses config file

use std::{
    fs::OpenOptions,
    io::Read,
    path::{Path, PathBuf},
};

use std::env;

use eyre::eyre;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the Blender binary, used for the glTF hand-off.
    pub blender: String,
}

pub static CONFIG_FILE_NAME: &str = "config.toml";

/// Parse `config.toml` in the same folder as the binary. Only needed when a
/// feature that shells out (like `--gltf`) is requested.
pub fn parse_config() -> eyre::Result<Config> {
    let path = match env::current_exe() {
        Ok(path) => path.parent().unwrap().join(CONFIG_FILE_NAME),
        Err(_) => PathBuf::from(CONFIG_FILE_NAME),
    };

    parse_config_from_file(path.as_path())
}

pub fn parse_config_from_file(path: &Path) -> eyre::Result<Config> {
    let mut file = OpenOptions::new().read(true).open(path.as_os_str())?;
    let mut buffer = String::new();

    file.read_to_string(&mut buffer)?;

    let config: Config = toml::from_str(&buffer)?;

    let root = path.parent().unwrap();

    let blender = PathBuf::from(config.blender);

    if !blender.exists() {
        return Err(eyre!("Cannot find blender binary"));
    }

    let blender = if blender.is_relative() {
        root.join(blender)
    } else {
        blender
    }
    .canonicalize()?
    .display()
    .to_string();

    Ok(Config { blender })
}
