use std::path::PathBuf;

use roster::config::try_load;

pub struct Config {
    pub port: u16,
    pub data_file: PathBuf,
    /// Directory holding the compiled browser client (`wasm-pack build --target web`).
    pub static_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "5000"),
            data_file: try_load("DATA_FILE", "user_interests.csv"),
            static_dir: try_load("STATIC_DIR", "frontend/pkg"),
        }
    }
}
