use activities_server::ServerConfig;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn run(seed: Option<&Path>, host: String, port: u16, static_dir: PathBuf) -> Result<()> {
    let directory = Arc::new(super::load_directory(seed)?);
    let config = ServerConfig {
        host,
        port,
        static_dir: Some(static_dir),
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(activities_server::serve(config, directory))
}
