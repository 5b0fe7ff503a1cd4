// Errors of the window shell. The scratch core itself never fails.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Config error in {path}: {source}")]
    Config {
        path: std::path::PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Bad command line: {0}")]
    Usage(String),
}
