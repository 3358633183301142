use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop the window back-end.
#[derive(Error, Debug)]
pub enum WinitError {
    #[error("cannot read font {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no usable monospace font found, pass one with --font")]
    NoFont,
    #[error("cannot parse font: {0}")]
    FontParse(&'static str),
    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("cannot create window: {0}")]
    Os(#[from] winit::error::OsError),
    #[error("softbuffer: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),
}
