use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures during one-time setup. None of these are retried.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to start the windowing system: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create GPU surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("failed to read {stage} shader {path:?}: {source}")]
    ShaderRead {
        stage: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} shader failed to compile:\n{message}")]
    ShaderCompile { stage: &'static str, message: String },

    #[error("{stage} shader failed validation:\n{message}")]
    ShaderValidate { stage: &'static str, message: String },

    #[error("render pipeline creation failed: {0}")]
    Pipeline(String),
}
