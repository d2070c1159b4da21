//! Error types for renderer bring-up.
//!
//! Nothing here is recoverable mid-frame: these only occur while acquiring
//! the drawing surface at mount time, and the caller degrades to a silent
//! no-op instead of failing the application (the animation is cosmetic).

use std::fmt;

/// Errors that can occur while bringing up the GPU surface.
#[derive(Debug)]
pub enum InitError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    AdapterRequest(wgpu::RequestAdapterError),
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            InitError::AdapterRequest(e) => write!(f, "No compatible GPU adapter found: {}", e),
            InitError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InitError::SurfaceCreation(e) => Some(e),
            InitError::AdapterRequest(e) => Some(e),
            InitError::DeviceCreation(e) => Some(e),
        }
    }
}

impl From<wgpu::CreateSurfaceError> for InitError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        InitError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestAdapterError> for InitError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        InitError::AdapterRequest(e)
    }
}

impl From<wgpu::RequestDeviceError> for InitError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        InitError::DeviceCreation(e)
    }
}
