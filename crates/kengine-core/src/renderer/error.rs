// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the hierarchy of error types for the rendering subsystem.

use crate::platform::window::WindowError;
use crate::renderer::settings::ApiVersion;
use crate::renderer::shader::ShaderStage;
use std::fmt;

/// An error related to creating or driving an OpenGL context.
#[derive(Debug)]
pub enum ContextError {
    /// No connection to the platform's display system could be opened.
    DisplayUnavailable(String),
    /// No framebuffer configuration matched the requested settings.
    NoSuitableConfig,
    /// The driver refused to create a context with the requested attributes.
    CreationFailed(String),
    /// The window surface could not be created.
    SurfaceCreationFailed(String),
    /// The context could not be made current on this thread.
    MakeCurrentFailed(String),
    /// Presenting the back buffer failed.
    SwapFailed(String),
    /// The loaded function table is unusable.
    FunctionLoadingFailed(String),
    /// The created context is older than the requested API version.
    VersionUnsupported {
        /// The version that was requested.
        requested: ApiVersion,
        /// The version the driver actually provided.
        got: ApiVersion,
    },
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::DisplayUnavailable(msg) => {
                write!(f, "Display connection unavailable: {msg}")
            }
            ContextError::NoSuitableConfig => {
                write!(f, "No framebuffer configuration matches the requested settings.")
            }
            ContextError::CreationFailed(msg) => {
                write!(f, "OpenGL context creation failed: {msg}")
            }
            ContextError::SurfaceCreationFailed(msg) => {
                write!(f, "Window surface creation failed: {msg}")
            }
            ContextError::MakeCurrentFailed(msg) => {
                write!(f, "Failed to make the context current: {msg}")
            }
            ContextError::SwapFailed(msg) => {
                write!(f, "Buffer swap failed: {msg}")
            }
            ContextError::FunctionLoadingFailed(msg) => {
                write!(f, "OpenGL function loading failed: {msg}")
            }
            ContextError::VersionUnsupported { requested, got } => {
                write!(
                    f,
                    "OpenGL version {requested} was requested but the driver provided {got}"
                )
            }
        }
    }
}

impl std::error::Error for ContextError {}

/// An error related to the creation, loading, or compilation of a shader
/// program.
#[derive(Debug)]
pub enum ShaderError {
    /// An error occurred while trying to load the shader source from a path.
    LoadError {
        /// The path of the file that failed to load.
        path: String,
        /// The underlying I/O error.
        source_error: String,
    },
    /// A shader stage failed to compile.
    CompilationError {
        /// The stage that failed.
        stage: ShaderStage,
        /// A descriptive label for the shader, if available.
        label: String,
        /// The driver's info log.
        details: String,
    },
    /// The program failed to link.
    LinkError {
        /// A descriptive label for the program, if available.
        label: String,
        /// The driver's info log.
        details: String,
    },
    /// The driver exposes no program binary formats.
    BinaryUnsupported,
    /// A stored program binary was malformed or refused by the driver.
    BinaryRejected(String),
    /// Reading or writing a program binary file failed.
    Io(String),
    /// The backend failed to allocate a shader or program object.
    Backend(String),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::LoadError { path, source_error } => {
                write!(
                    f,
                    "Failed to load shader source from '{path}': {source_error}"
                )
            }
            ShaderError::CompilationError {
                stage,
                label,
                details,
            } => {
                write!(
                    f,
                    "{stage:?} shader compilation failed for '{label}': {details}"
                )
            }
            ShaderError::LinkError { label, details } => {
                write!(f, "Program link failed for '{label}': {details}")
            }
            ShaderError::BinaryUnsupported => {
                write!(f, "The driver exposes no program binary formats.")
            }
            ShaderError::BinaryRejected(msg) => {
                write!(f, "Program binary rejected: {msg}")
            }
            ShaderError::Io(msg) => {
                write!(f, "Program binary I/O failed: {msg}")
            }
            ShaderError::Backend(msg) => {
                write!(f, "Shader object allocation failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// An error produced while assembling a vertex attribute container.
#[derive(Debug, PartialEq, Eq)]
pub enum MeshError {
    /// An attribute was created with no data.
    EmptyAttribute,
    /// An attribute was created with a component count of zero.
    InvalidComponentCount {
        /// The rejected component count.
        components: u32,
    },
    /// The attribute data length is not divisible by its component count.
    DataNotDivisible {
        /// Number of floats supplied.
        len: usize,
        /// Components per vertex.
        components: u32,
    },
    /// Two attributes were registered for the same shader location.
    DuplicateLocation(u32),
    /// An attribute's vertex count disagrees with the attributes already
    /// registered.
    VertexCountMismatch {
        /// The location being inserted.
        location: u32,
        /// The vertex count established by earlier attributes.
        expected: usize,
        /// The vertex count of the rejected attribute.
        got: usize,
    },
    /// The mesh has no attributes.
    NoAttributes,
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::EmptyAttribute => write!(f, "Vertex attribute has no data."),
            MeshError::InvalidComponentCount { components } => {
                write!(f, "Invalid component count per vertex: {components}")
            }
            MeshError::DataNotDivisible { len, components } => {
                write!(
                    f,
                    "Attribute data length {len} is not divisible by component count {components}"
                )
            }
            MeshError::DuplicateLocation(location) => {
                write!(f, "Attribute location {location} is already registered.")
            }
            MeshError::VertexCountMismatch {
                location,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Attribute at location {location} has {got} vertices but the mesh has {expected}"
                )
            }
            MeshError::NoAttributes => write!(f, "The mesh has no attributes."),
        }
    }
}

impl std::error::Error for MeshError {}

/// A high-level error that can occur within the main rendering system.
#[derive(Debug)]
pub enum RenderError {
    /// An operation was attempted before the rendering system was initialized.
    NotInitialized,
    /// A window-level failure.
    Window(WindowError),
    /// A context-level failure.
    Context(ContextError),
    /// A shader-level failure.
    Shader(ShaderError),
    /// A mesh validation failure.
    Mesh(MeshError),
    /// A critical rendering operation failed.
    RenderingFailed(String),
    /// An unexpected or internal error occurred.
    Internal(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NotInitialized => {
                write!(f, "The rendering system is not initialized.")
            }
            RenderError::Window(err) => write!(f, "Window error: {err}"),
            RenderError::Context(err) => write!(f, "Context error: {err}"),
            RenderError::Shader(err) => write!(f, "Shader error: {err}"),
            RenderError::Mesh(err) => write!(f, "Mesh error: {err}"),
            RenderError::RenderingFailed(msg) => {
                write!(f, "A critical rendering operation failed: {msg}")
            }
            RenderError::Internal(msg) => {
                write!(f, "An internal or unexpected error occurred: {msg}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Window(err) => Some(err),
            RenderError::Context(err) => Some(err),
            RenderError::Shader(err) => Some(err),
            RenderError::Mesh(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WindowError> for RenderError {
    fn from(err: WindowError) -> Self {
        RenderError::Window(err)
    }
}

impl From<ContextError> for RenderError {
    fn from(err: ContextError) -> Self {
        RenderError::Context(err)
    }
}

impl From<ShaderError> for RenderError {
    fn from(err: ShaderError) -> Self {
        RenderError::Shader(err)
    }
}

impl From<MeshError> for RenderError {
    fn from(err: MeshError) -> Self {
        RenderError::Mesh(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn shader_error_display() {
        let err = ShaderError::LoadError {
            path: "shaders/basic.vert".to_string(),
            source_error: "File not found".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Failed to load shader source from 'shaders/basic.vert': File not found"
        );

        let err_link = ShaderError::LinkError {
            label: "BasicProgram".to_string(),
            details: "unresolved symbol".to_string(),
        };
        assert_eq!(
            format!("{err_link}"),
            "Program link failed for 'BasicProgram': unresolved symbol"
        );
    }

    #[test]
    fn context_error_reports_version_mismatch() {
        let err = ContextError::VersionUnsupported {
            requested: ApiVersion::new(3, 3),
            got: ApiVersion::new(2, 1),
        };
        assert_eq!(
            format!("{err}"),
            "OpenGL version 3.3 was requested but the driver provided 2.1"
        );
    }

    #[test]
    fn render_error_display_wrapping_context_error() {
        let ctx_err = ContextError::NoSuitableConfig;
        let render_err: RenderError = ctx_err.into();
        assert_eq!(
            format!("{render_err}"),
            "Context error: No framebuffer configuration matches the requested settings."
        );
        assert!(render_err.source().is_some());
    }

    #[test]
    fn render_error_display_wrapping_mesh_error() {
        let mesh_err = MeshError::VertexCountMismatch {
            location: 1,
            expected: 6,
            got: 4,
        };
        let render_err: RenderError = mesh_err.into();
        assert_eq!(
            format!("{render_err}"),
            "Mesh error: Attribute at location 1 has 4 vertices but the mesh has 6"
        );
        assert!(render_err.source().is_some());
    }
}
