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

//! Backend-agnostic rendering contracts and data types.
//!
//! This module defines what a rendering backend must do (the traits), the
//! data it consumes (meshes, shader descriptors, settings), and the errors it
//! can report. The concrete OpenGL implementation lives in the
//! infrastructure crate.

pub mod adapter;
pub mod error;
pub mod mesh;
pub mod primitives;
pub mod settings;
pub mod shader;
pub mod stats;
pub mod traits;

pub use adapter::AdapterInfo;
pub use error::{ContextError, MeshError, RenderError, ShaderError};
pub use mesh::{Mesh, PrimitiveTopology, VertexAttribute};
pub use settings::{ApiVersion, ContextProfile, ContextSettings};
pub use shader::{GlslSource, ShaderStage, ShaderStageDescriptor};
pub use stats::RenderStats;
pub use traits::{RenderContext, RenderSystem};
