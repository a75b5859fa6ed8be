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

//! The OpenGL rendering backend, built on `glutin` and `glow`.
//!
//! `glutin` owns platform context creation (WGL, CGL, EGL) and `glow`
//! provides the loaded function table. Everything GL-specific lives behind
//! [`GlRenderSystem`], which implements the engine's `RenderSystem` contract.

mod context;
mod mesh_node;
mod program;
mod system;

pub use context::GlGraphicsContext;
pub use mesh_node::MeshNode;
pub use program::GlslProgram;
pub use system::GlRenderSystem;
