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

//! The public-facing Software Development Kit (SDK) for K-Engine.
//! This crate provides a simple and stable API for game developers to create
//! and run applications using the engine: implement [`Application`], then
//! hand an instance to [`Engine::run`].

#![warn(missing_docs)]

mod application;
mod clock;
mod config;
mod control;
mod engine;

pub use application::{Application, EngineContext};
pub use clock::FrameClock;
pub use config::EngineConfig;
pub use control::{LoopController, LoopState};
pub use engine::Engine;

/// Single import for the types most applications touch.
pub mod prelude {
    pub use crate::{Application, Engine, EngineConfig, EngineContext, LoopState};
    pub use kengine_core::math::{LinearRgba, Mat4, Vec2, Vec3, Vec4};
    pub use kengine_core::platform::input::MouseButton;
    pub use kengine_core::renderer::{
        primitives, ApiVersion, ContextProfile, ContextSettings, GlslSource, Mesh,
        PrimitiveTopology, RenderSystem, ShaderStage, ShaderStageDescriptor, VertexAttribute,
    };
    pub use kengine_infra::graphics::gl::{GlRenderSystem, GlslProgram, MeshNode};
}
