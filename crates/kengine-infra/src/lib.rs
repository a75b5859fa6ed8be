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

//! # K-Engine Infra
//!
//! Concrete implementations of the engine's external-facing contracts.
//!
//! This crate binds the abstract traits defined in `kengine-core` to real
//! libraries: `winit` for windowing and input, `glutin` for OpenGL context
//! management and `glow` for the GL function surface. Nothing here is meant
//! to be used directly by game code; the SDK wires it together.

#![warn(missing_docs)]

#[cfg(feature = "graphics")]
pub mod graphics;
#[cfg(feature = "platform")]
pub mod platform;
