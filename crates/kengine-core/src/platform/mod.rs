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

//! Contracts for the operating-system facing parts of the engine.
//!
//! The types here describe what a windowing backend must provide without
//! naming a concrete library; the implementations live in the infrastructure
//! crate.

pub mod input;
pub mod window;

pub use input::{InputEvent, MouseButton};
pub use window::{EngineWindow, SharedWindowHandle, WindowError};
