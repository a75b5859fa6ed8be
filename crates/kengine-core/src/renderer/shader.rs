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

//! Descriptions of shader stages to be compiled by the graphics backend.

use std::borrow::Cow;
use std::path::PathBuf;

/// Identifies a programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// The vertex stage.
    Vertex,
    /// The fragment stage.
    Fragment,
    /// The geometry stage.
    Geometry,
    /// The tessellation control stage.
    TessControl,
    /// The tessellation evaluation stage.
    TessEvaluation,
    /// The compute stage.
    Compute,
}

/// Where a shader stage's GLSL text comes from.
#[derive(Debug, Clone)]
pub enum GlslSource {
    /// Inline GLSL text.
    Text(Cow<'static, str>),
    /// Plain-text GLSL read from the filesystem when the program is built.
    Path(PathBuf),
}

/// Describes one shader stage of a program.
#[derive(Debug, Clone)]
pub struct ShaderStageDescriptor {
    /// The pipeline stage this source compiles into.
    pub stage: ShaderStage,
    /// The GLSL source.
    pub source: GlslSource,
    /// A descriptive label used in logs and error messages.
    pub label: Option<String>,
}

impl ShaderStageDescriptor {
    /// Creates a descriptor for inline GLSL text.
    pub fn from_text(stage: ShaderStage, text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            stage,
            source: GlslSource::Text(text.into()),
            label: None,
        }
    }

    /// Creates a descriptor whose source is read from `path` at build time.
    ///
    /// The file name becomes the default label.
    pub fn from_path(stage: ShaderStage, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Self {
            stage,
            source: GlslSource::Path(path),
            label,
        }
    }

    /// Overrides the descriptor's label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the label, or a stage-derived placeholder for unlabeled
    /// descriptors.
    pub fn label_or_stage(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("{:?} stage", self.stage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_from_text_has_no_label() {
        let descriptor = ShaderStageDescriptor::from_text(ShaderStage::Vertex, "void main() {}");
        assert_eq!(descriptor.stage, ShaderStage::Vertex);
        assert!(descriptor.label.is_none());
        assert_eq!(descriptor.label_or_stage(), "Vertex stage");
        let GlslSource::Text(ref text) = descriptor.source else {
            panic!("expected inline text source");
        };
        assert_eq!(text.as_ref(), "void main() {}");
    }

    #[test]
    fn descriptor_from_path_uses_file_name_as_label() {
        let descriptor =
            ShaderStageDescriptor::from_path(ShaderStage::Fragment, "shaders/basic.frag");
        assert_eq!(descriptor.label.as_deref(), Some("basic.frag"));

        let relabeled = descriptor.with_label("custom");
        assert_eq!(relabeled.label.as_deref(), Some("custom"));
    }
}
