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

//! Compilation, linking, and lifetime management of GLSL shader programs.

use super::context::ProgramBinaryApi;
use glow::HasContext;
use kengine_core::math::{Mat4, Vec3, Vec4};
use kengine_core::renderer::{GlslSource, ShaderError, ShaderStage, ShaderStageDescriptor};
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// File identification for saved program binaries.
const BINARY_MAGIC: &[u8; 4] = b"KEPB";
/// Container layout revision, bumped when the header changes.
const BINARY_CONTAINER_VERSION: u32 = 1;
/// Magic, container version, and the driver's binary format token.
const BINARY_HEADER_LEN: usize = 4 + 4 + 4;

/// A linked GLSL program with a cache of its active uniform locations.
///
/// The cache is filled once at link time, so uniform setters are plain map
/// lookups. Setting a uniform the linker removed (or one that never existed)
/// is reported through the `false` return value rather than an error, since
/// drivers routinely strip unused uniforms from otherwise valid programs.
///
/// The underlying GL object is deleted when the value is dropped.
pub struct GlslProgram {
    gl: Arc<glow::Context>,
    binary_api: Option<ProgramBinaryApi>,
    program: glow::Program,
    uniforms: HashMap<String, glow::UniformLocation>,
    label: String,
}

impl fmt::Debug for GlslProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlslProgram")
            .field("label", &self.label)
            .field("program", &self.program)
            .field("uniforms", &self.uniforms.len())
            .finish()
    }
}

impl GlslProgram {
    /// Compiles and links `stages` into a usable program.
    pub(crate) fn new(
        gl: Arc<glow::Context>,
        binary_api: Option<ProgramBinaryApi>,
        label: impl Into<String>,
        stages: &[ShaderStageDescriptor],
    ) -> Result<Self, ShaderError> {
        let label = label.into();
        let (program, uniforms) = build_program(&gl, &label, stages)?;
        Ok(Self {
            gl,
            binary_api,
            program,
            uniforms,
            label,
        })
    }

    /// Restores a program from a binary file written by [`save_binary`].
    ///
    /// [`save_binary`]: GlslProgram::save_binary
    pub(crate) fn from_binary_file(
        gl: Arc<glow::Context>,
        binary_api: Option<ProgramBinaryApi>,
        label: impl Into<String>,
        path: &Path,
    ) -> Result<Self, ShaderError> {
        let label = label.into();
        let api = binary_api.ok_or(ShaderError::BinaryUnsupported)?;

        let bytes = fs::read(path).map_err(|e| ShaderError::Io(e.to_string()))?;
        let (format, blob) = parse_binary_file(&bytes)?;

        let program = unsafe { create_program_object(&gl)? };
        api.upload(program.0.get(), format, blob);

        let linked = unsafe { gl.get_program_link_status(program) };
        if !linked {
            let details = unsafe { gl.get_program_info_log(program) };
            unsafe { gl.delete_program(program) };
            return Err(ShaderError::BinaryRejected(format!(
                "driver refused the stored binary: {details}"
            )));
        }

        let uniforms = unsafe { collect_uniforms(&gl, program) };
        debug!(
            "Program '{label}' restored from binary '{}' ({} active uniforms)",
            path.display(),
            uniforms.len()
        );
        Ok(Self {
            gl,
            binary_api,
            program,
            uniforms,
            label,
        })
    }

    /// The label given at creation, used in logs and error messages.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Makes this program the active one for subsequent draw calls.
    pub fn bind(&self) {
        unsafe { self.gl.use_program(Some(self.program)) };
    }

    /// True if the linked program exposes an active uniform named `name`.
    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniforms.contains_key(name)
    }

    /// Sets an `int` (or sampler) uniform. Returns `false` if the program
    /// has no active uniform with that name.
    pub fn set_uniform_i32(&self, name: &str, value: i32) -> bool {
        match self.location(name) {
            Some(location) => {
                unsafe { self.gl.uniform_1_i32(Some(location), value) };
                true
            }
            None => false,
        }
    }

    /// Sets a `float` uniform. Returns `false` if the program has no active
    /// uniform with that name.
    pub fn set_uniform_f32(&self, name: &str, value: f32) -> bool {
        match self.location(name) {
            Some(location) => {
                unsafe { self.gl.uniform_1_f32(Some(location), value) };
                true
            }
            None => false,
        }
    }

    /// Sets a `vec3` uniform. Returns `false` if the program has no active
    /// uniform with that name.
    pub fn set_uniform_vec3(&self, name: &str, value: Vec3) -> bool {
        match self.location(name) {
            Some(location) => {
                unsafe {
                    self.gl
                        .uniform_3_f32(Some(location), value.x, value.y, value.z)
                };
                true
            }
            None => false,
        }
    }

    /// Sets a `vec4` uniform. Returns `false` if the program has no active
    /// uniform with that name.
    pub fn set_uniform_vec4(&self, name: &str, value: Vec4) -> bool {
        match self.location(name) {
            Some(location) => {
                unsafe {
                    self.gl
                        .uniform_4_f32(Some(location), value.x, value.y, value.z, value.w)
                };
                true
            }
            None => false,
        }
    }

    /// Sets a `mat4` uniform from a column-major matrix. Returns `false` if
    /// the program has no active uniform with that name.
    pub fn set_uniform_mat4(&self, name: &str, value: &Mat4) -> bool {
        match self.location(name) {
            Some(location) => {
                unsafe {
                    self.gl
                        .uniform_matrix_4_f32_slice(Some(location), false, &value.to_cols_array())
                };
                true
            }
            None => false,
        }
    }

    /// Recompiles `stages` and swaps the linked result in.
    ///
    /// On failure the existing program is left untouched and stays usable.
    pub fn reload(&mut self, stages: &[ShaderStageDescriptor]) -> Result<(), ShaderError> {
        let (program, uniforms) = build_program(&self.gl, &self.label, stages)?;
        unsafe { self.gl.delete_program(self.program) };
        self.program = program;
        self.uniforms = uniforms;
        debug!("Program '{}' rebuilt from source", self.label);
        Ok(())
    }

    /// Writes the driver-compiled binary of this program to `path`.
    ///
    /// The file carries the driver's binary format token; it is only valid
    /// on the driver that produced it, and [`from_binary_file`] reports a
    /// [`ShaderError::BinaryRejected`] when a driver refuses it.
    ///
    /// [`from_binary_file`]: GlslProgram::from_binary_file
    pub fn save_binary(&self, path: &Path) -> Result<(), ShaderError> {
        let api = self.binary_api.ok_or(ShaderError::BinaryUnsupported)?;
        let (format, blob) = api
            .retrieve(self.program.0.get())
            .ok_or(ShaderError::BinaryUnsupported)?;

        let bytes = encode_binary_file(format, &blob);
        fs::write(path, bytes).map_err(|e| ShaderError::Io(e.to_string()))?;
        debug!(
            "Program '{}' binary saved to '{}' ({} bytes, format {format:#x})",
            self.label,
            path.display(),
            blob.len()
        );
        Ok(())
    }

    fn location(&self, name: &str) -> Option<&glow::UniformLocation> {
        let location = self.uniforms.get(name);
        if location.is_none() {
            debug!("Program '{}' has no active uniform '{name}'", self.label);
        }
        location
    }
}

impl Drop for GlslProgram {
    fn drop(&mut self) {
        unsafe { self.gl.delete_program(self.program) };
    }
}

/// Compiles every stage, links them, and collects the active uniforms.
fn build_program(
    gl: &glow::Context,
    label: &str,
    stages: &[ShaderStageDescriptor],
) -> Result<(glow::Program, HashMap<String, glow::UniformLocation>), ShaderError> {
    validate_stages(label, stages)?;

    let mut compiled: Vec<glow::Shader> = Vec::with_capacity(stages.len());
    for descriptor in stages {
        match compile_stage(gl, descriptor) {
            Ok(shader) => compiled.push(shader),
            Err(err) => {
                unsafe {
                    for &shader in &compiled {
                        gl.delete_shader(shader);
                    }
                }
                return Err(err);
            }
        }
    }

    unsafe {
        let program = match create_program_object(gl) {
            Ok(program) => program,
            Err(err) => {
                for &shader in &compiled {
                    gl.delete_shader(shader);
                }
                return Err(err);
            }
        };

        for &shader in &compiled {
            gl.attach_shader(program, shader);
        }
        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            let details = gl.get_program_info_log(program);
            for &shader in &compiled {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }
            gl.delete_program(program);
            return Err(ShaderError::LinkError {
                label: label.to_string(),
                details,
            });
        }
        for &shader in &compiled {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }

        let uniforms = collect_uniforms(gl, program);
        debug!(
            "Program '{label}' linked ({} stages, {} active uniforms)",
            stages.len(),
            uniforms.len()
        );
        Ok((program, uniforms))
    }
}

/// Rejects descriptor lists that cannot possibly link.
fn validate_stages(label: &str, stages: &[ShaderStageDescriptor]) -> Result<(), ShaderError> {
    if stages.is_empty() {
        return Err(ShaderError::LinkError {
            label: label.to_string(),
            details: "no shader stages attached".to_string(),
        });
    }
    Ok(())
}

/// Returns the GLSL text of a stage, reading file-backed sources from disk.
fn resolve_source(descriptor: &ShaderStageDescriptor) -> Result<String, ShaderError> {
    match &descriptor.source {
        GlslSource::Text(text) => Ok(text.as_ref().to_string()),
        GlslSource::Path(path) => fs::read_to_string(path).map_err(|e| ShaderError::LoadError {
            path: path.display().to_string(),
            source_error: e.to_string(),
        }),
    }
}

/// Compiles a single stage, resolving file-backed sources first.
fn compile_stage(
    gl: &glow::Context,
    descriptor: &ShaderStageDescriptor,
) -> Result<glow::Shader, ShaderError> {
    let source = resolve_source(descriptor)?;

    unsafe {
        let shader = gl
            .create_shader(stage_to_glow(descriptor.stage))
            .map_err(ShaderError::Backend)?;
        gl.shader_source(shader, &source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let details = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(ShaderError::CompilationError {
                stage: descriptor.stage,
                label: descriptor.label_or_stage(),
                details,
            });
        }
        Ok(shader)
    }
}

unsafe fn create_program_object(gl: &glow::Context) -> Result<glow::Program, ShaderError> {
    gl.create_program().map_err(ShaderError::Backend)
}

unsafe fn collect_uniforms(
    gl: &glow::Context,
    program: glow::Program,
) -> HashMap<String, glow::UniformLocation> {
    let count = gl.get_active_uniforms(program);
    let mut uniforms = HashMap::with_capacity(count as usize);
    for index in 0..count {
        if let Some(active) = gl.get_active_uniform(program, index) {
            if let Some(location) = gl.get_uniform_location(program, &active.name) {
                uniforms.insert(active.name, location);
            }
        }
    }
    uniforms
}

fn stage_to_glow(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        ShaderStage::Geometry => glow::GEOMETRY_SHADER,
        ShaderStage::TessControl => glow::TESS_CONTROL_SHADER,
        ShaderStage::TessEvaluation => glow::TESS_EVALUATION_SHADER,
        ShaderStage::Compute => glow::COMPUTE_SHADER,
    }
}

/// Lays out a binary file: magic, container version, format token, blob.
fn encode_binary_file(format: u32, blob: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(BINARY_HEADER_LEN + blob.len());
    bytes.extend_from_slice(BINARY_MAGIC);
    bytes.extend_from_slice(&BINARY_CONTAINER_VERSION.to_le_bytes());
    bytes.extend_from_slice(&format.to_le_bytes());
    bytes.extend_from_slice(blob);
    bytes
}

/// Splits a binary file into its format token and blob, validating the
/// header.
fn parse_binary_file(bytes: &[u8]) -> Result<(u32, &[u8]), ShaderError> {
    if bytes.len() < BINARY_HEADER_LEN {
        return Err(ShaderError::BinaryRejected(
            "file too short for the header".to_string(),
        ));
    }
    if &bytes[..4] != BINARY_MAGIC {
        return Err(ShaderError::BinaryRejected(
            "bad magic; not a program binary file".to_string(),
        ));
    }

    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[4..8]);
    let container_version = u32::from_le_bytes(word);
    if container_version != BINARY_CONTAINER_VERSION {
        return Err(ShaderError::BinaryRejected(format!(
            "unsupported container version {container_version}"
        )));
    }

    word.copy_from_slice(&bytes[8..12]);
    let format = u32::from_le_bytes(word);
    Ok((format, &bytes[BINARY_HEADER_LEN..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_file_round_trips_format_and_blob() {
        let blob = [0xAAu8, 0xBB, 0xCC, 0xDD, 0xEE];
        let bytes = encode_binary_file(0x9341, &blob);
        let (format, parsed) = parse_binary_file(&bytes).unwrap();
        assert_eq!(format, 0x9341);
        assert_eq!(parsed, blob);
    }

    #[test]
    fn binary_file_with_empty_blob_parses() {
        let bytes = encode_binary_file(7, &[]);
        let (format, parsed) = parse_binary_file(&bytes).unwrap();
        assert_eq!(format, 7);
        assert!(parsed.is_empty());
    }

    #[test]
    fn truncated_binary_file_is_rejected() {
        let err = parse_binary_file(b"KEP").unwrap_err();
        assert!(matches!(err, ShaderError::BinaryRejected(_)));
    }

    #[test]
    fn foreign_file_is_rejected_on_magic() {
        let err = parse_binary_file(b"\x89PNG\x0d\x0a\x1a\x0a\x00\x00\x00\x0d").unwrap_err();
        assert!(
            matches!(err, ShaderError::BinaryRejected(ref msg) if msg.contains("magic")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn future_container_version_is_rejected() {
        let mut bytes = encode_binary_file(7, &[1, 2, 3]);
        bytes[4] = 99;
        let err = parse_binary_file(&bytes).unwrap_err();
        assert!(
            matches!(err, ShaderError::BinaryRejected(ref msg) if msg.contains("version")),
            "unexpected error: {err}"
        );
    }

    /// An empty stage list must fail as a link error before any driver work.
    #[test]
    fn zero_stage_program_fails_validation_as_link_error() {
        let err = validate_stages("empty", &[]).unwrap_err();
        match err {
            ShaderError::LinkError { label, details } => {
                assert_eq!(label, "empty");
                assert!(details.contains("no shader stages"), "details: {details}");
            }
            other => panic!("expected LinkError, got {other}"),
        }
    }

    #[test]
    fn missing_shader_file_reports_the_path() {
        let descriptor =
            ShaderStageDescriptor::from_path(ShaderStage::Vertex, "/nonexistent/missing.vert");
        let err = resolve_source(&descriptor).unwrap_err();
        match err {
            ShaderError::LoadError { path, .. } => {
                assert!(path.contains("missing.vert"), "path: {path}");
            }
            other => panic!("expected LoadError, got {other}"),
        }
    }
}
