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

//! OpenGL context creation and ownership, built on `glutin`.

use glow::HasContext;
use glutin::{
    config::{Config, ConfigTemplateBuilder},
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{Display, DisplayApiPreference},
    prelude::*,
    surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface},
};
use kengine_core::platform::window::EngineWindow;
use kengine_core::renderer::{
    AdapterInfo, ApiVersion, ContextError, ContextProfile, ContextSettings, RenderContext,
};
use log::{debug, info, warn};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use std::ffi::{c_void, CStr};
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

const PROGRAM_BINARY_LENGTH: u32 = 0x8741;

type GetProgramIvFn = extern "system" fn(u32, u32, *mut i32);
type GetProgramBinaryFn = extern "system" fn(u32, i32, *mut i32, *mut u32, *mut c_void);
type ProgramBinaryFn = extern "system" fn(u32, u32, *const c_void, i32);

/// Entry points for retrieving and uploading compiled program binaries.
///
/// `glow` does not wrap these, so they are loaded straight off the display,
/// the same way swap-control extensions are.
#[derive(Clone, Copy)]
pub(crate) struct ProgramBinaryApi {
    get_program_iv: GetProgramIvFn,
    get_program_binary: GetProgramBinaryFn,
    program_binary: ProgramBinaryFn,
}

impl ProgramBinaryApi {
    fn load(display: &Display) -> Option<Self> {
        let get_program_iv = display.get_proc_address(c"glGetProgramiv");
        let get_program_binary = display.get_proc_address(c"glGetProgramBinary");
        let program_binary = display.get_proc_address(c"glProgramBinary");
        if get_program_iv.is_null() || get_program_binary.is_null() || program_binary.is_null() {
            return None;
        }
        unsafe {
            Some(Self {
                get_program_iv: std::mem::transmute::<*const c_void, GetProgramIvFn>(
                    get_program_iv,
                ),
                get_program_binary: std::mem::transmute::<*const c_void, GetProgramBinaryFn>(
                    get_program_binary,
                ),
                program_binary: std::mem::transmute::<*const c_void, ProgramBinaryFn>(
                    program_binary,
                ),
            })
        }
    }

    /// Reads the compiled binary of a linked program, together with its
    /// driver-specific format token.
    pub(crate) fn retrieve(&self, program: u32) -> Option<(u32, Vec<u8>)> {
        let mut length: i32 = 0;
        (self.get_program_iv)(program, PROGRAM_BINARY_LENGTH, &mut length);
        if length <= 0 {
            return None;
        }
        let mut binary = vec![0u8; length as usize];
        let mut written: i32 = 0;
        let mut format: u32 = 0;
        (self.get_program_binary)(
            program,
            length,
            &mut written,
            &mut format,
            binary.as_mut_ptr().cast(),
        );
        if written <= 0 || written as usize > binary.len() {
            return None;
        }
        binary.truncate(written as usize);
        Some((format, binary))
    }

    /// Hands a previously retrieved binary back to the driver. The caller
    /// must check the program's link status afterwards.
    pub(crate) fn upload(&self, program: u32, format: u32, binary: &[u8]) {
        (self.program_binary)(program, format, binary.as_ptr().cast(), binary.len() as i32);
    }
}

/// An OpenGL context bound to one window surface.
///
/// Creation runs the whole platform bootstrap in one step: display opening,
/// framebuffer configuration, surface and context creation, making the
/// context current, and loading the function table. A value of this type is
/// always ready to render into; if any stage fails, no partially initialized
/// context is exposed.
pub struct GlGraphicsContext {
    display: Display,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    gl: Arc<glow::Context>,
    binary_api: Option<ProgramBinaryApi>,
    api_version: ApiVersion,
    profile: ContextProfile,
}

impl fmt::Debug for GlGraphicsContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlGraphicsContext")
            .field("api_version", &self.api_version)
            .field("profile", &self.profile)
            .field("binary_api", &self.binary_api.as_ref().map(|_| "loaded"))
            .finish()
    }
}

impl GlGraphicsContext {
    /// Creates a context for `window` honoring the requested `settings`.
    ///
    /// The created context is current on the calling thread when this
    /// returns. The driver may provide a newer version than requested;
    /// anything older is rejected with [`ContextError::VersionUnsupported`].
    pub fn new(
        window: &dyn EngineWindow,
        settings: &ContextSettings,
    ) -> Result<Self, ContextError> {
        let requested = settings.version;
        info!(
            "Creating OpenGL context (requesting {requested}, {:?} profile)",
            settings.profile
        );

        let raw_display_handle = window
            .display_handle()
            .map_err(|e| ContextError::DisplayUnavailable(e.to_string()))?
            .as_raw();
        let raw_window_handle = window
            .window_handle()
            .map_err(|e| ContextError::CreationFailed(format!("no window handle: {e}")))?
            .as_raw();

        let display = unsafe {
            Display::new(raw_display_handle, display_api_preference(raw_window_handle))
        }
        .map_err(|e| ContextError::DisplayUnavailable(e.to_string()))?;

        let config = pick_config(&display, settings)?;

        let (width, height) = window.inner_size();
        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
        );
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .map_err(|e| ContextError::SurfaceCreationFailed(e.to_string()))?;

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(
                requested.major as u8,
                requested.minor as u8,
            ))))
            .with_profile(match settings.profile {
                ContextProfile::Core => GlProfile::Core,
                ContextProfile::Compatibility => GlProfile::Compatibility,
            })
            .with_debug(cfg!(debug_assertions))
            .build(Some(raw_window_handle));

        // Mobile drivers refuse desktop GL outright, so retry as GLES
        // before giving up.
        let fallback_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(None))
            .with_debug(cfg!(debug_assertions))
            .build(Some(raw_window_handle));

        let not_current = unsafe {
            display
                .create_context(&config, &context_attributes)
                .or_else(|err| {
                    debug!("OpenGL {requested} context refused ({err}); retrying as GLES");
                    display.create_context(&config, &fallback_attributes)
                })
        }
        .map_err(|e| ContextError::CreationFailed(e.to_string()))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| ContextError::MakeCurrentFailed(e.to_string()))?;

        let interval = if settings.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            warn!("Could not apply the requested swap interval: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|s: &CStr| display.get_proc_address(s))
        };

        let version_string = unsafe { gl.get_parameter_string(glow::VERSION) };
        let (api_version, is_gles) = parse_gl_version(&version_string).ok_or_else(|| {
            ContextError::FunctionLoadingFailed(format!(
                "unparseable GL_VERSION string: '{version_string}'"
            ))
        })?;
        if !is_gles && api_version < requested {
            return Err(ContextError::VersionUnsupported {
                requested,
                got: api_version,
            });
        }

        let binary_api = ProgramBinaryApi::load(&display);
        if binary_api.is_none() {
            debug!("Program binary entry points unavailable; compiled program caching disabled.");
        }

        info!("OpenGL context ready: '{version_string}'");

        Ok(Self {
            display,
            surface,
            context,
            gl: Arc::new(gl),
            binary_api,
            api_version,
            profile: settings.profile,
        })
    }

    /// The loaded OpenGL function table.
    pub(crate) fn gl(&self) -> &Arc<glow::Context> {
        &self.gl
    }

    pub(crate) fn binary_api(&self) -> Option<ProgramBinaryApi> {
        self.binary_api
    }

    /// Queries the driver's identification strings.
    pub fn adapter_info(&self) -> AdapterInfo {
        unsafe {
            AdapterInfo {
                renderer: self.gl.get_parameter_string(glow::RENDERER),
                vendor: self.gl.get_parameter_string(glow::VENDOR),
                version: self.gl.get_parameter_string(glow::VERSION),
                shading_language_version: self
                    .gl
                    .get_parameter_string(glow::SHADING_LANGUAGE_VERSION),
            }
        }
    }
}

impl RenderContext for GlGraphicsContext {
    fn make_current(&self) -> Result<(), ContextError> {
        self.context
            .make_current(&self.surface)
            .map_err(|e| ContextError::MakeCurrentFailed(e.to_string()))
    }

    fn is_current(&self) -> bool {
        self.context.is_current()
    }

    fn swap_buffers(&self) -> Result<(), ContextError> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| ContextError::SwapFailed(e.to_string()))
    }

    fn resize_surface(&self, width: u32, height: u32) {
        self.surface.resize(
            &self.context,
            NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
        );
    }

    fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    fn profile(&self) -> ContextProfile {
        self.profile
    }
}

#[cfg(target_os = "windows")]
fn display_api_preference(raw_window_handle: RawWindowHandle) -> DisplayApiPreference {
    // WGL needs an existing window to bootstrap its extension loader.
    DisplayApiPreference::Wgl(Some(raw_window_handle))
}

#[cfg(target_os = "macos")]
fn display_api_preference(_raw_window_handle: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn display_api_preference(_raw_window_handle: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Egl
}

fn pick_config(display: &Display, settings: &ContextSettings) -> Result<Config, ContextError> {
    let mut template = ConfigTemplateBuilder::new()
        .with_alpha_size(8)
        .with_depth_size(settings.depth_bits)
        .with_stencil_size(settings.stencil_bits)
        .with_transparency(false);
    if let Some(samples) = settings.samples {
        template = template.with_multisampling(samples);
    }

    unsafe { display.find_configs(template.build()) }
        .map_err(|e| ContextError::CreationFailed(e.to_string()))?
        .next()
        .ok_or(ContextError::NoSuitableConfig)
}

/// Extracts the major/minor version from a `GL_VERSION` string.
///
/// Desktop strings open with the version ("3.3.0 NVIDIA 535.104"), GLES
/// strings carry a prefix ("OpenGL ES 3.2 v1.r32p1").
fn parse_gl_version(version: &str) -> Option<(ApiVersion, bool)> {
    let is_gles = version.starts_with("OpenGL ES");
    let digits_start = version.find(|c: char| c.is_ascii_digit())?;
    let mut parts = version[digits_start..].split(|c: char| !c.is_ascii_digit());
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    Some((ApiVersion::new(major, minor), is_gles))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_desktop_version_strings() {
        assert_eq!(
            parse_gl_version("3.3.0 NVIDIA 535.104.05"),
            Some((ApiVersion::new(3, 3), false))
        );
        assert_eq!(
            parse_gl_version("4.6 (Compatibility Profile) Mesa 23.2.1"),
            Some((ApiVersion::new(4, 6), false))
        );
    }

    #[test]
    fn parses_gles_version_strings() {
        assert_eq!(
            parse_gl_version("OpenGL ES 3.2 v1.r32p1-01eac0"),
            Some((ApiVersion::new(3, 2), true))
        );
        assert_eq!(
            parse_gl_version("OpenGL ES-CM 1.1"),
            Some((ApiVersion::new(1, 1), true))
        );
    }

    #[test]
    fn rejects_garbage_version_strings() {
        assert_eq!(parse_gl_version("not a version"), None);
        assert_eq!(parse_gl_version(""), None);
    }
}
