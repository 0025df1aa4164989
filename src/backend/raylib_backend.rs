//! raylib backend.
//!
//! Images are decoded on the CPU, uploaded once as a `Texture2D`, and frames
//! are source rectangles into that shared texture, so slicing a sprite sheet
//! never copies pixels. Drawing wraps `draw_texture_pro` in a shader mode.
//!
//! # Note
//! Everything here holds OpenGL objects, so textures built on this backend
//! must stay on the main thread (they live in non-send resources).

use std::cell::RefCell;
use std::ffi::c_void;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{debug, warn};
use raylib::ffi;
use raylib::prelude::*;

use crate::backend::{DrawTarget, ImageHandle, TextureBackend};
use crate::components::frame::Frame;
use crate::components::transform::Transform2D;
use crate::components::uniforms::{BoundUniforms, UniformValue, Uniforms};
use crate::error::{Result, TextureError};

/// Source rectangle into a GPU texture shared with its sprite sheet.
pub struct RaylibImage {
    texture: Rc<Texture2D>,
    pub region: Frame,
}

impl ImageHandle for RaylibImage {
    fn width(&self) -> u32 {
        self.region.width()
    }

    fn height(&self) -> u32 {
        self.region.height()
    }
}

pub struct RaylibShader {
    shader: Shader,
    bound: RefCell<BoundUniforms>,
}

/// Owns the raylib window handle and thread token.
pub struct RaylibBackend {
    pub rl: RaylibHandle,
    pub thread: RaylibThread,
}

impl RaylibBackend {
    pub fn new(rl: RaylibHandle, thread: RaylibThread) -> Self {
        Self { rl, thread }
    }
}

impl TextureBackend for RaylibBackend {
    type Image = RaylibImage;
    type Shader = RaylibShader;

    fn decode_image(&mut self, path: &Path) -> Result<RaylibImage> {
        let decode_err = |reason: String| TextureError::Decode {
            path: PathBuf::from(path),
            reason,
        };
        let path_str = path
            .to_str()
            .ok_or_else(|| decode_err("path is not valid UTF-8".to_string()))?;
        let image = Image::load_image(path_str).map_err(|e| decode_err(e.to_string()))?;
        let region = Frame::full(image.width as u32, image.height as u32);
        let texture = self
            .rl
            .load_texture_from_image(&self.thread, &image)
            .map_err(|e| decode_err(format!("texture upload failed: {}", e)))?;
        debug!("Uploaded {:?} ({}x{})", path, region.width(), region.height());
        Ok(RaylibImage {
            texture: Rc::new(texture),
            region,
        })
    }

    fn sub_image(&mut self, sheet: &RaylibImage, frame: Frame) -> Result<RaylibImage> {
        Ok(RaylibImage {
            texture: Rc::clone(&sheet.texture),
            region: frame.offset_by(&sheet.region).intersect(&sheet.region),
        })
    }

    fn compile_shader(&mut self, source: &str) -> Result<RaylibShader> {
        let shader = self
            .rl
            .load_shader_from_memory(&self.thread, None, Some(source));
        // raylib reports a failed compile by handing back program id 0.
        if shader.id == 0 {
            return Err(TextureError::ShaderCompile(
                "raylib rejected the fragment shader (see raylib log)".to_string(),
            ));
        }
        Ok(RaylibShader {
            shader,
            bound: RefCell::new(BoundUniforms::default()),
        })
    }
}

fn set_uniform(shader: &Shader, name: &str, value: &UniformValue) {
    let loc = shader.get_shader_location(name);
    if loc < 0 {
        return;
    }
    unsafe {
        match value {
            UniformValue::Float(v) => ffi::SetShaderValue(
                **shader,
                loc,
                v as *const f32 as *const c_void,
                ffi::ShaderUniformDataType::SHADER_UNIFORM_FLOAT as i32,
            ),
            UniformValue::Int(v) => ffi::SetShaderValue(
                **shader,
                loc,
                v as *const i32 as *const c_void,
                ffi::ShaderUniformDataType::SHADER_UNIFORM_INT as i32,
            ),
            UniformValue::Vec2 { x, y } => {
                let data = [*x, *y];
                ffi::SetShaderValue(
                    **shader,
                    loc,
                    data.as_ptr() as *const c_void,
                    ffi::ShaderUniformDataType::SHADER_UNIFORM_VEC2 as i32,
                )
            }
            UniformValue::Vec4 { x, y, z, w } => {
                let data = [*x, *y, *z, *w];
                ffi::SetShaderValue(
                    **shader,
                    loc,
                    data.as_ptr() as *const c_void,
                    ffi::ShaderUniformDataType::SHADER_UNIFORM_VEC4 as i32,
                )
            }
        }
    }
}

/// Upload every uniform the shader declares; unknown names are skipped.
/// Names bound by an earlier draw but missing from `uniforms` are zeroed.
fn apply_uniforms(shader: &RaylibShader, uniforms: &Uniforms) {
    let stale = shader.bound.borrow_mut().rebind(uniforms);
    for (name, zero) in &stale {
        set_uniform(&shader.shader, name, zero);
    }
    for (name, value) in uniforms.iter() {
        set_uniform(&shader.shader, name, value);
    }
}

/// Draw target over any raylib drawing scope (screen, texture mode, 2D camera).
pub struct RaylibDrawTarget<'a, D: RaylibDraw> {
    d: &'a mut D,
}

impl<'a, D: RaylibDraw> RaylibDrawTarget<'a, D> {
    pub fn new(d: &'a mut D) -> Self {
        Self { d }
    }
}

impl<D: RaylibDraw> DrawTarget<RaylibBackend> for RaylibDrawTarget<'_, D> {
    fn draw_shaded_rect(
        &mut self,
        width: u32,
        height: u32,
        shader: &RaylibShader,
        images: &[&RaylibImage],
        uniforms: &Uniforms,
        transform: &Transform2D,
    ) {
        let Some(primary) = images.first() else {
            warn!("draw_shaded_rect called without an image");
            return;
        };

        unsafe {
            ffi::BeginShaderMode(*shader.shader);
        }
        apply_uniforms(shader, uniforms);
        // texture0 is bound by the draw itself; extra images go to texture1..
        for (slot, image) in images.iter().enumerate().skip(1) {
            let loc = shader.shader.get_shader_location(&format!("texture{}", slot));
            if loc >= 0 {
                unsafe {
                    ffi::SetShaderValueTexture(*shader.shader, loc, **image.texture);
                }
            }
        }

        let src = Rectangle {
            x: primary.region.x0 as f32,
            y: primary.region.y0 as f32,
            width: width as f32,
            height: height as f32,
        };
        let (dest_w, dest_h) = transform.scaled_size(width, height);
        let dest = Rectangle {
            x: transform.x,
            y: transform.y,
            width: dest_w,
            height: dest_h,
        };
        let origin = Vector2 {
            x: transform.origin_x * transform.scale_x,
            y: transform.origin_y * transform.scale_y,
        };
        self.d.draw_texture_pro(
            &*primary.texture,
            src,
            dest,
            origin,
            transform.rotation,
            Color::WHITE,
        );

        unsafe {
            ffi::EndShaderMode();
        }
    }
}
