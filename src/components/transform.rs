/// Placement applied to a texture when it is drawn.
///
/// `x`/`y` is where the pivot lands on the target, `origin_x`/`origin_y` the
/// pivot in texture pixels (top-left by default), `rotation` is in degrees and
/// the scale multiplies the drawn width and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    pub x: f32,
    pub y: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            origin_x: 0.0,
            origin_y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl Transform2D {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, ox: f32, oy: f32) -> Self {
        self.origin_x = ox;
        self.origin_y = oy;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_scale(mut self, sx: f32, sy: f32) -> Self {
        self.scale_x = sx;
        self.scale_y = sy;
        self
    }

    /// Destination size for a `width` x `height` source.
    pub fn scaled_size(&self, width: u32, height: u32) -> (f32, f32) {
        (width as f32 * self.scale_x, height as f32 * self.scale_y)
    }
}
