//! Per-texture shader uniforms.
//!
//! A texture keeps its uniforms behind an `Arc` and swaps the whole map on
//! every `set_uniforms` call; nothing is merged. Draw targets receive a
//! borrowed [`Uniforms`] and upload each entry before the draw.

use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A value that can be bound to a shader uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2 { x: f32, y: f32 },
    Vec4 { x: f32, y: f32, z: f32, w: f32 },
}

impl UniformValue {
    /// Zero of the same shape.
    pub fn zeroed(&self) -> Self {
        match self {
            UniformValue::Float(_) => UniformValue::Float(0.0),
            UniformValue::Int(_) => UniformValue::Int(0),
            UniformValue::Vec2 { .. } => UniformValue::Vec2 { x: 0.0, y: 0.0 },
            UniformValue::Vec4 { .. } => UniformValue::Vec4 {
                x: 0.0,
                y: 0.0,
                z: 0.0,
                w: 0.0,
            },
        }
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        UniformValue::Int(v)
    }
}

impl From<[f32; 2]> for UniformValue {
    fn from(v: [f32; 2]) -> Self {
        UniformValue::Vec2 { x: v[0], y: v[1] }
    }
}

impl From<[f32; 4]> for UniformValue {
    fn from(v: [f32; 4]) -> Self {
        UniformValue::Vec4 {
            x: v[0],
            y: v[1],
            z: v[2],
            w: v[3],
        }
    }
}

/// Immutable uniform map shared by handle.
///
/// # Example
/// ```
/// use aberredtextures::components::uniforms::{UniformValue, Uniforms};
///
/// let uniforms = Uniforms::new()
///     .with("uIntensity", 0.8_f32)
///     .with("uTint", [1.0_f32, 0.5, 0.5, 1.0]);
/// assert_eq!(uniforms.get("uIntensity"), Some(&UniformValue::Float(0.8)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Uniforms(Arc<FxHashMap<Arc<str>, UniformValue>>);

impl Uniforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Only usable while the map is being assembled;
    /// a map already handed to a texture is never mutated in place.
    pub fn with(mut self, name: &str, value: impl Into<UniformValue>) -> Self {
        Arc::make_mut(&mut self.0).insert(Arc::from(name), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// True when both handles point at the same map.
    pub fn ptr_eq(&self, other: &Uniforms) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Uniforms last uploaded to one GPU shader program.
///
/// Program uniforms keep their value between draws, so a name dropped from
/// the texture's map has to be reset explicitly or the shader keeps seeing
/// the old value.
#[derive(Debug, Default)]
pub struct BoundUniforms(FxHashMap<Arc<str>, UniformValue>);

impl BoundUniforms {
    /// Record `next` as the bound set and return a zero value for every
    /// previously bound name that `next` no longer supplies.
    pub fn rebind(&mut self, next: &Uniforms) -> Vec<(Arc<str>, UniformValue)> {
        let stale = self
            .0
            .iter()
            .filter(|(name, _)| !next.contains(name))
            .map(|(name, value)| (Arc::clone(name), value.zeroed()))
            .collect();
        self.0 = next
            .0
            .iter()
            .map(|(name, value)| (Arc::clone(name), *value))
            .collect();
        stale
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }
}

impl<K: AsRef<str>, V: Into<UniformValue>> FromIterator<(K, V)> for Uniforms {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let map: FxHashMap<Arc<str>, UniformValue> = iter
            .into_iter()
            .map(|(k, v)| (Arc::from(k.as_ref()), v.into()))
            .collect();
        Self(Arc::new(map))
    }
}
