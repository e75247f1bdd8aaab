use macroquad::prelude::*;
use ::rand::Rng;
use shipyard::{Component, IntoIter, View};

use crate::{GameRng, WINDOW_WIDTH};

pub const OBJECT_TYPE_COUNT: usize = 3;
/// The most objects of a single type that can be falling at once.
pub const MAX_PER_TYPE: usize = 5;
/// Side of an object whose sprite failed to load.
pub const FALLBACK_OBJECT_SIZE: u32 = 40;

pub static OBJECT_TYPES: [ObjectTypeConfig; OBJECT_TYPE_COUNT] = [
    ObjectTypeConfig {
        speed_min: 75.0,
        speed_max: 112.0,
    },
    ObjectTypeConfig {
        speed_min: 85.0,
        speed_max: 157.0,
    },
    ObjectTypeConfig {
        speed_min: 115.0,
        speed_max: 172.0,
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTypeConfig {
    pub speed_min: f32,
    pub speed_max: f32,
}

impl ObjectTypeConfig {
    pub const FALLBACK: Self = Self {
        speed_min: 100.0,
        speed_max: 200.0,
    };

    pub fn of(type_index: usize) -> Self {
        OBJECT_TYPES
            .get(type_index)
            .copied()
            .unwrap_or(Self::FALLBACK)
    }

    /// Draws a speed uniformly from the type's range, with both
    /// bounds multiplied by `scale`.
    pub fn roll_speed(&self, rng: &mut GameRng, scale: f32) -> f32 {
        rng.random_range((self.speed_min * scale)..=(self.speed_max * scale))
    }
}

/// A square falling straight down. `pos` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct FallingObject {
    pub pos: Vec2,
    /// Pixels per second, downwards.
    pub speed: f32,
    pub size: u32,
    /// The size the object has when no powerup is shrinking it.
    pub original_size: u32,
    pub type_index: usize,
}

impl FallingObject {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.pos.x,
            y: self.pos.y,
            w: self.size as f32,
            h: self.size as f32,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        half_open_contains(self.rect(), point)
    }
}

/// Like `Rect::contains`, but the right and bottom edges are outside.
pub fn half_open_contains(rect: Rect, point: Vec2) -> bool {
    point.x >= rect.x
        && point.x < rect.x + rect.w
        && point.y >= rect.y
        && point.y < rect.y + rect.h
}

/// The side of an object of a type, given the width of its sprite.
pub fn base_size(sprite_width: Option<f32>) -> u32 {
    sprite_width
        .map(|w| w as u32)
        .unwrap_or(FALLBACK_OBJECT_SIZE)
}

/// 60% of `size`, rounded down.
pub fn shrunk_size(size: u32) -> u32 {
    size * 3 / 5
}

/// A random x so that an object of side `size` stays inside the window.
pub fn roll_x(rng: &mut GameRng, size: u32) -> f32 {
    rng.random_range(0..=WINDOW_WIDTH.saturating_sub(size)) as f32
}

pub fn count_by_type(objects: &View<FallingObject>) -> [usize; OBJECT_TYPE_COUNT] {
    let mut counts = [0; OBJECT_TYPE_COUNT];
    for obj in objects.iter() {
        if let Some(count) = counts.get_mut(obj.type_index) {
            *count += 1;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shrunk_size_rounds_down() {
        assert_eq!(shrunk_size(40), 24);
        assert_eq!(shrunk_size(64), 38);
        assert_eq!(shrunk_size(1), 0);
        assert_eq!(shrunk_size(0), 0);
    }

    #[test]
    fn test_base_size_fallback() {
        assert_eq!(base_size(None), FALLBACK_OBJECT_SIZE);
        assert_eq!(base_size(Some(64.0)), 64);
    }

    #[test]
    fn test_unknown_type_uses_fallback_range() {
        assert_eq!(ObjectTypeConfig::of(2), OBJECT_TYPES[2]);
        assert_eq!(ObjectTypeConfig::of(7), ObjectTypeConfig::FALLBACK);
    }

    #[test]
    fn test_hit_box_is_half_open() {
        let obj = FallingObject {
            pos: vec2(100.0, 100.0),
            speed: 80.0,
            size: 40,
            original_size: 40,
            type_index: 0,
        };

        assert!(obj.contains(vec2(100.0, 100.0)));
        assert!(obj.contains(vec2(139.9, 139.9)));
        assert!(!obj.contains(vec2(140.0, 120.0)));
        assert!(!obj.contains(vec2(99.9, 120.0)));
        assert!(!obj.contains(vec2(120.0, 140.0)));
        assert!(!obj.contains(vec2(140.0, 140.0)));
    }

    #[test]
    fn test_zero_sized_box_contains_nothing() {
        let rect = Rect::new(10.0, 10.0, 0.0, 0.0);

        assert!(!half_open_contains(rect, vec2(10.0, 10.0)));
    }
}
