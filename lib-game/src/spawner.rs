use macroquad::prelude::*;
use ::rand::Rng;

use crate::{
    FallingObject, GameRng, MAX_PER_TYPE, OBJECT_TYPE_COUNT, ObjectTypeConfig, roll_x,
    shrunk_size,
};

/// Seconds between two spawn attempts.
pub const SPAWN_INTERVAL: f32 = 1.0;

/// Everything a spawn roll depends on besides the rng.
#[derive(Debug, Clone, Copy)]
pub struct SpawnParams {
    pub base_sizes: [u32; OBJECT_TYPE_COUNT],
    pub speed_multiplier: f32,
    pub shrunk: bool,
    pub speed_factor: f32,
}

/// The spawn accumulator.
#[derive(Debug, Default)]
pub struct Spawner {
    accumulated: f32,
}

impl Spawner {
    pub fn new() -> Self {
        Self { accumulated: 0.0 }
    }

    /// Advances the accumulator. Returns `true` when a spawn attempt
    /// is due, in which case the accumulator starts over from zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.accumulated += dt;
        if self.accumulated < SPAWN_INTERVAL {
            return false;
        }

        self.accumulated = 0.0;
        true
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}

/// Rolls a new object of a type picked uniformly among the types that
/// are still under [MAX_PER_TYPE]. Gives [None] when every type is capped.
pub fn roll_object(
    rng: &mut GameRng,
    counts: &[usize; OBJECT_TYPE_COUNT],
    params: &SpawnParams,
) -> Option<FallingObject> {
    let eligible = (0..OBJECT_TYPE_COUNT)
        .filter(|ty| counts[*ty] < MAX_PER_TYPE)
        .collect::<Vec<_>>();
    if eligible.is_empty() {
        return None;
    }

    let type_index = eligible[rng.random_range(0..eligible.len())];
    let original_size = params.base_sizes[type_index];
    let size = if params.shrunk {
        shrunk_size(original_size)
    } else {
        original_size
    };
    let speed = ObjectTypeConfig::of(type_index)
        .roll_speed(rng, params.speed_multiplier * params.speed_factor);

    Some(FallingObject {
        pos: vec2(roll_x(rng, size), -(size as f32)),
        speed,
        size,
        original_size,
        type_index,
    })
}

#[cfg(test)]
mod tests {
    use ::rand::SeedableRng;

    use super::*;
    use crate::{FALLBACK_OBJECT_SIZE, WINDOW_WIDTH};

    fn params() -> SpawnParams {
        SpawnParams {
            base_sizes: [FALLBACK_OBJECT_SIZE; OBJECT_TYPE_COUNT],
            speed_multiplier: 1.0,
            shrunk: false,
            speed_factor: 1.0,
        }
    }

    #[test]
    fn test_tick_resets_after_attempt() {
        let mut spawner = Spawner::new();

        assert!(!spawner.tick(0.6));
        assert!(spawner.tick(0.6));
        // The overshoot is dropped, not carried.
        assert!(!spawner.tick(0.75));
        assert!(spawner.tick(0.25));
    }

    #[test]
    fn test_nothing_when_all_capped() {
        let mut rng = GameRng::seed_from_u64(7);
        let counts = [MAX_PER_TYPE; OBJECT_TYPE_COUNT];

        assert_eq!(roll_object(&mut rng, &counts, &params()), None);
    }

    #[test]
    fn test_only_eligible_types() {
        let mut rng = GameRng::seed_from_u64(7);
        let counts = [MAX_PER_TYPE, 0, MAX_PER_TYPE];

        for _ in 0..100 {
            let obj = roll_object(&mut rng, &counts, &params()).unwrap();
            assert_eq!(obj.type_index, 1);
        }
    }

    #[test]
    fn test_spawn_placement_and_speed() {
        let mut rng = GameRng::seed_from_u64(11);
        let counts = [0; OBJECT_TYPE_COUNT];
        let params = SpawnParams {
            base_sizes: [40, 64, 32],
            speed_multiplier: 1.5,
            ..params()
        };

        for _ in 0..500 {
            let obj = roll_object(&mut rng, &counts, &params).unwrap();
            let config = ObjectTypeConfig::of(obj.type_index);

            assert_eq!(obj.size, params.base_sizes[obj.type_index]);
            assert_eq!(obj.original_size, obj.size);
            assert_eq!(obj.pos.y, -(obj.size as f32));
            assert!(obj.pos.x >= 0.0);
            assert!(obj.pos.x + obj.size as f32 <= WINDOW_WIDTH as f32);
            assert_eq!(obj.pos.x.fract(), 0.0);
            assert!(obj.speed >= config.speed_min * 1.5);
            assert!(obj.speed <= config.speed_max * 1.5);
        }
    }

    #[test]
    fn test_spawn_while_shrunk() {
        let mut rng = GameRng::seed_from_u64(3);
        let counts = [0; OBJECT_TYPE_COUNT];
        let params = SpawnParams {
            shrunk: true,
            speed_factor: 0.5,
            ..params()
        };

        for _ in 0..200 {
            let obj = roll_object(&mut rng, &counts, &params).unwrap();
            let config = ObjectTypeConfig::of(obj.type_index);

            assert_eq!(obj.size, 24);
            assert_eq!(obj.original_size, FALLBACK_OBJECT_SIZE);
            assert_eq!(obj.pos.y, -24.0);
            assert!(obj.speed >= config.speed_min * 0.5);
            assert!(obj.speed <= config.speed_max * 0.5);
        }
    }

    #[test]
    fn test_oversized_sprite_stays_at_left_edge() {
        let mut rng = GameRng::seed_from_u64(5);
        let counts = [0; OBJECT_TYPE_COUNT];
        let params = SpawnParams {
            base_sizes: [WINDOW_WIDTH + 100; OBJECT_TYPE_COUNT],
            ..params()
        };

        let obj = roll_object(&mut rng, &counts, &params).unwrap();
        assert_eq!(obj.pos.x, 0.0);
    }
}
