use hashbrown::HashMap;
use macroquad::prelude::*;
use shipyard::{EntityId, Get, IntoIter, ViewMut, World};

use crate::{FallingObject, half_open_contains, shrunk_size};

/// Seconds of play before the powerup shows up.
pub const POWERUP_IDLE_TIME: f32 = 10.0;
/// Seconds the powerup stays in effect.
pub const POWERUP_DURATION: f32 = 5.0;
/// Speed factor applied to objects while the powerup is in effect.
pub const POWERUP_SPEED_FACTOR: f32 = 0.5;
/// Where the powerup can be clicked.
pub const POWERUP_RECT: Rect = Rect {
    x: 50.0,
    y: 50.0,
    w: 40.0,
    h: 40.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupPhase {
    /// Counting down to the next appearance.
    Idle,
    /// Shown on screen, waiting for a click.
    Available,
    /// Objects are slowed down and shrunk.
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Saved {
    size: u32,
    speed: f32,
}

/// The slow-and-shrink powerup.
///
/// The objects that were falling when the powerup got activated are
/// remembered by their entity id, so they get their exact size and
/// speed back once it expires, no matter what got spawned meanwhile.
#[derive(Debug)]
pub struct Powerup {
    phase: PowerupPhase,
    idle_timer: f32,
    active_timer: f32,
    saved: HashMap<EntityId, Saved>,
}

impl Powerup {
    pub fn new() -> Self {
        Self {
            phase: PowerupPhase::Idle,
            idle_timer: 0.0,
            active_timer: 0.0,
            saved: HashMap::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn phase(&self) -> PowerupPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == PowerupPhase::Active
    }

    pub fn idle_timer(&self) -> f32 {
        self.idle_timer
    }

    pub fn active_timer(&self) -> f32 {
        self.active_timer
    }

    /// Whole seconds left until the effect wears off, rounded up.
    pub fn seconds_left(&self) -> u32 {
        (POWERUP_DURATION - self.active_timer).max(0.0).ceil() as u32
    }

    /// Whether `point` clicks the powerup. Only true while it is available.
    pub fn hit(&self, point: Vec2) -> bool {
        self.phase == PowerupPhase::Available && half_open_contains(POWERUP_RECT, point)
    }

    /// Advances the idle or the active timer, whichever is running.
    pub fn tick(&mut self, dt: f32, world: &World) {
        match self.phase {
            PowerupPhase::Idle => {
                self.idle_timer += dt;
                if self.idle_timer >= POWERUP_IDLE_TIME {
                    info!("Powerup available");
                    self.phase = PowerupPhase::Available;
                    self.idle_timer = 0.0;
                }
            }
            PowerupPhase::Active => {
                self.active_timer += dt;
                if self.active_timer >= POWERUP_DURATION {
                    self.deactivate(world);
                }
            }
            PowerupPhase::Available => (),
        }
    }

    /// Puts the effect on every object that is falling right now.
    pub fn activate(&mut self, world: &World) {
        let saved = &mut self.saved;
        let count = world.run(|mut objects: ViewMut<FallingObject>| {
            for (id, obj) in (&mut objects).iter().with_id() {
                saved.insert(
                    id,
                    Saved {
                        size: obj.size,
                        speed: obj.speed,
                    },
                );
                obj.size = shrunk_size(obj.original_size);
                obj.speed *= POWERUP_SPEED_FACTOR;
            }

            saved.len()
        });

        info!("Powerup activated, {count} objects affected");
        self.phase = PowerupPhase::Active;
        self.active_timer = 0.0;
    }

    fn deactivate(&mut self, world: &World) {
        let saved = &mut self.saved;
        world.run(|mut objects: ViewMut<FallingObject>| {
            for (id, before) in saved.drain() {
                let Ok(mut obj) = (&mut objects).get(id) else {
                    continue;
                };

                obj.size = before.size;
                obj.speed = before.speed;
            }
        });

        info!("Powerup expired");
        self.phase = PowerupPhase::Idle;
        self.active_timer = 0.0;
        self.idle_timer = 0.0;
    }
}

impl Default for Powerup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn falling(x: f32, size: u32, speed: f32) -> FallingObject {
        FallingObject {
            pos: vec2(x, 10.0),
            speed,
            size,
            original_size: size,
            type_index: 0,
        }
    }

    #[test]
    fn test_becomes_available_after_idle_time() {
        let world = World::new();
        let mut powerup = Powerup::new();

        powerup.tick(POWERUP_IDLE_TIME - 0.5, &world);
        assert_eq!(powerup.phase(), PowerupPhase::Idle);
        assert!(!powerup.hit(vec2(60.0, 60.0)));

        powerup.tick(0.5, &world);
        assert_eq!(powerup.phase(), PowerupPhase::Available);
        assert_eq!(powerup.idle_timer(), 0.0);
        assert!(powerup.hit(vec2(60.0, 60.0)));
        assert!(!powerup.hit(vec2(95.0, 60.0)));
        assert!(powerup.hit(vec2(50.0, 50.0)));
        assert!(!powerup.hit(vec2(90.0, 90.0)));
        assert!(!powerup.hit(vec2(90.0, 60.0)));

        // Nothing counts while it waits for a click.
        powerup.tick(100.0, &world);
        assert_eq!(powerup.phase(), PowerupPhase::Available);
    }

    #[test]
    fn test_active_duration_within_one_frame() {
        let world = World::new();
        let dt = 1.0 / 60.0;
        let mut powerup = Powerup::new();
        powerup.activate(&world);

        let mut elapsed = 0.0;
        while powerup.phase() == PowerupPhase::Active {
            // Never both active and available.
            assert!(!powerup.hit(POWERUP_RECT.point()));
            powerup.tick(dt, &world);
            elapsed += dt;
        }

        assert_eq!(powerup.phase(), PowerupPhase::Idle);
        assert!((elapsed - POWERUP_DURATION).abs() <= dt + 1e-4);
        assert_eq!(powerup.idle_timer(), 0.0);
    }

    #[test]
    fn test_seconds_left() {
        let world = World::new();
        let mut powerup = Powerup::new();
        powerup.activate(&world);
        assert_eq!(powerup.seconds_left(), 5);

        powerup.tick(0.25, &world);
        assert_eq!(powerup.seconds_left(), 5);

        powerup.tick(1.0, &world);
        assert_eq!(powerup.seconds_left(), 4);
    }

    #[test]
    fn test_restore_is_exact() {
        let mut world = World::new();
        let samples = [(0.0, 40, 80.3), (100.0, 64, 171.9), (300.0, 17, 99.99)];
        let ids = samples.map(|(x, size, speed)| world.add_entity(falling(x, size, speed)));

        let mut powerup = Powerup::new();
        powerup.activate(&world);

        world.run(|objects: shipyard::View<FallingObject>| {
            for (id, (_, size, speed)) in ids.iter().zip(samples) {
                let obj = (&objects).get(*id).unwrap();
                assert_eq!(obj.size, shrunk_size(size));
                assert_eq!(obj.speed, speed * 0.5);
            }
        });

        // Odd frame lengths on purpose
        for dt in [0.3, 1.7, 0.01, 2.0, 0.9999, 0.5] {
            powerup.tick(dt, &world);
        }
        assert_eq!(powerup.phase(), PowerupPhase::Idle);

        world.run(|objects: shipyard::View<FallingObject>| {
            for (id, (_, size, speed)) in ids.iter().zip(samples) {
                let obj = (&objects).get(*id).unwrap();
                assert_eq!(obj.size, size);
                assert_eq!(obj.speed, speed);
            }
        });
    }

    #[test]
    fn test_restore_follows_identity() {
        let mut world = World::new();
        let first = world.add_entity(falling(0.0, 40, 100.0));
        let second = world.add_entity(falling(50.0, 50, 120.0));
        let third = world.add_entity(falling(100.0, 60, 140.0));

        let mut powerup = Powerup::new();
        powerup.activate(&world);

        // Reshuffle the storage while the effect is on.
        world.delete_entity(first);
        let newcomer = world.add_entity(FallingObject {
            size: shrunk_size(40),
            ..falling(200.0, 40, 33.0)
        });

        powerup.tick(POWERUP_DURATION, &world);
        assert_eq!(powerup.phase(), PowerupPhase::Idle);

        world.run(|objects: shipyard::View<FallingObject>| {
            let second = (&objects).get(second).unwrap();
            assert_eq!((second.size, second.speed), (50, 120.0));

            let third = (&objects).get(third).unwrap();
            assert_eq!((third.size, third.speed), (60, 140.0));

            // Spawned during the effect, so it was never saved.
            let newcomer = (&objects).get(newcomer).unwrap();
            assert_eq!((newcomer.size, newcomer.speed), (24, 33.0));
        });
    }
}
