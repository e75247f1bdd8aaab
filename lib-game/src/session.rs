use macroquad::prelude::*;
use ::rand::{Rng, SeedableRng};
use shipyard::{EntityId, Get, IntoIter, View, ViewMut, World};

use crate::{
    Difficulty, FallingObject, GameRng, OBJECT_TYPE_COUNT, ObjectTypeConfig,
    POWERUP_SPEED_FACTOR, Powerup, SpawnParams, Spawner, WINDOW_HEIGHT, count_by_type, roll_object,
    roll_x,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Title,
    Playing,
    GameOver,
}

/// Things that happened inside the session which the presentation
/// side may want to react to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
    Caught { at: Vec2, type_index: usize },
    PowerupActivated,
    Lost,
}

/// The whole game. Falling objects live in the ECS world as entities,
/// the rest of the state is plain fields.
pub struct GameSession {
    state: GameState,
    world: World,
    rng: GameRng,
    base_sizes: [u32; OBJECT_TYPE_COUNT],
    score: u32,
    difficulty: Difficulty,
    powerup: Powerup,
    spawner: Spawner,
    events: Vec<SessionEvent>,
}

impl GameSession {
    /// `base_sizes` is the natural side of each object type, see [crate::base_size].
    pub fn new(seed: u64, base_sizes: [u32; OBJECT_TYPE_COUNT]) -> Self {
        Self {
            state: GameState::Title,
            world: World::new(),
            rng: GameRng::seed_from_u64(seed),
            base_sizes,
            score: 0,
            difficulty: Difficulty::new(),
            powerup: Powerup::new(),
            spawner: Spawner::new(),
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn powerup(&self) -> &Powerup {
        &self.powerup
    }

    pub fn object_count(&self) -> usize {
        self.world
            .run(|objects: View<FallingObject>| objects.iter().count())
    }

    pub fn objects(&self) -> Vec<(EntityId, FallingObject)> {
        self.world.run(|objects: View<FallingObject>| {
            objects
                .iter()
                .with_id()
                .map(|(id, obj)| (id, *obj))
                .collect()
        })
    }

    pub fn object(&self, id: EntityId) -> Option<FallingObject> {
        self.world
            .run(|objects: View<FallingObject>| (&objects).get(id).ok().copied())
    }

    pub fn for_each_object(&self, mut f: impl FnMut(&FallingObject)) {
        self.world.run(|objects: View<FallingObject>| {
            for obj in objects.iter() {
                f(obj);
            }
        });
    }

    /// Puts an object into play as is, bypassing the spawner.
    pub fn insert_object(&mut self, obj: FallingObject) -> EntityId {
        self.world.add_entity(obj)
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = SessionEvent> + '_ {
        self.events.drain(..)
    }

    /// Advances the simulation by `dt` seconds. Does nothing
    /// outside of [GameState::Playing].
    pub fn update(&mut self, dt: f32) {
        if self.state != GameState::Playing {
            return;
        }

        self.powerup.tick(dt, &self.world);

        if self.spawner.tick(dt) {
            self.spawn();
        }

        let bottom = WINDOW_HEIGHT as f32;
        let fell_out = self.world.run(|mut objects: ViewMut<FallingObject>| {
            let mut fell_out = false;
            for obj in (&mut objects).iter() {
                obj.pos.y += obj.speed * dt;
                fell_out |= obj.pos.y > bottom;
            }

            fell_out
        });

        if fell_out {
            info!("An object hit the ground. Score: {}", self.score);
            self.state = GameState::GameOver;
            self.events.push(SessionEvent::Lost);
        }
    }

    pub fn handle_click(&mut self, point: Vec2) {
        match self.state {
            GameState::Title => self.start(),
            GameState::Playing => {
                if self.powerup.hit(point) {
                    self.powerup.activate(&self.world);
                    self.events.push(SessionEvent::PowerupActivated);
                    return;
                }

                self.catch(point);
            }
            GameState::GameOver => {
                info!("Back to title");
                self.state = GameState::Title;
            }
        }
    }

    fn start(&mut self) {
        info!("Starting the game");

        self.world.clear();
        self.score = 0;
        self.difficulty = Difficulty::new();
        self.powerup.reset();
        self.spawner.reset();
        self.events.clear();
        self.state = GameState::Playing;
    }

    fn spawn_params(&self) -> SpawnParams {
        let shrunk = self.powerup.is_active();

        SpawnParams {
            base_sizes: self.base_sizes,
            speed_multiplier: self.difficulty.speed_multiplier(),
            shrunk,
            speed_factor: if shrunk { POWERUP_SPEED_FACTOR } else { 1.0 },
        }
    }

    fn spawn(&mut self) -> Option<EntityId> {
        let params = self.spawn_params();
        let counts = self.world.run(|objects: View<FallingObject>| count_by_type(&objects));
        let obj = roll_object(&mut self.rng, &counts, &params)?;

        debug!(
            "Spawned type {} at x={} speed={:.1}",
            obj.type_index, obj.pos.x, obj.speed
        );
        Some(self.world.add_entity(obj))
    }

    /// Sends the first object under `point` back above the screen.
    /// Only one object gets caught per click.
    fn catch(&mut self, point: Vec2) -> bool {
        let difficulty = &mut self.difficulty;
        let rng = &mut self.rng;
        let speed_factor = if self.powerup.is_active() {
            POWERUP_SPEED_FACTOR
        } else {
            1.0
        };

        let caught = self.world.run(|mut objects: ViewMut<FallingObject>| {
            let obj = (&mut objects).iter().find(|obj| obj.contains(point))?;
            let multiplier = difficulty.register_click();
            relaunch(obj, rng, multiplier * speed_factor);

            Some(obj.type_index)
        });
        let Some(type_index) = caught else {
            return false;
        };

        self.score += 1;
        debug!(
            "Caught type {type_index}, score {}, difficulty {}%",
            self.score,
            self.difficulty.percent()
        );
        self.events.push(SessionEvent::Caught {
            at: point,
            type_index,
        });

        true
    }
}

/// Moves a caught object to a random spot above the screen and
/// possibly speeds it up. The speed never goes down.
fn relaunch(obj: &mut FallingObject, rng: &mut GameRng, speed_scale: f32) {
    let size = obj.size;
    let lift = match size {
        0 => 0,
        size => rng.random_range(0..2 * size),
    };

    obj.pos = vec2(roll_x(rng, size), -(size as f32) - lift as f32);

    let candidate = ObjectTypeConfig::of(obj.type_index).roll_speed(rng, speed_scale);
    obj.speed = obj.speed.max(candidate);
}
