use std::time::Instant;

use rand::Rng;
use strum::Display;

use crate::{
    constants::game,
    pages::game::{
        bird::Bird,
        collision::{self, Hazard},
        item::{Bomb, Star},
        object::{advance_all, Aabb, Object},
        painter::{Painter, Sprite},
        pipe::PipePair,
        pointer::Pointer,
        rules::{Rules, Variant},
        spawner::{spawn_item, spawn_pipe_pair, Spawned, Spawner},
    },
};

/// Sound effects raised by a tick. Playing them is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Sound {
    Flap,
    Score,
    Hit,
    Explosion,
    Star,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    Idle,
    Flying,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Backdrop {
    Day,
    Night,
}

/// Every entity in play.
#[derive(Debug, Default, Clone)]
pub struct World {
    pub bird: Bird,
    pub pipes: Vec<PipePair>,
    pub bombs: Vec<Bomb>,
    pub stars: Vec<Star>,
}

impl World {
    fn clear(&mut self) {
        self.bird.respawn();
        self.pipes.clear();
        self.bombs.clear();
        self.stars.clear();
    }
}

/// One game session: the world plus score and run state.
#[derive(Debug, Clone)]
pub struct Session {
    rules: Rules,
    world: World,
    spawner: Spawner,
    score: u32,
    flying: bool,
    game_over: bool,
    ground_scroll: i32,
    flap_latched: bool,
}

impl Session {
    pub fn new(variant: Variant) -> Self {
        Session {
            rules: Rules::from(variant),
            world: World::default(),
            spawner: Spawner::default(),
            score: 0,
            flying: false,
            game_over: false,
            ground_scroll: 0,
            flap_latched: false,
        }
    }

    #[cfg(test)]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[cfg(test)]
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn ground_scroll(&self) -> i32 {
        self.ground_scroll
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.flying {
            Phase::Flying
        } else {
            Phase::Idle
        }
    }

    pub fn backdrop(&self) -> Backdrop {
        if self.score >= game::NIGHT_SCORE {
            Backdrop::Night
        } else {
            Backdrop::Day
        }
    }

    pub fn reset(&mut self) {
        self.world.clear();
        self.spawner.reset();
        self.score = 0;
        self.flying = false;
        self.game_over = false;
    }

    /// Advances the game by one frame: input, motion, spawning, then collisions.
    pub fn tick<R: Rng>(&mut self, input: Pointer, now: Instant, rng: &mut R) -> Vec<Sound> {
        let mut sounds = Vec::new();

        if input.pressed {
            if self.game_over {
                log::debug!("Restarting after game over");
                self.reset();
                self.flap_latched = input.held;
                return sounds;
            }
            if !self.flying {
                log::info!("Take off with {} rules", self.rules.variant);
                self.flying = true;
            }
        }

        if self.flying {
            self.world.bird.fall();
        }
        if self.should_flap(input) {
            self.world.bird.flap(self.rules.flap_velocity);
            if self.rules.edge_triggered_flap || input.pressed {
                sounds.push(Sound::Flap);
            }
        }

        let dx = if self.rules.scrolling(self.flying, self.game_over) { game::SCROLL_SPEED } else { 0 };
        advance_all(&mut self.world.pipes, dx);
        advance_all(&mut self.world.bombs, dx);
        advance_all(&mut self.world.stars, dx);
        if dx != 0 {
            self.ground_scroll -= dx;
            if self.ground_scroll.abs() > game::GROUND_SCROLL_WRAP {
                self.ground_scroll = 0;
            }
        }

        if self.flying && !self.game_over {
            if self.spawner.poll(now) {
                self.spawn(rng);
            }

            let resolution = collision::resolve(&mut self.world, &self.rules);
            if resolution.points > 0 {
                self.score += resolution.points;
                log::debug!("Score {} (+{})", self.score, resolution.points);
            }
            sounds.extend(resolution.sounds);
            if let Some(hazard) = resolution.hazard {
                self.crash(hazard);
            }
        } else if self.flying && collision::hits_ground(&self.world.bird) {
            // Knocked out mid-air; the bird drops until it lands.
            self.flying = false;
        }

        sounds
    }

    fn should_flap(&mut self, input: Pointer) -> bool {
        let latched = std::mem::replace(&mut self.flap_latched, input.held);
        if self.game_over {
            return false;
        }
        if self.rules.edge_triggered_flap {
            input.pressed || (input.held && !latched)
        } else {
            input.pressed || input.held
        }
    }

    fn spawn<R: Rng>(&mut self, rng: &mut R) {
        let pair = spawn_pipe_pair(rng);
        match spawn_item(rng, &pair, &self.world.bombs, &self.world.stars, self.rules.avoid_spawn_conflicts) {
            Spawned::Bomb(bomb) => self.world.bombs.push(bomb),
            Spawned::Star(star) => self.world.stars.push(star),
            Spawned::Blocked => log::debug!("Skipped item for gap at {}: too close to another item", pair.gap_center()),
        }
        self.world.pipes.push(pair);
    }

    fn crash(&mut self, hazard: Hazard) {
        log::info!("Crashed into {hazard} with score {}", self.score);
        if self.rules.freeze_on_crash {
            self.game_over = true;
            if hazard == Hazard::Ground {
                self.flying = false;
            }
        } else {
            self.reset();
        }
    }

    /// Draws the world back to front, score last.
    pub fn paint<P: Painter>(&self, painter: &mut P) {
        painter.draw_sprite(Sprite::Clouds, Aabb::new(0, 0, game::WORLD_WIDTH, game::CLOUDS_HEIGHT));
        // The bird leans into its vertical motion.
        let bird = match self.world.bird.velocity() {
            v if v < 0.0 => Sprite::BirdRising,
            v if v > 0.0 => Sprite::BirdFalling,
            _ => Sprite::Bird,
        };
        painter.draw_sprite(bird, self.world.bird.bounds());
        for pair in &self.world.pipes {
            painter.draw_sprite(Sprite::PipeTop, pair.top());
            painter.draw_sprite(Sprite::PipeBottom, pair.bottom());
        }
        for bomb in &self.world.bombs {
            let sprite = if bomb.is_exploding() { Sprite::Explosion } else { Sprite::Bomb };
            painter.draw_sprite(sprite, bomb.bounds());
        }
        for star in &self.world.stars {
            painter.draw_sprite(Sprite::Star, star.bounds());
        }
        painter.draw_sprite(
            Sprite::Ground,
            Aabb::new(
                self.ground_scroll,
                game::GROUND_Y,
                game::WORLD_WIDTH + game::GROUND_SCROLL_WRAP + 1,
                game::GROUND_HEIGHT,
            ),
        );

        let color = match self.backdrop() {
            Backdrop::Day => game::DAY_TEXT_COLOR,
            Backdrop::Night => game::NIGHT_TEXT_COLOR,
        };
        painter.render_text(&self.score.to_string(), game::SCORE_TEXT_X, game::SCORE_TEXT_Y, color);
    }
}
