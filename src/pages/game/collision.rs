use strum::Display;

use crate::{
    constants::game,
    pages::game::{
        object::Object,
        rules::Rules,
        session::{Sound, World},
    },
};

/// What ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Hazard {
    Pipe,
    Ceiling,
    Ground,
    Bomb,
}

/// Outcome of one resolver pass, applied by the session afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub points: u32,
    pub hazard: Option<Hazard>,
    pub sounds: Vec<Sound>,
}

impl Resolution {
    fn crash(&mut self, hazard: Hazard, sound: Sound) {
        if self.hazard.is_none() {
            self.hazard = Some(hazard);
        }
        self.sounds.push(sound);
    }
}

pub fn hits_ground<T: Object>(bird: &T) -> bool {
    bird.bounds().bottom() >= game::GROUND_Y
}

/// Runs every check in priority order: gap pass, pipes and ceiling, ground,
/// bombs, stars. Collected stars are removed from the world here; bombs only
/// start exploding when the rules animate them.
pub fn resolve(world: &mut World, rules: &Rules) -> Resolution {
    let mut resolution = Resolution::default();
    let bird = world.bird.bounds();

    if let Some(pair) = world.pipes.iter_mut().find(|pair| !pair.is_passed()) {
        let span = pair.bounds();
        if rules.latched_gap_pass {
            if !pair.is_entered() && bird.left() > span.left() && bird.right() < span.right() {
                pair.enter();
            }
            if pair.is_entered() && bird.left() > span.right() {
                pair.pass();
            }
        } else if bird.left() > span.right() {
            pair.pass();
        }
        if pair.is_passed() {
            resolution.points += game::PASS_POINTS;
            resolution.sounds.push(Sound::Score);
        }
    }

    if world.pipes.iter().any(|pair| pair.collides_with(&world.bird)) {
        resolution.crash(Hazard::Pipe, Sound::Hit);
    } else if rules.ceiling_is_fatal && bird.top() <= 0 {
        resolution.crash(Hazard::Ceiling, Sound::Hit);
    }

    if hits_ground(&world.bird) {
        resolution.crash(Hazard::Ground, Sound::Hit);
    }

    if let Some(bomb) = world.bombs.iter_mut().find(|bomb| !bomb.is_exploding() && bomb.bounds().intersects(&bird)) {
        if rules.animated_bombs {
            bomb.explode();
        }
        resolution.crash(Hazard::Bomb, Sound::Explosion);
    }

    let before = world.stars.len();
    world.stars.retain(|star| !star.bounds().intersects(&bird));
    for _ in world.stars.len()..before {
        resolution.points += game::STAR_POINTS;
        resolution.sounds.push(Sound::Star);
    }

    resolution
}
