use crate::{
    constants::game,
    pages::game::object::{Aabb, Object},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    x: i32,
    y: i32,
    velocity: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Bird::new(game::BIRD_SPAWN_X, game::BIRD_SPAWN_Y)
    }
}

impl Bird {
    pub fn new(x: i32, y: i32) -> Self {
        Bird { x, y, velocity: 0.0 }
    }

    pub fn respawn(&mut self) {
        *self = Bird::default();
    }

    #[cfg(test)]
    pub fn get_pos(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[cfg(test)]
    pub fn set_pos(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// One tick of gravity: accelerate up to terminal velocity, then move by
    /// the whole-pixel part of the velocity.
    pub fn fall(&mut self) {
        self.velocity = (self.velocity + game::GRAVITY).min(game::TERMINAL_VELOCITY);
        self.y += self.velocity.trunc() as i32;
    }

    pub fn flap(&mut self, velocity: f32) {
        self.velocity = velocity;
    }
}

impl Object for Bird {
    fn bounds(&self) -> Aabb {
        let size = game::BIRD_HALF_EXTENT * 2;
        Aabb::from_center(self.x, self.y, size, size)
    }
}
