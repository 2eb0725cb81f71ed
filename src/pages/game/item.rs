use crate::{
    constants::game,
    pages::game::object::{Aabb, Object, Scroll},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bomb {
    x: i32,
    y: i32,
    explosion: Option<u32>,
}

impl Bomb {
    pub fn new(x: i32, y: i32) -> Self {
        Bomb { x, y, explosion: None }
    }

    pub fn center_y(&self) -> i32 {
        self.y
    }

    pub fn is_exploding(&self) -> bool {
        self.explosion.is_some()
    }

    pub fn explode(&mut self) {
        if self.explosion.is_none() {
            self.explosion = Some(0);
        }
    }
}

impl Object for Bomb {
    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.x, self.y, game::BOMB_SIZE, game::BOMB_SIZE)
    }
}

impl Scroll for Bomb {
    /// An exploding bomb stays put and plays its animation instead.
    fn advance(&mut self, dx: i32) {
        match self.explosion.as_mut() {
            Some(frames) => *frames += 1,
            None => self.x -= dx,
        }
    }

    fn is_expired(&self) -> bool {
        match self.explosion {
            Some(frames) => frames >= game::EXPLOSION_FRAMES,
            None => self.bounds().right() <= 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Star {
    x: i32,
    y: i32,
}

impl Star {
    pub fn new(x: i32, y: i32) -> Self {
        Star { x, y }
    }

    pub fn center_y(&self) -> i32 {
        self.y
    }
}

impl Object for Star {
    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.x, self.y, game::STAR_SIZE, game::STAR_SIZE)
    }
}

impl Scroll for Star {
    fn advance(&mut self, dx: i32) {
        self.x -= dx;
    }
}
