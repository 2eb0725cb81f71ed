use crate::{
    constants::game,
    pages::game::object::{Aabb, Object, Scroll},
};

/// A top and a bottom pipe sharing one x and one gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipePair {
    x: i32,
    gap_center: i32,
    entered: bool,
    passed: bool,
}

impl PipePair {
    pub fn new(x: i32, gap_center: i32) -> Self {
        PipePair { x, gap_center, entered: false, passed: false }
    }

    pub fn gap_center(&self) -> i32 {
        self.gap_center
    }

    pub fn gap_top(&self) -> i32 {
        self.gap_center - game::PIPE_GAP / 2
    }

    pub fn gap_bottom(&self) -> i32 {
        self.gap_center + game::PIPE_GAP / 2
    }

    pub fn top(&self) -> Aabb {
        Aabb::new(self.x, self.gap_top() - game::PIPE_HEIGHT, game::PIPE_WIDTH, game::PIPE_HEIGHT)
    }

    pub fn bottom(&self) -> Aabb {
        Aabb::new(self.x, self.gap_bottom(), game::PIPE_WIDTH, game::PIPE_HEIGHT)
    }

    pub fn is_passed(&self) -> bool {
        self.passed
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    pub fn enter(&mut self) {
        self.entered = true;
    }

    pub fn pass(&mut self) {
        self.passed = true;
    }
}

impl Object for PipePair {
    /// Horizontal span of the pair; the vertical extent covers both pipes.
    fn bounds(&self) -> Aabb {
        let top = self.top();
        Aabb::new(self.x, top.top(), game::PIPE_WIDTH, self.bottom().bottom() - top.top())
    }

    fn collides_with<T: Object>(&self, other: &T) -> bool {
        let other = other.bounds();
        self.top().intersects(&other) || self.bottom().intersects(&other)
    }
}

impl Scroll for PipePair {
    fn advance(&mut self, dx: i32) {
        self.x -= dx;
    }
}
