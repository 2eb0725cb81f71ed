/// Axis-aligned box in world pixels. `right()` and `bottom()` are exclusive
/// edges, matching how the box covers pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Aabb {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Aabb {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Aabb { x, y, width, height }
    }

    pub fn from_center(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Aabb { x: cx - width / 2, y: cy - height / 2, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[cfg(test)]
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    // Touching edges count as an intersection.
    pub fn intersects(&self, other: &Aabb) -> bool {
        interval_sec(self.left(), self.right(), other.left(), other.right())
            && interval_sec(self.top(), self.bottom(), other.top(), other.bottom())
    }
}

pub trait Object {
    fn bounds(&self) -> Aabb;

    fn collides_with<T: Object>(&self, other: &T) -> bool {
        self.bounds().intersects(&other.bounds())
    }
}

/// Anything carried leftwards by the scrolling world.
pub trait Scroll: Object {
    fn advance(&mut self, dx: i32);

    fn is_expired(&self) -> bool {
        self.bounds().right() <= 0
    }
}

/// Moves every entity by `dx` and drops the expired ones, keeping insertion order.
pub fn advance_all<T: Scroll>(entities: &mut Vec<T>, dx: i32) {
    for entity in entities.iter_mut() {
        entity.advance(dx);
    }
    entities.retain(|entity| !entity.is_expired());
}

fn interval_sec(l1: i32, r1: i32, l2: i32, r2: i32) -> bool {
    !(r1 < l2 || l1 > r2)
}
