use std::time::{Duration, Instant};

use rand::Rng;

use crate::{
    constants::game,
    pages::game::{
        item::{Bomb, Star},
        object::Object,
        pipe::PipePair,
    },
};

/// What ended up inside a freshly spawned gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spawned {
    Bomb(Bomb),
    Star(Star),
    /// The drawn position sat too close to an item of the other kind.
    Blocked,
}

/// Wall-clock pacing for pipe pairs.
#[derive(Debug, Clone)]
pub struct Spawner {
    interval: Duration,
    last_spawn: Option<Instant>,
}

impl Default for Spawner {
    fn default() -> Self {
        Spawner::new(game::PIPE_INTERVAL)
    }
}

impl Spawner {
    pub fn new(interval: Duration) -> Self {
        Spawner { interval, last_spawn: None }
    }

    pub fn reset(&mut self) {
        self.last_spawn = None;
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_spawn {
            Some(last) => now.saturating_duration_since(last) > self.interval,
            None => true,
        }
    }

    /// Returns true and restarts the interval when a spawn is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.last_spawn = Some(now);
            true
        } else {
            false
        }
    }
}

pub fn spawn_pipe_pair<R: Rng>(rng: &mut R) -> PipePair {
    let offset = rng.gen_range(-game::GAP_CENTER_JITTER..=game::GAP_CENTER_JITTER);
    PipePair::new(game::PIPE_SPAWN_X, game::WORLD_HEIGHT / 2 + offset)
}

/// Flips a coin between a bomb and a star and drops it somewhere inside the
/// gap of `pair`, keeping clear of the pipes by the item margin. The item is
/// centred on the pair's leading edge.
pub fn spawn_item<R: Rng>(rng: &mut R, pair: &PipePair, bombs: &[Bomb], stars: &[Star], avoid_conflicts: bool) -> Spawned {
    let place_star = rng.gen_bool(0.5);
    let y = rng.gen_range(pair.gap_top() + game::ITEM_GAP_MARGIN..=pair.gap_bottom() - game::ITEM_GAP_MARGIN);
    let x = pair.bounds().left();
    let near = |other: i32| (y - other).abs() < game::ITEM_CONFLICT_DISTANCE;

    if place_star {
        if avoid_conflicts && bombs.iter().any(|bomb| near(bomb.center_y())) {
            return Spawned::Blocked;
        }
        Spawned::Star(Star::new(x, y))
    } else {
        if avoid_conflicts && stars.iter().any(|star| near(star.center_y())) {
            return Spawned::Blocked;
        }
        Spawned::Bomb(Bomb::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::pages::game::object::Object;

    fn item_y(spawned: &Spawned) -> Option<i32> {
        match spawned {
            Spawned::Bomb(bomb) => Some(bomb.center_y()),
            Spawned::Star(star) => Some(star.center_y()),
            Spawned::Blocked => None,
        }
    }

    #[test]
    fn test_first_spawn_is_immediate() {
        let mut spawner = Spawner::default();
        let now = Instant::now();
        assert!(spawner.poll(now));
        assert!(!spawner.poll(now));
    }

    #[test]
    fn test_interval_is_wall_clock() {
        let mut spawner = Spawner::default();
        let start = Instant::now();
        assert!(spawner.poll(start));
        assert!(!spawner.poll(start + Duration::from_millis(1500)));
        assert!(spawner.poll(start + Duration::from_millis(1501)));
        assert!(!spawner.poll(start + Duration::from_millis(2000)));
        spawner.reset();
        assert!(spawner.poll(start + Duration::from_millis(2000)));
    }

    #[test]
    fn test_gap_center_within_jitter() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let pair = spawn_pipe_pair(&mut rng);
            assert!((275..=475).contains(&pair.gap_center()), "gap center {}", pair.gap_center());
            assert_eq!(pair.bounds().left(), game::PIPE_SPAWN_X);
        }
    }

    #[test]
    fn test_items_stay_inside_the_gap() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let (mut bombs, mut stars) = (0, 0);
        for _ in 0..1000 {
            let pair = spawn_pipe_pair(&mut rng);
            let spawned = spawn_item(&mut rng, &pair, &[], &[], true);
            let y = item_y(&spawned).expect("nothing to conflict with");
            assert!(y >= pair.gap_top() + 40 && y <= pair.gap_bottom() - 40, "item y {y}");
            match spawned {
                Spawned::Bomb(_) => bombs += 1,
                Spawned::Star(_) => stars += 1,
                Spawned::Blocked => unreachable!(),
            }
        }
        assert!(bombs > 400 && stars > 400, "bombs {bombs} stars {stars}");
    }

    #[test]
    fn test_items_centered_on_leading_edge() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pair = PipePair::new(600, 375);
        let (mut bombs, mut stars) = (0, 0);
        for _ in 0..50 {
            match spawn_item(&mut rng, &pair, &[], &[], false) {
                Spawned::Bomb(bomb) => {
                    assert_eq!(bomb.bounds().center().0, game::PIPE_SPAWN_X);
                    bombs += 1;
                },
                Spawned::Star(star) => {
                    assert_eq!(star.bounds().center().0, game::PIPE_SPAWN_X);
                    stars += 1;
                },
                Spawned::Blocked => unreachable!(),
            }
        }
        assert!(bombs > 0 && stars > 0);
    }

    #[test]
    fn test_conflicts_block_only_when_avoided() {
        let pair = PipePair::new(600, 375);
        // Every candidate y lies in [290, 460]; these cover it within 40px.
        let bombs: Vec<Bomb> = (290..=460).step_by(40).map(|y| Bomb::new(300, y)).collect();
        let stars: Vec<Star> = (290..=460).step_by(40).map(|y| Star::new(300, y)).collect();

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..200 {
            assert_eq!(spawn_item(&mut rng, &pair, &bombs, &stars, true), Spawned::Blocked);
        }
        for _ in 0..200 {
            assert_ne!(spawn_item(&mut rng, &pair, &bombs, &stars, false), Spawned::Blocked);
        }
    }

    #[test]
    fn test_same_kind_never_conflicts() {
        let pair = PipePair::new(600, 375);
        let bombs: Vec<Bomb> = (290..=460).step_by(40).map(|y| Bomb::new(300, y)).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..200 {
            match spawn_item(&mut rng, &pair, &bombs, &[], true) {
                Spawned::Bomb(_) => {},
                other => assert_eq!(other, Spawned::Blocked),
            }
        }
    }
}
