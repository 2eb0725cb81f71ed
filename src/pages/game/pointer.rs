use std::time::{Duration, Instant};

use crate::constants::game;

/// Pointer state as seen by one session tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    /// A press happened since the previous tick.
    pub pressed: bool,
    /// The pointer is down right now.
    pub held: bool,
}

#[cfg(test)]
impl Pointer {
    pub fn idle() -> Self {
        Pointer::default()
    }

    pub fn click() -> Self {
        Pointer { pressed: true, held: false }
    }

    pub fn hold() -> Self {
        Pointer { pressed: false, held: true }
    }

    pub fn press_and_hold() -> Self {
        Pointer { pressed: true, held: true }
    }
}

/// Folds mouse buttons and flap keys into a single pointer.
///
/// Mouse buttons report their release. Keys only do so on terminals with
/// keyboard enhancement; until a key release has been seen, a fresh key press
/// counts as held long enough for the first autorepeat to arrive, and every
/// autorepeat after that extends the hold by the shorter repeat gap.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    mouse_held: bool,
    key_held: bool,
    key_held_until: Option<Instant>,
    releases_seen: bool,
    pressed: bool,
    repeat_delay: Duration,
    repeat_gap: Duration,
}

impl Default for PointerTracker {
    fn default() -> Self {
        PointerTracker::new(game::KEY_REPEAT_DELAY, game::KEY_REPEAT_GAP)
    }
}

impl PointerTracker {
    pub fn new(repeat_delay: Duration, repeat_gap: Duration) -> Self {
        PointerTracker {
            mouse_held: false,
            key_held: false,
            key_held_until: None,
            releases_seen: false,
            pressed: false,
            repeat_delay,
            repeat_gap,
        }
    }

    pub fn is_held(&self, now: Instant) -> bool {
        self.mouse_held || self.key_held || self.key_held_until.is_some_and(|until| now < until)
    }

    pub fn mouse_down(&mut self, now: Instant) {
        if !self.is_held(now) {
            self.pressed = true;
        }
        self.mouse_held = true;
    }

    pub fn mouse_up(&mut self) {
        self.mouse_held = false;
    }

    pub fn key_down(&mut self, now: Instant) {
        let repeat = self.is_held(now);
        if !repeat {
            self.pressed = true;
        }
        if self.releases_seen {
            self.key_held = true;
        } else {
            let window = if repeat { self.repeat_gap } else { self.repeat_delay };
            let until = now + window;
            self.key_held_until = Some(self.key_held_until.map_or(until, |held| held.max(until)));
        }
    }

    pub fn key_up(&mut self) {
        if !self.releases_seen {
            log::debug!("Key releases reported, holding keys until release");
            self.releases_seen = true;
        }
        self.key_held = false;
        self.key_held_until = None;
    }

    /// Forgets buttons and keys, keeping what was learned about the terminal.
    pub fn reset(&mut self) {
        let releases_seen = self.releases_seen;
        *self = PointerTracker::new(self.repeat_delay, self.repeat_gap);
        self.releases_seen = releases_seen;
    }

    /// Takes the pending press and reports the current hold state.
    pub fn sample(&mut self, now: Instant) -> Pointer {
        Pointer { pressed: std::mem::take(&mut self.pressed), held: self.is_held(now) }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::pages::game::{
        rules::Variant,
        session::{Session, Sound},
    };

    #[test]
    fn test_mouse_click_is_pressed_once() {
        let now = Instant::now();
        let mut tracker = PointerTracker::default();
        tracker.mouse_down(now);
        assert_eq!(tracker.sample(now), Pointer::press_and_hold());
        assert_eq!(tracker.sample(now), Pointer::hold());
        tracker.mouse_up();
        assert_eq!(tracker.sample(now), Pointer::idle());
    }

    #[test]
    fn test_quick_click_between_ticks() {
        let now = Instant::now();
        let mut tracker = PointerTracker::default();
        tracker.mouse_down(now);
        tracker.mouse_up();
        assert_eq!(tracker.sample(now), Pointer::click());
    }

    #[test]
    fn test_key_autorepeat_does_not_press_again() {
        let start = Instant::now();
        let ms = Duration::from_millis;
        let mut tracker = PointerTracker::new(ms(300), ms(100));
        tracker.key_down(start);
        assert_eq!(tracker.sample(start), Pointer::press_and_hold());
        assert_eq!(tracker.sample(start + ms(250)), Pointer::hold());

        tracker.key_down(start + ms(280));
        assert_eq!(tracker.sample(start + ms(280)), Pointer::hold());
        assert_eq!(tracker.sample(start + ms(350)), Pointer::hold());
        assert_eq!(tracker.sample(start + ms(400)), Pointer::idle());
    }

    #[test]
    fn test_repeats_shorten_the_hold() {
        let start = Instant::now();
        let ms = Duration::from_millis;
        let mut tracker = PointerTracker::default();
        tracker.key_down(start);
        let mut last = start;
        for step in 0..10 {
            last = start + ms(500 + 33 * step);
            tracker.key_down(last);
        }
        tracker.sample(last);

        let released = last + game::KEY_REPEAT_GAP + ms(1);
        assert_eq!(tracker.sample(released), Pointer::idle());
        tracker.key_down(released);
        assert_eq!(tracker.sample(released), Pointer::press_and_hold());
    }

    #[test]
    fn test_slow_autorepeat_flaps_once() {
        let start = Instant::now();
        let ms = Duration::from_millis;
        // Press at 0, autorepeat after 500ms then every 33ms.
        let mut repeats = (0..).map(|step| ms(500 + 33 * step));
        let mut next_repeat = repeats.next();

        let mut tracker = PointerTracker::default();
        let mut session = Session::new(Variant::Classic);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        tracker.key_down(start);

        let mut flaps = 0;
        for tick in 0..60 {
            let now = start + ms(16 * tick);
            while let Some(at) = next_repeat.filter(|at| start + *at <= now) {
                tracker.key_down(start + at);
                next_repeat = repeats.next();
            }
            let input = tracker.sample(now);
            assert!(input.held, "released at {}ms", 16 * tick);
            flaps += session.tick(input, now, &mut rng).iter().filter(|sound| **sound == Sound::Flap).count();
        }
        assert_eq!(flaps, 1);
    }

    #[test]
    fn test_key_release_ends_hold() {
        let now = Instant::now();
        let mut tracker = PointerTracker::default();
        tracker.key_down(now);
        tracker.key_up();
        assert_eq!(tracker.sample(now), Pointer::click());
        tracker.key_down(now);
        assert_eq!(tracker.sample(now), Pointer::press_and_hold());
    }

    #[test]
    fn test_released_keys_hold_until_release() {
        let start = Instant::now();
        let mut tracker = PointerTracker::new(Duration::from_millis(100), Duration::from_millis(50));
        tracker.key_down(start);
        tracker.key_up();
        tracker.sample(start);

        tracker.key_down(start);
        let late = start + Duration::from_secs(2);
        assert_eq!(tracker.sample(late), Pointer::press_and_hold());
        tracker.reset();
        tracker.key_down(start);
        assert_eq!(tracker.sample(late), Pointer::press_and_hold());
        tracker.key_up();
        assert_eq!(tracker.sample(late), Pointer::idle());
    }
}
