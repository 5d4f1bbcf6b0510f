//! Held-control tracking
//!
//! Key events arrive from the host's event dispatch while the loop reads
//! input from its timer callback. The held-set is packed into one atomic byte,
//! so every read sees a whole set and no lock is needed.

use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Logical control symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Shoot,
}

impl Control {
    pub const ALL: [Control; 5] = [
        Control::Up,
        Control::Down,
        Control::Left,
        Control::Right,
        Control::Shoot,
    ];

    fn bit(self) -> u8 {
        match self {
            Control::Up => 1 << 0,
            Control::Down => 1 << 1,
            Control::Left => 1 << 2,
            Control::Right => 1 << 3,
            Control::Shoot => 1 << 4,
        }
    }
}

/// Immutable copy of the held-set taken at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeldSet(u8);

impl HeldSet {
    pub const EMPTY: HeldSet = HeldSet(0);

    pub fn contains(&self, control: Control) -> bool {
        self.0 & control.bit() != 0
    }

    pub fn with(self, control: Control) -> Self {
        HeldSet(self.0 | control.bit())
    }

    pub fn without(self, control: Control) -> Self {
        HeldSet(self.0 & !control.bit())
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Control> {
        let held = *self;
        Control::ALL.into_iter().filter(move |c| held.contains(*c))
    }
}

impl FromIterator<Control> for HeldSet {
    fn from_iter<I: IntoIterator<Item = Control>>(iter: I) -> Self {
        iter.into_iter().fold(HeldSet::EMPTY, HeldSet::with)
    }
}

/// Shared held-set written by key events, read once per tick
#[derive(Debug, Default)]
pub struct InputSampler {
    held: AtomicU8,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, control: Control) {
        self.held.fetch_or(control.bit(), Ordering::AcqRel);
    }

    pub fn release(&self, control: Control) {
        self.held.fetch_and(!control.bit(), Ordering::AcqRel);
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.snapshot().contains(control)
    }

    pub fn snapshot(&self) -> HeldSet {
        HeldSet(self.held.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_press_release() {
        let input = InputSampler::new();
        assert!(!input.is_held(Control::Up));

        input.press(Control::Up);
        input.press(Control::Shoot);
        assert!(input.is_held(Control::Up));
        assert!(input.is_held(Control::Shoot));
        assert!(!input.is_held(Control::Down));

        input.release(Control::Up);
        assert!(!input.is_held(Control::Up));
        assert!(input.is_held(Control::Shoot));
    }

    #[test]
    fn test_repeated_press_is_idempotent() {
        let input = InputSampler::new();
        input.press(Control::Left);
        input.press(Control::Left);
        input.release(Control::Left);
        assert!(input.snapshot().is_empty());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let input = InputSampler::new();
        input.press(Control::Right);
        let held = input.snapshot();
        input.release(Control::Right);
        assert!(held.contains(Control::Right));
        assert!(!input.is_held(Control::Right));
    }

    #[test]
    fn test_held_set_collect() {
        let held: HeldSet = [Control::Up, Control::Left].into_iter().collect();
        let listed: Vec<_> = held.iter().collect();
        assert_eq!(listed, vec![Control::Up, Control::Left]);
        assert_eq!(held.without(Control::Up), HeldSet::EMPTY.with(Control::Left));
    }

    #[test]
    fn test_concurrent_writers_never_tear() {
        let input = Arc::new(InputSampler::new());
        // Shoot stays held the whole time; a writer thread toggles the rest
        input.press(Control::Shoot);

        let writer = {
            let input = Arc::clone(&input);
            thread::spawn(move || {
                for i in 0..10_000 {
                    let control = Control::ALL[i % 4];
                    input.press(control);
                    input.release(control);
                }
            })
        };

        for _ in 0..10_000 {
            let held = input.snapshot();
            assert!(held.contains(Control::Shoot));
            // At most one direction is ever down at a time
            let directions = held.iter().filter(|c| *c != Control::Shoot).count();
            assert!(directions <= 1);
        }
        writer.join().unwrap();
        assert_eq!(input.snapshot(), HeldSet::EMPTY.with(Control::Shoot));
    }
}
