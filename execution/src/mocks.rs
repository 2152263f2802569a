//! Scripted dice and recording observers for tests.

use crate::dice::RollSource;
use crate::observer::Observer;
use craps_types::Event;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Dice that produce a fixed sequence of faces.
///
/// Panics when the script runs out, so a test that rolls more than it planned fails loudly.
pub struct LoadedDice {
    faces: VecDeque<u8>,
}

impl LoadedDice {
    /// Script one pair of faces per roll.
    pub fn pairs(pairs: &[(u8, u8)]) -> Self {
        Self {
            faces: pairs.iter().flat_map(|&(a, b)| [a, b]).collect(),
        }
    }
}

impl RollSource for LoadedDice {
    fn roll_die(&mut self) -> u8 {
        let face = self.faces.pop_front().expect("loaded dice exhausted");
        assert!((1..=6).contains(&face), "invalid scripted face {face}");
        face
    }
}

/// Observer that keeps every event it receives. Clones share the same log.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(Event::name).collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Observer for Recorder {
    fn notify(&mut self, event: &Event) {
        self.events.borrow_mut().push(*event);
    }
}
