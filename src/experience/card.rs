//! The single-question card: a YES button and a NO button that hops to a
//! random spot in its frame whenever the pointer gets close.

use rand::Rng;

use super::dodge::{Point, Viewport};
use crate::models::answer::{AnswerChoice, Tally};

pub const BUTTON_WIDTH: f64 = 122.0;
pub const BUTTON_HEIGHT: f64 = 52.0;
pub const PROXIMITY: f64 = 95.0;

/// NO button position as an offset from the frame's center.
#[derive(Debug, Clone)]
pub struct CardDodge {
    frame: Viewport,
    offset: Point,
    frozen: bool,
}

impl CardDodge {
    pub fn new(frame: Viewport, rng: &mut impl Rng) -> Self {
        let mut card = Self { frame, offset: Point::default(), frozen: false };
        card.offset = card.random_offset(rng);
        card
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Button center in frame coordinates (origin at the frame's top-left).
    pub fn center(&self) -> Point {
        Point::new(self.frame.width / 2.0 + self.offset.x, self.frame.height / 2.0 + self.offset.y)
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Stop moving once a vote has been cast.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    fn random_offset(&self, rng: &mut impl Rng) -> Point {
        let max_x = (self.frame.width - BUTTON_WIDTH).max(0.0);
        let max_y = (self.frame.height - BUTTON_HEIGHT).max(0.0);
        Point::new(
            rng.random::<f64>() * max_x - self.frame.width / 2.0 + BUTTON_WIDTH / 2.0,
            rng.random::<f64>() * max_y - self.frame.height / 2.0 + BUTTON_HEIGHT / 2.0,
        )
    }

    /// Pointer entered the button itself.
    pub fn hover(&mut self, rng: &mut impl Rng) -> bool {
        if self.frozen {
            return false;
        }
        self.offset = self.random_offset(rng);
        true
    }

    /// Pointer moved inside the frame; `pointer` is in frame coordinates.
    /// Returns whether the button moved.
    pub fn pointer_moved(&mut self, pointer: Point, rng: &mut impl Rng) -> bool {
        if self.frozen || pointer.distance_to(self.center()) >= PROXIMITY {
            return false;
        }
        self.offset = self.random_offset(rng);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStatus {
    Idle,
    Saving,
    Saved,
    Error,
}

/// Vote state of the card. One vote per page view.
#[derive(Debug, Clone)]
pub struct CardVote {
    response: Option<AnswerChoice>,
    status: CardStatus,
    stats: Option<Tally>,
}

impl Default for CardVote {
    fn default() -> Self {
        Self { response: None, status: CardStatus::Idle, stats: None }
    }
}

impl CardVote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the click. Returns false if a vote was already cast.
    pub fn vote(&mut self, answer: AnswerChoice, dodge: &mut CardDodge) -> bool {
        if self.response.is_some() {
            return false;
        }
        self.response = Some(answer);
        self.status = CardStatus::Saving;
        dodge.freeze();
        true
    }

    pub fn saved(&mut self, result: Result<Tally, String>) {
        match result {
            Ok(stats) => {
                self.status = CardStatus::Saved;
                self.stats = Some(stats);
            }
            Err(e) => {
                log::debug!("card vote failed: {e}");
                self.status = CardStatus::Error;
            }
        }
    }

    pub fn load_stats(&mut self, stats: Tally) {
        self.stats = Some(stats);
    }

    pub fn response(&self) -> Option<AnswerChoice> {
        self.response
    }

    pub fn status(&self) -> CardStatus {
        self.status
    }

    pub fn yes_percent(&self) -> u8 {
        self.stats.map_or(0, |s| yes_percent(&s))
    }
}

pub fn yes_percent(stats: &Tally) -> u8 {
    if stats.total == 0 {
        return 0;
    }
    ((stats.yes_count as f64 / stats.total as f64) * 100.0).round() as u8
}
