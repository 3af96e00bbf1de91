//! Single-question card: the hopping NO button and the vote state.

use rand::SeedableRng;
use rand::rngs::StdRng;

use valentine::experience::card::{
    BUTTON_HEIGHT, BUTTON_WIDTH, CardDodge, CardStatus, CardVote, PROXIMITY, yes_percent,
};
use valentine::experience::dodge::{Point, Viewport};
use valentine::models::answer::{AnswerChoice, Tally};

const FRAME: Viewport = Viewport { width: 420.0, height: 260.0 };

fn inside_frame(card: &CardDodge) -> bool {
    let c = card.center();
    c.x >= BUTTON_WIDTH / 2.0
        && c.x <= FRAME.width - BUTTON_WIDTH / 2.0
        && c.y >= BUTTON_HEIGHT / 2.0
        && c.y <= FRAME.height - BUTTON_HEIGHT / 2.0
}

#[test]
fn test_button_hops_within_frame() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut card = CardDodge::new(FRAME, &mut rng);
    assert!(inside_frame(&card));

    for _ in 0..1_000 {
        let center = card.center();
        assert!(card.pointer_moved(Point::new(center.x + 10.0, center.y - 5.0), &mut rng));
        assert!(inside_frame(&card));
        assert!(card.hover(&mut rng));
        assert!(inside_frame(&card));
    }
}

#[test]
fn test_far_pointer_leaves_button_alone() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut card = CardDodge::new(FRAME, &mut rng);
    let before = card.offset();
    let center = card.center();

    assert!(!card.pointer_moved(Point::new(center.x + PROXIMITY, center.y), &mut rng));
    assert!(!card.pointer_moved(Point::new(center.x, center.y - PROXIMITY - 1.0), &mut rng));
    assert_eq!(card.offset(), before);
}

#[test]
fn test_vote_freezes_button_and_counts_once() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut card = CardDodge::new(FRAME, &mut rng);
    let mut vote = CardVote::new();
    assert_eq!(vote.status(), CardStatus::Idle);

    assert!(vote.vote(AnswerChoice::No, &mut card));
    assert_eq!(vote.status(), CardStatus::Saving);
    assert!(card.is_frozen());
    assert!(!vote.vote(AnswerChoice::Yes, &mut card));
    assert_eq!(vote.response(), Some(AnswerChoice::No));

    let frozen_at = card.offset();
    assert!(!card.hover(&mut rng));
    assert!(!card.pointer_moved(card.center(), &mut rng));
    assert_eq!(card.offset(), frozen_at);

    vote.saved(Ok(Tally { total: 3, yes_count: 2, no_count: 1 }));
    assert_eq!(vote.status(), CardStatus::Saved);
    assert_eq!(vote.yes_percent(), 67);
}

#[test]
fn test_failed_vote_reports_error() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut card = CardDodge::new(FRAME, &mut rng);
    let mut vote = CardVote::new();
    vote.load_stats(Tally { total: 4, yes_count: 1, no_count: 3 });
    assert_eq!(vote.yes_percent(), 25);

    vote.vote(AnswerChoice::Yes, &mut card);
    vote.saved(Err("Internal server error".to_string()));
    assert_eq!(vote.status(), CardStatus::Error);
    assert_eq!(vote.yes_percent(), 25);
}

#[test]
fn test_yes_percent_rounds() {
    assert_eq!(yes_percent(&Tally::default()), 0);
    assert_eq!(yes_percent(&Tally { total: 8, yes_count: 1, no_count: 7 }), 13);
    assert_eq!(yes_percent(&Tally { total: 3, yes_count: 1, no_count: 2 }), 33);
    assert_eq!(yes_percent(&Tally { total: 5, yes_count: 5, no_count: 0 }), 100);
}
