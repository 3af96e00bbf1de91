//! Headless model of the visitor-facing pages.
//!
//! Everything here is pure state plus explicit time: a driver (or a test)
//! feeds pointer events, clicks and ticks in, and renders what comes out.
//! Nothing in this module touches the network. The page scripts run the same
//! algorithms on the constants and text pools exported through `settings`.

pub mod card;
pub mod copy;
pub mod countdown;
pub mod dodge;
pub mod flow;
pub mod selfie;
pub mod settings;
pub mod spring;
pub mod toast;

pub use dodge::{DodgeEngine, Point, Viewport};
pub use flow::{Command, Experience, FlowError, StageKind, Submission};
