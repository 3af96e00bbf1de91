//! Interaction Flow Controller.
//!
//! `Experience` owns every piece of per-visit state: the stage, the identity,
//! the selfie, toasts, the camera nudge and the dodge engine. It performs no
//! IO. Each input method takes the current instant and hands back
//! [`Command`]s for the driver (network, camera, navigation); results are
//! fed back through [`Experience::persisted`] and [`Experience::selfie_ready`].
//!
//! Timers are [`Countdown`]s stored inside the stage that owns them, so a
//! stage transition drops the old timer and a late tick can never act on a
//! stage that has already been left.

use std::fmt;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::copy::{FINAL_LETTER_LINES, LETTER_LINES_SHOWN, PICKUP_LINES, QUESTIONS, Question, YES_TEASE_LINES};
use super::countdown::Countdown;
use super::dodge::{DodgeEngine, Point, Viewport};
use super::toast::ToastQueue;
use crate::models::answer::AnswerChoice;

pub const CELEBRATION_DURATION: Duration = Duration::from_secs(5);
pub const CAMERA_NUDGE_DURATION: Duration = Duration::from_secs(5);
pub const COMPLETION_DURATION: Duration = Duration::from_secs(10);

/// Suggested repaint periods for the progress bars.
pub const CELEBRATION_TICK: Duration = Duration::from_millis(40);
pub const CAMERA_NUDGE_TICK: Duration = Duration::from_millis(40);
pub const COMPLETION_TICK: Duration = Duration::from_millis(50);

pub const ENTRY_PATH: &str = "/";

const IDENTITY_REQUIRED: &str = "Name, email, and requester are required.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub asked_by: String,
}

/// Body of one answer submission, in the shape `POST /api/responses` takes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub asked_by: String,
    pub question_key: String,
    pub question_text: String,
    pub answer: AnswerChoice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selfie_data: Option<String>,
}

/// Work the driver has to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a best-effort selfie capture; report with `selfie_ready`.
    CaptureSelfie,
    /// Store this answer; report with `persisted`.
    Persist(Submission),
    /// Full page navigation.
    Redirect(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowError {
    IdentityIncomplete,
    /// An answer is already being saved or celebrated.
    Busy,
    /// The call does not apply to the current stage.
    WrongStage,
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::IdentityIncomplete => f.write_str(IDENTITY_REQUIRED),
            FlowError::Busy => f.write_str("an answer is already in progress"),
            FlowError::WrongStage => f.write_str("not available at this point"),
        }
    }
}

impl std::error::Error for FlowError {}

/// Public view of where the visitor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    CollectingIdentity,
    AnsweringQuestion(usize),
    Celebrating(usize),
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfieState {
    NotTried,
    Pending,
    Captured,
    Unavailable,
}

/// Where the answer behind a celebration stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveState {
    InFlight,
    Saved,
    Failed,
}

#[derive(Debug)]
enum Stage {
    CollectingIdentity,
    Answering {
        index: usize,
    },
    Celebrating {
        index: usize,
        countdown: Countdown,
        tease: &'static str,
        save: SaveState,
    },
    Done {
        lines: Vec<&'static str>,
        countdown: Countdown,
        redirected: bool,
    },
}

/// Closing lines for the letter: distinct, shuffled, `LETTER_LINES_SHOWN` of them.
pub fn pick_letter_lines(rng: &mut impl Rng) -> Vec<&'static str> {
    let mut pool = FINAL_LETTER_LINES.to_vec();
    pool.shuffle(rng);
    pool.truncate(LETTER_LINES_SHOWN);
    pool
}

pub struct Experience {
    stage: Stage,
    questions: &'static [Question],
    identity: Option<Identity>,
    selfie: SelfieState,
    selfie_data: Option<String>,
    saving: bool,
    error: Option<String>,
    toasts: ToastQueue,
    camera_nudge: Option<Countdown>,
    camera_enabled: bool,
    dodge: DodgeEngine,
    rng: StdRng,
}

impl Experience {
    pub fn new(viewport: Viewport, now: Instant) -> Self {
        Self::with_rng(viewport, now, StdRng::from_os_rng())
    }

    /// Deterministic randomness, for tests and replays.
    pub fn with_seed(viewport: Viewport, now: Instant, seed: u64) -> Self {
        Self::with_rng(viewport, now, StdRng::seed_from_u64(seed))
    }

    fn with_rng(viewport: Viewport, now: Instant, rng: StdRng) -> Self {
        Self {
            stage: Stage::CollectingIdentity,
            questions: &QUESTIONS,
            identity: None,
            selfie: SelfieState::NotTried,
            selfie_data: None,
            saving: false,
            error: None,
            toasts: ToastQueue::new(),
            camera_nudge: Some(Countdown::new(now, CAMERA_NUDGE_DURATION)),
            camera_enabled: false,
            dodge: DodgeEngine::new(viewport),
            rng,
        }
    }

    /// Identity form submitted.
    pub fn submit_identity(
        &mut self,
        name: &str,
        email: &str,
        asked_by: &str,
        now: Instant,
    ) -> Result<Vec<Command>, FlowError> {
        if !matches!(self.stage, Stage::CollectingIdentity) {
            return Err(FlowError::WrongStage);
        }
        let (name, email, asked_by) = (name.trim(), email.trim(), asked_by.trim());
        if name.is_empty() || email.is_empty() || asked_by.is_empty() {
            self.error = Some(IDENTITY_REQUIRED.to_string());
            self.toasts.push("Fill all fields", now);
            return Err(FlowError::IdentityIncomplete);
        }

        self.identity = Some(Identity {
            name: name.to_string(),
            email: email.to_lowercase(),
            asked_by: asked_by.to_string(),
        });
        self.error = None;
        self.stage = Stage::Answering { index: 0 };
        self.toasts.push("Identity captured", now);

        let mut commands = Vec::new();
        if self.selfie == SelfieState::NotTried {
            self.selfie = SelfieState::Pending;
            commands.push(Command::CaptureSelfie);
        }
        Ok(commands)
    }

    /// Outcome of a `CaptureSelfie` command.
    pub fn selfie_ready(&mut self, image: Option<String>, now: Instant) {
        match image {
            Some(data) => {
                self.selfie = SelfieState::Captured;
                self.selfie_data = Some(data);
                self.toasts.push("Camera snapshot captured", now);
            }
            None => {
                self.selfie = SelfieState::Unavailable;
                self.toasts.push("No selfie captured", now);
            }
        }
    }

    /// YES or NO clicked on the current question.
    pub fn choose(&mut self, answer: AnswerChoice, now: Instant) -> Result<Vec<Command>, FlowError> {
        let index = match self.stage {
            Stage::Answering { index } => index,
            Stage::Celebrating { .. } => return Err(FlowError::Busy),
            _ => return Err(FlowError::WrongStage),
        };
        if self.saving {
            return Err(FlowError::Busy);
        }
        let submission = self.submission(index, answer).ok_or(FlowError::WrongStage)?;

        self.saving = true;
        self.error = None;

        if answer == AnswerChoice::Yes {
            self.toasts.push("YES locked", now);
            let tease = YES_TEASE_LINES[self.rng.random_range(0..YES_TEASE_LINES.len())];
            self.stage = Stage::Celebrating {
                index,
                countdown: Countdown::new(now, CELEBRATION_DURATION),
                tease,
                save: SaveState::InFlight,
            };
        }

        Ok(vec![Command::Persist(submission)])
    }

    /// Outcome of a `Persist` command. A failure keeps the visitor on the
    /// same question; a celebration still runs to its end first. Nothing is
    /// resubmitted automatically.
    pub fn persisted(&mut self, result: Result<(), String>, now: Instant) {
        if !self.saving {
            return;
        }
        self.saving = false;

        if matches!(self.stage, Stage::Answering { .. }) {
            match result {
                Ok(()) => {
                    self.toasts.push("NO stored", now);
                    self.advance(now);
                }
                Err(message) => self.fail_save(message, now),
            }
            return;
        }

        let elapsed = match &mut self.stage {
            Stage::Celebrating { countdown, save, .. } => {
                *save = if result.is_ok() { SaveState::Saved } else { SaveState::Failed };
                countdown.is_finished(now)
            }
            _ => return,
        };

        if let Err(message) = result {
            self.fail_save(message, now);
        }
        if elapsed {
            self.close_celebration(now);
        }
    }

    /// Periodic tick. Expires toasts and fires whichever countdowns are due.
    pub fn tick(&mut self, now: Instant) -> Vec<Command> {
        self.toasts.expire(now);

        if self.camera_nudge.is_some_and(|c| c.is_finished(now)) {
            self.camera_nudge = None;
        }

        let mut commands = Vec::new();
        let celebration_over = match &mut self.stage {
            Stage::Celebrating { countdown, .. } => countdown.is_finished(now),
            Stage::Done { countdown, redirected, .. } => {
                if countdown.is_finished(now) && !*redirected {
                    *redirected = true;
                    commands.push(Command::Redirect(ENTRY_PATH));
                }
                false
            }
            _ => false,
        };

        if celebration_over {
            self.close_celebration(now);
        }
        commands
    }

    /// The celebration has run its full length. Move on if the answer is
    /// stored, go back to the question if storing it failed, and keep
    /// holding while the save is still in flight.
    fn close_celebration(&mut self, now: Instant) {
        let Stage::Celebrating { index, save, .. } = self.stage else {
            return;
        };
        match save {
            SaveState::Saved => self.advance(now),
            SaveState::Failed => self.stage = Stage::Answering { index },
            SaveState::InFlight => {}
        }
    }

    /// First hover over the inline NO control.
    pub fn hover_reject(&mut self, anchor: Point, pointer: Point, now: Instant) {
        if !matches!(self.stage, Stage::Answering { .. }) || self.dodge.is_active() {
            return;
        }
        let activation = self.dodge.activate(anchor, pointer, &mut self.rng);
        self.toasts.push(activation.taunt, now);
        if let Some(escape) = activation.escape {
            self.toasts.push(escape.taunt, now);
        }
    }

    /// Pointer moved anywhere on the page.
    pub fn pointer_moved(&mut self, pointer: Point, now: Instant) {
        if !matches!(self.stage, Stage::Answering { .. }) {
            return;
        }
        if let Some(escape) = self.dodge.evaluate_proximity(pointer, &mut self.rng) {
            self.toasts.push(escape.taunt, now);
        }
    }

    pub fn set_hovering_accept(&mut self, hovering: bool) {
        self.dodge.set_hovering_accept(hovering);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.dodge.resize(viewport);
    }

    pub fn enable_camera(&mut self, now: Instant) {
        self.camera_enabled = true;
        self.camera_nudge = None;
        self.toasts.push("Camera mode enabled", now);
    }

    pub fn dismiss_camera_nudge(&mut self) {
        self.camera_nudge = None;
    }

    fn submission(&self, index: usize, answer: AnswerChoice) -> Option<Submission> {
        let identity = self.identity.as_ref()?;
        let question = self.questions.get(index)?;
        Some(Submission {
            name: identity.name.clone(),
            email: identity.email.clone(),
            asked_by: identity.asked_by.clone(),
            question_key: question.key.to_string(),
            question_text: question.text.to_string(),
            answer,
            selfie_data: self.selfie_data.clone(),
        })
    }

    fn fail_save(&mut self, message: String, now: Instant) {
        log::debug!("answer not saved: {message}");
        self.error = Some(message);
        self.toasts.push("Save failed", now);
    }

    fn advance(&mut self, now: Instant) {
        let index = match self.stage {
            Stage::Answering { index } | Stage::Celebrating { index, .. } => index,
            _ => return,
        };
        let next = index + 1;
        self.stage = if next >= self.questions.len() {
            Stage::Done {
                lines: pick_letter_lines(&mut self.rng),
                countdown: Countdown::new(now, COMPLETION_DURATION),
                redirected: false,
            }
        } else {
            Stage::Answering { index: next }
        };
        self.dodge.reset();
    }

    pub fn stage(&self) -> StageKind {
        match &self.stage {
            Stage::CollectingIdentity => StageKind::CollectingIdentity,
            Stage::Answering { index } => StageKind::AnsweringQuestion(*index),
            Stage::Celebrating { index, .. } => StageKind::Celebrating(*index),
            Stage::Done { .. } => StageKind::Done,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.stage {
            Stage::Answering { index } | Stage::Celebrating { index, .. } => self.questions.get(index),
            _ => None,
        }
    }

    /// Share of questions already behind the visitor, 0-100.
    pub fn progress_percent(&self) -> u8 {
        let index = match self.stage {
            Stage::CollectingIdentity => 0,
            Stage::Answering { index } | Stage::Celebrating { index, .. } => index,
            Stage::Done { .. } => return 100,
        };
        ((index as f64 / self.questions.len() as f64) * 100.0).round() as u8
    }

    pub fn pickup_line(&self) -> Option<&'static str> {
        match self.stage {
            Stage::Answering { index } | Stage::Celebrating { index, .. } => {
                Some(PICKUP_LINES[index % PICKUP_LINES.len()])
            }
            _ => None,
        }
    }

    pub fn tease_line(&self) -> Option<&'static str> {
        match self.stage {
            Stage::Celebrating { tease, .. } => Some(tease),
            _ => None,
        }
    }

    pub fn celebration_progress(&self, now: Instant) -> Option<f64> {
        match &self.stage {
            Stage::Celebrating { countdown, .. } => Some(countdown.progress(now)),
            _ => None,
        }
    }

    pub fn completion_progress(&self, now: Instant) -> Option<f64> {
        match &self.stage {
            Stage::Done { countdown, .. } => Some(countdown.progress(now)),
            _ => None,
        }
    }

    pub fn letter_lines(&self) -> Option<&[&'static str]> {
        match &self.stage {
            Stage::Done { lines, .. } => Some(lines),
            _ => None,
        }
    }

    pub fn greeting(&self) -> Option<String> {
        self.identity.as_ref().map(|i| format!("Dear {},", i.name))
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn selfie_state(&self) -> SelfieState {
        self.selfie
    }

    pub fn selfie_data(&self) -> Option<&str> {
        self.selfie_data.as_deref()
    }

    pub fn camera_nudge_open(&self) -> bool {
        self.camera_nudge.is_some()
    }

    pub fn camera_nudge_progress(&self, now: Instant) -> Option<f64> {
        self.camera_nudge.map(|c| c.progress(now))
    }

    pub fn camera_enabled(&self) -> bool {
        self.camera_enabled
    }

    pub fn dodge(&self) -> &DodgeEngine {
        &self.dodge
    }
}
