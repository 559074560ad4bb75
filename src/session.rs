//! Session: one game state plus the collaborators it talks to
//!
//! The simulation only emits [`GameEvent`]s. The session turns them into
//! score writes, sounds and result reports, and starts the next run when
//! the reporter asks for one.

use rand_pcg::Pcg32;

use crate::audio::{AudioSink, SoundEffect};
use crate::consts::HIGHSCORE_KEY;
use crate::error::ConfigError;
use crate::highscores::ScoreStore;
use crate::renderer::{Renderer, draw_frame};
use crate::settings::StageConfig;
use crate::sim::{GameEvent, GameState, RunResult, TickInput, tick};

/// What to do once a finished run has been reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterRun {
    /// Generate a fresh stage and wait for the next tap
    NewRun,
    /// End the session
    Stop,
}

/// Receives the result of every acknowledged run
pub trait ResultReporter {
    fn report(&mut self, result: &RunResult) -> AfterRun;
}

impl<F> ResultReporter for F
where
    F: FnMut(&RunResult) -> AfterRun,
{
    fn report(&mut self, result: &RunResult) -> AfterRun {
        self(result)
    }
}

pub struct Session<S, A, R> {
    state: GameState,
    store: S,
    audio: A,
    reporter: R,
    finished: bool,
}

impl<S, A, R> Session<S, A, R>
where
    S: ScoreStore,
    A: AudioSink,
    R: ResultReporter,
{
    /// Generate the first run. The best-ever score is read from `store`.
    pub fn new(
        config: StageConfig,
        rng: Option<Pcg32>,
        store: S,
        audio: A,
        reporter: R,
    ) -> Result<Self, ConfigError> {
        let best = store.get(HIGHSCORE_KEY);
        log::info!("Best score so far: {}", best);
        let state = GameState::new(config, rng, best)?;
        Ok(Self::with_state(state, store, audio, reporter))
    }

    /// Wrap an existing state as-is
    pub fn with_state(state: GameState, store: S, audio: A, reporter: R) -> Self {
        Self {
            state,
            store,
            audio,
            reporter,
            finished: false,
        }
    }

    /// Run one frame and dispatch its events. Returns the events emitted.
    ///
    /// Does nothing once the reporter has stopped the session.
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        if self.finished {
            return Vec::new();
        }

        tick(&mut self.state, input, dt);
        let events = self.state.events.clone();
        for event in &events {
            self.dispatch(event);
        }
        events
    }

    fn dispatch(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::StarCollected { .. } => self.audio.play(SoundEffect::StarPickup),
            GameEvent::NewBest { score } => {
                log::info!("New best score: {}", score);
                self.store.set(HIGHSCORE_KEY, score);
                if let Err(e) = self.store.flush() {
                    log::warn!("Failed to save best score: {}", e);
                }
            }
            GameEvent::EnemyHit { .. } => self.audio.play(SoundEffect::Failure),
            GameEvent::RunFinished(result) => match self.reporter.report(&result) {
                AfterRun::NewRun => {
                    let best = self.store.get(HIGHSCORE_KEY).max(result.best_score);
                    self.state.restart(best);
                    log::info!("New run generated");
                }
                AfterRun::Stop => {
                    log::info!("Session stopped");
                    self.finished = true;
                }
            },
            GameEvent::Started
            | GameEvent::Landed { .. }
            | GameEvent::StepVanished { .. }
            | GameEvent::GameOver { .. } => {}
        }
    }

    /// Emit the current frame's sprites
    pub fn draw(&self, renderer: &mut impl Renderer) {
        draw_frame(&self.state, renderer);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
