//! Phase scheduling: study intervals, short breaks and long breaks.
//!
//! Study time accrues one randomized interval at a time. When an interval
//! runs out the scheduler either takes a short break or, once the cycle
//! threshold is reached, a long break that ends with a fresh cycle. Every
//! transition is driven by the scheduler's single [`Alarm`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{error, info};

use crate::audio::{Cue, CuePlayer, CueSet};
use crate::config::Config;
use crate::timer::{Alarm, TimerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Studying,
    ShortBreak,
    LongBreak,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Studying => f.write_str("studying"),
            Phase::ShortBreak => f.write_str("short break"),
            Phase::LongBreak => f.write_str("long break"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub phase: Phase,
    pub study_started_at: Instant,
    /// Study time credited since the cycle started. Only grows at the end of
    /// a study interval.
    pub accumulated: Duration,
}

impl SessionState {
    /// A fresh study cycle starting now.
    fn new() -> Self {
        Self {
            phase: Phase::Studying,
            study_started_at: Instant::now(),
            accumulated: Duration::ZERO,
        }
    }

    pub fn studied_minutes(&self) -> f64 {
        self.accumulated.as_secs_f64() / 60.0
    }
}

/// Picks a study interval uniformly from `min..=max` at millisecond
/// granularity.
pub fn draw_interval<R: Rng + ?Sized>(rng: &mut R, min: Duration, max: Duration) -> Duration {
    let min_ms = u64::try_from(min.as_millis()).unwrap_or(u64::MAX);
    let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
    Duration::from_millis(rng.random_range(min_ms..=max_ms))
}

pub struct Scheduler {
    config: Config,
    state: SessionState,
    alarm: Alarm,
    player: Arc<dyn CuePlayer>,
    cues: CueSet,
    rng: StdRng,
    status: watch::Sender<SessionState>,
}

impl Scheduler {
    pub fn new(config: Config, player: Arc<dyn CuePlayer>, cues: CueSet) -> Self {
        Self::with_rng(config, player, cues, StdRng::from_os_rng())
    }

    pub fn with_rng(
        config: Config,
        player: Arc<dyn CuePlayer>,
        cues: CueSet,
        rng: StdRng,
    ) -> Self {
        let state = SessionState::new();
        let (status, _) = watch::channel(state);
        Self {
            config,
            state,
            alarm: Alarm::new(),
            player,
            cues,
            rng,
            status,
        }
    }

    /// Read-only view of the session, updated on every transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.status.subscribe()
    }

    /// Starts the first study cycle and keeps cycling until the process ends.
    pub async fn run(mut self) {
        self.start_study();
        loop {
            self.step().await;
            debug_assert!(
                self.alarm.pending().is_some(),
                "no timer armed after a transition"
            );
        }
    }

    /// Waits for the pending timer and performs the transition it stands for.
    pub async fn step(&mut self) -> Option<TimerKind> {
        let armed = self.alarm.expire().await?;
        match armed.kind {
            TimerKind::StudyInterval => self.finish_study_interval(armed.delay),
            TimerKind::ShortBreakEnd => self.finish_short_break(),
            TimerKind::LongBreakEnd => self.finish_long_break(),
        }
        Some(armed.kind)
    }

    pub fn start_study(&mut self) {
        self.state = SessionState::new();
        self.play(Cue::Start);
        info!("study cycle started");
        self.publish();
        self.schedule_next_short_break();
    }

    fn schedule_next_short_break(&mut self) {
        let delay = draw_interval(
            &mut self.rng,
            self.config.min_interval,
            self.config.max_interval,
        );
        info!(
            "next short break in {:.2} minutes",
            delay.as_secs_f64() / 60.0
        );
        self.alarm.arm(TimerKind::StudyInterval, delay);
    }

    fn finish_study_interval(&mut self, delay: Duration) {
        self.state.accumulated += delay;
        if self.state.accumulated >= self.config.study_cycle {
            self.start_long_break();
        } else {
            self.start_short_break();
        }
    }

    fn start_short_break(&mut self) {
        info!(
            "short break, rest for {} seconds",
            self.config.short_break.as_secs()
        );
        self.play(Cue::ShortBreak);
        self.state.phase = Phase::ShortBreak;
        self.publish();
        self.alarm.arm(TimerKind::ShortBreakEnd, self.config.short_break);
    }

    fn finish_short_break(&mut self) {
        info!("short break over, back to studying");
        self.play(Cue::Start);
        self.state.phase = Phase::Studying;
        self.publish();
        self.schedule_next_short_break();
    }

    fn start_long_break(&mut self) {
        info!(
            "{:.2} minutes studied in {:.2} minutes, long break for {} minutes",
            self.state.studied_minutes(),
            self.state.study_started_at.elapsed().as_secs_f64() / 60.0,
            self.config.long_break.as_secs() / 60
        );
        self.play(Cue::LongBreak);
        self.state.phase = Phase::LongBreak;
        self.publish();
        self.alarm.arm(TimerKind::LongBreakEnd, self.config.long_break);
    }

    fn finish_long_break(&mut self) {
        info!("long break over, starting a new study cycle");
        self.play(Cue::Start);
        self.start_study();
    }

    /// Plays a cue in a detached task. Failures are logged and otherwise
    /// have no effect on the schedule.
    fn play(&self, cue: Cue) {
        let player = Arc::clone(&self.player);
        let path = self.cues.path(cue);
        tokio::spawn(async move {
            if let Err(err) = player.play(&path).await {
                error!(?cue, "cue playback failed: {err}");
            }
        });
    }

    fn publish(&self) {
        self.status.send_replace(self.state);
    }
}

#[cfg(test)]
impl Scheduler {
    fn state(&self) -> &SessionState {
        &self.state
    }

    fn pending(&self) -> Option<&crate::timer::Armed> {
        self.alarm.pending()
    }
}
