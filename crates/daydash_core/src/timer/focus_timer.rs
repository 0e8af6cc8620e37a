//! Work/break countdown state machine.

use log::info;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_WORK_DURATION: Duration = Duration::from_secs(25 * 60);
pub const DEFAULT_BREAK_DURATION: Duration = Duration::from_secs(5 * 60);

const WORK_LABEL: &str = "Pomodoro Timer";
const BREAK_LABEL: &str = "Break Time";
const BREAK_ENDED_LOG: &str = "Break ended. Ready for next session.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Work,
    Break,
}

impl TimerPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Work => WORK_LABEL,
            Self::Break => BREAK_LABEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Fresh or reset; always in the work phase.
    Idle,
    Running(TimerPhase),
    Paused(TimerPhase),
}

impl Display for TimerState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Running(TimerPhase::Work) => f.write_str("running(work)"),
            Self::Running(TimerPhase::Break) => f.write_str("running(break)"),
            Self::Paused(_) => f.write_str("paused"),
        }
    }
}

/// Emitted by `tick()` when a phase finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Work phase ran out; the break has started.
    WorkSessionCompleted { sessions: u32 },
    /// Break ran out; the next work phase has started.
    BreakEnded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTimer {
    work_secs: u32,
    break_secs: u32,
    state: TimerState,
    phase: TimerPhase,
    remaining_secs: u32,
    sessions_completed: u32,
    session_log: Option<String>,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusTimer {
    /// 25:00 work, 5:00 break.
    pub fn new() -> Self {
        Self::with_durations(DEFAULT_WORK_DURATION, DEFAULT_BREAK_DURATION)
    }

    /// Durations are truncated to whole seconds, minimum one second each.
    pub fn with_durations(work: Duration, rest: Duration) -> Self {
        let work_secs = whole_secs(work);
        Self {
            work_secs,
            break_secs: whole_secs(rest),
            state: TimerState::Idle,
            phase: TimerPhase::Work,
            remaining_secs: work_secs,
            sessions_completed: 0,
            session_log: None,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running(_))
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    /// `MM:SS`, zero padded.
    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }

    pub fn label(&self) -> &'static str {
        self.phase.label()
    }

    /// Message from the most recent phase boundary, if any since reset.
    pub fn session_log(&self) -> Option<&str> {
        self.session_log.as_deref()
    }

    /// Idle/Paused -> Running in the current phase. Returns `false` when
    /// already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = TimerState::Running(self.phase);
        info!(
            "event=timer_start module=timer status=ok remaining_secs={}",
            self.remaining_secs
        );
        true
    }

    /// Running -> Paused, keeping the remaining time. Returns `false` when
    /// not running.
    pub fn pause(&mut self) -> bool {
        let TimerState::Running(phase) = self.state else {
            return false;
        };
        self.state = TimerState::Paused(phase);
        info!(
            "event=timer_pause module=timer status=ok remaining_secs={}",
            self.remaining_secs
        );
        true
    }

    /// Any state -> Idle with a full work phase, zero sessions, empty log.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.phase = TimerPhase::Work;
        self.remaining_secs = self.work_secs;
        self.sessions_completed = 0;
        self.session_log = None;
        info!("event=timer_reset module=timer status=ok");
    }

    /// Advances the countdown by one second.
    ///
    /// Ignored unless running. When the countdown reaches zero the phase
    /// flips and the timer keeps running in the new phase.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.is_running() {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        let event = match self.phase {
            TimerPhase::Work => {
                self.sessions_completed += 1;
                self.phase = TimerPhase::Break;
                self.remaining_secs = self.break_secs;
                self.session_log = Some(format!(
                    "Pomodoro session completed! Sessions done: {}",
                    self.sessions_completed
                ));
                TimerEvent::WorkSessionCompleted {
                    sessions: self.sessions_completed,
                }
            }
            TimerPhase::Break => {
                self.phase = TimerPhase::Work;
                self.remaining_secs = self.work_secs;
                self.session_log = Some(BREAK_ENDED_LOG.to_string());
                TimerEvent::BreakEnded
            }
        };
        self.state = TimerState::Running(self.phase);
        info!(
            "event=timer_phase module=timer status=ok phase={:?} sessions={}",
            self.phase, self.sessions_completed
        );
        Some(event)
    }
}

/// Formats seconds as `MM:SS`. Minutes are not wrapped at 60.
pub fn format_clock(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

fn whole_secs(duration: Duration) -> u32 {
    u32::try_from(duration.as_secs()).unwrap_or(u32::MAX).max(1)
}
