use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerMode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub fn all() -> [Self; 3] {
        [Self::Focus, Self::ShortBreak, Self::LongBreak]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    pub fn status_text(self) -> &'static str {
        match self {
            Self::Focus => "Time to focus!",
            Self::ShortBreak => "Time for a short break!",
            Self::LongBreak => "Time for a long break!",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Focus => "mode-focus",
            Self::ShortBreak => "mode-short",
            Self::LongBreak => "mode-long",
        }
    }
}

/// Persisted timer preferences: per-mode duration in minutes, optional accent
/// color per mode, and the alarm mute flag. The countdown itself is never
/// persisted; navigating away loses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub focus_minutes: u32,
    pub short_minutes: u32,
    pub long_minutes: u32,
    pub focus_color: Option<String>,
    pub short_color: Option<String>,
    pub long_color: Option<String>,
    pub muted: bool,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            short_minutes: 5,
            long_minutes: 15,
            focus_color: None,
            short_color: None,
            long_color: None,
            muted: false,
        }
    }
}

impl TimerSettings {
    pub fn minutes_for(&self, mode: TimerMode) -> u32 {
        let minutes = match mode {
            TimerMode::Focus => self.focus_minutes,
            TimerMode::ShortBreak => self.short_minutes,
            TimerMode::LongBreak => self.long_minutes,
        };
        // Zero-length countdowns would expire on the first tick.
        minutes.max(1)
    }

    pub fn color_for(&self, mode: TimerMode) -> Option<&str> {
        match mode {
            TimerMode::Focus => self.focus_color.as_deref(),
            TimerMode::ShortBreak => self.short_color.as_deref(),
            TimerMode::LongBreak => self.long_color.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Expired,
}

/// The pomodoro state machine, driven by a one-second external tick. Pure so
/// the transition table is testable off the browser event loop.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusTimer {
    mode: TimerMode,
    phase: TimerPhase,
    remaining_seconds: u32,
}

impl FocusTimer {
    pub fn new(settings: &TimerSettings) -> Self {
        Self {
            mode: TimerMode::Focus,
            phase: TimerPhase::Idle,
            remaining_seconds: settings.minutes_for(TimerMode::Focus) * 60,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }

    /// Cancels any countdown and resets to the configured duration of `mode`.
    pub fn switch_mode(&mut self, mode: TimerMode, settings: &TimerSettings) {
        self.mode = mode;
        self.phase = TimerPhase::Idle;
        self.remaining_seconds = settings.minutes_for(mode) * 60;
    }

    pub fn start(&mut self) {
        if matches!(self.phase, TimerPhase::Idle | TimerPhase::Paused) {
            self.phase = TimerPhase::Running;
        }
    }

    pub fn pause(&mut self) {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Paused;
        }
    }

    /// One-second tick. Returns true when this tick expired the countdown,
    /// which is the caller's cue to sound the alarm.
    pub fn tick(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = TimerPhase::Expired;
            return true;
        }
        false
    }

    /// Only valid from the expired state; re-arms the current mode.
    pub fn restart(&mut self, settings: &TimerSettings) {
        if self.phase == TimerPhase::Expired {
            self.switch_mode(self.mode, settings);
        }
    }

    pub fn action_label(&self) -> &'static str {
        match self.phase {
            TimerPhase::Idle => "START",
            TimerPhase::Running => "PAUSE",
            TimerPhase::Paused => "RESUME",
            TimerPhase::Expired => "RESTART",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> TimerSettings {
        TimerSettings {
            focus_minutes: 1,
            short_minutes: 2,
            long_minutes: 3,
            ..TimerSettings::default()
        }
    }

    #[test]
    fn starts_idle_in_focus_mode() {
        let timer = FocusTimer::new(&settings());
        assert_eq!(timer.mode(), TimerMode::Focus);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.display(), "01:00");
    }

    #[test]
    fn switch_mode_cancels_countdown_and_resets() {
        let settings = settings();
        let mut timer = FocusTimer::new(&settings);
        timer.start();
        timer.tick();
        timer.switch_mode(TimerMode::ShortBreak, &settings);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.remaining_seconds(), 120);
    }

    #[test]
    fn ticks_only_while_running() {
        let mut timer = FocusTimer::new(&settings());
        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds(), 60);

        timer.start();
        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds(), 59);

        timer.pause();
        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds(), 59);
    }

    #[test]
    fn expires_at_zero_and_signals_alarm() {
        let mut timer = FocusTimer::new(&settings());
        timer.start();
        let mut expired = false;
        for _ in 0..60 {
            expired = timer.tick();
        }
        assert!(expired);
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert_eq!(timer.action_label(), "RESTART");

        // Further ticks are inert.
        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds(), 0);
    }

    #[test]
    fn restart_only_from_expired() {
        let settings = settings();
        let mut timer = FocusTimer::new(&settings);
        timer.start();
        timer.tick();
        timer.restart(&settings);
        assert_eq!(timer.phase(), TimerPhase::Running);

        while !timer.tick() {}
        timer.restart(&settings);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.remaining_seconds(), 60);
    }

    #[test]
    fn resume_keeps_remaining_time() {
        let mut timer = FocusTimer::new(&settings());
        timer.start();
        timer.tick();
        timer.tick();
        timer.pause();
        timer.start();
        assert_eq!(timer.phase(), TimerPhase::Running);
        assert_eq!(timer.remaining_seconds(), 58);
    }

    #[test]
    fn zero_minute_setting_is_floored() {
        let settings = TimerSettings {
            focus_minutes: 0,
            ..TimerSettings::default()
        };
        let timer = FocusTimer::new(&settings);
        assert_eq!(timer.remaining_seconds(), 60);
    }
}
