// src/schedule.rs
//
// Daily trigger. Two states: Idle, or Armed at one HH:MM. Re-arming replaces
// the previous time. A poll loop fires the job once per day when the wall
// clock passes the trigger; an external stop flag returns it to Idle.

use std::{
    fmt,
    str::FromStr,
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use chrono::{Days, NaiveDateTime, NaiveTime};
use log::info;

use crate::config::consts::{DEFAULT_CHECK_TIME, STOP_POLL_MS, TIMESTAMP_FMT};
use crate::error::{Result, TrackerError};

/// Validated time of day, minute resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CheckTime {
    hour: u32,
    minute: u32,
}

impl CheckTime {
    /// Accepts `H:MM` or `HH:MM`, 00:00 – 23:59.
    pub fn parse(text: &str) -> Result<Self> {
        let bad = || TrackerError::Config(format!(
            "invalid time '{text}', use HH:MM (e.g. 09:00, 14:30)"
        ));
        let (h, m) = text.trim().split_once(':').ok_or_else(bad)?;

        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !digits(h) || h.len() > 2 || !digits(m) || m.len() != 2 {
            return Err(bad());
        }
        let hour: u32 = h.parse().map_err(|_| bad())?;
        let minute: u32 = m.parse().map_err(|_| bad())?;
        if hour > 23 || minute > 59 {
            return Err(bad());
        }
        Ok(Self { hour, minute })
    }

    pub fn as_naive(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or_default()
    }

    /// First moment strictly after `now` that falls on this time of day.
    pub fn next_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date().and_time(self.as_naive());
        if today > now {
            today
        } else {
            today.checked_add_days(Days::new(1)).unwrap_or(today)
        }
    }
}

impl Default for CheckTime {
    fn default() -> Self {
        CheckTime::parse(DEFAULT_CHECK_TIME).unwrap_or(CheckTime { hour: 9, minute: 0 })
    }
}

impl fmt::Display for CheckTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for CheckTime {
    type Err = TrackerError;
    fn from_str(s: &str) -> Result<Self> {
        CheckTime::parse(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Armed { at: CheckTime, next_run: NaiveDateTime },
}

#[derive(Debug)]
pub struct Scheduler {
    state: SchedulerState,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self { state: SchedulerState::Idle }
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, SchedulerState::Armed { .. })
    }

    pub fn next_run(&self) -> Option<NaiveDateTime> {
        match self.state {
            SchedulerState::Armed { next_run, .. } => Some(next_run),
            SchedulerState::Idle => None,
        }
    }

    /// Idle→Armed or Armed→Armed (replaces, never stacks).
    pub fn arm(&mut self, at: CheckTime, now: NaiveDateTime) -> NaiveDateTime {
        let next_run = at.next_after(now);
        self.state = SchedulerState::Armed { at, next_run };
        info!("Scheduler: armed daily at {at}, next {}", next_run.format(TIMESTAMP_FMT));
        next_run
    }

    pub fn disarm(&mut self) {
        if self.is_armed() {
            info!("Scheduler: stopped");
        }
        self.state = SchedulerState::Idle;
    }

    /// True exactly once per crossing of the trigger; then rearms for the
    /// next occurrence after `now`.
    pub fn poll(&mut self, now: NaiveDateTime) -> bool {
        match self.state {
            SchedulerState::Armed { at, next_run } if now >= next_run => {
                self.state = SchedulerState::Armed { at, next_run: at.next_after(now) };
                true
            }
            _ => false,
        }
    }

    /// Blocking loop: poll every `tick`, run `job` when due, stop when `stop`
    /// is set (checked between jobs, never during one). Ends Idle.
    /// Returns how many times the job ran.
    pub fn run_until<C, J>(&mut self, stop: &AtomicBool, tick: Duration, mut clock: C, mut job: J) -> usize
    where
        C: FnMut() -> NaiveDateTime,
        J: FnMut(),
    {
        let mut runs = 0;
        while self.is_armed() && !stop.load(Ordering::SeqCst) {
            if self.poll(clock()) {
                job();
                runs += 1;
                if let Some(next) = self.next_run() {
                    info!("Scheduler: next check {}", next.format(TIMESTAMP_FMT));
                }
            }
            sleep_unless_stopped(stop, tick);
        }
        self.disarm();
        runs
    }
}

/// Sleep up to `total`, waking early once `stop` is set.
fn sleep_unless_stopped(stop: &AtomicBool, total: Duration) {
    let slice = Duration::from_millis(STOP_POLL_MS);
    let mut left = total;
    while !left.is_zero() && !stop.load(Ordering::SeqCst) {
        let step = left.min(slice);
        thread::sleep(step);
        left -= step;
    }
}
