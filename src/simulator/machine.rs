use crate::error::Result;
use crate::simulator::classify::{ring_offset, RiskDescription, StatusBanner, ThreatColor};
use crate::simulator::report::{Category, ThreatReport};
use crate::simulator::scheduler::TimerQueue;
use crate::simulator::submission::{Submission, INVALID_SUBMISSION_NOTICE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

pub const LOADING_DELAY: Duration = Duration::from_millis(3000);
pub const SCANNING_DELAY: Duration = Duration::from_millis(1000);
pub const COUNTER_TICK: Duration = Duration::from_millis(30);
pub const BAR_REVEAL_DELAY: Duration = Duration::from_millis(1500);
pub const SCANNING_LABEL: &str = "SCANNING...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanState {
    Idle,
    Loading,
    Scanning,
    Revealing,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    LoadingElapsed,
    ScanningElapsed,
    CounterTick,
    RevealBars,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBar {
    pub category: Category,
    pub value: u32,
    pub width: Option<u32>,
    pub description: Option<RiskDescription>,
}

/// Everything a presentation layer needs to draw the scan. Data only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub loading_visible: bool,
    pub core_label: Option<String>,
    pub active: bool,
    pub report: Option<ThreatReport>,
    pub overall_score: Option<u32>,
    pub counter: u32,
    pub ring_offset: f64,
    pub ring_color: ThreatColor,
    pub bars: Vec<CategoryBar>,
    pub banner: Option<StatusBanner>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            loading_visible: false,
            core_label: None,
            active: false,
            report: None,
            overall_score: None,
            counter: 0,
            ring_offset: ring_offset(0),
            ring_color: ThreatColor::for_level(0),
            bars: Vec::new(),
            banner: None,
        }
    }
}

impl Dashboard {
    fn populate(&mut self, report: ThreatReport) {
        self.report = Some(report);
        self.overall_score = Some(report.overall_score());
        self.bars = report
            .iter()
            .map(|(category, value)| CategoryBar {
                category,
                value,
                width: None,
                description: None,
            })
            .collect();
    }

    pub fn bars_revealed(&self) -> bool {
        !self.bars.is_empty() && self.bars.iter().all(|bar| bar.width.is_some())
    }

    pub fn counter_finished(&self) -> bool {
        self.banner.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ScanSession {
    pub id: String,
    pub submission: Submission,
    pub state: ScanState,
    pub started_at: Duration,
    pub dashboard: Dashboard,
}

impl ScanSession {
    /// Time since the session's submission.
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started_at)
    }

    fn transition(&mut self, to: ScanState) -> ScanState {
        std::mem::replace(&mut self.state, to)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    Notified {
        message: String,
    },
    Superseded {
        session_id: String,
        state: ScanState,
    },
    StateChanged {
        session_id: String,
        from: ScanState,
        to: ScanState,
        at: Duration,
    },
    CounterTicked {
        value: u32,
        color: ThreatColor,
        at: Duration,
    },
    BarsRevealed {
        at: Duration,
    },
    StatusFinalized {
        banner: StatusBanner,
        at: Duration,
    },
}

/// Timer-driven scan state machine on a virtual timeline.
///
/// Nothing happens until the caller moves time with [`advance_to`] or
/// [`advance_by`]; a real-time caller sleeps until [`next_deadline`] first.
///
/// [`advance_to`]: ScanSimulator::advance_to
/// [`advance_by`]: ScanSimulator::advance_by
/// [`next_deadline`]: ScanSimulator::next_deadline
pub struct ScanSimulator<R = StdRng> {
    rng: R,
    timers: TimerQueue<Timer>,
    now: Duration,
    session: Option<ScanSession>,
    notification: Option<String>,
    events: Vec<ScanEvent>,
}

impl ScanSimulator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ScanSimulator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            timers: TimerQueue::new(),
            now: Duration::ZERO,
            session: None,
            notification: None,
            events: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn state(&self) -> ScanState {
        self.session
            .as_ref()
            .map(|s| s.state)
            .unwrap_or(ScanState::Idle)
    }

    pub fn session(&self) -> Option<&ScanSession> {
        self.session.as_ref()
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn drain_events(&mut self) -> Vec<ScanEvent> {
        std::mem::take(&mut self.events)
    }

    /// Starts a session for `name`. A rejected name only raises the
    /// notification; a running session keeps going. An accepted name
    /// cancels every pending timer and restarts from `Loading`.
    pub fn submit(&mut self, name: &str) -> Result<&ScanSession> {
        let submission = match Submission::validate(name) {
            Ok(submission) => submission,
            Err(e) => {
                self.notification = Some(INVALID_SUBMISSION_NOTICE.to_string());
                self.events.push(ScanEvent::Notified {
                    message: INVALID_SUBMISSION_NOTICE.to_string(),
                });
                return Err(e);
            }
        };

        self.timers.clear();
        self.notification = None;

        let from = match self.session.take() {
            Some(previous) => {
                if previous.state != ScanState::Complete {
                    self.events.push(ScanEvent::Superseded {
                        session_id: previous.id.clone(),
                        state: previous.state,
                    });
                }
                previous.state
            }
            None => ScanState::Idle,
        };

        let session = ScanSession {
            id: format!("scan-{}", Uuid::new_v4()),
            submission,
            state: ScanState::Loading,
            started_at: self.now,
            dashboard: Dashboard {
                loading_visible: true,
                ..Dashboard::default()
            },
        };

        self.events.push(ScanEvent::StateChanged {
            session_id: session.id.clone(),
            from,
            to: ScanState::Loading,
            at: self.now,
        });
        self.timers
            .schedule_at(self.now + LOADING_DELAY, Timer::LoadingElapsed);

        let session = self.session.insert(session);
        Ok(&*session)
    }

    /// Fires every timer due at or before `at`, in order. Time never moves back.
    pub fn advance_to(&mut self, at: Duration) {
        if at < self.now {
            return;
        }
        while let Some((due, timer)) = self.timers.pop_due(at) {
            self.now = due;
            self.fire(timer);
        }
        self.now = at;
    }

    pub fn advance_by(&mut self, by: Duration) {
        self.advance_to(self.now + by);
    }

    /// Fires timers until none remain.
    pub fn run_to_completion(&mut self) {
        while let Some(deadline) = self.next_deadline() {
            self.advance_to(deadline);
        }
    }

    fn fire(&mut self, timer: Timer) {
        let now = self.now;
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match timer {
            Timer::LoadingElapsed => {
                let from = session.transition(ScanState::Scanning);
                session.dashboard.loading_visible = false;
                session.dashboard.core_label = Some(SCANNING_LABEL.to_string());
                self.events.push(ScanEvent::StateChanged {
                    session_id: session.id.clone(),
                    from,
                    to: ScanState::Scanning,
                    at: now,
                });
                self.timers
                    .schedule_at(now + SCANNING_DELAY, Timer::ScanningElapsed);
            }
            Timer::ScanningElapsed => {
                let from = session.transition(ScanState::Revealing);
                session.dashboard.active = true;
                session
                    .dashboard
                    .populate(ThreatReport::generate(&mut self.rng));
                self.events.push(ScanEvent::StateChanged {
                    session_id: session.id.clone(),
                    from,
                    to: ScanState::Revealing,
                    at: now,
                });
                self.timers.schedule_at(now + COUNTER_TICK, Timer::CounterTick);
                self.timers
                    .schedule_at(now + BAR_REVEAL_DELAY, Timer::RevealBars);
            }
            Timer::CounterTick => {
                let dashboard = &mut session.dashboard;
                let target = dashboard.overall_score.unwrap_or(0);

                dashboard.counter += 1;
                dashboard.ring_offset = ring_offset(dashboard.counter);
                dashboard.ring_color = ThreatColor::for_level(dashboard.counter);
                self.events.push(ScanEvent::CounterTicked {
                    value: dashboard.counter,
                    color: dashboard.ring_color,
                    at: now,
                });

                if dashboard.counter >= target {
                    let banner = StatusBanner::for_score(target);
                    dashboard.banner = Some(banner);
                    self.events.push(ScanEvent::StatusFinalized { banner, at: now });
                    complete_if_settled(session, &mut self.events, now);
                } else {
                    self.timers.schedule_at(now + COUNTER_TICK, Timer::CounterTick);
                }
            }
            Timer::RevealBars => {
                for bar in session.dashboard.bars.iter_mut() {
                    bar.width = Some(bar.value);
                    bar.description = Some(RiskDescription::for_level(bar.value));
                }
                self.events.push(ScanEvent::BarsRevealed { at: now });
                complete_if_settled(session, &mut self.events, now);
            }
        }
    }
}

fn complete_if_settled(session: &mut ScanSession, events: &mut Vec<ScanEvent>, now: Duration) {
    let dashboard = &session.dashboard;
    if session.state != ScanState::Revealing
        || !dashboard.counter_finished()
        || !dashboard.bars_revealed()
    {
        return;
    }
    let from = session.transition(ScanState::Complete);
    events.push(ScanEvent::StateChanged {
        session_id: session.id.clone(),
        from,
        to: ScanState::Complete,
        at: now,
    });
}
