//! Per-tick activation, judgement and expiry of hit-objects.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chart::{Chart, HitObject, HitObjectState};
use crate::clock::ClockSnapshot;
use crate::error::Result;
use crate::input::InputEvent;
use crate::play::SessionState;
use crate::score::{JudgeEvent, MissCause, ScoreState};

/// State change of one object during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub id: usize,
    pub from: HitObjectState,
    pub to: HitObjectState,
}

/// What a tick did, for the presentation layer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickReport {
    /// Clock snapshot the tick ran against
    pub time: f64,
    pub state: SessionState,
    pub transitions: Vec<Transition>,
    pub events: Vec<JudgeEvent>,
    pub score: ScoreState,
    pub completed: bool,
}

impl TickReport {
    fn new(time: f64) -> Self {
        Self {
            time,
            ..Default::default()
        }
    }

    pub fn hits(&self) -> impl Iterator<Item = &JudgeEvent> {
        self.events.iter().filter(|e| e.is_hit())
    }

    pub fn misses(&self) -> impl Iterator<Item = &JudgeEvent> {
        self.events.iter().filter(|e| e.is_miss())
    }
}

/// Judgement loop for one chart.
///
/// Owns a working copy of the chart's objects and the score. `tick` is the only
/// mutator and never blocks; the caller drives it at a fixed rate.
#[derive(Debug, Clone)]
pub struct Scheduler {
    objects: Vec<HitObject>,
    score: ScoreState,
    last_expiry: Option<f64>,
    last_time: Option<f64>,
    last_seek_epoch: u64,
    /// Clock position at the start of the current pause
    frozen_at: Option<f64>,
    /// Input received while paused, judged on resume
    buffered: Vec<InputEvent>,
    completed: bool,
}

impl Scheduler {
    /// Fails with `InvalidChart` when objects are not sorted by activation time.
    pub fn new(chart: &Chart) -> Result<Self> {
        chart.validate()?;
        Ok(Self {
            objects: chart.objects().to_vec(),
            score: ScoreState::new(),
            last_expiry: chart.last_expiry(),
            last_time: None,
            last_seek_epoch: 0,
            frozen_at: None,
            buffered: Vec::new(),
            completed: chart.is_empty(),
        })
    }

    pub fn objects(&self) -> &[HitObject] {
        &self.objects
    }

    pub fn active_objects(&self) -> impl Iterator<Item = &HitObject> {
        self.objects
            .iter()
            .filter(|o| o.state == HitObjectState::Active)
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn is_paused(&self) -> bool {
        self.frozen_at.is_some()
    }

    /// Run one tick against a clock snapshot and the input drained since the
    /// previous tick.
    pub fn tick<I>(&mut self, snapshot: ClockSnapshot, events: I) -> TickReport
    where
        I: IntoIterator<Item = InputEvent>,
    {
        if self.completed {
            let mut report = TickReport::new(snapshot.position);
            report.state = SessionState::Completed;
            report.score = self.score;
            report.completed = true;
            return report;
        }

        if snapshot.paused {
            return self.tick_paused(snapshot, events);
        }

        let t = snapshot.position;
        let mut report = TickReport::new(t);

        // State was brought up to the frozen time when the pause began
        if let Some(frozen) = self.frozen_at.take() {
            let buffered = std::mem::take(&mut self.buffered);
            debug!(
                "Resumed at {:.3}s, judging {} buffered input(s)",
                frozen,
                buffered.len()
            );
            for event in buffered {
                self.judge(event, frozen, &mut report);
            }
        }

        self.advance(t, snapshot.seek_epoch, &mut report);
        for event in events {
            self.judge(event, t, &mut report);
        }

        self.completed = self.check_complete(t);

        if self.completed {
            info!(
                "Chart complete at {:.3}s: {} hit, {} missed, max combo {}",
                t, self.score.hits, self.score.misses, self.score.max_combo
            );
        }

        report.state = if self.completed {
            SessionState::Completed
        } else {
            SessionState::Running
        };
        report.score = self.score;
        report.completed = self.completed;
        report
    }

    fn tick_paused<I>(&mut self, snapshot: ClockSnapshot, events: I) -> TickReport
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut report = TickReport::new(snapshot.position);
        match self.frozen_at {
            Some(frozen) => report.time = frozen,
            None => {
                debug!("Paused at {:.3}s", snapshot.position);
                // Catch up with clock progress the last running tick missed
                self.advance(snapshot.position, snapshot.seek_epoch, &mut report);
                self.frozen_at = Some(snapshot.position);
            }
        }
        self.buffered.extend(events);

        report.state = SessionState::Paused;
        report.score = self.score;
        report
    }

    /// Move object states to `t`: resync on a discontinuity, then activate
    /// and expire. Input is judged afterwards, so a closed window never
    /// takes a hit.
    fn advance(&mut self, t: f64, seek_epoch: u64, report: &mut TickReport) {
        let seeked = seek_epoch != self.last_seek_epoch;
        let went_back = self.last_time.is_some_and(|last| t < last);
        if self.last_time.is_none() || seeked || went_back {
            if let Some(last) = self.last_time {
                debug!("Timeline discontinuity: {:.3}s -> {:.3}s", last, t);
            }
            self.resync(t, report);
        }

        self.activate(t, report);
        self.expire(t, report);

        self.last_time = Some(t);
        self.last_seek_epoch = seek_epoch;
    }

    /// Recompute object states after a jump to `t`.
    ///
    /// Active objects not yet reached go back to Pending; anything whose
    /// window is already over is missed before input is considered.
    fn resync(&mut self, t: f64, report: &mut TickReport) {
        for index in 0..self.objects.len() {
            let (state, activation, expiry) = {
                let obj = &self.objects[index];
                (obj.state, obj.activation_time, obj.expiry_time)
            };
            match state {
                HitObjectState::Active if activation > t => {
                    self.transition(index, HitObjectState::Pending, report);
                }
                HitObjectState::Pending | HitObjectState::Active if t > expiry => {
                    self.transition(index, HitObjectState::Missed, report);
                    self.score.record_timeout();
                    report.events.push(JudgeEvent::Miss {
                        id: Some(index),
                        time: t,
                        cause: MissCause::Timeout,
                    });
                }
                _ => {}
            }
        }
    }

    fn activate(&mut self, t: f64, report: &mut TickReport) {
        for index in 0..self.objects.len() {
            let obj = &self.objects[index];
            if obj.activation_time > t {
                // Sorted: nothing later can be due
                break;
            }
            if obj.state == HitObjectState::Pending {
                self.transition(index, HitObjectState::Active, report);
            }
        }
    }

    /// Resolve one input against the active set.
    ///
    /// Objects are sorted, so the first match is the earliest-activated one.
    fn judge(&mut self, event: InputEvent, t: f64, report: &mut TickReport) {
        let candidate = self.objects.iter().position(|obj| {
            obj.state == HitObjectState::Active
                && match &event {
                    InputEvent::Pointer(p) => obj.contains(&p.point()),
                    InputEvent::Key(k) => obj.accepts_key(k.symbol),
                }
        });

        match candidate {
            Some(index) => {
                let offset = event.timestamp() - self.objects[index].activation_time;
                self.transition(index, HitObjectState::Hit, report);
                self.score.record_hit();
                report.events.push(JudgeEvent::Hit {
                    id: index,
                    time: t,
                    offset,
                });
            }
            None => {
                debug!("Input at {:.3}s matched nothing: {:?}", t, event);
                self.score.record_input_miss();
                report.events.push(JudgeEvent::Miss {
                    id: None,
                    time: t,
                    cause: MissCause::Input,
                });
            }
        }
    }

    fn expire(&mut self, t: f64, report: &mut TickReport) {
        for index in 0..self.objects.len() {
            let obj = &self.objects[index];
            if obj.state == HitObjectState::Active && t > obj.expiry_time {
                self.transition(index, HitObjectState::Missed, report);
                self.score.record_timeout();
                report.events.push(JudgeEvent::Miss {
                    id: Some(index),
                    time: t,
                    cause: MissCause::Timeout,
                });
            }
        }
    }

    fn transition(&mut self, index: usize, to: HitObjectState, report: &mut TickReport) {
        let obj = &mut self.objects[index];
        let from = obj.state;
        debug_assert!(
            HitObjectState::is_valid_transition(from, to),
            "object {} cannot go {} -> {}",
            index,
            from,
            to
        );
        obj.state = to;
        debug!("Object {}: {} -> {}", index, from, to);
        report.transitions.push(Transition { id: index, from, to });
    }

    fn check_complete(&self, t: f64) -> bool {
        self.objects.iter().all(HitObject::is_resolved)
            && self.last_expiry.is_none_or(|last| t > last)
    }
}
