/// Wall-clock gate for ticks. Time spent paused is accumulated separately
/// and subtracted, so resuming neither fires a burst of ticks nor jumps the
/// animation forward.
#[derive(Debug, Clone, PartialEq)]
pub struct Scheduler {
    base_interval: f64,
    speed_per_segment: f64,
    min_interval: f64,
    last_tick: f64,
    paused_total: f64,
    paused_since: Option<f64>,
}

impl Scheduler {
    pub fn new(base_interval: f64, speed_per_segment: f64, min_interval: f64) -> Self {
        Self {
            base_interval,
            speed_per_segment,
            min_interval,
            last_tick: 0.0,
            paused_total: 0.0,
            paused_since: None,
        }
    }

    pub fn set_base_interval(&mut self, base_interval: f64) {
        self.base_interval = base_interval;
    }

    /// Seconds between ticks for a snake with the given tail index. Each
    /// segment beyond the spawn length shaves a little off, down to the floor.
    pub fn interval(&self, tail_index: usize) -> f64 {
        let grown = tail_index.saturating_sub(2) as f64;
        (self.base_interval - self.speed_per_segment * grown).max(self.min_interval)
    }

    pub fn due(&self, now: f64, tail_index: usize) -> bool {
        self.elapsed(now) >= self.interval(tail_index)
    }

    pub fn mark_tick(&mut self, now: f64) {
        self.last_tick = now - self.paused_total;
    }

    /// Restarts the clock as if a tick had just happened with no pause history.
    pub fn restart(&mut self, now: f64) {
        self.last_tick = now;
        self.paused_total = 0.0;
        self.paused_since = None;
    }

    /// Called every frame with the current pause flag.
    pub fn track_pause(&mut self, paused: bool, now: f64) {
        match (paused, self.paused_since) {
            (true, None) => self.paused_since = Some(now),
            (false, Some(start)) => {
                self.paused_total += now - start;
                self.paused_since = None;
            }
            _ => {}
        }
    }

    /// Seconds since the last tick with pauses excluded, including one
    /// still in progress.
    pub fn elapsed(&self, now: f64) -> f64 {
        let open_pause = self.paused_since.map_or(0.0, |start| now - start);
        now - (self.last_tick + self.paused_total + open_pause)
    }

    /// Animation frame for the time since the last tick, spread over
    /// `frame_count` frames per interval. Past the last frame it wraps to `0`
    /// unless `hold` is set, which lets a one-shot animation report that it
    /// has run out.
    pub fn frame(&self, now: f64, tail_index: usize, frame_count: usize, hold: bool) -> usize {
        let progress = (self.elapsed(now) / self.interval(tail_index)).max(0.0);
        let frame = (progress * frame_count as f64) as usize;
        if frame >= frame_count && !hold { 0 } else { frame }
    }
}
