use crate::direction::Direction;

/// Two pending turns: the one the next tick commits and one queued behind it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TurnQueue {
    pending: Option<Direction>,
    buffered: Option<Direction>,
}

impl TurnQueue {
    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    pub fn buffered(&self) -> Option<Direction> {
        self.buffered
    }

    /// Offers a turn while travelling `current`. A turn is only accepted
    /// across the axis of the direction it will follow: `current` for the
    /// pending slot, the pending turn for the buffered slot.
    pub fn push(&mut self, current: Direction, dir: Direction) -> bool {
        match self.pending {
            None if !dir.same_axis(current) => {
                self.pending = Some(dir);
                true
            }
            Some(pending) if !dir.same_axis(pending) => {
                self.buffered = Some(dir);
                true
            }
            _ => false,
        }
    }

    /// Takes the turn due this tick, leaving `current` alone when none is.
    pub fn commit(&self, current: Direction) -> Direction {
        self.pending.unwrap_or(current)
    }

    /// Promotes the buffered turn once a tick has consumed the pending one.
    pub fn advance(&mut self) {
        self.pending = self.buffered.take();
    }
}
