/// Mouth animation state of the front segment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Mouth {
    #[default]
    Closed,
    /// Front is next to food.
    Opening,
    /// Opened last tick without eating.
    Closing,
    /// Swallowed food this tick.
    Eating,
}

impl Mouth {
    /// Start-of-tick decay, committing last tick's animation.
    pub fn decay(self) -> Mouth {
        match self {
            Mouth::Opening => Mouth::Closing,
            Mouth::Closing | Mouth::Eating | Mouth::Closed => Mouth::Closed,
        }
    }

    /// State after the front has moved. Eating wins over adjacency.
    pub fn after_move(self, ate: bool, next_to_food: bool) -> Mouth {
        if ate {
            Mouth::Eating
        } else if next_to_food {
            Mouth::Opening
        } else {
            self
        }
    }

    /// Whether the front draws the extra food/mouth layers.
    pub fn is_layered(self) -> bool {
        matches!(self, Mouth::Eating | Mouth::Closing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_miss_cycles_open_close_closed() {
        let mut mouth = Mouth::Closed;
        mouth = mouth.decay().after_move(false, true);
        assert_eq!(mouth, Mouth::Opening);
        mouth = mouth.decay().after_move(false, false);
        assert_eq!(mouth, Mouth::Closing);
        mouth = mouth.decay().after_move(false, false);
        assert_eq!(mouth, Mouth::Closed);
    }

    #[test]
    fn eating_decays_straight_to_closed() {
        let mouth = Mouth::Opening.decay().after_move(true, false);
        assert_eq!(mouth, Mouth::Eating);
        assert_eq!(mouth.decay(), Mouth::Closed);
    }

    #[test]
    fn eating_beats_adjacency() {
        assert_eq!(Mouth::Closed.after_move(true, true), Mouth::Eating);
    }

    #[test]
    fn staying_next_to_food_reopens_after_decay() {
        let mouth = Mouth::Opening.decay().after_move(false, true);
        assert_eq!(mouth, Mouth::Opening);
        assert_eq!(Mouth::Closing.decay().after_move(false, true), Mouth::Opening);
    }
}
