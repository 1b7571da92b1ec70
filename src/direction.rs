#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Grid offset of one step; `y` grows downwards.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn same_axis(self, other: Direction) -> bool {
        self.is_vertical() == other.is_vertical()
    }

    /// Rotation applied to a left-facing sprite so it faces this way.
    pub fn rotation_degrees(self) -> f32 {
        match self {
            Direction::Up => 90.0,
            Direction::Down => -90.0,
            Direction::Left => 0.0,
            Direction::Right => 180.0,
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// Which of the three sprite variants a segment uses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Turn {
    #[default]
    Straight,
    Left,
    Right,
}

#[derive(Copy, Clone)]
struct TurnPair {
    left: Direction,
    right: Direction,
}

// Indexed by `Direction::index`. Screen-space, so moving up and arriving
// from the right reads as a left turn.
const TURN_TABLE: [TurnPair; 4] = [
    TurnPair {
        left: Direction::Right,
        right: Direction::Left,
    },
    TurnPair {
        left: Direction::Left,
        right: Direction::Right,
    },
    TurnPair {
        left: Direction::Up,
        right: Direction::Down,
    },
    TurnPair {
        left: Direction::Down,
        right: Direction::Up,
    },
];

impl Turn {
    /// Classifies a segment travelling `current` whose neighbour towards the
    /// tail travelled `previous`. Unknown directions count as straight.
    pub fn classify(current: Option<Direction>, previous: Option<Direction>) -> Turn {
        let (Some(current), Some(previous)) = (current, previous) else {
            return Turn::Straight;
        };
        let pair = TURN_TABLE[current.index()];
        if previous == pair.left {
            Turn::Left
        } else if previous == pair.right {
            Turn::Right
        } else {
            Turn::Straight
        }
    }

    /// Direction the neighbour towards the tail travelled, given this turn
    /// made while heading `current`. Inverse of [`Turn::classify`].
    pub fn previous(self, current: Direction) -> Direction {
        let pair = TURN_TABLE[current.index()];
        match self {
            Turn::Straight => current,
            Turn::Left => pair.left,
            Turn::Right => pair.right,
        }
    }
}
