//! Motion segments and time-ordered tool paths.

use kerf_math::Point3;

use crate::ToolTable;

/// A single tool movement over a time interval.
///
/// Position interpolates linearly in time between the endpoints. The
/// simulation core only ever reads moves; it never mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    tool: Option<u32>,
    start: Point3,
    end: Point3,
    start_time: f64,
    end_time: f64,
}

impl Move {
    /// Create a move. `start_time` must not exceed `end_time`.
    pub fn new(
        tool: Option<u32>,
        start: Point3,
        end: Point3,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        assert!(
            start_time <= end_time,
            "move time interval is reversed: [{start_time}, {end_time}]"
        );
        Self { tool, start, end, start_time, end_time }
    }

    /// The tool number cutting during this move, if any.
    pub fn tool(&self) -> Option<u32> {
        self.tool
    }

    /// Start position.
    pub fn start(&self) -> Point3 {
        self.start
    }

    /// End position.
    pub fn end(&self) -> Point3 {
        self.end
    }

    /// Time at which the move begins.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Time at which the move ends.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Duration of the move.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Position at time `t`, clamped to the move's interval.
    pub fn position_at(&self, t: f64) -> Point3 {
        if t <= self.start_time || self.duration() == 0.0 {
            return self.start;
        }
        if self.end_time <= t {
            return self.end;
        }
        let fraction = (t - self.start_time) / self.duration();
        self.start + (self.end - self.start) * fraction
    }

    /// True if the move's interval overlaps `[start, end]` (closed).
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.start_time <= end && start <= self.end_time
    }
}

/// A tool table plus a sequence of moves ordered by start time.
#[derive(Debug, Clone, Default)]
pub struct ToolPath {
    tools: ToolTable,
    moves: Vec<Move>,
}

impl ToolPath {
    /// Create an empty path over the given tool table.
    pub fn new(tools: ToolTable) -> Self {
        Self { tools, moves: Vec::new() }
    }

    /// The tool table this path refers to.
    pub fn tools(&self) -> &ToolTable {
        &self.tools
    }

    /// Append a move. Moves must be added in time order.
    pub fn add(&mut self, mv: Move) {
        if let Some(last) = self.moves.last() {
            assert!(
                last.start_time() <= mv.start_time(),
                "moves must be added in time order"
            );
        }
        self.moves.push(mv);
    }

    /// All moves in time order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The move at `index`.
    pub fn get(&self, index: usize) -> &Move {
        &self.moves[index]
    }

    /// Number of moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True if the path holds no moves.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Time at which the first move begins, or zero for an empty path.
    pub fn start_time(&self) -> f64 {
        self.moves.first().map_or(0.0, Move::start_time)
    }

    /// Time at which the last move ends, or zero for an empty path.
    pub fn end_time(&self) -> f64 {
        self.moves.last().map_or(0.0, Move::end_time)
    }

    /// Index of the move whose interval contains `time`, if any.
    pub fn find(&self, time: f64) -> Option<usize> {
        let i = self.moves.partition_point(|m| m.end_time() < time);
        (i < self.moves.len() && self.moves[i].start_time() <= time).then_some(i)
    }

    /// Index range of the moves whose intervals overlap `[start, end]`.
    ///
    /// The range may be empty. Assumes moves are ordered by start time with
    /// end times non-decreasing.
    pub fn time_window(&self, start: f64, end: f64) -> std::ops::Range<usize> {
        let first = self.moves.partition_point(|m| m.end_time() < start);
        let last = self.moves.partition_point(|m| m.start_time() <= end);
        first..last.max(first)
    }
}
