use serde::{Deserialize, Serialize};

/// Direction of a manual rail jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// Signed distance of one jump: a fraction of the visible width, so the
/// neighbouring card stays partly in view as a paging cue
pub fn jump_distance(direction: Direction, visible_width: f64, fraction: f64) -> f64 {
    if !visible_width.is_finite() || visible_width <= 0.0 {
        return 0.0;
    }
    direction.sign() * visible_width * fraction
}
