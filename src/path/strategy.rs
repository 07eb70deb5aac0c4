use egui::Color32;
use serde::{Deserialize, Serialize};

use super::PathCommand;
use crate::stroke::StrokePoint;

/// Curve-fitting strategies for turning a point sequence into path commands.
///
/// Every strategy works on the tail of a stroke: the points after the one
/// used as the path's `MoveTo` origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathStrategy {
    /// A line to every point
    Straight,
    /// Cubic through midpoints, with the point itself as second control
    CubicMidpoint,
    /// Quadratic with the point as control, ending on the next midpoint
    QuadraticMidpoint,
}

impl PathStrategy {
    /// All strategies, in presentation order
    pub const ALL: [PathStrategy; 3] = [
        PathStrategy::Straight,
        PathStrategy::CubicMidpoint,
        PathStrategy::QuadraticMidpoint,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PathStrategy::Straight => "straight lines",
            PathStrategy::CubicMidpoint => "bezier curves",
            PathStrategy::QuadraticMidpoint => "quadratic curves",
        }
    }

    /// Display color used when comparing strategies side by side
    pub fn stroke_color(&self) -> Color32 {
        match self {
            PathStrategy::Straight => Color32::from_rgb(255, 0, 0),
            PathStrategy::CubicMidpoint => Color32::from_rgb(0, 128, 0),
            PathStrategy::QuadraticMidpoint => Color32::from_rgb(0, 0, 255),
        }
    }

    /// Fit the tail of a stroke
    pub fn fit(&self, tail: &[StrokePoint]) -> Vec<PathCommand> {
        match self {
            PathStrategy::Straight => tail
                .iter()
                .map(|p| PathCommand::LineTo { to: p.pos })
                .collect(),
            PathStrategy::QuadraticMidpoint => tail
                .windows(2)
                .map(|w| PathCommand::QuadraticTo {
                    control: w[0].pos,
                    end: w[0].midpoint(&w[1]),
                })
                .collect(),
            // The boundary points lack a neighbor and emit nothing
            PathStrategy::CubicMidpoint => tail
                .windows(3)
                .map(|w| PathCommand::CubicTo {
                    control1: w[0].midpoint(&w[1]),
                    control2: w[1].pos,
                    end: w[1].midpoint(&w[2]),
                })
                .collect(),
        }
    }
}
