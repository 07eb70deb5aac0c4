use std::fmt;

use egui::Pos2;

/// A single path-drawing command in absolute coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo {
        to: Pos2,
    },
    LineTo {
        to: Pos2,
    },
    QuadraticTo {
        control: Pos2,
        end: Pos2,
    },
    CubicTo {
        control1: Pos2,
        control2: Pos2,
        end: Pos2,
    },
}

impl PathCommand {
    /// Where the pen is after this command
    pub fn end(&self) -> Pos2 {
        match *self {
            PathCommand::MoveTo { to } | PathCommand::LineTo { to } => to,
            PathCommand::QuadraticTo { end, .. } | PathCommand::CubicTo { end, .. } => end,
        }
    }
}

/// SVG path data: `M x y`, `L x y`, `Q cx cy, x y`, `C c1x c1y, c2x c2y, x y`
impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCommand::MoveTo { to } => write!(f, "M {} {}", to.x, to.y),
            PathCommand::LineTo { to } => write!(f, "L {} {}", to.x, to.y),
            PathCommand::QuadraticTo { control, end } => {
                write!(f, "Q {} {}, {} {}", control.x, control.y, end.x, end.y)
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => write!(
                f,
                "C {} {}, {} {}, {} {}",
                control1.x, control1.y, control2.x, control2.y, end.x, end.y
            ),
        }
    }
}
