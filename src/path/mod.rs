//! Stroke path data → cubic bezier segments.
//!
//! Only the commands a stroke centerline needs are understood: move,
//! line, cubic and smooth cubic, plus close. Lines become degenerate
//! cubics whose handles sit on their endpoints. Everything else
//! (H, V, Q, T, A) is skipped without moving the pen.

mod tokenize;

pub use tokenize::{command_groups, CommandGroup, Token, Tokenizer};

use kurbo::{CubicBez, Point};

/// Parser state carried from one command to the next within a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    /// Current point.
    pub current: Point,
    /// Second control point of the preceding cubic, used by S/s reflection.
    pub prev_ctrl: Option<Point>,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            current: Point::ZERO,
            prev_ctrl: None,
        }
    }
}

/// Parse one stroke's path data into its ordered cubic segments.
pub fn parse(data: &str) -> Vec<CubicBez> {
    let mut segments = Vec::new();
    let mut pen = Pen::default();
    for group in command_groups(data) {
        pen = apply(&group, pen, &mut segments);
    }
    segments
}

/// Apply one command group, appending its segments, and return the new pen.
pub fn apply(group: &CommandGroup, pen: Pen, out: &mut Vec<CubicBez>) -> Pen {
    let relative = group.letter.is_ascii_lowercase();
    match group.letter.to_ascii_uppercase() {
        b'M' => move_to(&group.args, relative, pen, out),
        b'L' => group
            .args
            .chunks_exact(2)
            .fold(pen, |pen, a| line_to(resolve(pen, relative, a[0], a[1]), pen, out)),
        b'C' => group.args.chunks_exact(6).fold(pen, |pen, a| {
            let c1 = resolve(pen, relative, a[0], a[1]);
            let c2 = resolve(pen, relative, a[2], a[3]);
            let end = resolve(pen, relative, a[4], a[5]);
            curve_to(pen.current, c1, c2, end, out)
        }),
        b'S' => group.args.chunks_exact(4).fold(pen, |pen, a| {
            let c2 = resolve(pen, relative, a[0], a[1]);
            let end = resolve(pen, relative, a[2], a[3]);
            let c1 = reflect(pen);
            curve_to(pen.current, c1, c2, end, out)
        }),
        // Close and every unsupported command only forget the handle.
        _ => Pen {
            prev_ctrl: None,
            ..pen
        },
    }
}

/// Move, then treat any further pairs as implicit line-tos.
fn move_to(args: &[f64], relative: bool, pen: Pen, out: &mut Vec<CubicBez>) -> Pen {
    let mut pairs = args.chunks_exact(2);
    let Some(first) = pairs.next() else {
        return Pen {
            prev_ctrl: None,
            ..pen
        };
    };
    let start = Pen {
        current: resolve(pen, relative, first[0], first[1]),
        prev_ctrl: None,
    };
    pairs.fold(start, |pen, a| line_to(resolve(pen, relative, a[0], a[1]), pen, out))
}

fn line_to(end: Point, pen: Pen, out: &mut Vec<CubicBez>) -> Pen {
    out.push(CubicBez::new(pen.current, pen.current, end, end));
    Pen {
        current: end,
        prev_ctrl: None,
    }
}

fn curve_to(start: Point, c1: Point, c2: Point, end: Point, out: &mut Vec<CubicBez>) -> Pen {
    out.push(CubicBez::new(start, c1, c2, end));
    Pen {
        current: end,
        prev_ctrl: Some(c2),
    }
}

/// First handle of a smooth cubic: the previous second handle mirrored
/// through the current point, or the current point when there is none.
fn reflect(pen: Pen) -> Point {
    match pen.prev_ctrl {
        Some(prev) => Point::new(2.0 * pen.current.x - prev.x, 2.0 * pen.current.y - prev.y),
        None => pen.current,
    }
}

fn resolve(pen: Pen, relative: bool, x: f64, y: f64) -> Point {
    if relative {
        Point::new(pen.current.x + x, pen.current.y + y)
    } else {
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(a: (f64, f64), b: (f64, f64)) -> CubicBez {
        CubicBez::new(a, a, b, b)
    }

    #[test]
    fn absolute_move_and_lines() {
        let segs = parse("M10,10 L20,10 30,20");
        assert_eq!(segs, vec![line((10.0, 10.0), (20.0, 10.0)), line((20.0, 10.0), (30.0, 20.0))]);
    }

    #[test]
    fn move_with_extra_pairs_draws_lines() {
        let segs = parse("m5,5 10,0 0,10");
        assert_eq!(segs, vec![line((5.0, 5.0), (15.0, 5.0)), line((15.0, 5.0), (15.0, 15.0))]);
    }

    #[test]
    fn relative_cubic_is_relative_to_segment_start() {
        let segs = parse("M10,10c1,2 3,4 5,6 1,1 2,2 3,3");
        assert_eq!(
            segs,
            vec![
                CubicBez::new((10.0, 10.0), (11.0, 12.0), (13.0, 14.0), (15.0, 16.0)),
                CubicBez::new((15.0, 16.0), (16.0, 17.0), (17.0, 18.0), (18.0, 19.0)),
            ]
        );
    }

    #[test]
    fn smooth_cubic_reflects_previous_handle() {
        let segs = parse("M0,0C0,10 10,10 10,0S20,-10 20,0");
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1].p1, Point::new(10.0, -10.0));
        assert_eq!(segs[1].p2, Point::new(20.0, -10.0));
        assert_eq!(segs[1].p3, Point::new(20.0, 0.0));
    }

    #[test]
    fn smooth_cubic_without_previous_cubic_uses_pen() {
        let segs = parse("M3,4s1,1 2,2");
        assert_eq!(segs, vec![CubicBez::new((3.0, 4.0), (3.0, 4.0), (4.0, 5.0), (5.0, 6.0))]);

        // A line in between clears the handle memo.
        let segs = parse("M0,0C1,1 2,1 3,0L4,0S6,1 7,0");
        assert_eq!(segs[2].p1, Point::new(4.0, 0.0));
    }

    #[test]
    fn unsupported_commands_keep_pen_and_clear_handle() {
        let segs = parse("M0,0C0,1 1,1 1,0H50Q9,9 9,9S2,1 2,0");
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1].p0, Point::new(1.0, 0.0));
        assert_eq!(segs[1].p1, Point::new(1.0, 0.0));
    }

    #[test]
    fn close_clears_handle() {
        let segs = parse("M0,0C0,1 1,1 1,0zS2,1 2,0");
        assert_eq!(segs[1].p1, Point::new(1.0, 0.0));
    }

    #[test]
    fn truncated_groups_are_dropped() {
        assert_eq!(parse("M0,0L5,5 6"), vec![line((0.0, 0.0), (5.0, 5.0))]);
        assert!(parse("M0,0C1,1 2,2").is_empty());
        assert!(parse("M").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn lone_move_has_no_segments() {
        assert!(parse("M10,10").is_empty());
    }

    #[test]
    fn kanjivg_stroke() {
        let segs = parse("M31.5,24.5c1.12,0.25,2.75,0.38,4.5,0.25c12.25-0.88,38.13-3.38,53.5-3.5");
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].p0, Point::new(31.5, 24.5));
        assert_eq!(segs[1].p0, segs[0].p3);
        assert!((segs[1].p3.x - 89.5).abs() < 1e-9);
        assert!((segs[1].p3.y - 21.25).abs() < 1e-9);
    }
}
