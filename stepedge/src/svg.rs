use crate::error::{EdgeError, Result};
use crate::model::{PathDescription, PathSegment, Point};
use std::fmt::Write as _;

// Ingestion caps for externally supplied path data
pub const MAX_PATH_BYTES: usize = 1024 * 1024;
pub const MAX_PATH_SEGMENTS: usize = 100_000;

fn num(v: f64) -> f64 {
    // avoid "-0" in the output
    if v == 0.0 { 0.0 } else { v }
}

pub fn to_path_data(path: &PathDescription) -> String {
    let mut d = String::new();
    for seg in &path.segments {
        // Writing into a String cannot fail.
        let _ = match *seg {
            PathSegment::Move { to } => write!(d, "M{} {}", num(to.x), num(to.y)),
            PathSegment::Line { to } => write!(d, "L{} {}", num(to.x), num(to.y)),
            PathSegment::Quad { ctrl, to } => {
                write!(d, "Q{} {} {} {}", num(ctrl.x), num(ctrl.y), num(to.x), num(to.y))
            }
            PathSegment::Cubic { c1, c2, to } => write!(
                d,
                "C{} {} {} {} {} {}",
                num(c1.x), num(c1.y), num(c2.x), num(c2.y), num(to.x), num(to.y)
            ),
            PathSegment::Close => write!(d, "Z"),
        };
    }
    d
}

struct Cursor<'a> {
    bytes: &'a [u8],
    i: usize,
}

impl<'a> Cursor<'a> {
    fn skip_ws(&mut self) {
        while self.i < self.bytes.len() && matches!(self.bytes[self.i], b' ' | b'\n' | b'\t' | b'\r' | b',') {
            self.i += 1;
        }
    }

    fn at_number(&mut self) -> bool {
        self.skip_ws();
        self.i < self.bytes.len() && matches!(self.bytes[self.i], b'0'..=b'9' | b'.' | b'-' | b'+')
    }

    fn number(&mut self) -> Result<f64> {
        self.skip_ws();
        let start = self.i;
        let b = self.bytes;
        if self.i < b.len() && matches!(b[self.i], b'-' | b'+') {
            self.i += 1;
        }
        let mut digits = 0;
        while self.i < b.len() && b[self.i].is_ascii_digit() {
            self.i += 1;
            digits += 1;
        }
        if self.i < b.len() && b[self.i] == b'.' {
            self.i += 1;
            while self.i < b.len() && b[self.i].is_ascii_digit() {
                self.i += 1;
                digits += 1;
            }
        }
        if digits == 0 {
            return Err(EdgeError::PathParse { pos: start, reason: "expected number" });
        }
        if self.i < b.len() && matches!(b[self.i], b'e' | b'E') {
            let mark = self.i;
            self.i += 1;
            if self.i < b.len() && matches!(b[self.i], b'-' | b'+') {
                self.i += 1;
            }
            let exp_start = self.i;
            while self.i < b.len() && b[self.i].is_ascii_digit() {
                self.i += 1;
            }
            if self.i == exp_start {
                self.i = mark;
            }
        }
        let s = std::str::from_utf8(&b[start..self.i])
            .map_err(|_| EdgeError::PathParse { pos: start, reason: "invalid utf-8" })?;
        let v: f64 = s.parse().map_err(|_| EdgeError::PathParse { pos: start, reason: "invalid number" })?;
        if !v.is_finite() {
            return Err(EdgeError::PathParse { pos: start, reason: "non-finite number" });
        }
        Ok(v)
    }

    fn point(&mut self, rel: bool, cur: Point) -> Result<Point> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(if rel { Point::new(cur.x + x, cur.y + y) } else { Point::new(x, y) })
    }
}

/// Parses SVG path data made of `M L H V Q C Z` commands (absolute and
/// relative) into absolute segments.
pub fn parse_path_data(d: &str) -> Result<PathDescription> {
    if d.len() > MAX_PATH_BYTES {
        return Err(EdgeError::PathParse { pos: 0, reason: "path data too large" });
    }
    let mut c = Cursor { bytes: d.as_bytes(), i: 0 };
    let mut out = PathDescription::new();
    let mut cur = Point::default();
    let mut sub_start = Point::default();
    let mut last_cmd: Option<u8> = None;

    loop {
        c.skip_ws();
        if c.i >= c.bytes.len() {
            break;
        }
        let ch = c.bytes[c.i];
        let cmd = if ch.is_ascii_alphabetic() {
            c.i += 1;
            ch
        } else {
            match last_cmd {
                // implicit repeat; coordinates after a moveto are linetos
                Some(b'M') => b'L',
                Some(b'm') => b'l',
                Some(b'Z') | Some(b'z') | None => {
                    return Err(EdgeError::PathParse { pos: c.i, reason: "expected command" })
                }
                Some(prev) => prev,
            }
        };
        let rel = cmd.is_ascii_lowercase();
        let seg = match cmd.to_ascii_uppercase() {
            b'M' => {
                cur = c.point(rel, cur)?;
                sub_start = cur;
                PathSegment::Move { to: cur }
            }
            b'L' => {
                cur = c.point(rel, cur)?;
                PathSegment::Line { to: cur }
            }
            b'H' => {
                let x = c.number()?;
                cur = Point::new(if rel { cur.x + x } else { x }, cur.y);
                PathSegment::Line { to: cur }
            }
            b'V' => {
                let y = c.number()?;
                cur = Point::new(cur.x, if rel { cur.y + y } else { y });
                PathSegment::Line { to: cur }
            }
            b'Q' => {
                let ctrl = c.point(rel, cur)?;
                cur = c.point(rel, cur)?;
                PathSegment::Quad { ctrl, to: cur }
            }
            b'C' => {
                let c1 = c.point(rel, cur)?;
                let c2 = c.point(rel, cur)?;
                cur = c.point(rel, cur)?;
                PathSegment::Cubic { c1, c2, to: cur }
            }
            b'Z' => {
                cur = sub_start;
                PathSegment::Close
            }
            _ => return Err(EdgeError::PathParse { pos: c.i - 1, reason: "unsupported command" }),
        };
        out.push(seg);
        if out.len() > MAX_PATH_SEGMENTS {
            return Err(EdgeError::PathParse { pos: c.i, reason: "too many segments" });
        }
        last_cmd = Some(cmd);
        if matches!(cmd, b'Z' | b'z') && c.at_number() {
            return Err(EdgeError::PathParse { pos: c.i, reason: "number after closepath" });
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_compact_commands() {
        let mut p = PathDescription::new();
        p.push(PathSegment::Move { to: Point::new(0.0, -0.0) });
        p.push(PathSegment::Line { to: Point::new(0.0, 84.0) });
        p.push(PathSegment::Quad { ctrl: Point::new(0.0, 100.0), to: Point::new(16.5, 100.0) });
        assert_eq!(to_path_data(&p), "M0 0L0 84Q0 100 16.5 100");
    }

    #[test]
    fn parses_generator_style_and_relative_data() {
        let p = parse_path_data("M0 0L 0,84Q 0,100 16,100 l10-5 h4 V3 z").unwrap();
        assert_eq!(p.len(), 7);
        assert_eq!(p.quad_segments(), vec![(Point::new(0.0, 100.0), Point::new(16.0, 100.0))]);
        assert_eq!(p.segments[3], PathSegment::Line { to: Point::new(26.0, 95.0) });
        assert_eq!(p.segments[5], PathSegment::Line { to: Point::new(30.0, 3.0) });
        assert_eq!(p.segments[6], PathSegment::Close);
    }

    #[test]
    fn implicit_lineto_after_moveto() {
        let p = parse_path_data("m1 1 2 2 1e1 -1.5e0").unwrap();
        assert_eq!(p.segments[1], PathSegment::Line { to: Point::new(3.0, 3.0) });
        assert_eq!(p.segments[2], PathSegment::Line { to: Point::new(13.0, 1.5) });
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_path_data("10 10").is_err());
        assert!(parse_path_data("M0 0 X 1 1").is_err());
        assert!(parse_path_data("M0").is_err());
        assert!(parse_path_data("").unwrap().is_empty());
    }

    #[test]
    fn output_parses_back_to_same_quads() {
        let d = "M0 0L0 20L0 74Q0 90 16 90L184 90Q200 90 200 106L200 180L200 200";
        let p = parse_path_data(d).unwrap();
        assert_eq!(to_path_data(&p), d);
    }
}
