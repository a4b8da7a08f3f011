// Copyright 2026 the Draftgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG path data: parsing into any [`PathBuilder`], and writing back out.

use std::fmt::Write;

use tracing::debug;

use crate::{BezPath, PathBuilder, PathCursor, PathEl, Point, Vec2};

/// An error which can be returned when parsing SVG path data.
///
/// Parsing stops at the first error. Commands before it have already been
/// forwarded to the builder.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SvgParseError {
    /// A number was expected but not found.
    #[error("expected a number for '{command}' at offset {offset}")]
    MissingNumber {
        /// The command being parsed.
        command: char,
        /// Byte offset where the number should start.
        offset: usize,
    },
    /// A character that is not a path command.
    #[error("unknown command '{command}' at offset {offset}")]
    UnknownCommand {
        /// The offending character.
        command: char,
        /// Byte offset of the character.
        offset: usize,
    },
    /// The path data does not begin with a move.
    #[error("path data must start with a move, found '{command}' at offset {offset}")]
    MissingMoveTo {
        /// The first command.
        command: char,
        /// Byte offset of the command.
        offset: usize,
    },
    /// An arc flag other than `0` or `1`.
    #[error("invalid arc flag for '{command}' at offset {offset}")]
    InvalidFlag {
        /// The arc command being parsed.
        command: char,
        /// Byte offset of the flag.
        offset: usize,
    },
}

/// Parse SVG path data, replaying it onto `builder`.
///
/// All commands of the path mini-language are supported, in absolute and
/// relative form: `M`, `L`, `H`, `V`, `C`, `S`, `Q`, `T`, `A` and `Z`.
/// Separators may be whitespace or commas, and numbers may have a leading
/// `+` and an exponent. Arcs are replayed through [`PathBuilder::arc_to`].
///
/// This does not call [`PathBuilder::finish`].
///
/// # Examples
///
/// ```
/// use draftgeom::{parse_svg_path, BezPath, SvgParseError};
///
/// let mut path = BezPath::new();
/// parse_svg_path("m10 10 h5 v5 z", &mut path).unwrap();
/// assert_eq!(path.segments().count(), 3);
///
/// let err = parse_svg_path("M 10 10 L 5", &mut BezPath::new()).unwrap_err();
/// assert_eq!(err, SvgParseError::MissingNumber { command: 'L', offset: 11 });
/// ```
pub fn parse_svg_path<B: PathBuilder + ?Sized>(
    data: &str,
    builder: &mut B,
) -> Result<(), SvgParseError> {
    let result = Parser::new(data).run(builder);
    if let Err(err) = &result {
        debug!(%err, "aborted path data parse");
    }
    result
}

struct Parser<'a> {
    lexer: SvgLexer<'a>,
    current: Point,
    start: Point,
    cubic_ctrl: Option<Point>,
    quad_ctrl: Option<Point>,
}

impl<'a> Parser<'a> {
    fn new(data: &'a str) -> Parser<'a> {
        Parser {
            lexer: SvgLexer::new(data),
            current: Point::ZERO,
            start: Point::ZERO,
            cubic_ctrl: None,
            quad_ctrl: None,
        }
    }

    fn run<B: PathBuilder + ?Sized>(&mut self, builder: &mut B) -> Result<(), SvgParseError> {
        let mut last_cmd: Option<u8> = None;
        loop {
            self.lexer.skip_ws();
            let offset = self.lexer.ix;
            let Some(c) = self.lexer.peek() else {
                return Ok(());
            };
            let cmd = if c.is_ascii_alphabetic() {
                self.lexer.ix += 1;
                c
            } else {
                match last_cmd {
                    Some(_) if !is_number_start(c) => {
                        return Err(unknown(c, offset));
                    }
                    Some(b'M') => b'L',
                    Some(b'm') => b'l',
                    Some(b'Z' | b'z') | None => return Err(unknown(c, offset)),
                    Some(cmd) => cmd,
                }
            };
            if last_cmd.is_none() && !matches!(cmd, b'M' | b'm') {
                return Err(SvgParseError::MissingMoveTo {
                    command: cmd as char,
                    offset,
                });
            }
            self.command(cmd, offset, builder)?;
            last_cmd = Some(cmd);
        }
    }

    fn command<B: PathBuilder + ?Sized>(
        &mut self,
        cmd: u8,
        offset: usize,
        builder: &mut B,
    ) -> Result<(), SvgParseError> {
        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;
        match cmd {
            b'M' | b'm' => {
                let p = self.point(cmd)?;
                builder.move_to(p);
                self.start = p;
                self.current = p;
            }
            b'L' | b'l' => {
                let p = self.point(cmd)?;
                builder.line_to(p);
                self.current = p;
            }
            b'H' | b'h' => {
                let mut x = self.lexer.number(cmd)?;
                if cmd == b'h' {
                    x += self.current.x;
                }
                let p = Point::new(x, self.current.y);
                builder.line_to(p);
                self.current = p;
            }
            b'V' | b'v' => {
                let mut y = self.lexer.number(cmd)?;
                if cmd == b'v' {
                    y += self.current.y;
                }
                let p = Point::new(self.current.x, y);
                builder.line_to(p);
                self.current = p;
            }
            b'C' | b'c' => {
                let p1 = self.point(cmd)?;
                let p2 = self.point(cmd)?;
                let p3 = self.point(cmd)?;
                builder.curve_to(p1, p2, p3);
                cubic_ctrl = Some(p2);
                self.current = p3;
            }
            b'S' | b's' => {
                let p1 = reflect(self.current, self.cubic_ctrl);
                let p2 = self.point(cmd)?;
                let p3 = self.point(cmd)?;
                builder.curve_to(p1, p2, p3);
                cubic_ctrl = Some(p2);
                self.current = p3;
            }
            b'Q' | b'q' => {
                let p1 = self.point(cmd)?;
                let p2 = self.point(cmd)?;
                builder.quad_to(p1, p2);
                quad_ctrl = Some(p1);
                self.current = p2;
            }
            b'T' | b't' => {
                let p1 = reflect(self.current, self.quad_ctrl);
                let p2 = self.point(cmd)?;
                builder.quad_to(p1, p2);
                quad_ctrl = Some(p1);
                self.current = p2;
            }
            b'A' | b'a' => {
                let rx = self.lexer.number(cmd)?;
                let ry = self.lexer.number(cmd)?;
                let x_rotation = self.lexer.number(cmd)?;
                let large_arc = self.lexer.flag(cmd)?;
                let sweep = self.lexer.flag(cmd)?;
                let p = self.point(cmd)?;
                builder.arc_to(Vec2::new(rx, ry), x_rotation, large_arc, sweep, p);
                self.current = p;
            }
            b'Z' | b'z' => {
                builder.close_path();
                self.current = self.start;
            }
            _ => return Err(unknown(cmd, offset)),
        }
        self.cubic_ctrl = cubic_ctrl;
        self.quad_ctrl = quad_ctrl;
        Ok(())
    }

    /// A coordinate pair, made absolute for lowercase commands.
    fn point(&mut self, cmd: u8) -> Result<Point, SvgParseError> {
        let x = self.lexer.number(cmd)?;
        let y = self.lexer.number(cmd)?;
        let p = Point::new(x, y);
        if cmd.is_ascii_lowercase() {
            Ok(p + self.current.to_vec2())
        } else {
            Ok(p)
        }
    }
}

fn reflect(current: Point, ctrl: Option<Point>) -> Point {
    match ctrl {
        Some(ctrl) => current + (current - ctrl),
        None => current,
    }
}

fn unknown(c: u8, offset: usize) -> SvgParseError {
    SvgParseError::UnknownCommand {
        command: c as char,
        offset,
    }
}

fn is_number_start(c: u8) -> bool {
    c.is_ascii_digit() || matches!(c, b'-' | b'+' | b'.')
}

struct SvgLexer<'a> {
    data: &'a str,
    ix: usize,
}

impl<'a> SvgLexer<'a> {
    fn new(data: &'a str) -> SvgLexer<'a> {
        SvgLexer { data, ix: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.as_bytes().get(self.ix).copied()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !(c == b' ' || c == 9 || c == 10 || c == 12 || c == 13) {
                break;
            }
            self.ix += 1;
        }
    }

    fn opt_comma(&mut self) {
        self.skip_ws();
        if self.peek() == Some(b',') {
            self.ix += 1;
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.ix;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.ix += 1;
        }
        self.ix - start
    }

    fn number(&mut self, cmd: u8) -> Result<f64, SvgParseError> {
        self.skip_ws();
        let start = self.ix;
        let missing = SvgParseError::MissingNumber {
            command: cmd as char,
            offset: start,
        };
        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.ix += 1;
        }
        let mut digits = self.skip_digits();
        if self.peek() == Some(b'.') {
            self.ix += 1;
            digits += self.skip_digits();
        }
        if digits == 0 {
            self.ix = start;
            return Err(missing);
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mantissa_end = self.ix;
            self.ix += 1;
            if matches!(self.peek(), Some(b'-' | b'+')) {
                self.ix += 1;
            }
            if self.skip_digits() == 0 {
                self.ix = mantissa_end;
            }
        }
        let value = self.data[start..self.ix].parse().map_err(|_| missing)?;
        self.opt_comma();
        Ok(value)
    }

    /// An arc flag: a single `0` or `1`, which need not be followed by a
    /// separator.
    fn flag(&mut self, cmd: u8) -> Result<bool, SvgParseError> {
        self.skip_ws();
        let offset = self.ix;
        let value = match self.peek() {
            Some(b'0') => false,
            Some(b'1') => true,
            _ => {
                return Err(SvgParseError::InvalidFlag {
                    command: cmd as char,
                    offset,
                })
            }
        };
        self.ix += 1;
        self.opt_comma();
        Ok(value)
    }
}

/// Numeric precision of written path data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Precision {
    /// Coordinates are rounded to `f32` and written in the shortest form that
    /// reads back to the same `f32`.
    Float,
    /// Coordinates are written in the shortest form that reads back to the
    /// same `f64`.
    #[default]
    Double,
}

/// A [`PathBuilder`] that writes SVG path data.
///
/// Coordinates are absolute. Lines parallel to an axis use the `H` and `V`
/// shortcuts, and negative zero is written as `0`.
///
/// # Examples
///
/// ```
/// use draftgeom::{PathBuilder, Point, Precision, SvgPathWriter};
///
/// let mut writer = SvgPathWriter::new(Precision::Double);
/// writer.move_to(Point::new(0.0, 0.5));
/// writer.line_to(Point::new(3.0, 0.5));
/// writer.line_to(Point::new(1.0, -2.0));
/// writer.close_path();
/// assert_eq!(writer.as_str(), "M0 0.5H3L1 -2Z");
/// ```
#[derive(Clone, Debug, Default)]
pub struct SvgPathWriter {
    out: String,
    precision: Precision,
    cursor: PathCursor,
}

impl SvgPathWriter {
    /// A writer with empty output.
    pub fn new(precision: Precision) -> SvgPathWriter {
        SvgPathWriter {
            out: String::new(),
            precision,
            cursor: PathCursor::new(),
        }
    }

    /// The path data written so far.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consume the writer, returning the path data.
    #[inline]
    pub fn into_string(self) -> String {
        self.out
    }

    fn command(&mut self, letter: char, coords: &[f64]) {
        self.out.push(letter);
        for (i, &v) in coords.iter().enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            self.number(v);
        }
    }

    fn number(&mut self, v: f64) {
        // Writing to a `String` cannot fail.
        let _ = match self.precision {
            Precision::Float => {
                let v = v as f32;
                write!(self.out, "{}", if v == 0.0 { 0.0 } else { v })
            }
            Precision::Double => write!(self.out, "{}", if v == 0.0 { 0.0 } else { v }),
        };
    }
}

impl PathBuilder for SvgPathWriter {
    fn move_to(&mut self, p: Point) {
        self.command('M', &[p.x, p.y]);
        self.cursor.push(PathEl::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        match self.cursor.last_point() {
            Some(last) if last.y == p.y && last.x != p.x => self.command('H', &[p.x]),
            Some(last) if last.x == p.x && last.y != p.y => self.command('V', &[p.y]),
            _ => self.command('L', &[p.x, p.y]),
        }
        self.cursor.push(PathEl::LineTo(p));
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        self.command('Q', &[p1.x, p1.y, p2.x, p2.y]);
        self.cursor.push(PathEl::QuadTo(p1, p2));
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.command('C', &[p1.x, p1.y, p2.x, p2.y, p3.x, p3.y]);
        self.cursor.push(PathEl::CurveTo(p1, p2, p3));
    }

    fn close_path(&mut self) {
        self.out.push('Z');
        self.cursor.push(PathEl::ClosePath);
    }

    fn last_point(&self) -> Option<Point> {
        self.cursor.last_point()
    }

    fn last_control_point(&self) -> Option<Point> {
        self.cursor.last_control_point()
    }
}

impl BezPath {
    /// Create a path from SVG path data.
    pub fn from_svg(data: &str) -> Result<BezPath, SvgParseError> {
        let mut path = BezPath::new();
        parse_svg_path(data, &mut path)?;
        Ok(path)
    }

    /// Convert the path to SVG path data, at full precision.
    pub fn to_svg(&self) -> String {
        self.to_svg_with_precision(Precision::Double)
    }

    /// Convert the path to SVG path data.
    pub fn to_svg_with_precision(&self, precision: Precision) -> String {
        let mut writer = SvgPathWriter::new(precision);
        self.replay(&mut writer);
        writer.into_string()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{
        parse_svg_path, BezPath, ParamCurve, PathBuilder, PathEl, Point, Precision,
        SvgParseError, SvgPathWriter,
    };

    #[test]
    fn implicit_lines_after_move() {
        let path = BezPath::from_svg("m10 10 100 0 0 100 -100 0z").unwrap();
        assert_eq!(path.segments().count(), 4);
        assert_eq!(path.elements()[2], PathEl::LineTo(Point::new(110.0, 110.0)));
    }

    #[test]
    fn compact_numbers() {
        let path = BezPath::from_svg("M-1.5.5L+2e1-3E-1,4.,.25").unwrap();
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(-1.5, 0.5)),
                PathEl::LineTo(Point::new(20.0, -0.3)),
                PathEl::LineTo(Point::new(4.0, 0.25)),
            ]
        );
    }

    #[test]
    fn smooth_commands_reflect_previous_control() {
        let path = BezPath::from_svg("M0 0 C0 10 10 10 10 0 S20 -10 20 0 Q25 5 30 0 T40 0").unwrap();
        assert_eq!(
            path.elements()[2],
            PathEl::CurveTo(Point::new(10.0, -10.0), Point::new(20.0, -10.0), Point::new(20.0, 0.0))
        );
        assert_eq!(
            path.elements()[4],
            PathEl::QuadTo(Point::new(35.0, -5.0), Point::new(40.0, 0.0))
        );
        // S after a non-cubic uses the current point as first control.
        let path = BezPath::from_svg("M0 0 L5 5 s5 5 10 0").unwrap();
        assert_eq!(
            path.elements()[2],
            PathEl::CurveTo(Point::new(5.0, 5.0), Point::new(10.0, 10.0), Point::new(15.0, 5.0))
        );
    }

    #[test]
    fn relative_commands_after_close_start_at_subpath_start() {
        let path = BezPath::from_svg("M10 10 h10 v10 z l5 0").unwrap();
        assert_eq!(path.elements()[4], PathEl::LineTo(Point::new(15.0, 10.0)));
    }

    #[test]
    fn arcs_with_compact_flags() {
        let path = BezPath::from_svg("M0 0 a5 5 0 1110 0").unwrap();
        assert_eq!(path.last_point(), Some(Point::new(10.0, 0.0)));
        assert_eq!(path.elements().len(), 3);
    }

    #[test]
    fn errors_carry_command_and_offset() {
        let mut path = BezPath::new();
        let err = parse_svg_path("M0 0 L10 0 X", &mut path).unwrap_err();
        assert_eq!(
            err,
            SvgParseError::UnknownCommand {
                command: 'X',
                offset: 11
            }
        );
        // Output before the error stands.
        assert_eq!(path.elements().len(), 2);
        assert_eq!(err.to_string(), "unknown command 'X' at offset 11");

        assert_eq!(
            BezPath::from_svg("L1 1").unwrap_err(),
            SvgParseError::MissingMoveTo {
                command: 'L',
                offset: 0
            }
        );
        assert_eq!(
            BezPath::from_svg("M0 0 C1 1 2").unwrap_err(),
            SvgParseError::MissingNumber {
                command: 'C',
                offset: 11
            }
        );
        assert_eq!(
            BezPath::from_svg("M0 0 A5 5 0 2 0 1 1").unwrap_err(),
            SvgParseError::InvalidFlag {
                command: 'A',
                offset: 12
            }
        );
        assert!(BezPath::from_svg("").unwrap().elements().is_empty());
    }

    #[test]
    fn writer_shortcuts_and_precision() {
        let path = BezPath::from_svg("M0 0 L10 0 L10 -0 L10 5 Q1 2 3 4 C5 6 7 8 9 10 Z").unwrap();
        assert_eq!(path.to_svg(), "M0 0H10L10 0V5Q1 2 3 4C5 6 7 8 9 10Z");

        let mut writer = SvgPathWriter::new(Precision::Float);
        writer.move_to(Point::new(0.1, -0.0));
        assert_eq!(writer.as_str(), "M0.1 0");
        let mut writer = SvgPathWriter::new(Precision::Double);
        writer.move_to(Point::new(0.1 + 0.2, 1e-7));
        assert_eq!(writer.into_string(), "M0.30000000000000004 0.0000001");
    }

    fn point() -> impl Strategy<Value = Point> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn element() -> impl Strategy<Value = PathEl> {
        prop_oneof![
            point().prop_map(PathEl::LineTo),
            (point(), point()).prop_map(|(p1, p2)| PathEl::QuadTo(p1, p2)),
            (point(), point(), point()).prop_map(|(p1, p2, p3)| PathEl::CurveTo(p1, p2, p3)),
            Just(PathEl::ClosePath),
            point().prop_map(PathEl::MoveTo),
        ]
    }

    proptest! {
        #[test]
        fn text_round_trip(start in point(), rest in prop::collection::vec(element(), 0..20)) {
            let mut path = BezPath::new();
            path.move_to(start);
            path.extend(rest);
            let text = path.to_svg();
            let parsed = BezPath::from_svg(&text).unwrap();
            prop_assert_eq!(&parsed, &path);

            let text = path.to_svg_with_precision(Precision::Float);
            let parsed = BezPath::from_svg(&text).unwrap();
            prop_assert_eq!(parsed.elements().len(), path.elements().len());
            for (a, b) in parsed.segments().zip(path.segments()) {
                prop_assert!(a.end().distance(b.end()) < 1e-3);
            }
        }
    }
}
