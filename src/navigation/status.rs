//! Status string formatting
//!
//! # Grammar
//!
//! ```text
//! status := "(" int "," int "," dir ")" { "(" int "," int ")" }
//! dir    := "N" | "E" | "S" | "W"
//! ```
//!
//! Example: `(2,3,E)(0,1)(4,3)`. No whitespace anywhere. Obstacle groups
//! appear in detection order.

use super::engine::RobotState;
use crate::core::types::{Facing, Position};
use crate::error::{Error, Result};
use std::fmt::Write;

/// Render the robot state as a status string
pub fn format_status(state: &RobotState) -> String {
    let pos = state.position();
    let mut out = format!("({},{})", pos, state.facing());
    for cell in state.obstacles().iter() {
        // Writing into a String cannot fail
        let _ = write!(out, "({})", cell);
    }
    out
}

/// Decoded status string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub position: Position,
    pub facing: Facing,
    pub obstacles: Vec<Position>,
}

/// Parse a status string produced by [`format_status`]
pub fn parse_status(status: &str) -> Result<StatusReport> {
    let mut groups = groups(status)?.into_iter();

    let head = groups
        .next()
        .ok_or_else(|| invalid(status, "missing position group"))?;
    let [x, y, dir] = head[..] else {
        return Err(invalid(status, "position group needs x,y,dir"));
    };
    let facing = single_char(dir)
        .and_then(Facing::from_symbol)
        .ok_or_else(|| invalid(status, "unknown direction"))?;
    let position = Position::new(int(status, x)?, int(status, y)?);

    let obstacles = groups
        .map(|group| match group[..] {
            [ox, oy] => Ok(Position::new(int(status, ox)?, int(status, oy)?)),
            _ => Err(invalid(status, "obstacle group needs x,y")),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(StatusReport {
        position,
        facing,
        obstacles,
    })
}

/// Split `(a,b)(c,d,e)` into `[["a","b"],["c","d","e"]]`
fn groups(status: &str) -> Result<Vec<Vec<&str>>> {
    let mut rest = status;
    let mut out = Vec::new();
    while !rest.is_empty() {
        let inner = rest
            .strip_prefix('(')
            .ok_or_else(|| invalid(status, "expected '('"))?;
        let end = inner
            .find(')')
            .ok_or_else(|| invalid(status, "unterminated group"))?;
        out.push(inner[..end].split(',').collect());
        rest = &inner[end + 1..];
    }
    Ok(out)
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Integers as `Display` writes them: optional `-`, then digits
fn int(status: &str, s: &str) -> Result<i32> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(status, &format!("bad integer {:?}", s)));
    }
    s.parse()
        .map_err(|_| invalid(status, &format!("bad integer {:?}", s)))
}

fn invalid(status: &str, reason: &str) -> Error {
    Error::InvalidParameter(format!("malformed status {:?}: {}", status, reason))
}
