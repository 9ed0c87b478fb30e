//! Static placement helpers. Everything here runs once, while a scene is being declared.

use crate::{
    foundation::core::{FRAME_HEIGHT, FRAME_WIDTH, Point, Rect, Size, Vec2},
    foundation::error::{ReelError, ReelResult},
};

/// Unit direction up.
pub const UP: Vec2 = Vec2::new(0.0, 1.0);
/// Unit direction down.
pub const DOWN: Vec2 = Vec2::new(0.0, -1.0);
/// Unit direction left.
pub const LEFT: Vec2 = Vec2::new(-1.0, 0.0);
/// Unit direction right.
pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);
/// Up-left diagonal.
pub const UL: Vec2 = Vec2::new(-1.0, 1.0);
/// Up-right diagonal.
pub const UR: Vec2 = Vec2::new(1.0, 1.0);

/// Small gap between neighbours.
pub const SMALL_BUFF: f64 = 0.1;
/// Default gap between an object and the frame edge.
pub const MED_LARGE_BUFF: f64 = 0.5;
/// Default gap for `next_to`.
pub const DEFAULT_BUFF: f64 = 0.25;

// Em height in scene units per point of font size.
const EM_PER_PT: f64 = 0.0125;
const ADVANCE_PER_EM: f64 = 0.55;
const LINE_HEIGHT_PER_EM: f64 = 1.2;

/// Em height in scene units of a font set at `font_size` points.
pub fn em(font_size: f64) -> f64 {
    font_size * EM_PER_PT
}

/// Line advance as a multiple of the em height.
pub const LINE_HEIGHT: f64 = LINE_HEIGHT_PER_EM;

/// Approximate extent of `content` set at `font_size`.
pub fn text_extent(content: &str, font_size: f64) -> Size {
    let em = em(font_size);
    let lines = content.lines().count().max(1);
    let widest = content
        .lines()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    Size::new(
        widest as f64 * em * ADVANCE_PER_EM,
        lines as f64 * em * LINE_HEIGHT_PER_EM,
    )
}

/// Plain-text rendering of one TeX part (`\vec{King}` → `King`, `\approx` → `≈`).
pub fn tex_display(part: &str) -> String {
    let mut out = String::new();
    let mut rest = part;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let name_len = after
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(after.len());
        let name = &after[..name_len];
        rest = &after[name_len..];
        match name {
            "approx" => out.push('≈'),
            "vec" => {
                if let Some(body) = rest.strip_prefix('{')
                    && let Some(close) = body.find('}')
                {
                    out.push_str(&body[..close]);
                    rest = &body[close + 1..];
                }
            }
            _ => {}
        }
    }
    out.push_str(rest);
    out
}

/// Strokes traced when drawing one TeX part: one per visible glyph, plus the arrow of `\vec`.
pub fn tex_strokes(part: &str) -> usize {
    let glyphs = tex_display(part)
        .chars()
        .filter(|c| !c.is_whitespace())
        .count();
    glyphs + part.matches(r"\vec").count()
}

/// Cell centers of a `rows × cols` grid holding `sizes` in row-major order, centered on the
/// origin. Columns are as wide as their widest item, rows as tall as their tallest.
pub fn grid_positions(sizes: &[Size], rows: usize, cols: usize, buff: f64) -> ReelResult<Vec<Point>> {
    if rows == 0 || cols == 0 {
        return Err(ReelError::validation("grid must have at least one row and column"));
    }
    if sizes.len() > rows * cols {
        return Err(ReelError::validation(format!(
            "{} items do not fit a {rows}x{cols} grid",
            sizes.len()
        )));
    }

    let mut col_w = vec![0.0f64; cols];
    let mut row_h = vec![0.0f64; rows];
    for (i, s) in sizes.iter().enumerate() {
        let (r, c) = (i / cols, i % cols);
        col_w[c] = col_w[c].max(s.width);
        row_h[r] = row_h[r].max(s.height);
    }

    let total_w: f64 = col_w.iter().sum::<f64>() + buff * (cols - 1) as f64;
    let total_h: f64 = row_h.iter().sum::<f64>() + buff * (rows - 1) as f64;

    let mut xs = Vec::with_capacity(cols);
    let mut x = -total_w / 2.0;
    for w in &col_w {
        xs.push(x + w / 2.0);
        x += w + buff;
    }
    let mut ys = Vec::with_capacity(rows);
    let mut y = total_h / 2.0;
    for h in &row_h {
        ys.push(y - h / 2.0);
        y -= h + buff;
    }

    Ok((0..sizes.len())
        .map(|i| Point::new(xs[i % cols], ys[i / cols]))
        .collect())
}

/// Center for an object of `size` placed beside `anchor` in direction `dir` with gap `buff`.
///
/// Each component of `dir` selects an edge (or the center, for zero) of both rectangles.
pub fn next_to(anchor: Rect, size: Size, dir: Vec2, buff: f64) -> Point {
    let c = anchor.center();
    let x = c.x + dir.x * (anchor.width() / 2.0 + buff + size.width / 2.0);
    let y = c.y + dir.y * (anchor.height() / 2.0 + buff + size.height / 2.0);
    Point::new(x, y)
}

/// Center for an object of `size` currently centered at `current`, pushed against the frame
/// edge in direction `dir`.
pub fn to_edge(current: Point, size: Size, dir: Vec2, buff: f64) -> Point {
    let x = if dir.x == 0.0 {
        current.x
    } else {
        dir.x * (FRAME_WIDTH / 2.0 - buff - size.width / 2.0)
    };
    let y = if dir.y == 0.0 {
        current.y
    } else {
        dir.y * (FRAME_HEIGHT / 2.0 - buff - size.height / 2.0)
    };
    Point::new(x, y)
}

/// Point on the boundary of `rect` in direction `dir` (edge midpoints and corners).
pub fn edge_point(rect: Rect, dir: Vec2) -> Point {
    let c = rect.center();
    Point::new(
        c.x + dir.x * rect.width() / 2.0,
        c.y + dir.y * rect.height() / 2.0,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layout.rs"]
mod tests;
