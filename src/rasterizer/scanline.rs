//! Scanline decomposition of triangles into horizontal spans
//!
//! A triangle is split into its long edge (the one covering the full
//! vertical extent) and two short edges. Walking the long edge against each
//! short edge yields one `Span` per covered row:
//!
//! ```text
//!        v0
//!        /|
//!   s0  / |
//!      /  |  long
//!   v1 ---|  <- rows above v1 come from (long, s0), the rest from (long, s1)
//!      \  |
//!   s1  \ |
//!        \|
//!        v2
//! ```

use std::ops::Range;

use super::math::{factor, lerp, snap};
use super::types::{Color, Vertex};

/// One side of a triangle with a color at each endpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub color1: Color,
    pub x1: i32,
    pub y1: i32,
    pub color2: Color,
    pub x2: i32,
    pub y2: i32,
}

impl Edge {
    pub fn new(color1: Color, x1: i32, y1: i32, color2: Color, x2: i32, y2: i32) -> Self {
        Self { color1, x1, y1, color2, x2, y2 }
    }

    /// Edge between two vertices, snapped to the nearest pixel
    pub fn between(a: &Vertex, b: &Vertex) -> Self {
        Self::new(
            a.color,
            snap(a.pos.x),
            snap(a.pos.y),
            b.color,
            snap(b.pos.x),
            snap(b.pos.y),
        )
    }

    /// Same edge with endpoints swapped (together with their colors) so that y1 <= y2
    pub fn ordered(self) -> Self {
        if self.y1 > self.y2 {
            Self::new(self.color2, self.x2, self.y2, self.color1, self.x1, self.y1)
        } else {
            self
        }
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Fractional position of row y along the edge (0.0 for horizontal edges)
    pub fn factor_at(&self, y: i32) -> f32 {
        factor(y, self.y1, self.y2)
    }

    /// X coordinate and color where the edge crosses row y
    pub fn sample(&self, y: i32) -> (f32, Color) {
        let t = self.factor_at(y);
        (
            lerp(self.x1 as f32, self.x2 as f32, t),
            self.color1.lerp(self.color2, t),
        )
    }
}

/// A horizontal run of pixels on a single row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub color1: Color,
    pub x1: i32,
    pub color2: Color,
    pub x2: i32,
}

impl Span {
    pub fn new(color1: Color, x1: i32, color2: Color, x2: i32) -> Self {
        Self { color1, x1, color2, x2 }
    }

    /// Same span with endpoints swapped (together with their colors) so that x1 <= x2
    pub fn ordered(self) -> Self {
        if self.x1 > self.x2 {
            Self::new(self.color2, self.x2, self.color1, self.x1)
        } else {
            self
        }
    }

    /// Number of pixels covered (endpoints inclusive)
    pub fn pixel_count(&self) -> u32 {
        self.x1.abs_diff(self.x2) + 1
    }

    pub fn factor_at(&self, x: i32) -> f32 {
        factor(x, self.x1, self.x2)
    }

    pub fn color_at(&self, x: i32) -> Color {
        self.color1.lerp(self.color2, self.factor_at(x))
    }
}

/// The three ordered edges of a triangle split into (long, short, short)
pub fn triangle_edges(v1: &Vertex, v2: &Vertex, v3: &Vertex) -> (Edge, Edge, Edge) {
    let edges = [
        Edge::between(v1, v2).ordered(),
        Edge::between(v2, v3).ordered(),
        Edge::between(v3, v1).ordered(),
    ];

    // First edge with the greatest height wins ties
    let mut long = 0;
    for (i, edge) in edges.iter().enumerate() {
        if edge.height() > edges[long].height() {
            long = i;
        }
    }

    (edges[long], edges[(long + 1) % 3], edges[(long + 2) % 3])
}

/// Emit every span of a triangle as `(y, span)`, top to bottom
pub fn triangle_spans(v1: &Vertex, v2: &Vertex, v3: &Vertex, emit: impl FnMut(i32, Span)) {
    triangle_spans_in(v1, v2, v3, i32::MIN..i32::MAX, emit);
}

/// Like [`triangle_spans`] but only for rows inside `rows`
///
/// Each row of the triangle is emitted exactly once. Triangles whose
/// vertices all share one row collapse to a single span between the
/// leftmost and rightmost vertex (a single pixel if they coincide). Other
/// zero-area triangles are drawn as a line along their long edge.
pub fn triangle_spans_in(
    v1: &Vertex,
    v2: &Vertex,
    v3: &Vertex,
    rows: Range<i32>,
    mut emit: impl FnMut(i32, Span),
) {
    let (long, short1, short2) = triangle_edges(v1, v2, v3);

    if long.height() == 0 {
        if rows.contains(&long.y1) {
            emit(long.y1, flat_span(&[long, short1, short2]));
        }
        return;
    }

    if snapped_area(v1, v2, v3) == 0 {
        line_spans(&long, &rows, &mut emit);
        return;
    }

    spans_between_edges(&long, &short1, &rows, &mut emit);
    spans_between_edges(&long, &short2, &rows, &mut emit);
}

/// Walk the rows shared by the long edge and one short edge
///
/// Both edges must be ordered. The short edge owns its rows half-open,
/// except for the bottom row of the triangle, so the row where the two
/// short edges meet is only produced once.
pub fn spans_between_edges(
    long: &Edge,
    short: &Edge,
    rows: &Range<i32>,
    emit: &mut impl FnMut(i32, Span),
) {
    if short.height() == 0 {
        return;
    }

    let first = long.y1.max(short.y1).max(rows.start);
    let last = if short.y2 == long.y2 { short.y2 } else { short.y2 - 1 };
    let last = last.min(long.y2).min(rows.end.saturating_sub(1));

    for y in first..=last {
        let (long_x, long_color) = long.sample(y);
        let (short_x, short_color) = short.sample(y);
        emit(y, Span::new(long_color, snap(long_x), short_color, snap(short_x)));
    }
}

/// Twice the signed area of the triangle after snapping to pixels
fn snapped_area(v1: &Vertex, v2: &Vertex, v3: &Vertex) -> i64 {
    let [(x1, y1), (x2, y2), (x3, y3)] =
        [v1, v2, v3].map(|v| (i64::from(snap(v.pos.x)), i64::from(snap(v.pos.y))));
    (x2 - x1) * (y3 - y1) - (y2 - y1) * (x3 - x1)
}

/// Spans covering the pixels of an ordered, non-flat edge drawn as a line
///
/// Steep edges get one pixel per row. Shallow edges step one pixel per
/// column and each row takes the columns whose rounded Y lands on it, so
/// the line has no gaps.
fn line_spans(edge: &Edge, rows: &Range<i32>, emit: &mut impl FnMut(i32, Span)) {
    let first = edge.y1.max(rows.start);
    let last = edge.y2.min(rows.end.saturating_sub(1));

    let dx = i64::from(edge.x2) - i64::from(edge.x1);
    let dy = i64::from(edge.height());
    let run = dx.abs();

    if run <= dy {
        for y in first..=last {
            let (x, color) = edge.sample(y);
            let x = snap(x);
            emit(y, Span::new(color, x, color, x));
        }
        return;
    }

    let step = dx.signum();
    let column = |i: i64| (i64::from(edge.x1) + step * i) as i32;
    let color = |i: i64| edge.color1.lerp(edge.color2, i as f32 / run as f32);

    // Column i lands on row y1 + k when (2k - 1) * run <= 2 * i * dy < (2k + 1) * run
    for y in first..=last {
        let k = i64::from(y) - i64::from(edge.y1);
        let start = div_ceil((2 * k - 1) * run, 2 * dy).max(0);
        let end = (div_ceil((2 * k + 1) * run, 2 * dy) - 1).min(run);
        if start > end {
            continue;
        }
        emit(y, Span::new(color(start), column(start), color(end), column(end)));
    }
}

fn div_ceil(a: i64, b: i64) -> i64 {
    let q = a.div_euclid(b);
    if a.rem_euclid(b) != 0 {
        q + 1
    } else {
        q
    }
}

fn flat_span(edges: &[Edge]) -> Span {
    let points = edges.iter().flat_map(|e| [(e.x1, e.color1), (e.x2, e.color2)]);

    let mut left = (edges[0].x1, edges[0].color1);
    let mut right = left;
    for (x, color) in points {
        if x < left.0 {
            left = (x, color);
        }
        if x > right.0 {
            right = (x, color);
        }
    }

    Span::new(left.1, left.0, right.1, right.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn collect(v1: Vertex, v2: Vertex, v3: Vertex) -> Vec<(i32, Span)> {
        let mut spans = Vec::new();
        triangle_spans(&v1, &v2, &v3, |y, span| spans.push((y, span)));
        spans
    }

    #[test]
    fn test_edge_between_rounds_to_nearest() {
        let a = Vertex::new(1.4, 2.6, Color::RED);
        let b = Vertex::new(-0.6, 9.5, Color::BLUE);
        let edge = Edge::between(&a, &b);
        assert_eq!((edge.x1, edge.y1, edge.x2, edge.y2), (1, 3, -1, 10));
        assert_eq!(edge.color1, Color::RED);
    }

    #[test]
    fn test_edge_ordered_swaps_colors_with_points() {
        let edge = Edge::new(Color::RED, 0, 10, Color::BLUE, 5, 2).ordered();
        assert_eq!((edge.x1, edge.y1, edge.x2, edge.y2), (5, 2, 0, 10));
        assert_eq!(edge.color1, Color::BLUE);
        assert_eq!(edge.color2, Color::RED);
    }

    #[test]
    fn test_edge_sample() {
        let edge = Edge::new(Color::BLACK, 0, 0, Color::WHITE, 10, 10);
        let (x, color) = edge.sample(5);
        assert!((x - 5.0).abs() < 1e-6);
        assert!((color.r - 0.5).abs() < 1e-6);

        // Horizontal edges report their start point
        let flat = Edge::new(Color::RED, 3, 4, Color::BLUE, 9, 4);
        assert_eq!(flat.sample(4), (3.0, Color::RED));
    }

    #[test]
    fn test_span_ordered_and_pixel_count() {
        let span = Span::new(Color::RED, 8, Color::BLUE, 2).ordered();
        assert_eq!((span.x1, span.x2), (2, 8));
        assert_eq!(span.color1, Color::BLUE);
        assert_eq!(span.pixel_count(), 7);
        assert_eq!(Span::new(Color::RED, 4, Color::RED, 4).pixel_count(), 1);
    }

    #[test]
    fn test_zero_width_span_color() {
        let span = Span::new(Color::RED, 4, Color::BLUE, 4);
        assert_eq!(span.color_at(4), Color::RED);
    }

    #[test]
    fn test_long_edge_selection() {
        let a = Vertex::new(0.0, 0.0, Color::RED);
        let b = Vertex::new(10.0, 4.0, Color::GREEN);
        let c = Vertex::new(2.0, 20.0, Color::BLUE);
        let (long, s1, s2) = triangle_edges(&a, &b, &c);
        assert_eq!(long.height(), 20);
        assert_eq!(s1.height() + s2.height(), 20);
        // c -> a is the long edge, ordered top to bottom
        assert_eq!((long.x1, long.y1, long.x2, long.y2), (0, 0, 2, 20));
    }

    #[test]
    fn test_each_row_emitted_once() {
        let cases = [
            // general
            (Vertex::new(3.0, 1.0, Color::RED), Vertex::new(30.0, 12.0, Color::GREEN), Vertex::new(10.0, 25.0, Color::BLUE)),
            // flat top
            (Vertex::new(0.0, 0.0, Color::RED), Vertex::new(20.0, 0.0, Color::GREEN), Vertex::new(10.0, 15.0, Color::BLUE)),
            // flat bottom
            (Vertex::new(10.0, 0.0, Color::RED), Vertex::new(0.0, 15.0, Color::GREEN), Vertex::new(20.0, 15.0, Color::BLUE)),
            // vertical line
            (Vertex::new(5.0, 0.0, Color::RED), Vertex::new(5.0, 7.0, Color::GREEN), Vertex::new(5.0, 12.0, Color::BLUE)),
        ];

        for (a, b, c) in cases {
            let spans = collect(a, b, c);
            let mut rows: BTreeMap<i32, usize> = BTreeMap::new();
            for (y, _) in &spans {
                *rows.entry(*y).or_default() += 1;
            }

            let top = snap(a.pos.y.min(b.pos.y).min(c.pos.y));
            let bottom = snap(a.pos.y.max(b.pos.y).max(c.pos.y));
            assert_eq!(rows.len() as i32, bottom - top + 1);
            assert_eq!(*rows.keys().next().unwrap(), top);
            assert_eq!(*rows.keys().last().unwrap(), bottom);
            assert!(rows.values().all(|&n| n == 1), "duplicate rows: {:?}", rows);
        }
    }

    #[test]
    fn test_shallow_collinear_triangle_covers_every_column() {
        let spans = collect(
            Vertex::new(0.0, 0.0, Color::RED),
            Vertex::new(0.0, 0.0, Color::GREEN),
            Vertex::new(20.0, 2.0, Color::BLUE),
        );
        assert_eq!(spans.iter().map(|(y, _)| *y).collect::<Vec<_>>(), vec![0, 1, 2]);

        let mut columns: Vec<i32> = spans
            .iter()
            .flat_map(|(_, span)| {
                let span = span.ordered();
                span.x1..=span.x2
            })
            .collect();
        columns.sort_unstable();
        assert_eq!(columns, (0..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_row_spans_full_width() {
        // Middle vertex at row 10: that row must reach from the long edge to v1
        let spans = collect(
            Vertex::new(0.0, 0.0, Color::RED),
            Vertex::new(20.0, 10.0, Color::GREEN),
            Vertex::new(0.0, 20.0, Color::BLUE),
        );
        let (_, span) = spans.iter().find(|(y, _)| *y == 10).unwrap();
        let span = span.ordered();
        assert_eq!((span.x1, span.x2), (0, 20));
        assert_eq!(span.color2, Color::GREEN);
    }

    #[test]
    fn test_flat_triangle_is_single_span() {
        let spans = collect(
            Vertex::new(5.0, 3.0, Color::GREEN),
            Vertex::new(1.0, 3.0, Color::RED),
            Vertex::new(9.0, 3.0, Color::BLUE),
        );
        assert_eq!(spans.len(), 1);
        let (y, span) = spans[0];
        assert_eq!(y, 3);
        assert_eq!((span.x1, span.color1), (1, Color::RED));
        assert_eq!((span.x2, span.color2), (9, Color::BLUE));
    }

    #[test]
    fn test_point_triangle_is_single_pixel() {
        let p = Vertex::new(4.2, 6.8, Color::GREEN);
        let spans = collect(p, p, p);
        assert_eq!(spans.len(), 1);
        let (y, span) = spans[0];
        assert_eq!((y, span.x1, span.x2), (7, 4, 4));
        assert_eq!(span.pixel_count(), 1);
    }

    #[test]
    fn test_rows_are_clipped() {
        let a = Vertex::new(0.0, -10.0, Color::RED);
        let b = Vertex::new(10.0, 5.0, Color::GREEN);
        let c = Vertex::new(0.0, 30.0, Color::BLUE);
        let mut rows = Vec::new();
        triangle_spans_in(&a, &b, &c, 0..20, |y, _| rows.push(y));
        assert_eq!(rows, (0..20).collect::<Vec<_>>());
    }
}
