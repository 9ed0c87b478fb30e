use super::*;

#[test]
fn tex_display_strips_commands() {
    assert_eq!(tex_display(r"\vec{Woman}"), "Woman");
    assert_eq!(tex_display(r"\approx"), "≈");
    assert_eq!(tex_display("("), "(");
    assert_eq!(tex_strokes(r"\vec{Queen}"), 6);
    assert_eq!(tex_strokes(r"\approx"), 1);
}

#[test]
fn grid_is_centered_and_row_major() {
    let sizes = vec![Size::new(1.0, 0.5); 12];
    let pts = grid_positions(&sizes, 3, 4, 2.0).unwrap();
    assert_eq!(pts.len(), 12);

    // Row-major: first row shares y, first column shares x.
    assert_eq!(pts[0].y, pts[3].y);
    assert_eq!(pts[0].x, pts[4].x);
    assert!(pts[0].y > pts[4].y);

    let cx: f64 = pts.iter().map(|p| p.x).sum::<f64>() / 12.0;
    let cy: f64 = pts.iter().map(|p| p.y).sum::<f64>() / 12.0;
    assert!(cx.abs() < 1e-9 && cy.abs() < 1e-9);

    // Neighbouring columns are one width plus one buff apart.
    assert!((pts[1].x - pts[0].x - 3.0).abs() < 1e-9);
}

#[test]
fn grid_rejects_overflow() {
    let sizes = vec![Size::new(1.0, 1.0); 13];
    assert!(grid_positions(&sizes, 3, 4, 1.0).is_err());
    assert!(grid_positions(&sizes, 0, 4, 1.0).is_err());
}

#[test]
fn next_to_places_below_with_gap() {
    let anchor = Rect::from_center_size(Point::ORIGIN, (2.0, 2.0));
    let p = next_to(anchor, Size::new(4.0, 1.0), DOWN, 0.5);
    assert_eq!(p, Point::new(0.0, -2.0));

    let p = next_to(Rect::from_center_size(Point::new(1.0, 1.0), (0.0, 0.0)), Size::new(2.0, 2.0), UL, 0.1);
    assert!((p.x - (1.0 - 1.1)).abs() < 1e-9);
    assert!((p.y - (1.0 + 1.1)).abs() < 1e-9);
}

#[test]
fn to_edge_keeps_the_free_axis() {
    let p = to_edge(Point::new(0.3, -2.0), Size::new(4.0, 1.0), UP, MED_LARGE_BUFF);
    assert_eq!(p.x, 0.3);
    assert!((p.y - (FRAME_HEIGHT / 2.0 - 0.5 - 0.5)).abs() < 1e-9);
}

#[test]
fn text_extent_grows_with_lines_and_size() {
    let one = text_extent("0101", 16.0);
    let two = text_extent("0101\n1100", 16.0);
    assert!((two.height - 2.0 * one.height).abs() < 1e-9);
    assert_eq!(one.width, two.width);
    assert!(text_extent("King", 64.0).width > text_extent("King", 32.0).width);
}
