//! Solver behavior: convergence, placement, divergence reporting.

mod common;

use common::{bounds, parse};
use veneer::builtin::{Image, Scroll, Stack, Text};
use veneer::{
    init_ui, Axis, Bounds, Common, Element, FixedMeasure, LayoutError, Point, ResolveCx, SizeSpec,
};

fn child_bounds(root: &dyn Element, index: usize) -> Bounds {
    root.as_layout()
        .expect("not a layout")
        .child(index)
        .common()
        .bounds()
        .expect("child has no bounds")
}

/// Every resolved rectangle in the tree, depth first.
fn rectangles(element: &dyn Element) -> Vec<Option<Bounds>> {
    let mut out = vec![element.common().bounds()];
    if let Some(layout) = element.as_layout() {
        for index in 0..layout.child_count() {
            out.extend(rectangles(layout.child(index)));
        }
    }
    out
}

#[test]
fn resolve_is_idempotent_once_settled() {
    let mut root = parse(
        r#"<stack width="match_parent" height="match_content">
             <text width="80" height="20" text="one"/>
             <text width="120" height="30" text="two"/>
           </stack>"#,
    )
    .unwrap();
    let window = bounds(400.0, 300.0);
    init_ui(&mut *root, &window).unwrap();
    let before = rectangles(&*root);

    for _ in 0..3 {
        let mut cx = ResolveCx::new(window.size());
        root.resolve(&mut cx, Some(&window)).unwrap();
    }
    assert_eq!(before, rectangles(&*root));
}

#[test]
fn geometry_is_monotonic_until_reset() {
    let mut root = parse(
        r#"<stack width="match_parent" height="match_content">
             <text width="80" height="20" text="one"/>
           </stack>"#,
    )
    .unwrap();
    let window = bounds(400.0, 300.0);
    init_ui(&mut *root, &window).unwrap();
    assert!(root.common().width().is_some());
    assert!(root.common().bounds().is_some());

    let mut cx = ResolveCx::new(window.size());
    root.resolve(&mut cx, Some(&window)).unwrap();
    assert!(root.common().bounds().is_some());

    root.reset();
    assert!(root.common().width().is_none());
    assert!(root.common().height().is_none());
    assert!(root.common().bounds().is_none());
    assert!(!root.is_initialized());
}

#[test]
fn percent_resolves_against_nearest_concrete_ancestor() {
    // the inner stack is content sized, so the percent child reaches
    // through it to the 200px outer stack
    let mut root = parse(
        r#"<stack width="200" height="100">
             <stack width="match_content" height="match_content">
               <text width="50%" height="20" text="pct"/>
             </stack>
           </stack>"#,
    )
    .unwrap();
    init_ui(&mut *root, &bounds(400.0, 300.0)).unwrap();

    let inner = child_bounds(&*root, 0);
    assert_eq!(inner.size(), Point::new(100.0, 20.0));
    let leaf = root
        .as_layout()
        .unwrap()
        .child(0)
        .as_layout()
        .unwrap()
        .child(0)
        .common()
        .bounds()
        .unwrap();
    assert_eq!(leaf.size().x, 100.0);
}

#[test]
fn horizontal_stack_sums_children() {
    let mut root = parse(
        r#"<stack width="match_content" height="match_content" orientation="horizontal">
             <text width="30" height="10" text="a"/>
             <text width="70" height="10" text="b"/>
           </stack>"#,
    )
    .unwrap();
    let window = bounds(500.0, 500.0);
    init_ui(&mut *root, &window).unwrap();

    assert_eq!(root.common().width(), Some(100.0));
    assert_eq!(root.common().height(), Some(10.0));
    assert_eq!(
        child_bounds(&*root, 0),
        Bounds::new(Point::new(0.0, 490.0), Point::new(30.0, 500.0))
    );
    assert_eq!(
        child_bounds(&*root, 1),
        Bounds::new(Point::new(30.0, 490.0), Point::new(100.0, 500.0))
    );
}

#[test]
fn grid_defaults_fill_parent() {
    // vertical, no explicit column count: one column, four rows, each
    // cell a quarter of the grid's height
    let mut root = parse(
        r#"<grid width="100" height="100">
             <text width="match_bounds" height="match_bounds" text="a"/>
             <text width="match_bounds" height="match_bounds" text="b"/>
             <text width="match_bounds" height="match_bounds" text="c"/>
             <text width="match_bounds" height="match_bounds" text="d"/>
           </grid>"#,
    )
    .unwrap();
    init_ui(&mut *root, &bounds(100.0, 100.0)).unwrap();

    for row in 0..4 {
        let rect = child_bounds(&*root, row);
        let top = 100.0 - row as f64 * 25.0;
        assert_eq!(
            rect,
            Bounds::new(Point::new(0.0, top - 25.0), Point::new(100.0, top))
        );
    }
}

#[test]
fn content_sized_grid_adopts_largest_cell() {
    let mut root = parse(
        r#"<grid width="match_content" height="match_content" orientation="horizontal"
                 cell-width="match_content" cell-height="match_content">
             <text width="30" height="10" text="a"/>
             <text width="50" height="20" text="b"/>
           </grid>"#,
    )
    .unwrap();
    init_ui(&mut *root, &bounds(500.0, 500.0)).unwrap();

    // two columns of the widest cell, one row of the tallest
    assert_eq!(root.common().width(), Some(100.0));
    assert_eq!(root.common().height(), Some(20.0));
    assert_eq!(
        child_bounds(&*root, 1),
        Bounds::new(Point::new(50.0, 480.0), Point::new(100.0, 500.0))
    );
}

#[test]
fn content_parent_cycle_diverges() {
    // the outer stack waits for the inner's width, and the inner's
    // match_parent has no concrete ancestor to take a width from
    let mut root = parse(
        r#"<stack width="match_content" height="50" id="outer">
             <stack width="match_parent" height="20" id="inner"></stack>
           </stack>"#,
    )
    .unwrap();
    let err = init_ui(&mut *root, &bounds(400.0, 300.0)).unwrap_err();
    match err {
        LayoutError::Divergent(diagnostic) => {
            let listing = diagnostic.to_string();
            assert!(listing.contains("outer"), "{}", listing);
            assert!(listing.contains("inner"), "{}", listing);
        }
        other => panic!("expected divergence, got: {}", other),
    }
}

#[test]
fn anchor_to_parent_top() {
    let mut root = parse(
        r#"<relative width="match_parent" height="match_parent">
             <text width="match_bounds" height="20" text="banner" top-of="parent"/>
           </relative>"#,
    )
    .unwrap();
    init_ui(&mut *root, &bounds(100.0, 100.0)).unwrap();
    assert_eq!(
        child_bounds(&*root, 0),
        Bounds::new(Point::new(0.0, 80.0), Point::new(100.0, 100.0))
    );
}

#[test]
fn anchor_to_sibling_adopts_its_span() {
    let mut root = parse(
        r#"<relative width="match_parent" height="match_parent">
             <text id="side" width="30" height="match_bounds" text="s" left-of="parent"/>
             <text width="50" height="match_bounds" text="t" right-of="side"/>
           </relative>"#,
    )
    .unwrap();
    init_ui(&mut *root, &bounds(200.0, 100.0)).unwrap();

    assert_eq!(
        child_bounds(&*root, 0),
        Bounds::new(Point::new(0.0, 0.0), Point::new(30.0, 100.0))
    );
    assert_eq!(
        child_bounds(&*root, 1),
        Bounds::new(Point::new(30.0, 0.0), Point::new(80.0, 100.0))
    );
}

#[test]
fn anchor_offsets_measure_from_edges() {
    let mut root = parse(
        r#"<relative width="match_parent" height="match_parent">
             <text width="match_bounds" height="30" text="x" bottom-of="10"/>
             <text width="40" height="match_bounds" text="y" right-of="25%"/>
           </relative>"#,
    )
    .unwrap();
    init_ui(&mut *root, &bounds(200.0, 100.0)).unwrap();

    // 10px up from the parent's bottom, 30 tall
    assert_eq!(
        child_bounds(&*root, 0),
        Bounds::new(Point::new(0.0, 10.0), Point::new(200.0, 40.0))
    );
    // starts a quarter of the way in
    assert_eq!(
        child_bounds(&*root, 1),
        Bounds::new(Point::new(50.0, 0.0), Point::new(90.0, 100.0))
    );
}

#[test]
fn anchor_cycle_diverges() {
    let mut root = parse(
        r#"<relative width="match_parent" height="match_parent">
             <text id="a" width="10" height="10" text="a" right-of="b"/>
             <text id="b" width="10" height="10" text="b" right-of="a"/>
           </relative>"#,
    )
    .unwrap();
    let err = init_ui(&mut *root, &bounds(100.0, 100.0)).unwrap_err();
    match err {
        LayoutError::Divergent(diagnostic) => {
            let listing = diagnostic.to_string();
            assert!(listing.contains("id=a"), "{}", listing);
            assert!(listing.contains("id=b"), "{}", listing);
        }
        other => panic!("expected divergence, got: {}", other),
    }
}

#[test]
fn ratio_child_stays_integral() {
    let mut root = parse(
        r#"<ratio width="match_parent" height="match_parent" ratio="3:2">
             <text width="match_bounds" height="match_bounds" text="media"/>
           </ratio>"#,
    )
    .unwrap();
    init_ui(&mut *root, &bounds(101.0, 101.0)).unwrap();

    let rect = child_bounds(&*root, 0);
    assert_eq!(rect.size().x.fract(), 0.0);
    assert_eq!(rect.size().y.fract(), 0.0);
    assert_eq!(rect.size().x / rect.size().y, 1.5);
    assert!(rect.size().x <= 101.0 && rect.size().y <= 101.0);
}

#[test]
fn scroll_clamps_to_content_extent() {
    let child = Box::new(Text::new(
        Common::new("text", SizeSpec::Pixels(50.0), SizeSpec::Pixels(300.0)),
        "tall",
        Box::new(FixedMeasure(Point::new(50.0, 300.0))),
    ));
    let mut scroll = Scroll::new(
        Common::new("scroll", SizeSpec::MatchParent, SizeSpec::MatchParent),
        10.0,
        child,
    );
    let window = bounds(50.0, 100.0);
    init_ui(&mut scroll, &window).unwrap();
    assert_eq!(scroll.content_bounds(), Some(window));

    // no horizontal overhang, so a horizontal wheel does nothing
    assert!(!scroll.scroll(Point::new(-5.0, 0.0)).unwrap());

    // one notch down
    assert!(scroll.scroll(Point::new(0.0, -5.0)).unwrap());
    assert_eq!(scroll.content_bounds().unwrap().max.y, 150.0);

    // arbitrarily far down: the content's bottom stops at the frame's
    let moved = scroll.scroll(Point::new(0.0, -10_000.0)).unwrap();
    assert!(moved);
    let content = scroll.content_bounds().unwrap();
    assert_eq!(content.max.y, 300.0);
    let child_rect = scroll
        .as_layout()
        .unwrap()
        .child(0)
        .common()
        .bounds()
        .unwrap();
    assert_eq!(child_rect.max.y, 300.0);
    assert_eq!(child_rect.min.y, 0.0);

    // and all the way back up: never past the start
    assert!(scroll.scroll(Point::new(0.0, 10_000.0)).unwrap());
    assert_eq!(scroll.content_bounds(), Some(window));
    assert!(!scroll.scroll(Point::new(0.0, 10_000.0)).unwrap());
}

#[test]
fn leaves_settle_before_their_container() {
    // a content-sized stack needs two passes: leaves first, then itself
    let text = Text::new(
        Common::new("text", SizeSpec::MatchContent, SizeSpec::MatchContent),
        "12345678",
        Box::new(FixedMeasure(Point::new(80.0, 20.0))),
    );
    let image = Image::new(
        Common::new("image", SizeSpec::MatchParent, SizeSpec::Pixels(50.0)),
        "80x50",
        Box::new(FixedMeasure(Point::new(80.0, 50.0))),
    );
    let mut root = Stack::new(
        Common::new("stack", SizeSpec::MatchParent, SizeSpec::MatchContent),
        Axis::Vertical,
        vec![Box::new(text), Box::new(image)],
    );
    let window = bounds(200.0, 500.0);

    root.reset();
    let mut cx = ResolveCx::new(window.size());
    root.resolve(&mut cx, Some(&window)).unwrap();
    assert!(!root.is_initialized());

    let mut cx = ResolveCx::new(window.size());
    root.resolve(&mut cx, Some(&window)).unwrap();
    assert!(root.is_initialized());

    assert_eq!(root.common().width(), Some(200.0));
    assert_eq!(root.common().height(), Some(70.0));
    assert_eq!(
        child_bounds(&root, 0),
        Bounds::new(Point::new(0.0, 480.0), Point::new(80.0, 500.0))
    );
    assert_eq!(
        child_bounds(&root, 1),
        Bounds::new(Point::new(0.0, 430.0), Point::new(200.0, 480.0))
    );
}

#[test]
fn padding_insets_stacked_children() {
    let mut root = parse(
        r#"<stack width="match_content" height="match_content" padding="5">
             <text width="40" height="10" text="a"/>
           </stack>"#,
    )
    .unwrap();
    init_ui(&mut *root, &bounds(300.0, 300.0)).unwrap();

    // the stacking axis sums children plus both pads; the cross axis is
    // the plain maximum
    assert_eq!(root.common().width(), Some(40.0));
    assert_eq!(root.common().height(), Some(20.0));
    assert_eq!(
        child_bounds(&*root, 0),
        Bounds::new(Point::new(5.0, 285.0), Point::new(45.0, 295.0))
    );
}
