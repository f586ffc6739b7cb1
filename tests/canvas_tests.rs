//! End-to-end tests: drive the canvas API and inspect the emitted stream.

use quire::canvas::{
    ArcParams, Color, ColorSpaceDef, GraphicOptions, KAPPA, Matrix, ResourceCategory, XObject,
};
use quire::parse::{Instruction, tokenize};
use quire::types::{FillRule, LineCapStyle, LineDashPattern, pt};
use quire::{Canvas, CanvasConfig, CanvasError, ContentStrategy, DrawingContext, Form, Page};

const EPSILON: f64 = 1e-6;

/// Draw on a fresh A4 page and return the page with its finished content
fn compose(draw: impl FnOnce(&mut Canvas<'_>) -> quire::Result<()>) -> Page {
    compose_with(CanvasConfig::default(), draw)
}

fn compose_with(
    config: CanvasConfig,
    draw: impl FnOnce(&mut Canvas<'_>) -> quire::Result<()>,
) -> Page {
    let mut page = Page::default();
    let mut canvas = Canvas::new(&mut page, ContentStrategy::Replace, config).unwrap();
    draw(&mut canvas).unwrap();
    canvas.finish();
    page
}

fn instructions(page: &Page) -> Vec<Instruction> {
    tokenize(page.contents()).unwrap()
}

fn operators(page: &Page) -> Vec<String> {
    instructions(page).into_iter().map(|i| i.operator).collect()
}

fn assert_numbers(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{:?} != {:?}", actual, expected);
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < EPSILON, "{:?} != {:?}", actual, expected);
    }
}

fn single_cm(draw: impl FnOnce(&mut Canvas<'_>)) -> Vec<f64> {
    let page = compose(|c| {
        draw(c);
        Ok(())
    });
    let ops = instructions(&page);
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].operator, "cm");
    ops[0].numbers()
}

// ============================================================================
// Scoped blocks
// ============================================================================

#[test]
fn scoped_block_is_wrapped_in_one_save_restore_pair() {
    let page = compose(|c| {
        c.scoped(|c| {
            c.move_to(0.0, 0.0).line_to(10.0, 10.0).stroke();
            Ok(())
        })?;
        Ok(())
    });
    insta::assert_snapshot!(page.contents(), @r"
    q
    0 0 m
    10 10 l
    S
    Q
    ");
}

#[test]
fn scoped_block_restores_after_ending_the_path() {
    let page = compose(|c| {
        c.with_line_width(3.0, |c| {
            c.rectangle(0.0, 0.0, 5.0, 5.0, 0.0).end_path();
            c.save_graphics_state();
            Ok(())
        })?;
        Ok(())
    });
    assert_eq!(operators(&page), ["q", "w", "re", "n", "q", "Q", "Q"]);
}

#[test]
fn failing_block_still_restores() {
    let mut page = Page::default();
    let mut canvas =
        Canvas::new(&mut page, ContentStrategy::Replace, CanvasConfig::default()).unwrap();
    let err = canvas
        .with_fill_color("red", |c| {
            c.polyline(&[0.0, 0.0, 1.0])?;
            Ok(())
        })
        .err();
    assert_eq!(
        err,
        Some(CanvasError::TooFewPoints {
            operation: "polyline",
            count: 3
        })
    );
    assert_eq!(canvas.graphics_state_depth(), 1);
    canvas.finish();
    assert_eq!(page.contents(), "q\n1 0 0 rg\nQ\n");
}

#[test]
fn nested_blocks_balance() {
    let page = compose(|c| {
        c.with_translate(10.0, 0.0, |c| {
            c.with_rotate(45.0, None, |c| {
                c.circle(0.0, 0.0, 1.0).fill(FillRule::NonZero);
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    });
    let ops = operators(&page);
    let saves = ops.iter().filter(|o| *o == "q").count();
    let restores = ops.iter().filter(|o| *o == "Q").count();
    assert_eq!((saves, restores), (2, 2));
    assert_eq!(ops.last().map(String::as_str), Some("Q"));
}

// ============================================================================
// Transformations
// ============================================================================

#[test]
fn rotation_about_the_origin_and_a_pivot() {
    assert_numbers(&single_cm(|c| {
        c.rotate(90.0, None);
    }), &[0.0, 1.0, -1.0, 0.0, 0.0, 0.0]);
    assert_numbers(&single_cm(|c| {
        c.rotate(90.0, pt(100.0, 200.0));
    }), &[0.0, 1.0, -1.0, 0.0, 300.0, 100.0]);
}

#[test]
fn scaling_about_the_origin_and_a_pivot() {
    assert_numbers(&single_cm(|c| {
        c.scale(5.0, 10.0, None);
    }), &[5.0, 0.0, 0.0, 10.0, 0.0, 0.0]);
    assert_numbers(&single_cm(|c| {
        c.scale(5.0, 10.0, pt(100.0, 200.0));
    }), &[5.0, 0.0, 0.0, 10.0, -400.0, -1800.0]);
    assert_numbers(&single_cm(|c| {
        c.scale(5.0, None, None);
    }), &[5.0, 0.0, 0.0, 5.0, 0.0, 0.0]);
}

#[test]
fn skew_about_the_origin_and_a_pivot() {
    assert_numbers(&single_cm(|c| {
        c.skew(45.0, 0.0, None);
    }), &[1.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
    assert_numbers(&single_cm(|c| {
        c.skew(45.0, 0.0, pt(100.0, 200.0));
    }), &[1.0, 1.0, 0.0, 1.0, 0.0, -100.0]);    assert_numbers(&single_cm(|c| {
        c.skew(0.0, 45.0, None);
    }), &[1.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
    assert_numbers(&single_cm(|c| {
        c.skew(0.0, 45.0, pt(100.0, 200.0));
    }), &[1.0, 0.0, 1.0, 1.0, -200.0, 0.0]);
}

#[test]
fn translate_and_raw_transform() {
    assert_numbers(&single_cm(|c| {
        c.translate(3.0, -4.0);
    }), &[1.0, 0.0, 0.0, 1.0, 3.0, -4.0]);
    assert_numbers(&single_cm(|c| {
        c.transform(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    }), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn scoped_transform_wraps_cm() {
    let page = compose(|c| {
        c.with_transform(Matrix::translation(1.0, 2.0), |c| {
            c.line(0.0, 0.0, 1.0, 1.0).stroke();
            Ok(())
        })?;
        Ok(())
    });
    assert_eq!(operators(&page), ["q", "cm", "m", "l", "S", "Q"]);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn property_setters_emit_only_on_change() {
    let page = compose(|c| {
        c.set_line_width(1.0);
        c.set_line_width(2.0).set_line_width(2.0);
        c.set_line_cap_style(LineCapStyle::Butt);
        c.set_line_cap_style(LineCapStyle::Round);
        c.set_miter_limit(10.0);
        c.set_line_dash_pattern(LineDashPattern::new(vec![3.0, 1.0], 0.5));
        c.set_line_dash_pattern(LineDashPattern::new(vec![3.0, 1.0], 0.5));
        Ok(())
    });
    insta::assert_snapshot!(page.contents(), @r"
    2 w
    1 J
    [3 1] 0.5 d
    ");
}

#[test]
fn scoped_property_without_value_fails_before_output() {
    let page = compose(|c| {
        let err = c.with_line_cap_style(None, |_| Ok(())).err();
        assert!(matches!(err, Some(CanvasError::MissingScopedValue { .. })));
        Ok(())
    });
    assert_eq!(page.contents(), "");
}

// ============================================================================
// Colors
// ============================================================================

#[test]
fn color_dispatch_by_component_count() {
    let page = compose(|c| {
        c.set_fill_color(102.0)?;
        c.set_stroke_color([102.0, 0.0, 255.0])?;
        c.set_fill_color([0.0, 20.0, 40.0, 80.0])?;
        c.set_stroke_color("6600FF")?;
        c.set_fill_color("6600FF")?;
        Ok(())
    });
    let ops = instructions(&page);
    let names: Vec<&str> = ops.iter().map(|i| i.operator.as_str()).collect();
    assert_eq!(names, ["g", "RG", "k", "rg"]);
    assert_numbers(&ops[0].numbers(), &[0.4]);
    assert_numbers(&ops[1].numbers(), &[0.4, 0.0, 1.0]);
    assert_numbers(&ops[2].numbers(), &[0.0, 0.2, 0.4, 0.8]);
    assert_numbers(&ops[3].numbers(), &[0.4, 0.0, 1.0]);
}

#[test]
fn css_color_names_resolve_to_rgb() {
    let page = compose(|c| {
        c.set_stroke_color("blue")?;
        assert_eq!(c.stroke_color(), &Color::Rgb(0.0, 0.0, 1.0));
        Ok(())
    });
    assert_eq!(page.contents(), "0 0 1 RG\n");
}

#[test]
fn unsupported_color_arity_fails() {
    let page = compose(|c| {
        let err = c.set_fill_color([1.0, 2.0]).err();
        assert!(matches!(err, Some(CanvasError::InvalidColor { .. })));
        Ok(())
    });
    assert_eq!(page.contents(), "");
}

#[test]
fn scoped_color_always_saves() {
    let page = compose(|c| {
        c.with_fill_color(0.0, |_| Ok(()))?;
        Ok(())
    });
    assert_eq!(page.contents(), "q\nQ\n");
}

#[test]
fn named_color_spaces_get_stable_names() {
    let spot = ColorSpaceDef::new("Separation", ["/Spot", "/DeviceCMYK", "5 0 R"], 1);
    let lab = ColorSpaceDef::new("Lab", ["<</WhitePoint [0.9505 1 1.089]>>"], 3);
    let page = compose(|c| {
        c.set_fill_color(Color::Named {
            space: spot.clone(),
            components: vec![1.0],
        })?;
        c.set_stroke_color(Color::Named {
            space: lab.clone(),
            components: vec![50.0, 0.0, 0.0],
        })?;
        c.set_stroke_color(Color::Named {
            space: spot.clone(),
            components: vec![0.5],
        })?;
        Ok(())
    });
    insta::assert_snapshot!(page.contents(), @r"
    /CS1 cs
    1 scn
    /CS2 CS
    50 0 0 SCN
    /CS1 CS
    0.5 SCN
    ");
    let names: Vec<String> = page
        .resources()
        .names(ResourceCategory::ColorSpace)
        .into_iter()
        .map(|n| n.as_str().to_string())
        .collect();
    assert_eq!(names, ["CS1", "CS2"]);
}

// ============================================================================
// Opacity
// ============================================================================

#[test]
fn opacity_registers_and_reuses_ext_gstate() {
    let page = compose(|c| {
        c.set_opacity(0.5, 0.7);
        c.set_opacity(0.5, 0.7);
        Ok(())
    });
    assert_eq!(page.contents(), "/GS1 gs\n");

    let gs = page.resources().ext_gstates.get("GS1").unwrap();
    assert_eq!(
        gs.to_string(),
        "<</Type /ExtGState /CA 0.7 /ca 0.5 /AIS false>>"
    );
    assert_eq!(page.resources().ext_gstates.len(), 1);
}

#[test]
fn returning_to_earlier_opacity_reuses_its_name() {
    let page = compose(|c| {
        c.set_opacity(0.5, 0.7);
        c.set_opacity(0.2, None);
        c.set_opacity(0.5, None);
        Ok(())
    });
    assert_eq!(page.contents(), "/GS1 gs\n/GS2 gs\n/GS1 gs\n");
}

// ============================================================================
// Paths and arcs
// ============================================================================

#[test]
fn full_circle_uses_four_curves_with_kappa() {
    let page = compose(|c| {
        c.arc(&ArcParams::circle(0.0, 0.0, 100.0));
        Ok(())
    });
    let ops = instructions(&page);
    let names: Vec<&str> = ops.iter().map(|i| i.operator.as_str()).collect();
    assert_eq!(names, ["m", "c", "c", "c", "c"]);

    let start = ops[0].numbers();
    let first = ops[1].numbers();
    let ratio = (first[1] - start[1]) / 100.0;
    assert!((ratio - KAPPA).abs() < EPSILON, "ratio {}", ratio);
    assert!((KAPPA - 4.0 / 3.0 * (2f64.sqrt() - 1.0)).abs() < 1e-12);
}

#[test]
fn unit_circle_keeps_kappa_in_the_stream() {
    let page = compose(|c| {
        c.arc(&ArcParams::circle(0.0, 0.0, 1.0));
        Ok(())
    });
    let ops = instructions(&page);
    assert_numbers(&ops[0].numbers(), &[1.0, 0.0]);
    assert_numbers(&ops[1].numbers(), &[1.0, KAPPA, KAPPA, 1.0, 0.0, 1.0]);
    assert_eq!(ops[1].operator, "c");
}

#[test]
fn max_arc_curves_bounds_segments() {
    let config = CanvasConfig::default().with_max_arc_curves(2);
    let page = compose_with(config, |c| {
        c.arc(&ArcParams::circle(0.0, 0.0, 1.0));
        Ok(())
    });
    assert_eq!(operators(&page), ["m", "c", "c"]);
}

#[test]
fn separate_arcs_start_separate_subpaths() {
    let page = compose(|c| {
        let quarter = ArcParams::circle(0.0, 0.0, 10.0).with_angles(0.0, 90.0);
        c.arc(&quarter).arc(&quarter.with_clockwise(true));
        Ok(())
    });
    assert_eq!(operators(&page), ["m", "c", "m", "c", "c", "c"]);
}

#[test]
fn rounded_polygon_closes_and_rounds_every_corner() {
    let page = compose(|c| {
        c.polygon(&[0.0, 0.0, 50.0, 0.0, 25.0, 40.0], 5.0)?;
        Ok(())
    });
    assert_eq!(operators(&page), ["m", "l", "c", "l", "c", "l", "c", "h"]);
}

#[test]
fn polygon_input_is_validated() {
    let page = compose(|c| {
        assert!(matches!(
            c.polygon(&[0.0, 0.0], 0.0),
            Err(CanvasError::TooFewPoints { .. })
        ));
        assert!(matches!(
            c.polygon(&[0.0, 0.0, 1.0, 1.0, 2.0], 0.0),
            Err(CanvasError::OddCoordinates { .. })
        ));
        Ok(())
    });
    assert_eq!(page.contents(), "");
}

#[test]
fn clipped_and_filled_rectangle() {
    let page = compose(|c| {
        c.rectangle(0.0, 0.0, 10.0, 10.0, 0.0)
            .clip_path(FillRule::EvenOdd)
            .end_path();
        c.ellipse(5.0, 5.0, 4.0, 2.0, 30.0).fill_stroke(FillRule::NonZero);
        Ok(())
    });
    assert_eq!(
        operators(&page),
        ["re", "W*", "n", "m", "c", "c", "c", "c", "h", "B"]
    );
}

// ============================================================================
// External objects
// ============================================================================

#[test]
fn image_placement_scales_the_unit_square() {
    let image = XObject::image(42, 300.0, 200.0);
    let page = compose(|c| {
        c.xobject(&image, pt(10.0, 20.0), 150.0, None);
        Ok(())
    });
    insta::assert_snapshot!(page.contents(), @r"
    q
    150 0 0 200 10 20 cm
    /XO1 Do
    Q
    ");
}

#[test]
fn forms_are_placed_by_their_bounding_box() {
    let mut form = Form::new(7, [10.0, 10.0, 60.0, 35.0]);
    {
        let mut canvas =
            Canvas::new(&mut form, ContentStrategy::Replace, CanvasConfig::default()).unwrap();
        canvas.circle(35.0, 22.5, 10.0).stroke();
    }
    assert!(form.contents().ends_with("h\nS\n"));

    let handle = form.xobject();
    let page = compose(|c| {
        c.xobject(&handle, pt(100.0, 100.0), 100.0, 50.0);
        c.xobject(&handle, pt(0.0, 0.0), None, None);
        Ok(())
    });
    let ops = instructions(&page);
    assert_numbers(&ops[1].numbers(), &[2.0, 0.0, 0.0, 2.0, 80.0, 80.0]);
    assert_numbers(&ops[5].numbers(), &[1.0, 0.0, 0.0, 1.0, -10.0, -10.0]);
    // Both placements share one resource name
    assert_eq!(page.resources().xobjects.len(), 1);
}

// ============================================================================
// Graphic objects
// ============================================================================

#[test]
fn draw_by_name() {
    let page = compose(|c| {
        c.draw("arc", &GraphicOptions::new().center(50.0, 50.0).radius(20.0).angles(0.0, 180.0))?;
        c.stroke();
        c.draw(
            "solid_arc",
            &GraphicOptions::new().radius(20.0).inner_radius(10.0).angles(0.0, 90.0),
        )?;
        c.fill(FillRule::NonZero);
        Ok(())
    });
    assert_eq!(
        operators(&page),
        ["m", "c", "c", "S", "m", "c", "l", "c", "h", "f"]
    );
}

#[test]
fn unknown_graphic_object_is_an_error() {
    let page = compose(|c| {
        let err = c.draw("spiral", &GraphicOptions::new()).err();
        assert_eq!(
            err,
            Some(CanvasError::UnknownGraphicObject {
                name: "spiral".to_string()
            })
        );
        Ok(())
    });
    assert_eq!(page.contents(), "");
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn only_replace_is_supported() {
    let mut page = Page::default();
    let result = Canvas::new(&mut page, ContentStrategy::Append, CanvasConfig::default());
    assert!(matches!(
        result,
        Err(CanvasError::UnsupportedStrategy { strategy: "append" })
    ));
}

#[test]
fn precision_controls_number_output() {
    let config = CanvasConfig::default().with_precision(2);
    let page = compose_with(config, |c| {
        c.move_to(1.23456, 0.5);
        Ok(())
    });
    assert_eq!(page.contents(), "1.23 0.5 m\n");
}
