//! `discrete-plot` layout.
//!
//! Turns a list of `(x y)` samples plus an options list into the graphics
//! primitives a renderer draws: one point and stem line per sample, the
//! bounding box, the axes that fall inside the data range, tick labels and
//! the optional title and axis labels. Coordinates are scene coordinates:
//! data scaled to a fixed extent with the y axis flipped.

use std::f64::consts::FRAC_PI_2;

use crate::backend::environment::Environment;
use crate::backend::interrupt::InterruptFlag;
use crate::backend::models::{format_number, Atom, EvalResult, Expression, OBJECT_NAME};

use super::{eval, SemanticError};

/// Side length of the plot area in scene units.
const EXTENT: f64 = 20.0;
/// Offset of title and axis labels from the bounding box.
const LABEL_OFFSET: f64 = 3.0;
/// Offset of abscissa tick labels below the box.
const TICK_OFFSET_X: f64 = 2.0;
/// Offset of ordinate tick labels left of the box.
const TICK_OFFSET_Y: f64 = 2.0;

const POINT_SIZE: f64 = 0.5;
const LINE_THICKNESS: f64 = 0.0;

#[derive(Debug, Default)]
struct PlotOptions {
    title: Option<String>,
    abscissa_label: Option<String>,
    ordinate_label: Option<String>,
    text_scale: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

impl Bounds {
    fn of(samples: &[(f64, f64)]) -> Option<Bounds> {
        let (first, rest) = samples.split_first()?;
        let mut bounds = Bounds {
            xmin: first.0,
            xmax: first.0,
            ymin: first.1,
            ymax: first.1,
        };
        for (x, y) in rest {
            bounds.xmin = bounds.xmin.min(*x);
            bounds.xmax = bounds.xmax.max(*x);
            bounds.ymin = bounds.ymin.min(*y);
            bounds.ymax = bounds.ymax.max(*y);
        }
        Some(bounds)
    }
}

/// Maps data coordinates to scene coordinates.
#[derive(Debug, Clone, Copy)]
struct Scale {
    sx: f64,
    sy: f64,
}

impl Scale {
    fn new(bounds: &Bounds) -> Scale {
        let span = |lo: f64, hi: f64| if hi > lo { EXTENT / (hi - lo) } else { 1.0 };
        Scale {
            sx: span(bounds.xmin, bounds.xmax),
            sy: span(bounds.ymin, bounds.ymax),
        }
    }

    fn x(&self, x: f64) -> f64 {
        x * self.sx
    }

    fn y(&self, y: f64) -> f64 {
        -(y * self.sy)
    }
}

fn coordinates(x: f64, y: f64) -> Expression {
    Expression::list(vec![Expression::number(x), Expression::number(y)])
}

fn point(x: f64, y: f64, size: f64) -> Expression {
    coordinates(x, y)
        .with_property(OBJECT_NAME, Expression::string("point"))
        .with_property("size", Expression::number(size))
}

fn line(from: (f64, f64), to: (f64, f64)) -> Expression {
    Expression::list(vec![coordinates(from.0, from.1), coordinates(to.0, to.1)])
        .with_property(OBJECT_NAME, Expression::string("line"))
        .with_property("thickness", Expression::number(LINE_THICKNESS))
}

fn text(content: &str, x: f64, y: f64, scale: f64, rotation: f64) -> Expression {
    Expression::string(content)
        .with_property(OBJECT_NAME, Expression::string("text"))
        .with_property("position", point(x, y, 0.0))
        .with_property("text-scale", Expression::number(scale))
        .with_property("text-rotation", Expression::number(rotation))
}

fn invalid(message: &str) -> SemanticError {
    SemanticError::InvalidArgument(format!("discrete-plot {}", message))
}

fn pair(entry: &Expression) -> Option<(&Expression, &Expression)> {
    match entry.tail() {
        [first, second] if entry.is_head_list() => Some((first, second)),
        _ => None,
    }
}

fn parse_samples(data: &Expression) -> Result<Vec<(f64, f64)>, SemanticError> {
    data.tail()
        .iter()
        .map(|entry| {
            let (x, y) = pair(entry).ok_or_else(|| invalid("data entries must be (x y) lists"))?;
            match (x.head(), y.head()) {
                (Atom::Number(x), Atom::Number(y)) if x.is_finite() && y.is_finite() => {
                    Ok((*x, *y))
                }
                _ => Err(invalid("coordinates must be real numbers")),
            }
        })
        .collect()
}

fn parse_options(options: &Expression) -> Result<PlotOptions, SemanticError> {
    let mut parsed = PlotOptions::default();
    for entry in options.tail() {
        let (key, value) = pair(entry).ok_or_else(|| invalid("options must be (key value) lists"))?;
        let key = key
            .head()
            .as_str()
            .ok_or_else(|| invalid("option keys must be strings"))?;
        let label = || {
            value
                .head()
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid("label options must be strings"))
        };
        match key {
            "title" => parsed.title = Some(label()?),
            "abscissa-label" => parsed.abscissa_label = Some(label()?),
            "ordinate-label" => parsed.ordinate_label = Some(label()?),
            "text-scale" => match value.head() {
                Atom::Number(scale) if *scale > 0.0 => parsed.text_scale = Some(*scale),
                _ => return Err(invalid("text-scale must be a positive number")),
            },
            _ => {}
        }
    }
    Ok(parsed)
}

/// Build the primitives for `samples` in draw order.
fn layout(samples: &[(f64, f64)], options: &PlotOptions) -> Result<Vec<Expression>, SemanticError> {
    let bounds = Bounds::of(samples).ok_or_else(|| invalid("requires at least one data point"))?;
    let scale = Scale::new(&bounds);
    let text_scale = options.text_scale.unwrap_or(1.0);

    let left = scale.x(bounds.xmin);
    let right = scale.x(bounds.xmax);
    let top = scale.y(bounds.ymax);
    let bottom = scale.y(bounds.ymin);
    let baseline = scale.y(0.0_f64.clamp(bounds.ymin, bounds.ymax));

    let mut items = Vec::with_capacity(samples.len() * 2 + 13);

    for (x, y) in samples {
        let (sx, sy) = (scale.x(*x), scale.y(*y));
        items.push(point(sx, sy, POINT_SIZE));
        items.push(line((sx, sy), (sx, baseline)));
    }

    items.push(line((left, bottom), (right, bottom)));
    items.push(line((left, top), (right, top)));
    items.push(line((left, top), (left, bottom)));
    items.push(line((right, top), (right, bottom)));

    if bounds.ymin <= 0.0 && 0.0 <= bounds.ymax {
        items.push(line((left, 0.0), (right, 0.0)));
    }
    if bounds.xmin <= 0.0 && 0.0 <= bounds.xmax {
        items.push(line((0.0, top), (0.0, bottom)));
    }

    let tick = |value: f64, x: f64, y: f64| text(&format_number(value), x, y, text_scale, 0.0);
    items.push(tick(bounds.xmin, left, bottom + TICK_OFFSET_X));
    items.push(tick(bounds.xmax, right, bottom + TICK_OFFSET_X));
    items.push(tick(bounds.ymin, left - TICK_OFFSET_Y, bottom));
    items.push(tick(bounds.ymax, left - TICK_OFFSET_Y, top));

    let xmid = (left + right) / 2.0;
    let ymid = (top + bottom) / 2.0;
    if let Some(title) = &options.title {
        items.push(text(title, xmid, top - LABEL_OFFSET, text_scale, 0.0));
    }
    if let Some(label) = &options.abscissa_label {
        items.push(text(label, xmid, bottom + LABEL_OFFSET, text_scale, 0.0));
    }
    if let Some(label) = &options.ordinate_label {
        items.push(text(label, left - LABEL_OFFSET, ymid, text_scale, -FRAC_PI_2));
    }

    Ok(items)
}

/// `(discrete-plot data options)`
pub(super) fn eval_discrete_plot(
    items: &[Expression],
    env: &mut Environment,
    interrupt: &InterruptFlag,
) -> EvalResult {
    require_two_args!("discrete-plot", items);

    let data = eval(&items[0], env, interrupt)?;
    let options = eval(&items[1], env, interrupt)?;
    if !data.is_head_list() || !options.is_head_list() {
        return Err(invalid("arguments must be lists"));
    }

    let samples = parse_samples(&data)?;
    let options = parse_options(&options)?;
    Ok(Expression::with_tail(Atom::Discrete, layout(&samples, &options)?))
}
