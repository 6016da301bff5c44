//! Built-in card backgrounds.
//!
//! Each variant is drawn as SVG elements covering the full card, on top of
//! a dark base fill. The art is deterministic so repeated builds produce
//! identical PNGs.

use std::f64::consts::{PI, TAU};
use std::fmt::Write;

use glaze_config::BgType;

use crate::{OG_HEIGHT, OG_WIDTH};

const BASE_FILL: &str = "#121212";
const STROKE: &str = "#8a8a8a";

/// SVG elements for the built-in background of `bg_type`.
#[must_use]
pub fn procedural(bg_type: BgType) -> String {
    let mut out = format!(r#"<rect width="{OG_WIDTH}" height="{OG_HEIGHT}" fill="{BASE_FILL}"/>"#);
    match bg_type {
        BgType::Plum => plum(&mut out),
        BgType::Dot => dot(&mut out),
        BgType::Rose => rose(&mut out),
        BgType::Particle => particle(&mut out),
    }
    out
}

/// Branches growing in from two opposite corners.
fn plum(out: &mut String) {
    write!(
        out,
        r#"<g stroke="{STROKE}" stroke-opacity="0.35" stroke-width="1" fill="none">"#
    )
    .unwrap();
    branch(out, 0.0, f64::from(OG_HEIGHT), -PI / 4.0, 90.0, 9);
    branch(out, f64::from(OG_WIDTH), 0.0, 3.0 * PI / 4.0, 90.0, 9);
    out.push_str("</g>");
}

fn branch(out: &mut String, x: f64, y: f64, angle: f64, length: f64, depth: u32) {
    if depth == 0 {
        return;
    }
    let nx = x + length * angle.cos();
    let ny = y + length * angle.sin();
    write!(
        out,
        r#"<line x1="{x:.1}" y1="{y:.1}" x2="{nx:.1}" y2="{ny:.1}"/>"#
    )
    .unwrap();

    // Alternate the spread so the two halves are not mirror images.
    let spread = if depth % 2 == 0 { 0.42 } else { 0.31 };
    branch(out, nx, ny, angle - spread, length * 0.78, depth - 1);
    if depth % 3 != 0 {
        branch(out, nx, ny, angle + spread, length * 0.72, depth - 1);
    }
}

/// Dot grid fading out toward the card center.
fn dot(out: &mut String) {
    const SPACING: u32 = 30;
    let (cx, cy) = (f64::from(OG_WIDTH) / 2.0, f64::from(OG_HEIGHT) / 2.0);
    let max = cx.hypot(cy);

    write!(out, r#"<g fill="{STROKE}">"#).unwrap();
    for row in 0..=OG_HEIGHT / SPACING {
        for col in 0..=OG_WIDTH / SPACING {
            let x = f64::from(col * SPACING);
            let y = f64::from(row * SPACING);
            let opacity = ((x - cx).hypot(y - cy) / max).powf(1.5) * 0.6;
            if opacity < 0.03 {
                continue;
            }
            write!(
                out,
                r#"<circle cx="{x}" cy="{y}" r="1.5" fill-opacity="{opacity:.2}"/>"#
            )
            .unwrap();
        }
    }
    out.push_str("</g>");
}

/// Concentric rose curves anchored off the right edge.
fn rose(out: &mut String) {
    const STEPS: u32 = 720;
    let (cx, cy) = (f64::from(OG_WIDTH) * 0.85, f64::from(OG_HEIGHT) * 0.5);

    write!(
        out,
        r#"<g stroke="{STROKE}" stroke-width="1.2" fill="none">"#
    )
    .unwrap();
    for (ring, petals) in [(0_u32, 5.0_f64), (1, 7.0), (2, 9.0)] {
        let radius = 180.0 + 120.0 * f64::from(ring);
        let opacity = 0.35 - 0.08 * f64::from(ring);
        let mut points = String::new();
        for step in 0..=STEPS {
            let theta = TAU * f64::from(step) / f64::from(STEPS);
            let r = radius * (petals * theta).cos();
            write!(
                points,
                "{:.1},{:.1} ",
                cx + r * theta.cos(),
                cy + r * theta.sin()
            )
            .unwrap();
        }
        write!(
            out,
            r#"<polyline stroke-opacity="{opacity:.2}" points="{}"/>"#,
            points.trim_end()
        )
        .unwrap();
    }
    out.push_str("</g>");
}

/// Particles laid out on a golden-angle spiral.
fn particle(out: &mut String) {
    const COUNT: u32 = 260;
    let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
    let (cx, cy) = (f64::from(OG_WIDTH) / 2.0, f64::from(OG_HEIGHT) / 2.0);
    let scale = f64::from(OG_WIDTH) / (2.0 * f64::from(COUNT).sqrt());

    write!(out, r#"<g fill="{STROKE}">"#).unwrap();
    for i in 1..=COUNT {
        let n = f64::from(i);
        let theta = n * golden_angle;
        let distance = scale * n.sqrt();
        let x = cx + distance * theta.cos();
        let y = cy + distance * theta.sin() * 0.6;
        let r = 0.8 + f64::from(i % 4) * 0.6;
        let opacity = 0.15 + f64::from(i % 5) * 0.08;
        write!(
            out,
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="{r:.1}" fill-opacity="{opacity:.2}"/>"#
        )
        .unwrap();
    }
    out.push_str("</g>");
}
