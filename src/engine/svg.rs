//! SVG snapshots of a [`Stage`], in output pixels.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Write as _;

use crate::{
    engine::{
        EngineHandle,
        stage::{Highlight, Stage, StageEntry},
    },
    foundation::core::{Affine, Point, Point3, Rgba8, Vec2},
    foundation::error::{ReelError, ReelResult},
    scene::{
        layout,
        object::{AxisRange, ObjectKind},
        script::{Camera, SceneHeader},
    },
};

// Arrow tip length in scene units.
const TIP_LENGTH: f64 = 0.25;
const TICK_HALF: f64 = 0.08;
const FLASH_RAYS: usize = 12;

/// Orthographic view of a 3D point. The default camera looks straight down the depth axis with
/// x to the right.
pub(crate) fn project(camera: Camera, p: Point3) -> Point {
    let (sa, ca) = (camera.theta + FRAC_PI_2).sin_cos();
    let x1 = p.x * ca + p.y * sa;
    let y1 = -p.x * sa + p.y * ca;
    let (sp, cp) = camera.phi.sin_cos();
    let y2 = y1 * cp + p.z * sp;
    Point::new(x1 * camera.zoom, y2 * camera.zoom)
}

/// Draw the settled stage plus the highlights of its last batch.
pub(crate) fn stage_svg(stage: &Stage, header: &SceneHeader) -> ReelResult<String> {
    let (w, h) = (header.canvas.width, header.canvas.height);
    if w == 0 || h == 0 {
        return Err(ReelError::validation("canvas width/height must be non-zero"));
    }
    let mut pen = Pen {
        out: String::new(),
        view: header.canvas.scene_to_pixels(),
        ppu: header.canvas.pixels_per_unit(),
        stroke_scale: f64::from(h) / 1080.0,
        camera: stage.camera(),
    };
    let _ = write!(
        pen.out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = write!(
        pen.out,
        r#"<rect width="{w}" height="{h}" fill="{}"/>"#,
        header.background.to_hex_rgb()
    );

    let recolors = |handle: EngineHandle| -> Vec<PartColor> {
        stage
            .highlights()
            .iter()
            .filter_map(|hl| match *hl {
                Highlight::Recolor {
                    handle: h,
                    color,
                    parts,
                } if h == handle => Some((color, parts)),
                _ => None,
            })
            .collect()
    };

    for (handle, entry) in stage.visible() {
        pen.entry(entry, &recolors(handle));
    }
    for hl in stage.highlights() {
        match *hl {
            Highlight::Trace { handle } => {
                let entry = stage.entry(handle)?;
                if !entry.visible {
                    pen.entry(entry, &[]);
                }
            }
            Highlight::Rays {
                handle,
                color,
                radius,
            } => pen.rays(stage.bounds(handle)?.center(), radius, color),
            Highlight::Recolor { .. } => {}
        }
    }

    pen.out.push_str("</svg>");
    Ok(pen.out)
}

// Pulse color, over a part range or the whole object.
type PartColor = (Rgba8, Option<(usize, usize)>);

struct Pen {
    out: String,
    view: Affine,
    ppu: f64,
    stroke_scale: f64,
    camera: Camera,
}

impl Pen {
    fn entry(&mut self, entry: &StageEntry, recolors: &[PartColor]) {
        let style = entry.object.style;
        let color = recolors
            .iter()
            .find_map(|&(c, parts)| parts.is_none().then_some(c))
            .unwrap_or(style.color);
        let paint = Paint {
            color: color.to_hex_rgb(),
            opacity: style.opacity * color.alpha_f64(),
            width: style.stroke_width * self.stroke_scale,
        };
        let m = self.view * entry.transform();
        match &entry.object.kind {
            ObjectKind::Text {
                content,
                font,
                font_size,
            } => {
                let lines: Vec<&str> = content.lines().collect();
                self.text(m, &lines, font.as_deref().unwrap_or("sans-serif"), *font_size, &paint);
            }
            ObjectKind::MathTex { parts, font_size } => {
                let runs: Vec<(String, Rgba8)> = parts
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let c = recolors
                            .iter()
                            .find_map(|&(c, range)| match range {
                                Some((start, end)) if (start..end).contains(&i) => Some(c),
                                _ => None,
                            })
                            .unwrap_or(color);
                        (layout::tex_display(p), c)
                    })
                    .collect();
                self.equation(m, &runs, *font_size, &paint);
            }
            ObjectKind::Line { start, end, dashed } => {
                self.segment(m * *start, m * *end, &paint, *dashed);
            }
            ObjectKind::Arrow { start, end } => self.arrow(m * *start, m * *end, &paint),
            ObjectKind::Dot { center, radius } => {
                let c = m * *center;
                let r = radius * m.determinant().abs().sqrt();
                self.disc(c, r, &paint);
            }
            ObjectKind::Dot3 { center, radius } => {
                let c = self.view * entry.offset * project(self.camera, *center);
                self.disc(c, radius * self.ppu * self.camera.zoom, &paint);
            }
            ObjectKind::Axes {
                x_range,
                y_range,
                x_length,
                y_length,
            } => self.axes(m, x_range, y_range, *x_length, *y_length, &paint),
            ObjectKind::Axes3 {
                x_length,
                y_length,
                z_length,
                ..
            } => {
                let (x, y, z) = (x_length / 2.0, y_length / 2.0, z_length / 2.0);
                let to_px = self.view * entry.offset;
                for (a, b) in [
                    (Point3::new(-x, 0.0, 0.0), Point3::new(x, 0.0, 0.0)),
                    (Point3::new(0.0, -y, 0.0), Point3::new(0.0, y, 0.0)),
                    (Point3::new(0.0, 0.0, -z), Point3::new(0.0, 0.0, z)),
                ] {
                    let p0 = to_px * project(self.camera, a);
                    let p1 = to_px * project(self.camera, b);
                    self.arrow(p0, p1, &paint);
                }
            }
            ObjectKind::Group { .. } | ObjectKind::Slice { .. } => {}
        }
    }

    // Opens a `<text>` centered on the local origin; returns that center and the em size in pixels.
    fn open_text(&mut self, m: Affine, family: &str, font_size: f64, paint: &Paint) -> (Point, f64) {
        let c = m * Point::ORIGIN;
        let scale = m.determinant().abs().sqrt();
        let em_px = layout::em(font_size) * scale;
        let [a, b, ..] = m.as_coeffs();
        let angle = b.atan2(a).to_degrees();
        let _ = write!(
            self.out,
            r#"<text font-family="{}" font-size="{em_px:.2}" fill="{}" fill-opacity="{:.3}" text-anchor="middle" transform="rotate({angle:.3} {:.2} {:.2})">"#,
            escape(family),
            paint.color,
            paint.opacity,
            c.x,
            c.y
        );
        (c, em_px)
    }

    fn text(&mut self, m: Affine, lines: &[&str], family: &str, font_size: f64, paint: &Paint) {
        let (c, em_px) = self.open_text(m, family, font_size, paint);
        let lh = em_px * layout::LINE_HEIGHT;
        let first = -(lines.len().saturating_sub(1) as f64) * lh / 2.0 + 0.35 * em_px;
        for (i, line) in lines.iter().enumerate() {
            let y = c.y + first + i as f64 * lh;
            let _ = write!(
                self.out,
                r#"<tspan x="{:.2}" y="{y:.2}">{}</tspan>"#,
                c.x,
                escape(line)
            );
        }
        self.out.push_str("</text>");
    }

    // One line, one run per TeX part so a slice can be recolored on its own.
    fn equation(&mut self, m: Affine, runs: &[(String, Rgba8)], font_size: f64, paint: &Paint) {
        let (c, em_px) = self.open_text(m, "serif", font_size, paint);
        let y = c.y + 0.35 * em_px;
        for (i, (text, color)) in runs.iter().enumerate() {
            if i == 0 {
                let _ = write!(self.out, r#"<tspan x="{:.2}" y="{y:.2}""#, c.x);
            } else {
                self.out.push_str("<tspan");
            }
            let _ = write!(
                self.out,
                r#" fill="{}">{}</tspan>"#,
                color.to_hex_rgb(),
                escape(text)
            );
        }
        self.out.push_str("</text>");
    }

    fn segment(&mut self, p0: Point, p1: Point, paint: &Paint, dashed: bool) {
        let dash = if dashed {
            format!(
                r#" stroke-dasharray="{:.2} {:.2}""#,
                paint.width * 3.0,
                paint.width * 2.0
            )
        } else {
            String::new()
        };
        let _ = write!(
            self.out,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-opacity="{:.3}" stroke-width="{:.2}" stroke-linecap="round"{dash}/>"#,
            p0.x, p0.y, p1.x, p1.y, paint.color, paint.opacity, paint.width
        );
    }

    fn arrow(&mut self, p0: Point, p1: Point, paint: &Paint) {
        let d = p1 - p0;
        let len = d.hypot();
        if len < 1e-9 {
            return;
        }
        let dir = d / len;
        let tip = (TIP_LENGTH * self.ppu).min(len / 2.0);
        let normal = Vec2::new(-dir.y, dir.x) * (tip * 0.45);
        let base = p1 - dir * tip;
        self.segment(p0, base + dir * (tip * 0.2), paint, false);
        let (l, r) = (base + normal, base - normal);
        let _ = write!(
            self.out,
            r#"<path d="M{:.2},{:.2} L{:.2},{:.2} L{:.2},{:.2} Z" fill="{}" fill-opacity="{:.3}"/>"#,
            p1.x, p1.y, l.x, l.y, r.x, r.y, paint.color, paint.opacity
        );
    }

    fn disc(&mut self, c: Point, r: f64, paint: &Paint) {
        let _ = write!(
            self.out,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" fill-opacity="{:.3}"/>"#,
            c.x, c.y, r, paint.color, paint.opacity
        );
    }

    fn axes(
        &mut self,
        m: Affine,
        x_range: &AxisRange,
        y_range: &AxisRange,
        x_length: f64,
        y_length: f64,
        paint: &Paint,
    ) {
        let map = |v: f64, r: &AxisRange, len: f64| (v - (r[0] + r[1]) / 2.0) / (r[1] - r[0]) * len;
        let x0 = map(0.0_f64.clamp(y_range[0], y_range[1]), y_range, y_length);
        let y0 = map(0.0_f64.clamp(x_range[0], x_range[1]), x_range, x_length);

        self.arrow(
            m * Point::new(-x_length / 2.0, x0),
            m * Point::new(x_length / 2.0, x0),
            paint,
        );
        self.arrow(
            m * Point::new(y0, -y_length / 2.0),
            m * Point::new(y0, y_length / 2.0),
            paint,
        );

        for v in ticks(x_range) {
            let x = map(v, x_range, x_length);
            self.segment(
                m * Point::new(x, x0 - TICK_HALF),
                m * Point::new(x, x0 + TICK_HALF),
                paint,
                false,
            );
        }
        for v in ticks(y_range) {
            let y = map(v, y_range, y_length);
            self.segment(
                m * Point::new(y0 - TICK_HALF, y),
                m * Point::new(y0 + TICK_HALF, y),
                paint,
                false,
            );
        }
    }

    fn rays(&mut self, center: Point, radius: f64, color: Rgba8) {
        let paint = Paint {
            color: color.to_hex_rgb(),
            opacity: 1.0,
            width: 3.0 * self.stroke_scale,
        };
        let c = self.view * center;
        let r = radius * self.ppu;
        for i in 0..FLASH_RAYS {
            let (s, co) = (TAU * i as f64 / FLASH_RAYS as f64).sin_cos();
            let dir = Vec2::new(co, s);
            self.segment(c + dir * (r * 0.6), c + dir * r, &paint, false);
        }
    }
}

struct Paint {
    color: String,
    opacity: f64,
    width: f64,
}

// Interior tick values, skipping the ends and zero.
fn ticks(r: &AxisRange) -> Vec<f64> {
    let [lo, hi, step] = *r;
    let n = ((hi - lo) / step).floor() as i64;
    (1..n)
        .map(|i| lo + i as f64 * step)
        .filter(|v| v.abs() > 1e-9 && *v < hi)
        .collect()
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_projects_flat() {
        let p = project(Camera::default(), Point3::new(1.5, -2.0, 3.0));
        assert!((p.x - 1.5).abs() < 1e-12);
        assert!((p.y + 2.0).abs() < 1e-12);
    }

    #[test]
    fn tilted_camera_lifts_depth() {
        let cam = Camera {
            phi: FRAC_PI_2,
            theta: -FRAC_PI_2,
            zoom: 1.0,
        };
        let p = project(cam, Point3::new(0.0, 0.0, 2.0));
        assert!((p.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn slice_pulse_recolors_only_its_parts() {
        use crate::{
            animation::kind::Animation,
            config::{Quality, SceneConfig},
            engine::{Batch, BatchStep},
            foundation::core::palette,
            scene::{
                object::{ObjectId, Style, VisualObject},
                script::SceneBuilder,
            },
        };

        let cfg = SceneConfig::default().with_quality(Quality::Low);
        let header = SceneBuilder::new("eq", &cfg).build().unwrap().header().clone();
        let mut stage = Stage::new(header.camera);
        let eq = stage
            .insert(
                &VisualObject::new(
                    ObjectId(0),
                    ObjectKind::math_tex(["a", "+", "b"]),
                    Style::default(),
                ),
                &[],
            )
            .unwrap();
        let slice = stage
            .insert(
                &VisualObject::new(
                    ObjectId(1),
                    ObjectKind::Slice {
                        of: ObjectId(0),
                        start: 2,
                        end: 3,
                    },
                    Style::default(),
                ),
                &[eq],
            )
            .unwrap();
        let step = |animation: Animation, target: EngineHandle| BatchStep {
            targets: [target].into_iter().collect(),
            morph_into: None,
            animation,
            offset: 0.0,
            duration: 1.0,
        };
        let batch = |s: BatchStep| Batch {
            cue: 0,
            start_secs: 0.0,
            duration: 1.0,
            steps: vec![s],
        };
        stage.apply(&batch(step(Animation::Write, eq))).unwrap();
        stage
            .apply(&batch(step(Animation::indicate(palette::YELLOW, 1.2).unwrap(), slice)))
            .unwrap();

        let svg = stage_svg(&stage, &header).unwrap();
        assert!(svg.contains(r##"fill="#ffffff">a</tspan>"##), "{svg}");
        assert!(svg.contains(r##"<tspan fill="#ffffff">+</tspan>"##), "{svg}");
        assert!(svg.contains(r##"<tspan fill="#ffff00">b</tspan>"##), "{svg}");
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn ticks_skip_origin_and_ends() {
        assert_eq!(ticks(&[-2.0, 2.0, 1.0]), vec![-1.0, 1.0]);
    }
}
