//! Scene-to-SVG serialization.

use stringline_diagram::{Primitive, PrimitiveKind, Scene};

const STYLE: &str = r#"  <style>
    path { fill: none; }
    .prog-tick, .time-tick { stroke: #ddd; stroke-width: 1; }
    .prog-label, .time-label { font: 10px sans-serif; fill: #333; }
    .train { stroke: #2850ad; stroke-width: 2; stroke-linejoin: round; }
    .scale { stroke: #e00; stroke-width: 1; font: 10px sans-serif; fill: #e00; }
  </style>
"#;

pub fn document(scene: &Scene, width: f64, height: f64) -> String {
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
    );
    out.push_str(STYLE);

    for primitive in &scene.primitives {
        match primitive {
            Primitive::Polyline { points, kind } => {
                let mut d = String::new();
                for (i, pt) in points.iter().enumerate() {
                    let command = if i == 0 { "M" } else { " L" };
                    d.push_str(&format!("{command}{:.2},{:.2}", pt.x, pt.y));
                }
                out.push_str(&format!(
                    "  <path class=\"{}\" d=\"{d}\"/>\n",
                    class_of(kind)
                ));
            }
            Primitive::Text {
                content,
                anchor,
                rotation,
                kind,
            } => {
                let transform = match rotation {
                    Some(rotation) => format!(
                        " transform=\"rotate({:.2} {:.2} {:.2})\"",
                        rotation.degrees, rotation.about.x, rotation.about.y
                    ),
                    None => String::new(),
                };
                out.push_str(&format!(
                    "  <text class=\"{}\" x=\"{:.2}\" y=\"{:.2}\"{transform}>{}</text>\n",
                    class_of(kind),
                    anchor.x,
                    anchor.y,
                    escape(content)
                ));
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn class_of(kind: &PrimitiveKind) -> String {
    match kind {
        PrimitiveKind::DistanceTick => "prog-tick".to_string(),
        PrimitiveKind::DistanceLabel => "prog-label".to_string(),
        PrimitiveKind::TimeTick => "time-tick".to_string(),
        PrimitiveKind::TimeLabel => "time-label".to_string(),
        PrimitiveKind::TripPath { route, direction } => {
            format!("train route-{} dir-{}", route, direction.as_wire())
        }
        PrimitiveKind::ScaleIndicator => "scale".to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
