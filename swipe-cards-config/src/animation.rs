use knuffel::errors::DecodeError;
use knuffel::Decode as _;

use crate::swipe::FloatOrInt;

/// Timing of the slide-up that trailing cards perform after a dismissal.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct ReflowAnimation {
    #[knuffel(child, unwrap(argument), default = Self::default().duration_ms)]
    pub duration_ms: u32,
    #[knuffel(child, default = Self::default().curve)]
    pub curve: Curve,
}

impl Default for ReflowAnimation {
    fn default() -> Self {
        Self {
            duration_ms: 150,
            curve: Curve::CubicBezier {
                x1: 0.,
                y1: 0.,
                x2: 0.31,
                y2: 1.,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Linear,
    EaseOutCubic,
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

#[derive(knuffel::Decode)]
struct CurveNode {
    #[knuffel(argument)]
    name: String,
    #[knuffel(arguments)]
    points: Vec<FloatOrInt<-1000, 1000>>,
}

impl<S: knuffel::traits::ErrorSpan> knuffel::Decode<S> for Curve {
    fn decode_node(
        node: &knuffel::ast::SpannedNode<S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let CurveNode { name, points } = CurveNode::decode_node(node, ctx)?;

        let curve = match (name.as_str(), points.as_slice()) {
            ("linear", []) => Curve::Linear,
            ("ease-out-cubic", []) => Curve::EaseOutCubic,
            ("cubic-bezier", [x1, y1, x2, y2]) => {
                // The curve must stay a function of time.
                for x in [x1, x2] {
                    if !(0. ..=1.).contains(&x.0) {
                        return Err(DecodeError::conversion(
                            node,
                            "cubic-bezier x control points must be between 0 and 1",
                        ));
                    }
                }

                Curve::CubicBezier {
                    x1: x1.0,
                    y1: y1.0,
                    x2: x2.0,
                    y2: y2.0,
                }
            }
            ("cubic-bezier", _) => {
                return Err(DecodeError::unexpected(
                    node,
                    "node",
                    "cubic-bezier takes exactly four control point values",
                ));
            }
            ("linear" | "ease-out-cubic", _) => {
                return Err(DecodeError::unexpected(
                    node,
                    "node",
                    format!("curve `{name}` takes no extra arguments"),
                ));
            }
            _ => {
                return Err(DecodeError::unexpected(
                    node,
                    "node",
                    format!(
                        "unknown curve `{name}`, expected linear, ease-out-cubic or cubic-bezier"
                    ),
                ));
            }
        };

        Ok(curve)
    }
}
