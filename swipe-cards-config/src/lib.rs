//! Configuration for the swipeable card stack.
//!
//! The config is a small KDL document decoded with `knuffel`. Every node is optional, so an
//! empty file yields [`Config::default()`].

use std::ffi::OsStr;
use std::path::Path;

use miette::{Context as _, IntoDiagnostic as _};
use tracing::debug;

pub mod animation;
pub mod swipe;

pub use crate::animation::{Curve, ReflowAnimation};
pub use crate::swipe::{FloatOrInt, Swipe};

#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub swipe: Swipe,
    #[knuffel(child, default)]
    pub reflow_animation: ReflowAnimation,
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let filename = path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("config.kdl");

        let config = Self::parse(filename, &contents).context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        let _span = tracy_client::span!("Config::parse");
        knuffel::parse(filename, text)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[track_caller]
    fn do_parse(text: &str) -> Config {
        Config::parse("test.kdl", text)
            .map_err(miette::Report::new)
            .unwrap()
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(do_parse(""), Config::default());
    }

    #[test]
    fn defaults_match_stock_behavior() {
        let config = Config::default();
        assert_eq!(config.swipe.commit_threshold.0, 0.35);
        assert_eq!(config.swipe.settle_divisor.0, 4.);
        assert_eq!(config.swipe.reflow_gap.0, 20.);
        assert_eq!(config.reflow_animation.duration_ms, 150);
        assert_eq!(
            config.reflow_animation.curve,
            Curve::CubicBezier {
                x1: 0.,
                y1: 0.,
                x2: 0.31,
                y2: 1.,
            }
        );
    }

    #[test]
    fn parse_full() {
        let config = do_parse(
            r#"
            swipe {
                commit-threshold 0.5
                settle-divisor 8
                reflow-gap 12.5
            }

            reflow-animation {
                duration-ms 300
                curve "ease-out-cubic"
            }
            "#,
        );

        assert_eq!(
            config,
            Config {
                swipe: Swipe {
                    commit_threshold: FloatOrInt(0.5),
                    settle_divisor: FloatOrInt(8.),
                    reflow_gap: FloatOrInt(12.5),
                },
                reflow_animation: ReflowAnimation {
                    duration_ms: 300,
                    curve: Curve::EaseOutCubic,
                },
            }
        );
    }

    #[test]
    fn partial_swipe_keeps_other_defaults() {
        let config = do_parse(
            r#"
            swipe {
                commit-threshold 0.25
            }
            "#,
        );

        assert_eq!(config.swipe.commit_threshold.0, 0.25);
        assert_eq!(config.swipe.settle_divisor, Swipe::default().settle_divisor);
        assert_eq!(config.swipe.reflow_gap, Swipe::default().reflow_gap);
        assert_eq!(config.reflow_animation, ReflowAnimation::default());
    }

    #[test]
    fn parse_cubic_bezier() {
        let config = do_parse(
            r#"
            reflow-animation {
                curve "cubic-bezier" 0.25 0.1 0.25 1
            }
            "#,
        );

        assert_eq!(
            config.reflow_animation.curve,
            Curve::CubicBezier {
                x1: 0.25,
                y1: 0.1,
                x2: 0.25,
                y2: 1.,
            }
        );
    }

    #[test]
    fn threshold_out_of_range_is_an_error() {
        let res = Config::parse(
            "test.kdl",
            r#"
            swipe {
                commit-threshold 1.5
            }
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn divisor_below_one_is_an_error() {
        let res = Config::parse(
            "test.kdl",
            r#"
            swipe {
                settle-divisor 0.5
            }
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn unknown_curve_is_an_error() {
        let res = Config::parse(
            "test.kdl",
            r#"
            reflow-animation {
                curve "bounce"
            }
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn bezier_x_out_of_range_is_an_error() {
        let res = Config::parse(
            "test.kdl",
            r#"
            reflow-animation {
                curve "cubic-bezier" 1.5 0 0.3 1
            }
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn bezier_needs_four_points() {
        let res = Config::parse(
            "test.kdl",
            r#"
            reflow-animation {
                curve "cubic-bezier" 0 0 0.3
            }
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn load_missing_file_fails() {
        let res = Config::load(Path::new("/nonexistent/swipe-cards/config.kdl"));
        assert!(res.is_err());
    }
}
