//! Points, bounds, axes, gravity and aspect ratios.
//!
//! Coordinates are Y-up: the origin is the bottom-left corner of the
//! viewport and the *top* edge of a rectangle is its `max.y`.

use crate::{error, Error};
use std::str::FromStr;
use vek::Vec2;

/// A point or extent pair, in pixels.
pub type Point = Vec2<f64>;

/// General-purpose axis enumeration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    #[inline]
    pub fn complement(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Axis::Horizontal),
            "vertical" => Ok(Axis::Vertical),
            other => Err(error!("invalid orientation '{}'", other)),
        }
    }
}

/// An axis-aligned rectangle given by its bottom-left (`min`) and
/// top-right (`max`) corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    #[inline]
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn size(&self) -> Point {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Point {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.max.x - self.min.x,
            Axis::Vertical => self.max.y - self.min.y,
        }
    }
}

/// One end of a gravity axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pull {
    /// The near end: left, or top (Y-up).
    Negative,
    Center,
    /// The far end: right, or bottom.
    Positive,
}

/// Where an element sits inside bounds larger than itself, one pull per
/// axis. Nine named combinations exist in markup, from `top-left` to
/// `bottom-right`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Gravity {
    pub horizontal: Pull,
    pub vertical: Pull,
}

impl Gravity {
    pub const TOP_LEFT: Gravity = Gravity {
        horizontal: Pull::Negative,
        vertical: Pull::Negative,
    };

    /// Computes the minimum corner of a box of `size` placed in `bounds`.
    pub fn place(&self, bounds: &Bounds, size: Point) -> Point {
        let x = match self.horizontal {
            Pull::Negative => bounds.min.x,
            Pull::Center => bounds.center().x - size.x / 2.0,
            Pull::Positive => bounds.max.x - size.x,
        };
        // vertical is Y-up: negative pull is the top edge
        let y = match self.vertical {
            Pull::Negative => bounds.max.y - size.y,
            Pull::Center => bounds.center().y - size.y / 2.0,
            Pull::Positive => bounds.min.y,
        };
        Point::new(x, y)
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Gravity::TOP_LEFT
    }
}

impl FromStr for Gravity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        use Pull::*;
        let (horizontal, vertical) = match s.trim().to_ascii_lowercase().as_str() {
            "center" => (Center, Center),
            "top" => (Center, Negative),
            "bottom" => (Center, Positive),
            "left" => (Negative, Center),
            "right" => (Positive, Center),
            "top-left" => (Negative, Negative),
            "top-right" => (Positive, Negative),
            "bottom-left" => (Negative, Positive),
            "bottom-right" => (Positive, Positive),
            other => return Err(error!("invalid gravity '{}'", other)),
        };
        Ok(Gravity { horizontal, vertical })
    }
}

/// An `a:b` aspect ratio.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AspectRatio {
    pub horizontal: u32,
    pub vertical: u32,
}

impl AspectRatio {
    /// Largest extent pair that keeps the ratio and fits in `available`,
    /// trying fit-to-width first and falling back to fit-to-height.
    pub fn fit(&self, available: Point) -> Point {
        let wide = Point::new(
            available.x,
            available.x * self.vertical as f64 / self.horizontal as f64,
        );
        if wide.x > available.x || wide.y > available.y {
            Point::new(
                available.y * self.horizontal as f64 / self.vertical as f64,
                available.y,
            )
        } else {
            wide
        }
    }
}

impl FromStr for AspectRatio {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let invalid = || error!("invalid ratio '{}'", s);
        let (left, right) = s.trim().split_once(':').ok_or_else(invalid)?;
        let horizontal: u32 = left.trim().parse().map_err(|_| invalid())?;
        let vertical: u32 = right.trim().parse().map_err(|_| invalid())?;
        if horizontal == 0 || vertical == 0 {
            return Err(invalid());
        }
        Ok(AspectRatio { horizontal, vertical })
    }
}

/// Parses a non-negative pixel quantity, with or without a `px` suffix.
pub fn parse_px(s: &str) -> Result<f64, Error> {
    let trimmed = s.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    let value: f64 = number
        .parse()
        .map_err(|_| error!("invalid quantity '{}'", s))?;
    if value < 0.0 || !value.is_finite() {
        return Err(error!("invalid quantity '{}'", s));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_places_within_bounds() {
        let bounds = Bounds::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        let size = Point::new(20.0, 10.0);

        let top_left: Gravity = "top-left".parse().unwrap();
        assert_eq!(top_left.place(&bounds, size), Point::new(0.0, 90.0));

        let bottom_right: Gravity = "bottom-right".parse().unwrap();
        assert_eq!(bottom_right.place(&bounds, size), Point::new(80.0, 0.0));

        let center: Gravity = "center".parse().unwrap();
        assert_eq!(center.place(&bounds, size), Point::new(40.0, 45.0));
    }

    #[test]
    fn ratio_fit_prefers_width() {
        let ratio: AspectRatio = "16:9".parse().unwrap();
        let fit = ratio.fit(Point::new(160.0, 900.0));
        assert_eq!(fit, Point::new(160.0, 90.0));

        let fit = ratio.fit(Point::new(1600.0, 9.0));
        assert_eq!(fit, Point::new(16.0, 9.0));
    }

    #[test]
    fn rejects_malformed_values() {
        assert!("sideways".parse::<Axis>().is_err());
        assert!("upper-left".parse::<Gravity>().is_err());
        assert!("16:0".parse::<AspectRatio>().is_err());
        assert!(parse_px("-4px").is_err());
        assert_eq!(parse_px("12px").unwrap(), 12.0);
        assert_eq!(parse_px("12").unwrap(), 12.0);
    }
}
