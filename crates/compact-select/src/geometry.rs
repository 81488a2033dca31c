//! Geometry primitives and menu placement.
//!
//! The controller only needs enough geometry to place the overlay menu
//! against its trigger. Coordinates are logical pixels.

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Check if a point is inside the rectangle.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

// ============================================================================
// Menu Placement
// ============================================================================

/// Where the menu opens relative to the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuPlacement {
    /// Below the trigger, left edges aligned.
    #[default]
    BottomStart,
    /// Below the trigger, centered.
    Bottom,
    /// Below the trigger, right edges aligned.
    BottomEnd,
    /// Above the trigger, left edges aligned.
    TopStart,
    /// Above the trigger, centered.
    Top,
    /// Above the trigger, right edges aligned.
    TopEnd,
}

impl MenuPlacement {
    /// Calculate the menu's top-left corner.
    ///
    /// When `viewport` is given, a menu that would overflow vertically flips
    /// to the other side of the trigger, then shifts to stay inside.
    pub fn calculate_position(&self, trigger: Rect, menu: Size, viewport: Option<Rect>) -> Point {
        let mut pos = self.calculate_initial_position(trigger, menu);
        if let Some(bounds) = viewport {
            pos = self.apply_flip_shift(pos, trigger, menu, bounds);
        }
        pos
    }

    /// Whether the menu opens below the trigger.
    pub fn is_below(&self) -> bool {
        matches!(self, Self::BottomStart | Self::Bottom | Self::BottomEnd)
    }

    fn calculate_initial_position(&self, trigger: Rect, menu: Size) -> Point {
        let x = match self {
            Self::BottomStart | Self::TopStart => trigger.left(),
            Self::Bottom | Self::Top => trigger.left() + (trigger.size.width - menu.width) / 2.0,
            Self::BottomEnd | Self::TopEnd => trigger.right() - menu.width,
        };
        let y = if self.is_below() {
            trigger.bottom()
        } else {
            trigger.top() - menu.height
        };
        Point::new(x, y)
    }

    fn apply_flip_shift(&self, pos: Point, trigger: Rect, menu: Size, bounds: Rect) -> Point {
        let mut result = pos;

        if self.is_below() {
            if pos.y + menu.height > bounds.bottom() {
                result.y = trigger.top() - menu.height;
            }
        } else if pos.y < bounds.top() {
            result.y = trigger.bottom();
        }

        // Shift to stay within bounds (after flipping)
        if result.x < bounds.left() {
            result.x = bounds.left();
        } else if result.x + menu.width > bounds.right() {
            result.x = bounds.right() - menu.width;
        }

        if result.y < bounds.top() {
            result.y = bounds.top();
        } else if result.y + menu.height > bounds.bottom() {
            result.y = bounds.bottom() - menu.height;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    #[test]
    fn test_bottom_start_below_trigger() {
        let trigger = Rect::new(100.0, 100.0, 120.0, 30.0);
        let pos = MenuPlacement::BottomStart.calculate_position(
            trigger,
            Size::new(200.0, 150.0),
            Some(VIEWPORT),
        );
        assert_eq!(pos, Point::new(100.0, 130.0));
    }

    #[test]
    fn test_flips_above_near_bottom() {
        let trigger = Rect::new(100.0, 500.0, 120.0, 30.0);
        let pos = MenuPlacement::BottomStart.calculate_position(
            trigger,
            Size::new(200.0, 150.0),
            Some(VIEWPORT),
        );
        assert_eq!(pos, Point::new(100.0, 350.0));
    }

    #[test]
    fn test_flips_below_near_top() {
        let trigger = Rect::new(100.0, 20.0, 120.0, 30.0);
        let pos =
            MenuPlacement::Top.calculate_position(trigger, Size::new(120.0, 100.0), Some(VIEWPORT));
        assert_eq!(pos, Point::new(100.0, 50.0));
    }

    #[test]
    fn test_shifts_inside_right_edge() {
        let trigger = Rect::new(700.0, 100.0, 80.0, 30.0);
        let pos = MenuPlacement::BottomStart.calculate_position(
            trigger,
            Size::new(200.0, 100.0),
            Some(VIEWPORT),
        );
        assert_eq!(pos, Point::new(600.0, 130.0));
    }

    #[test]
    fn test_no_viewport_no_adjustment() {
        let trigger = Rect::new(700.0, 580.0, 80.0, 30.0);
        let pos =
            MenuPlacement::BottomEnd.calculate_position(trigger, Size::new(200.0, 100.0), None);
        assert_eq!(pos, Point::new(580.0, 610.0));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(15.0, 29.0)));
        assert!(!rect.contains(Point::new(30.0, 15.0)));
    }
}
