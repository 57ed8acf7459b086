//! Placement geometry.
//!
//! Rectangles are in output pixels with a top-left origin. Placement is
//! contain-fit: content is scaled to the largest size that fits the
//! container without cropping, then centered.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-sized rectangle at the origin.
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shrink the rectangle by `padding` on every side. Collapses to a
    /// zero-size rect at the center rather than inverting.
    pub fn inset(&self, padding: f64) -> Rect {
        let width = (self.width - 2.0 * padding).max(0.0);
        let height = (self.height - 2.0 * padding).max(0.0);
        Rect {
            x: self.x + (self.width - width) / 2.0,
            y: self.y + (self.height - height) / 2.0,
            width,
            height,
        }
    }

    /// Whether a point lies within the rectangle.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// Contain-fit `content` dimensions into `container`, centered.
///
/// Degenerate content or container dimensions yield a zero-size rect at
/// the container center rather than NaN geometry.
pub fn fit_rect(content_width: f64, content_height: f64, container: Rect) -> Rect {
    if content_width <= 0.0
        || content_height <= 0.0
        || container.width <= 0.0
        || container.height <= 0.0
    {
        let (cx, cy) = container.center();
        return Rect::new(cx, cy, 0.0, 0.0);
    }

    let scale = (container.width / content_width).min(container.height / content_height);
    let width = content_width * scale;
    let height = content_height * scale;

    Rect {
        x: container.x + (container.width - width) / 2.0,
        y: container.y + (container.height - height) / 2.0,
        width,
        height,
    }
}

/// A device frame the video can be presented inside.
///
/// `screen` is the display region in the device frame's own coordinate
/// space (pixels of the mockup asset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceMockup {
    /// Mockup asset width in its own pixels.
    pub frame_width: f64,

    /// Mockup asset height in its own pixels.
    pub frame_height: f64,

    /// Screen region within the mockup asset.
    pub screen: Rect,
}

/// Resolved placement of a device mockup and the video inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockupPlacement {
    /// Where the device frame lands in output pixels.
    pub device_rect: Rect,

    /// The screen region mapped into output pixels.
    pub screen_rect: Rect,

    /// The video contain-fit inside the screen region, output pixels.
    pub video_rect: Rect,

    /// Uniform scale applied to the mockup asset.
    pub scale: f64,
}

/// Place a device mockup in `container` and fit the video to its screen.
pub fn mockup_placement(
    mockup: &DeviceMockup,
    container: Rect,
    video_width: f64,
    video_height: f64,
) -> MockupPlacement {
    let device_rect = fit_rect(mockup.frame_width, mockup.frame_height, container);
    let scale = if mockup.frame_width > 0.0 {
        device_rect.width / mockup.frame_width
    } else {
        0.0
    };

    let screen_rect = Rect {
        x: device_rect.x + mockup.screen.x * scale,
        y: device_rect.y + mockup.screen.y * scale,
        width: mockup.screen.width * scale,
        height: mockup.screen.height * scale,
    };

    let video_rect = fit_rect(video_width, video_height, screen_rect);

    MockupPlacement {
        device_rect,
        screen_rect,
        video_rect,
        scale,
    }
}
