//! Pure frame geometry for window overlays.

use crate::model::WindowState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Browser viewport size in CSS pixels.
pub struct Viewport {
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Sizing rules for normal (non-maximized) windows.
pub struct FrameSizing {
    /// Width as a fraction of the viewport.
    pub width_ratio: f64,
    /// Height as a fraction of the viewport.
    pub height_ratio: f64,
    /// Minimum width.
    pub min_width: i32,
    /// Minimum height.
    pub min_height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Window frame rectangle in viewport coordinates.
pub struct FrameRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl FrameRect {
    /// Inline CSS positioning for the frame.
    pub fn to_style(self) -> String {
        format!(
            "left:{}px;top:{}px;width:{}px;height:{}px;",
            self.x, self.y, self.w, self.h
        )
    }
}

/// Computes the overlay frame for a window in `state`.
///
/// Minimized windows have no frame. Maximized windows fill the viewport. Normal windows are
/// centered and sized by the configured ratios, never smaller than the minimum size unless the
/// viewport itself is smaller.
pub fn window_frame_rect(
    state: WindowState,
    viewport: Viewport,
    sizing: FrameSizing,
) -> Option<FrameRect> {
    let vw = viewport.width.max(0);
    let vh = viewport.height.max(0);
    match state {
        WindowState::Minimized => None,
        WindowState::Maximized => Some(FrameRect {
            x: 0,
            y: 0,
            w: vw,
            h: vh,
        }),
        WindowState::Normal => {
            let w = scaled(vw, sizing.width_ratio).max(sizing.min_width).min(vw);
            let h = scaled(vh, sizing.height_ratio).max(sizing.min_height).min(vh);
            Some(FrameRect {
                x: (vw - w) / 2,
                y: (vh - h) / 2,
                w,
                h,
            })
        }
    }
}

fn scaled(length: i32, ratio: f64) -> i32 {
    (f64::from(length) * ratio).round() as i32
}
