use anyhow::Result;
use crossterm::style::Color;

use crate::PixelInt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: PixelInt,
    pub y: PixelInt,
    pub width: PixelInt,
    pub height: PixelInt,
}

impl Rect {
    pub const fn new(x: PixelInt, y: PixelInt, width: PixelInt, height: PixelInt) -> Self {
        Rect { x, y, width, height }
    }
}

/// A rectangular pixel canvas the renderer draws onto.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (PixelInt, PixelInt);

    fn clear_rect(&mut self, rect: Rect);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color);

    /// Draws `text` with its baseline starting at (`x`, `y`).
    fn fill_text(&mut self, text: &str, x: PixelInt, y: PixelInt);

    /// Makes everything drawn since the last call visible.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Clear(Rect),
    Fill(Rect, Color),
    Stroke(Rect, Color),
    Text { text: String, x: PixelInt, y: PixelInt },
}

/// Headless surface that records draw calls instead of showing them.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    width: PixelInt,
    height: PixelInt,
    calls: Vec<DrawCall>,
    presented: usize,
}

impl MemorySurface {
    pub fn new(width: PixelInt, height: PixelInt) -> Self {
        MemorySurface { width, height, calls: vec![], presented: 0 }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of frames handed to `present`.
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl Surface for MemorySurface {
    fn size(&self) -> (PixelInt, PixelInt) {
        (self.width, self.height)
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.calls.push(DrawCall::Clear(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::Fill(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::Stroke(rect, color));
    }

    fn fill_text(&mut self, text: &str, x: PixelInt, y: PixelInt) {
        self.calls.push(DrawCall::Text { text: text.to_string(), x, y });
    }

    fn present(&mut self) -> Result<()> {
        self.presented += 1;
        Ok(())
    }
}
