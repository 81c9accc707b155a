use anyhow::{ensure, Result};
use crossterm::style::Color;

use crate::surface::{Rect, Surface};
use crate::{Cell, GridInt, PixelInt};

/// Distance of the score text from the bottom-left corner of the surface.
const SCORE_INSET: PixelInt = 5;

/// Draws game state onto a [`Surface`], translating cells into pixel squares.
pub struct Renderer<S> {
    surface: S,
    cell_width: PixelInt,
    fill: Color,
    stroke: Color,
}

impl<S: Surface> Renderer<S> {
    pub fn new(surface: S, cell_width: PixelInt, fill: Color, stroke: Color) -> Result<Self> {
        let (width, height) = surface.size();

        ensure!(cell_width > 0, "cell width must be positive, got {}", cell_width);
        ensure!(width > 0 && height > 0, "surface has no drawable area ({}x{})", width, height);
        ensure!(
            width % cell_width == 0 && height % cell_width == 0,
            "surface size {}x{} is not a multiple of the cell width {}",
            width, height, cell_width
        );

        Ok(Renderer { surface, cell_width, fill, stroke })
    }

    pub fn surface_dimensions(&self) -> (PixelInt, PixelInt) {
        self.surface.size()
    }

    pub fn cell_pixel_size(&self) -> PixelInt {
        self.cell_width
    }

    /// Number of whole cells along each axis.
    pub fn grid_size(&self) -> (GridInt, GridInt) {
        let (width, height) = self.surface_dimensions();
        (width / self.cell_width, height / self.cell_width)
    }

    pub fn clear(&mut self) {
        let (width, height) = self.surface_dimensions();
        self.surface.clear_rect(Rect::new(0, 0, width, height));
    }

    pub fn draw_snake(&mut self, cells: &[Cell]) {
        for cell in cells {
            self.draw_cell(*cell);
        }
    }

    pub fn draw_food(&mut self, cell: Cell) {
        self.draw_cell(cell);
    }

    pub fn draw_score(&mut self, score: u32) {
        let (_, height) = self.surface_dimensions();
        self.surface.fill_text(&format!("Score: {}", score), SCORE_INSET, height - SCORE_INSET);
    }

    pub fn present(&mut self) -> Result<()> {
        self.surface.present()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_cell(&mut self, cell: Cell) {
        let rect = Rect::new(
            cell.x * self.cell_width,
            cell.y * self.cell_width,
            self.cell_width,
            self.cell_width,
        );

        self.surface.fill_rect(rect, self.fill);
        self.surface.stroke_rect(rect, self.stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCall, MemorySurface};

    fn renderer(width: PixelInt, height: PixelInt) -> Renderer<MemorySurface> {
        Renderer::new(MemorySurface::new(width, height), 10, Color::Blue, Color::White).unwrap()
    }

    #[test]
    fn grid_size_divides_surface_by_cell_width() {
        let r = renderer(200, 150);
        assert_eq!(r.grid_size(), (20, 15));
        assert_eq!(r.cell_pixel_size(), 10);
        assert_eq!(r.surface_dimensions(), (200, 150));
    }

    #[test]
    fn cells_are_filled_then_stroked() {
        let mut r = renderer(100, 100);
        r.draw_food(Cell::new(3, 2));

        let rect = Rect::new(30, 20, 10, 10);
        assert_eq!(
            r.surface().calls(),
            &[DrawCall::Fill(rect, Color::Blue), DrawCall::Stroke(rect, Color::White)]
        );
    }

    #[test]
    fn snake_is_drawn_head_first() {
        let mut r = renderer(100, 100);
        r.draw_snake(&[Cell::new(1, 0), Cell::new(0, 0)]);

        let calls = r.surface().calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], DrawCall::Fill(Rect::new(10, 0, 10, 10), Color::Blue));
        assert_eq!(calls[2], DrawCall::Fill(Rect::new(0, 0, 10, 10), Color::Blue));
    }

    #[test]
    fn score_sits_near_bottom_left() {
        let mut r = renderer(100, 80);
        r.draw_score(7);

        assert_eq!(
            r.surface().calls(),
            &[DrawCall::Text { text: "Score: 7".to_string(), x: 5, y: 75 }]
        );
    }

    #[test]
    fn clear_covers_whole_surface() {
        let mut r = renderer(60, 40);
        r.clear();
        assert_eq!(r.surface().calls(), &[DrawCall::Clear(Rect::new(0, 0, 60, 40))]);
    }

    #[test]
    fn rejects_degenerate_layouts() {
        let blue = Color::Blue;
        assert!(Renderer::new(MemorySurface::new(100, 100), 0, blue, blue).is_err());
        assert!(Renderer::new(MemorySurface::new(0, 100), 10, blue, blue).is_err());
        assert!(Renderer::new(MemorySurface::new(105, 100), 10, blue, blue).is_err());
    }
}
