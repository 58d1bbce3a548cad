use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

use super::fonts::{self, Font};

pub(crate) const PAGE_WIDTH: f32 = 595.28;
pub(crate) const PAGE_HEIGHT: f32 = 841.89;
pub(crate) const MARGIN: f32 = 50.0;
pub(crate) const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
pub(crate) const CONTENT_TOP: f32 = PAGE_HEIGHT - 80.0;
pub(crate) const CONTENT_BOTTOM: f32 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub(crate) const PRIMARY: Rgb = Rgb(0.118, 0.227, 0.541);
    pub(crate) const ACCENT: Rgb = Rgb(0.918, 0.345, 0.047);
    pub(crate) const TEXT: Rgb = Rgb(0.16, 0.16, 0.18);
    pub(crate) const MUTED: Rgb = Rgb(0.42, 0.44, 0.48);
    pub(crate) const LIGHT: Rgb = Rgb(0.94, 0.95, 0.98);
    pub(crate) const BORDER: Rgb = Rgb(0.82, 0.84, 0.88);
    pub(crate) const WHITE: Rgb = Rgb(1.0, 1.0, 1.0);
    pub(crate) const DANGER: Rgb = Rgb(0.78, 0.13, 0.13);

    fn operands(self) -> Vec<Object> {
        vec![self.0.into(), self.1.into(), self.2.into()]
    }
}

/// Accumulates drawing operations page by page with a top-down Y cursor.
pub(crate) struct Canvas {
    finished: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    y: f32,
}

impl Canvas {
    pub(crate) fn new() -> Self {
        Canvas {
            finished: Vec::new(),
            current: Vec::new(),
            y: CONTENT_TOP,
        }
    }

    pub(crate) fn y(&self) -> f32 {
        self.y
    }

    pub(crate) fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    pub(crate) fn new_page(&mut self) {
        self.finished.push(std::mem::take(&mut self.current));
        self.y = CONTENT_TOP;
    }

    /// Starts a new page unless `height` points still fit above the bottom margin.
    pub(crate) fn ensure(&mut self, height: f32) {
        if self.y - height < CONTENT_BOTTOM && self.y < CONTENT_TOP {
            self.new_page();
        }
    }

    pub(crate) fn finish(mut self) -> Vec<Vec<Operation>> {
        self.finished.push(self.current);
        self.finished
    }

    pub(crate) fn text(&mut self, x: f32, baseline: f32, font: Font, size: f32, color: Rgb, text: &str) {
        push_text(&mut self.current, x, baseline, font, size, color, text);
    }

    pub(crate) fn text_right(&mut self, right: f32, baseline: f32, font: Font, size: f32, color: Rgb, text: &str) {
        let x = right - fonts::text_width(text, size, font);
        self.text(x, baseline, font, size, color, text);
    }

    pub(crate) fn text_centered(&mut self, baseline: f32, font: Font, size: f32, color: Rgb, text: &str) {
        let x = (PAGE_WIDTH - fonts::text_width(text, size, font)) / 2.0;
        self.text(x, baseline, font, size, color, text);
    }

    pub(crate) fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        push_rect(&mut self.current, x, y, width, height, color);
    }

    pub(crate) fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Rgb) {
        push_line(&mut self.current, x1, y1, x2, y2, width, color);
    }

    /// Draws wrapped text at the cursor, breaking pages between lines.
    pub(crate) fn paragraph(
        &mut self,
        x: f32,
        width: f32,
        font: Font,
        size: f32,
        color: Rgb,
        text: &str,
    ) {
        let leading = size * 1.45;
        for line in fonts::wrap(text, width, size, font) {
            self.ensure(leading);
            self.advance(leading);
            self.text(x, self.y + size * 0.3, font, size, color, &line);
        }
    }
}

pub(crate) fn push_text(
    ops: &mut Vec<Operation>,
    x: f32,
    baseline: f32,
    font: Font,
    size: f32,
    color: Rgb,
    text: &str,
) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("rg", color.operands()));
    ops.push(Operation::new(
        "Tf",
        vec![font.resource_name().into(), size.into()],
    ));
    ops.push(Operation::new("Td", vec![x.into(), baseline.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(fonts::encode(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

pub(crate) fn push_rect(ops: &mut Vec<Operation>, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
    ops.push(Operation::new("rg", color.operands()));
    ops.push(Operation::new(
        "re",
        vec![x.into(), y.into(), width.into(), height.into()],
    ));
    ops.push(Operation::new("f", vec![]));
}

pub(crate) fn push_line(
    ops: &mut Vec<Operation>,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    width: f32,
    color: Rgb,
) {
    ops.push(Operation::new("RG", color.operands()));
    ops.push(Operation::new("w", vec![width.into()]));
    ops.push(Operation::new("m", vec![x1.into(), y1.into()]));
    ops.push(Operation::new("l", vec![x2.into(), y2.into()]));
    ops.push(Operation::new("S", vec![]));
}
