use shared::render::{LABEL_COLOR, LABEL_FONT, POINTER_COLOR};
use shared::{SliceSet, WheelLayout, WheelSurface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Paints the wheel onto a 2D canvas.
pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;

        Ok(Self { canvas, context })
    }

    fn paint(&self, layout: &WheelLayout) {
        let context = &self.context;
        let center = layout.center;

        context.clear_rect(0.0, 0.0, layout.width, layout.height);

        for sector in &layout.sectors {
            context.begin_path();
            context.move_to(center.x, center.y);
            let _ = context.arc(
                center.x,
                center.y,
                layout.radius,
                sector.start_angle,
                sector.end_angle,
            );
            context.close_path();
            context.set_fill_style_str(&sector.color);
            context.fill();

            // Label runs along the sector's bisector, right-aligned near the rim
            context.save();
            let _ = context.translate(center.x, center.y);
            let _ = context.rotate(sector.label_angle);
            context.set_text_align("right");
            context.set_font(LABEL_FONT);
            context.set_fill_style_str(LABEL_COLOR);
            let _ = context.fill_text(&sector.label, sector.label_anchor.x, sector.label_anchor.y);
            context.restore();
        }

        // Pointer
        let [left, right, apex] = layout.pointer;
        context.save();
        context.begin_path();
        context.move_to(left.x, left.y);
        context.line_to(right.x, right.y);
        context.line_to(apex.x, apex.y);
        context.close_path();
        context.set_fill_style_str(POINTER_COLOR);
        context.fill();
        context.restore();
    }
}

impl WheelSurface for CanvasPainter {
    fn draw(&mut self, slices: &SliceSet, angle: f64) {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;
        self.paint(&WheelLayout::compute(width, height, slices, angle));
    }
}
