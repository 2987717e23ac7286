//! Example widget rendering one frame headlessly.
//!
//! Builds a sample CPU widget tree, runs the full measure/arrange/paint
//! pipeline with the cosmic-text shaper and writes the finished frame to a
//! PNG. In production the buffer goes to the surface host instead, and the
//! platform event pump drives repaints.

use std::fs::File;

use tracing_subscriber::EnvFilter;

use ledge_core::{
    CanvasCommand, Color, FontSpec, Node, PixelBuffer, RenderParams, SiblingWindow,
    StripGeometry, arrange, find_slot, force_height, measure, render,
};
use ledge_overlay::CosmicShaper;

const STRIP_HEIGHT: i32 = 40;
const DPI_SCALE: f32 = 1.0;

fn build_sample_widget() -> Node {
    let label_font = FontSpec::new("sans-serif", 12.0);
    let value_font = FontSpec::new("sans-serif", 14.0).bold();

    // A small load gauge drawn with canvas primitives.
    let gauge = Node::canvas(vec![
        CanvasCommand::Circle {
            cx: 12.0,
            cy: 12.0,
            radius: 11.0,
            color: Color::rgba(255, 255, 255, 90),
        },
        CanvasCommand::FilledCircle {
            cx: 12.0,
            cy: 12.0,
            radius: 3.0,
            color: Color::rgb(120, 200, 120),
        },
        CanvasCommand::Line {
            x0: 12.0,
            y0: 12.0,
            x1: 19.0,
            y1: 5.0,
            thickness: 2.0,
            color: Color::rgb(120, 200, 120),
        },
    ])
    .with_size(24.0, 24.0);

    Node::root().child(
        Node::panel()
            .with_background(Color::rgba(32, 32, 32, 220))
            .with_hover_background(Color::rgba(60, 60, 60, 220))
            .with_corner_radius(6.0)
            .with_tooltip("Processor", "4 cores, 37% load")
            .child(
                Node::hstack(6.0)
                    .child(gauge)
                    .child(
                        Node::vstack(1.0)
                            .child(Node::text("CPU", label_font, Color::rgb(160, 160, 160)))
                            .child(Node::text("37%", value_font, Color::WHITE)),
                    ),
            ),
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut shaper = CosmicShaper::new();

    let mut tree = build_sample_widget();
    measure(&mut tree, DPI_SCALE, &mut shaper);
    force_height(&mut tree, STRIP_HEIGHT);
    arrange(&mut tree);

    let width = tree.layout.width.max(1);
    tracing::info!(width, height = STRIP_HEIGHT, "widget measured");

    // Where would this widget sit on a 1280px strip next to one sibling?
    let strip = StripGeometry {
        width: 1280,
        height: STRIP_HEIGHT,
        reserved_left: Some(1000),
        fallback_inset: 200,
    };
    let siblings = [SiblingWindow::new("clock", 900, 96)];
    let slot = find_slot(width, "cpu", &strip, &siblings, 4, &[]);
    tracing::info!(x = slot.x, valid = slot.is_valid, "slot computed");

    let mut buffer = PixelBuffer::new(width as u32, STRIP_HEIGHT as u32);
    render(&mut buffer, &tree, &mut shaper, &RenderParams::default());

    if let Err(e) = write_frame_png("ledge-frame.png", &buffer) {
        eprintln!("Failed to write frame: {}", e);
        return;
    }
    println!("Wrote ledge-frame.png ({}x{})", width, STRIP_HEIGHT);
}

/// Dump a frame as straight-alpha RGBA for inspection.
fn write_frame_png(path: &str, buffer: &PixelBuffer) -> Result<(), Box<dyn std::error::Error>> {
    let mut rgba = Vec::with_capacity(buffer.pixels().len() * 4);
    for &pixel in buffer.pixels() {
        let a = (pixel >> 24) & 0xff;
        let unmul = |c: u32| {
            if a == 0 { 0 } else { (c * 255 / a).min(255) as u8 }
        };
        rgba.push(unmul((pixel >> 16) & 0xff));
        rgba.push(unmul((pixel >> 8) & 0xff));
        rgba.push(unmul(pixel & 0xff));
        rgba.push(a as u8);
    }

    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(file, buffer.width(), buffer.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&rgba)?;
    Ok(())
}
