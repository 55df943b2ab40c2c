use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::data::aggregate::PieChart;
use crate::state::AppState;

/// Max arc covered by one polygon segment of a donut slice.
const SEGMENT_ANGLE: f32 = TAU / 180.0;
const SCATTER_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

// ---------------------------------------------------------------------------
// Pie chart (painter-drawn donut)
// ---------------------------------------------------------------------------

/// Start/end angle of each slice, clockwise from 12 o'clock.
/// Empty when every slice is zero.
fn slice_angles(chart: &PieChart) -> Vec<(f32, f32)> {
    let total = chart.total();
    if total == 0 {
        return Vec::new();
    }
    let mut start = -FRAC_PI_2;
    chart
        .slices
        .iter()
        .map(|slice| {
            let end = start + slice.value as f32 / total as f32 * TAU;
            let span = (start, end);
            start = end;
            span
        })
        .collect()
}

/// Index of the slice covering `angle` (radians, same origin as [`slice_angles`]).
fn slice_at(angles: &[(f32, f32)], angle: f32) -> Option<usize> {
    // Normalise into [-π/2, 3π/2).
    let a = (angle + FRAC_PI_2).rem_euclid(TAU) - FRAC_PI_2;
    angles
        .iter()
        .position(|&(start, end)| a >= start && a < end)
}

fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + Vec2::angled(angle) * radius
}

/// Render the success pie chart: title, donut, legend.
pub fn pie_chart(ui: &mut Ui, state: &AppState) {
    let Some(chart) = &state.pie else {
        return;
    };

    ui.label(RichText::new(&chart.title).strong().size(16.0));

    let angles = slice_angles(chart);
    if angles.is_empty() {
        ui.label("No launches to show for this selection.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let side = ui.available_height().min(ui.available_width() * 0.6).max(120.0);
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
        let rect = response.rect;
        let center = rect.center();
        let outer = rect.width().min(rect.height()) * 0.45;
        let inner = outer * chart.hole;

        for (&(start, end), slice) in angles.iter().zip(&chart.slices) {
            let color = state
                .slice_colors
                .as_ref()
                .map(|c| c.color_for(chart.kind, &slice.name))
                .unwrap_or(Color32::LIGHT_BLUE);

            let steps = ((end - start) / SEGMENT_ANGLE).ceil().max(1.0) as usize;
            let step = (end - start) / steps as f32;
            for i in 0..steps {
                let a0 = start + step * i as f32;
                let a1 = a0 + step;
                painter.add(Shape::convex_polygon(
                    vec![
                        polar(center, outer, a0),
                        polar(center, outer, a1),
                        polar(center, inner, a1),
                        polar(center, inner, a0),
                    ],
                    color,
                    Stroke::NONE,
                ));
            }
        }

        // Slice borders
        let border = Stroke::new(1.5, ui.visuals().panel_fill);
        if angles.len() > 1 {
            for &(start, _) in &angles {
                painter.line_segment(
                    [polar(center, inner, start), polar(center, outer, start)],
                    border,
                );
            }
        }

        if let Some(pointer) = response.hover_pos() {
            let offset = pointer - center;
            let distance = offset.length();
            if distance >= inner && distance <= outer {
                if let Some(idx) = slice_at(&angles, offset.angle()) {
                    let slice = &chart.slices[idx];
                    let share = slice.value as f64 / chart.total() as f64 * 100.0;
                    response.on_hover_text(format!(
                        "{}\n{} ({share:.1}%)",
                        slice.name, slice.value
                    ));
                }
            }
        }

        // Legend
        ui.vertical(|ui: &mut Ui| {
            let total = chart.total() as f64;
            for slice in &chart.slices {
                let color = state
                    .slice_colors
                    .as_ref()
                    .map(|c| c.color_for(chart.kind, &slice.name))
                    .unwrap_or(Color32::LIGHT_BLUE);
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) = ui.allocate_exact_size(Vec2::splat(14.0), Sense::hover());
                    ui.painter().rect_filled(swatch, 3.0, color);
                    ui.label(format!(
                        "{}  {}  ({:.1}%)",
                        slice.name,
                        slice.value,
                        slice.value as f64 / total * 100.0
                    ));
                });
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Scatter chart (egui_plot)
// ---------------------------------------------------------------------------

/// Render success rate against payload mass.
pub fn scatter_chart(ui: &mut Ui, state: &AppState) {
    let Some(chart) = &state.scatter else {
        return;
    };

    ui.label(RichText::new(&chart.title).strong().size(16.0));

    let points: PlotPoints = chart
        .points
        .iter()
        .map(|p| [p.payload_mass_kg, p.success_rate])
        .collect();

    let x_label = chart.x_label.clone();
    let y_label = chart.y_label.clone();

    Plot::new("success_payload_scatter")
        .legend(Legend::default())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .include_y(0.0)
        .include_y(1.0)
        .include_x(state.payload_range.low)
        .include_x(state.payload_range.high)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |_name, value| {
            format!("{x_label}: {:.0}\n{y_label}: {:.2}", value.x, value.y)
        })
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name(format!("{} payloads", chart.points.len()))
                    .color(SCATTER_COLOR)
                    .radius(4.0)
                    .filled(true),
            );
        });
}

/// Central panel content: heading, pie above scatter.
pub fn dashboard(ui: &mut Ui, state: &AppState, heading: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(
            RichText::new(heading)
                .size(32.0)
                .color(Color32::from_rgb(0x50, 0x3D, 0x36)),
        );
    });
    ui.add_space(8.0);

    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch records file to begin  (File → Open…)");
        });
        return;
    }

    let pie_height = (ui.available_height() * 0.42).max(160.0);
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_height(pie_height);
        pie_chart(ui, state);
    });

    ui.add_space(8.0);
    ui.label(format!(
        "Payload range (Kg): {:.0} – {:.0}",
        state.payload_range.low, state.payload_range.high
    ));
    scatter_chart(ui, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{PIE_HOLE, PieKind, PieSlice};

    fn chart(values: &[usize]) -> PieChart {
        PieChart {
            title: "test".to_string(),
            kind: PieKind::Sites,
            slices: values
                .iter()
                .enumerate()
                .map(|(i, &value)| PieSlice {
                    name: format!("slice {i}"),
                    value,
                })
                .collect(),
            hole: PIE_HOLE,
        }
    }

    #[test]
    fn angles_cover_full_circle() {
        let angles = slice_angles(&chart(&[1, 1, 2]));
        assert_eq!(angles.len(), 3);
        assert!((angles[0].0 + FRAC_PI_2).abs() < 1e-6);
        assert!((angles[2].1 - (TAU - FRAC_PI_2)).abs() < 1e-5);
        assert!((angles[2].1 - angles[2].0 - TAU / 2.0).abs() < 1e-5);
    }

    #[test]
    fn zero_total_has_no_angles() {
        assert!(slice_angles(&chart(&[0, 0])).is_empty());
    }

    #[test]
    fn hit_test_wraps_around() {
        let angles = slice_angles(&chart(&[1, 1, 2]));
        assert_eq!(slice_at(&angles, -FRAC_PI_2 + 0.01), Some(0));
        assert_eq!(slice_at(&angles, 0.1), Some(1));
        // 9 o'clock, expressed as -π.
        assert_eq!(slice_at(&angles, -std::f32::consts::PI + 0.01), Some(2));
    }
}
