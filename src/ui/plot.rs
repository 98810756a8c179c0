use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{
    Corner, Legend, Line, LineStyle as PlotLineStyle, Plot, PlotPoints, PlotUi, Points, Polygon,
    uniform_grid_spacer,
};

use crate::figure::{
    LineSeries, LineStyle, Panel, VIOLIN_HALF_WIDTH, Violin, ViolinBody, ViolinSide,
};

// ---------------------------------------------------------------------------
// One panel of the figure
// ---------------------------------------------------------------------------

/// Render a panel (title, optional note, plot) into the available space.
pub fn panel_plot(ui: &mut Ui, index: usize, panel: &Panel) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&panel.title);
        if let Some(note) = &panel.note {
            ui.small(note);
        }
    });

    let has_legend = panel.lines.iter().any(|l| l.name.is_some())
        || panel.violins.iter().any(|v| v.name.is_some());

    let mut plot = Plot::new(("figure_panel", index))
        .x_axis_label(&panel.x_label)
        .y_axis_label(&panel.y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if has_legend {
        plot = plot.legend(Legend::default().position(Corner::RightTop));
    }

    if !panel.x_ticks.is_empty() {
        let ticks = panel.x_ticks.clone();
        plot = plot
            .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
            .x_axis_formatter(move |mark, _range| {
                ticks
                    .iter()
                    .find(|(pos, _)| (pos - mark.value).abs() < 1e-6)
                    .map(|(_, label)| label.clone())
                    .unwrap_or_default()
            });
    }

    plot.show(ui, |plot_ui| {
        for violin in &panel.violins {
            draw_violin(plot_ui, violin);
        }
        for series in &panel.lines {
            draw_line(plot_ui, series);
        }
    });
}

fn draw_line(plot_ui: &mut PlotUi, series: &LineSeries) {
    let color = series.color.to_color32();
    let mut line = Line::new(PlotPoints::from(series.points.clone()))
        .color(color)
        .width(1.5);
    if series.style == LineStyle::Dashed {
        line = line.style(PlotLineStyle::dashed_loose());
    }
    if let Some(name) = &series.name {
        line = line.name(name);
    }
    plot_ui.line(line);

    if series.markers && !series.points.is_empty() {
        plot_ui.points(
            Points::new(PlotPoints::from(series.points.clone()))
                .radius(3.0)
                .color(color),
        );
    }
}

// ---------------------------------------------------------------------------
// Violins
// ---------------------------------------------------------------------------

/// Horizontal extent `(left, right)` of a violin half-width `w` around `pos`.
fn extent(pos: f64, side: ViolinSide, w: f64) -> (f64, f64) {
    let w = w * VIOLIN_HALF_WIDTH;
    match side {
        ViolinSide::Both => (pos - w, pos + w),
        ViolinSide::Left => (pos - w, pos),
        ViolinSide::Right => (pos, pos + w),
    }
}

fn draw_violin(plot_ui: &mut PlotUi, violin: &Violin) {
    let fill = violin.color.to_color32();
    let outline = Color32::from_gray(60);

    match &violin.body {
        ViolinBody::Density(curve) => {
            // Egui fills convex polygons only, so the body is drawn slice by slice.
            for pair in curve.windows(2) {
                let [y0, w0] = pair[0];
                let [y1, w1] = pair[1];
                let (l0, r0) = extent(violin.position, violin.side, w0);
                let (l1, r1) = extent(violin.position, violin.side, w1);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(vec![[l0, y0], [r0, y0], [r1, y1], [l1, y1]]))
                        .fill_color(fill)
                        .stroke(Stroke::new(0.5, fill)),
                );
            }
            let left: Vec<[f64; 2]> = curve
                .iter()
                .map(|&[y, w]| [extent(violin.position, violin.side, w).0, y])
                .collect();
            let right: Vec<[f64; 2]> = curve
                .iter()
                .map(|&[y, w]| [extent(violin.position, violin.side, w).1, y])
                .collect();
            plot_ui.line(Line::new(PlotPoints::from(left)).color(outline).width(1.0));
            plot_ui.line(Line::new(PlotPoints::from(right)).color(outline).width(1.0));
        }
        ViolinBody::Point(value) => {
            let (l, r) = extent(violin.position, violin.side, 1.0);
            plot_ui.line(
                Line::new(PlotPoints::from(vec![[l, *value], [r, *value]]))
                    .color(fill)
                    .width(2.0),
            );
        }
    }

    for (i, &[value, w]) in violin.quartiles.iter().enumerate() {
        let (l, r) = extent(violin.position, violin.side, w);
        let mut mark = Line::new(PlotPoints::from(vec![[l, value], [r, value]]))
            .color(outline)
            .width(1.0);
        // Median solid, outer quartiles dashed.
        if i != 1 {
            mark = mark.style(PlotLineStyle::dashed_dense());
        }
        plot_ui.line(mark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-12 && (a.1 - b.1).abs() < 1e-12
    }

    #[test]
    fn extent_by_side() {
        assert!(close(extent(2.0, ViolinSide::Both, 1.0), (1.6, 2.4)));
        assert!(close(extent(2.0, ViolinSide::Left, 0.5), (1.8, 2.0)));
        assert!(close(extent(2.0, ViolinSide::Right, 0.5), (2.0, 2.2)));
    }
}
