//! Visualization utilities for footbot_diffusion
//!
//! Renders an arena and a robot trajectory with gnuplot.

use std::f64::consts::PI;

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::{ControllerError, ControllerResult, Pose2D};
use crate::simulation::{Arena, SimulationReport, FOOTBOT_BODY_RADIUS};

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const GRAY: &str = "#808080";

    pub const WALL: &str = BLACK;
    pub const OBSTACLE: &str = GRAY;
    pub const START: &str = GREEN;
    pub const TRAJECTORY: &str = "#35C788";
    pub const END: &str = BLUE;
}

/// Points on a circle outline, closed
fn circle(cx: f64, cy: f64, radius: f64, segments: usize) -> (Vec<f64>, Vec<f64>) {
    (0..=segments)
        .map(|i| {
            let t = 2.0 * PI * i as f64 / segments as f64;
            (cx + radius * t.cos(), cy + radius * t.sin())
        })
        .unzip()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LayerKind {
    Lines,
    Points,
}

/// One series, drawn when the figure is rendered
#[derive(Debug, Clone)]
struct Layer {
    kind: LayerKind,
    x: Vec<f64>,
    y: Vec<f64>,
    color: String,
    caption: String,
    width: f64,
}

/// Main visualizer struct
///
/// Series are collected first and drawn onto a single set of axes when
/// the figure is shown or saved.
pub struct Visualizer {
    figure: Figure,
    layers: Vec<Layer>,
    title: String,
    x_label: String,
    y_label: String,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
}

impl Visualizer {
    pub fn new() -> Self {
        Self {
            figure: Figure::new(),
            layers: Vec::new(),
            title: String::new(),
            x_label: "X [m]".to_string(),
            y_label: "Y [m]".to_string(),
            x_range: None,
            y_range: None,
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    fn push(&mut self, kind: LayerKind, x: Vec<f64>, y: Vec<f64>, color: &str, caption: &str, width: f64) {
        self.layers.push(Layer {
            kind,
            x,
            y,
            color: color.to_string(),
            caption: caption.to_string(),
            width,
        });
    }

    /// Plot walls and cylinders; also fixes the axis ranges to the arena
    pub fn plot_arena(&mut self, arena: &Arena) -> &mut Self {
        let hw = arena.width / 2.0;
        let hh = arena.height / 2.0;
        self.x_range = Some((-hw, hw));
        self.y_range = Some((-hh, hh));

        self.push(
            LayerKind::Lines,
            vec![-hw, hw, hw, -hw, -hw],
            vec![-hh, -hh, hh, hh, -hh],
            colors::WALL,
            "Walls",
            2.0,
        );
        for (i, c) in arena.cylinders.iter().enumerate() {
            let (x, y) = circle(c.center.x, c.center.y, c.radius, 24);
            let caption = if i == 0 { "Obstacles" } else { "" };
            self.push(LayerKind::Lines, x, y, colors::OBSTACLE, caption, 1.5);
        }
        self
    }

    /// Plot a trajectory from a sequence of poses
    pub fn plot_trajectory(&mut self, trajectory: &[Pose2D]) -> &mut Self {
        let x = trajectory.iter().map(|p| p.x).collect();
        let y = trajectory.iter().map(|p| p.y).collect();
        self.push(LayerKind::Lines, x, y, colors::TRAJECTORY, "Trajectory", 2.0);
        self
    }

    /// Plot robot body outline with a heading indicator
    pub fn plot_robot(&mut self, pose: &Pose2D, color: &str, caption: &str) -> &mut Self {
        let (x, y) = circle(pose.x, pose.y, FOOTBOT_BODY_RADIUS, 24);
        let end_x = pose.x + FOOTBOT_BODY_RADIUS * pose.yaw.cos();
        let end_y = pose.y + FOOTBOT_BODY_RADIUS * pose.yaw.sin();

        self.push(LayerKind::Lines, x, y, color, caption, 1.5);
        self.push(LayerKind::Lines, vec![pose.x, end_x], vec![pose.y, end_y], color, "", 2.0);
        self.push(LayerKind::Points, vec![pose.x], vec![pose.y], color, "", 0.5);
        self
    }

    /// Arena, trajectory, start and end pose of a finished run
    pub fn plot_report(&mut self, arena: &Arena, report: &SimulationReport) -> &mut Self {
        self.plot_arena(arena);
        self.plot_trajectory(&report.trajectory);
        if let (Some(start), Some(end)) = (report.trajectory.first(), report.trajectory.last()) {
            self.plot_robot(start, colors::START, "Start");
            self.plot_robot(end, colors::END, "End");
        }
        self
    }

    /// Finalize and show the plot
    pub fn show(&mut self) -> ControllerResult<()> {
        self.render();
        self.figure
            .show()
            .map(|_| ())
            .map_err(|e| ControllerError::Visualization(e.to_string()))
    }

    /// Save plot to PNG file
    pub fn save_png(&mut self, path: &str, width: u32, height: u32) -> ControllerResult<()> {
        self.render();
        self.figure
            .save_to_png(path, width, height)
            .map_err(|e| ControllerError::Visualization(e.to_string()))
    }

    /// Save plot to SVG file
    pub fn save_svg(&mut self, path: &str) -> ControllerResult<()> {
        self.render();
        self.figure
            .save_to_svg(path, 800, 800)
            .map_err(|e| ControllerError::Visualization(e.to_string()))
    }

    fn render(&mut self) {
        self.figure = Figure::new();
        let axes = self.figure.axes2d();

        for layer in &self.layers {
            match layer.kind {
                LayerKind::Lines => {
                    axes.lines(&layer.x, &layer.y, &[
                        Caption(&layer.caption),
                        Color(&layer.color),
                        LineWidth(layer.width),
                    ]);
                }
                LayerKind::Points => {
                    axes.points(&layer.x, &layer.y, &[
                        Caption(&layer.caption),
                        Color(&layer.color),
                        PointSymbol('O'),
                        PointSize(layer.width),
                    ]);
                }
            }
        }

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label(&self.x_label, &[]);
        axes.set_y_label(&self.y_label, &[]);

        if let Some((min, max)) = self.x_range {
            axes.set_x_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some((min, max)) = self.y_range {
            axes.set_y_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        axes.set_aspect_ratio(AutoOption::Fix(1.0));
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Point2D;

    #[test]
    fn test_circle_is_closed() {
        let (x, y) = circle(1.0, 2.0, 0.5, 12);
        assert_eq!(x.len(), 13);
        assert!((x[0] - x[12]).abs() < 1e-10);
        assert!((y[0] - y[12]).abs() < 1e-10);
        assert!((x[3] - 1.0).abs() < 1e-10);
        assert!((y[3] - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_plot_arena_sets_ranges() {
        let arena = Arena::new(3.0, 2.0).with_cylinder(Point2D::new(0.5, 0.5), 0.1);
        let mut vis = Visualizer::new();
        vis.plot_arena(&arena);
        assert_eq!(vis.x_range, Some((-1.5, 1.5)));
        assert_eq!(vis.y_range, Some((-1.0, 1.0)));
        assert_eq!(vis.layers.len(), 2);
    }

    #[test]
    fn test_plot_report_layers() {
        let arena = Arena::new(2.0, 2.0);
        let report = SimulationReport {
            trajectory: vec![Pose2D::origin(), Pose2D::new(0.1, 0.0, 0.0)],
            collisions: 0,
            contacts: 0,
            steps: 1,
        };
        let mut vis = Visualizer::new();
        vis.plot_report(&arena, &report);
        // walls, trajectory, and three series per robot marker
        assert_eq!(vis.layers.len(), 8);
        assert_eq!(vis.layers[1].x, vec![0.0, 0.1]);
    }
}
