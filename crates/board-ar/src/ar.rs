//! Drawing projected wireframes over a frame.
//!
//! Everything here degrades instead of failing: vertices behind the
//! camera drop the edges they anchor, and off-canvas pixels are clipped
//! by the rasterizer.

use board_ar_chessboard::BoardDetection;
use board_ar_core::math::{Iso3, Pt3};
use board_ar_core::Camera;
use board_ar_render::{color, rgb, Canvas};
use board_ar_scene::{Axes, SceneObject, Wireframe};

use crate::pose::PoseEstimate;

/// Radius of the anchor-corner marker, in pixels.
const ANCHOR_RADIUS: i32 = 5;

/// Length of the drawn board-frame axes, in squares.
const AXIS_LENGTH: f64 = 3.0;

fn project(camera: &Camera, pose: &Iso3, point: &Pt3) -> Option<(i32, i32)> {
    let px = camera.project_point(pose, point)?;
    Some((px.x.round() as i32, px.y.round() as i32))
}

/// Draw every wireframe edge whose endpoints both project in front of
/// the camera.
pub fn draw_wireframe(
    canvas: &mut Canvas,
    camera: &Camera,
    pose: &Iso3,
    wireframe: &Wireframe,
    color: u32,
) {
    let projected: Vec<Option<(i32, i32)>> = wireframe
        .vertices
        .iter()
        .map(|v| project(camera, pose, v))
        .collect();

    for &[a, b] in &wireframe.edges {
        if let (Some((x0, y0)), Some((x1, y1))) = (projected[a], projected[b]) {
            canvas.draw_line(x0, y0, x1, y1, color);
        }
    }
}

pub fn draw_scene_object(canvas: &mut Canvas, camera: &Camera, pose: &Iso3, object: &SceneObject) {
    let [r, g, b] = object.color;
    draw_wireframe(canvas, camera, pose, &object.wireframe, rgb(r, g, b));
}

/// Draw the board frame axes: X red, Y green, Z blue.
pub fn draw_axes(canvas: &mut Canvas, camera: &Camera, pose: &Iso3, axes: &Axes) {
    let Some((ox, oy)) = project(camera, pose, &axes.origin) else {
        return;
    };
    for (end, color) in [
        (&axes.x_end, color::RED),
        (&axes.y_end, color::GREEN),
        (&axes.z_end, color::BLUE),
    ] {
        if let Some((x, y)) = project(camera, pose, end) {
            canvas.draw_line(ox, oy, x, y, color);
        }
    }
}

/// Fill a yellow dot on the detection's `(0, 0)` corner, the one the
/// drawn axes originate from.
pub fn mark_anchor(canvas: &mut Canvas, detection: &BoardDetection) {
    if let Some(p) = detection.corner(0, 0) {
        canvas.draw_circle(
            p.x.round() as i32,
            p.y.round() as i32,
            ANCHOR_RADIUS,
            color::YELLOW,
        );
    }
}

/// The standard single-board annotation: anchor marker, board axes, then
/// the scene wireframes.
pub fn annotate_frame(
    canvas: &mut Canvas,
    camera: &Camera,
    detection: &BoardDetection,
    estimate: &PoseEstimate,
    scene: &[SceneObject],
) {
    mark_anchor(canvas, detection);
    draw_axes(canvas, camera, &estimate.pose, &Axes::new(AXIS_LENGTH));
    for object in scene {
        draw_scene_object(canvas, camera, &estimate.pose, object);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_ar_core::{Distortion, Intrinsics};
    use nalgebra::{Point2, Translation3, UnitQuaternion};

    fn straight_camera() -> Camera {
        Camera::new(
            Intrinsics {
                fx: 100.0,
                fy: 100.0,
                cx: 50.0,
                cy: 50.0,
                skew: 0.0,
            },
            Distortion::default(),
        )
    }

    fn straight_pose(z: f64) -> Iso3 {
        Iso3::from_parts(Translation3::new(0.0, 0.0, z), UnitQuaternion::identity())
    }

    #[test]
    fn edges_are_rasterized_between_projected_vertices() {
        let camera = straight_camera();
        let pose = straight_pose(5.0);
        let wf = Wireframe {
            vertices: vec![Pt3::new(0.0, 0.0, 0.0), Pt3::new(1.0, 0.0, 0.0)],
            edges: vec![[0, 1]],
        };

        let mut canvas = Canvas::new(100, 100);
        draw_wireframe(&mut canvas, &camera, &pose, &wf, color::WHITE);

        // (0,0,0) -> (50,50), (1,0,0) -> (70,50): the row between them
        // is fully painted.
        for x in 50..=70 {
            assert_eq!(Some(color::WHITE), canvas.get_pixel(x, 50), "x = {x}");
        }
        assert_eq!(Some(color::BLACK), canvas.get_pixel(49, 50));
        assert_eq!(Some(color::BLACK), canvas.get_pixel(71, 50));
    }

    #[test]
    fn edges_with_a_vertex_behind_the_camera_are_culled() {
        let camera = straight_camera();
        let pose = straight_pose(5.0);
        let wf = Wireframe {
            vertices: vec![Pt3::new(0.0, 0.0, 0.0), Pt3::new(0.0, 0.0, -10.0)],
            edges: vec![[0, 1]],
        };

        let mut canvas = Canvas::new(100, 100);
        draw_wireframe(&mut canvas, &camera, &pose, &wf, color::WHITE);
        assert!(canvas.data.iter().all(|&p| p == color::BLACK));
    }

    #[test]
    fn axes_use_the_conventional_colors() {
        let camera = straight_camera();
        let pose = straight_pose(10.0);

        let mut canvas = Canvas::new(100, 100);
        draw_axes(&mut canvas, &camera, &pose, &Axes::new(2.0));

        // Origin (50,50); X end -> (70,50), Y end -> (50,70). The Z axis
        // runs along the optical axis, so its line collapses onto the
        // origin pixel and repaints it blue.
        assert_eq!(Some(color::RED), canvas.get_pixel(70, 50));
        assert_eq!(Some(color::GREEN), canvas.get_pixel(50, 70));
        assert_eq!(Some(color::BLUE), canvas.get_pixel(50, 50));
    }

    #[test]
    fn anchor_marker_lands_on_the_first_corner() {
        let mut canvas = Canvas::new(64, 64);
        let detection = BoardDetection {
            rows: 2,
            cols: 2,
            corners: vec![
                Some(Point2::new(20.0, 30.0)),
                Some(Point2::new(40.0, 30.0)),
                Some(Point2::new(20.0, 50.0)),
                Some(Point2::new(40.0, 50.0)),
            ],
            completeness: 1.0,
        };

        mark_anchor(&mut canvas, &detection);
        assert_eq!(Some(color::YELLOW), canvas.get_pixel(20, 30));
        assert_eq!(Some(color::YELLOW), canvas.get_pixel(24, 30));
        assert_eq!(Some(color::BLACK), canvas.get_pixel(40, 30));
    }

    #[test]
    fn missing_anchor_corner_draws_nothing() {
        let mut canvas = Canvas::new(16, 16);
        let detection = BoardDetection {
            rows: 2,
            cols: 2,
            corners: vec![None, Some(Point2::new(5.0, 5.0)), None, None],
            completeness: 0.25,
        };
        mark_anchor(&mut canvas, &detection);
        assert!(canvas.data.iter().all(|&p| p == color::BLACK));
    }
}
