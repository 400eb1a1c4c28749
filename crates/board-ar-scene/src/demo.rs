//! Ready-made demo objects.

use board_ar_core::math::Pt3;

use crate::wireframe::Wireframe;

pub const GREEN: [u8; 3] = [0, 255, 0];
pub const RED: [u8; 3] = [255, 0, 0];
pub const YELLOW: [u8; 3] = [255, 255, 0];
pub const CYAN: [u8; 3] = [0, 255, 255];

/// A wireframe paired with its draw color.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub wireframe: Wireframe,
    pub color: [u8; 3],
}

impl SceneObject {
    pub fn new(wireframe: Wireframe, color: [u8; 3]) -> Self {
        Self { wireframe, color }
    }
}

/// The single-board demo scene: four pillars on the board, a fifth
/// floating above them, a cuboid spanning the pillar field and a pyramid
/// stacked on top.
pub fn stock_scene() -> Vec<SceneObject> {
    let pillar_radius = 0.5;
    let pillar_height = 3.0;
    let segments = 50;

    let pillar_bases = [
        Pt3::new(4.0, 6.0, 0.0),
        Pt3::new(4.0, 3.0, 0.0),
        Pt3::new(1.0, 6.0, 0.0),
        Pt3::new(1.0, 3.0, 0.0),
        Pt3::new(3.5, 4.5, pillar_height + 2.0),
    ];

    let mut objects: Vec<SceneObject> = pillar_bases
        .iter()
        .map(|&base| {
            SceneObject::new(
                Wireframe::cylinder(base, pillar_radius, pillar_height, segments),
                GREEN,
            )
        })
        .collect();

    objects.push(SceneObject::new(
        Wireframe::cuboid(Pt3::new(6.0, 2.0, 5.0), Pt3::new(0.0, 7.0, 3.0)),
        YELLOW,
    ));

    objects.push(SceneObject::new(
        Wireframe::pyramid_with_base(
            [
                Pt3::new(5.0, 3.0, 8.0),
                Pt3::new(1.0, 3.0, 8.0),
                Pt3::new(1.0, 6.0, 8.0),
                Pt3::new(5.0, 6.0, 8.0),
            ],
            Pt3::new(3.5, 4.5, 10.0),
        ),
        CYAN,
    ));

    objects
}

/// The two-board demo pair: a red cylinder for the first board, a green
/// pyramid for the second.
pub fn dual_board_objects() -> (SceneObject, SceneObject) {
    let cylinder = SceneObject::new(
        Wireframe::cylinder(Pt3::new(3.0, 4.0, 2.0), 0.5, 3.0, 20),
        RED,
    );
    let pyramid = SceneObject::new(Wireframe::pyramid(Pt3::new(3.0, 4.0, 2.0), 0.5, 2.0), GREEN);
    (cylinder, pyramid)
}
