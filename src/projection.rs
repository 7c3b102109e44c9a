/// Camera distance from the origin along +Z.
pub const CAMERA_DISTANCE: f32 = 25.0;
/// Points at or closer than this camera-space depth are not visible.
pub const NEAR_PLANE: f32 = 1.0;
/// Field of view, degrees.
pub const FOV_DEG: f32 = 80.0;

/// A glyph quad mapped onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedGlyph {
    /// Pixel position of the quad center.
    pub x: f32,
    pub y: f32,
    /// Apparent on-screen size of a unit-sized quad.
    pub size: f32,
    /// Camera-space depth, for back-to-front ordering.
    pub depth: f32,
}

fn focal_length() -> f32 {
    1.0 / (FOV_DEG.to_radians() / 2.0).tan()
}

/// Project a world point through the current camera angles onto a viewport.
///
/// Rotates about X (pitch) then Y (yaw), places the camera `CAMERA_DISTANCE`
/// out on +Z looking at the origin, and applies a pinhole projection.
/// Returns `None` for points at or behind the near plane; callers skip
/// drawing those.
pub fn project(
    point: [f32; 3],
    pitch_deg: f32,
    yaw_deg: f32,
    viewport_w: f32,
    viewport_h: f32,
) -> Option<ProjectedGlyph> {
    let [x, y, z] = point;

    let (sin_p, cos_p) = pitch_deg.to_radians().sin_cos();
    let (sin_y, cos_y) = yaw_deg.to_radians().sin_cos();

    // Rotation about X.
    let ry = y * cos_p - z * sin_p;
    let rz = y * sin_p + z * cos_p;

    // Rotation about Y.
    let rx = x * cos_y + rz * sin_y;
    let rz = -x * sin_y + rz * cos_y;

    let depth = CAMERA_DISTANCE - rz;
    if depth <= NEAR_PLANE {
        return None;
    }

    let focal = focal_length();
    let ndc_x = rx * focal / depth;
    let ndc_y = ry * focal / depth;

    let half = viewport_w.min(viewport_h) / 2.0;
    Some(ProjectedGlyph {
        x: viewport_w / 2.0 + ndc_x * half,
        y: viewport_h / 2.0 - ndc_y * half,
        size: focal / depth * half,
        depth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_point_projects_to_viewport_center() {
        let p = project([0.0, 0.0, 0.0], 0.0, 0.0, 200.0, 100.0).unwrap();
        assert!((p.x - 100.0).abs() < 1e-4);
        assert!((p.y - 50.0).abs() < 1e-4);
        assert!((p.depth - CAMERA_DISTANCE).abs() < 1e-4);
    }

    #[test]
    fn depth_decreases_as_world_z_approaches_camera() {
        let mut last = f32::INFINITY;
        for z in [-17.0, -10.0, 0.0, 10.0, 20.0, 23.5] {
            let p = project([0.0, 0.0, z], 0.0, 0.0, 100.0, 100.0).unwrap();
            assert!(p.depth < last, "depth must shrink toward the camera");
            assert!((p.depth - (CAMERA_DISTANCE - z)).abs() < 1e-4);
            last = p.depth;
        }
    }

    #[test]
    fn near_plane_rejects() {
        assert!(project([0.0, 0.0, 24.0], 0.0, 0.0, 100.0, 100.0).is_none());
        assert!(project([0.0, 0.0, 30.0], 0.0, 0.0, 100.0, 100.0).is_none());
        assert!(project([0.0, 0.0, 23.9], 0.0, 0.0, 100.0, 100.0).is_some());
    }

    #[test]
    fn nearer_points_look_larger() {
        let far = project([0.0, 0.0, -10.0], 0.0, 0.0, 100.0, 100.0).unwrap();
        let near = project([0.0, 0.0, 10.0], 0.0, 0.0, 100.0, 100.0).unwrap();
        assert!(near.size > far.size);
    }

    #[test]
    fn yaw_moves_points_horizontally_only() {
        let straight = project([5.0, 0.0, 0.0], 0.0, 0.0, 100.0, 100.0).unwrap();
        let yawed = project([5.0, 0.0, 0.0], 0.0, 20.0, 100.0, 100.0).unwrap();
        assert!((straight.y - yawed.y).abs() < 1e-4);
        assert!((straight.x - yawed.x).abs() > 0.1);
    }
}
