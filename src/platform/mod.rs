//! Platform scaling between browser coordinates and simulation space.
//!
//! The canvas backing store is sized in device pixels while pointer events
//! arrive in CSS pixels; the simulation only ever sees its own fixed
//! coordinate space.

use glam::Vec2;

use crate::consts::{MAX_FRAME_DT, SIM_HEIGHT, SIM_WIDTH};

/// Translate a pointer position (CSS pixels, relative to the viewport) into
/// simulation coordinates, given the canvas bounding rect.
pub fn pointer_to_sim(
    client_x: f32,
    client_y: f32,
    rect_left: f32,
    rect_top: f32,
    rect_width: f32,
    rect_height: f32,
) -> Vec2 {
    let x = (client_x - rect_left) / rect_width * SIM_WIDTH;
    let y = (client_y - rect_top) / rect_height * SIM_HEIGHT;
    Vec2::new(x, y)
}

/// Clamp a raw frame delta (seconds). Tab switches and debugger pauses
/// produce multi-second gaps that would otherwise teleport every balloon.
pub fn clamp_frame_dt(dt: f32) -> f32 {
    dt.clamp(0.0, MAX_FRAME_DT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_scaling() {
        // Canvas displayed at half sim size, offset by (10, 20)
        let p = pointer_to_sim(10.0, 20.0, 10.0, 20.0, 240.0, 400.0);
        assert_eq!(p, Vec2::new(0.0, 0.0));

        let p = pointer_to_sim(130.0, 220.0, 10.0, 20.0, 240.0, 400.0);
        assert_eq!(p, Vec2::new(240.0, 400.0));

        let p = pointer_to_sim(250.0, 420.0, 10.0, 20.0, 240.0, 400.0);
        assert_eq!(p, Vec2::new(SIM_WIDTH, SIM_HEIGHT));
    }

    #[test]
    fn test_frame_dt_clamp() {
        assert_eq!(clamp_frame_dt(1.0 / 60.0), 1.0 / 60.0);
        assert_eq!(clamp_frame_dt(5.0), MAX_FRAME_DT);
        assert_eq!(clamp_frame_dt(-0.5), 0.0);
    }
}
