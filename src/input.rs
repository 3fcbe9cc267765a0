use gallery_core::navigation::TouchPoint;
use smallvec::SmallVec;
use web_sys as web;

pub type Touches = SmallVec<[TouchPoint; 4]>;

// ---------------- Touch helpers ----------------

/// Client-space positions of every touch in `list`, in list order.
pub fn touch_points(list: &web::TouchList) -> Touches {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| (t.client_x() as f32, t.client_y() as f32))
        .collect()
}

/// Finger offset from the centre of an element's box, in CSS pixels.
#[inline]
pub fn offset_from_center(
    touch: TouchPoint,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
) -> (f32, f32) {
    let cx = left + width * 0.5;
    let cy = top + height * 0.5;
    (touch.0 - cx, touch.1 - cy)
}

/// Offset of the first touch from the joystick base centre.
pub fn joystick_offset(ev: &web::TouchEvent, base: &web::Element) -> Option<(f32, f32)> {
    let first = touch_points(&ev.target_touches()).into_iter().next()?;
    let rect = base.get_bounding_client_rect();
    Some(offset_from_center(
        first,
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    ))
}

/// True when the knob sits outside the dead zone on either axis.
#[inline]
pub fn knob_is_active(knob: (f32, f32), max_throw: f32, dead_zone: f32) -> bool {
    if max_throw <= 0.0 {
        return false;
    }
    (knob.0 / max_throw).abs() > dead_zone || (knob.1 / max_throw).abs() > dead_zone
}

// ---------------- Mouse helpers ----------------

/// Relative pointer motion while locked. Browsers occasionally report a
/// huge spurious jump right after locking; those deltas are dropped.
#[inline]
pub fn sanitize_movement(dx: f32, dy: f32, max_jump: f32) -> Option<(f32, f32)> {
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }
    if dx.abs() > max_jump || dy.abs() > max_jump {
        return None;
    }
    Some((dx, dy))
}
