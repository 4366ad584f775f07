use std::f64::consts::{PI, TAU};

/// Canvas angle of the pointer. Canvas angles start on +x and grow clockwise,
/// so the top of the wheel sits at 3π/2.
pub const POINTER_ANGLE: f64 = 3.0 * PI / 2.0;

/// Index of the slice under the pointer when the wheel rests at `angle`.
///
/// Slice `i` is drawn from `angle + i·arc` to `angle + (i+1)·arc`, so the
/// winner is the slice whose wheel-relative span contains the pointer.
pub fn selected_index(angle: f64, slice_count: usize) -> usize {
    if slice_count == 0 {
        return 0;
    }
    let arc_size = TAU / slice_count as f64;

    let normalized = ((angle % TAU) + TAU) % TAU;
    let pointer_on_wheel = ((POINTER_ANGLE - normalized) + TAU) % TAU;

    (pointer_on_wheel / arc_size).floor() as usize % slice_count
}
