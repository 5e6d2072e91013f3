//! Network channel constants.

/// Namespace of every zoom control channel
pub const CHANNEL_NAMESPACE: &str = "okzoomer";
/// Disables zoom entirely while connected
pub const DISABLE_ZOOM_CHANNEL: &str = "disable_zoom";
/// Disables divisor scrolling while connected
pub const DISABLE_ZOOM_SCROLLING_CHANNEL: &str = "disable_zoom_scrolling";
/// Forces the classic preset while connected
pub const FORCE_CLASSIC_MODE_CHANNEL: &str = "force_classic_mode";
/// Overrides the divisor range while connected
pub const FORCE_ZOOM_DIVISOR_CHANNEL: &str = "force_zoom_divisor";
/// Payload length of a single big-endian f64
pub const SINGLE_DIVISOR_PAYLOAD_LEN: usize = 8;
/// Payload length of a max/min pair of big-endian f64s
pub const DIVISOR_PAIR_PAYLOAD_LEN: usize = 16;
