/// Geometry and text of a single content element, in document coordinates,
/// as observed at the moment of the query.
#[derive(Debug, Clone)]
pub struct ElementRef {
    pub text: String,
    pub offset_top: f64,
    pub height: f64,
}

/// Read-side view of the host page: element lookup plus viewport geometry.
///
/// Implementations are queried once at activation (to resolve the tracked
/// element and count its words) and again on every debounced sample, so
/// `viewport_height` and `scroll_offset` must reflect the current state.
pub trait PageView: Send + Sync {
    /// All elements matching `selector`. Tracking only activates when this
    /// resolves to exactly one element.
    fn query(&self, selector: &str) -> Vec<ElementRef>;

    fn viewport_height(&self) -> f64;

    fn scroll_offset(&self) -> f64;
}

/// Marker the host sends on every raw scroll event. Events arriving within
/// the debounce window collapse into a single sample.
#[derive(Debug, Clone, Copy)]
pub struct ScrollEvent;
