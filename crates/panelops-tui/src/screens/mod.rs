//! Screen implementations. Each screen is a top-level Component.

mod dashboard;
mod queue;

pub use dashboard::DashboardScreen;
pub use queue::QueueScreen;

use crate::component::Component;
use crate::screen::ScreenId;

/// Every screen in tab order, boxed for the app's screen map.
pub fn build_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Dashboard,
            Box::new(DashboardScreen::new()) as Box<dyn Component>,
        ),
        (ScreenId::Queue, Box::new(QueueScreen::new())),
    ]
}
