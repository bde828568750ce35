//! Analysis windows and network-size counting (§4.7-§4.8).

mod network_size;
mod window;

pub use network_size::count as network_size;
pub use window::{beacon_window, true_window, Window};
