//! Source scanning: turning host-discovered anchors into fragments.
//!
//! The host exposes the candidate content through the [`Discovery`] trait;
//! this module walks those candidates and wraps each one in a [`Fragment`]
//! carrying the shared lock and velocity options.

use crate::fragment::{Fragment, FragmentOptions};
use crate::host::Discovery;

/// Borrowing view over the host's discovery surface.
pub struct Src<'a> {
    discovery: &'a mut dyn Discovery,
}

impl<'a> Src<'a> {
    /// Wrap a discovery implementation.
    pub fn new(discovery: &'a mut dyn Discovery) -> Self {
        Self { discovery }
    }

    /// Collect every candidate anchor into a fragment.
    ///
    /// The same options apply to every fragment; per-anchor velocity and
    /// draw order still come from the anchor itself unless the options
    /// override them.
    pub fn create_fragments(&mut self, options: &FragmentOptions) -> Vec<Fragment> {
        self.discovery
            .find_candidates()
            .into_iter()
            .map(|anchor| Fragment::from_anchor(anchor, options))
            .collect()
    }
}
