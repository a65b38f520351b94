use log::{debug, trace};

use crate::network::{Capacity, FlowNetwork, NetworkError};
use crate::residual::ResidualNetwork;

/// Maximize the flow through `network` by shortest augmenting paths (Edmonds-Karp).
///
/// Flow already present on the network is kept and extended. On return every edge's flow field
/// holds the final assignment and the returned value is the flow leaving the source.
pub fn max_flow(network: &mut FlowNetwork) -> Result<Capacity, NetworkError> {
    let mut residual = ResidualNetwork::new(network)?;
    let mut augmentations = 0usize;

    while let Some(path) = residual.find_augmenting_path() {
        trace!("augmenting {} along a path of {} arcs", path.bottleneck(), path.arcs().len());
        residual.augment(&path);
        augmentations += 1;
    }

    let value = residual.network().value()?;
    debug!("max flow {value} reached after {augmentations} augmentations");
    Ok(value)
}
