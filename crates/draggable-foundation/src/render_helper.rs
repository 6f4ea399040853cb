use draggable_core::{NodeKey, Result};

use crate::component_structure::ComponentStructure;
use crate::root::{root_information, ComponentResolver, TagRequest};
use crate::structure::{compute_nodes, Slots};

/// Runs the structure builder and root resolver for one render cycle.
pub fn compute_component_structure<T>(
    slots: &Slots<T>,
    tag: &TagRequest,
    real_list: Option<Vec<T>>,
    get_key: &dyn Fn(&T) -> NodeKey,
    resolver: &dyn ComponentResolver,
) -> Result<ComponentStructure<T>> {
    let nodes = compute_nodes(slots, real_list.as_deref(), get_key)?;
    let root = root_information(tag, resolver);
    Ok(ComponentStructure::new(nodes, root, real_list))
}
