//! # lindiff-linear - Native `linear` namespace
//!
//! An implementation of the vector and matrix operations that lindiff checks
//! against its reference algebra. Arguments arrive as native values, are
//! flattened into row-major [`Grid`](grid::Grid)s, and results are returned
//! as nested native sequences.

pub mod grid;
pub mod ops;

use lindiff_interop::namespace::{Namespace, Registry};
use tracing::debug;

pub const NAMESPACE: &str = "linear";

/// Builds the `linear` namespace.
pub fn load() -> Namespace {
    let mut ns = Namespace::new(NAMESPACE);
    ns.define_fn("v+", ops::v_add);
    ns.define_fn("v-", ops::v_sub);
    ns.define_fn("v*", ops::v_mul);
    ns.define_fn("vd", ops::v_div);
    ns.define_fn("m+", ops::m_add);
    ns.define_fn("m-", ops::m_sub);
    ns.define_fn("m*", ops::m_mul);
    ns.define_fn("md", ops::m_div);
    ns.define_fn("dot", ops::dot);
    ns.define_fn("v*s", ops::v_scale);
    ns.define_fn("m*s", ops::m_scale);
    ns.define_fn("m*v", ops::m_times_v);
    ns.define_fn("m*m", ops::m_times_m);
    ns.define_fn("transpose", ops::transpose);
    debug!("linear: defined {} vars", ns.names().count());
    ns
}

pub fn register(registry: &mut Registry) {
    registry.register(NAMESPACE, load);
}
