pub use fxhash::FxHashMap as Map;
pub use fxhash::FxHashSet as Set;

pub type Fallible<T> = anyhow::Result<T>;

pub use anyhow::Context;
pub use anyhow::Error;
pub use anyhow::anyhow;
pub use anyhow::bail;

pub mod vecset;
