//! 매질 기준표와 매질명 해석기.

pub mod resolver;
pub mod velocity_table;

pub use resolver::{MatchKind, MediumResolver, Resolution};
pub use velocity_table::{MediumConfig, MediumEntry, TableError, VelocityEntry, VelocityTable};
