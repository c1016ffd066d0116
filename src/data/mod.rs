pub mod dataset;
pub mod types;

pub use dataset::{
    load_dataset, parse_dataset, resolve_scorer_side, DataError, Dataset, DatasetMeta,
};
pub use types::{GameId, Goal, Player, PlayerId, Roster, Side};

#[cfg(test)]
pub(crate) use types::fixtures;
