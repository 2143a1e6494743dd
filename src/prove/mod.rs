mod block;
mod extents;
mod types;

pub use block::RoundBlock;
pub use extents::{allocate_buckets, analyse, Analysis, Bucket, Remainder};
pub use types::{
    bell_index,
    bell_symbol,
    stage_name,
    FixedBell,
    FixedBells,
    Row,
    Stage,
    BELLS,
    MAX_STAGE,
};
