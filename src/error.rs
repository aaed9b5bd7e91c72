use thiserror::Error;

use crate::patch::PatchError;
use crate::store::StoreError;

pub type TrackerResult<T> = core::result::Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("not signed in")]
    NotAuthenticated,
    #[error("no milestone with id {0}")]
    MilestoneNotFound(u32),
    #[error("{0}")]
    Patch(#[from] PatchError),
    #[error("{0}")]
    Store(#[from] StoreError),
}
