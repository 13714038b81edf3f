//! Work item and collaborator traits for batch execution

use async_trait::async_trait;

/// One unit of work: an input paired with its submission index
///
/// Created by the producer before dispatch, immutable once created, and
/// consumed by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem<I> {
    pub index: usize,
    pub input: I,
}

/// The completed counterpart of a [`WorkItem`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkResult<I, O> {
    pub index: usize,
    pub input: I,
    pub output: O,
}

/// Produces one input per submission index
///
/// Must be side-effect-free other than randomness; it is invoked exactly
/// once per index, in index order, before the work item is dispatched.
pub trait InputProducer: Send + Sync {
    type Input;

    fn produce(&self, index: usize) -> Self::Input;
}

/// Adapter turning a plain closure into an [`InputProducer`]
pub struct FnProducer<F>(pub F);

impl<I, F> InputProducer for FnProducer<F>
where
    F: Fn(usize) -> I + Send + Sync,
{
    type Input = I;

    fn produce(&self, index: usize) -> I {
        (self.0)(index)
    }
}

/// The remote call whose latency and failure modes drive the batch design
///
/// The operation carries its own timeout; an expired timeout surfaces as
/// an `Err` and is treated like any other failure.
#[async_trait]
pub trait RemoteOperation: Send + Sync {
    type Input: Send + Sync;
    type Output: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn execute(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}
