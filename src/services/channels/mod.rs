pub mod naming;
pub mod provisioner;
pub mod reaper;
pub mod registry;

pub use provisioner::{ChannelProvisioner, ProvisionRequest, ProvisionedChannel};
pub use reaper::{EmptyChannelReaper, ReadyGate, ReapOutcome, SweepReport};
pub use registry::{ChannelRegistry, TemporaryChannel};
