use crate::Epoch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Begin polling `run_id`; results must carry `epoch` back.
    StartPolling { run_id: String, epoch: Epoch },
    /// Cancel all scheduled and in-flight attempts.
    StopPolling,
}
