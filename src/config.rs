use serde::{Deserialize, Serialize};

/// How a king is found to be under check.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum CheckDetection {
    /// Attacked fields computed straight from the attacker's rays.
    #[default]
    AttackTable,
    /// Every pseudo-legal reply of the attacker is generated and tested for a king capture.
    ReplySimulation,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Occurrences of the same board that end the game in a draw.
    pub repetition_limit: usize,
    pub insufficient_material: bool,
    pub check_detection: CheckDetection,
    /// Worker threads used to filter pseudo-legal moves. 0 and 1 both mean no extra threads.
    pub legality_threads: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            repetition_limit: 3,
            insufficient_material: true,
            check_detection: CheckDetection::default(),
            legality_threads: 1,
        }
    }
}

impl RulesConfig {
    pub(crate) fn threads(&self) -> usize {
        self.legality_threads.max(1)
    }
}
