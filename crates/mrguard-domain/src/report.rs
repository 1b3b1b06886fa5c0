use mrguard_types::{Decision, FileDecision, ReviewData};

#[derive(Clone, Debug, Default)]
pub struct DecisionCounts {
    pub approved: u32,
    pub manual_review: u32,
}

impl DecisionCounts {
    pub fn from_files(files: &[FileDecision]) -> Self {
        let mut counts = DecisionCounts::default();
        for f in files {
            if f.decision.is_approve() {
                counts.approved += 1;
            } else {
                counts.manual_review += 1;
            }
        }
        counts
    }
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub decision: Decision,
    pub reason: String,
    pub files: Vec<FileDecision>,
    pub data: ReviewData,
    pub counts: DecisionCounts,
}
